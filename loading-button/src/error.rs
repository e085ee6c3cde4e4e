use thiserror::Error;

use crate::button::LoadingButtonArgsBuilderError;

/// Errors reported by the loading button.
#[derive(Debug, Error)]
pub enum LoadingButtonError {
    /// A progress value outside `0..=100` (or NaN) was passed in.
    #[error("progress {0} is outside the range 0..=100")]
    ProgressOutOfRange(f32),
    /// The style arguments failed validation.
    #[error("invalid loading button arguments: {0}")]
    Config(#[from] LoadingButtonArgsBuilderError),
}
