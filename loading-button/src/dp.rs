//! # Density-independent pixels
//!
//! Style values of the loading button (text size, circular indicator diameter)
//! are given in [`Dp`] and converted to physical pixels with the process-wide
//! [`SCALE_FACTOR`] every time the button lays itself out.
//!
//! ```
//! use loading_button::Dp;
//!
//! let diameter = Dp(100.0);
//! assert!(diameter.to_pixels_f32() > 0.0);
//! ```

use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::Px;

/// Display scale factor shared by every dp conversion. Unset means `1.0`.
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Sets the scale factor. Non-finite or non-positive factors are ignored.
pub fn set_scale_factor(factor: f64) {
    if !factor.is_finite() || factor <= 0.0 {
        tracing::warn!(factor, "ignoring invalid scale factor");
        return;
    }
    *SCALE_FACTOR.get_or_init(|| RwLock::new(1.0)).write() = factor;
}

pub fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map_or(1.0, |lock| *lock.read())
}

/// Density-independent length.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    pub const ZERO: Self = Dp(0.0);

    /// The length in physical pixels at the current scale factor.
    pub fn to_pixels_f32(self) -> f32 {
        (self.0 * scale_factor()) as f32
    }

    /// Whole physical pixels, truncated toward zero.
    pub fn to_px(self) -> Px {
        Px::saturating_from_f32(self.to_pixels_f32())
    }
}

impl From<Px> for Dp {
    fn from(px: Px) -> Self {
        px.to_dp()
    }
}
