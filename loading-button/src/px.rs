//! Physical pixel units.
use crate::dp::{Dp, scale_factor};

/// Length in physical pixels. Layout code reads negative values as zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    pub const ZERO: Self = Self(0);

    pub const fn new(value: i32) -> Self {
        Px(value)
    }

    /// The value with negatives clamped to zero.
    pub fn positive(self) -> u32 {
        self.0.max(0) as u32
    }

    pub fn to_dp(self) -> Dp {
        Dp(f64::from(self.0) / scale_factor())
    }

    /// Converts from `f32`, truncating toward zero and saturating at the `i32`
    /// bounds. NaN becomes zero.
    pub fn saturating_from_f32(value: f32) -> Self {
        if value.is_nan() {
            return Px::ZERO;
        }
        Px(value.clamp(i32::MIN as f32, i32::MAX as f32) as i32)
    }
}

impl From<Dp> for Px {
    fn from(dp: Dp) -> Self {
        dp.to_px()
    }
}

/// Size handed to the button on resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PxSize {
    pub width: Px,
    pub height: Px,
}

impl PxSize {
    pub const ZERO: Self = Self {
        width: Px::ZERO,
        height: Px::ZERO,
    };

    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero or negative.
    pub fn is_degenerate(self) -> bool {
        self.width.0 <= 0 || self.height.0 <= 0
    }

    /// `[width, height]` as `f32`, negatives clamped to zero.
    pub fn to_f32_arr2(self) -> [f32; 2] {
        [self.width.positive() as f32, self.height.positive() as f32]
    }
}

impl From<[i32; 2]> for PxSize {
    fn from([width, height]: [i32; 2]) -> Self {
        Self::new(Px(width), Px(height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturating_from_f32_truncates_and_clamps() {
        assert_eq!(Px::saturating_from_f32(f32::MAX), Px(i32::MAX));
        assert_eq!(Px::saturating_from_f32(f32::MIN), Px(i32::MIN));
        assert_eq!(Px::saturating_from_f32(100.5), Px(100));
        assert_eq!(Px::saturating_from_f32(-100.5), Px(-100));
        assert_eq!(Px::saturating_from_f32(f32::NAN), Px::ZERO);
    }

    #[test]
    fn degenerate_sizes() {
        assert!(PxSize::ZERO.is_degenerate());
        assert!(PxSize::from([200, -1]).is_degenerate());
        assert!(!PxSize::from([200, 80]).is_degenerate());
        assert_eq!(PxSize::from([-5, 80]).to_f32_arr2(), [0.0, 80.0]);
        assert_eq!(Px(-10).positive(), 0);
    }
}
