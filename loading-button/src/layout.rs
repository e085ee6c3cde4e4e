//! Geometry of the loading button.
//!
//! [`compute_layout`] is a pure function of the button size, the measured
//! label, the circular indicator diameter and the current progress. All output
//! coordinates are physical pixels relative to the top-left corner of the
//! button.
use unicode_segmentation::UnicodeSegmentation;

use crate::PxSize;

/// Angle where the circular indicator starts sweeping, in degrees (12 o'clock).
pub const ARC_START_ANGLE_DEGREES: f32 = -90.0;

/// A point in physical pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in physical pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// The x-coordinate of the top-left corner
    pub x: f32,
    /// The y-coordinate of the top-left corner
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Extent of a rendered label.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    /// Advance width of the whole label.
    pub width: f32,
    /// Distance from the baseline to the top of the glyphs.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the glyphs.
    pub descent: f32,
}

impl TextBounds {
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Measures label text for layout.
pub trait TextMeasure {
    /// Returns the bounds of `text` drawn at `text_size_px`.
    fn measure(&self, text: &str, text_size_px: f32) -> TextBounds;
}

/// Font-free measurer that derives bounds from the grapheme count.
///
/// Good enough for hosts without a shaping engine; hosts with one should
/// provide their own [`TextMeasure`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedTextMeasure {
    /// Advance of one grapheme as a fraction of the text size.
    pub advance_ratio: f32,
    /// Ascent as a fraction of the text size.
    pub ascent_ratio: f32,
    /// Descent as a fraction of the text size.
    pub descent_ratio: f32,
}

impl Default for EstimatedTextMeasure {
    fn default() -> Self {
        Self {
            advance_ratio: 0.55,
            ascent_ratio: 0.76,
            descent_ratio: 0.24,
        }
    }
}

impl TextMeasure for EstimatedTextMeasure {
    fn measure(&self, text: &str, text_size_px: f32) -> TextBounds {
        let size = text_size_px.max(0.0);
        let graphemes = text.graphemes(true).count();
        if graphemes == 0 {
            return TextBounds::default();
        }
        TextBounds {
            width: graphemes as f32 * size * self.advance_ratio,
            ascent: size * self.ascent_ratio,
            descent: size * self.descent_ratio,
        }
    }
}

/// Derived geometry used to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ButtonLayout {
    /// Anchor of the label: horizontal center and baseline.
    pub label_origin: Point,
    /// Box occupied by the label glyphs.
    pub label_bounds: Rect,
    /// Horizontal progress fill, anchored at the left edge.
    pub fill_rect: Rect,
    /// Square bounding the circular indicator.
    pub arc_bounds: Rect,
    /// Sweep of the circular indicator in degrees.
    pub arc_sweep_degrees: f32,
}

/// Width of the fill bar for `progress` percent of `width`.
pub fn fill_width(width: f32, progress: f32) -> f32 {
    width * progress / 100.0
}

/// Sweep of the circular indicator for `progress` percent.
pub fn arc_sweep(progress: f32) -> f32 {
    360.0 * progress / 100.0
}

/// Computes the layout of the button.
///
/// Negative sizes are treated as zero; `progress` is clamped to `[0, 100]`
/// and NaN counts as zero.
pub fn compute_layout(
    size: PxSize,
    label: TextBounds,
    circular_diameter_px: f32,
    progress: f32,
) -> ButtonLayout {
    let [width, height] = size.to_f32_arr2();
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 100.0)
    };
    let center_x = width / 2.0;
    let center_y = height / 2.0;

    let baseline = center_y + (label.ascent - label.descent) / 2.0;
    let label_bounds = Rect::new(
        center_x - label.width / 2.0,
        baseline - label.ascent,
        label.width,
        label.height(),
    );

    let diameter = circular_diameter_px.max(0.0);
    let arc_bounds = Rect::new(
        center_x + label.width / 2.0,
        center_y - diameter / 2.0,
        diameter,
        diameter,
    );

    ButtonLayout {
        label_origin: Point::new(center_x, baseline),
        label_bounds,
        fill_rect: Rect::new(0.0, 0.0, fill_width(width, progress), height),
        arc_bounds,
        arc_sweep_degrees: arc_sweep(progress),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label() -> TextBounds {
        TextBounds {
            width: 60.0,
            ascent: 18.0,
            descent: 6.0,
        }
    }

    #[test]
    fn fill_and_sweep_follow_progress() {
        let size = PxSize::from([200, 80]);
        for step in 0..=100 {
            let p = step as f32;
            let layout = compute_layout(size, label(), 40.0, p);
            assert_eq!(layout.fill_rect.width, 200.0 * p / 100.0);
            assert_eq!(layout.fill_rect.height, 80.0);
            assert_eq!(layout.fill_rect.x, 0.0);
            assert_eq!(layout.arc_sweep_degrees, 360.0 * p / 100.0);
        }
    }

    #[test]
    fn label_is_centered_on_its_glyph_box() {
        let layout = compute_layout(PxSize::from([200, 80]), label(), 40.0, 0.0);
        assert_eq!(layout.label_origin, Point::new(100.0, 46.0));
        assert_eq!(layout.label_bounds, Rect::new(70.0, 28.0, 60.0, 24.0));
        assert_eq!(layout.label_bounds.center(), Point::new(100.0, 40.0));
    }

    #[test]
    fn arc_sits_right_of_label_and_vertically_centered() {
        let layout = compute_layout(PxSize::from([200, 80]), label(), 40.0, 0.0);
        assert_eq!(layout.arc_bounds, Rect::new(130.0, 20.0, 40.0, 40.0));
        assert_eq!(layout.arc_bounds.x, layout.label_bounds.right());
        assert_eq!(layout.arc_bounds.center().y, 40.0);
    }

    #[test]
    fn degenerate_sizes_do_not_panic() {
        let layout = compute_layout(PxSize::from([-20, -5]), label(), 40.0, 50.0);
        assert_eq!(layout.fill_rect, Rect::ZERO);
        assert!(layout.fill_rect.is_empty());
        assert_eq!(layout.arc_bounds.width, 40.0);

        let layout = compute_layout(PxSize::ZERO, TextBounds::default(), -3.0, f32::NAN);
        assert_eq!(layout.arc_bounds, Rect::ZERO);
        assert_eq!(layout.arc_sweep_degrees, 0.0);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        let size = PxSize::from([200, 80]);
        assert_eq!(compute_layout(size, label(), 40.0, 140.0).fill_rect.width, 200.0);
        assert_eq!(compute_layout(size, label(), 40.0, -1.0).fill_rect.width, 0.0);
    }

    #[test]
    fn estimated_measure_counts_graphemes() {
        let measure = EstimatedTextMeasure::default();
        let ascii = measure.measure("Loading", 20.0);
        assert_eq!(ascii.width, 7.0 * 20.0 * 0.55);
        assert!((ascii.height() - 20.0).abs() < 1e-4);

        // "é" written as e + combining accent is one grapheme.
        let combined = measure.measure("e\u{301}", 20.0);
        assert_eq!(combined.width, 20.0 * 0.55);

        assert_eq!(measure.measure("", 20.0), TextBounds::default());
    }
}
