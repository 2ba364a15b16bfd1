//! Shared plotting configuration: resolution, fonts, per-status styling.
//!

use plotters::style::full_palette::{AMBER_600, GREEN_600, ORANGE_800, RED_600};
use plotters::style::RGBColor;

use sepwatch_formats::Status;

pub const PLOT_MARGIN: Pixel = 20;

pub const FONT: &str = "sans-serif";

pub type Pixel = u32;

#[derive(Clone, Copy, Debug)]
pub struct PlotResolution {
    width: Pixel,
    height: Pixel,
}

impl PlotResolution {
    #[must_use]
    pub fn new(width: Pixel, height: Pixel) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn width(&self) -> Pixel {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> Pixel {
        self.height
    }
}

impl Default for PlotResolution {
    fn default() -> Self {
        Self {
            width: 800,
            height: 480,
        }
    }
}

impl From<PlotResolution> for (Pixel, Pixel) {
    fn from(plot_resolution: PlotResolution) -> Self {
        (plot_resolution.width(), plot_resolution.height())
    }
}

/// Marker color per status, the observed green/amber/orange/red ramp.
///
#[must_use]
pub fn status_color(status: Status) -> RGBColor {
    match status {
        Status::Safe => GREEN_600,
        Status::OuterNear => AMBER_600,
        Status::InnerNear => ORANGE_800,
        Status::Collision => RED_600,
    }
}

/// Marker size per status, collisions stand out.
///
#[must_use]
pub fn status_size(status: Status) -> Pixel {
    match status {
        Status::Collision => 8,
        _ => 5,
    }
}

/// Pad a data range by 10% on both sides so markers never sit on the frame, with a
/// fallback extent for empty or degenerate input.
///
#[must_use]
pub fn pad_range(min: f64, max: f64) -> std::ops::Range<f64> {
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let span = max - min;
    if span <= f64::EPSILON {
        return (min - 0.5)..(max + 0.5);
    }
    (min - span * 0.1)..(max + span * 0.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 10.0)]
    #[case(-5.0, 5.0)]
    #[case(44.31, 44.42)]
    fn test_pad_range(#[case] min: f64, #[case] max: f64) {
        let r = pad_range(min, max);
        assert!(r.start < min && r.end > max);
    }

    #[test]
    fn test_pad_range_degenerate() {
        let r = pad_range(5.0, 5.0);
        assert!(r.start < 5.0 && 5.0 < r.end);

        // empty input folds to infinities
        //
        let r = pad_range(f64::INFINITY, f64::NEG_INFINITY);
        assert_eq!(0.0..1.0, r);
    }

    #[test]
    fn test_status_size() {
        assert!(status_size(Status::Collision) > status_size(Status::Safe));
    }
}
