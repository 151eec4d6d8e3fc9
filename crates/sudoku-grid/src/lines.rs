//! Line candidate extraction.

use image::GrayImage;
use imageproc::hough::{detect_lines, LineDetectionOptions, PolarLine};
use sudoku_grid_core::Line;

use crate::params::LineDetectionParams;

/// Source of raw `(rho, theta)` line candidates from a binary mask.
///
/// Output order is unspecified; downstream stages must not depend on it.
pub trait LineDetector {
    fn detect_lines(&self, mask: &GrayImage) -> Vec<Line>;
}

/// Standard Hough transform, 1 px / 1 degree accumulator.
#[derive(Clone, Debug, Default)]
pub struct HoughLineDetector {
    params: LineDetectionParams,
}

impl HoughLineDetector {
    pub fn new(params: LineDetectionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LineDetectionParams {
        &self.params
    }
}

impl LineDetector for HoughLineDetector {
    fn detect_lines(&self, mask: &GrayImage) -> Vec<Line> {
        let options = LineDetectionOptions {
            vote_threshold: self.params.vote_threshold,
            suppression_radius: self.params.suppression_radius,
        };
        detect_lines(mask, options)
            .into_iter()
            .map(line_from_polar)
            .collect()
    }
}

impl<F> LineDetector for F
where
    F: Fn(&GrayImage) -> Vec<Line>,
{
    fn detect_lines(&self, mask: &GrayImage) -> Vec<Line> {
        self(mask)
    }
}

fn line_from_polar(p: PolarLine) -> Line {
    Line::from_degrees(p.r, p.angle_in_degrees as f32)
}
