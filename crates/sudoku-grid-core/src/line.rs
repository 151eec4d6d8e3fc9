//! Lines in normal form `x cos(theta) + y sin(theta) = rho`.
//!
//! `theta` is the angle of the normal in `[0, pi)` and `rho` the signed
//! distance from the image origin (top-left pixel, y pointing down). This is
//! the parametrisation produced by a standard Hough accumulator.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Determinants smaller than this fraction of the coefficient scale are
/// treated as parallel lines.
const PARALLEL_REL_EPS: f64 = 1e-9;

/// A line in normal form.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub rho: f32,
    /// Normal angle in radians, `[0, pi)` for real lines.
    pub theta: f32,
}

impl Line {
    /// Logically deleted entry. `theta = -100` lies outside the valid range,
    /// so no detected line can collide with it.
    pub const TOMBSTONE: Line = Line {
        rho: 0.0,
        theta: -100.0,
    };

    pub const fn new(rho: f32, theta: f32) -> Self {
        Self { rho, theta }
    }

    pub fn from_degrees(rho: f32, theta_deg: f32) -> Self {
        Self::new(rho, theta_deg.to_radians())
    }

    #[inline]
    pub fn is_tombstone(&self) -> bool {
        self.rho == Self::TOMBSTONE.rho && self.theta == Self::TOMBSTONE.theta
    }

    #[inline]
    pub fn theta_deg(&self) -> f32 {
        self.theta.to_degrees()
    }

    /// Whether the normal is closer to the y axis than to the x axis,
    /// i.e. the line itself runs left-to-right across the image.
    #[inline]
    pub fn runs_horizontally(&self) -> bool {
        let t = self.theta as f64;
        t > PI / 4.0 && t < 3.0 * PI / 4.0
    }

    /// Where the line crosses `y = 0`.
    #[inline]
    pub fn x_intercept(&self) -> f64 {
        self.rho as f64 / (self.theta as f64).cos()
    }

    /// Two representative points of the line on the image border.
    ///
    /// Lines running left-to-right are projected onto `x = 0` and
    /// `x = width`; all others onto `y = 0` and `y = height`. The divisor is
    /// `sin(theta)` resp. `cos(theta)`, whose magnitude is at least
    /// `sqrt(2)/2` in its branch, so neither branch divides by a value near 0.
    pub fn border_points(&self, width: usize, height: usize) -> [Point2<f64>; 2] {
        let rho = self.rho as f64;
        let (s, c) = (self.theta as f64).sin_cos();
        if self.runs_horizontally() {
            let w = width as f64;
            [
                Point2::new(0.0, rho / s),
                Point2::new(w, (rho - w * c) / s),
            ]
        } else {
            let h = height as f64;
            [
                Point2::new(rho / c, 0.0),
                Point2::new((rho - h * s) / c, h),
            ]
        }
    }

    /// General form through the two border points of the line.
    pub fn general_form(&self, width: usize, height: usize) -> GeneralLine {
        let [p1, p2] = self.border_points(width, height);
        GeneralLine::through(p1, p2)
    }

    /// Component-wise mean of two lines.
    #[inline]
    pub fn averaged_with(&self, other: &Line) -> Line {
        Line::new((self.rho + other.rho) / 2.0, (self.theta + other.theta) / 2.0)
    }
}

/// A line in general form `a x + b y = c`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneralLine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl GeneralLine {
    pub fn through(p1: Point2<f64>, p2: Point2<f64>) -> Self {
        let a = p2.y - p1.y;
        let b = p1.x - p2.x;
        let c = a * p1.x + b * p1.y;
        Self { a, b, c }
    }

    /// Solve the 2x2 system with Cramer's rule.
    ///
    /// Returns `None` for (near-)parallel lines or non-finite coefficients.
    pub fn intersection(&self, other: &GeneralLine) -> Option<Point2<f64>> {
        let det = self.a * other.b - other.a * self.b;
        let scale = (self.a.abs() + self.b.abs()) * (other.a.abs() + other.b.abs());
        if !det.is_finite() || !scale.is_finite() || det.abs() <= PARALLEL_REL_EPS * scale {
            return None;
        }
        let x = (other.b * self.c - self.b * other.c) / det;
        let y = (self.a * other.c - other.a * self.c) / det;
        Some(Point2::new(x, y))
    }
}
