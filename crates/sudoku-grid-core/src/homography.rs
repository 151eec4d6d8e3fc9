//! Plane projective maps between four-corner quadrilaterals.

use crate::{sample_bilinear_u8, GrayImage, GrayImageView};
use nalgebra::{Matrix3, Point2, Vector3};
use serde::{Deserialize, Serialize};

/// Relative size below which a quad is treated as collapsed.
const DEGENERATE_REL_EPS: f64 = 1e-12;

/// 3x3 projective map `p' ~ H * (x, y, 1)`, normalised so that `H[2][2] = 1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Homography(pub Matrix3<f64>);

impl Homography {
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Scale `m` to `m[2][2] = 1`; `None` if that entry vanishes or the
    /// result is not finite.
    pub fn from_matrix(m: Matrix3<f64>) -> Option<Self> {
        let w = m[(2, 2)];
        if w.abs() < f64::EPSILON {
            return None;
        }
        let m = m / w;
        m.iter().all(|v| v.is_finite()).then_some(Self(m))
    }

    /// Map a pixel position. Points on the line at infinity come back
    /// non-finite.
    #[inline]
    pub fn project(&self, p: Point2<f32>) -> Point2<f32> {
        let q = self.0 * Vector3::new(p.x as f64, p.y as f64, 1.0);
        Point2::new((q.x / q.z) as f32, (q.y / q.z) as f32)
    }

    pub fn inverse(&self) -> Option<Self> {
        self.0.try_inverse().and_then(Self::from_matrix)
    }
}

/// Map taking the unit square `(0,0), (1,0), (1,1), (0,1)` onto `quad`, in
/// closed form. `None` when three or more corners are collinear.
fn unit_square_to(quad: &[Point2<f32>; 4]) -> Option<Matrix3<f64>> {
    let [p0, p1, p2, p3] = quad.map(|p| (p.x as f64, p.y as f64));

    let (dx1, dy1) = (p1.0 - p2.0, p1.1 - p2.1);
    let (dx2, dy2) = (p3.0 - p2.0, p3.1 - p2.1);
    let den = dx1 * dy2 - dx2 * dy1;
    let scale = (dx1.abs() + dy1.abs()) * (dx2.abs() + dy2.abs());
    if !den.is_finite() || den.abs() <= DEGENERATE_REL_EPS * scale.max(1.0) {
        return None;
    }

    // Zero for parallelograms, where the map is affine.
    let sx = p0.0 - p1.0 + p2.0 - p3.0;
    let sy = p0.1 - p1.1 + p2.1 - p3.1;
    let g = (sx * dy2 - dx2 * sy) / den;
    let h = (dx1 * sy - sx * dy1) / den;

    Some(Matrix3::new(
        p1.0 - p0.0 + g * p1.0, p3.0 - p0.0 + h * p3.0, p0.0, //
        p1.1 - p0.1 + g * p1.1, p3.1 - p0.1 + h * p3.1, p0.1, //
        g, h, 1.0,
    ))
}

/// Projective map sending `src[i]` to `dst[i]` for all four corners.
///
/// Both quads must be non-degenerate (no three corners collinear).
pub fn homography_from_4pt(src: &[Point2<f32>; 4], dst: &[Point2<f32>; 4]) -> Option<Homography> {
    let square_to_src = unit_square_to(src)?;
    let square_to_dst = unit_square_to(dst)?;
    let src_to_square = square_to_src.try_inverse()?;
    Homography::from_matrix(square_to_dst * src_to_square)
}

/// Resample `src` into an `out_w x out_h` raster.
///
/// `h_src_from_out` takes output pixel indices to source pixel coordinates;
/// output `(x, y)` is the bilinear sample of `src` there, 0 outside `src`.
pub fn warp_perspective_gray(
    src: &GrayImageView<'_>,
    h_src_from_out: Homography,
    out_w: usize,
    out_h: usize,
) -> GrayImage {
    let data = (0..out_w * out_h)
        .map(|i| {
            let (x, y) = ((i % out_w) as f32, (i / out_w) as f32);
            let p = h_src_from_out.project(Point2::new(x, y));
            if p.x.is_finite() && p.y.is_finite() {
                sample_bilinear_u8(src, p.x, p.y)
            } else {
                0
            }
        })
        .collect();

    GrayImage {
        width: out_w,
        height: out_h,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square(side: f32) -> [Point2<f32>; 4] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(side, 0.0),
            Point2::new(side, side),
            Point2::new(0.0, side),
        ]
    }

    #[test]
    fn skewed_quad_corners_land_on_square() {
        let quad = [
            Point2::new(112.0_f32, 80.0),
            Point2::new(410.0, 97.0),
            Point2::new(395.0, 402.0),
            Point2::new(90.0, 371.0),
        ];
        let h = homography_from_4pt(&quad, &square(299.0)).expect("solvable");
        for (q, s) in quad.iter().zip(square(299.0)) {
            let p = h.project(*q);
            assert_abs_diff_eq!(p.x, s.x, epsilon = 1e-3);
            assert_abs_diff_eq!(p.y, s.y, epsilon = 1e-3);
        }
    }

    #[test]
    fn parallelogram_gives_affine_map() {
        let quad = [
            Point2::new(10.0_f32, 10.0),
            Point2::new(60.0, 20.0),
            Point2::new(70.0, 70.0),
            Point2::new(20.0, 60.0),
        ];
        let h = homography_from_4pt(&square(1.0), &quad).expect("solvable");
        assert_abs_diff_eq!(h.0[(2, 0)], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(h.0[(2, 1)], 0.0, epsilon = 1e-12);
        let mid = h.project(Point2::new(0.5, 0.5));
        assert_abs_diff_eq!(mid.x, 40.0, epsilon = 1e-4);
        assert_abs_diff_eq!(mid.y, 40.0, epsilon = 1e-4);
    }

    #[test]
    fn inverse_undoes_projection() {
        let quad = [
            Point2::new(3.0_f32, 8.0),
            Point2::new(90.0, 2.0),
            Point2::new(99.0, 95.0),
            Point2::new(-4.0, 80.0),
        ];
        let h = homography_from_4pt(&square(50.0), &quad).expect("solvable");
        let inv = h.inverse().expect("invertible");
        for p in [
            Point2::new(0.0_f32, 0.0),
            Point2::new(17.5, 42.0),
            Point2::new(50.0, 3.0),
        ] {
            let back = inv.project(h.project(p));
            assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-3);
            assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-3);
        }
    }

    #[test]
    fn collapsed_quads_are_rejected() {
        let collapsed = [Point2::new(5.0_f32, 5.0); 4];
        assert!(homography_from_4pt(&collapsed, &square(9.0)).is_none());

        let collinear = [
            Point2::new(0.0_f32, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(3.0, 3.0),
        ];
        assert!(homography_from_4pt(&square(9.0), &collinear).is_none());
    }

    #[test]
    fn identity_warp_reproduces_source() {
        let data: Vec<u8> = (0..24 * 24).map(|i| ((i * 37) % 256) as u8).collect();
        let src = GrayImage::from_vec(24, 24, data).expect("sized buffer");

        let out = warp_perspective_gray(&src.view(), Homography::identity(), 24, 24);
        assert_eq!(out, src);
    }
}
