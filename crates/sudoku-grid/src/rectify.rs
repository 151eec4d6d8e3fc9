//! Perspective correction of the board quadrilateral to an upright square.

use nalgebra::Point2;
use sudoku_grid_core::{
    homography_from_4pt, warp_perspective_gray, GrayImage, GrayImageView, Homography,
};

use crate::corners::BoardCorners;
use crate::error::GridError;
use crate::params::RectifyParams;

/// Upright `side x side` board raster plus the maps between it and the photo.
#[derive(Clone, Debug)]
pub struct RectifiedBoard {
    pub image: GrayImage,
    pub side: usize,
    pub h_rect_from_img: Homography,
    pub h_img_from_rect: Homography,
}

/// Side of the output square: the longest of the four quad sides, floored.
pub fn square_side(corners: &BoardCorners) -> usize {
    let c = corners.as_array();
    let longest_sq = (0..4)
        .map(|i| {
            let (a, b) = (c[i], c[(i + 1) % 4]);
            let (dx, dy) = ((a.x - b.x) as f64, (a.y - b.y) as f64);
            dx * dx + dy * dy
        })
        .fold(0.0_f64, f64::max);
    longest_sq.sqrt().floor() as usize
}

/// Warp the quad `corners` (TL, TR, BR, BL in `src` pixels) onto the square
/// with corners `(0, 0)`, `(side - 1, 0)`, `(side - 1, side - 1)`,
/// `(0, side - 1)`.
pub fn warp_quad_to_square(
    src: &GrayImageView<'_>,
    corners: [Point2<f32>; 4],
    side: usize,
) -> Result<RectifiedBoard, GridError> {
    let s = side.saturating_sub(1) as f32;
    let square = [
        Point2::new(0.0, 0.0),
        Point2::new(s, 0.0),
        Point2::new(s, s),
        Point2::new(0.0, s),
    ];

    let h_img_from_rect =
        homography_from_4pt(&square, &corners).ok_or(GridError::HomographyFailed)?;
    let h_rect_from_img = h_img_from_rect.inverse().ok_or(GridError::NonInvertible)?;
    let image = warp_perspective_gray(src, h_img_from_rect, side, side);

    Ok(RectifiedBoard {
        image,
        side,
        h_rect_from_img,
        h_img_from_rect,
    })
}

/// Resample the board spanned by `corners` out of the original photograph.
///
/// `src` should be the unprocessed grayscale input, not the blurred or
/// thresholded mask.
pub fn rectify_board(
    src: &GrayImageView<'_>,
    corners: &BoardCorners,
    params: &RectifyParams,
) -> Result<RectifiedBoard, GridError> {
    let side = square_side(corners);
    if side < params.min_side || side > params.max_side {
        return Err(GridError::DegenerateSize { side });
    }
    log::debug!("rectifying to {side}x{side}");
    warp_quad_to_square(src, corners.as_array(), side)
}
