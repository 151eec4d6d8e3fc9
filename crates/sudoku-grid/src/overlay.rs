//! Diagnostic drawing of a detection onto the photograph.

use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use sudoku_grid_core::Line;

use crate::detector::GridDetection;

pub const LINE_COLOR: Rgb<u8> = Rgb([40, 90, 255]);
pub const EDGE_COLOR: Rgb<u8> = Rgb([0, 200, 0]);
pub const CORNER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Draw `line` across the whole image.
pub fn draw_line(img: &mut RgbImage, line: &Line, color: Rgb<u8>) {
    let [p1, p2] = line.border_points(img.width() as usize, img.height() as usize);
    if [p1.x, p1.y, p2.x, p2.y].iter().all(|v| v.is_finite()) {
        draw_line_segment_mut(
            img,
            (p1.x as f32, p1.y as f32),
            (p2.x as f32, p2.y as f32),
            color,
        );
    }
}

/// Color copy of `photo` with merged lines, the four edges and the corners.
pub fn draw_detection(photo: &GrayImage, detection: &GridDetection) -> RgbImage {
    let mut out = image::DynamicImage::ImageLuma8(photo.clone()).to_rgb8();

    for line in &detection.lines {
        draw_line(&mut out, line, LINE_COLOR);
    }
    let e = &detection.edges;
    for slot in [&e.top, &e.bottom, &e.left, &e.right] {
        draw_line(&mut out, &slot.line, EDGE_COLOR);
    }

    let radius = (out.width().min(out.height()) / 100).max(3) as i32;
    for p in detection.corners.as_array() {
        let center = (p.x.round() as i32, p.y.round() as i32);
        draw_filled_circle_mut(&mut out, center, radius, CORNER_COLOR);
    }
    out
}
