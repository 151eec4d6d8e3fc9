#![allow(dead_code)]

use image::{GrayImage, Luma};
use imageproc::drawing::draw_line_segment_mut;

pub const PAPER: u8 = 230;
pub const INK: u8 = 0;

/// Axis-aligned 9x9 board with 1 px lines, outer frame spanning
/// `origin..=origin + side` on both axes.
pub fn render_board(width: u32, height: u32, origin: u32, side: u32) -> GrayImage {
    render_board_at(width, height, (origin, origin), side)
}

/// [`render_board`] with the top-left frame corner at `(x0, y0)`.
pub fn render_board_at(width: u32, height: u32, (x0, y0): (u32, u32), side: u32) -> GrayImage {
    let mut img = GrayImage::from_pixel(width, height, Luma([PAPER]));
    for k in 0..=9 {
        let step = (side * k) / 9;
        for t in 0..=side {
            img.put_pixel(x0 + step, y0 + t, Luma([INK]));
            img.put_pixel(x0 + t, y0 + step, Luma([INK]));
        }
    }
    img
}

/// Board corners (TL, TR, BR, BL) of a square of `side` centred at `center`
/// and rotated by `angle_deg`.
pub fn rotated_corners(center: (f32, f32), side: f32, angle_deg: f32) -> [(f32, f32); 4] {
    let (s, c) = angle_deg.to_radians().sin_cos();
    let h = side / 2.0;
    [(-h, -h), (h, -h), (h, h), (-h, h)]
        .map(|(x, y)| (center.0 + x * c - y * s, center.1 + x * s + y * c))
}

/// Board drawn from its four corners with straight 1 px lines.
pub fn render_quad_board(width: u32, height: u32, corners: [(f32, f32); 4]) -> GrayImage {
    let mut img = GrayImage::from_pixel(width, height, Luma([PAPER]));
    let [tl, tr, br, bl] = corners;
    let lerp = |a: (f32, f32), b: (f32, f32), t: f32| {
        (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
    };
    for k in 0..=9 {
        let t = k as f32 / 9.0;
        draw_line_segment_mut(&mut img, lerp(tl, tr, t), lerp(bl, br, t), Luma([INK]));
        draw_line_segment_mut(&mut img, lerp(tl, bl, t), lerp(tr, br, t), Luma([INK]));
    }
    img
}

/// Scattered isolated 3x3 dark dots; no structure long enough to vote a line.
pub fn render_dots(width: u32, height: u32) -> GrayImage {
    let mut img = GrayImage::from_pixel(width, height, Luma([PAPER]));
    let mut state = 0x2545_f491_u32;
    for gy in (10..height - 12).step_by(24) {
        for gx in (10..width - 12).step_by(24) {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let jx = (state >> 16) % 8;
            let jy = (state >> 24) % 8;
            for dy in 0..3 {
                for dx in 0..3 {
                    img.put_pixel(gx + jx + dx, gy + jy + dy, Luma([INK]));
                }
            }
        }
    }
    img
}
