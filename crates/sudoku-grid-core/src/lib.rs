//! Core types for Sudoku grid extraction.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete image library: rasters are plain row-major `u8`
//! buffers, lines are kept in Hough normal form, and the perspective
//! primitives (4-point homography, warp) operate on those.

mod homography;
mod image;
mod line;
mod logger;

pub use homography::{homography_from_4pt, warp_perspective_gray, Homography};
pub use image::{sample_bilinear, sample_bilinear_u8, GrayImage, GrayImageView};
pub use line::{GeneralLine, Line};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
