//! Grayscale photograph to grid-line mask.
//!
//! Foreground (255) marks pixels darker than their neighbourhood, which on a
//! printed puzzle are the grid lines and digits.

use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::filter::{box_filter, gaussian_blur_f32};
use imageproc::morphology::{dilate, erode};

use crate::params::{kernel_sigma, BinarizeParams};

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

/// How the local reference level of [`adaptive_threshold_inv`] is computed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LocalMean {
    /// Unweighted mean over a `window x window` box, edge pixels replicated.
    Box { window: u32 },
    /// Gaussian-weighted mean over a `block x block` neighbourhood.
    Gaussian { block: u32 },
}

/// Inverted adaptive threshold.
///
/// The local reference is an 8-bit mean and the offset is floored to whole
/// grey levels: a pixel becomes foreground when `src - mean <= -floor(offset)`.
/// Dark structure on a bright background ends up white regardless of the
/// global illumination level.
pub fn adaptive_threshold_inv(src: &GrayImage, mean: LocalMean, offset: f32) -> GrayImage {
    let reference = match mean {
        LocalMean::Box { window } => box_filter(src, window / 2, window / 2),
        LocalMean::Gaussian { block } => gaussian_blur_f32(src, kernel_sigma(block)),
    };
    let delta = offset.floor() as i16;

    let mut out = src.clone();
    for (p, m) in out.pixels_mut().zip(reference.pixels()) {
        p[0] = if i16::from(p[0]) - i16::from(m[0]) <= -delta {
            FOREGROUND
        } else {
            BACKGROUND
        };
    }
    out
}

/// Blur, threshold and (optionally) dilate a photograph into a line mask.
///
/// The dilation uses the plus-shaped 3x3 element; undo it with
/// [`restore_line_width`] once blob isolation is done.
pub fn binarize(gray: &GrayImage, params: &BinarizeParams) -> GrayImage {
    let blurred = gaussian_blur_f32(gray, params.blur_sigma());
    let mask = adaptive_threshold_inv(
        &blurred,
        LocalMean::Box {
            window: params.threshold_window,
        },
        params.threshold_offset,
    );
    if params.repair_gaps {
        dilate(&mask, Norm::L1, 1)
    } else {
        mask
    }
}

/// Matching erosion for the gap-repair dilation of [`binarize`].
pub fn restore_line_width(mask: &GrayImage, params: &BinarizeParams) -> GrayImage {
    if params.repair_gaps {
        erode(mask, Norm::L1, 1)
    } else {
        mask.clone()
    }
}
