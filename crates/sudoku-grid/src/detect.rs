//! Convenience entry points taking `image` buffers or raw grayscale slices.

use crate::core;
use crate::detector::{GridDetection, SudokuGridDetector};
use crate::error::GridError;
use crate::params::GridDetectorParams;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Borrow an `image::GrayImage` as the core view type.
pub fn gray_view(img: &::image::GrayImage) -> core::GrayImageView<'_> {
    core::GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Copy a core raster into an `image::GrayImage` (e.g. for saving).
pub fn to_image_buffer(img: &core::GrayImage) -> Result<::image::GrayImage, GridError> {
    let invalid = GridError::InvalidImage {
        width: img.width,
        height: img.height,
    };
    let w = u32::try_from(img.width).map_err(|_| invalid.clone())?;
    let h = u32::try_from(img.height).map_err(|_| invalid.clone())?;
    ::image::GrayImage::from_raw(w, h, img.data.clone()).ok_or(invalid)
}

/// Build an `image::GrayImage` from a raw grayscale buffer.
pub fn gray_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<::image::GrayImage, GridError> {
    let invalid = GridError::InvalidImage {
        width: width as usize,
        height: height as usize,
    };
    let Some(expected) = (width as usize).checked_mul(height as usize) else {
        return Err(invalid);
    };
    if pixels.len() != expected {
        return Err(GridError::InvalidGrayBuffer {
            expected,
            got: pixels.len(),
        });
    }
    ::image::GrayImage::from_raw(width, height, pixels.to_vec()).ok_or(invalid)
}

/// Run the full pipeline on a grayscale photograph.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, params),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn detect_grid(
    img: &::image::GrayImage,
    params: GridDetectorParams,
) -> Result<GridDetection, GridError> {
    SudokuGridDetector::new(params).detect(&gray_view(img))
}

/// [`detect_grid`] with default parameters.
pub fn detect_grid_default(img: &::image::GrayImage) -> Result<GridDetection, GridError> {
    detect_grid(img, GridDetectorParams::default())
}

pub fn detect_grid_from_gray_u8(
    width: u32,
    height: u32,
    pixels: &[u8],
    params: GridDetectorParams,
) -> Result<GridDetection, GridError> {
    let img = gray_image_from_slice(width, height, pixels)?;
    detect_grid(&img, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_length_is_checked() {
        assert_eq!(
            gray_image_from_slice(3, 2, &[0; 5]).err(),
            Some(GridError::InvalidGrayBuffer {
                expected: 6,
                got: 5
            })
        );
        let img = gray_image_from_slice(3, 2, &[7; 6]).expect("sized");
        assert_eq!(gray_view(&img).data, &[7; 6]);
    }

    #[test]
    fn core_raster_converts_to_buffer() {
        let img = core::GrayImage::filled(4, 3, 9);
        let buf = to_image_buffer(&img).expect("convert");
        assert_eq!(buf.dimensions(), (4, 3));
        assert!(buf.pixels().all(|p| p[0] == 9));
    }

    #[test]
    fn zero_sized_slice_is_invalid() {
        assert!(matches!(
            detect_grid_from_gray_u8(0, 0, &[], GridDetectorParams::default()),
            Err(GridError::InvalidImage { .. })
        ));
    }
}
