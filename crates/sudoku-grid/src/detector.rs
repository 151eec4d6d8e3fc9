use sudoku_grid_core::{GrayImageView, Line};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::binarize::{binarize, restore_line_width};
use crate::blob::{isolate_largest_blob, BlobStats};
use crate::corners::{solve_corners, BoardCorners};
use crate::edges::{select_edges, BoardEdges};
use crate::error::GridError;
use crate::lines::{HoughLineDetector, LineDetector};
use crate::merge::{live_lines, merge_related_lines};
use crate::params::GridDetectorParams;
use crate::rectify::{rectify_board, RectifiedBoard};

/// Everything one pipeline run produced.
#[derive(Clone, Debug)]
pub struct GridDetection {
    /// Upright board raster and the photo/board homographies.
    pub rectified: RectifiedBoard,
    pub corners: BoardCorners,
    pub edges: BoardEdges,
    /// Merged lines, tombstones removed.
    pub lines: Vec<Line>,
    /// Raw line candidates before merging.
    pub candidate_count: usize,
    pub merges: usize,
    pub blob: BlobStats,
}

/// Photograph to rectified Sudoku board.
///
/// The detector holds only read-only configuration, so one instance can
/// serve concurrent [`detect`](Self::detect) calls.
pub struct SudokuGridDetector<D = HoughLineDetector> {
    params: GridDetectorParams,
    line_detector: D,
}

impl SudokuGridDetector<HoughLineDetector> {
    pub fn new(params: GridDetectorParams) -> Self {
        let line_detector = HoughLineDetector::new(params.lines.clone());
        Self {
            params,
            line_detector,
        }
    }
}

impl Default for SudokuGridDetector<HoughLineDetector> {
    fn default() -> Self {
        Self::new(GridDetectorParams::default())
    }
}

impl<D: LineDetector> SudokuGridDetector<D> {
    /// Swap the line-candidate source (e.g. a precomputed list in tests).
    pub fn with_line_detector<E: LineDetector>(self, line_detector: E) -> SudokuGridDetector<E> {
        SudokuGridDetector {
            params: self.params,
            line_detector,
        }
    }

    #[inline]
    pub fn params(&self) -> &GridDetectorParams {
        &self.params
    }

    /// Run the full pipeline on a grayscale photograph.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, gray),
            fields(width = gray.width, height = gray.height)
        )
    )]
    pub fn detect(&self, gray: &GrayImageView<'_>) -> Result<GridDetection, GridError> {
        self.run(gray).inspect_err(|e| log::warn!("grid detection failed: {e}"))
    }

    fn run(&self, gray: &GrayImageView<'_>) -> Result<GridDetection, GridError> {
        let (width, height) = (gray.width, gray.height);
        let invalid = GridError::InvalidImage { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        let expected = width.checked_mul(height).ok_or(invalid.clone())?;
        if gray.data.len() != expected {
            return Err(GridError::InvalidGrayBuffer {
                expected,
                got: gray.data.len(),
            });
        }
        let w = u32::try_from(width).map_err(|_| invalid.clone())?;
        let h = u32::try_from(height).map_err(|_| invalid.clone())?;
        let photo = image::GrayImage::from_raw(w, h, gray.data.to_vec()).ok_or(invalid)?;

        let mut mask = binarize(&photo, &self.params.binarize);
        let blob = isolate_largest_blob(&mut mask).ok_or(GridError::NoBoard)?;
        log::debug!(
            "largest blob: {} px of {} components",
            blob.area,
            blob.components
        );
        let mask = restore_line_width(&mask, &self.params.binarize);

        let mut lines = self.line_detector.detect_lines(&mask);
        let candidate_count = lines.len();
        log::debug!("{candidate_count} line candidates");
        let merges = merge_related_lines(&mut lines, width, height, &self.params.merge);

        let edges = select_edges(&lines, &self.params.edges);
        let corners = solve_corners(&edges, width, height)?;
        log::debug!("corners: {:?}", corners.as_array());

        let rectified = rectify_board(gray, &corners, &self.params.rectify)?;

        Ok(GridDetection {
            rectified,
            corners,
            edges,
            lines: live_lines(&lines),
            candidate_count,
            merges,
            blob,
        })
    }
}
