//! Sudoku board extraction from photographs.
//!
//! The pipeline turns a grayscale photograph into an upright, square raster
//! of the puzzle:
//! - adaptive binarisation so grid lines become foreground ([`binarize`]);
//! - isolation of the largest connected blob, the outer frame ([`blob`]);
//! - Hough line candidates ([`lines`]) and in-place fusion of duplicates
//!   ([`merge`]);
//! - selection of the outermost near-axis lines as edges ([`edges`]) and
//!   their pairwise intersections as corners ([`corners`]);
//! - a 4-point perspective warp to a square ([`rectify`]).
//!
//! [`cells`] prepares the rectified board for a digit classifier and
//! [`overlay`] draws a detection for inspection.
//!
//! ## Quickstart
//!
//! ```no_run
//! use sudoku_grid::detect;
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("puzzle.jpg")?.decode()?.to_luma8();
//!
//! match detect::detect_grid_default(&img) {
//!     Ok(det) => println!("board side: {} px", det.rectified.side),
//!     Err(e) if e.is_no_board() => println!("no board found"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `sudoku_grid::core`: rasters, lines, homographies, logger.
//! - [`SudokuGridDetector`]: configurable pipeline with a pluggable
//!   [`LineDetector`].
//! - [`detect`]: one-call helpers from `image::GrayImage` or raw buffers.

pub use sudoku_grid_core as core;

pub mod binarize;
pub mod blob;
pub mod cells;
pub mod corners;
pub mod detect;
pub mod edges;
pub mod lines;
pub mod merge;
pub mod overlay;
pub mod rectify;

mod detector;
mod error;
mod params;

pub use cells::{extract_cell, extract_cells, threshold_board};
pub use corners::{solve_corners, BoardCorners};
pub use detector::{GridDetection, SudokuGridDetector};
pub use edges::{select_edges, BoardEdges, EdgeRole, EdgeSlot};
pub use error::GridError;
pub use lines::{HoughLineDetector, LineDetector};
pub use merge::merge_related_lines;
pub use params::{
    BinarizeParams, CellParams, EdgeParams, GridDetectorParams, LineDetectionParams, MergeParams,
    RectifyParams,
};
pub use rectify::{rectify_board, RectifiedBoard};
pub use sudoku_grid_core::{GrayImage, GrayImageView, Homography, Line};
