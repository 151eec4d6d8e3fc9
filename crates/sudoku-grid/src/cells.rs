//! Per-cell preparation of the rectified board for digit recognition.

use image::Luma;
use sudoku_grid_core::GrayImage;

use crate::binarize::{adaptive_threshold_inv, LocalMean};
use crate::params::CellParams;

/// Inverted Gaussian-weighted adaptive threshold of the upright board.
///
/// Ink (digits, grid) becomes 255, paper 0.
pub fn threshold_board(board: &GrayImage, params: &CellParams) -> GrayImage {
    let buf = image::GrayImage::from_fn(board.width as u32, board.height as u32, |x, y| {
        Luma([board.get(x as usize, y as usize)])
    });
    let mask = adaptive_threshold_inv(
        &buf,
        LocalMean::Gaussian {
            block: params.threshold_block,
        },
        params.threshold_offset,
    );
    GrayImage {
        width: board.width,
        height: board.height,
        data: mask.into_raw(),
    }
}

/// Crop cell `(row, col)` of the `cells_per_side` lattice, minus an inset of
/// `inset_frac` of the cell side on every border.
///
/// `None` for indices outside the lattice or cells that vanish after the
/// inset.
pub fn extract_cell(
    board: &GrayImage,
    row: usize,
    col: usize,
    params: &CellParams,
) -> Option<GrayImage> {
    let n = params.cells_per_side;
    if n == 0 || row >= n || col >= n {
        return None;
    }
    let cell_w = board.width as f32 / n as f32;
    let cell_h = board.height as f32 / n as f32;
    let inset = params.inset_frac.clamp(0.0, 0.5);

    let x0 = (col as f32 * cell_w + inset * cell_w).round() as usize;
    let y0 = (row as f32 * cell_h + inset * cell_h).round() as usize;
    let w = (cell_w * (1.0 - 2.0 * inset)).round() as usize;
    let h = (cell_h * (1.0 - 2.0 * inset)).round() as usize;
    if w == 0 || h == 0 {
        return None;
    }
    Some(board.crop(x0, y0, w, h))
}

/// All cells in row-major order. Empty if the board is too small to split.
pub fn extract_cells(board: &GrayImage, params: &CellParams) -> Vec<GrayImage> {
    let n = params.cells_per_side;
    (0..n)
        .flat_map(|row| (0..n).map(move |col| (row, col)))
        .map_while(|(row, col)| extract_cell(board, row, col, params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_grid(side: usize, step: usize) -> GrayImage {
        let mut b = GrayImage::filled(side, side, 230);
        for y in 0..side {
            for x in 0..side {
                if x % step == 0 || y % step == 0 {
                    b.set(x, y, 20);
                }
            }
        }
        b
    }

    #[test]
    fn ink_is_foreground_after_threshold() {
        let b = board_with_grid(90, 10);
        let t = threshold_board(&b, &CellParams::default());
        assert_eq!((t.width, t.height), (90, 90));
        assert_eq!(t.get(40, 45), 255);
        assert_eq!(t.get(45, 45), 0);
    }

    #[test]
    fn cells_skip_grid_lines() {
        let b = board_with_grid(90, 10);
        let p = CellParams::default();
        let cell = extract_cell(&b, 4, 7, &p).expect("inside lattice");
        assert_eq!((cell.width, cell.height), (8, 8));
        assert!(cell.data.iter().all(|&v| v == 230));
    }

    #[test]
    fn out_of_lattice_is_none() {
        let b = board_with_grid(90, 10);
        let p = CellParams::default();
        assert!(extract_cell(&b, 9, 0, &p).is_none());
        assert!(extract_cell(&b, 0, 9, &p).is_none());
    }

    #[test]
    fn all_cells_row_major() {
        let mut b = board_with_grid(90, 10);
        // Mark the interior of cell (1, 2).
        b.set(25, 15, 0);
        let cells = extract_cells(&b, &CellParams::default());
        assert_eq!(cells.len(), 81);
        assert!(cells[9 + 2].data.contains(&0));
        assert!(!cells[2 * 9 + 1].data.contains(&0));
    }

    #[test]
    fn tiny_board_yields_no_cells() {
        let b = GrayImage::filled(4, 4, 0);
        assert!(extract_cells(&b, &CellParams::default()).is_empty());
    }
}
