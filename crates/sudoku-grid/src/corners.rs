//! Board corners as intersections of adjacent edges.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::edges::{BoardEdges, EdgeRole};
use crate::error::GridError;

/// Corners of the board quadrilateral in image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardCorners {
    pub top_left: Point2<f32>,
    pub top_right: Point2<f32>,
    pub bottom_right: Point2<f32>,
    pub bottom_left: Point2<f32>,
}

impl BoardCorners {
    /// Corners in cyclic order TL, TR, BR, BL.
    pub fn as_array(&self) -> [Point2<f32>; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}

/// Intersect the four edges pairwise.
///
/// Each edge is converted to general form through its two border points
/// (same projection as the merge step, image bounds `width x height`).
/// Fails with [`GridError::DegenerateEdges`] if an edge was never found and
/// with [`GridError::ParallelEdges`] if two adjacent edges do not intersect.
pub fn solve_corners(
    edges: &BoardEdges,
    width: usize,
    height: usize,
) -> Result<BoardCorners, GridError> {
    let missing = edges.missing();
    if !missing.is_empty() {
        return Err(GridError::DegenerateEdges { missing });
    }

    let general = |role: EdgeRole| edges.get(role).line.general_form(width, height);
    let meet = |first: EdgeRole, second: EdgeRole| {
        general(first)
            .intersection(&general(second))
            .map(|p| Point2::new(p.x as f32, p.y as f32))
            .ok_or(GridError::ParallelEdges { first, second })
    };

    Ok(BoardCorners {
        top_left: meet(EdgeRole::Top, EdgeRole::Left)?,
        top_right: meet(EdgeRole::Top, EdgeRole::Right)?,
        bottom_right: meet(EdgeRole::Bottom, EdgeRole::Right)?,
        bottom_left: meet(EdgeRole::Bottom, EdgeRole::Left)?,
    })
}
