//! Selection of the four outer board edges from the merged line set.

use serde::{Deserialize, Serialize};
use sudoku_grid_core::Line;

use crate::params::EdgeParams;

/// Which side of the board an edge bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeRole {
    Top,
    Bottom,
    Left,
    Right,
}

impl EdgeRole {
    pub const ALL: [EdgeRole; 4] = [
        EdgeRole::Top,
        EdgeRole::Bottom,
        EdgeRole::Left,
        EdgeRole::Right,
    ];
}

/// A running extremum: the best line so far and the key it won with.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeSlot {
    pub line: Line,
    /// `rho` for top/bottom, x-intercept for left/right.
    pub key: f64,
    /// Whether a detected line has replaced the sentinel.
    pub matched: bool,
}

impl EdgeSlot {
    const fn sentinel(line: Line, key: f64) -> Self {
        Self {
            line,
            key,
            matched: false,
        }
    }

    fn take(&mut self, line: Line, key: f64) {
        *self = Self {
            line,
            key,
            matched: true,
        };
    }
}

/// The four outer edges of the board.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardEdges {
    pub top: EdgeSlot,
    pub bottom: EdgeSlot,
    pub left: EdgeSlot,
    pub right: EdgeSlot,
}

const LOW: Line = Line::new(1000.0, 1000.0);
const HIGH: Line = Line::new(-1000.0, -1000.0);

impl BoardEdges {
    /// Sentinel state that any detected line replaces, whatever the size of
    /// the photograph.
    pub const fn unset() -> Self {
        Self {
            top: EdgeSlot::sentinel(LOW, f64::INFINITY),
            bottom: EdgeSlot::sentinel(HIGH, f64::NEG_INFINITY),
            left: EdgeSlot::sentinel(LOW, f64::INFINITY),
            right: EdgeSlot::sentinel(HIGH, f64::NEG_INFINITY),
        }
    }

    pub fn get(&self, role: EdgeRole) -> &EdgeSlot {
        match role {
            EdgeRole::Top => &self.top,
            EdgeRole::Bottom => &self.bottom,
            EdgeRole::Left => &self.left,
            EdgeRole::Right => &self.right,
        }
    }

    /// Roles whose slot still holds its sentinel.
    pub fn missing(&self) -> Vec<EdgeRole> {
        EdgeRole::ALL
            .into_iter()
            .filter(|&r| !self.get(r).matched)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    fn observe(mut self, line: &Line, tol_deg: f32) -> Self {
        let theta = line.theta_deg();
        if theta > 90.0 - tol_deg && theta < 90.0 + tol_deg {
            let rho = line.rho as f64;
            if rho < self.top.key {
                self.top.take(*line, rho);
            }
            if rho > self.bottom.key {
                self.bottom.take(*line, rho);
            }
        } else if theta < tol_deg || theta > 180.0 - tol_deg {
            let xi = line.x_intercept();
            if xi > self.right.key {
                self.right.take(*line, xi);
            }
            if xi <= self.left.key {
                self.left.take(*line, xi);
            }
        }
        self
    }
}

impl Default for BoardEdges {
    fn default() -> Self {
        Self::unset()
    }
}

/// Pick the outermost near-axis lines as board edges.
///
/// Lines whose normal is within `axis_tolerance_deg` of vertical compete for
/// top (smallest `rho`) and bottom (largest `rho`); lines within the tolerance
/// of horizontal compete for left/right by x-intercept. Diagonals and
/// tombstones are ignored. Ties: top, bottom and right keep the first line
/// seen, left keeps the last.
pub fn select_edges(lines: &[Line], params: &EdgeParams) -> BoardEdges {
    let edges = lines
        .iter()
        .filter(|l| !l.is_tombstone())
        .fold(BoardEdges::unset(), |acc, l| {
            acc.observe(l, params.axis_tolerance_deg)
        });
    log::debug!("edge selection: missing {:?}", edges.missing());
    edges
}
