use serde::{Deserialize, Serialize};

/// Photograph to line-mask conversion.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BinarizeParams {
    /// Side of the square Gaussian smoothing kernel (odd, pixels).
    pub blur_kernel: u32,
    /// Side of the local-mean threshold window (odd, pixels).
    pub threshold_window: u32,
    /// Amount subtracted from the local mean before comparison.
    pub threshold_offset: f32,
    /// Close 1-pixel cracks with a plus-shaped dilation before blob isolation
    /// and undo it with a matching erosion afterwards.
    pub repair_gaps: bool,
}

impl Default for BinarizeParams {
    fn default() -> Self {
        Self {
            blur_kernel: 11,
            threshold_window: 5,
            threshold_offset: 2.0,
            repair_gaps: true,
        }
    }
}

impl BinarizeParams {
    /// Gaussian sigma equivalent to `blur_kernel` (`k = 11` gives `2.0`).
    pub fn blur_sigma(&self) -> f32 {
        kernel_sigma(self.blur_kernel)
    }
}

/// Sigma of the Gaussian whose kernel of side `k` holds ~all of its mass.
pub(crate) fn kernel_sigma(k: u32) -> f32 {
    let k = k.max(3) as f32;
    0.3 * ((k - 1.0) * 0.5 - 1.0) + 0.8
}

/// Hough accumulator settings. Resolution is fixed at 1 px / 1 degree.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LineDetectionParams {
    /// Minimal number of foreground pixels voting for a line.
    pub vote_threshold: u32,
    /// Accumulator non-maximum suppression radius (bins).
    pub suppression_radius: u32,
}

impl Default for LineDetectionParams {
    fn default() -> Self {
        Self {
            vote_threshold: 200,
            suppression_radius: 1,
        }
    }
}

/// Duplicate-line fusion tolerances.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeParams {
    /// Maximal `|rho_a - rho_b|` in pixels.
    pub max_rho_delta: f32,
    /// Maximal `|theta_a - theta_b|` in degrees.
    pub max_theta_delta_deg: f32,
    /// Maximal distance between corresponding border points, in pixels.
    pub max_endpoint_distance: f32,
}

impl Default for MergeParams {
    fn default() -> Self {
        Self {
            max_rho_delta: 20.0,
            max_theta_delta_deg: 10.0,
            max_endpoint_distance: 64.0,
        }
    }
}

/// Orientation bands for edge classification.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    /// Lines whose normal lies within this many degrees of the y axis are
    /// top/bottom candidates; within this many of the x axis, left/right.
    pub axis_tolerance_deg: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            axis_tolerance_deg: 10.0,
        }
    }
}

/// Rectification guard.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RectifyParams {
    /// Smallest accepted side of the rectified square, in pixels.
    pub min_side: usize,
    /// Largest accepted side; corners far outside the photograph exceed it.
    pub max_side: usize,
}

impl Default for RectifyParams {
    fn default() -> Self {
        Self {
            min_side: 2,
            max_side: 8192,
        }
    }
}

/// Preparation of the rectified board for per-cell digit extraction.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CellParams {
    /// Cells along each side of the board.
    pub cells_per_side: usize,
    /// Fraction of a cell side cropped away on every border (grid lines).
    pub inset_frac: f32,
    /// Gaussian-weighted threshold block size on the rectified board (odd).
    pub threshold_block: u32,
    /// Amount subtracted from the weighted local mean.
    pub threshold_offset: f32,
}

impl Default for CellParams {
    fn default() -> Self {
        Self {
            cells_per_side: 9,
            inset_frac: 0.1,
            threshold_block: 101,
            threshold_offset: 1.0,
        }
    }
}

/// Full pipeline configuration.
///
/// Read-only during detection; a single instance can be shared by any number
/// of concurrent runs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridDetectorParams {
    pub binarize: BinarizeParams,
    pub lines: LineDetectionParams,
    pub merge: MergeParams,
    pub edges: EdgeParams,
    pub rectify: RectifyParams,
    pub cells: CellParams,
}
