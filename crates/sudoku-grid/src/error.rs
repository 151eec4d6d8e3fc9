use crate::edges::EdgeRole;

/// Errors returned by the grid extraction pipeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    InvalidImage { width: usize, height: usize },

    #[error("invalid grayscale image buffer length (expected {expected} bytes, got {got})")]
    InvalidGrayBuffer { expected: usize, got: usize },

    #[error("no foreground blob after binarization")]
    NoBoard,

    #[error("board edges not found: {missing:?}")]
    DegenerateEdges { missing: Vec<EdgeRole> },

    #[error("{first:?} and {second:?} edges are parallel")]
    ParallelEdges { first: EdgeRole, second: EdgeRole },

    #[error("rectified side {side} px is out of range")]
    DegenerateSize { side: usize },

    #[error("perspective transform estimation failed")]
    HomographyFailed,

    #[error("perspective transform not invertible")]
    NonInvertible,
}

impl GridError {
    /// Whether this is the recoverable "no board in this image" outcome
    /// rather than a geometric failure on a found board.
    pub fn is_no_board(&self) -> bool {
        matches!(self, GridError::NoBoard | GridError::DegenerateEdges { .. })
    }
}
