use thiserror::Error;

use crate::coord::Coord2;

/// Fatal level-construction failures. Per-frame queries never produce these.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum MazeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("generated maze has no path from {start:?} to {end:?}")]
    Unsolvable { start: Coord2, end: Coord2 },
}

pub type Result<T> = core::result::Result<T, MazeError>;
