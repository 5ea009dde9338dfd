use thiserror::Error;

use crate::common::Coordinate;
use crate::search::SearchStatus;

#[derive(Error, Debug)]
pub enum Error {
    #[error("path requested before a solution was found (status: {0:?})")]
    NotSolved(SearchStatus),

    #[error("{what} {position:?} is outside the {width}x{height} board")]
    OutOfBounds {
        what: &'static str,
        position: Coordinate,
        width: usize,
        height: usize,
    },

    #[error("{what} {position:?} is not passable")]
    Blocked {
        what: &'static str,
        position: Coordinate,
    },

    #[error("board must be at least 3x3, got {width}x{height}")]
    BoardTooSmall { width: usize, height: usize },

    #[error("map file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed map file: {0}")]
    MapFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
