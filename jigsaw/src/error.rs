use crate::tile::TileId;
use std::io;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BitmapError {
    #[error("row {row} has {len} pixels, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    BadPixel { row: usize, col: usize, ch: char },

    #[error("bitmap has no pixels")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: expected `Tile <id>:`, found {found:?}")]
    BadHeader { line: usize, found: String },

    #[error("tile {id}: {source}")]
    Bitmap {
        id: TileId,
        #[source]
        source: BitmapError,
    },

    #[error("tile {id} is {height}x{width}, tiles must be square")]
    NotSquare {
        id: TileId,
        height: usize,
        width: usize,
    },

    #[error("tile {id} has side {found}, expected {expected}")]
    SideMismatch {
        id: TileId,
        found: usize,
        expected: usize,
    },

    #[error("tile {id} has side {side}, tiles need an interior")]
    TooSmall { id: TileId, side: usize },

    #[error("tile {0} appears more than once")]
    DuplicateId(TileId),

    #[error("input contains no tiles")]
    Empty,

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error(
        "no arrangement of the {tiles} tiles matches every shared border \
         ({backtracks} backtracks)"
    )]
    Exhausted { tiles: usize, backtracks: usize },

    #[error("there are no tiles to arrange")]
    NoTiles,
}
