#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

//! Reassembles a picture from square tiles, each given in an unknown
//! rotation or reflection, then searches the picture for a fixed pattern.

pub mod answer;
pub mod bitmap;
pub mod error;
pub mod orientation;
pub mod pattern;
pub mod solver;
pub mod stitch;
pub mod tile;

pub use answer::Answer;
pub use bitmap::{Bitmap, Border};
pub use error::{BitmapError, ParseError, SolveError};
pub use orientation::{Orientation, Side};
pub use pattern::{roughness, search, Matches, Pattern};
pub use solver::{assemble, Arrangement, Assembler, Growth};
pub use stitch::stitch;
pub use tile::{OrientedTile, Tile, TileId, TileSet};
