#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod grid;

pub use grid::{Grid, Pos};

use fnv::FnvBuildHasher;

pub type HashMap<K, V> = std::collections::HashMap<K, V, FnvBuildHasher>;
