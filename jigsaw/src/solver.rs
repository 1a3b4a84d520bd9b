//! Backtracking assembly of oriented tiles into a rectangle whose shared
//! borders all match.
//!
//! The search starts from a single tile and repeatedly fills the hole with
//! the fewest compatible candidates. A grid without holes that still has
//! tiles left over grows by one row or column. Every change to the grid and
//! the pool of available tiles is made by a [`Frame`] on an explicit stack,
//! and the same frame reverts it before trying its next choice, so sibling
//! branches never see each other's placements.

use crate::{
    error::SolveError,
    orientation::{Orientation, Side},
    tile::{OrientedTile, TileId, TileSet},
};
use common::{Grid, HashMap, Pos};
use itertools::Itertools;
use log::{debug, trace};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::{fmt, vec};

/// Which side of the grid gets a new row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Growth {
    Top,
    Bottom,
    Left,
    Right,
}

impl Growth {
    /// In the order they are tried.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];
}

/// A solved puzzle: every cell holds a tile, and every pair of neighbours
/// agrees on the border they share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrangement {
    rows: usize,
    cols: usize,
    cells: Vec<OrientedTile>,
}

impl Arrangement {
    #[must_use]
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// # Panics
    ///
    /// If `(row, col)` is outside the arrangement.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> OrientedTile {
        assert!(row < self.rows && col < self.cols);
        self.cells[row * self.cols + col]
    }

    /// Cells with their `(row, col)`, row-major.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), OrientedTile)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| ((i / cols, i % cols), cell))
    }

    /// Upper left, upper right, lower left, lower right.
    #[must_use]
    pub fn corners(&self) -> [OrientedTile; 4] {
        let (r, c) = (self.rows - 1, self.cols - 1);
        [self.get(0, 0), self.get(0, c), self.get(r, 0), self.get(r, c)]
    }

    /// Product of the four corner tile ids.
    #[must_use]
    pub fn corner_product(&self) -> u64 {
        self.corners().iter().map(|t| u64::from(t.tile)).product()
    }

    /// Whether every horizontally and vertically adjacent pair shares
    /// identical borders.
    #[must_use]
    pub fn is_consistent(&self, tiles: &TileSet) -> bool {
        self.iter().all(|((r, c), cell)| {
            let right = c + 1 < self.cols
                && cell.border(Side::Right, tiles)
                    != self.get(r, c + 1).border(Side::Left, tiles);
            let below = r + 1 < self.rows
                && cell.border(Side::Bottom, tiles)
                    != self.get(r + 1, c).border(Side::Top, tiles);
            !right && !below
        })
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}

/// Tiles not yet on the grid, with the orientations still to try.
type Available = HashMap<TileId, [OrientedTile; 8]>;

enum Step {
    Solved,
    Fill { pos: Pos, candidates: Vec<OrientedTile> },
    Grow,
}

/// One decision point. Holds whatever it last applied so it can be undone.
enum Frame {
    Fill {
        pos: Pos,
        candidates: vec::IntoIter<OrientedTile>,
        placed: Option<[OrientedTile; 8]>,
    },
    Grow {
        next: usize,
        applied: Option<Growth>,
    },
}

/// Depth-first search over placements.
pub struct Assembler<'t> {
    tiles: &'t TileSet,
    grid: Grid<OrientedTile>,
    available: Available,
    rng: Option<StdRng>,
    backtracks: usize,
}

impl<'t> Assembler<'t> {
    /// Seeds the grid with the lowest tile id in the identity orientation.
    /// Any solution can be turned so that this holds.
    pub fn new(tiles: &'t TileSet) -> Result<Self, SolveError> {
        let first = tiles.ids().next().ok_or(SolveError::NoTiles)?;
        let mut grid = Grid::new(1, 1);
        grid.set(Pos::new(0, 0), OrientedTile::new(first, Orientation::Identity));

        let available = tiles
            .ids()
            .filter(|&id| id != first)
            .map(|id| (id, OrientedTile::variants(id)))
            .collect();

        Ok(Self {
            tiles,
            grid,
            available,
            rng: None,
            backtracks: 0,
        })
    }

    /// Shuffle every candidate list with a generator seeded from `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    pub fn solve(mut self) -> Result<Arrangement, SolveError> {
        let mut stack: Vec<Frame> = Vec::with_capacity(self.tiles.len());

        loop {
            let frame = match self.next_step() {
                Step::Solved => return Ok(self.finish()),
                Step::Fill { pos, candidates } => {
                    trace!("{} candidates at {}", candidates.len(), pos);
                    Frame::Fill {
                        pos,
                        candidates: candidates.into_iter(),
                        placed: None,
                    }
                },
                Step::Grow => Frame::Grow {
                    next: 0,
                    applied: None,
                },
            };
            stack.push(frame);

            // advance the deepest frame that still has a choice left
            loop {
                let frame = match stack.last_mut() {
                    Some(frame) => frame,
                    None => {
                        return Err(SolveError::Exhausted {
                            tiles: self.tiles.len(),
                            backtracks: self.backtracks,
                        })
                    },
                };
                if self.advance(frame) {
                    break;
                }
                stack.pop();
                self.backtracks += 1;
            }
        }
    }

    fn next_step(&mut self) -> Step {
        match self.most_constrained() {
            Some((pos, mut candidates)) => {
                if let Some(rng) = self.rng.as_mut() {
                    candidates.shuffle(rng);
                }
                Step::Fill { pos, candidates }
            },
            None if self.grid.len() == self.tiles.len() => Step::Solved,
            None => Step::Grow,
        }
    }

    /// Reverts the frame's last change, then applies its next choice.
    /// Returns `false` once the frame has run out of choices.
    fn advance(&mut self, frame: &mut Frame) -> bool {
        match frame {
            Frame::Fill {
                pos,
                candidates,
                placed,
            } => {
                if let Some(variants) = placed.take() {
                    let removed = self.grid.take(*pos);
                    debug_assert!(removed.is_some());
                    self.available.insert(variants[0].tile, variants);
                }
                for candidate in candidates {
                    if let Some(variants) = self.available.remove(&candidate.tile) {
                        self.grid.set(*pos, candidate);
                        *placed = Some(variants);
                        return true;
                    }
                }
                false
            },
            Frame::Grow { next, applied } => {
                if let Some(growth) = applied.take() {
                    self.shrink(growth);
                }
                while let Some(&growth) = Growth::ALL.get(*next) {
                    *next += 1;
                    if self.can_grow(growth) {
                        self.grow(growth);
                        *applied = Some(growth);
                        return true;
                    }
                }
                false
            },
        }
    }

    fn can_grow(&self, growth: Growth) -> bool {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        let cells = match growth {
            Growth::Top | Growth::Bottom => (rows + 1) * cols,
            Growth::Left | Growth::Right => rows * (cols + 1),
        };
        cells <= self.tiles.len()
    }

    fn grow(&mut self, growth: Growth) {
        debug!(
            "growing {}x{} grid at {:?}",
            self.grid.rows(),
            self.grid.cols(),
            growth
        );
        match growth {
            Growth::Top => self.grid.insert_row(0),
            Growth::Bottom => self.grid.insert_row(self.grid.rows()),
            Growth::Left => self.grid.insert_col(0),
            Growth::Right => self.grid.insert_col(self.grid.cols()),
        }
    }

    fn shrink(&mut self, growth: Growth) {
        let removed = match growth {
            Growth::Top => self.grid.remove_row(0),
            Growth::Bottom => self.grid.remove_row(self.grid.rows() - 1),
            Growth::Left => self.grid.remove_col(0),
            Growth::Right => self.grid.remove_col(self.grid.cols() - 1),
        };
        debug_assert!(removed.iter().all(Option::is_none));
    }

    /// The hole with the fewest candidates, first in row-major order on
    /// ties. `None` if the grid has no holes.
    fn most_constrained(&self) -> Option<(Pos, Vec<OrientedTile>)> {
        let mut best: Option<(Pos, Vec<OrientedTile>)> = None;
        for pos in self.grid.holes() {
            let candidates = self.candidates(pos);
            let fewer = best
                .as_ref()
                .map_or(true, |(_, b)| candidates.len() < b.len());
            if fewer {
                let dead_end = candidates.is_empty();
                best = Some((pos, candidates));
                if dead_end {
                    break;
                }
            }
        }
        best
    }

    fn neighbor(&self, pos: Pos, side: Side) -> Option<&OrientedTile> {
        let next = match side {
            Side::Top => pos.up(),
            Side::Left => pos.left(),
            Side::Bottom => pos.down(),
            Side::Right => pos.right(),
        };
        next.and_then(|p| self.grid.get(p))
    }

    /// Available oriented tiles whose borders agree with every filled
    /// neighbour of `pos`.
    fn candidates(&self, pos: Pos) -> Vec<OrientedTile> {
        let tiles = self.tiles;
        let constraints = Side::ALL
            .iter()
            .filter_map(|&side| {
                self.neighbor(pos, side)
                    .map(|n| (side, n.border(side.opposite(), tiles)))
            })
            .collect_vec();

        self.available
            .values()
            .flat_map(|variants| variants.iter())
            .filter(|candidate| {
                constraints
                    .iter()
                    .all(|&(side, border)| candidate.border(side, tiles) == border)
            })
            .copied()
            .collect()
    }

    fn finish(self) -> Arrangement {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        debug!(
            "solved {}x{} arrangement after {} backtracks",
            rows, cols, self.backtracks
        );
        let cells = match self.grid.into_full() {
            Ok(cells) => cells,
            Err(grid) => unreachable!("solved grid has holes:\n{}", grid),
        };
        let arrangement = Arrangement { rows, cols, cells };
        debug_assert!(arrangement.is_consistent(self.tiles));
        arrangement
    }
}

/// Solves with the default candidate order.
pub fn assemble(tiles: &TileSet) -> Result<Arrangement, SolveError> {
    Assembler::new(tiles)?.solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{SAMPLE, SAMPLE_CORNER_PRODUCT};
    use crate::tile::Tile;
    use std::collections::BTreeSet;

    fn sample() -> TileSet {
        SAMPLE.parse().unwrap()
    }

    fn corner_ids(arrangement: &Arrangement) -> BTreeSet<TileId> {
        arrangement.corners().iter().map(|t| t.tile).collect()
    }

    #[test]
    fn sample_corners() {
        let tiles = sample();
        let arrangement = assemble(&tiles).unwrap();
        assert_eq!((arrangement.rows(), arrangement.cols()), (3, 3));
        assert_eq!(arrangement.corner_product(), SAMPLE_CORNER_PRODUCT);
        assert_eq!(
            corner_ids(&arrangement),
            vec![1171, 1951, 2971, 3079].into_iter().collect()
        );
    }

    #[test]
    fn every_tile_placed_once_with_matching_borders() {
        let tiles = sample();
        let arrangement = assemble(&tiles).unwrap();
        let placed: BTreeSet<_> = arrangement.iter().map(|(_, t)| t.tile).collect();
        assert_eq!(placed, tiles.ids().collect());
        assert!(arrangement.is_consistent(&tiles));

        for ((r, c), cell) in arrangement.iter() {
            if c + 1 < arrangement.cols() {
                assert_eq!(
                    cell.border(Side::Right, &tiles),
                    arrangement.get(r, c + 1).border(Side::Left, &tiles)
                );
            }
            if r + 1 < arrangement.rows() {
                assert_eq!(
                    cell.border(Side::Bottom, &tiles),
                    arrangement.get(r + 1, c).border(Side::Top, &tiles)
                );
            }
        }
    }

    #[test]
    fn seed_tile_keeps_identity() {
        let tiles = sample();
        let arrangement = assemble(&tiles).unwrap();
        let seed = arrangement
            .iter()
            .find(|(_, t)| t.tile == 1171)
            .map(|(_, t)| t.orientation);
        assert_eq!(seed, Some(Orientation::Identity));
    }

    #[test]
    fn shuffled_candidates_agree_on_corners() {
        let tiles = sample();
        for seed in 0..16 {
            let arrangement = Assembler::new(&tiles)
                .unwrap()
                .with_seed(seed)
                .solve()
                .unwrap();
            assert_eq!(arrangement.corner_product(), SAMPLE_CORNER_PRODUCT);
            assert!(arrangement.is_consistent(&tiles));
        }
    }

    #[test]
    fn rectangular_arrangement() {
        let tiles = sample().subset(&[1951, 2311, 2729, 1427, 2971, 1489]);
        let arrangement = assemble(&tiles).unwrap();
        let dims = (arrangement.rows(), arrangement.cols());
        assert!(dims == (3, 2) || dims == (2, 3), "got {:?}", dims);
        assert_eq!(arrangement.corner_product(), 1951 * 2311 * 2971 * 1489);
        assert!(arrangement.is_consistent(&tiles));
    }

    #[test]
    fn single_tile_is_its_own_corners() {
        let tiles = sample().subset(&[2311]);
        let arrangement = assemble(&tiles).unwrap();
        assert_eq!((arrangement.rows(), arrangement.cols()), (1, 1));
        assert_eq!(arrangement.corner_product(), 2311_u64.pow(4));
    }

    #[test]
    fn unsolvable_tiles_exhaust() {
        let blank = |id| Tile::new(id, "..\n..".parse().unwrap());
        let full = |id| Tile::new(id, "##\n##".parse().unwrap());
        let tiles = TileSet::new(vec![blank(1), full(2)]).unwrap();
        let err = assemble(&tiles).unwrap_err();
        assert!(matches!(err, SolveError::Exhausted { tiles: 2, .. }));
    }

    #[test]
    fn growth_respects_tile_count() {
        let blank = |id| Tile::new(id, "..\n..".parse().unwrap());
        let tiles = TileSet::new((1..=3).map(blank)).unwrap();
        let arrangement = assemble(&tiles).unwrap();
        let dims = (arrangement.rows(), arrangement.cols());
        assert!(dims == (3, 1) || dims == (1, 3), "got {:?}", dims);
    }

    #[test]
    fn display_lists_ids() {
        let tiles = sample().subset(&[2311]);
        let arrangement = assemble(&tiles).unwrap();
        assert_eq!(arrangement.to_string(), "2311\n");
    }
}
