use crate::{
    pattern::{self, Pattern},
    solver::{Arrangement, Assembler},
    stitch::stitch,
    tile::TileSet,
};
use anyhow::{Context, Result};
use aoc_runner::{Reader, Solver};
use log::debug;

/// Both parts of the puzzle. With a seed, the assembler shuffles its
/// candidates instead of trying them in id order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Answer {
    pub seed: Option<u64>,
}

impl Answer {
    fn arrange(&self, tiles: &TileSet) -> Result<Arrangement> {
        let mut assembler = Assembler::new(tiles)?;
        if let Some(seed) = self.seed {
            assembler = assembler.with_seed(seed);
        }
        let arrangement = assembler.solve()?;
        debug!(
            "assembled {} tiles into {}x{}",
            tiles.len(),
            arrangement.rows(),
            arrangement.cols()
        );
        Ok(arrangement)
    }
}

impl Solver for Answer {
    type Input = TileSet;
    type Output1 = u64;
    type Output2 = usize;

    fn parse_input<R: Reader>(&self, r: R) -> Result<Self::Input> {
        TileSet::parse(r).context("unable to parse tiles")
    }

    /// Correct: `20899048083289` on the small example
    fn solve_first(&self, input: &Self::Input) -> Result<Self::Output1> {
        Ok(self.arrange(input)?.corner_product())
    }

    /// Correct: `273` on the small example
    fn solve_second(&self, input: &Self::Input) -> Result<Self::Output2> {
        let image = stitch(&self.arrange(input)?, input);
        Ok(pattern::roughness(&image, &Pattern::sea_monster()))
    }
}
