use anyhow::Result;
use aoc_runner::Solver;
use clap::Parser;
use jigsaw::Answer;
use std::path::PathBuf;

const DAY: usize = 20;

fn main() -> Result<()> {
    env_logger::init();
    let app = App::parse();
    Answer { seed: app.seed }.solve(DAY, app.input.as_deref())
}

/// Reassembles the tiled picture and measures the water's roughness
#[derive(Debug, Parser)]
#[clap(version)]
struct App {
    /// Optional path to input file. If not supplied, reads input/day/20.txt
    #[clap(short = 'i', long)]
    input: Option<PathBuf>,

    /// Shuffle candidate tiles with this seed
    #[clap(short = 's', long)]
    seed: Option<u64>,
}
