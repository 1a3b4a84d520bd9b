#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod output;

use anyhow::{bail, Context, Result};
use std::{
    fmt::Display,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

#[must_use]
pub fn input_path(day: usize) -> PathBuf {
    PathBuf::from(format!("input/day/{:02}.txt", day))
}

pub trait Reader: BufRead {}

impl<T> Reader for T where T: BufRead {}

pub type FRead = BufReader<File>;

pub fn file_reader<P: AsRef<Path>>(path: P) -> Result<FRead> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("unable to open {}", path.display()))?;
    let meta = file.metadata()?;

    if meta.is_dir() {
        bail!("{} is a directory", path.display());
    }

    Ok(BufReader::new(file))
}

/// A blank-line separated group of lines, with the 1-based line number of
/// its first line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub line: usize,
    pub lines: Vec<String>,
}

/// Splits the input into blank-line separated groups. Trailing whitespace
/// (including `\r`) is stripped from every line; runs of blank lines count
/// as one separator.
pub fn read_blocks<R: Reader>(r: R) -> io::Result<Vec<Block>> {
    let mut blocks = Vec::new();
    let mut builder: Option<Block> = None;

    for (i, line) in r.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();

        if line.is_empty() {
            blocks.extend(builder.take());
        } else {
            builder
                .get_or_insert_with(|| Block {
                    line: i + 1,
                    lines: Vec::new(),
                })
                .lines
                .push(line.to_owned());
        }
    }

    blocks.extend(builder);
    Ok(blocks)
}

pub trait Solver {
    type Input;
    type Output1: Display;
    type Output2: Display;

    fn parse_input<R: Reader>(&self, r: R) -> Result<Self::Input>;
    fn solve_first(&self, input: &Self::Input) -> Result<Self::Output1>;
    fn solve_second(&self, input: &Self::Input) -> Result<Self::Output2>;

    fn load_input<P: AsRef<Path>>(&self, p: P) -> Result<Self::Input> {
        let f = file_reader(p)?;
        self.parse_input(f)
    }

    /// Loads `path` (or the day's default input), then prints each answer on
    /// its own line to stdout. The banner and timings go to stderr.
    fn solve(&self, day: usize, path: Option<&Path>) -> Result<()> {
        let input_file = path.map_or_else(|| input_path(day), Path::to_path_buf);
        let input = self
            .load_input(&input_file)
            .with_context(|| "unable to load input file")?;

        output::print_header();
        output::print_day(day, &input_file);

        let now = Instant::now();
        let first = self.solve_first(&input).context("part 1")?;
        let elapsed = now.elapsed();
        output::print_part(1, &first);
        self.print_time(elapsed);
        println!("{}", first);

        let now = Instant::now();
        let second = self.solve_second(&input).context("part 2")?;
        let elapsed = now.elapsed();
        output::print_part(2, &second);
        self.print_time(elapsed);
        println!("{}", second);

        Ok(())
    }

    fn print_time(&self, d: Duration) {
        output::print_time(d);
    }
}
