use colored::Colorize;
use std::{fmt::Display, path::Path, time::Duration};

pub const NUMBER_DASHES: usize = 80;

pub fn print_header() {
    eprintln!("{}", "-".repeat(NUMBER_DASHES).green().bold());
    eprintln!(
        "{} {} {}",
        "-".repeat(NUMBER_DASHES / 2 - 10).red().bold(),
        "Tile Image Assembly".bold(),
        "-".repeat(NUMBER_DASHES / 2 - 11).red().bold()
    );
    eprintln!("{}", "-".repeat(NUMBER_DASHES).green().bold());
}

pub fn print_day(day: usize, input: &Path) {
    eprintln!(
        "- {} {}",
        format!("Day {:02}", day).bold(),
        input.display().to_string().dimmed()
    );
}

pub fn print_part(part: usize, output: &dyn Display) {
    let (part_string, value) = if part == 1 {
        ("Part 1".red().bold(), output.to_string().red().bold())
    } else {
        ("Part 2".green().bold(), output.to_string().green().bold())
    };
    eprintln!("\n{}: {}", part_string, value);
}

pub fn print_time(d: Duration) {
    eprintln!(
        "- {}.{}{}{:03} {}",
        format!("{:03}", d.as_secs()).bright_red(),
        format!("{:03}", d.subsec_millis()).red(),
        format!("{:03}", d.subsec_micros() % 1_000).yellow(),
        format!("{}", d.subsec_nanos() % 1_000).green(),
        "seconds".bold(),
    );
}
