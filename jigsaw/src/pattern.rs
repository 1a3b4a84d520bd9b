use crate::{bitmap::Bitmap, orientation::Orientation};
use log::info;
use rayon::prelude::*;

pub const SEA_MONSTER: [&str; 3] = [
    "                  # ",
    "#    ##    ##    ###",
    " #  #  #  #  #  #   ",
];

/// A fixed template of pixels that must be on. Everything else inside its
/// bounding box is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    height: usize,
    width: usize,
    marks: Vec<(usize, usize)>,
}

impl Pattern {
    /// `#` marks a pixel that must be on; any other character is ignored.
    /// The bounding box spans every row and the longest one.
    #[must_use]
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (mut height, mut width) = (0, 0);
        let mut marks = Vec::new();
        for (row, line) in rows.into_iter().enumerate() {
            let line = line.as_ref();
            width = width.max(line.chars().count());
            height = row + 1;
            marks.extend(
                line.chars()
                    .enumerate()
                    .filter(|&(_, ch)| ch == '#')
                    .map(|(col, _)| (row, col)),
            );
        }
        Self {
            height,
            width,
            marks,
        }
    }

    #[must_use]
    pub fn sea_monster() -> Self {
        Self::from_rows(SEA_MONSTER.iter())
    }

    #[must_use]
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of pixels that must be on.
    #[must_use]
    #[inline]
    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    /// Whether the pattern sits in `image` with its upper left corner at
    /// `(row, col)`. The bounding box must fit.
    #[must_use]
    pub fn matches_at(&self, image: &Bitmap, row: usize, col: usize) -> bool {
        row + self.height <= image.height()
            && col + self.width <= image.width()
            && self
                .marks
                .iter()
                .all(|&(r, c)| image.get(row + r, col + c))
    }

    /// Upper left corners of every occurrence, row-major. Occurrences may
    /// overlap.
    #[must_use]
    pub fn find(&self, image: &Bitmap) -> Vec<(usize, usize)> {
        let rows = (image.height() + 1).checked_sub(self.height);
        let cols = (image.width() + 1).checked_sub(self.width);
        match (rows, cols) {
            (Some(rows), Some(cols)) => (0..rows)
                .flat_map(|r| (0..cols).map(move |c| (r, c)))
                .filter(|&(r, c)| self.matches_at(image, r, c))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Every occurrence of a pattern in one orientation of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matches {
    /// How the image was turned before searching.
    pub orientation: Orientation,
    pub offsets: Vec<(usize, usize)>,
    /// The union of the bounding boxes of every occurrence, in the turned
    /// image's frame.
    pub covered: Bitmap,
}

impl Matches {
    fn new(image: &Bitmap, orientation: Orientation, pattern: &Pattern) -> Self {
        let offsets = pattern.find(image);
        let mut covered = Bitmap::new(image.height(), image.width());
        for &(row, col) in &offsets {
            covered.fill(row, col, pattern.height(), pattern.width());
        }
        Self {
            orientation,
            offsets,
            covered,
        }
    }

    /// On pixels of `image` (in the same frame) outside every bounding box.
    #[must_use]
    pub fn uncovered_on(&self, image: &Bitmap) -> usize {
        image.count_on_outside(&self.covered)
    }
}

/// Tries every orientation of `image` and returns the first, in
/// [`Orientation::ALL`] order, where the pattern leaves fewer on pixels
/// uncovered than the image has on pixels.
#[must_use]
pub fn search(image: &Bitmap, pattern: &Pattern) -> Option<Matches> {
    let baseline = image.count_on();
    let found = Orientation::ALL[..].par_iter().find_map_first(|&orientation| {
        let turned = image.transform(orientation);
        let matches = Matches::new(&turned, orientation, pattern);
        (matches.uncovered_on(&turned) < baseline).then_some(matches)
    });
    if let Some(matches) = &found {
        info!(
            "{} occurrences with the image in {:?}",
            matches.offsets.len(),
            matches.orientation
        );
    }
    found
}

/// On pixels that are not part of any occurrence of `pattern`, counting
/// exactly [`Pattern::mark_count`] pixels per occurrence.
#[must_use]
pub fn roughness(image: &Bitmap, pattern: &Pattern) -> usize {
    let total = image.count_on();
    search(image, pattern).map_or(total, |matches| {
        total.saturating_sub(matches.offsets.len() * pattern.mark_count())
    })
}
