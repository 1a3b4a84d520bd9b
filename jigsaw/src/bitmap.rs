use crate::{
    error::BitmapError,
    orientation::{Orientation, Side},
};
use bitvec::prelude::*;
use std::{fmt, str::FromStr};

/// One edge of a bitmap read in [`Side`] order.
pub type Border = BitVec;

/// An immutable rectangle of on/off pixels, `(0, 0)` at the upper left.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bitmap {
    height: usize,
    width: usize,
    /// row-major
    pixels: BitVec,
}

impl Bitmap {
    /// An all-off bitmap.
    #[must_use]
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            pixels: bitvec![0; height * width],
        }
    }

    /// Reads rows of `#` (on) and `.` (off). Every row must have the same
    /// length.
    pub fn from_rows<I, S>(rows: I) -> Result<Self, BitmapError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pixels = BitVec::new();
        let (mut height, mut width) = (0, None);

        for (row, line) in rows.into_iter().enumerate() {
            let line = line.as_ref();
            let len = line.chars().count();
            let expected = *width.get_or_insert(len);
            if len != expected {
                return Err(BitmapError::RaggedRow { row, len, expected });
            }
            for (col, ch) in line.chars().enumerate() {
                pixels.push(match ch {
                    '#' => true,
                    '.' => false,
                    _ => return Err(BitmapError::BadPixel { row, col, ch }),
                });
            }
            height += 1;
        }

        match width {
            Some(width) if width > 0 => Ok(Self {
                height,
                width,
                pixels,
            }),
            _ => Err(BitmapError::Empty),
        }
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

    #[must_use]
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        debug_assert!(row < self.height && col < self.width);
        self.pixels[row * self.width + col]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: bool) {
        debug_assert!(row < self.height && col < self.width);
        self.pixels.set(row * self.width + col, value);
    }

    /// Number of on pixels.
    #[must_use]
    pub fn count_on(&self) -> usize {
        self.pixels.count_ones()
    }

    /// A copy with every pixel moved by `orientation`.
    #[must_use]
    pub fn transform(&self, orientation: Orientation) -> Self {
        let (height, width) = if orientation.swaps_axes() {
            (self.width, self.height)
        } else {
            (self.height, self.width)
        };
        let mut out = Self::new(height, width);
        for row in 0..self.height {
            for col in 0..self.width {
                let (r, c) = orientation.map(row, col, self.height, self.width);
                out.set(r, c, self.get(row, col));
            }
        }
        out
    }

    /// The `height x width` block whose upper left pixel is `(row, col)`.
    #[must_use]
    pub fn crop(&self, row: usize, col: usize, height: usize, width: usize) -> Self {
        assert!(
            row + height <= self.height && col + width <= self.width,
            "crop {}x{} at ({}, {}) exceeds {}x{} bitmap",
            height,
            width,
            row,
            col,
            self.height,
            self.width
        );
        let mut out = Self::new(height, width);
        for r in 0..height {
            let start = (row + r) * self.width + col;
            out.pixels[r * width..(r + 1) * width]
                .copy_from_bitslice(&self.pixels[start..start + width]);
        }
        out
    }

    /// Number of on pixels where `mask` is off. Both must have the same
    /// dimensions.
    #[must_use]
    pub fn count_on_outside(&self, mask: &Self) -> usize {
        assert_eq!((self.height, self.width), (mask.height, mask.width));
        self.pixels
            .iter()
            .by_vals()
            .zip(mask.pixels.iter().by_vals())
            .filter(|&(on, masked)| on && !masked)
            .count()
    }

    /// Turns on every pixel of the `height x width` block at `(row, col)`.
    pub(crate) fn fill(&mut self, row: usize, col: usize, height: usize, width: usize) {
        assert!(row + height <= self.height && col + width <= self.width);
        for r in row..row + height {
            let start = r * self.width + col;
            self.pixels[start..start + width].fill(true);
        }
    }

    /// Overwrites the block at `(row, col)` with `src`.
    pub(crate) fn paste(&mut self, row: usize, col: usize, src: &Self) {
        assert!(
            row + src.height <= self.height && col + src.width <= self.width,
            "paste does not fit"
        );
        for r in 0..src.height {
            let start = (row + r) * self.width + col;
            self.pixels[start..start + src.width].copy_from_bitslice(
                &src.pixels[r * src.width..(r + 1) * src.width],
            );
        }
    }

    /// The pixels along `side`, top/bottom left to right and left/right top
    /// to bottom.
    #[must_use]
    pub fn edge(&self, side: Side) -> Border {
        match side {
            Side::Top => (0..self.width).map(|c| self.get(0, c)).collect(),
            Side::Bottom => (0..self.width)
                .map(|c| self.get(self.height - 1, c))
                .collect(),
            Side::Left => (0..self.height).map(|r| self.get(r, 0)).collect(),
            Side::Right => (0..self.height)
                .map(|r| self.get(r, self.width - 1))
                .collect(),
        }
    }
}

impl FromStr for Bitmap {
    type Err = BitmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rows(s.lines().map(str::trim_end).filter(|l| !l.is_empty()))
    }
}

impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.pixels.chunks(self.width.max(1)) {
            for pixel in row.iter().by_vals() {
                f.write_str(if pixel { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{quickcheck, TestResult};

    const SIZE: usize = 8;

    /// A diagonal with a three pixel hook in the upper left corner, so that
    /// every symmetry produces a different bitmap.
    fn hooked_diagonal() -> Bitmap {
        let mut bitmap = Bitmap::new(SIZE, SIZE);
        for i in 0..SIZE {
            bitmap.set(i, i, true);
        }
        bitmap.set(0, 1, true);
        bitmap.set(1, 0, true);
        bitmap.set(2, 0, true);
        bitmap
    }

    fn from_points(points: &[(usize, usize)], anti: bool) -> Bitmap {
        let mut bitmap = Bitmap::new(SIZE, SIZE);
        for i in 0..SIZE {
            if anti {
                bitmap.set(SIZE - 1 - i, i, true);
            } else {
                bitmap.set(i, i, true);
            }
        }
        for &(r, c) in points {
            bitmap.set(r, c, true);
        }
        bitmap
    }

    fn arbitrary_bitmap(h: u8, w: u8, bits: &[bool]) -> Bitmap {
        let (h, w) = (usize::from(h % 9) + 1, usize::from(w % 9) + 1);
        let mut bitmap = Bitmap::new(h, w);
        if !bits.is_empty() {
            for i in 0..h * w {
                bitmap.set(i / w, i % w, bits[i % bits.len()]);
            }
        }
        bitmap
    }

    #[test]
    fn every_orientation_of_an_asymmetric_image() {
        let n = SIZE - 1;
        let expected = [
            (Orientation::Identity, hooked_diagonal()),
            (
                Orientation::Rotate90,
                from_points(&[(n - 1, 0), (n, 1), (n, 2)], true),
            ),
            (
                Orientation::Rotate180,
                from_points(&[(n, n - 1), (n - 1, n), (n - 2, n)], false),
            ),
            (
                Orientation::Rotate270,
                from_points(&[(1, n), (0, n - 1), (0, n - 2)], true),
            ),
            (
                Orientation::FlipHorizontal,
                from_points(&[(0, n - 1), (1, n), (2, n)], true),
            ),
            (
                Orientation::FlipVertical,
                from_points(&[(n, 1), (n - 1, 0), (n - 2, 0)], true),
            ),
            (
                Orientation::Rotate90Flip,
                from_points(&[(1, 0), (0, 1), (0, 2)], false),
            ),
            (
                Orientation::Rotate270Flip,
                from_points(&[(n - 1, n), (n, n - 1), (n, n - 2)], false),
            ),
        ];

        let original = hooked_diagonal();
        for (orientation, bitmap) in &expected {
            assert_eq!(
                &original.transform(*orientation),
                bitmap,
                "{:?}",
                orientation
            );
        }
    }

    #[test]
    fn transform_swaps_dimensions() {
        let bitmap: Bitmap = "#..\n...".parse().unwrap();
        let turned = bitmap.transform(Orientation::Rotate90);
        assert_eq!((turned.height(), turned.width()), (3, 2));
        assert_eq!(turned.to_string(), "..\n..\n#.\n");
        assert_eq!(bitmap.transform(Orientation::Rotate180).to_string(), "...\n..#\n");
    }

    #[test]
    fn composition_matches_successive_transforms() {
        let bitmap: Bitmap = "##.#.\n#....\n..###".parse().unwrap();
        for a in Orientation::ALL.iter().copied() {
            for b in Orientation::ALL.iter().copied() {
                assert_eq!(
                    bitmap.transform(a).transform(b),
                    bitmap.transform(a.then(b)),
                    "{:?} then {:?}",
                    a,
                    b
                );
            }
        }
    }

    quickcheck! {
        fn identity_leaves_bitmap_unchanged(h: u8, w: u8, bits: Vec<bool>) -> bool {
            let bitmap = arbitrary_bitmap(h, w, &bits);
            bitmap.transform(Orientation::Identity) == bitmap
        }

        fn inverse_undoes_transform(h: u8, w: u8, bits: Vec<bool>, o: u8) -> TestResult {
            let bitmap = arbitrary_bitmap(h, w, &bits);
            let o = match Orientation::from_index(usize::from(o % 8)) {
                Some(o) => o,
                None => return TestResult::discard(),
            };
            TestResult::from_bool(bitmap.transform(o).transform(o.inverse()) == bitmap)
        }

        fn transform_preserves_on_count(h: u8, w: u8, bits: Vec<bool>, o: u8) -> bool {
            let bitmap = arbitrary_bitmap(h, w, &bits);
            Orientation::from_index(usize::from(o % 8))
                .map_or(false, |o| bitmap.transform(o).count_on() == bitmap.count_on())
        }
    }

    #[test]
    fn parse_and_display() {
        let text = "#.#\n.##\n";
        let bitmap: Bitmap = text.parse().unwrap();
        assert_eq!((bitmap.height(), bitmap.width()), (2, 3));
        assert!(bitmap.get(0, 0) && !bitmap.get(0, 1) && bitmap.get(1, 2));
        assert_eq!(bitmap.count_on(), 4);
        assert_eq!(bitmap.to_string(), text);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "##\n#".parse::<Bitmap>(),
            Err(BitmapError::RaggedRow {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        assert_eq!(
            "#.\n#x".parse::<Bitmap>(),
            Err(BitmapError::BadPixel {
                row: 1,
                col: 1,
                ch: 'x'
            })
        );
        assert_eq!("".parse::<Bitmap>(), Err(BitmapError::Empty));
    }

    #[test]
    fn edges_follow_reading_order() {
        let bitmap: Bitmap = "#..\n..#\n.##".parse().unwrap();
        let edge = |side| {
            bitmap
                .edge(side)
                .iter()
                .by_vals()
                .map(|b| if b { '#' } else { '.' })
                .collect::<String>()
        };
        assert_eq!(edge(Side::Top), "#..");
        assert_eq!(edge(Side::Bottom), ".##");
        assert_eq!(edge(Side::Left), "#..");
        assert_eq!(edge(Side::Right), ".##");
    }

    #[test]
    fn crop_and_paste() {
        let bitmap: Bitmap = "#..#\n.##.\n.#..\n#..#".parse().unwrap();
        let inner = bitmap.crop(1, 1, 2, 2);
        assert_eq!(inner.to_string(), "##\n#.\n");

        let mut canvas = Bitmap::new(2, 4);
        canvas.paste(0, 2, &inner);
        assert_eq!(canvas.to_string(), "..##\n..#.\n");
    }

    #[test]
    fn fill_and_count_outside() {
        let bitmap: Bitmap = "##.#\n#..#\n####".parse().unwrap();
        let mut mask = Bitmap::new(3, 4);
        mask.fill(0, 0, 2, 2);
        assert_eq!(mask.to_string(), "##..\n##..\n....\n");
        assert_eq!(bitmap.count_on_outside(&mask), bitmap.count_on() - 3);
        assert_eq!(bitmap.count_on_outside(&Bitmap::new(3, 4)), 9);
    }
}
