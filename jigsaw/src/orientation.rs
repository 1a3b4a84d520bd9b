/// One edge of a square tile, as seen in some frame.
///
/// Top and bottom borders read left to right; left and right borders read
/// top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Top,
    Left,
    Bottom,
    Right,
}

impl Side {
    pub const ALL: [Self; 4] = [Self::Top, Self::Left, Self::Bottom, Self::Right];

    #[must_use]
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Left => Self::Right,
            Self::Bottom => Self::Top,
            Self::Right => Self::Left,
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// A raw border reference: which edge of the untransformed tile, and whether
/// it is read backwards.
pub type BorderSource = (Side, bool);

/// The eight symmetries of a square.
///
/// Each variant names the coordinate remapping [`Orientation::map`] applies
/// to a bitmap. Rotations turn counter-clockwise: under `Rotate90` the old
/// right column becomes the new top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
    FlipHorizontal,
    FlipVertical,
    /// Reflection over the main diagonal.
    Rotate90Flip,
    /// Reflection over the anti-diagonal.
    Rotate270Flip,
}

use Orientation::*;
use Side::{Bottom, Left, Right, Top};

/// `BORDERS[orientation][side]` is the raw border that shows up on `side`
/// once the tile is put in `orientation`.
const BORDERS: [[BorderSource; 4]; 8] = [
    // top, left, bottom, right
    [(Top, false), (Left, false), (Bottom, false), (Right, false)],
    [(Right, false), (Top, true), (Left, false), (Bottom, true)],
    [(Bottom, true), (Right, true), (Top, true), (Left, true)],
    [(Left, true), (Bottom, false), (Right, true), (Top, false)],
    [(Top, true), (Right, false), (Bottom, true), (Left, false)],
    [(Bottom, false), (Left, true), (Top, false), (Right, true)],
    [(Left, false), (Top, false), (Right, false), (Bottom, false)],
    [(Right, true), (Bottom, true), (Left, true), (Top, true)],
];

impl Orientation {
    pub const ALL: [Self; 8] = [
        Identity,
        Rotate90,
        Rotate180,
        Rotate270,
        FlipHorizontal,
        FlipVertical,
        Rotate90Flip,
        Rotate270Flip,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Where the pixel at `(row, col)` of a `height x width` bitmap lands.
    #[must_use]
    #[inline]
    pub const fn map(
        self,
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    ) -> (usize, usize) {
        match self {
            Identity => (row, col),
            Rotate90 => (width - 1 - col, row),
            Rotate180 => (height - 1 - row, width - 1 - col),
            Rotate270 => (col, height - 1 - row),
            FlipHorizontal => (row, width - 1 - col),
            FlipVertical => (height - 1 - row, col),
            Rotate90Flip => (col, row),
            Rotate270Flip => (width - 1 - col, height - 1 - row),
        }
    }

    /// Whether the result is `width x height` rather than `height x width`.
    #[must_use]
    #[inline]
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Rotate90 | Rotate270 | Rotate90Flip | Rotate270Flip)
    }

    /// The raw border that appears on `side` in this orientation.
    #[must_use]
    #[inline]
    pub const fn border_source(self, side: Side) -> BorderSource {
        BORDERS[self.index()][side.index()]
    }

    /// `(quarter turns, mirrored)`: mirror horizontally first if
    /// `mirrored`, then rotate.
    const fn decompose(self) -> (u8, bool) {
        match self {
            Identity => (0, false),
            Rotate90 => (1, false),
            Rotate180 => (2, false),
            Rotate270 => (3, false),
            FlipHorizontal => (0, true),
            Rotate90Flip => (1, true),
            FlipVertical => (2, true),
            Rotate270Flip => (3, true),
        }
    }

    const fn compose(turns: u8, mirrored: bool) -> Self {
        match (turns % 4, mirrored) {
            (0, false) => Identity,
            (1, false) => Rotate90,
            (2, false) => Rotate180,
            (3, false) => Rotate270,
            (0, true) => FlipHorizontal,
            (1, true) => Rotate90Flip,
            (2, true) => FlipVertical,
            _ => Rotate270Flip,
        }
    }

    /// `self` followed by `next`: transforming by the result is the same as
    /// transforming by `self` and then by `next`.
    #[must_use]
    pub const fn then(self, next: Self) -> Self {
        let (a, a_mirrored) = self.decompose();
        let (b, b_mirrored) = next.decompose();
        // a mirror reverses the direction of the turns that came before it
        let turns = if b_mirrored { b + 4 - a } else { b + a };
        Self::compose(turns, a_mirrored != b_mirrored)
    }

    #[must_use]
    pub const fn inverse(self) -> Self {
        let (turns, mirrored) = self.decompose();
        if mirrored {
            self
        } else {
            Self::compose(4 - turns, false)
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Identity
    }
}
