use crate::{
    bitmap::{Bitmap, Border},
    error::ParseError,
    orientation::{Orientation, Side},
};
use aoc_runner::{read_blocks, Block, Reader};
use scan_fmt::scan_fmt;
use std::{collections::BTreeMap, fmt, ops::Index};

pub type TileId = u32;

/// An identified square bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    image: Bitmap,
    /// each raw border twice: `2 * side` forwards, `2 * side + 1` reversed
    edges: [Border; 8],
}

impl Tile {
    /// # Panics
    ///
    /// If `image` is not square.
    #[must_use]
    pub fn new(id: TileId, image: Bitmap) -> Self {
        assert_eq!(image.height(), image.width(), "tile {} is not square", id);
        let mut edges: [Border; 8] = Default::default();
        for side in Side::ALL.iter().copied() {
            let edge = image.edge(side);
            let mut reversed = edge.clone();
            reversed.reverse();
            edges[2 * side.index()] = edge;
            edges[2 * side.index() + 1] = reversed;
        }
        Self { id, image, edges }
    }

    #[must_use]
    #[inline]
    pub fn id(&self) -> TileId {
        self.id
    }

    #[must_use]
    #[inline]
    pub fn image(&self) -> &Bitmap {
        &self.image
    }

    /// Side length.
    #[must_use]
    #[inline]
    pub fn side(&self) -> usize {
        self.image.height()
    }

    /// The border along `side` of the untransformed tile.
    #[must_use]
    #[inline]
    pub fn raw_border(&self, side: Side) -> &Border {
        self.border(side, false)
    }

    #[inline]
    fn border(&self, side: Side, reversed: bool) -> &Border {
        &self.edges[2 * side.index() + usize::from(reversed)]
    }

    /// The border along `side` after putting the tile in `orientation`,
    /// looked up without transforming the image.
    #[must_use]
    #[inline]
    pub fn oriented_border(&self, orientation: Orientation, side: Side) -> &Border {
        let (source, reversed) = orientation.border_source(side);
        self.border(source, reversed)
    }

    fn from_block(block: &Block) -> Result<Self, ParseError> {
        let header = block.lines.first().map_or("", String::as_str);
        let id = scan_fmt!(header, "Tile {d}:", TileId)
            .ok()
            .filter(|_| header.ends_with(':'))
            .ok_or_else(|| ParseError::BadHeader {
                line: block.line,
                found: header.to_owned(),
            })?;
        let image = Bitmap::from_rows(&block.lines[1..])
            .map_err(|source| ParseError::Bitmap { id, source })?;

        let (height, width) = (image.height(), image.width());
        if height != width {
            return Err(ParseError::NotSquare { id, height, width });
        }
        if height < 2 {
            return Err(ParseError::TooSmall { id, side: height });
        }
        Ok(Self::new(id, image))
    }
}

/// A tile id put in one of the eight orientations.
///
/// Borders are resolved through the [`TileSet`] that produced the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrientedTile {
    pub tile: TileId,
    pub orientation: Orientation,
}

impl OrientedTile {
    #[must_use]
    pub const fn new(tile: TileId, orientation: Orientation) -> Self {
        Self { tile, orientation }
    }

    /// All eight orientations of `tile`.
    pub fn variants(tile: TileId) -> [Self; 8] {
        let mut variants = [Self::new(tile, Orientation::Identity); 8];
        for (v, o) in variants.iter_mut().zip(Orientation::ALL.iter()) {
            v.orientation = *o;
        }
        variants
    }

    /// The effective border along `side`.
    ///
    /// # Panics
    ///
    /// If the tile id is not in `tiles`.
    #[must_use]
    #[inline]
    pub fn border<'t>(&self, side: Side, tiles: &'t TileSet) -> &'t Border {
        tiles[self.tile].oriented_border(self.orientation, side)
    }

    /// The tile's image with the orientation applied.
    #[must_use]
    pub fn image(&self, tiles: &TileSet) -> Bitmap {
        tiles[self.tile].image().transform(self.orientation)
    }
}

impl fmt::Display for OrientedTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tile)
    }
}

/// All tiles of a puzzle, keyed by id. Every tile has the same side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSet {
    side: usize,
    tiles: BTreeMap<TileId, Tile>,
}

impl TileSet {
    pub fn new<I>(tiles: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = Tile>,
    {
        let mut side = None;
        let mut map = BTreeMap::new();
        for tile in tiles {
            let expected = *side.get_or_insert(tile.side());
            if tile.side() != expected {
                return Err(ParseError::SideMismatch {
                    id: tile.id(),
                    found: tile.side(),
                    expected,
                });
            }
            let id = tile.id();
            if map.insert(id, tile).is_some() {
                return Err(ParseError::DuplicateId(id));
            }
        }
        match side {
            Some(side) => Ok(Self { side, tiles: map }),
            None => Err(ParseError::Empty),
        }
    }

    /// Parses `Tile <id>:` blocks separated by blank lines.
    pub fn parse<R: Reader>(r: R) -> Result<Self, ParseError> {
        let blocks = read_blocks(r)?;
        let tiles = blocks
            .iter()
            .map(Tile::from_block)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(tiles)
    }

    /// Side length shared by every tile.
    #[must_use]
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.values()
    }

    /// The tiles keeping only those in `ids`.
    #[must_use]
    pub fn subset(&self, ids: &[TileId]) -> Self {
        Self {
            side: self.side,
            tiles: self
                .tiles
                .iter()
                .filter(|(id, _)| ids.contains(*id))
                .map(|(&id, tile)| (id, tile.clone()))
                .collect(),
        }
    }
}

impl Index<TileId> for TileSet {
    type Output = Tile;

    fn index(&self, id: TileId) -> &Tile {
        match self.tiles.get(&id) {
            Some(tile) => tile,
            None => panic!("no tile with id {}", id),
        }
    }
}

impl std::str::FromStr for TileSet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::SAMPLE;
    use itertools::Itertools;

    fn text(border: &Border) -> String {
        border
            .iter()
            .by_vals()
            .map(|b| if b { '#' } else { '.' })
            .collect()
    }

    #[test]
    fn parse_sample() {
        let tiles: TileSet = SAMPLE.parse().unwrap();
        assert_eq!(tiles.len(), 9);
        assert_eq!(tiles.side(), 10);
        assert_eq!(
            tiles.ids().collect_vec(),
            vec![1171, 1427, 1489, 1951, 2311, 2473, 2729, 2971, 3079]
        );

        let tile = &tiles[2311];
        assert_eq!(text(tile.raw_border(Side::Top)), "..##.#..#.");
        assert_eq!(text(tile.raw_border(Side::Right)), "...#.##..#");
        assert_eq!(text(tile.raw_border(Side::Bottom)), "..###..###");
        assert_eq!(text(tile.raw_border(Side::Left)), ".#####..#.");
    }

    /// Every entry of the border table against the edges of a fully
    /// transformed image.
    #[test]
    fn oriented_borders_match_transformed_edges() {
        let tiles: TileSet = SAMPLE.parse().unwrap();
        for tile in tiles.iter() {
            for orientation in Orientation::ALL.iter().copied() {
                let transformed = tile.image().transform(orientation);
                for side in Side::ALL.iter().copied() {
                    assert_eq!(
                        tile.oriented_border(orientation, side),
                        &transformed.edge(side),
                        "tile {} {:?} {:?}",
                        tile.id(),
                        orientation,
                        side
                    );
                }
            }
        }
    }

    #[test]
    fn rotated_bottom_is_reversed_top() {
        let tiles: TileSet = SAMPLE.parse().unwrap();
        let placed = OrientedTile::new(1951, Orientation::Rotate180);
        let mut top = tiles[1951].raw_border(Side::Top).clone();
        top.reverse();
        assert_eq!(placed.border(Side::Bottom, &tiles), &top);
    }

    #[test]
    fn variants_cover_every_orientation() {
        let variants = OrientedTile::variants(7);
        assert!(variants.iter().all(|v| v.tile == 7));
        assert_eq!(
            variants.iter().map(|v| v.orientation).collect_vec(),
            Orientation::ALL.to_vec()
        );
    }

    #[test]
    fn bad_header() {
        let err = "Tile x:\n#.\n.#".parse::<TileSet>().unwrap_err();
        assert!(matches!(err, ParseError::BadHeader { line: 1, .. }));
        let err = "\n\nTile 12\n#.\n.#".parse::<TileSet>().unwrap_err();
        assert!(matches!(err, ParseError::BadHeader { line: 3, .. }));
    }

    #[test]
    fn wrong_row_length() {
        let err = "Tile 1:\n#..\n.#\n..#".parse::<TileSet>().unwrap_err();
        assert!(matches!(err, ParseError::Bitmap { id: 1, .. }));
    }

    #[test]
    fn unknown_pixel() {
        let err = "Tile 1:\n#.\n.o".parse::<TileSet>().unwrap_err();
        assert!(matches!(err, ParseError::Bitmap { id: 1, .. }));
    }

    #[test]
    fn not_square() {
        let err = "Tile 1:\n#..\n.#.".parse::<TileSet>().unwrap_err();
        assert!(matches!(
            err,
            ParseError::NotSquare {
                id: 1,
                height: 2,
                width: 3
            }
        ));
    }

    #[test]
    fn mixed_sides() {
        let err = "Tile 1:\n#.\n.#\n\nTile 2:\n#..\n.#.\n..#"
            .parse::<TileSet>()
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::SideMismatch {
                id: 2,
                found: 3,
                expected: 2
            }
        ));
    }

    #[test]
    fn duplicate_and_empty() {
        let err = "Tile 1:\n#.\n.#\n\nTile 1:\n#.\n.#"
            .parse::<TileSet>()
            .unwrap_err();
        assert!(matches!(err, ParseError::DuplicateId(1)));
        assert!(matches!("\n".parse::<TileSet>(), Err(ParseError::Empty)));
    }

    #[test]
    fn header_without_body() {
        let err = "Tile 5:".parse::<TileSet>().unwrap_err();
        assert!(matches!(err, ParseError::Bitmap { id: 5, .. }));
    }
}
