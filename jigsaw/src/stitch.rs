use crate::{bitmap::Bitmap, solver::Arrangement, tile::TileSet};

/// Joins the interiors of every placed tile into one image.
///
/// Each tile is transformed into its orientation and loses its outermost
/// ring of pixels; the remaining `(N - 2) x (N - 2)` blocks are laid out on
/// the same grid as the arrangement, with no gaps and no overlap.
#[must_use]
pub fn stitch(arrangement: &Arrangement, tiles: &TileSet) -> Bitmap {
    let inner = tiles.side().saturating_sub(2);
    let mut image = Bitmap::new(arrangement.rows() * inner, arrangement.cols() * inner);

    for ((row, col), cell) in arrangement.iter() {
        let block = cell.image(tiles).crop(1, 1, inner, inner);
        image.paste(row * inner, col * inner, &block);
    }

    image
}
