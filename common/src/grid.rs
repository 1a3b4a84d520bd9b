use std::{fmt, iter::repeat_with};

/// A `(row, col)` index into a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[must_use]
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The position one row up, if any.
    #[must_use]
    #[inline]
    pub fn up(self) -> Option<Self> {
        Some(Self::new(self.row.checked_sub(1)?, self.col))
    }

    #[must_use]
    #[inline]
    pub fn down(self) -> Option<Self> {
        Some(Self::new(self.row.checked_add(1)?, self.col))
    }

    #[must_use]
    #[inline]
    pub fn left(self) -> Option<Self> {
        Some(Self::new(self.row, self.col.checked_sub(1)?))
    }

    #[must_use]
    #[inline]
    pub fn right(self) -> Option<Self> {
        Some(Self::new(self.row, self.col.checked_add(1)?))
    }
}

impl From<(usize, usize)> for Pos {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A row-major rectangle of optional cells that can grow and shrink along
/// any of its four edges.
///
/// Empty cells are holes. Growing never moves the relative placement of
/// filled cells; inserting a row at index `0` shifts every existing row
/// down by one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<Option<T>>,
}

impl<T> Grid<T> {
    /// A grid of `rows * cols` holes.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: repeat_with(|| None).take(rows * cols).collect(),
        }
    }

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

    /// Number of cells, filled or not.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    #[inline]
    fn index(&self, pos: Pos) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.cols + pos.col)
    }

    /// The value at `pos`; `None` for holes and for positions outside the
    /// grid.
    #[must_use]
    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.index(pos).and_then(|i| self.cells[i].as_ref())
    }

    /// Stores `value` at `pos`, returning whatever was there.
    ///
    /// # Panics
    ///
    /// If `pos` lies outside the grid.
    pub fn set(&mut self, pos: Pos, value: T) -> Option<T> {
        let i = self.checked_index(pos);
        self.cells[i].replace(value)
    }

    /// Turns `pos` back into a hole, returning its value.
    ///
    /// # Panics
    ///
    /// If `pos` lies outside the grid.
    pub fn take(&mut self, pos: Pos) -> Option<T> {
        let i = self.checked_index(pos);
        self.cells[i].take()
    }

    fn checked_index(&self, pos: Pos) -> usize {
        match self.index(pos) {
            Some(i) => i,
            None => panic!(
                "position {} outside {}x{} grid",
                pos, self.rows, self.cols
            ),
        }
    }

    /// Every hole, in row-major order.
    pub fn holes(&self) -> impl Iterator<Item = Pos> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(move |(i, _)| Pos::new(i / cols, i % cols))
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Filled cells with their positions, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &T)> + '_ {
        let cols = self.cols;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref().map(|v| (Pos::new(i / cols, i % cols), v))
        })
    }

    /// Inserts a row of holes so that it ends up at index `at`.
    ///
    /// # Panics
    ///
    /// If `at > rows`.
    pub fn insert_row(&mut self, at: usize) {
        assert!(at <= self.rows, "row {} out of range", at);
        let start = at * self.cols;
        let tail = self.cells.split_off(start);
        self.cells.extend(repeat_with(|| None).take(self.cols));
        self.cells.extend(tail);
        self.rows += 1;
    }

    /// Removes the row at index `at`, returning its cells.
    ///
    /// # Panics
    ///
    /// If `at >= rows`.
    pub fn remove_row(&mut self, at: usize) -> Vec<Option<T>> {
        assert!(at < self.rows, "row {} out of range", at);
        let start = at * self.cols;
        let removed = self.cells.drain(start..start + self.cols).collect();
        self.rows -= 1;
        removed
    }

    /// Inserts a column of holes so that it ends up at index `at`.
    ///
    /// # Panics
    ///
    /// If `at > cols`.
    pub fn insert_col(&mut self, at: usize) {
        assert!(at <= self.cols, "column {} out of range", at);
        let old_cols = self.cols;
        let mut old = std::mem::take(&mut self.cells).into_iter();
        self.cells.reserve(self.rows * (old_cols + 1));
        for _ in 0..self.rows {
            self.cells.extend(old.by_ref().take(at));
            self.cells.push(None);
            self.cells.extend(old.by_ref().take(old_cols - at));
        }
        self.cols += 1;
    }

    /// Removes the column at index `at`, returning its cells top to bottom.
    ///
    /// # Panics
    ///
    /// If `at >= cols`.
    pub fn remove_col(&mut self, at: usize) -> Vec<Option<T>> {
        assert!(at < self.cols, "column {} out of range", at);
        let cols = self.cols;
        let mut removed = Vec::with_capacity(self.rows);
        let mut kept = Vec::with_capacity(self.rows * (cols - 1));
        for (i, cell) in std::mem::take(&mut self.cells).into_iter().enumerate()
        {
            if i % cols == at {
                removed.push(cell);
            } else {
                kept.push(cell);
            }
        }
        self.cells = kept;
        self.cols -= 1;
        removed
    }

    /// Unwraps every cell if the grid has no holes.
    pub fn into_full(self) -> Result<Vec<T>, Self> {
        if self.is_full() {
            Ok(self.cells.into_iter().flatten().collect())
        } else {
            Err(self)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            let mut first = true;
            for cell in row {
                if !first {
                    f.write_str(" ")?;
                }
                first = false;
                match cell {
                    Some(v) => write!(f, "{}", v)?,
                    None => f.write_str("_")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
