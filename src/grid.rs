/// Row-major flat grid. No per-cell objects, positions are implied by index.
/// Bounded on every edge: no wrapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub rows: usize,
    pub cols: usize,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::default(); rows * cols],
            rows,
            cols,
        }
    }

    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[self.idx(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: T) {
        let i = self.idx(row, col);
        self.data[i] = v;
    }

    /// Iterate rows as slices, top to bottom. Always yields `rows` slices, empty ones
    /// when the grid has zero width.
    pub fn row_slices(&self) -> impl Iterator<Item = &[T]> {
        (0..self.rows).map(move |r| &self.data[r * self.cols..(r + 1) * self.cols])
    }
}

/// Bounds-checked offset. Returns None if the shifted position leaves the grid.
#[inline]
pub fn offset(row: usize, col: usize, dr: i32, dc: i32, rows: usize, cols: usize) -> Option<(usize, usize)> {
    let r = row as i64 + dr as i64;
    let c = col as i64 + dc as i64;
    if r < 0 || c < 0 || r >= rows as i64 || c >= cols as i64 {
        return None;
    }
    Some((r as usize, c as usize))
}

/// 8-connected (Moore) neighbors, clipped at the edges.
pub fn neighbors8(row: usize, col: usize, rows: usize, cols: usize) -> impl Iterator<Item = (usize, usize)> {
    let offsets: [(i32, i32); 8] = [
        (-1, -1), (-1, 0), (-1, 1),
        (0, -1),           (0, 1),
        (1, -1),  (1, 0),  (1, 1),
    ];
    let mut out = [(0usize, 0usize); 8];
    let mut n = 0;
    for (dr, dc) in offsets {
        if let Some(pos) = offset(row, col, dr, dc, rows, cols) {
            out[n] = pos;
            n += 1;
        }
    }
    out.into_iter().take(n)
}
