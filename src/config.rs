/// Upper bound on `rows * cols`, and on each dimension alone so zero-width
/// grids cannot claim an unbounded row count.
pub const MAX_CELLS: usize = 1 << 24;

/// Run parameters read from the input header.
/// Passed explicitly to every stage; nothing is global.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub max_generations: usize,
}

impl Config {
    pub fn new(rows: usize, cols: usize, max_generations: usize) -> Self {
        Self {
            rows,
            cols,
            max_generations,
        }
    }

    pub fn with_generations(self, max_generations: usize) -> Self {
        Self {
            max_generations,
            ..self
        }
    }
}

