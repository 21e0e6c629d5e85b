use crate::grid::{Grid, neighbors8};

/// Live cells in the Moore neighborhood of (row, col). Off-grid positions count as dead.
pub fn count_live_neighbors(grid: &Grid<bool>, row: usize, col: usize) -> usize {
    neighbors8(row, col, grid.rows, grid.cols)
        .filter(|&(r, c)| grid.get(r, c))
        .count()
}

/// B3/S23.
/// - live with < 2 neighbors dies (underpopulation)
/// - live with 2 or 3 neighbors survives
/// - live with > 3 neighbors dies (overpopulation)
/// - dead with exactly 3 neighbors is born
#[inline]
pub fn next_cell_state(is_alive: bool, live_neighbors: usize) -> bool {
    matches!((is_alive, live_neighbors), (true, 2 | 3) | (false, 3))
}

/// Compute the next generation into a fresh grid. Every neighbor count reads `grid`,
/// which is never written, so no cell sees another cell's updated state.
pub fn advance_generation(grid: &Grid<bool>) -> Grid<bool> {
    let mut next = Grid::new(grid.rows, grid.cols);
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let n = count_live_neighbors(grid, row, col);
            next.set(row, col, next_cell_state(grid.get(row, col), n));
        }
    }
    next
}

/// Apply `generations` steps. Zero steps returns the input as-is.
pub fn run(grid: Grid<bool>, generations: usize) -> Grid<bool> {
    let mut current = grid;
    for _ in 0..generations {
        current = advance_generation(&current);
    }
    current
}

pub fn population(grid: &Grid<bool>) -> usize {
    grid.data.iter().filter(|&&alive| alive).count()
}
