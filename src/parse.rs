use thiserror::Error;

use crate::config::{Config, MAX_CELLS};
use crate::grid::Grid;

pub const ALIVE: &str = "*";
pub const DEAD: &str = ".";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("input ended before the `{field}` header value")]
    MissingHeader { field: &'static str },
    #[error("header value `{field}` must be a non-negative integer, got `{token}`")]
    InvalidHeader { field: &'static str, token: String },
    #[error("a {rows}x{cols} grid exceeds the limit of {} cells", MAX_CELLS)]
    TooLarge { rows: usize, cols: usize },
}

/// Parse `ROWS COLS MAX_GENERATIONS` followed by row-major cell tokens.
///
/// Only the header is validated. A cell token is alive iff it is `*`; anything else
/// is dead. Missing cells stay dead and tokens past `ROWS * COLS` are ignored.
pub fn parse_input(text: &str) -> Result<(Config, Grid<bool>), ParseError> {
    let mut tokens = text.split_whitespace();

    let rows = header_value(tokens.next(), "rows")?;
    let cols = header_value(tokens.next(), "cols")?;
    let max_generations = header_value(tokens.next(), "generations")?;
    check_size(rows, cols)?;
    let config = Config::new(rows, cols, max_generations);

    let grid = parse_cells(tokens, rows, cols);
    Ok((config, grid))
}

/// Fill a `rows x cols` grid row-major from cell tokens.
pub fn parse_cells<'a, I>(tokens: I, rows: usize, cols: usize) -> Grid<bool>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut grid = Grid::new(rows, cols);
    for (i, token) in tokens.into_iter().take(grid.data.len()).enumerate() {
        grid.data[i] = token == ALIVE;
    }
    grid
}

/// Fill a `rows x cols` grid from one line of cell tokens per row. A short line
/// leaves the rest of its row dead; lines past `rows` and tokens past `cols` are ignored.
pub fn parse_rows<'a, I>(lines: I, rows: usize, cols: usize) -> Grid<bool>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut grid = Grid::new(rows, cols);
    for (row, line) in lines.into_iter().take(rows).enumerate() {
        for (col, token) in line.split_whitespace().take(cols).enumerate() {
            grid.set(row, col, token == ALIVE);
        }
    }
    grid
}

pub fn check_size(rows: usize, cols: usize) -> Result<(), ParseError> {
    let too_large = rows > MAX_CELLS
        || cols > MAX_CELLS
        || rows.checked_mul(cols).is_none_or(|n| n > MAX_CELLS);
    if too_large {
        return Err(ParseError::TooLarge { rows, cols });
    }
    Ok(())
}

fn header_value(token: Option<&str>, field: &'static str) -> Result<usize, ParseError> {
    let token = token.ok_or(ParseError::MissingHeader { field })?;
    token.parse().map_err(|_| ParseError::InvalidHeader {
        field,
        token: token.to_string(),
    })
}
