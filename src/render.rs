use crate::grid::Grid;
use crate::parse::{ALIVE, DEAD};

const LIVE_COLOR: [u8; 4] = [24, 28, 36, 255];
const DEAD_COLOR: [u8; 4] = [236, 238, 242, 255];

/// Largest accepted pixels-per-cell.
pub const MAX_SCALE: u32 = 64;
/// Largest raster `render_rgba` will allocate, in pixels.
pub const MAX_PIXELS: u64 = 1 << 26;

/// One line per row, cells separated by single spaces, no trailing space.
/// A zero-width grid still prints `rows` (empty) lines.
pub fn render_text(grid: &Grid<bool>) -> String {
    let mut out = String::new();
    for row in grid.row_slices() {
        for (col, &alive) in row.iter().enumerate() {
            if col > 0 {
                out.push(' ');
            }
            out.push_str(if alive { ALIVE } else { DEAD });
        }
        out.push('\n');
    }
    out
}

/// Pixel dimensions of `render_rgba` output, or None when `scale` exceeds
/// `MAX_SCALE` or the raster would exceed `MAX_PIXELS`.
pub fn image_size(grid: &Grid<bool>, scale: u32) -> Option<(u32, u32)> {
    let scale = scale.max(1);
    if scale > MAX_SCALE {
        return None;
    }
    let w = u32::try_from(grid.cols).ok()?.checked_mul(scale)?;
    let h = u32::try_from(grid.rows).ok()?.checked_mul(scale)?;
    if w as u64 * h as u64 > MAX_PIXELS {
        return None;
    }
    Some((w, h))
}

/// RGBA8 raster, `scale` pixels per cell side, sized by `image_size`.
pub fn render_rgba(grid: &Grid<bool>, scale: u32) -> Option<Vec<u8>> {
    let (w, h) = image_size(grid, scale)?;
    let scale = scale.max(1) as usize;
    let (w, h) = (w as usize, h as usize);
    let mut rgba = vec![0u8; w * h * 4];
    if w == 0 {
        return Some(rgba);
    }

    for (y, line) in rgba.chunks_mut(w * 4).enumerate() {
        let row = y / scale;
        for x in 0..w {
            let color = if grid.get(row, x / scale) {
                LIVE_COLOR
            } else {
                DEAD_COLOR
            };
            line[x * 4..x * 4 + 4].copy_from_slice(&color);
        }
    }

    Some(rgba)
}
