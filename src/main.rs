use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lifegrid::render;

/// Run Conway's Game of Life and print the final generation.
#[derive(Parser)]
#[command(name = "lifegrid", version)]
struct Args {
    /// Input file (`ROWS COLS GENERATIONS` then `*`/`.` cells). Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Override the generation count from the input header.
    #[arg(long)]
    generations: Option<usize>,

    /// Also save the final grid as a PNG.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Pixels per cell side in the PNG.
    #[arg(long, default_value_t = 8)]
    scale: u32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?,
    };

    let (run, timings) =
        lifegrid::simulate(&text, args.generations).context("Failed to parse input")?;

    log::info!(
        "{}x{} grid after {} generations, {} live cells",
        run.config.rows,
        run.config.cols,
        run.config.max_generations,
        run.population
    );
    for t in &timings {
        log::debug!("  {:20} {:8.3} ms", t.name, t.ms);
    }

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(render::render_text(&run.grid).as_bytes())
        .context("Failed to write grid")?;
    stdout.flush()?;

    if let Some(path) = &args.png {
        if run.grid.data.is_empty() {
            log::warn!("Grid is empty, not writing {}", path.display());
        } else {
            let (w, h) = render::image_size(&run.grid, args.scale).with_context(|| {
                format!("Scale {} is too large for this grid", args.scale)
            })?;
            let rgba = render::render_rgba(&run.grid, args.scale)
                .context("Raster exceeds the image size limit")?;
            image::save_buffer(path, &rgba, w, h, image::ColorType::Rgba8)
                .with_context(|| format!("Failed to save {}", path.display()))?;
            log::info!("Saved {}", path.display());
        }
    }

    Ok(())
}
