pub mod api;
pub mod config;
pub mod engine;
pub mod grid;
pub mod parse;
pub mod render;

use std::time::Instant;

use config::Config;
use grid::Grid;
use parse::ParseError;

/// Final state of a simulation.
pub struct Run {
    pub config: Config,
    pub grid: Grid<bool>,
    pub initial_population: usize,
    pub population: usize,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Step `grid` forward `config.max_generations` times.
pub fn evolve(config: Config, grid: Grid<bool>) -> (Run, Vec<Timing>) {
    let mut timings = Vec::new();
    let initial_population = engine::population(&grid);

    let t = Instant::now();
    let grid = engine::run(grid, config.max_generations);
    timings.push(Timing {
        name: "simulate",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let population = engine::population(&grid);
    log::debug!(
        "{}x{} grid, {} generations: population {} -> {}",
        config.rows,
        config.cols,
        config.max_generations,
        initial_population,
        population
    );

    let run = Run {
        config,
        grid,
        initial_population,
        population,
    };
    (run, timings)
}

/// Parse the text input format and run it. `generations` overrides the header count.
pub fn simulate(text: &str, generations: Option<usize>) -> Result<(Run, Vec<Timing>), ParseError> {
    let total_start = Instant::now();

    let t = Instant::now();
    let (mut config, grid) = parse::parse_input(text)?;
    if let Some(n) = generations {
        config = config.with_generations(n);
    }
    let mut timings = vec![Timing {
        name: "parse",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    }];

    let (run, run_timings) = evolve(config, grid);
    timings.extend(run_timings);

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    Ok((run, timings))
}
