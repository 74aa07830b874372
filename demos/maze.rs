//! Headless A* maze demo.
//!
//! Run: cargo run --bin maze -- --start 0,0 --end 20,20 --step --delay-ms 20

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use maze_core::{GridConfig, Heuristic, Point};
use maze_demos::{describe, in_bounds, load_config, parse_point, render};
use maze_paths::{Driver, RunOutcome, Step};

#[derive(Parser, Debug)]
#[command(name = "maze", about = "Solve a grid maze with A*")]
struct Args {
    /// JSON grid configuration (size, costs, heuristic, walls). Defaults to
    /// the built-in 21x21 maze.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start cell as ROW,COL.
    #[arg(long, value_parser = parse_point, default_value = "0,0")]
    start: Point,

    /// End cell as ROW,COL. Defaults to the bottom-right corner.
    #[arg(long, value_parser = parse_point)]
    end: Option<Point>,

    /// Advance the search one expansion at a time, printing each one.
    #[arg(long)]
    step: bool,

    /// Pause between expansions, in milliseconds.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Use the sum-of-axes heuristic instead of octile distance.
    #[arg(long)]
    axis_sum: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let cfg = match &args.config {
        Some(path) => load_config(path)?,
        None => GridConfig::default(),
    };
    let last = cfg.size - 1;
    let mut driver = Driver::new(cfg)?;
    if args.axis_sum {
        driver.set_heuristic(Heuristic::AxisSum);
    }
    let start = in_bounds(driver.grid(), args.start)?;
    let end = in_bounds(driver.grid(), args.end.unwrap_or(Point::rc(last, last)))?;
    driver.set_start(start)?;
    driver.set_end(end)?;

    println!("{}", driver.grid());

    let delay = Duration::from_millis(args.delay_ms);
    let outcome = if args.step {
        driver.begin()?;
        while let Some(step) = driver.tick() {
            if let Step::Visited(cell) = step {
                let open = driver.search().map_or(0, |s| s.open_len());
                println!("{} open={open}", describe(&cell));
            }
            std::thread::sleep(delay);
        }
        driver.outcome()
    } else {
        Some(driver.run_throttled(delay, |cell| log::debug!("{}", describe(cell))))
    };

    println!("{}", render(driver.grid(), driver.path()));
    match outcome {
        Some(RunOutcome::Found { cost, expanded }) => {
            println!("Cost: {cost} ({} cells, {expanded} expanded)", driver.path().len());
        }
        Some(RunOutcome::NoPath { .. }) => println!("No path. Cost: 0"),
        Some(RunOutcome::Rejected(e)) => println!("Rejected: {e}"),
        None => println!("Search did not finish"),
    }
    Ok(())
}
