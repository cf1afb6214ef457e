//! Headless scenario solver
//!
//! Reads one or more scenario JSON files, runs the path query each describes and
//! prints the path with an ASCII map. Exits with status 1 if any scenario fails
//! to load or disagrees with its recorded expectation.

use navgrid::pathfinding::format_path;
use navgrid::render::grid_to_string;
use navgrid::{CellCoord, Scenario};
use std::env;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <scenario.json>...", args[0]);
        eprintln!("Solves each scenario and checks it against its expected outcome");
        process::exit(1);
    }

    let mut failures = 0;
    for filename in &args[1..] {
        if let Err(e) = solve(filename) {
            eprintln!("{}: {}", filename, e);
            failures += 1;
        }
    }

    println!("\n=== Summary ===");
    println!("Scenarios: {}, failed: {}", args.len() - 1, failures);

    if failures > 0 {
        process::exit(1);
    }
}

fn solve(filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario::load_from_file(filename)?;
    let outcome = scenario.run()?;

    println!("=== Scenario: {} ({}) ===", scenario.name, filename);
    println!(
        "Grid: {}x{} cells, {} walkable",
        outcome.grid.cols(),
        outcome.grid.rows(),
        outcome.grid.walkable_count()
    );
    println!(
        "Start cell: ({},{})  Goal cell: ({},{})",
        outcome.start.col, outcome.start.row, outcome.goal.col, outcome.goal.row
    );
    println!(
        "Expanded {} of {} discovered cells",
        outcome.stats.expanded, outcome.stats.discovered
    );

    if let Some(path) = &outcome.path {
        println!("Path: {} steps, cost {}", path.len(), path.cost());
    }
    println!("{}", format_path(outcome.path.as_ref()));

    let cells: &[CellCoord] = outcome.path.as_ref().map(|p| p.cells()).unwrap_or(&[]);
    println!(
        "\n{}",
        grid_to_string(&outcome.grid, cells, Some(outcome.start), Some(outcome.goal))
    );

    let problems = scenario.mismatches(&outcome);
    if !problems.is_empty() {
        return Err(problems.join("; ").into());
    }
    Ok(())
}
