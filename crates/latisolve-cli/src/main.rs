//! Command-line Latin square solver.
//!
//! Reads a puzzle file — the square size followed by `size * size` row-major
//! integers, `0` for empty cells and negative values for given clues — and
//! solves it by backtracking search, rendering the grid after every committed
//! change.
//!
//! Exit codes: 0 when solved, 1 when no solution exists, 2 on malformed or
//! invalid input. Wrong argument counts are reported by clap before any I/O
//! happens. Set `RUST_LOG=debug` for per-step traces.

use std::{
    fs,
    io::{self, BufRead as _, Write as _},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use latisolve_core::{Grid, InvalidSquareError, ParseGridError};
use latisolve_solver::{NullObserver, SolveOutcome, SolveStats, Solver};

use crate::render::{ConsoleObserver, render_grid};

mod render;

/// Solves a partially-filled Latin square read from a file.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the puzzle file: the square size followed by size*size
    /// row-major integers (0 empty, negative values for given clues).
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Suppress per-step rendering; only the final grid is shown.
    #[arg(long)]
    quiet: bool,
}

/// Fatal conditions that abort a run before the search starts.
///
/// An unsolvable puzzle is deliberately not among them: it is a normal
/// outcome of well-formed input and is reported as such.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
enum RunError {
    #[display("cannot read input file: {_0}")]
    Io(#[from] io::Error),
    #[display("malformed input: {_0}")]
    Parse(#[from] ParseGridError),
    #[display("invalid square: {_0}")]
    Invalid(#[from] InvalidSquareError),
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(SolveOutcome::Solved) => ExitCode::SUCCESS,
        Ok(SolveOutcome::Unsolvable) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<SolveOutcome, RunError> {
    let input = fs::read_to_string(&args.path)?;
    let grid: Grid = input.parse()?;
    grid.check_valid()?;

    println!("{}", render_grid(&grid));

    if grid.is_complete() {
        println!("The square is already solved.");
        return Ok(SolveOutcome::Solved);
    }

    let empty_at_start = grid.empty_count();
    let render_steps = !args.quiet && confirm_step_rendering(grid.size());

    let mut solver = Solver::new(grid);
    let mut stats = SolveStats::new();
    let outcome = if render_steps {
        solver.solve_with_stats(&mut ConsoleObserver, &mut stats)
    } else {
        solver.solve_with_stats(&mut NullObserver, &mut stats)
    };

    match outcome {
        SolveOutcome::Solved => {
            println!("{}", render_grid(solver.grid()));
            println!(
                "Solved in {} steps ({} backtracks).",
                stats.steps(),
                stats.pops()
            );
        }
        SolveOutcome::Unsolvable => println!("No solution exists for this square."),
    }
    log::info!(
        "outcome={outcome} steps={} pushes={} pops={} empty_at_start={empty_at_start}",
        stats.steps(),
        stats.pushes(),
        stats.pops(),
    );

    Ok(outcome)
}

/// Asks whether to render every step when the grid exceeds the renderer's
/// practical width. Solving proceeds either way; only the per-step display
/// is at stake. Anything but `y`/`yes` declines.
fn confirm_step_rendering(size: usize) -> bool {
    if render::fits_terminal(size) {
        return true;
    }
    print!("A {size}x{size} square is too wide to render every step; render anyway? [y/N] ");
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
