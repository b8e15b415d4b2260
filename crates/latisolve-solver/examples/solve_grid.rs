//! Example demonstrating a full solve with a narrating observer.
//!
//! The observer prints one line per committed change, which makes the
//! backtracking visible on puzzles that dead-end along the way.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example solve_grid
//! ```

use latisolve_core::Grid;
use latisolve_solver::{SearchObserver, SolveStats, Solver};

struct Narrator;

impl SearchObserver for Narrator {
    fn on_advance(&mut self, _grid: &Grid, row: usize, col: usize, value: usize) {
        println!("placed {value} at ({row}, {col})");
    }

    fn on_backtrack(&mut self, _grid: &Grid, row: usize, col: usize) {
        println!("undid ({row}, {col})");
    }
}

fn main() {
    let grid: Grid = "4
        -1  0  0  0
         0 -2  0  0
         0  0 -3  0
         0  0  0 -4"
        .parse()
        .expect("example grid parses");
    grid.check_valid().expect("example grid is valid");

    let mut solver = Solver::new(grid);
    let mut stats = SolveStats::new();
    let outcome = solver.solve_with_stats(&mut Narrator, &mut stats);

    println!(
        "{outcome}: {} steps, {} backtracks",
        stats.steps(),
        stats.pops()
    );
    println!("{}", solver.grid());
}
