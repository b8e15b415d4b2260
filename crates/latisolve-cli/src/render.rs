//! Bordered console rendering of grids.
//!
//! Presentation policy lives here, not in the solver: given clues are
//! parenthesized, search-assigned values are bare, and the cell width scales
//! with the square size instead of imposing a ceiling on the model.

use latisolve_core::{Cell, Grid};
use latisolve_solver::SearchObserver;

/// Widest rendered line considered practical for a terminal.
const PRACTICAL_WIDTH: usize = 100;

/// Number of decimal digits needed for values up to `n`.
fn decimal_width(n: usize) -> usize {
    let mut width = 1;
    let mut rest = n / 10;
    while rest > 0 {
        width += 1;
        rest /= 10;
    }
    width
}

/// Returns `true` if a `size`-wide grid renders within a practical terminal
/// width. Above this the CLI asks before rendering every step.
pub(crate) fn fits_terminal(size: usize) -> bool {
    size * (decimal_width(size) + 5) + 1 <= PRACTICAL_WIDTH
}

/// Renders the grid as a bordered table.
///
/// Each row sits between horizontal border lines; givens render as `(v)`,
/// search-assigned values as bare numbers, empty cells as blanks.
pub(crate) fn render_grid(grid: &Grid) -> String {
    let width = decimal_width(grid.size());
    let border = {
        let mut line = "+".to_owned();
        for _ in 0..grid.size() {
            line.push_str(&"-".repeat(width + 4));
            line.push('+');
        }
        line
    };

    let mut out = String::new();
    for row in grid.rows() {
        out.push_str(&border);
        out.push('\n');
        for &cell in row {
            out.push_str("| ");
            match cell {
                Cell::Empty => out.push_str(&" ".repeat(width + 2)),
                Cell::Given(value) => out.push_str(&format!("({value:>width$})")),
                Cell::Filled(value) => out.push_str(&format!(" {value:>width$} ")),
            }
            out.push(' ');
        }
        out.push_str("|\n");
    }
    out.push_str(&border);
    out
}

/// Observer that re-renders the grid after every committed change.
#[derive(Debug, Default)]
pub(crate) struct ConsoleObserver;

impl SearchObserver for ConsoleObserver {
    fn on_advance(&mut self, grid: &Grid, row: usize, col: usize, value: usize) {
        log::debug!("placed {value} at ({row}, {col})");
        println!("{}", render_grid(grid));
    }

    fn on_backtrack(&mut self, grid: &Grid, row: usize, col: usize) {
        log::debug!("undid placement at ({row}, {col})");
        println!("{}", render_grid(grid));
    }
}
