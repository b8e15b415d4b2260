//! Backtracking search engine for Latin square puzzles.
//!
//! The solver is a chronological depth-first search: it repeatedly fills the
//! first empty cell with the lowest legal value, capturing a [`Snapshot`] of
//! the grid onto a [`HistoryStack`] after each placement. When a cell admits
//! no legal value, the most recent snapshot is popped and the search resumes
//! at that cell strictly above the value it had tried — the monotonic
//! resumption that guarantees termination. The search ends in one of two
//! ordinary outcomes: [`SolveOutcome::Solved`] or
//! [`SolveOutcome::Unsolvable`].
//!
//! Presentation is an external collaborator: the solver never prints, it
//! reports each committed change through a [`SearchObserver`].
//!
//! # Examples
//!
//! ```
//! use latisolve_core::Grid;
//! use latisolve_solver::{SolveOutcome, Solver};
//!
//! let grid: Grid = "2  1 0  0 0".parse()?;
//! grid.check_valid()?;
//!
//! let mut solver = Solver::new(grid);
//! let (outcome, stats) = solver.solve();
//! assert_eq!(outcome, SolveOutcome::Solved);
//! assert_eq!(stats.pops(), 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod history;
mod observer;
mod solver;

pub use self::{
    history::{HistoryStack, Snapshot},
    observer::{NullObserver, SearchObserver},
    solver::{SolveOutcome, SolveState, SolveStats, Solver},
};
