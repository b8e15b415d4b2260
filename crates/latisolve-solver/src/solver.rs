use latisolve_core::{Cell, Grid};

use crate::{HistoryStack, NullObserver, SearchObserver, Snapshot};

/// Search progress states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SolveState {
    /// The search is in progress: empty cells remain and the history may
    /// still be revised.
    Searching,
    /// Every cell is filled and the row/column invariant holds.
    Solved,
    /// A cell admitted no candidate and no earlier decision was left to
    /// revise: the puzzle has no solution reachable from its clues.
    Unsolvable,
}

/// Terminal result of a search run.
///
/// Both variants are ordinary values: an unsolvable puzzle is a normal
/// outcome of well-formed input, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SolveOutcome {
    /// The grid was completed.
    #[display("solved")]
    Solved,
    /// No completion exists.
    #[display("no solution")]
    Unsolvable,
}

/// Diagnostic counters collected during a search run.
///
/// A *step* is one candidate scan: it ends in either a placement (a push) or
/// an undo (a pop), except for the final scan of an unsolvable run, which
/// ends in neither. The counters never feed back into control decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    steps: usize,
    pushes: usize,
    pops: usize,
}

impl SolveStats {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of candidate scans performed.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of placements committed (snapshots pushed).
    #[must_use]
    pub fn pushes(&self) -> usize {
        self.pushes
    }

    /// Number of placements undone (snapshots popped).
    #[must_use]
    pub fn pops(&self) -> usize {
        self.pops
    }

    /// Returns `true` if any step was taken.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.steps > 0
    }
}

/// Where the next candidate scan happens.
///
/// Absent after an advance (the next step locates the next empty cell and
/// scans from 1); present after a backtrack, carrying the resumption bound.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    row: usize,
    col: usize,
    low_bound: usize,
}

/// Depth-first chronological backtracking solver for Latin square puzzles.
///
/// The solver owns the grid and its snapshot history for the duration of a
/// run. Each [`step`](Solver::step) fills the first empty cell with the
/// lowest legal value and pushes a snapshot, or — when no value fits — pops
/// the most recent snapshot, restores the grid, and resumes that cell's scan
/// strictly above the value it had tried. There is no heuristic ordering and
/// no constraint propagation: the lowest legal value always wins.
///
/// Callers are expected to have validated the grid with
/// [`Grid::check_valid`] first; the search preserves the duplicate-free
/// invariant but does not re-establish it.
///
/// # Examples
///
/// Driving the search step by step:
///
/// ```
/// use latisolve_core::Grid;
/// use latisolve_solver::{NullObserver, SolveStats, Solver};
///
/// let grid: Grid = "2  1 0  0 0".parse()?;
/// let mut solver = Solver::new(grid);
/// let mut stats = SolveStats::new();
///
/// while solver.step(&mut NullObserver, &mut stats) {}
/// assert!(solver.state().is_solved());
/// assert_eq!(stats.steps(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Solver {
    grid: Grid,
    history: HistoryStack,
    state: SolveState,
    cursor: Option<Cursor>,
}

impl Solver {
    /// Creates a solver owning `grid`.
    ///
    /// A grid with no empty cells starts in [`SolveState::Solved`] and the
    /// run takes zero steps; anything else starts in
    /// [`SolveState::Searching`].
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        let state = if grid.is_complete() {
            SolveState::Solved
        } else {
            SolveState::Searching
        };
        Self {
            grid,
            history: HistoryStack::new(),
            state,
            cursor: None,
        }
    }

    /// Current search state.
    #[must_use]
    pub fn state(&self) -> SolveState {
        self.state
    }

    /// The live grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Consumes the solver, yielding the grid in its final state.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Number of committed, not-yet-undone placements.
    #[must_use]
    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    /// Performs one advance or backtrack, reporting the change to `observer`.
    ///
    /// Returns `true` while the search is still in progress and `false` once
    /// a terminal state has been reached (including when the solver was
    /// already terminal on entry, in which case nothing is done). A caller
    /// may simply stop calling `step` between steps; no invariant depends on
    /// running to completion.
    pub fn step(&mut self, observer: &mut dyn SearchObserver, stats: &mut SolveStats) -> bool {
        if !self.state.is_searching() {
            return false;
        }

        let cursor = match self.cursor.take() {
            Some(cursor) => cursor,
            None => match self.grid.find_first_empty() {
                Some((row, col)) => Cursor {
                    row,
                    col,
                    low_bound: 1,
                },
                None => {
                    self.state = SolveState::Solved;
                    return false;
                }
            },
        };

        stats.steps += 1;

        let Cursor {
            row,
            col,
            low_bound,
        } = cursor;
        let candidate = (low_bound..=self.grid.size()).find(|&v| self.grid.is_legal(row, col, v));

        match candidate {
            Some(value) => {
                self.grid.set(row, col, Cell::Filled(value));
                self.history.push(Snapshot::new(self.grid.clone(), row, col));
                stats.pushes += 1;
                observer.on_advance(&self.grid, row, col, value);
                if self.grid.is_complete() {
                    self.state = SolveState::Solved;
                }
            }
            None => match self.history.pop() {
                Some(snapshot) => {
                    let (row, col) = (snapshot.row(), snapshot.col());
                    let low_bound = snapshot.placed_value().map_or(1, |tried| tried + 1);
                    self.grid = snapshot.into_grid();
                    self.cursor = Some(Cursor {
                        row,
                        col,
                        low_bound,
                    });
                    stats.pops += 1;
                    observer.on_backtrack(&self.grid, row, col);
                }
                None => {
                    self.state = SolveState::Unsolvable;
                }
            },
        }

        self.state.is_searching()
    }

    /// Runs the search to termination with a no-op observer.
    ///
    /// # Examples
    ///
    /// ```
    /// use latisolve_core::Grid;
    /// use latisolve_solver::{SolveOutcome, Solver};
    ///
    /// let grid: Grid = "3  1 2 0  0 0 3  0 0 0".parse()?;
    /// let mut solver = Solver::new(grid);
    /// let (outcome, _stats) = solver.solve();
    /// assert_eq!(outcome, SolveOutcome::Unsolvable);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn solve(&mut self) -> (SolveOutcome, SolveStats) {
        let mut stats = SolveStats::new();
        let outcome = self.solve_with_stats(&mut NullObserver, &mut stats);
        (outcome, stats)
    }

    /// Runs the search to termination, reporting every committed change to
    /// `observer` and accumulating counters into `stats`.
    pub fn solve_with_stats(
        &mut self,
        observer: &mut dyn SearchObserver,
        stats: &mut SolveStats,
    ) -> SolveOutcome {
        while self.step(observer, stats) {}
        match self.state {
            SolveState::Solved => SolveOutcome::Solved,
            SolveState::Unsolvable => SolveOutcome::Unsolvable,
            SolveState::Searching => unreachable!("step reported terminal while still searching"),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn grid(s: &str) -> Grid {
        let grid: Grid = s.parse().unwrap();
        grid.check_valid().unwrap();
        grid
    }

    fn values(grid: &Grid) -> Vec<Option<usize>> {
        grid.rows().flatten().map(|cell| cell.value()).collect()
    }

    /// Records every observer event and checks the backtrack contract as it
    /// happens: each undo restores exactly the grid that the matching
    /// advance committed, and the scan resumes strictly above the value the
    /// popped snapshot recorded.
    #[derive(Debug, Default)]
    struct Recording {
        advances: Vec<(usize, usize, usize, Grid)>,
        resumed: Option<(usize, usize, usize)>,
        pops: usize,
    }

    impl SearchObserver for Recording {
        fn on_advance(&mut self, grid: &Grid, row: usize, col: usize, value: usize) {
            if let Some((r, c, tried)) = self.resumed.take() {
                assert_eq!((row, col), (r, c), "resumed scan moved to a different cell");
                assert!(
                    value > tried,
                    "resumed candidate {value} not above previously tried {tried}"
                );
            }
            self.advances.push((row, col, value, grid.clone()));
        }

        fn on_backtrack(&mut self, grid: &Grid, row: usize, col: usize) {
            let (r, c, value, committed) = self.advances.pop().expect("pop without matching push");
            assert_eq!((row, col), (r, c), "undid a different cell than last filled");
            assert_eq!(grid, &committed, "restore did not reproduce the pushed state");
            self.resumed = Some((row, col, value));
            self.pops += 1;
        }
    }

    #[test]
    fn solves_trivial_one_cell_square() {
        // Scenario: size 1, single empty cell.
        let mut solver = Solver::new(grid("1 0"));
        let (outcome, stats) = solver.solve();

        assert_eq!(outcome, SolveOutcome::Solved);
        assert_eq!(values(solver.grid()), vec![Some(1)]);
        assert_eq!(stats.steps(), 1);
        assert_eq!(stats.pushes(), 1);
        assert_eq!(stats.pops(), 0);
    }

    #[test]
    fn solves_unique_two_by_two_completion() {
        let mut solver = Solver::new(grid("2  1 0  0 0"));
        let (outcome, _stats) = solver.solve();

        assert_eq!(outcome, SolveOutcome::Solved);
        assert_eq!(
            values(solver.grid()),
            vec![Some(1), Some(2), Some(2), Some(1)]
        );
    }

    #[test]
    fn already_complete_grid_takes_zero_steps() {
        let mut solver = Solver::new(grid("2  1 2  2 1"));
        assert!(solver.state().is_solved());

        let (outcome, stats) = solver.solve();
        assert_eq!(outcome, SolveOutcome::Solved);
        assert!(!stats.has_progress());
        assert_eq!(solver.history_depth(), 0);
    }

    #[test]
    fn empty_three_by_three_solves_with_one_backtrack() {
        // Lowest-value-first on an empty 3×3 dead-ends once, at (1, 2),
        // before settling on the cyclic square.
        let mut solver = Solver::new(grid("3  0 0 0  0 0 0  0 0 0"));
        let (outcome, stats) = solver.solve();

        assert_eq!(outcome, SolveOutcome::Solved);
        assert_eq!(
            values(solver.grid()),
            [1, 2, 3, 2, 3, 1, 3, 1, 2].map(Some).to_vec()
        );
        assert_eq!(stats.pops(), 1);
        assert_eq!(stats.pushes(), 10);
        assert_eq!(stats.steps(), stats.pushes() + stats.pops());
    }

    #[test]
    fn reports_unsolvable_with_empty_history() {
        // Row 1 needs its 3 at (1, 2), but column 2's clue already has it;
        // the search exhausts every row-0 arrangement before giving up.
        let mut solver = Solver::new(grid("3  0 0 0  1 2 0  0 0 3"));
        let (outcome, stats) = solver.solve();

        assert_eq!(outcome, SolveOutcome::Unsolvable);
        assert_eq!(solver.history_depth(), 0);
        assert!(stats.pops() > 0);
        assert_eq!(stats.steps(), stats.pushes() + stats.pops() + 1);
    }

    #[test]
    fn unsolvable_at_first_cell_without_any_push() {
        // (0, 2) admits no value at all: 1 and 2 clash in the row, 3 in the
        // column. Nothing was ever pushed.
        let mut solver = Solver::new(grid("3  1 2 0  0 0 3  0 0 0"));
        let (outcome, stats) = solver.solve();

        assert_eq!(outcome, SolveOutcome::Unsolvable);
        assert_eq!(stats.pushes(), 0);
        assert_eq!(stats.pops(), 0);
        assert_eq!(stats.steps(), 1);
    }

    #[test]
    fn backtracks_restore_pushed_states_and_resume_above() {
        let mut solver = Solver::new(grid("3  0 0 0  1 2 0  0 0 3"));
        let mut recording = Recording::default();
        let mut stats = SolveStats::new();

        let outcome = solver.solve_with_stats(&mut recording, &mut stats);

        assert_eq!(outcome, SolveOutcome::Unsolvable);
        assert_eq!(recording.pops, stats.pops());
        assert!(recording.advances.is_empty(), "every push was undone");
    }

    #[test]
    fn history_balance_on_solved() {
        let start = grid("4  -1 0 0 0  0 0 0 0  0 0 -3 0  0 0 0 0");
        let empty_at_start = start.empty_count();

        let mut solver = Solver::new(start);
        let mut recording = Recording::default();
        let mut stats = SolveStats::new();
        let outcome = solver.solve_with_stats(&mut recording, &mut stats);

        assert_eq!(outcome, SolveOutcome::Solved);
        assert_eq!(stats.pushes() - stats.pops(), empty_at_start);
        assert_eq!(solver.history_depth(), empty_at_start);
    }

    #[test]
    fn givens_survive_the_search() {
        let start = grid("3  -1 0 0  0 -2 0  0 0 -3");
        let mut solver = Solver::new(start.clone());
        let (outcome, _stats) = solver.solve();

        assert_eq!(outcome, SolveOutcome::Solved);
        for row in 0..start.size() {
            for col in 0..start.size() {
                if start.get(row, col).is_given() {
                    assert_eq!(solver.grid().get(row, col), start.get(row, col));
                }
            }
        }
    }

    #[test]
    fn step_is_inert_after_termination() {
        let mut solver = Solver::new(grid("1 0"));
        let mut stats = SolveStats::new();

        while solver.step(&mut NullObserver, &mut stats) {}
        let steps_at_end = stats.steps();

        assert!(!solver.step(&mut NullObserver, &mut stats));
        assert_eq!(stats.steps(), steps_at_end);
    }

    /// A cyclic Latin square with a random subset of cells blanked out. The
    /// intact cells become given clues, so the cyclic completion always
    /// exists and the solver must reach `Solved`.
    fn arb_blanked_cyclic() -> impl Strategy<Value = Grid> {
        (1..=4_usize).prop_flat_map(|size| {
            proptest::collection::vec(proptest::bool::ANY, size * size).prop_map(move |blank| {
                let mut grid = Grid::empty(size);
                for row in 0..size {
                    for col in 0..size {
                        if !blank[row * size + col] {
                            grid.set(row, col, Cell::Given((row + col) % size + 1));
                        }
                    }
                }
                grid
            })
        })
    }

    proptest! {
        #[test]
        fn completable_inputs_always_reach_solved(start in arb_blanked_cyclic()) {
            prop_assert!(start.check_valid().is_ok());
            let empty_at_start = start.empty_count();

            let mut solver = Solver::new(start.clone());
            let mut recording = Recording::default();
            let mut stats = SolveStats::new();
            let outcome = solver.solve_with_stats(&mut recording, &mut stats);

            prop_assert_eq!(outcome, SolveOutcome::Solved);
            prop_assert!(solver.grid().is_complete());
            prop_assert!(solver.grid().check_valid().is_ok());
            prop_assert_eq!(stats.pushes() - stats.pops(), empty_at_start);
            prop_assert_eq!(solver.history_depth(), empty_at_start);
            for row in 0..start.size() {
                for col in 0..start.size() {
                    if start.get(row, col).is_given() {
                        prop_assert_eq!(solver.grid().get(row, col), start.get(row, col));
                    }
                }
            }
        }
    }
}
