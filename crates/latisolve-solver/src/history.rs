use latisolve_core::Grid;

/// A grid state captured immediately after a successful placement, tagged
/// with the cell that was filled to produce it.
///
/// Each snapshot owns an independent copy of the grid contents; mutating the
/// live grid after a push never disturbs it. On backtrack the snapshot is
/// consumed: its coordinates and stored cells are read, the grid is restored
/// from it, and the snapshot is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    grid: Grid,
    row: usize,
    col: usize,
}

impl Snapshot {
    /// Captures a snapshot of `grid` recording `(row, col)` as the cell whose
    /// placement produced this state.
    #[must_use]
    pub fn new(grid: Grid, row: usize, col: usize) -> Self {
        Self { grid, row, col }
    }

    /// The stored grid state.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Consumes the snapshot, yielding the stored grid.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Row of the cell filled to produce this snapshot.
    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column of the cell filled to produce this snapshot.
    #[must_use]
    pub fn col(&self) -> usize {
        self.col
    }

    /// The value the stored grid holds at the recorded cell.
    ///
    /// For snapshots taken by the solver this is always `Some`, since the
    /// recorded cell was just filled.
    #[must_use]
    pub fn placed_value(&self) -> Option<usize> {
        self.grid.get(self.row, self.col).value()
    }
}

/// An append-only LIFO of [`Snapshot`]s: one entry per successfully filled,
/// not-yet-undone cell.
///
/// The stack owns every stored snapshot; dropping it releases them all in
/// bulk, on solved and unsolvable exits alike.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    entries: Vec<Snapshot>,
}

impl HistoryStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a snapshot. Cost is dominated by the grid copy the caller made
    /// to build it, O(N²).
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot);
    }

    /// Removes and returns the most recent snapshot.
    ///
    /// `None` means there is no earlier decision left to revise — the
    /// unsolvable-detection signal.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop()
    }

    /// Current number of entries.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the stack has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
