use std::{fmt, str::FromStr};

use crate::Cell;

/// Errors produced while parsing puzzle text into a [`Grid`].
///
/// These cover malformed input only; a grid that parses but starts with
/// duplicate values in a row or column is reported separately as an
/// [`InvalidSquareError`] by [`Grid::check_valid`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGridError {
    /// The input ended before a square size could be read.
    #[display("cannot read square size")]
    MissingSize,
    /// A token could not be read as an integer.
    #[display("not a number: {token:?}")]
    InvalidToken {
        /// The offending token.
        token: String,
    },
    /// The square size is zero or negative.
    #[display("not a valid square size: {size}")]
    InvalidSize {
        /// The size value as read.
        size: i64,
    },
    /// A cell value's magnitude exceeds the square size.
    #[display("value {value} at row {row}, column {col} is out of range for size {size}")]
    ValueOutOfRange {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The value as read.
        value: i64,
        /// The square size.
        size: usize,
    },
    /// The input ended before `size * size` values were read.
    #[display("expected {expected} values, found only {found}")]
    MissingValues {
        /// Number of values the size line promised.
        expected: usize,
        /// Number of values actually present.
        found: usize,
    },
    /// Extra tokens remain after the expected `size * size` values.
    #[display("input contains more data than expected")]
    TrailingInput,
}

/// A duplicate value sharing a row or column in a starting grid.
///
/// This is a precondition violation of the puzzle input, distinct from both
/// malformed text ([`ParseGridError`]) and an unsolvable-but-valid puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidSquareError {
    /// Two cells in the same row hold the same value.
    #[display("duplicate value {value} in row {row}")]
    DuplicateInRow {
        /// The row containing the duplicate.
        row: usize,
        /// The duplicated value.
        value: usize,
    },
    /// Two cells in the same column hold the same value.
    #[display("duplicate value {value} in column {col}")]
    DuplicateInColumn {
        /// The column containing the duplicate.
        col: usize,
        /// The duplicated value.
        value: usize,
    },
}

/// A mutable `N`×`N` Latin square puzzle state.
///
/// Cells are stored row-major. The size is fixed at construction and any size
/// is supported; display ceilings are a renderer concern, not a model
/// concern.
///
/// The grid invariant — no two cells in a row or column share a value — holds
/// for accepted input and is restored after every committed placement. The
/// grid itself does not enforce it on [`set`](Grid::set); callers establish
/// it via [`check_valid`](Grid::check_valid) and preserve it by only
/// committing values that pass [`is_legal`](Grid::is_legal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of the given size with every cell empty.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    #[must_use]
    pub fn empty(size: usize) -> Self {
        assert!(size > 0, "square size must be positive");
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Returns the square size `N`.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "cell ({row}, {col}) out of bounds for size {}",
            self.size
        );
        row * self.size + col
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below the square size.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Replaces the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below the square size.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let index = self.index(row, col);
        self.cells[index] = cell;
    }

    /// Returns the first empty cell in row-major scan order, or `None` when
    /// the grid is fully filled.
    ///
    /// The scan order is deterministic so repeated runs on the same input
    /// reproduce the same search.
    #[must_use]
    pub fn find_first_empty(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(Cell::is_empty)
            .map(|index| (index / self.size, index % self.size))
    }

    /// Returns `true` iff no *other* cell in `row` or in `col` holds `value`.
    ///
    /// Given clues and search-assigned values are compared in one domain, so
    /// a candidate clashing with a clue is just as illegal as one clashing
    /// with an earlier search decision. The cell at `(row, col)` itself is
    /// ignored, which lets a caller probe replacement values for an
    /// already-filled cell.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below the square size.
    #[must_use]
    pub fn is_legal(&self, row: usize, col: usize, value: usize) -> bool {
        let _ = self.index(row, col);
        for c in 0..self.size {
            if c != col && self.get(row, c).value() == Some(value) {
                return false;
            }
        }
        for r in 0..self.size {
            if r != row && self.get(r, col).value() == Some(value) {
                return false;
            }
        }
        true
    }

    /// Returns `true` iff no cell is empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.cells.iter().any(|cell| cell.is_empty())
    }

    /// Returns the number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Returns the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.size)
    }

    /// Checks the duplicate-free invariant over every row and column.
    ///
    /// # Errors
    ///
    /// Returns the first duplicate found, rows before columns, with the value
    /// and the row or column index.
    ///
    /// # Examples
    ///
    /// ```
    /// use latisolve_core::{Grid, InvalidSquareError};
    ///
    /// let grid: Grid = "2  1 1  0 0".parse()?;
    /// assert_eq!(
    ///     grid.check_valid(),
    ///     Err(InvalidSquareError::DuplicateInRow { row: 0, value: 1 })
    /// );
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn check_valid(&self) -> Result<(), InvalidSquareError> {
        let mut seen = vec![false; self.size + 1];
        for row in 0..self.size {
            seen.fill(false);
            for col in 0..self.size {
                if let Some(value) = self.get(row, col).value() {
                    if seen[value] {
                        return Err(InvalidSquareError::DuplicateInRow { row, value });
                    }
                    seen[value] = true;
                }
            }
        }
        for col in 0..self.size {
            seen.fill(false);
            for row in 0..self.size {
                if let Some(value) = self.get(row, col).value() {
                    if seen[value] {
                        return Err(InvalidSquareError::DuplicateInColumn { col, value });
                    }
                    seen[value] = true;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    /// Parses whitespace-delimited puzzle text: the square size followed by
    /// `size * size` row-major integers. `0` marks an empty cell, a negative
    /// value a given clue, a positive value a pre-filled (search-style)
    /// value. Magnitudes must not exceed the size, and exactly `size * size`
    /// values must be present.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn parse_token(token: &str) -> Result<i64, ParseGridError> {
            token.parse().map_err(|_| ParseGridError::InvalidToken {
                token: token.to_owned(),
            })
        }

        let mut tokens = s.split_whitespace();

        let size = parse_token(tokens.next().ok_or(ParseGridError::MissingSize)?)?;
        if size < 1 {
            return Err(ParseGridError::InvalidSize { size });
        }
        let size = usize::try_from(size).map_err(|_| ParseGridError::InvalidSize { size })?;

        let expected = size * size;
        let mut cells = Vec::with_capacity(expected);
        for index in 0..expected {
            let (row, col) = (index / size, index % size);
            let value = parse_token(tokens.next().ok_or(ParseGridError::MissingValues {
                expected,
                found: index,
            })?)?;
            let out_of_range = ParseGridError::ValueOutOfRange {
                row,
                col,
                value,
                size,
            };
            let magnitude =
                usize::try_from(value.unsigned_abs()).map_err(|_| out_of_range.clone())?;
            if magnitude > size {
                return Err(out_of_range);
            }
            cells.push(match value {
                0 => Cell::Empty,
                v if v < 0 => Cell::Given(magnitude),
                _ => Cell::Filled(magnitude),
            });
        }

        if tokens.next().is_some() {
            return Err(ParseGridError::TrailingInput);
        }

        Ok(Self { size, cells })
    }
}

impl fmt::Display for Grid {
    /// Writes the grid back out in the input format: the size on one line,
    /// then one line per row with given clues negated. `parse` of the output
    /// reproduces the grid.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[expect(clippy::cast_possible_wrap)]
        fn signed(cell: Cell) -> i64 {
            match cell {
                Cell::Empty => 0,
                Cell::Given(value) => -(value as i64),
                Cell::Filled(value) => value as i64,
            }
        }

        writeln!(f, "{}", self.size)?;
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, &cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", signed(cell))?;
            }
        }
        Ok(())
    }
}
