//! Core data model for Latin square puzzles.
//!
//! A Latin square of size `N` is an `N`×`N` grid in which every row and every
//! column contains each value `1..=N` exactly once. This crate provides the
//! mutable puzzle state ([`Grid`] of [`Cell`]s), text parsing with typed
//! errors, and the validity queries a search engine needs. The search itself
//! lives in `latisolve-solver`.
//!
//! # Examples
//!
//! ```
//! use latisolve_core::Grid;
//!
//! let grid: Grid = "2  -1 0  0 0".parse()?;
//! grid.check_valid()?;
//! assert_eq!(grid.find_first_empty(), Some((0, 1)));
//! assert!(grid.is_legal(0, 1, 2));
//! assert!(!grid.is_legal(0, 1, 1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod cell;
mod grid;

pub use self::{
    cell::Cell,
    grid::{Grid, InvalidSquareError, ParseGridError},
};
