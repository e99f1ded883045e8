#![forbid(unsafe_code)]
//! # edtrace
//!
//! Minimum **edit distance** between two sequences, together with **every**
//! optimal edit script that achieves it.
//!
//! The distance comes from the textbook Wagner–Fischer table. Each cell keeps
//! all tied operations, and a fork-on-tie backtrace recovers every optimal
//! sequence of insertions, deletions, substitutions and (optionally) matches.
//!
//! ## Highlights
//! - **Generic symbols**: any `T: PartialEq` slice, not just `char`s.
//! - **All solutions**: ties are never broken arbitrarily.
//! - **Lazy enumeration**: [`Solutions`] is an iterator, so output can be capped.
//! - **Unit costs only**: every edit costs 1, a match costs 0.
//!
//! ## Examples
//! ```rust
//! let a: Vec<char> = "kitten".chars().collect();
//! let b: Vec<char> = "sitting".chars().collect();
//! let table = edtrace::compute_edit_distance(&a, &b);
//! assert_eq!(edtrace::minimum_distance(&table), 3);
//! for s in edtrace::enumerate_solutions(&table, false) {
//!     assert_eq!(s.apply(&a, &b).unwrap(), b);
//!     for line in s.describe(&a, &b).unwrap() { println!("{line}"); }
//! }
//! ```
//!
//! ## Version
//! See [`VERSION`].

pub mod error;
pub mod operation;
pub mod table;
pub mod solution;
pub mod render;
pub mod batch;
pub mod logging;

pub use error::EditError;
pub use operation::{Coord, OperationKind, OperationSet, OperationStep};
pub use solution::{enumerate_solutions, Solution, Solutions};
pub use table::{Cell, DistanceTable};

/// Build the distance table for `a` → `b`.
///
/// # Examples
/// ```
/// let t = edtrace::compute_edit_distance(b"flaw", b"lawn");
/// assert_eq!(t.distance(), 2);
/// ```
pub fn compute_edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> DistanceTable {
    DistanceTable::build(a, b)
}

/// The minimum edit distance recorded in `table`.
pub fn minimum_distance(table: &DistanceTable) -> usize {
    table.distance()
}

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
