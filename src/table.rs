//! Wagner–Fischer distance table.
//!
//! [`DistanceTable::build`] tabulates every prefix pair of the two inputs.
//! Each [`Cell`] keeps its minimal cost plus **every** operation kind that
//! attains it, so the backtrace in [`crate::solution`] can recover all optimal
//! scripts rather than one.
//!
//! Time and memory are both `O(m·n)`; there is no linear-space variant.
//!
//! # Examples
//! ```
//! use edtrace::table::DistanceTable;
//! let a: Vec<char> = "kitten".chars().collect();
//! let b: Vec<char> = "sitting".chars().collect();
//! let t = DistanceTable::build(&a, &b);
//! assert_eq!(t.distance(), 3);
//! assert_eq!(t.dims(), (7, 8));
//! ```
use std::ops::Index;

use tracing::{debug, info};

use crate::operation::{Coord, OperationKind, OperationSet};

/// One entry of the table.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Cell {
    /// Minimum cost of turning `a[..i]` into `b[..j]`.
    pub value: usize,
    /// Kinds that reach `value` from their predecessor cell. Empty only at the origin.
    pub operations: OperationSet,
}

/// Dense `(m+1) × (n+1)` grid of [`Cell`]s, stored row-major.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistanceTable {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl DistanceTable {
    /// A table for inputs of lengths `m` and `n` with only the base row and
    /// column filled; every inner cell is zero with no operations.
    pub fn initialised(m: usize, n: usize) -> Self {
        let cols = n + 1;
        let mut cells = vec![Cell::default(); (m + 1) * cols];
        for i in 1..=m {
            cells[i * cols] = Cell {
                value: i * OperationKind::Deletion.cost(),
                operations: OperationSet::only(OperationKind::Deletion),
            };
        }
        for j in 1..=n {
            cells[j] = Cell {
                value: j * OperationKind::Insertion.cost(),
                operations: OperationSet::only(OperationKind::Insertion),
            };
        }
        DistanceTable {
            rows: m + 1,
            cols,
            cells,
        }
    }

    /// Tabulate minimal costs and tied operations for `a` → `b`.
    pub fn build<T: PartialEq>(a: &[T], b: &[T]) -> Self {
        let (m, n) = (a.len(), b.len());
        info!(m, n, "computing edit distance table");
        let mut t = DistanceTable::initialised(m, n);
        debug!("initialised base row and column");

        for i in 1..=m {
            for j in 1..=n {
                let at = Coord::new(i, j);
                let matched = a[i - 1] == b[j - 1];
                let candidates = OperationKind::ALL
                    .into_iter()
                    .filter(|k| *k != OperationKind::NoOp || matched)
                    .map(|k| (t[k.predecessor(at)].value + k.cost(), k));

                let mut cell = Cell {
                    value: usize::MAX,
                    operations: OperationSet::EMPTY,
                };
                for (cost, kind) in candidates {
                    if cost < cell.value {
                        cell = Cell {
                            value: cost,
                            operations: OperationSet::only(kind),
                        };
                    } else if cost == cell.value {
                        cell.operations.insert(kind);
                    }
                }
                t.cells[i * t.cols + j] = cell;
            }
        }

        info!(distance = t.distance(), "edit distance table complete");
        t
    }

    /// `(m+1, n+1)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The bottom-right coordinate `(m, n)`.
    pub fn end(&self) -> Coord {
        Coord::new(self.rows - 1, self.cols - 1)
    }

    /// Minimum edit distance, the value at `(m, n)`.
    pub fn distance(&self) -> usize {
        self[self.end()].value
    }

    pub fn get(&self, at: Coord) -> Option<&Cell> {
        (at.i < self.rows && at.j < self.cols).then(|| &self.cells[at.i * self.cols + at.j])
    }

    /// Iterate one row of cells.
    pub fn row(&self, i: usize) -> &[Cell] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }
}

impl Index<Coord> for DistanceTable {
    type Output = Cell;

    fn index(&self, at: Coord) -> &Cell {
        match self.get(at) {
            Some(c) => c,
            None => panic!("coordinate {at} outside table of {}x{}", self.rows, self.cols),
        }
    }
}
