//! Core types for **operation kinds**, **table coordinates** and **steps**.
//!
//! The four elementary edits form a closed enumeration. Each kind carries a
//! unit cost, a dependency rule mapping a cell to the cell it extends, and a
//! label used when rendering.
//!
//! # Examples
//! ```
//! use edtrace::operation::{Coord, OperationKind};
//! assert_eq!(OperationKind::Insertion.predecessor(Coord::new(2, 3)), Coord::new(2, 2));
//! assert_eq!(OperationKind::NoOp.cost(), 0);
//! ```
use core::fmt;

use crate::error::EditError;

/// A `(i, j)` position in the distance table: `i` symbols of the initial
/// sequence against `j` symbols of the final one.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Coord {
    pub i: usize,
    pub j: usize,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { i: 0, j: 0 };

    pub const fn new(i: usize, j: usize) -> Self {
        Coord { i, j }
    }

    pub const fn is_origin(self) -> bool {
        self.i == 0 && self.j == 0
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.i, self.j)
    }
}

/// Elementary edit operation.
///
/// Variant order is the canonical order used everywhere a set of kinds is
/// iterated, which keeps enumeration output reproducible.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum OperationKind {
    /// Insert `b[j-1]`; extends `(i, j-1)`.
    Insertion,
    /// Delete `a[i-1]`; extends `(i-1, j)`.
    Deletion,
    /// Replace `a[i-1]` with `b[j-1]`; extends `(i-1, j-1)`.
    Substitution,
    /// Keep `a[i-1]` which equals `b[j-1]`; extends `(i-1, j-1)` at no cost.
    NoOp,
}

impl OperationKind {
    /// All kinds in canonical order.
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Insertion,
        OperationKind::Deletion,
        OperationKind::Substitution,
        OperationKind::NoOp,
    ];

    /// Unit cost of the edit.
    pub const fn cost(self) -> usize {
        match self {
            OperationKind::Insertion | OperationKind::Deletion | OperationKind::Substitution => 1,
            OperationKind::NoOp => 0,
        }
    }

    /// Verb used in rendered steps.
    pub const fn label(self) -> &'static str {
        match self {
            OperationKind::Insertion => "Insert",
            OperationKind::Deletion => "Delete",
            OperationKind::Substitution => "Substitute",
            OperationKind::NoOp => "NoOp",
        }
    }

    /// `(di, dj)` subtracted from a coordinate to reach the cell this kind extends.
    pub const fn offset(self) -> (usize, usize) {
        match self {
            OperationKind::Insertion => (0, 1),
            OperationKind::Deletion => (1, 0),
            OperationKind::Substitution | OperationKind::NoOp => (1, 1),
        }
    }

    /// Coordinate of the cell this kind depends on when used to reach `at`.
    ///
    /// Returns [`EditError::NoPredecessor`] at the origin, or when the rule
    /// would leave the table (e.g. an insertion in column 0).
    pub fn try_predecessor(self, at: Coord) -> Result<Coord, EditError> {
        let (di, dj) = self.offset();
        match (at.i.checked_sub(di), at.j.checked_sub(dj)) {
            (Some(i), Some(j)) if !at.is_origin() => Ok(Coord { i, j }),
            _ => Err(EditError::NoPredecessor { kind: self, at }),
        }
    }

    /// Coordinate of the cell this kind depends on when used to reach `at`.
    ///
    /// # Panics
    /// If `at` has no predecessor under this rule. Correct traversal stops at
    /// the origin, so reaching this is a defect in the caller.
    pub fn predecessor(self, at: Coord) -> Coord {
        match self.try_predecessor(at) {
            Ok(c) => c,
            Err(e) => panic!("invalid coordinate dependency: {e}"),
        }
    }

    const fn bit(self) -> u8 {
        match self {
            OperationKind::Insertion => 0b0001,
            OperationKind::Deletion => 0b0010,
            OperationKind::Substitution => 0b0100,
            OperationKind::NoOp => 0b1000,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Set of operation kinds recorded in a table cell.
///
/// Iteration always follows [`OperationKind::ALL`] order regardless of the
/// order kinds were inserted.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct OperationSet(u8);

impl OperationSet {
    pub const EMPTY: OperationSet = OperationSet(0);

    pub const fn only(kind: OperationKind) -> Self {
        OperationSet(kind.bit())
    }

    pub fn insert(&mut self, kind: OperationKind) {
        self.0 |= kind.bit();
    }

    pub const fn contains(self, kind: OperationKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = OperationKind> {
        OperationKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl FromIterator<OperationKind> for OperationSet {
    fn from_iter<I: IntoIterator<Item = OperationKind>>(iter: I) -> Self {
        let mut set = OperationSet::EMPTY;
        for k in iter {
            set.insert(k);
        }
        set
    }
}

impl fmt::Debug for OperationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// One edge of a backtraced path: the kind used to reach `at` from its predecessor.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct OperationStep {
    pub at: Coord,
    pub kind: OperationKind,
}

impl OperationStep {
    pub const fn new(at: Coord, kind: OperationKind) -> Self {
        OperationStep { at, kind }
    }

    /// The cell this step starts from.
    ///
    /// # Panics
    /// See [`OperationKind::predecessor`].
    pub fn source(&self) -> Coord {
        self.kind.predecessor(self.at)
    }

    /// Render the step as a human phrase against the sequences it was built from.
    ///
    /// # Examples
    /// ```
    /// use edtrace::operation::{Coord, OperationKind, OperationStep};
    /// let a: Vec<char> = "kitten".chars().collect();
    /// let b: Vec<char> = "sitting".chars().collect();
    /// let s = OperationStep::new(Coord::new(1, 1), OperationKind::Substitution);
    /// assert_eq!(s.describe(&a, &b).unwrap(), "Substitute 'k' for 's'");
    /// ```
    pub fn describe<T: fmt::Display>(&self, a: &[T], b: &[T]) -> Result<String, EditError> {
        let out_of_bounds = || EditError::StepOutOfBounds {
            kind: self.kind,
            at: self.at,
            m: a.len(),
            n: b.len(),
        };
        let from_a = || self.at.i.checked_sub(1).and_then(|i| a.get(i)).ok_or_else(out_of_bounds);
        let from_b = || self.at.j.checked_sub(1).and_then(|j| b.get(j)).ok_or_else(out_of_bounds);
        let label = self.kind.label();
        Ok(match self.kind {
            OperationKind::Insertion => format!("{label} '{}'", from_b()?),
            OperationKind::Deletion => format!("{label} '{}'", from_a()?),
            OperationKind::Substitution => format!("{label} '{}' for '{}'", from_a()?, from_b()?),
            OperationKind::NoOp => format!("{label} '{}' = '{}'", from_a()?, from_b()?),
        })
    }
}
