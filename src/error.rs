//! Error type shared by the table, enumeration and rendering layers.
use crate::operation::{Coord, OperationKind};

/// Errors returned by `edtrace` library calls.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// A dependency rule was applied where the cell has no predecessor,
    /// i.e. at the origin or on an edge the rule would step off.
    #[error("{kind} has no predecessor at {at}")]
    NoPredecessor { kind: OperationKind, at: Coord },
    /// A step refers to a symbol outside the sequences it is rendered against.
    #[error("step {kind} at {at} lies outside sequences of length {m} and {n}")]
    StepOutOfBounds {
        kind: OperationKind,
        at: Coord,
        m: usize,
        n: usize,
    },
    /// Consecutive steps of a solution are not joined by matches along the table.
    #[error("solution jumps from {from} to {to}")]
    Discontinuous { from: Coord, to: Coord },
    /// A match (recorded NoOp or implicit diagonal) pairs two different symbols.
    #[error("symbols at {at} do not match")]
    Mismatch { at: Coord },
}
