//! Enumeration of **every** optimal edit script recorded in a [`DistanceTable`].
//!
//! The walk starts at `(m, n)` and follows recorded operations back to the
//! origin. Where a cell holds several tied operations the first continues the
//! current branch and each other one forks an owned copy onto a work-list, so
//! branches never share mutable state. The work-list replaces recursion, so
//! long inputs cannot exhaust the stack.
//!
//! NoOp (match) steps can be suppressed. A suppressed NoOp still moves the
//! walk diagonally; it just is not written to the output. Because every step
//! carries its coordinate, removing NoOps never makes two solutions equal.
//!
//! The number of solutions can grow exponentially with the number of ties.
//! [`Solutions`] is lazy, so callers that need a bound can `take(n)`.
//!
//! # Examples
//! ```
//! use edtrace::{compute_edit_distance, enumerate_solutions};
//! let a: Vec<char> = "ab".chars().collect();
//! let b: Vec<char> = "ba".chars().collect();
//! let table = compute_edit_distance(&a, &b);
//! let all = enumerate_solutions(&table, false);
//! assert_eq!(all.len(), 3);
//! assert!(all.iter().all(|s| s.cost() == 2));
//! ```
use core::fmt;

use tracing::{debug, info, trace};

use crate::error::EditError;
use crate::operation::{Coord, OperationKind, OperationStep};
use crate::table::DistanceTable;

/// One complete optimal edit script, in forward application order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Solution {
    steps: Vec<OperationStep>,
}

impl Solution {
    pub fn steps(&self) -> &[OperationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OperationStep> {
        self.steps.iter()
    }

    /// Sum of step costs. Equals the table distance for every enumerated solution.
    pub fn cost(&self) -> usize {
        self.steps.iter().map(|s| s.kind.cost()).sum()
    }

    /// The same script with NoOp steps dropped.
    pub fn without_noops(&self) -> Solution {
        Solution {
            steps: self
                .steps
                .iter()
                .copied()
                .filter(|s| s.kind != OperationKind::NoOp)
                .collect(),
        }
    }

    /// One rendered line per step, see [`OperationStep::describe`].
    pub fn describe<T: fmt::Display>(
        &self,
        a: &[T],
        b: &[T],
    ) -> Result<Vec<String>, EditError> {
        self.steps.iter().map(|s| s.describe(a, b)).collect()
    }

    /// Replay the script on `a`, producing the edited sequence.
    ///
    /// Gaps between consecutive steps must be diagonal runs of matching
    /// symbols; they are the matches suppressed during enumeration and are
    /// copied from `a`. Recorded NoOps must match too. For any solution
    /// enumerated from `DistanceTable::build(a, b)` the result equals `b`.
    pub fn apply<T: Clone + PartialEq>(&self, a: &[T], b: &[T]) -> Result<Vec<T>, EditError> {
        let mut out = Vec::with_capacity(b.len());
        let mut at = Coord::ORIGIN;
        for step in &self.steps {
            if step.at.i > a.len() || step.at.j > b.len() {
                return Err(EditError::StepOutOfBounds {
                    kind: step.kind,
                    at: step.at,
                    m: a.len(),
                    n: b.len(),
                });
            }
            let from = step.kind.try_predecessor(step.at)?;
            copy_matches(&mut out, a, b, at, from)?;
            match step.kind {
                OperationKind::Insertion | OperationKind::Substitution => {
                    out.push(b[step.at.j - 1].clone())
                }
                OperationKind::NoOp => {
                    if a[step.at.i - 1] != b[step.at.j - 1] {
                        return Err(EditError::Mismatch { at: step.at });
                    }
                    out.push(a[step.at.i - 1].clone())
                }
                OperationKind::Deletion => {}
            }
            at = step.at;
        }
        copy_matches(&mut out, a, b, at, Coord::new(a.len(), b.len()))?;
        Ok(out)
    }
}

/// Copy the implicit diagonal run `from..to` out of `a`, checking each
/// symbol against `b`.
fn copy_matches<T: Clone + PartialEq>(
    out: &mut Vec<T>,
    a: &[T],
    b: &[T],
    from: Coord,
    to: Coord,
) -> Result<(), EditError> {
    let diagonal = to.i >= from.i && to.j >= from.j && to.i - from.i == to.j - from.j;
    if !diagonal {
        return Err(EditError::Discontinuous { from, to });
    }
    for k in 0..to.i - from.i {
        let (x, y) = (&a[from.i + k], &b[from.j + k]);
        if x != y {
            let at = Coord::new(from.i + k + 1, from.j + k + 1);
            return Err(EditError::Mismatch { at });
        }
        out.push(x.clone());
    }
    Ok(())
}

impl<'a> IntoIterator for &'a Solution {
    type Item = &'a OperationStep;
    type IntoIter = std::slice::Iter<'a, OperationStep>;
    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// A partially walked path.
#[derive(Clone, Debug)]
struct Branch {
    /// Recorded steps, newest last (backward order).
    steps: Vec<OperationStep>,
    /// The step the walk currently stands on, recorded or not.
    cursor: OperationStep,
}

impl Branch {
    fn seed(cursor: OperationStep, include_noops: bool) -> Self {
        let mut b = Branch {
            steps: Vec::new(),
            cursor,
        };
        b.record(include_noops);
        b
    }

    fn advance(&mut self, next: OperationStep, include_noops: bool) {
        self.cursor = next;
        self.record(include_noops);
    }

    fn record(&mut self, include_noops: bool) {
        if self.cursor.kind == OperationKind::NoOp && !include_noops {
            debug!(at = %self.cursor.at, "walking through NoOp");
        } else {
            self.steps.push(self.cursor);
        }
    }
}

/// Lazy depth-first enumeration of optimal scripts; see the module docs.
#[derive(Debug)]
pub struct Solutions<'t> {
    table: &'t DistanceTable,
    include_noops: bool,
    pending: Vec<Branch>,
    /// `a` and `b` both empty: one script with no steps.
    trivial: bool,
}

impl<'t> Solutions<'t> {
    pub fn new(table: &'t DistanceTable, include_noops: bool) -> Self {
        let end = table.end();
        let ops = table[end].operations;
        // Seed in reverse so the work-list pops the canonical first kind first.
        let pending: Vec<Branch> = ops
            .iter()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .map(|kind| Branch::seed(OperationStep::new(end, kind), include_noops))
            .collect();
        debug!(at = %end, seeds = pending.len(), "seeded backtrace");
        Solutions {
            table,
            include_noops,
            pending,
            trivial: end.is_origin(),
        }
    }

    /// Walk `branch` to the origin, pushing a fork for every extra tied operation.
    fn complete(&mut self, mut branch: Branch) -> Solution {
        loop {
            let at = branch.cursor.source();
            if at.is_origin() {
                branch.steps.reverse();
                return Solution {
                    steps: branch.steps,
                };
            }

            let mut ops = self.table[at].operations.iter();
            let Some(first) = ops.next() else {
                panic!("cell {at} away from the origin records no operation");
            };
            for kind in ops {
                debug!(at = %at, %kind, "forking branch");
                let mut fork = branch.clone();
                fork.advance(OperationStep::new(at, kind), self.include_noops);
                self.pending.push(fork);
            }
            trace!(at = %at, kind = %first, "advancing branch");
            branch.advance(OperationStep::new(at, first), self.include_noops);
        }
    }
}

impl Iterator for Solutions<'_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        if self.trivial {
            self.trivial = false;
            return Some(Solution::default());
        }
        let branch = self.pending.pop()?;
        Some(self.complete(branch))
    }
}

/// Collect every optimal script of `table`.
///
/// With `include_noops == false` matched symbols are left out of each script.
pub fn enumerate_solutions(table: &DistanceTable, include_noops: bool) -> Vec<Solution> {
    let all: Vec<Solution> = Solutions::new(table, include_noops).collect();
    info!(solutions = all.len(), include_noops, "computed solution(s)");
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use OperationKind::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn solve(a: &str, b: &str, include_noops: bool) -> (Vec<char>, Vec<char>, Vec<Solution>) {
        let (a, b) = (chars(a), chars(b));
        let t = DistanceTable::build(&a, &b);
        let s = enumerate_solutions(&t, include_noops);
        (a, b, s)
    }

    fn kinds(s: &Solution) -> Vec<OperationKind> {
        s.iter().map(|st| st.kind).collect()
    }

    #[test]
    fn insertions_from_empty() {
        let (a, b, s) = solve("", "abc", false);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].describe(&a, &b).unwrap(), vec!["Insert 'a'", "Insert 'b'", "Insert 'c'"]);
    }

    #[test]
    fn deletions_to_empty() {
        let (_, _, s) = solve("abcd", "", true);
        assert_eq!(s.len(), 1);
        assert_eq!(kinds(&s[0]), vec![Deletion; 4]);
    }

    #[test]
    fn identical_inputs() {
        let (_, _, s) = solve("abc", "abc", false);
        assert_eq!(s, vec![Solution::default()]);

        let (a, b, s) = solve("abc", "abc", true);
        assert_eq!(s.len(), 1);
        assert_eq!(
            s[0].describe(&a, &b).unwrap(),
            vec!["NoOp 'a' = 'a'", "NoOp 'b' = 'b'", "NoOp 'c' = 'c'"]
        );
        assert_eq!(s[0].cost(), 0);
    }

    #[test]
    fn both_empty_yields_one_empty_script() {
        let (_, _, s) = solve("", "", true);
        assert_eq!(s, vec![Solution::default()]);
    }

    #[test]
    fn swapped_pair_has_three_scripts() {
        let (a, b, s) = solve("ab", "ba", true);
        let rendered: BTreeSet<Vec<String>> =
            s.iter().map(|s| s.describe(&a, &b).unwrap()).collect();
        let expected: BTreeSet<Vec<String>> = [
            vec!["Delete 'a'", "NoOp 'b' = 'b'", "Insert 'a'"],
            vec!["Insert 'b'", "NoOp 'a' = 'a'", "Delete 'b'"],
            vec!["Substitute 'a' for 'b'", "Substitute 'b' for 'a'"],
        ]
        .into_iter()
        .map(|v| v.into_iter().map(String::from).collect())
        .collect();
        assert_eq!(rendered, expected);
    }

    #[test]
    fn suppressing_noops_equals_filtering_them() {
        for (a, b) in [("ab", "ba"), ("kitten", "sitting"), ("aab", "ab"), ("abcab", "bcaba")] {
            let (_, _, with) = solve(a, b, true);
            let (_, _, without) = solve(a, b, false);
            let filtered: BTreeSet<Solution> = with.iter().map(Solution::without_noops).collect();
            let direct: BTreeSet<Solution> = without.iter().cloned().collect();
            assert_eq!(direct.len(), without.len(), "duplicates for {a} -> {b}");
            assert_eq!(filtered, direct, "{a} -> {b}");
        }
    }

    #[test]
    fn every_script_applies_and_costs_the_distance() {
        for include_noops in [true, false] {
            let (a, b, s) = solve("kitten", "sitting", include_noops);
            assert!(!s.is_empty());
            for sol in &s {
                assert_eq!(sol.cost(), 3);
                assert_eq!(sol.apply(&a, &b).unwrap(), b);
            }
        }
    }

    #[test]
    fn noop_only_cells_do_not_end_a_path() {
        // The middle 'x' is a NoOp-only diagonal; the path must pass it.
        let (a, b, s) = solve("axb", "cxd", false);
        assert_eq!(s.len(), 1);
        assert_eq!(
            s[0].describe(&a, &b).unwrap(),
            vec!["Substitute 'a' for 'c'", "Substitute 'b' for 'd'"]
        );
        assert_eq!(s[0].apply(&a, &b).unwrap(), b);
    }

    #[test]
    fn enumeration_is_deterministic() {
        let (_, _, first) = solve("abcab", "bcaba", true);
        let (_, _, second) = solve("abcab", "bcaba", true);
        assert_eq!(first, second);
    }

    #[test]
    fn lazy_iterator_can_be_capped() {
        let (a, b) = (chars("ab"), chars("ba"));
        let t = DistanceTable::build(&a, &b);
        assert_eq!(Solutions::new(&t, true).count(), 3);
        assert_eq!(Solutions::new(&t, true).take(2).count(), 2);
    }

    fn script(steps: &[(usize, usize, OperationKind)]) -> Solution {
        let steps = steps
            .iter()
            .map(|&(i, j, kind)| OperationStep::new(Coord::new(i, j), kind))
            .collect();
        Solution { steps }
    }

    fn mismatch(i: usize, j: usize) -> EditError {
        EditError::Mismatch {
            at: Coord::new(i, j),
        }
    }

    #[test]
    fn apply_rejects_a_jump() {
        let (a, b) = (chars("ab"), chars("cd"));
        let broken = script(&[(2, 1, Substitution)]);
        assert!(matches!(broken.apply(&a, &b), Err(EditError::Discontinuous { .. })));
        let outside = script(&[(3, 3, Substitution)]);
        assert!(matches!(outside.apply(&a, &b), Err(EditError::StepOutOfBounds { .. })));
    }

    #[test]
    fn apply_rejects_gaps_over_different_symbols() {
        let (a, b) = (chars("ab"), chars("cd"));
        assert_eq!(Solution::default().apply(&a, &b), Err(mismatch(1, 1)));

        // Only (1,1) is edited; the implicit match at (2,2) pairs 'b' with 'd'.
        let partial = script(&[(1, 1, Substitution)]);
        assert_eq!(partial.apply(&a, &b), Err(mismatch(2, 2)));

        let (a, b) = (chars("ab"), chars("cb"));
        assert_eq!(partial.apply(&a, &b), Ok(chars("cb")));
    }

    #[test]
    fn apply_rejects_a_noop_over_different_symbols() {
        let (a, b) = (chars("a"), chars("c"));
        let forged = script(&[(1, 1, NoOp)]);
        assert_eq!(forged.apply(&a, &b), Err(mismatch(1, 1)));
    }
}
