//! Tabular views of a distance table and its solutions as Polars `DataFrame`s.
//!
//! The frames are meant for display (`println!("{df}")`) or for `CsvWriter`.
use core::fmt;

use polars::prelude::*;

use crate::error::EditError;
use crate::operation::Coord;
use crate::solution::Solution;
use crate::table::DistanceTable;

/// The DP grid: one row per prefix of `a`, one column per prefix of `b`.
///
/// The first column (`a`) labels each row with `a[i-1]` (blank for `i = 0`).
/// Value columns are headed `"{j} {b[j-1]}"`, or `"0"` for the empty prefix;
/// the index keeps headers unique when `b` repeats a symbol.
///
/// `a` and `b` must be the sequences the table was built from; other lengths
/// are a `ShapeMismatch` error.
pub fn grid_frame<T: fmt::Display>(
    table: &DistanceTable,
    a: &[T],
    b: &[T],
) -> PolarsResult<DataFrame> {
    let (rows, cols) = table.dims();
    if a.len() + 1 != rows || b.len() + 1 != cols {
        return Err(PolarsError::ShapeMismatch(
            format!(
                "table is {rows}x{cols} but sequences have lengths {} and {}",
                a.len(),
                b.len()
            )
            .into(),
        ));
    }
    let labels: Vec<String> = std::iter::once(String::new())
        .chain(a.iter().map(|s| s.to_string()))
        .collect();

    let mut columns = Vec::with_capacity(cols + 1);
    columns.push(Series::new("a".into(), labels));
    let headers = std::iter::once("0".to_string())
        .chain(b.iter().enumerate().map(|(j, s)| format!("{} {s}", j + 1)));
    for (j, header) in headers.enumerate() {
        let values: Vec<u64> =
            (0..rows).map(|i| table[Coord::new(i, j)].value as u64).collect();
        columns.push(Series::new(header.as_str().into(), values));
    }
    DataFrame::new(columns)
}

/// All solutions in long format, one row per step.
///
/// Columns: `solution`, `step`, `i`, `j`, `operation`, `description`.
/// Solutions with no steps contribute no rows.
pub fn solutions_frame<T: fmt::Display>(
    solutions: &[Solution],
    a: &[T],
    b: &[T],
) -> anyhow::Result<DataFrame> {
    let mut solution_v = Vec::<u64>::new();
    let mut step_v = Vec::<u64>::new();
    let mut i_v = Vec::<u64>::new();
    let mut j_v = Vec::<u64>::new();
    let mut op_v = Vec::<String>::new();
    let mut desc_v = Vec::<String>::new();

    for (n, sol) in solutions.iter().enumerate() {
        for (k, step) in sol.iter().enumerate() {
            solution_v.push(n as u64);
            step_v.push(k as u64);
            i_v.push(step.at.i as u64);
            j_v.push(step.at.j as u64);
            op_v.push(step.kind.label().to_string());
            desc_v.push(step.describe(a, b)?);
        }
    }

    let df = df!(
        "solution"    => solution_v,
        "step"        => step_v,
        "i"           => i_v,
        "j"           => j_v,
        "operation"   => op_v,
        "description" => desc_v,
    )?;
    Ok(df)
}

/// Plain-text listing of one solution: each step's `(i,j)` followed by its
/// description. The coordinate tells apart steps that read alike, such as
/// the two ways of deleting one `'a'` from `"aa"`.
pub fn solution_lines<T: fmt::Display>(
    solution: &Solution,
    a: &[T],
    b: &[T],
) -> Result<Vec<String>, EditError> {
    solution
        .iter()
        .map(|step| Ok(format!("{:<9} {}", step.at.to_string(), step.describe(a, b)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::enumerate_solutions;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn grid_has_a_label_column_and_one_column_per_prefix() {
        let (a, b) = (chars("ab"), chars("baa"));
        let t = DistanceTable::build(&a, &b);
        let df = grid_frame(&t, &a, &b).unwrap();
        assert_eq!(df.shape(), (3, 5));
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["a", "0", "1 b", "2 a", "3 a"]);
        let last = df.column("3 a").unwrap().u64().unwrap();
        assert_eq!(last.get(2), Some(t.distance() as u64));
        assert_eq!(last.get(0), Some(3));
    }

    #[test]
    fn grid_rejects_sequences_of_other_lengths() {
        let t = DistanceTable::build(&['a', 'b'], &['c']);
        assert!(matches!(grid_frame(&t, &['a'], &['c']), Err(PolarsError::ShapeMismatch(_))));
        assert!(grid_frame(&t, &['a', 'b'], &['c', 'd']).is_err());
        assert!(grid_frame(&t, &['a', 'b'], &['c']).is_ok());
    }

    #[test]
    fn initialised_grid_has_only_the_base_row_and_column() {
        let (a, b) = (chars("ab"), chars("xyz"));
        let df = grid_frame(&DistanceTable::initialised(a.len(), b.len()), &a, &b).unwrap();
        assert_eq!(df.shape(), (3, 5));
        let base_col = df.column("0").unwrap().u64().unwrap();
        assert_eq!(base_col.into_iter().flatten().collect::<Vec<_>>(), vec![0, 1, 2]);
        let inner = df.column("2 y").unwrap().u64().unwrap();
        assert_eq!(inner.into_iter().flatten().collect::<Vec<_>>(), vec![2, 0, 0]);
    }

    #[test]
    fn solutions_long_format() {
        let (a, b) = (chars("ab"), chars("ba"));
        let t = DistanceTable::build(&a, &b);
        let sols = enumerate_solutions(&t, true);
        let df = solutions_frame(&sols, &a, &b).unwrap();
        let total_steps: usize = sols.iter().map(Solution::len).sum();
        assert_eq!(df.height(), total_steps);
        assert_eq!(df.width(), 6);
        let descs = df.column("description").unwrap().str().unwrap();
        assert!(descs.into_iter().flatten().any(|d| d == "Substitute 'a' for 'b'"));
    }

    #[test]
    fn solution_lines_tell_alike_steps_apart() {
        let (a, b) = (chars("aa"), chars("a"));
        let t = DistanceTable::build(&a, &b);
        let sols = enumerate_solutions(&t, false);
        assert_eq!(sols.len(), 2);
        let rendered: Vec<Vec<String>> =
            sols.iter().map(|s| solution_lines(s, &a, &b).unwrap()).collect();
        assert_eq!(sols[0].describe(&a, &b), sols[1].describe(&a, &b));
        assert_ne!(rendered[0], rendered[1]);
        let mut all: Vec<String> = rendered.into_iter().flatten().collect();
        all.sort();
        assert_eq!(all, vec!["(1,0)     Delete 'a'", "(2,1)     Delete 'a'"]);
    }

    #[test]
    fn identical_inputs_without_noops_have_no_rows() {
        let a = chars("abc");
        let t = DistanceTable::build(&a, &a);
        let df = solutions_frame(&enumerate_solutions(&t, false), &a, &a).unwrap();
        assert_eq!(df.height(), 0);
    }
}
