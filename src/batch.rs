//! Batch evaluation of many `(initial, final)` pairs.
//!
//! Pairs are read from CSV or TSV (chosen by file extension, header row
//! required) and evaluated in a dedicated Rayon pool. Each pair runs the
//! sequential core on its own; nothing is shared between pairs.
//!
//! NoOp suppression never merges two scripts, so counts are taken without
//! NoOps. Solution counts can explode on inputs with many ties, so each pair's
//! enumeration is capped at [`BatchOpts::limit`] and flagged when cut short.
use std::io::Read;
use std::path::Path;

use polars::prelude::*;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::info;

use crate::solution::Solutions;
use crate::table::DistanceTable;

/// One input pair.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pair {
    pub initial: String,
    pub target: String,
}

/// Options for [`run_batch`].
#[derive(Clone, Debug)]
pub struct BatchOpts {
    /// Stop enumerating a pair after this many solutions.
    pub limit: usize,
    /// Worker threads (`None` = all logical cores).
    pub threads: Option<usize>,
}

impl Default for BatchOpts {
    fn default() -> Self {
        Self {
            limit: 10_000,
            threads: None,
        }
    }
}

/// Result row for one pair.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchRow {
    pub initial: String,
    pub target: String,
    pub distance: usize,
    /// Number of optimal scripts found, at most `limit`.
    pub solutions: usize,
    /// `true` if enumeration stopped at `limit`.
    pub truncated: bool,
}

/// Read pairs from the first two columns of `rdr`.
pub fn read_pairs<R: Read>(rdr: R, delimiter: u8) -> anyhow::Result<Vec<Pair>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(rdr);
    let mut pairs = Vec::new();
    for (n, rec) in rdr.records().enumerate() {
        let r = rec?;
        if r.len() < 2 {
            anyhow::bail!("record {} has {} field(s); expected initial and final", n + 1, r.len());
        }
        pairs.push(Pair {
            initial: r[0].to_string(),
            target: r[1].to_string(),
        });
    }
    Ok(pairs)
}

/// Load pairs from a CSV or TSV file.
pub fn load_pairs<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Pair>> {
    let p = path.as_ref();
    let delim = if p.extension().map(|e| e == "tsv").unwrap_or(false) { b'\t' } else { b',' };
    let f = std::fs::File::open(p)
        .map_err(|e| anyhow::anyhow!("cannot open {}: {e}", p.display()))?;
    read_pairs(f, delim)
}

fn evaluate(pair: &Pair, opts: &BatchOpts) -> BatchRow {
    let a: Vec<char> = pair.initial.chars().collect();
    let b: Vec<char> = pair.target.chars().collect();
    let table = DistanceTable::build(&a, &b);
    let found = Solutions::new(&table, false).take(opts.limit.saturating_add(1)).count();
    BatchRow {
        initial: pair.initial.clone(),
        target: pair.target.clone(),
        distance: table.distance(),
        solutions: found.min(opts.limit),
        truncated: found > opts.limit,
    }
}

/// Evaluate every pair in parallel, preserving input order.
pub fn run_batch(pairs: &[Pair], opts: &BatchOpts) -> anyhow::Result<Vec<BatchRow>> {
    let threads_n = opts.threads.unwrap_or_else(num_cpus::get).max(1);
    let pool = ThreadPoolBuilder::new().num_threads(threads_n).build()?;
    info!(pairs = pairs.len(), threads = threads_n, "running batch");
    let rows = pool.install(|| pairs.par_iter().map(|p| evaluate(p, opts)).collect::<Vec<_>>());
    Ok(rows)
}

/// Batch rows as a `DataFrame` with columns `initial`, `final`, `distance`,
/// `solutions`, `truncated`.
pub fn batch_frame(rows: &[BatchRow]) -> PolarsResult<DataFrame> {
    df!(
        "initial"   => rows.iter().map(|r| r.initial.clone()).collect::<Vec<_>>(),
        "final"     => rows.iter().map(|r| r.target.clone()).collect::<Vec<_>>(),
        "distance"  => rows.iter().map(|r| r.distance as u64).collect::<Vec<_>>(),
        "solutions" => rows.iter().map(|r| r.solutions as u64).collect::<Vec<_>>(),
        "truncated" => rows.iter().map(|r| r.truncated).collect::<Vec<_>>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(initial: &str, target: &str) -> Pair {
        Pair {
            initial: initial.to_string(),
            target: target.to_string(),
        }
    }

    const INPUT: &str = "initial,final\nkitten,sitting\nab,ba\n,abc\nabc,abc\n";

    #[test]
    fn reads_csv_pairs_including_empty_fields() {
        let pairs = read_pairs(INPUT.as_bytes(), b',').unwrap();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[2], pair("", "abc"));
    }

    #[test]
    fn reads_tsv_pairs() {
        let pairs = read_pairs("a\tb\nflaw\tlawn\n".as_bytes(), b'\t').unwrap();
        assert_eq!(pairs, vec![pair("flaw", "lawn")]);
    }

    #[test]
    fn short_record_is_an_error() {
        assert!(read_pairs("initial,final\nonly\n".as_bytes(), b',').is_err());
    }

    #[test]
    fn batch_preserves_order_and_counts() {
        let pairs = read_pairs(INPUT.as_bytes(), b',').unwrap();
        let opts = BatchOpts {
            threads: Some(2),
            ..BatchOpts::default()
        };
        let rows = run_batch(&pairs, &opts).unwrap();
        let distances: Vec<usize> = rows.iter().map(|r| r.distance).collect();
        assert_eq!(distances, vec![3, 2, 3, 0]);
        assert_eq!(rows[1].solutions, 3);
        assert_eq!(rows[3].solutions, 1);
        assert!(rows.iter().all(|r| !r.truncated));
    }

    #[test]
    fn limit_truncates() {
        let opts = BatchOpts {
            limit: 2,
            threads: Some(1),
        };
        let rows = run_batch(&[pair("ab", "ba")], &opts).unwrap();
        assert_eq!(rows[0].solutions, 2);
        assert!(rows[0].truncated);
        let df = batch_frame(&rows).unwrap();
        assert_eq!(df.shape(), (1, 5));
    }
}
