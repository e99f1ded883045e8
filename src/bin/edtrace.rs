use clap::{Parser, Subcommand};
use polars::prelude::*;
use tracing::info;

/// edtrace CLI
#[derive(Parser)]
#[command(name = "edtrace")]
#[command(version)]
#[command(about = "Minimum edit distance and every optimal edit script", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the distance between two strings and list every optimal script
    Solve {
        /// String to transform
        initial_string: String,
        /// String to produce
        final_string: String,
        /// Record NoOps (matched symbols) in solutions
        #[arg(long, alias = "record_noops")]
        record_noops: bool,
        /// Print the dynamic-programming grid
        #[arg(long)]
        grid: bool,
        /// Stop after this many solutions
        #[arg(long)]
        limit: Option<usize>,
        /// Emit solutions as CSV to stdout (one row per step)
        #[arg(long)]
        csv: bool,
        /// Write distance and solutions to a JSON file
        #[arg(long)]
        json: Option<String>,
    },

    /// Compute distances for every (initial, final) pair in a CSV/TSV file
    Batch {
        /// Input file with a header row; `.tsv` is read tab-separated
        file: String,
        /// Stop counting solutions for a pair after this many
        #[arg(long, default_value_t = 10_000)]
        limit: usize,
        /// Threads (0/None = all)
        #[arg(long)]
        threads: Option<usize>,
        /// Emit CSV to stdout
        #[arg(long)]
        csv: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    edtrace::logging::init(&cli.log_level);

    match cli.command {
        Commands::Solve {
            initial_string,
            final_string,
            record_noops,
            grid,
            limit,
            csv,
            json,
        } => {
            cmd_solve(&initial_string, &final_string, record_noops, grid, limit, csv, json)?;
        }

        Commands::Batch { file, limit, threads, csv } => {
            use edtrace::batch::{self, BatchOpts};

            let pairs = batch::load_pairs(&file)?;
            let threads = threads.filter(|t| *t > 0);
            let rows = batch::run_batch(&pairs, &BatchOpts { limit, threads })?;
            let mut df = batch::batch_frame(&rows)?;
            if csv {
                CsvWriter::new(std::io::stdout()).include_header(true).finish(&mut df)?;
            } else {
                print_full_width(&df);
            }
        }
    }

    Ok(())
}

fn cmd_solve(
    initial: &str,
    target: &str,
    record_noops: bool,
    grid: bool,
    limit: Option<usize>,
    csv: bool,
    json: Option<String>,
) -> anyhow::Result<()> {
    use edtrace::render::grid_frame;
    use edtrace::{compute_edit_distance, minimum_distance, DistanceTable, Solutions};

    let a: Vec<char> = initial.chars().collect();
    let b: Vec<char> = target.chars().collect();

    if grid {
        println!("initialised grid:");
        print_full_width(&grid_frame(&DistanceTable::initialised(a.len(), b.len()), &a, &b)?);
    }

    let table = compute_edit_distance(&a, &b);
    let distance = minimum_distance(&table);
    info!("Minimum edit distance is {distance}");

    if grid {
        println!("filled grid:");
        print_full_width(&grid_frame(&table, &a, &b)?);
    }

    let solutions: Vec<_> = Solutions::new(&table, record_noops)
        .take(limit.unwrap_or(usize::MAX))
        .collect();
    info!("Computed {} solution(s)", solutions.len());

    if csv {
        let mut df = edtrace::render::solutions_frame(&solutions, &a, &b)?;
        CsvWriter::new(std::io::stdout()).include_header(true).finish(&mut df)?;
    } else {
        println!("distance: {distance}");
        for (index, s) in solutions.iter().enumerate() {
            println!("Solution: {index}");
            for line in edtrace::render::solution_lines(s, &a, &b)? {
                println!("{line}");
            }
            println!();
        }
    }

    if let Some(path) = json {
        let mut rendered = Vec::with_capacity(solutions.len());
        for s in &solutions {
            let mut steps = Vec::with_capacity(s.len());
            for step in s {
                steps.push(serde_json::json!({
                    "i": step.at.i,
                    "j": step.at.j,
                    "operation": step.kind.label(),
                    "description": step.describe(&a, &b)?,
                }));
            }
            rendered.push(serde_json::Value::Array(steps));
        }
        let doc = serde_json::json!({
            "initial": initial,
            "final": target,
            "distance": distance,
            "record_noops": record_noops,
            "solutions": rendered,
        });
        let mut f = std::fs::File::create(&path)?;
        serde_json::to_writer_pretty(&mut f, &doc)?;
        info!("Wrote {path}");
    }

    Ok(())
}

fn print_full_width(df: &DataFrame) {
    // Read by Polars' pretty-printer (fmt feature).
    std::env::set_var("POLARS_FMT_TABLE_FORMATTING", "UTF8_FULL");
    std::env::set_var("POLARS_FMT_MAX_COLS", "100000");
    std::env::set_var("POLARS_FMT_MAX_ROWS", "1000000");
    std::env::set_var("POLARS_FMT_STR_LEN", "100000");
    std::env::set_var("POLARS_TABLE_WIDTH", "65535");
    println!("{}", df);
}
