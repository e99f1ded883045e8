//! Log setup for the `edtrace` binary.
//!
//! Filtering follows `RUST_LOG` when set, e.g.
//! - `RUST_LOG=debug` - table build, seeds, forks and NoOp walk-throughs
//! - `RUST_LOG=edtrace::solution=trace` - every backtrace step
//!
//! Otherwise the level passed to [`init`] applies. Logs go to stderr so they
//! never mix with tables or CSV on stdout.
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    if let Err(e) = tracing_subscriber::registry().with(console_layer).try_init() {
        eprintln!("Warning: could not initialise logging: {e}");
    }
}
