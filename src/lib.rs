pub mod config;
pub mod error;
pub mod estimator;

pub use config::{load_config, Config};
pub use error::EstimatorError;
pub use estimator::RouteCostEstimator;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Map `-v` occurrences to a default filter directive
pub fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing/logging
///
/// `RUST_LOG` takes precedence over `verbose`. Logs always go to stderr so
/// that `--format json` output on stdout stays parseable.
///
/// Note: This function can only be called once.
pub fn init_tracing(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
