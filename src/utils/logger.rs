use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Without `--verbose` nothing is logged, so a failed run leaves only its `Error:` line.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "pharmacy_locator=debug,warn"
    } else {
        "off"
    }
}

/// `RUST_LOG` wins over the verbosity default. Logs go to stderr, the report to stdout.
pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    tracing_subscriber::registry().with(filter).with(layer).init();
}
