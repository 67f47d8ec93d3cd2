use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directive applied when `RUST_LOG` is unset: debug output for this crate only when
/// verbose, nothing otherwise.
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        concat!(env!("CARGO_CRATE_NAME"), "=debug")
    } else {
        "off"
    }
}

/// Installs the global subscriber. Events go to stderr so prompts and results on stdout
/// stay readable.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .without_time()
                .with_target(verbose)
                .with_writer(std::io::stderr),
        )
        .init();
}
