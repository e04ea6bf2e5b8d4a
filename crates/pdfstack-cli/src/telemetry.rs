//! Diagnostic logging setup.
//!
//! Events go to stderr so they never mix with the order listing or the JSON
//! report on stdout. The filter comes from `PDFSTACK_LOG` (same syntax as
//! `RUST_LOG`); without it only warnings are shown, or debug output for
//! pdfstack itself with `--verbose`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PDFSTACK_LOG";

/// Install the global subscriber.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "warn,pdfstack=debug" } else { "warn" }
}
