//! Tracing subscriber setup for the CLI.
//!
//! `RUST_LOG` wins when set; otherwise repeated `-v` flags raise the
//! level. The default shows warnings only, so a failed image load prints
//! nothing unless the user opts in to diagnostics.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
pub fn init(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "warn",
        1 => "warn,tilestack=info,tilestack_cli=info",
        2 => "info,tilestack=debug,tilestack_cli=debug",
        _ => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
