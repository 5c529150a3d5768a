//! Diagnostic logging
//!
//! `HEADER_RELEASE_LOG` takes an `EnvFilter` directive and wins over `-v`.
//! Events go to stderr so that `--json` output on stdout stays parseable.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a filter directive
pub const LOG_ENV: &str = "HEADER_RELEASE_LOG";

/// Default directive for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
  match verbosity {
    0 => "header_release=warn",
    1 => "header_release=info",
    2 => "header_release=debug",
    _ => "header_release=trace",
  }
}

pub fn init(verbosity: u8) {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default_directive(verbosity).into()),
    )
    .with(
      tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr),
    )
    .init();
}
