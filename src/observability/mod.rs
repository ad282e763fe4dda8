//! # Observability
//!
//! Tracing subscriber setup. Logs go to stderr so stdout carries only the
//! rendered template.

use crate::constants::DEFAULT_LOG_FILTER;

/// Install the global tracing subscriber
///
/// `RUST_LOG` overrides the default `apigw_s3_proxy=info` filter. Calling this
/// more than once is harmless; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
