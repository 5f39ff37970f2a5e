use std::sync::OnceLock;

use tracing::Level;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

/// Initialize stderr logging once.
///
/// `RUST_LOG` directives still apply on top of the default level, so a
/// single module can be turned up without flooding the report output.
pub fn init(level: Level) {
    INIT.get_or_init(|| {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(UtcTime::rfc_3339())
            .with_ansi(true)
            .with_target(true);

        tracing_subscriber::registry()
            .with(build_env_filter(level))
            .with(stderr_layer)
            .init();
    });
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}
