//! GameLang command-line driver.
//!
//! ```text
//! gamelang run <file.ln>  ──► gamelang_eval::Interpreter ──► stdout
//! gamelang dap            ──► gamelang_dap::serve (stdin/stdout)
//! gamelang search <term>  ──► builtin documentation
//! ```
//!
//! Diagnostics go through `tracing` to stderr so the DAP channel on stdout
//! stays clean.

pub mod commands;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=gamelang_eval=debug` or `RUST_LOG=gamelang_dap=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
