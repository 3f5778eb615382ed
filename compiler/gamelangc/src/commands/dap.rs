//! The `dap` command: a debug adapter on stdin/stdout.

use gamelang_dap::{serve, DapError, DebugSession};

pub fn serve_stdio() -> Result<(), DapError> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = DebugSession::new();
    tracing::debug!("serving DAP on stdio");
    serve(&mut session, stdin.lock(), stdout.lock())
}
