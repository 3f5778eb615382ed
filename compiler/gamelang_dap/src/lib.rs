//! GameLang DAP - Debug Adapter Protocol endpoint.
//!
//! # Architecture
//!
//! - `protocol`: wire types for requests, responses, events and bodies
//! - `session`: the `DebugSession` state machine, one response per request
//! - `runtime`: the synthetic runtime the session steps through
//! - `transport`: `Content-Length` framing over any `BufRead`/`Write` pair
//!
//! Stepping is illustrative: the session never executes the target
//! program, it only maintains a fake call stack and a seeded environment.

pub mod protocol;
pub mod runtime;
pub mod session;
pub mod transport;

pub use protocol::{ErrorCode, IncomingMessage, OutgoingMessage, Request, Response, ResponseBody};
pub use runtime::{Frame, SyntheticRuntime};
pub use session::{DebugSession, RequestError, SessionState};
pub use transport::{read_message, serve, write_message, DapError};
