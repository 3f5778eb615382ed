//! GameLang Eval - line-oriented interpreter for the GameLang scripting
//! language.
//!
//! # Architecture
//!
//! - `Value`: tagged runtime value (string, number, boolean, null, array,
//!   map)
//! - `splitter`: quote- and nesting-aware splitting of argument text
//! - `evaluate`: free-text expression evaluation, never fails
//! - `Environment`: the single flat variable scope of a session
//! - `FunctionRegistry` / `ModuleTable`: builtins with bilingual aliases and
//!   importable module bundles
//! - `block`: brace-counting scanner for try/catch/finally
//! - `Interpreter`: the line dispatcher tying it all together
//! - `Sink`: host-provided output and input prompt
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use gamelang_eval::{BufferSink, Interpreter};
//!
//! let sink = Arc::new(BufferSink::new());
//! let mut interpreter = Interpreter::new(sink.clone());
//! interpreter.execute("print(\"Hello\", \"World\")");
//! assert_eq!(sink.lines(), vec!["Hello World"]);
//! ```

pub mod block;
pub mod builtins;
pub mod environment;
pub mod errors;
pub mod evaluator;
pub mod interpreter;
pub mod registry;
pub mod sink;
pub mod splitter;
pub mod value;

pub use environment::{Environment, GLOBAL_PREFIX};
pub use errors::{EvalError, EvalResult, LineError};
pub use evaluator::evaluate;
pub use interpreter::{Interpreter, InterpreterState, RunReport, ERROR_VARIABLES};
pub use registry::{BuiltinDoc, FunctionEntry, FunctionRegistry, Module, ModuleTable};
pub use sink::{silent_sink, stdout_sink, BufferSink, SharedSink, SilentSink, Sink, StdoutSink};
pub use splitter::split_arguments;
pub use value::{Value, ValueMap};
