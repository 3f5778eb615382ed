//! Centralized error constructors for the interpreter.
//!
//! Every evaluation error message is produced here, so builtins and the
//! dispatcher import constructors from one place:
//!
//! ```ignore
//! use gamelang_eval::errors::{division_by_zero, thrown};
//! ```

use std::fmt;

use crate::value::Value;

/// Result of evaluating a builtin call or a right-hand side.
pub type EvalResult = Result<Value, EvalError>;

/// Errors raised while executing a line.
///
/// These are the "thrown" errors: they unwind to the innermost active
/// `try` block, or to the per-line handler when no block is active.
/// Undefined functions, missing modules and wrong argument types are not
/// errors; they only produce a trace line.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// Raised by the `throw` builtin.
    #[error("{message}")]
    Thrown { message: String },

    /// Raised by a failing `assert`.
    #[error("assertion failed: {message}")]
    AssertionFailed { message: String },

    /// `safe_divide` with a zero divisor and no default.
    #[error("division by zero")]
    DivisionByZero,

    /// A throwing builtin received an operand of the wrong type.
    #[error("{function} expects {expected}, got {got}")]
    WrongArgumentType {
        function: String,
        expected: &'static str,
        got: &'static str,
    },

    /// A safe accessor was handed the wrong kind of container.
    #[error("{function} requires {expected}, got {got}")]
    WrongContainer {
        function: String,
        expected: &'static str,
        got: &'static str,
    },

    /// A `try` block opened inside another try/catch/finally construct.
    #[error("nested try block at line {line} is not supported")]
    NestedTry { line: usize },
}

/// An error tagged with the 1-based source line that raised it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineError {
    pub line: usize,
    pub error: EvalError,
}

impl LineError {
    pub fn new(line: usize, error: EvalError) -> Self {
        LineError { line, error }
    }
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

impl std::error::Error for LineError {}

// Control Errors

#[cold]
pub fn thrown(message: impl Into<String>) -> EvalError {
    EvalError::Thrown {
        message: message.into(),
    }
}

#[cold]
pub fn assertion_failed(message: impl Into<String>) -> EvalError {
    EvalError::AssertionFailed {
        message: message.into(),
    }
}

#[cold]
pub fn nested_try(line: usize) -> EvalError {
    EvalError::NestedTry { line }
}

// Arithmetic Errors

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::DivisionByZero
}

// Type Errors

#[cold]
pub fn wrong_arg_type(function: &str, expected: &'static str, got: &Value) -> EvalError {
    EvalError::WrongArgumentType {
        function: function.to_string(),
        expected,
        got: got.type_name(),
    }
}

#[cold]
pub fn wrong_container(function: &str, expected: &'static str, got: &Value) -> EvalError {
    EvalError::WrongContainer {
        function: function.to_string(),
        expected,
        got: got.type_name(),
    }
}
