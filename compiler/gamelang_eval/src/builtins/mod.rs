//! Builtin functions.
//!
//! Each category lives in its own file and exposes `entries()`. Every
//! builtin has a Chinese alias bound to the same entry.
//!
//! Wrong argument types are not errors for most builtins: they write a
//! `[warn]` trace line and hand back their first argument unchanged. Only
//! the throwing builtins (`safe_*`, `assert`, `throw`) return `Err`.

mod collections;
mod control;
mod convert;
pub(crate) mod game;
mod io;
mod math;
mod predicates;
mod safe;
mod search;
pub(crate) mod text;
mod time;

use crate::registry::{CallContext, FunctionRegistry};
use crate::value::Value;

pub use search::write_search_report;

static NULL: Value = Value::Null;

/// Register every core builtin (everything except importable modules).
pub fn register_core(registry: &mut FunctionRegistry) {
    let categories = [
        io::entries(),
        math::entries(),
        time::entries(),
        collections::entries(),
        predicates::entries(),
        safe::entries(),
        convert::entries(),
        control::entries(),
        search::entries(),
    ];
    for entry in categories.into_iter().flatten() {
        registry.register(entry);
    }
}

/// The `i`th argument, or null when missing.
fn arg(args: &[Value], i: usize) -> &Value {
    args.get(i).unwrap_or(&NULL)
}

/// Trace a wrong-type argument and return the input unchanged.
fn warn_wrong_type(ctx: &CallContext<'_>, expected: &str, got: &Value) -> Value {
    ctx.sink.write_line(&format!(
        "[warn] {} expects {expected}, got {}",
        ctx.function,
        got.type_name()
    ));
    got.clone()
}
