//! `assert` and `throw`: the builtins that raise on purpose.

use crate::errors::{assertion_failed, thrown, EvalResult};
use crate::registry::{BuiltinDoc, CallContext, FunctionEntry};
use crate::value::Value;

use super::arg;

pub(super) fn entries() -> Vec<FunctionEntry> {
    vec![
        FunctionEntry::new("assert", assert)
            .alias("断言")
            .documented(BuiltinDoc {
                summary: "Raise an error unless the condition is truthy",
                syntax: "assert(condition, message?)",
                example: "assert(hp > 0, \"player is dead\")",
                keywords: &["断言", "检查"],
            }),
        FunctionEntry::new("throw", throw)
            .alias("raise")
            .alias("抛出")
            .documented(BuiltinDoc {
                summary: "Raise an error with the given message",
                syntax: "throw(message)",
                example: "throw(\"out of mana\")",
                keywords: &["抛出", "异常", "错误"],
            }),
    ]
}

fn assert(_ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let condition = arg(args, 0);
    if condition.is_truthy() {
        return Ok(Value::Bool(true));
    }
    let message = match args.get(1) {
        Some(message) => message.to_string(),
        None => condition.to_string(),
    };
    Err(assertion_failed(message))
}

fn throw(_ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let message = args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    Err(thrown(message))
}
