//! Safe accessors: defaults on a miss, thrown errors on misuse.

use crate::errors::{division_by_zero, wrong_arg_type, wrong_container, EvalResult};
use crate::registry::{BuiltinDoc, CallContext, FunctionEntry};
use crate::value::Value;

use super::arg;

pub(super) fn entries() -> Vec<FunctionEntry> {
    vec![
        FunctionEntry::new("safe_divide", safe_divide)
            .alias("安全除法")
            .documented(BuiltinDoc {
                summary: "Divide, returning a default instead of dividing by zero",
                syntax: "safe_divide(a, b, default?)",
                example: "ratio = safe_divide(10, 0, 0)",
                keywords: &["除法", "安全"],
            }),
        FunctionEntry::new("safe_array_get", safe_array_get)
            .alias("safe_get")
            .alias("安全取值"),
        FunctionEntry::new("safe_map_get", safe_map_get).alias("安全字典取值"),
    ]
}

/// With a zero divisor, returns the third argument if one was given and
/// throws otherwise.
fn safe_divide(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let (dividend, divisor) = (arg(args, 0), arg(args, 1));
    let Some(a) = dividend.to_number() else {
        return Err(wrong_arg_type(ctx.function, "numbers", dividend));
    };
    let Some(b) = divisor.to_number() else {
        return Err(wrong_arg_type(ctx.function, "numbers", divisor));
    };
    if b == 0.0 {
        return match args.get(2) {
            Some(default) => Ok(default.clone()),
            None => Err(division_by_zero()),
        };
    }
    Ok(Value::Number(a / b))
}

fn safe_array_get(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let default = arg(args, 2);
    let items = match arg(args, 0) {
        Value::Array(items) => items,
        other => return Err(wrong_container(ctx.function, "an array", other)),
    };
    let found = arg(args, 1).to_number().and_then(|n| {
        if n < 0.0 || n.fract() != 0.0 {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "non-negative integral, bounds-checked by get"
        )]
        let index = n as usize;
        items.get(index)
    });
    Ok(found.unwrap_or(default).clone())
}

fn safe_map_get(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let default = arg(args, 2);
    match arg(args, 0) {
        Value::Map(entries) => Ok(entries
            .get(&arg(args, 1).to_string())
            .unwrap_or(default)
            .clone()),
        other => Err(wrong_container(ctx.function, "an object", other)),
    }
}
