//! The `text` module: string helpers. Brought in with `import text`.

use crate::errors::EvalResult;
use crate::registry::{CallContext, FunctionEntry, Module};
use crate::value::Value;

use super::{arg, warn_wrong_type};

pub(crate) fn module() -> Module {
    Module::new(
        "text",
        vec![
            FunctionEntry::new("upper", upper).alias("大写"),
            FunctionEntry::new("lower", lower).alias("小写"),
            FunctionEntry::new("trim", trim).alias("去空格"),
            FunctionEntry::new("split", split).alias("分割"),
            FunctionEntry::new("join", join).alias("连接"),
            FunctionEntry::new("replace", replace).alias("替换"),
            FunctionEntry::new("contains", contains).alias("含有"),
        ],
    )
}

fn string_op(ctx: &CallContext<'_>, args: &[Value], op: fn(&str) -> String) -> EvalResult {
    match arg(args, 0) {
        Value::Str(s) => Ok(Value::Str(op(s))),
        other => Ok(warn_wrong_type(ctx, "a string", other)),
    }
}

fn upper(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    string_op(ctx, args, str::to_uppercase)
}

fn lower(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    string_op(ctx, args, str::to_lowercase)
}

fn trim(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    string_op(ctx, args, |s| s.trim().to_string())
}

/// Splits on the separator, or on whitespace when none is given.
fn split(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let Value::Str(s) = arg(args, 0) else {
        return Ok(warn_wrong_type(ctx, "a string", arg(args, 0)));
    };
    let parts: Vec<Value> = match args.get(1) {
        Some(sep) => {
            let sep = sep.to_string();
            s.split(sep.as_str()).map(Value::string).collect()
        }
        None => s.split_whitespace().map(Value::string).collect(),
    };
    Ok(Value::Array(parts))
}

fn join(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let Value::Array(items) = arg(args, 0) else {
        return Ok(warn_wrong_type(ctx, "an array", arg(args, 0)));
    };
    let sep = args.get(1).map(ToString::to_string).unwrap_or_default();
    let joined = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(&sep);
    Ok(Value::Str(joined))
}

fn replace(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let Value::Str(s) = arg(args, 0) else {
        return Ok(warn_wrong_type(ctx, "a string", arg(args, 0)));
    };
    let from = arg(args, 1).to_string();
    let to = arg(args, 2).to_string();
    if from.is_empty() {
        return Ok(Value::Str(s.clone()));
    }
    Ok(Value::Str(s.replace(&from, &to)))
}

fn contains(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let Value::Str(s) = arg(args, 0) else {
        return Ok(warn_wrong_type(ctx, "a string", arg(args, 0)));
    };
    Ok(Value::Bool(s.contains(&arg(args, 1).to_string())))
}
