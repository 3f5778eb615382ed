//! Introspection (`len`, `type`) and type predicates.

use crate::errors::EvalResult;
use crate::registry::{BuiltinDoc, CallContext, FunctionEntry};
use crate::value::Value;

use super::arg;

pub(super) fn entries() -> Vec<FunctionEntry> {
    vec![
        FunctionEntry::new("len", len)
            .alias("长度")
            .documented(BuiltinDoc {
                summary: "Length of an array or string",
                syntax: "len(value)",
                example: "length = len([1, 2, 3])",
                keywords: &["长度", "大小", "数量"],
            }),
        FunctionEntry::new("type", type_of)
            .alias("类型")
            .documented(BuiltinDoc {
                summary: "Dynamic type name of a value",
                syntax: "type(value)",
                example: "var_type = type(name)",
                keywords: &["类型", "种类"],
            }),
        FunctionEntry::new("is_number", is_number).alias("是数字"),
        FunctionEntry::new("is_string", is_string).alias("是字符串"),
        FunctionEntry::new("is_array", is_array).alias("是数组"),
        FunctionEntry::new("is_object", is_object).alias("是对象"),
        FunctionEntry::new("is_empty", is_empty).alias("是空"),
    ]
}

/// Characters for strings, elements for arrays, 0 for anything else.
fn len(_ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let count = match arg(args, 0) {
        Value::Str(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        _ => 0,
    };
    #[allow(clippy::cast_precision_loss, reason = "lengths are small")]
    let count = count as f64;
    Ok(Value::Number(count))
}

fn type_of(_ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::string(arg(args, 0).type_name()))
}

fn is_number(_ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(matches!(arg(args, 0), Value::Number(_))))
}

fn is_string(_ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(matches!(arg(args, 0), Value::Str(_))))
}

fn is_array(_ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(matches!(arg(args, 0), Value::Array(_))))
}

fn is_object(_ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(matches!(arg(args, 0), Value::Map(_))))
}

fn is_empty(_ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(arg(args, 0).is_empty_value()))
}
