//! Conversions between value kinds.

use crate::errors::EvalResult;
use crate::registry::{BuiltinDoc, CallContext, FunctionEntry};
use crate::value::Value;

use super::{arg, warn_wrong_type};

pub(super) fn entries() -> Vec<FunctionEntry> {
    vec![
        FunctionEntry::new("str", to_str)
            .alias("字符串")
            .documented(BuiltinDoc {
                summary: "Convert to a string",
                syntax: "str(value)",
                example: "text = str(123)",
                keywords: &["字符串", "文本"],
            }),
        FunctionEntry::new("int", to_int)
            .alias("整数")
            .documented(BuiltinDoc {
                summary: "Convert to an integer, truncating toward zero",
                syntax: "int(value)",
                example: "number = int(\"123\")",
                keywords: &["整数", "数字"],
            }),
        FunctionEntry::new("float", to_float)
            .alias("小数")
            .documented(BuiltinDoc {
                summary: "Convert to a floating point number",
                syntax: "float(value)",
                example: "decimal = float(\"3.14\")",
                keywords: &["浮点", "小数"],
            }),
        FunctionEntry::new("bool", to_bool)
            .alias("布尔")
            .documented(BuiltinDoc {
                summary: "Convert to a boolean",
                syntax: "bool(value)",
                example: "is_true = bool(1)",
                keywords: &["布尔", "真假"],
            }),
    ]
}

fn to_str(_ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::Str(arg(args, 0).to_string()))
}

fn to_int(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let value = arg(args, 0);
    match value.to_number() {
        Some(n) => Ok(Value::Number(n.trunc())),
        None => Ok(warn_wrong_type(ctx, "a number or numeric string", value)),
    }
}

fn to_float(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let value = arg(args, 0);
    match value.to_number() {
        Some(n) => Ok(Value::Number(n)),
        None => Ok(warn_wrong_type(ctx, "a number or numeric string", value)),
    }
}

fn to_bool(_ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(arg(args, 0).is_truthy()))
}
