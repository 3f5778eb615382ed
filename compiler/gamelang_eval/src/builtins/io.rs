//! `print` and `input`.

use crate::errors::EvalResult;
use crate::registry::{BuiltinDoc, CallContext, FunctionEntry};
use crate::value::Value;

use super::arg;

pub(super) fn entries() -> Vec<FunctionEntry> {
    vec![
        FunctionEntry::new("print", print)
            .alias("打印")
            .silent()
            .documented(BuiltinDoc {
                summary: "Write the arguments to the output, separated by spaces",
                syntax: "print(value, ...)",
                example: "print(\"Hello\", \"World\")",
                keywords: &["输出", "显示", "output"],
            }),
        FunctionEntry::new("input", input)
            .alias("输入")
            .documented(BuiltinDoc {
                summary: "Ask the user for a line of text",
                syntax: "input(prompt)",
                example: "name = input(\"Your name: \")",
                keywords: &["读取", "read"],
            }),
    ]
}

/// Writes one line and returns the written text.
fn print(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let text = args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    ctx.sink.write_line(&text);
    Ok(Value::Str(text))
}

/// A cancelled prompt reads as the empty string.
fn input(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let message = if args.is_empty() {
        String::new()
    } else {
        arg(args, 0).to_string()
    };
    Ok(Value::Str(ctx.sink.prompt_input(&message).unwrap_or_default()))
}
