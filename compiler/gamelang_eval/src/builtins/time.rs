//! Wall-clock builtins.

use std::time::Duration;

use crate::errors::EvalResult;
use crate::registry::{BuiltinDoc, CallContext, FunctionEntry};
use crate::value::Value;

use super::{arg, warn_wrong_type};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(super) fn entries() -> Vec<FunctionEntry> {
    vec![
        FunctionEntry::new("now", now)
            .alias("现在时间")
            .documented(BuiltinDoc {
                summary: "Current local time",
                syntax: "now()",
                example: "current_time = now()",
                keywords: &["时间", "当前时间", "现在"],
            }),
        FunctionEntry::new("sleep", sleep)
            .alias("暂停")
            .documented(BuiltinDoc {
                summary: "Pause for the given number of seconds",
                syntax: "sleep(seconds)",
                example: "sleep(1)",
                keywords: &["暂停", "等待", "延时"],
            }),
    ]
}

fn now(_ctx: &CallContext<'_>, _args: &[Value]) -> EvalResult {
    Ok(Value::Str(
        chrono::Local::now().format(TIME_FORMAT).to_string(),
    ))
}

/// Blocks the current line only. Negative or non-finite durations do not
/// sleep.
fn sleep(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let value = arg(args, 0);
    let Some(seconds) = value.to_number() else {
        return Ok(warn_wrong_type(ctx, "a number of seconds", value));
    };
    if let Ok(duration) = Duration::try_from_secs_f64(seconds) {
        std::thread::sleep(duration);
    }
    Ok(Value::Null)
}
