//! Numeric builtins.

use crate::errors::EvalResult;
use crate::registry::{BuiltinDoc, CallContext, FunctionEntry};
use crate::value::Value;

use super::{arg, warn_wrong_type};

pub(super) fn entries() -> Vec<FunctionEntry> {
    vec![
        FunctionEntry::new("abs", abs)
            .alias("绝对值")
            .documented(BuiltinDoc {
                summary: "Absolute value",
                syntax: "abs(number)",
                example: "result = abs(-5)",
                keywords: &["绝对值", "绝对"],
            }),
        FunctionEntry::new("max", max)
            .alias("最大值")
            .documented(BuiltinDoc {
                summary: "Largest of the arguments",
                syntax: "max(a, b, ...)",
                example: "maximum = max(1, 2, 3)",
                keywords: &["最大", "最大值"],
            }),
        FunctionEntry::new("min", min)
            .alias("最小值")
            .documented(BuiltinDoc {
                summary: "Smallest of the arguments",
                syntax: "min(a, b, ...)",
                example: "minimum = min(1, 2, 3)",
                keywords: &["最小", "最小值"],
            }),
        FunctionEntry::new("round", round)
            .alias("四舍五入")
            .documented(BuiltinDoc {
                summary: "Round to the nearest integer, halves up",
                syntax: "round(number)",
                example: "rounded = round(3.6)",
                keywords: &["四舍五入", "取整"],
            }),
        FunctionEntry::new("floor", floor).alias("向下取整"),
        FunctionEntry::new("ceil", ceil).alias("向上取整"),
        FunctionEntry::new("random", random)
            .alias("随机小数")
            .documented(BuiltinDoc {
                summary: "Uniform random number in [0, 1)",
                syntax: "random()",
                example: "rand = random()",
                keywords: &["随机", "随机数"],
            }),
        FunctionEntry::new("randint", randint)
            .alias("随机整数")
            .documented(BuiltinDoc {
                summary: "Random integer in an inclusive range",
                syntax: "randint(min, max)",
                example: "rand_num = randint(1, 10)",
                keywords: &["随机整数", "随机数"],
            }),
    ]
}

/// Apply `op` to the first argument when it is numeric.
fn unary(ctx: &CallContext<'_>, args: &[Value], op: fn(f64) -> f64) -> EvalResult {
    let value = arg(args, 0);
    match value.to_number() {
        Some(n) => Ok(Value::Number(op(n))),
        None => Ok(warn_wrong_type(ctx, "a number", value)),
    }
}

fn abs(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    unary(ctx, args, f64::abs)
}

fn round(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    unary(ctx, args, |n| (n + 0.5).floor())
}

fn floor(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    unary(ctx, args, f64::floor)
}

fn ceil(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    unary(ctx, args, f64::ceil)
}

/// Fold numeric arguments; no arguments yields `empty`.
fn extremum(
    ctx: &CallContext<'_>,
    args: &[Value],
    empty: f64,
    pick: fn(f64, f64) -> f64,
) -> EvalResult {
    let mut acc = empty;
    for value in args {
        let Some(n) = value.to_number() else {
            return Ok(warn_wrong_type(ctx, "numbers", value));
        };
        acc = pick(acc, n);
    }
    Ok(Value::Number(acc))
}

fn max(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    extremum(ctx, args, f64::NEG_INFINITY, f64::max)
}

fn min(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    extremum(ctx, args, f64::INFINITY, f64::min)
}

fn random(_ctx: &CallContext<'_>, _args: &[Value]) -> EvalResult {
    Ok(Value::Number(fastrand::f64()))
}

fn randint(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let (low, high) = (arg(args, 0), arg(args, 1));
    let Some(low_n) = low.to_number() else {
        return Ok(warn_wrong_type(ctx, "two numbers", low));
    };
    let Some(high_n) = high.to_number() else {
        return Ok(warn_wrong_type(ctx, "two numbers", high));
    };
    #[allow(
        clippy::cast_possible_truncation,
        reason = "script integers are small; values are floored first"
    )]
    let (low_i, high_i) = (low_n.ceil() as i64, high_n.floor() as i64);
    if low_i > high_i {
        return Ok(Value::Number(low_n));
    }
    #[allow(clippy::cast_precision_loss, reason = "round-trips a small integer")]
    let picked = fastrand::i64(low_i..=high_i) as f64;
    Ok(Value::Number(picked))
}
