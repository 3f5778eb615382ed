//! Array and map builtins.
//!
//! Containers are values. Mutators (`push`, `pop`, `insert`, `remove`,
//! `set`, `delete`) compute the new container and hand it back through
//! [`CallContext::update_receiver`], so `push(xs, 4)` on its own line
//! updates `xs`. `sort` and `reverse` only return a reordered copy.

use crate::errors::EvalResult;
use crate::registry::{BuiltinDoc, CallContext, FunctionEntry};
use crate::value::{Value, ValueMap};

use super::{arg, warn_wrong_type};

pub(super) fn entries() -> Vec<FunctionEntry> {
    vec![
        FunctionEntry::new("array", array)
            .alias("list")
            .alias("列表")
            .alias("数组")
            .documented(BuiltinDoc {
                summary: "Build an array from the arguments",
                syntax: "array(a, b, ...)",
                example: "items = array(1, 2, 3)",
                keywords: &["列表", "数组"],
            }),
        FunctionEntry::new("push", push).alias("append").alias("添加"),
        FunctionEntry::new("pop", pop).alias("弹出"),
        FunctionEntry::new("insert", insert).alias("插入"),
        FunctionEntry::new("remove", remove).alias("删除元素"),
        FunctionEntry::new("index_of", index_of)
            .alias("indexOf")
            .alias("查找"),
        FunctionEntry::new("sort", sort).alias("排序"),
        FunctionEntry::new("reverse", reverse).alias("反转"),
        FunctionEntry::new("map", map)
            .alias("dict")
            .alias("字典")
            .documented(BuiltinDoc {
                summary: "Build a map from key, value pairs",
                syntax: "map(key1, value1, key2, value2, ...)",
                example: "player = map(\"name\", \"Ada\", \"hp\", 100)",
                keywords: &["字典", "对象"],
            }),
        FunctionEntry::new("set", set).alias("设置"),
        FunctionEntry::new("get", get).alias("获取"),
        FunctionEntry::new("delete", delete).alias("删除"),
        FunctionEntry::new("keys", keys).alias("键列表"),
        FunctionEntry::new("values", values).alias("值列表"),
        FunctionEntry::new("has", has).alias("包含"),
    ]
}

/// Run `op` on a copy of the array argument, or trace a wrong type.
fn copy_array(
    ctx: &CallContext<'_>,
    args: &[Value],
    op: impl FnOnce(&mut Vec<Value>),
) -> EvalResult {
    match arg(args, 0) {
        Value::Array(items) => {
            let mut items = items.clone();
            op(&mut items);
            Ok(Value::Array(items))
        }
        other => Ok(warn_wrong_type(ctx, "an array", other)),
    }
}

/// Mutate the array argument with `op` and return the updated array.
fn update_array(
    ctx: &CallContext<'_>,
    args: &[Value],
    op: impl FnOnce(&mut Vec<Value>),
) -> EvalResult {
    let updated = copy_array(ctx, args, op)?;
    if let Value::Array(_) = updated {
        ctx.update_receiver(updated.clone());
    }
    Ok(updated)
}

/// Mutate the map argument with `op` and return the updated map.
fn update_map(
    ctx: &CallContext<'_>,
    args: &[Value],
    op: impl FnOnce(&mut ValueMap),
) -> EvalResult {
    match arg(args, 0) {
        Value::Map(entries) => {
            let mut entries = entries.clone();
            op(&mut entries);
            let updated = Value::Map(entries);
            ctx.update_receiver(updated.clone());
            Ok(updated)
        }
        other => Ok(warn_wrong_type(ctx, "an object", other)),
    }
}

/// Position argument as an index clamped to `0..=len`.
fn position(value: &Value, len: usize) -> usize {
    match value.to_number() {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "clamped to the array bounds"
        )]
        Some(n) if n > 0.0 => (n as usize).min(len),
        _ => 0,
    }
}

fn array(_ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::Array(args.to_vec()))
}

fn push(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let rest = args.get(1..).unwrap_or_default().to_vec();
    update_array(ctx, args, |items| items.extend(rest))
}

/// Returns the removed element, or null for an empty array.
fn pop(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let mut removed = None;
    match update_array(ctx, args, |items| removed = items.pop())? {
        Value::Array(_) => Ok(removed.unwrap_or(Value::Null)),
        other => Ok(other),
    }
}

fn insert(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let index = arg(args, 1);
    let item = arg(args, 2).clone();
    update_array(ctx, args, |items| {
        let at = position(index, items.len());
        items.insert(at, item);
    })
}

/// Removes the first element equal to the second argument.
fn remove(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let target = arg(args, 1);
    update_array(ctx, args, |items| {
        if let Some(at) = items.iter().position(|item| item == target) {
            items.remove(at);
        }
    })
}

/// `-1` when the element is absent.
fn index_of(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let target = arg(args, 1);
    match arg(args, 0) {
        Value::Array(items) => {
            #[allow(clippy::cast_precision_loss, reason = "array indices are small")]
            let index = items
                .iter()
                .position(|item| item == target)
                .map_or(-1.0, |at| at as f64);
            Ok(Value::Number(index))
        }
        other => Ok(warn_wrong_type(ctx, "an array", other)),
    }
}

fn sort(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    copy_array(ctx, args, |items| items.sort_by(Value::compare))
}

fn reverse(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    copy_array(ctx, args, |items| items.reverse())
}

/// Pairs up arguments as key, value; a trailing key gets null.
fn map(_ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let mut entries = ValueMap::new();
    for pair in args.chunks(2) {
        let value = pair.get(1).cloned().unwrap_or(Value::Null);
        entries.insert(pair[0].to_string(), value);
    }
    Ok(Value::Map(entries))
}

fn set(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let key = arg(args, 1).to_string();
    let value = arg(args, 2).clone();
    update_map(ctx, args, |entries| {
        entries.insert(key, value);
    })
}

fn get(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let default = arg(args, 2);
    match arg(args, 0) {
        Value::Map(entries) => Ok(entries
            .get(&arg(args, 1).to_string())
            .unwrap_or(default)
            .clone()),
        other => Ok(warn_wrong_type(ctx, "an object", other)),
    }
}

fn delete(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let key = arg(args, 1).to_string();
    update_map(ctx, args, |entries| {
        entries.shift_remove(&key);
    })
}

fn keys(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    match arg(args, 0) {
        Value::Map(entries) => Ok(Value::Array(
            entries.keys().map(|key| Value::Str(key.clone())).collect(),
        )),
        other => Ok(warn_wrong_type(ctx, "an object", other)),
    }
}

fn values(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    match arg(args, 0) {
        Value::Map(entries) => Ok(Value::Array(entries.values().cloned().collect())),
        other => Ok(warn_wrong_type(ctx, "an object", other)),
    }
}

/// Key membership for maps, element membership for arrays.
fn has(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let needle = arg(args, 1);
    match arg(args, 0) {
        Value::Map(entries) => Ok(Value::Bool(entries.contains_key(&needle.to_string()))),
        Value::Array(items) => Ok(Value::Bool(items.contains(needle))),
        other => Ok(warn_wrong_type(ctx, "an object", other)),
    }
}
