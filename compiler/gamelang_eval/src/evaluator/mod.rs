//! Expression evaluation over free text.
//!
//! `evaluate` never fails. Recognition order, first match wins:
//!
//! 1. top-level `+`: evaluate every operand and concatenate their text
//!    (`+` is string concatenation, never addition: `1+2` is `"12"`). The
//!    sign of an exponent (`1e+5`) or a leading `+5` is not a separator.
//! 2. `[...]` array literal
//! 3. `{...}` map literal, keys taken literally
//! 4. `"..."` / `'...'` string literal, no escape processing
//! 5. numeric literal
//! 6. boolean and null keywords
//! 7. variable lookup
//! 8. anything else comes back as the trimmed text itself

use crate::environment::Environment;
use crate::splitter::{find_top_level, split_arguments, split_top_level};
use crate::value::{parse_number, Value, ValueMap};

/// Keywords that evaluate to `true`.
const TRUE_KEYWORDS: &[&str] = &["true", "True", "真"];
/// Keywords that evaluate to `false`.
const FALSE_KEYWORDS: &[&str] = &["false", "False", "假"];
/// Keywords that evaluate to null.
const NULL_KEYWORDS: &[&str] = &["null", "None", "nil", "空"];

/// Evaluate `text` against `env`.
pub fn evaluate(text: &str, env: &Environment) -> Value {
    let text = text.trim();

    let operands = concatenation_operands(text);
    if operands.len() > 1 {
        return concatenate(&operands, env);
    }
    if let Some(inner) = strip_delimiters(text, '[', ']') {
        return array_literal(inner, env);
    }
    if let Some(inner) = strip_delimiters(text, '{', '}') {
        return map_literal(inner, env);
    }
    if let Some(contents) = unquote(text) {
        return Value::string(contents);
    }
    if let Some(n) = parse_number(text) {
        return Value::number(n);
    }
    if let Some(literal) = keyword_literal(text) {
        return literal;
    }
    if let Some(value) = env.lookup(text) {
        return value.clone();
    }
    Value::string(text)
}

/// Split on top-level `+`, rejoining pieces where the `+` is a sign inside
/// a number.
fn concatenation_operands(text: &str) -> Vec<String> {
    let mut operands: Vec<String> = Vec::new();
    for piece in split_top_level(text, '+') {
        match operands.last_mut() {
            Some(prev) if sign_continues_number(prev, piece) => {
                prev.push('+');
                prev.push_str(piece);
            }
            _ => operands.push(piece.to_string()),
        }
    }
    operands
}

/// `prev` is empty (leading `+`) or a mantissa ending in `e`/`E`, and
/// `next` starts with a digit.
fn sign_continues_number(prev: &str, next: &str) -> bool {
    if !next.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    let prev = prev.trim_start();
    prev.is_empty()
        || prev
            .strip_suffix(['e', 'E'])
            .is_some_and(|mantissa| parse_number(mantissa).is_some())
}

fn concatenate(operands: &[String], env: &Environment) -> Value {
    let mut out = String::new();
    for operand in operands {
        out.push_str(&evaluate(operand, env).to_string());
    }
    Value::Str(out)
}

fn array_literal(inner: &str, env: &Environment) -> Value {
    let items = split_arguments(inner)
        .iter()
        .map(|element| evaluate(element, env))
        .collect();
    Value::array(items)
}

/// Map literal entries are `key: value`; a segment without a top-level
/// colon is ignored.
fn map_literal(inner: &str, env: &Environment) -> Value {
    let mut entries = ValueMap::new();
    for pair in split_arguments(inner) {
        let Some(colon) = find_top_level(&pair, ':') else {
            tracing::trace!(segment = %pair, "map literal segment without a key");
            continue;
        };
        let key = pair[..colon].trim();
        let key = unquote(key).unwrap_or(key);
        let value = evaluate(&pair[colon + 1..], env);
        entries.insert(key.to_string(), value);
    }
    Value::map(entries)
}

/// Inner text of `open ... close`, if `text` is wrapped that way.
fn strip_delimiters(text: &str, open: char, close: char) -> Option<&str> {
    text.strip_prefix(open)?.strip_suffix(close)
}

/// Contents of a quoted literal, verbatim.
pub fn unquote(text: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|q| {
        if text.len() >= 2 {
            text.strip_prefix(q)?.strip_suffix(q)
        } else {
            None
        }
    })
}

fn keyword_literal(text: &str) -> Option<Value> {
    if TRUE_KEYWORDS.contains(&text) {
        Some(Value::Bool(true))
    } else if FALSE_KEYWORDS.contains(&text) {
        Some(Value::Bool(false))
    } else if NULL_KEYWORDS.contains(&text) {
        Some(Value::Null)
    } else {
        None
    }
}
