//! `search_builtin`: documentation lookup from inside a script.

use crate::errors::EvalResult;
use crate::registry::{BuiltinDoc, CallContext, FunctionEntry, FunctionRegistry};
use crate::sink::Sink;
use crate::value::Value;

use super::arg;

pub(super) fn entries() -> Vec<FunctionEntry> {
    vec![FunctionEntry::new("search_builtin", search_builtin)
        .alias("搜索")
        .silent()
        .documented(BuiltinDoc {
            summary: "Search the builtin functions",
            syntax: "search_builtin(term)",
            example: "search_builtin(\"print\")",
            keywords: &["搜索", "查找", "内置函数"],
        })]
}

/// Writes a report for every match and returns the matched names.
fn search_builtin(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let term = arg(args, 0).to_string();
    let names = write_search_report(ctx.sink, ctx.registry, &term);
    Ok(Value::Array(names.into_iter().map(Value::Str).collect()))
}

/// Write the search results for `term` to `sink`, returning the canonical
/// names that matched.
pub fn write_search_report(sink: &dyn Sink, registry: &FunctionRegistry, term: &str) -> Vec<String> {
    let matches = registry.search(term);
    if matches.is_empty() {
        sink.write_line(&format!("no builtin matches \"{term}\""));
        return Vec::new();
    }

    sink.write_line(&format!("search results for \"{term}\":"));
    for entry in &matches {
        let names: Vec<&str> = entry.all_names().collect();
        sink.write_line(&format!("  {}", names.join(" / ")));
        if let Some(doc) = &entry.doc {
            sink.write_line(&format!("    {}", doc.summary));
            sink.write_line(&format!("    syntax:  {}", doc.syntax));
            sink.write_line(&format!("    example: {}", doc.example));
        }
    }
    sink.write_line(&format!("{} match(es)", matches.len()));
    matches.iter().map(|entry| entry.name.clone()).collect()
}
