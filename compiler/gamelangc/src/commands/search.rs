//! The `search` command: look up builtins by name, alias or keyword.

use gamelang_eval::builtins::write_search_report;
use gamelang_eval::{FunctionRegistry, ModuleTable, Sink};

/// Modules whose functions are searchable alongside the core builtins.
const SEARCHED_MODULES: &[&str] = &["game", "text"];

/// Write the report for `term` and return how many builtins matched.
pub fn search_builtins(term: &str, sink: &dyn Sink) -> usize {
    let mut registry = FunctionRegistry::with_builtins();
    let modules = ModuleTable::standard();
    for name in SEARCHED_MODULES {
        if let Some(module) = modules.get(name) {
            registry.merge_module(&module);
        }
    }
    write_search_report(sink, &registry, term).len()
}
