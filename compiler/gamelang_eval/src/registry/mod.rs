//! Function registry: builtin names, alias groups and importable modules.
//!
//! Every builtin is one [`FunctionEntry`] with a canonical name and any
//! number of aliases. Registering an entry binds the canonical name and all
//! aliases to the *same* `Arc`, so aliases never drift apart.
//!
//! Registration is last-wins per name. Importing a module merges its
//! entries into the registry and silently overwrites earlier bindings that
//! share a name.

use std::cell::Cell;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::errors::EvalResult;
use crate::sink::Sink;
use crate::value::Value;

/// Signature shared by every builtin.
pub type BuiltinFn = fn(&CallContext<'_>, &[Value]) -> EvalResult;

/// What a builtin can see while it runs.
pub struct CallContext<'a> {
    pub sink: &'a dyn Sink,
    pub registry: &'a FunctionRegistry,
    /// The name the function was called by (canonical name or alias).
    pub function: &'a str,
    updated: Cell<Option<Value>>,
}

impl<'a> CallContext<'a> {
    pub fn new(sink: &'a dyn Sink, registry: &'a FunctionRegistry, function: &'a str) -> Self {
        CallContext {
            sink,
            registry,
            function,
            updated: Cell::new(None),
        }
    }

    /// Hand back the new contents of the first argument. When that argument
    /// was written as a bound variable, the dispatcher rebinds it.
    pub fn update_receiver(&self, value: Value) {
        self.updated.set(Some(value));
    }

    /// The value passed to [`update_receiver`](Self::update_receiver), if any.
    pub fn take_update(&self) -> Option<Value> {
        self.updated.take()
    }
}

/// Whether the dispatcher writes a `[call]` trace line after the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Echo {
    Traced,
    /// The builtin's own output is its trace (`print`, `search_builtin`).
    Silent,
}

/// Hover/search documentation for a builtin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltinDoc {
    pub summary: &'static str,
    pub syntax: &'static str,
    pub example: &'static str,
    /// Extra search terms, e.g. the Chinese words for the function's purpose.
    pub keywords: &'static [&'static str],
}

/// One callable with its canonical name and aliases.
#[derive(Clone, Debug)]
pub struct FunctionEntry {
    pub name: String,
    pub aliases: Vec<String>,
    pub func: BuiltinFn,
    pub echo: Echo,
    pub doc: Option<BuiltinDoc>,
}

impl FunctionEntry {
    pub fn new(name: impl Into<String>, func: BuiltinFn) -> Self {
        FunctionEntry {
            name: name.into(),
            aliases: Vec::new(),
            func,
            echo: Echo::Traced,
            doc: None,
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    #[must_use]
    pub fn silent(mut self) -> Self {
        self.echo = Echo::Silent;
        self
    }

    #[must_use]
    pub fn documented(mut self, doc: BuiltinDoc) -> Self {
        self.doc = Some(doc);
        self
    }

    /// Canonical name followed by every alias.
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Invoke the function.
    pub fn call(&self, ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
        (self.func)(ctx, args)
    }

    fn matches(&self, needle: &str) -> bool {
        if self
            .all_names()
            .any(|name| name.to_lowercase().contains(needle))
        {
            return true;
        }
        self.doc.as_ref().is_some_and(|doc| {
            doc.summary.to_lowercase().contains(needle)
                || doc.keywords.iter().any(|kw| kw.to_lowercase().contains(needle))
        })
    }
}

/// Name-to-function map with alias groups.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    by_name: FxHashMap<String, Arc<FunctionEntry>>,
    /// Registration order, for listing and search.
    entries: Vec<Arc<FunctionEntry>>,
}

impl FunctionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every core builtin.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::builtins::register_core(&mut registry);
        registry
    }

    /// Bind the entry's canonical name and all of its aliases.
    pub fn register(&mut self, entry: FunctionEntry) {
        let entry = Arc::new(entry);
        for name in entry.all_names() {
            if self.by_name.insert(name.to_string(), Arc::clone(&entry)).is_some() {
                tracing::trace!(name, "builtin binding overwritten");
            }
        }
        self.entries.push(entry);
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<FunctionEntry>> {
        self.by_name.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Merge every entry of `module`, overwriting existing names.
    pub fn merge_module(&mut self, module: &Module) {
        for entry in &module.entries {
            self.register(entry.clone());
        }
    }

    /// Every bound name (canonical and alias), sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Entries whose name, alias, summary or keywords contain `term`,
    /// case-insensitively, in registration order.
    ///
    /// An entry shadowed by a later registration of all its names is not
    /// reported.
    pub fn search(&self, term: &str) -> Vec<Arc<FunctionEntry>> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|entry| self.is_live(entry))
            .filter(|entry| entry.matches(&needle))
            .cloned()
            .collect()
    }

    /// Number of distinct live entries.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| self.is_live(entry)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_live(&self, entry: &Arc<FunctionEntry>) -> bool {
        entry.all_names().any(|name| {
            self.by_name
                .get(name)
                .is_some_and(|bound| Arc::ptr_eq(bound, entry))
        })
    }
}

/// A named, immutable bundle of functions merged in by `import`.
#[derive(Clone, Debug)]
pub struct Module {
    pub name: &'static str,
    pub entries: Vec<FunctionEntry>,
}

impl Module {
    pub fn new(name: &'static str, entries: Vec<FunctionEntry>) -> Self {
        Module { name, entries }
    }
}

/// Statically registered modules, looked up by flat name.
#[derive(Clone, Default)]
pub struct ModuleTable {
    modules: FxHashMap<String, Arc<Module>>,
}

impl ModuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The modules shipped with the interpreter: `game` and `text`, each
    /// also reachable by its Chinese name.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.register(crate::builtins::game::module(), &["游戏"]);
        table.register(crate::builtins::text::module(), &["文本"]);
        table
    }

    /// Register `module` under its own name and every name in `aliases`.
    pub fn register(&mut self, module: Module, aliases: &[&str]) {
        let module = Arc::new(module);
        self.modules
            .insert(module.name.to_string(), Arc::clone(&module));
        for alias in aliases {
            self.modules.insert((*alias).to_string(), Arc::clone(&module));
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<Module>> {
        self.modules.get(name).cloned()
    }
}
