//! Line dispatcher.
//!
//! # Architecture
//!
//! - [`InterpreterState`]: the session's flat environment, function registry
//!   and set of imported modules
//! - [`Interpreter`]: owns the state together with the module table and the
//!   output sink
//! - `Dispatcher`: borrows all of the above for one `execute` call and walks
//!   the source line by line
//!
//! Lines are classified by the rule table in [`rules`]. Try constructs are
//! delimited by the block scanner and their bodies run with errors
//! propagating to the construct; everywhere else an error is reported as a
//! per-line `[error]` trace and execution continues at the next line.

pub mod rules;

use std::ops::Range;
use std::sync::Arc;

use indexmap::IndexSet;

use crate::block::{
    braced_block_end, inline_body, scan_try, BlockKind, BlockRegion, TryConstruct,
};
use crate::environment::Environment;
use crate::errors::{nested_try, EvalError, EvalResult, LineError};
use crate::evaluator::evaluate;
use crate::registry::{CallContext, Echo, FunctionEntry, FunctionRegistry, ModuleTable};
use crate::sink::{SharedSink, Sink};
use crate::splitter::split_arguments;
use crate::value::Value;

use rules::{classify, is_identifier, split_call, Statement};

/// Variables bound to the error message when a catch block runs.
pub const ERROR_VARIABLES: &[&str] = &["error", "错误"];

/// Everything a session mutates while it runs.
#[derive(Clone)]
pub struct InterpreterState {
    pub env: Environment,
    pub registry: FunctionRegistry,
    pub imported: IndexSet<String>,
}

impl InterpreterState {
    /// Empty environment, every core builtin registered, nothing imported.
    pub fn new() -> Self {
        InterpreterState {
            env: Environment::new(),
            registry: FunctionRegistry::with_builtins(),
            imported: IndexSet::new(),
        }
    }
}

impl Default for InterpreterState {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one `execute` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Statements dispatched, not counting skipped or structural lines.
    pub executed: usize,
    /// Errors reported per line, in order.
    pub errors: Vec<LineError>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A GameLang interpreter session.
pub struct Interpreter {
    state: InterpreterState,
    modules: ModuleTable,
    sink: SharedSink,
}

impl Interpreter {
    /// A session with the standard module table.
    pub fn new(sink: SharedSink) -> Self {
        Self::with_modules(sink, ModuleTable::standard())
    }

    pub fn with_modules(sink: SharedSink, modules: ModuleTable) -> Self {
        Interpreter {
            state: InterpreterState::new(),
            modules,
            sink,
        }
    }

    /// Run `source` line by line. Never fails: errors are reported to the
    /// sink and collected in the returned report.
    pub fn execute(&mut self, source: &str) -> RunReport {
        let lines: Vec<&str> = source.lines().collect();
        let mut report = RunReport::default();
        let mut dispatcher = Dispatcher {
            state: &mut self.state,
            modules: &self.modules,
            sink: &*self.sink,
        };
        let outcome =
            dispatcher.run_lines(&lines, 0..lines.len(), ErrorPolicy::PerLine, &mut report);
        if let Err(err) = outcome {
            dispatcher.report_error(err, &mut report);
        }
        tracing::debug!(
            executed = report.executed,
            errors = report.errors.len(),
            "execution finished"
        );
        report
    }

    /// Evaluate an expression against the session's environment, invoking
    /// registered functions.
    pub fn evaluate(&mut self, text: &str) -> EvalResult {
        let mut dispatcher = Dispatcher {
            state: &mut self.state,
            modules: &self.modules,
            sink: &*self.sink,
        };
        dispatcher.resolve_operand(text)
    }

    pub fn state(&self) -> &InterpreterState {
        &self.state
    }

    pub fn environment(&self) -> &Environment {
        &self.state.env
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.state.registry
    }

    pub fn sink(&self) -> &SharedSink {
        &self.sink
    }

    /// Variable lookup, mostly for hosts and tests.
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.state.env.lookup(name)
    }
}

/// How errors raised by a statement are handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ErrorPolicy {
    /// Report and move on to the next line.
    PerLine,
    /// Stop and hand the error to the enclosing try construct.
    Propagate,
}

struct Dispatcher<'a> {
    state: &'a mut InterpreterState,
    modules: &'a ModuleTable,
    sink: &'a dyn Sink,
}

impl Dispatcher<'_> {
    fn run_lines(
        &mut self,
        lines: &[&str],
        range: Range<usize>,
        policy: ErrorPolicy,
        report: &mut RunReport,
    ) -> Result<(), LineError> {
        let mut i = range.start;
        while i < range.end {
            let line = lines[i].trim();
            if line.is_empty() || line.starts_with('#') {
                i += 1;
                continue;
            }

            let outcome = match classify(line) {
                Statement::Structural => {
                    i += 1;
                    continue;
                }
                Statement::TryOpener => {
                    let construct = scan_try(lines, i);
                    report.executed += 1;
                    let outcome = self.run_try(lines, &construct, report);
                    i = construct.resume_at.max(i + 1);
                    outcome
                }
                Statement::Declaration { keyword, signature } => {
                    self.sink
                        .write_line(&format!("[decl] {keyword} {signature}"));
                    i = braced_block_end(lines, i);
                    continue;
                }
                Statement::OrphanBlock(kind) => {
                    let keyword = if kind == BlockKind::Catch { "catch" } else { "finally" };
                    self.sink.write_line(&format!(
                        "[warn] line {}: {keyword} without try",
                        i + 1
                    ));
                    i = braced_block_end(lines, i);
                    continue;
                }
                statement => {
                    report.executed += 1;
                    let outcome = self
                        .execute_statement(statement)
                        .map_err(|error| LineError::new(i + 1, error));
                    i += 1;
                    outcome
                }
            };

            if let Err(err) = outcome {
                match policy {
                    ErrorPolicy::PerLine => self.report_error(err, report),
                    ErrorPolicy::Propagate => return Err(err),
                }
            }
        }
        Ok(())
    }

    /// Run one try construct. Errors escaping it (from catch, from finally,
    /// or from try when there is no catch) are returned after finally ran.
    fn run_try(
        &mut self,
        lines: &[&str],
        construct: &TryConstruct,
        report: &mut RunReport,
    ) -> Result<(), LineError> {
        if let Some(nested) = construct.nested_try {
            tracing::debug!(line = nested + 1, "nested try rejected");
            return Err(LineError::new(nested + 1, nested_try(nested + 1)));
        }

        let mut pending = None;
        if let Err(err) = self.run_region(lines, construct.try_block, report) {
            match construct.catch_block {
                Some(catch_block) => {
                    self.bind_error(&err, construct.catch_binding.as_deref());
                    pending = self.run_region(lines, catch_block, report).err();
                }
                None => pending = Some(err),
            }
        }

        if let Some(finally_block) = construct.finally_block {
            if let Err(err) = self.run_region(lines, finally_block, report) {
                pending = Some(err);
            }
        }

        pending.map_or(Ok(()), Err)
    }

    /// Run one region's body with errors propagating. An inline body is run
    /// in place of its opener line so errors keep that line's number.
    fn run_region(
        &mut self,
        lines: &[&str],
        region: BlockRegion,
        report: &mut RunReport,
    ) -> Result<(), LineError> {
        let range = region.start..region.end;
        if !region.inline {
            return self.run_lines(lines, range, ErrorPolicy::Propagate, report);
        }
        let Some(body) = lines.get(region.start).copied().and_then(inline_body) else {
            return Ok(());
        };
        let mut patched = lines.to_vec();
        patched[region.start] = body;
        self.run_lines(&patched, range, ErrorPolicy::Propagate, report)
    }

    fn bind_error(&mut self, err: &LineError, binding: Option<&str>) {
        let message = Value::Str(err.error.to_string());
        for name in ERROR_VARIABLES {
            self.state.env.define(*name, message.clone());
        }
        if let Some(name) = binding {
            self.state.env.define(name, message);
        }
    }

    fn report_error(&self, err: LineError, report: &mut RunReport) {
        self.sink.write_line(&format!("[error] {err}"));
        report.errors.push(err);
    }

    fn execute_statement(&mut self, statement: Statement<'_>) -> Result<(), EvalError> {
        match statement {
            Statement::Import { module } => {
                self.import(module);
                Ok(())
            }
            Statement::Assignment { name, expr } => {
                let value = self.resolve_operand(expr)?;
                self.sink.write_line(&format!("[var] {name} = {value}"));
                self.state.env.define(name, value);
                Ok(())
            }
            Statement::Call { name, args } => self.call(name, args),
            Statement::Expression(text) => {
                let value = self.resolve_operand(text)?;
                if !value.is_empty_value() {
                    self.sink.write_line(&format!("[eval] {value}"));
                }
                Ok(())
            }
            Statement::Structural
            | Statement::TryOpener
            | Statement::Declaration { .. }
            | Statement::OrphanBlock(_) => Ok(()),
        }
    }

    fn import(&mut self, name: &str) {
        let Some(module) = self.modules.get(name) else {
            self.sink
                .write_line(&format!("[warn] module not found: {name}"));
            return;
        };
        self.state.registry.merge_module(&module);
        let newly = self.state.imported.insert(module.name.to_string());
        tracing::debug!(module = module.name, newly, "module imported");
        self.sink.write_line(&format!(
            "[import] {} ({} functions)",
            module.name,
            module.entries.len()
        ));
    }

    fn call(&mut self, name: &str, args_text: &str) -> Result<(), EvalError> {
        let args = self.evaluate_arguments(args_text)?;
        let Some(entry) = self.state.registry.lookup(name) else {
            self.sink
                .write_line(&format!("[warn] undefined function: {name}"));
            return Ok(());
        };
        let result = self.invoke(&entry, name, args_text, &args)?;
        if entry.echo == Echo::Traced {
            let shown = args
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            self.sink
                .write_line(&format!("[call] {name}({shown}) = {result}"));
        }
        Ok(())
    }

    fn invoke(
        &mut self,
        entry: &Arc<FunctionEntry>,
        name: &str,
        args_text: &str,
        args: &[Value],
    ) -> EvalResult {
        let (result, updated) = {
            let ctx = CallContext::new(self.sink, &self.state.registry, name);
            let result = entry.call(&ctx, args);
            (result, ctx.take_update())
        };
        if let Some(updated) = updated {
            self.write_back(args_text, updated);
        }
        result
    }

    /// Rebind the first argument after a mutator, when it was written as a
    /// bound variable. Any other receiver expression keeps its value.
    fn write_back(&mut self, args_text: &str, updated: Value) {
        let Some(receiver) = split_arguments(args_text).into_iter().next() else {
            return;
        };
        if is_identifier(&receiver) && self.state.env.contains(&receiver) {
            tracing::trace!(variable = %receiver, "mutator updated variable");
            self.state.env.define(receiver, updated);
        }
    }

    fn evaluate_arguments(&mut self, text: &str) -> Result<Vec<Value>, EvalError> {
        split_arguments(text)
            .iter()
            .map(|arg| self.resolve_operand(arg))
            .collect()
    }

    /// A call to a registered function is invoked; anything else goes
    /// through the expression evaluator.
    fn resolve_operand(&mut self, text: &str) -> EvalResult {
        if let Some((name, args_text)) = split_call(text) {
            if let Some(entry) = self.state.registry.lookup(name) {
                let args = self.evaluate_arguments(args_text)?;
                return self.invoke(&entry, name, args_text, &args);
            }
        }
        Ok(evaluate(text, &self.state.env))
    }
}

#[cfg(test)]
mod tests;
