//! Output channel and input prompt supplied by the host.
//!
//! The interpreter never owns a terminal or an editor panel. Everything it
//! prints (program output and trace lines alike) goes through a [`Sink`]:
//! - `StdoutSink`: the command-line runner
//! - `BufferSink`: tests and embedding, captures lines and answers prompts
//!   from a scripted queue
//! - `SilentSink`: discards everything
//!
//! Writes are serialized by the sink, so lines always appear in the order
//! they were emitted.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Host-provided output/input channel.
pub trait Sink: Send + Sync {
    /// Append one line of output.
    fn write_line(&self, text: &str);

    /// Discard everything written so far, where the sink keeps anything.
    fn clear(&self);

    /// Bring the output in front of the user.
    fn show(&self);

    /// Ask the user for a line of text. `None` means the prompt was
    /// cancelled (or input is exhausted).
    fn prompt_input(&self, message: &str) -> Option<String>;
}

/// Writes to stdout and reads prompts from stdin.
#[derive(Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_line(&self, text: &str) {
        println!("{text}");
    }

    fn clear(&self) {
        // Nothing to clear
    }

    fn show(&self) {
        let _ = io::stdout().flush();
    }

    fn prompt_input(&self, message: &str) -> Option<String> {
        print!("{message}");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

#[derive(Default)]
struct BufferState {
    lines: Vec<String>,
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    shown: bool,
}

/// Captures output in memory.
///
/// Prompts are answered from a queue of scripted inputs; once the queue is
/// empty every prompt is treated as cancelled.
#[derive(Default)]
pub struct BufferSink {
    state: Mutex<BufferState>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer that answers the first prompts with `inputs`, in order.
    pub fn with_inputs<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sink = Self::new();
        sink.state
            .lock()
            .inputs
            .extend(inputs.into_iter().map(Into::into));
        sink
    }

    /// Every captured line, in emission order.
    pub fn lines(&self) -> Vec<String> {
        self.state.lock().lines.clone()
    }

    /// Captured output joined with newlines, each line terminated.
    pub fn output(&self) -> String {
        let state = self.state.lock();
        let mut out = String::new();
        for line in &state.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Messages of every prompt shown so far.
    pub fn prompts(&self) -> Vec<String> {
        self.state.lock().prompts.clone()
    }

    pub fn was_shown(&self) -> bool {
        self.state.lock().shown
    }
}

impl Sink for BufferSink {
    fn write_line(&self, text: &str) {
        self.state.lock().lines.push(text.to_string());
    }

    fn clear(&self) {
        self.state.lock().lines.clear();
    }

    fn show(&self) {
        self.state.lock().shown = true;
    }

    fn prompt_input(&self, message: &str) -> Option<String> {
        let mut state = self.state.lock();
        state.prompts.push(message.to_string());
        state.inputs.pop_front()
    }
}

/// Discards all output; every prompt is cancelled.
#[derive(Default)]
pub struct SilentSink;

impl Sink for SilentSink {
    fn write_line(&self, _text: &str) {}

    fn clear(&self) {}

    fn show(&self) {}

    fn prompt_input(&self, _message: &str) -> Option<String> {
        None
    }
}

/// Sink shared between an interpreter and its host.
pub type SharedSink = Arc<dyn Sink>;

/// Create a sink writing to stdout.
pub fn stdout_sink() -> SharedSink {
    Arc::new(StdoutSink)
}

/// Create a sink that discards all output.
pub fn silent_sink() -> SharedSink {
    Arc::new(SilentSink)
}

#[cfg(test)]
mod tests;
