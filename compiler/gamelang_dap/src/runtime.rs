//! Synthetic runtime behind a debug session.
//!
//! The target program is never executed. Stepping pushes and pops
//! illustrative frames on a fake call stack, and the environment only holds
//! what the session itself seeds into it.

use gamelang_eval::{evaluate, Environment, Value};

/// Lines of synthetic frames are drawn from `1..=MAX_SYNTHETIC_LINE`.
pub const MAX_SYNTHETIC_LINE: i64 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub name: String,
    pub file: String,
    /// 1-based.
    pub line: i64,
}

pub struct SyntheticRuntime {
    program: String,
    env: Environment,
    call_stack: Vec<Frame>,
    running: bool,
    rng: fastrand::Rng,
}

impl SyntheticRuntime {
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_rng(program, fastrand::Rng::new())
    }

    /// A runtime whose frame lines are reproducible.
    pub fn with_seed(program: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(program, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(program: impl Into<String>, rng: fastrand::Rng) -> Self {
        let mut env = Environment::new();
        env.define("__name__", Value::string("__main__"));
        SyntheticRuntime {
            program: program.into(),
            env,
            call_stack: Vec::new(),
            running: false,
            rng,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn depth(&self) -> usize {
        self.call_stack.len()
    }

    /// Frames from the most recent push down to the oldest.
    pub fn stack_trace(&self) -> impl Iterator<Item = &Frame> {
        self.call_stack.iter().rev()
    }

    pub fn continue_execution(&mut self) {
        self.running = true;
    }

    pub fn step_over(&mut self) {
        self.push_frame("step_over");
    }

    pub fn step_into(&mut self) {
        self.push_frame("step_into");
    }

    /// Pops the top frame; a no-op on an empty stack.
    pub fn step_out(&mut self) {
        self.call_stack.pop();
    }

    pub fn terminate(&mut self) {
        self.running = false;
    }

    pub fn evaluate(&self, expression: &str) -> Value {
        evaluate(expression, &self.env)
    }

    fn push_frame(&mut self, name: &str) {
        let line = self.rng.i64(1..=MAX_SYNTHETIC_LINE);
        tracing::trace!(name, line, depth = self.call_stack.len() + 1, "synthetic frame pushed");
        self.call_stack.push(Frame {
            name: name.to_string(),
            file: self.program.clone(),
            line,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn seeds_dunder_name() {
        let runtime = SyntheticRuntime::new("main.ln");
        assert_eq!(
            runtime.environment().lookup("__name__"),
            Some(&Value::string("__main__"))
        );
        assert_eq!(runtime.environment().locals().count(), 0);
    }

    #[test]
    fn steps_push_and_pop_frames() {
        let mut runtime = SyntheticRuntime::with_seed("main.ln", 7);
        runtime.step_over();
        runtime.step_into();
        let names: Vec<&str> = runtime.stack_trace().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["step_into", "step_over"]);
        for frame in runtime.stack_trace() {
            assert!((1..=MAX_SYNTHETIC_LINE).contains(&frame.line));
            assert_eq!(frame.file, "main.ln");
        }

        runtime.step_out();
        runtime.step_out();
        runtime.step_out();
        assert_eq!(runtime.depth(), 0);
    }

    #[test]
    fn seeded_runtimes_agree() {
        let mut a = SyntheticRuntime::with_seed("a.ln", 42);
        let mut b = SyntheticRuntime::with_seed("a.ln", 42);
        for _ in 0..5 {
            a.step_over();
            b.step_over();
        }
        assert!(a.stack_trace().eq(b.stack_trace()));
    }

    #[test]
    fn continue_and_terminate_toggle_running() {
        let mut runtime = SyntheticRuntime::new("main.ln");
        assert!(!runtime.is_running());
        runtime.continue_execution();
        assert!(runtime.is_running());
        runtime.terminate();
        assert!(!runtime.is_running());
    }

    #[test]
    fn evaluates_against_its_environment() {
        let runtime = SyntheticRuntime::new("main.ln");
        assert_eq!(runtime.evaluate("__name__"), Value::string("__main__"));
        assert_eq!(runtime.evaluate("1+2"), Value::string("12"));
    }
}
