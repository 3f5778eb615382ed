//! Debug session state machine.
//!
//! ```text
//! Uninitialized ─initialize─▶ Initialized ─launch─▶ Launched
//!                                                     │
//!                     ┌──────────continue─────────────┤
//!                     ▼                               ▼
//!                  Running ◀──continue/next/step──▶ Stepping
//!                     └───────terminate/disconnect──────┴──▶ Terminated
//! ```
//!
//! Every request produces exactly one response, correlated by
//! `request_seq`. Events (`initialized` after a launch, `terminated` after
//! a terminate) follow the response. Failures are [`RequestError`] values
//! that become error responses; nothing here can bring the session down.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use gamelang_eval::{FunctionRegistry, Value};

use crate::protocol::{
    Breakpoint, Capabilities, CompletionItem, CompletionKind, CompletionsArguments,
    CompletionsBody, EmptyBody, ErrorBody, ErrorCode, ErrorMessage, EvaluateArguments,
    EvaluateBody, Event, LaunchArguments, OutgoingMessage, Request, Response, ResponseBody,
    Scope, ScopesBody, SetBreakpointsArguments, SetBreakpointsBody, Source, StackFrame,
    StackTraceBody, Thread, ThreadsBody, Variable, VariablesArguments, VariablesBody,
};
use crate::runtime::SyntheticRuntime;

/// The only thread the session reports.
pub const THREAD_ID: i64 = 1;
pub const THREAD_NAME: &str = "GameLang Thread";

/// Reference id of the "Local" scope.
pub const LOCAL_SCOPE: i64 = 1;
/// Reference id of the "Global" scope.
pub const GLOBAL_SCOPE: i64 = 2;

/// Keywords offered by `completions`, ahead of builtin names.
pub const COMPLETION_KEYWORDS: &[&str] = &[
    "fn", "class", "if", "elif", "else", "while", "for", "return", "var", "import", "use",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Initialized,
    Launched,
    Running,
    Stepping,
    Terminated,
}

/// A request the session knows how to answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Initialize,
    Launch,
    SetBreakpoints,
    ConfigurationDone,
    Threads,
    StackTrace,
    Scopes,
    Variables,
    Continue,
    Next,
    StepIn,
    StepOut,
    Evaluate,
    Completions,
    Restart,
    Terminate,
    Disconnect,
    Unknown,
}

impl Command {
    fn from_name(name: &str) -> Self {
        match name {
            "initialize" => Command::Initialize,
            "launch" => Command::Launch,
            "setBreakpoints" => Command::SetBreakpoints,
            "configurationDone" => Command::ConfigurationDone,
            "threads" => Command::Threads,
            "stackTrace" => Command::StackTrace,
            "scopes" => Command::Scopes,
            "variables" => Command::Variables,
            "continue" => Command::Continue,
            "next" => Command::Next,
            "stepIn" => Command::StepIn,
            "stepOut" => Command::StepOut,
            "evaluate" => Command::Evaluate,
            "completions" => Command::Completions,
            "restart" => Command::Restart,
            "terminate" => Command::Terminate,
            "disconnect" => Command::Disconnect,
            _ => Command::Unknown,
        }
    }
}

/// A failed request, answered with an error response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestError {
    pub code: ErrorCode,
    pub message: String,
}

impl RequestError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        RequestError {
            code,
            message: message.into(),
        }
    }

    fn unrecognized(command: &str) -> Self {
        Self::new(
            ErrorCode::UnrecognizedCommand,
            format!("Unrecognized command: {command}"),
        )
    }

    fn program_not_specified() -> Self {
        Self::new(ErrorCode::ProgramNotSpecified, "Program not specified")
    }

    fn runtime_not_initialized() -> Self {
        Self::new(ErrorCode::RuntimeNotInitialized, "Runtime not initialized")
    }

    fn invalid_arguments(command: &str, reason: &dyn std::fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidArguments,
            format!("Invalid arguments for {command}: {reason}"),
        )
    }
}

/// A breakpoint as the client set it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredBreakpoint {
    pub line: i64,
    pub condition: Option<String>,
}

type Handled = Result<ResponseBody, RequestError>;

/// One editor connection.
pub struct DebugSession {
    state: SessionState,
    runtime: Option<SyntheticRuntime>,
    breakpoints: IndexMap<String, Vec<StoredBreakpoint>>,
    next_seq: i64,
    seed: Option<u64>,
    pending_events: Vec<&'static str>,
    finished: bool,
}

impl Default for DebugSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugSession {
    pub fn new() -> Self {
        DebugSession {
            state: SessionState::Uninitialized,
            runtime: None,
            breakpoints: IndexMap::new(),
            next_seq: 1,
            seed: None,
            pending_events: Vec::new(),
            finished: false,
        }
    }

    /// A session whose runtimes draw reproducible frame lines.
    pub fn with_seed(seed: u64) -> Self {
        DebugSession {
            seed: Some(seed),
            ..Self::new()
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn runtime(&self) -> Option<&SyntheticRuntime> {
        self.runtime.as_ref()
    }

    pub fn runtime_mut(&mut self) -> Option<&mut SyntheticRuntime> {
        self.runtime.as_mut()
    }

    /// Breakpoints currently set for `path`.
    pub fn breakpoints(&self, path: &str) -> &[StoredBreakpoint] {
        self.breakpoints.get(path).map(Vec::as_slice).unwrap_or_default()
    }

    /// Set once `disconnect` has been answered.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Answer one request: the response first, then any events it caused.
    pub fn handle_request(&mut self, request: &Request) -> Vec<OutgoingMessage> {
        let command = Command::from_name(&request.command);
        tracing::debug!(seq = request.seq, command = %request.command, "dap request");

        let outcome = self.dispatch(command, request);
        let response = match outcome {
            Ok(body) => Response {
                seq: self.take_seq(),
                request_seq: request.seq,
                success: true,
                command: request.command.clone(),
                message: None,
                body: Some(body),
            },
            Err(err) => {
                tracing::debug!(code = err.code.id(), reason = %err.message, "dap request failed");
                Response {
                    seq: self.take_seq(),
                    request_seq: request.seq,
                    success: false,
                    command: request.command.clone(),
                    message: Some(err.message.clone()),
                    body: Some(ResponseBody::Error(ErrorBody {
                        error: ErrorMessage {
                            id: err.code.id(),
                            format: err.message,
                        },
                    })),
                }
            }
        };

        let mut messages = vec![OutgoingMessage::Response(response)];
        for event in std::mem::take(&mut self.pending_events) {
            messages.push(OutgoingMessage::Event(Event {
                seq: self.take_seq(),
                event: event.to_string(),
                body: None,
            }));
        }
        messages
    }

    fn take_seq(&mut self) -> i64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn dispatch(&mut self, command: Command, request: &Request) -> Handled {
        match command {
            Command::Initialize => {
                self.state = SessionState::Initialized;
                Ok(ResponseBody::Capabilities(Box::new(Capabilities::gamelang())))
            }
            Command::Launch => self.launch(request),
            Command::SetBreakpoints => self.set_breakpoints(request),
            Command::ConfigurationDone => Ok(empty()),
            Command::Threads => Ok(ResponseBody::Threads(ThreadsBody {
                threads: vec![Thread {
                    id: THREAD_ID,
                    name: THREAD_NAME.to_string(),
                }],
            })),
            Command::StackTrace => self.stack_trace(),
            Command::Scopes => Ok(ResponseBody::Scopes(ScopesBody {
                scopes: vec![scope("Local", LOCAL_SCOPE), scope("Global", GLOBAL_SCOPE)],
            })),
            Command::Variables => self.variables(request),
            Command::Continue => {
                self.with_runtime(SessionState::Running, SyntheticRuntime::continue_execution);
                Ok(empty())
            }
            Command::Next => {
                self.with_runtime(SessionState::Stepping, SyntheticRuntime::step_over);
                Ok(empty())
            }
            Command::StepIn => {
                self.with_runtime(SessionState::Stepping, SyntheticRuntime::step_into);
                Ok(empty())
            }
            Command::StepOut => {
                self.with_runtime(SessionState::Stepping, SyntheticRuntime::step_out);
                Ok(empty())
            }
            Command::Evaluate => self.evaluate(request),
            Command::Completions => self.completions(request),
            Command::Restart => self.restart(),
            Command::Terminate => {
                self.terminate_runtime();
                self.pending_events.push("terminated");
                Ok(empty())
            }
            Command::Disconnect => {
                self.terminate_runtime();
                self.finished = true;
                Ok(empty())
            }
            Command::Unknown => Err(RequestError::unrecognized(&request.command)),
        }
    }

    fn launch(&mut self, request: &Request) -> Handled {
        let args: LaunchArguments = arguments(request)?;
        let Some(program) = args.program.filter(|p| !p.is_empty()) else {
            return Err(RequestError::program_not_specified());
        };
        tracing::debug!(%program, "launching synthetic runtime");
        self.runtime = Some(self.fresh_runtime(program));
        self.state = SessionState::Launched;
        self.pending_events.push("initialized");
        Ok(empty())
    }

    fn restart(&mut self) -> Handled {
        let program = self
            .runtime
            .as_ref()
            .map(|runtime| runtime.program().to_string())
            .ok_or_else(RequestError::runtime_not_initialized)?;
        self.runtime = Some(self.fresh_runtime(program));
        self.state = SessionState::Launched;
        Ok(empty())
    }

    fn fresh_runtime(&self, program: String) -> SyntheticRuntime {
        match self.seed {
            Some(seed) => SyntheticRuntime::with_seed(program, seed),
            None => SyntheticRuntime::new(program),
        }
    }

    /// Replaces the list for the source path. Every breakpoint is reported
    /// verified at the line it was requested on.
    fn set_breakpoints(&mut self, request: &Request) -> Handled {
        let args: SetBreakpointsArguments = arguments(request)?;
        let Some(path) = args.source.path else {
            return Err(RequestError::invalid_arguments(
                &request.command,
                &"source.path is required",
            ));
        };

        let stored: Vec<StoredBreakpoint> = args
            .breakpoints
            .into_iter()
            .map(|bp| StoredBreakpoint {
                line: bp.line,
                condition: bp.condition,
            })
            .collect();
        let breakpoints = stored
            .iter()
            .map(|bp| Breakpoint {
                verified: true,
                line: bp.line,
            })
            .collect();
        tracing::debug!(%path, count = stored.len(), "breakpoints replaced");
        self.breakpoints.insert(path, stored);

        Ok(ResponseBody::Breakpoints(SetBreakpointsBody { breakpoints }))
    }

    fn stack_trace(&self) -> Handled {
        let runtime = self
            .runtime
            .as_ref()
            .ok_or_else(RequestError::runtime_not_initialized)?;
        let stack_frames: Vec<StackFrame> = runtime
            .stack_trace()
            .zip(0..)
            .map(|(frame, id)| StackFrame {
                id,
                name: frame.name.clone(),
                source: Source {
                    name: Some(frame.file.clone()),
                    path: Some(frame.file.clone()),
                },
                line: frame.line,
                column: 0,
            })
            .collect();
        let total_frames = i64::try_from(stack_frames.len()).unwrap_or(i64::MAX);
        Ok(ResponseBody::StackTrace(StackTraceBody {
            stack_frames,
            total_frames,
        }))
    }

    /// Local lists names without the global prefix, Global lists the rest.
    /// Without a runtime, or for any other reference, the list is empty.
    fn variables(&self, request: &Request) -> Handled {
        let args: VariablesArguments = arguments(request)?;
        let variables = match &self.runtime {
            Some(runtime) => {
                let env = runtime.environment();
                match args.variables_reference {
                    LOCAL_SCOPE => env.locals().map(variable).collect(),
                    GLOBAL_SCOPE => env.globals().map(variable).collect(),
                    _ => Vec::new(),
                }
            }
            None => Vec::new(),
        };
        Ok(ResponseBody::Variables(VariablesBody { variables }))
    }

    fn evaluate(&self, request: &Request) -> Handled {
        let args: EvaluateArguments = arguments(request)?;
        let runtime = self
            .runtime
            .as_ref()
            .ok_or_else(RequestError::runtime_not_initialized)?;
        let value = runtime.evaluate(&args.expression);
        Ok(ResponseBody::Evaluate(EvaluateBody {
            result: value.to_string(),
            type_name: value.type_name().to_string(),
            variables_reference: 0,
        }))
    }

    /// Keywords, builtin names and session variables starting with the word
    /// under the cursor.
    fn completions(&self, request: &Request) -> Handled {
        let args: CompletionsArguments = arguments(request)?;
        let prefix = word_before_cursor(&args.text, args.column);

        let registry = FunctionRegistry::with_builtins();
        let keywords = COMPLETION_KEYWORDS
            .iter()
            .map(|k| (*k, CompletionKind::Keyword));
        let functions = registry
            .names()
            .into_iter()
            .map(|name| (name, CompletionKind::Function));
        let variables = self
            .runtime
            .iter()
            .flat_map(|runtime| runtime.environment().iter())
            .map(|(name, _)| (name, CompletionKind::Variable));

        let targets = keywords
            .chain(functions)
            .chain(variables)
            .filter(|(label, _)| label.starts_with(prefix))
            .map(|(label, kind)| CompletionItem {
                label: label.to_string(),
                kind,
            })
            .collect();
        Ok(ResponseBody::Completions(CompletionsBody { targets }))
    }

    fn with_runtime(&mut self, next: SessionState, step: fn(&mut SyntheticRuntime)) {
        if let Some(runtime) = self.runtime.as_mut() {
            step(runtime);
            self.state = next;
        }
    }

    fn terminate_runtime(&mut self) {
        if let Some(runtime) = self.runtime.as_mut() {
            runtime.terminate();
        }
        self.state = SessionState::Terminated;
    }
}

fn empty() -> ResponseBody {
    ResponseBody::Empty(EmptyBody {})
}

fn scope(name: &str, variables_reference: i64) -> Scope {
    Scope {
        name: name.to_string(),
        variables_reference,
        expensive: false,
    }
}

fn variable((name, value): (&str, &Value)) -> Variable {
    Variable {
        name: name.to_string(),
        value: value.to_string(),
        type_name: value.type_name().to_string(),
        variables_reference: 0,
    }
}

/// Typed request arguments. Absent arguments read as `{}`, so requests with
/// only optional fields still parse.
fn arguments<T: DeserializeOwned>(request: &Request) -> Result<T, RequestError> {
    let raw = request
        .arguments
        .clone()
        .filter(|value| !value.is_null())
        .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));
    serde_json::from_value(raw).map_err(|err| RequestError::invalid_arguments(&request.command, &err))
}

/// The identifier characters immediately before a 1-based `column`.
fn word_before_cursor(text: &str, column: Option<i64>) -> &str {
    let end = column
        .and_then(|c| usize::try_from(c.saturating_sub(1)).ok())
        .map_or(text.len(), |chars| {
            text.char_indices().nth(chars).map_or(text.len(), |(i, _)| i)
        });
    let head = &text[..end];
    let start = head
        .char_indices()
        .rev()
        .take_while(|&(_, c)| c.is_alphanumeric() || c == '_')
        .last()
        .map_or(end, |(i, _)| i);
    &head[start..]
}
