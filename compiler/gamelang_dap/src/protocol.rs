//! Debug Adapter Protocol wire types.
//!
//! Only the subset the GameLang debug session speaks. Field names follow the
//! protocol exactly (`camelCase` bodies, `request_seq` on responses), since
//! existing front ends match on them.

use serde::{Deserialize, Serialize};

/// Any message read from the client. Only requests are acted on.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IncomingMessage {
    Request(Request),
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Request {
    pub seq: i64,
    pub command: String,
    #[serde(default)]
    pub arguments: Option<serde_json::Value>,
}

impl Request {
    pub fn new(seq: i64, command: impl Into<String>, arguments: Option<serde_json::Value>) -> Self {
        Request {
            seq,
            command: command.into(),
            arguments,
        }
    }
}

/// Any message written to the client.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutgoingMessage {
    Response(Response),
    Event(Event),
}

impl OutgoingMessage {
    pub fn seq(&self) -> i64 {
        match self {
            OutgoingMessage::Response(response) => response.seq,
            OutgoingMessage::Event(event) => event.seq,
        }
    }

    pub fn as_response(&self) -> Option<&Response> {
        match self {
            OutgoingMessage::Response(response) => Some(response),
            OutgoingMessage::Event(_) => None,
        }
    }

    pub fn as_event(&self) -> Option<&Event> {
        match self {
            OutgoingMessage::Event(event) => Some(event),
            OutgoingMessage::Response(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Response {
    pub seq: i64,
    pub request_seq: i64,
    pub success: bool,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ResponseBody>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Event {
    pub seq: i64,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

/// Every response body the session produces.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Capabilities(Box<Capabilities>),
    Breakpoints(SetBreakpointsBody),
    Threads(ThreadsBody),
    StackTrace(StackTraceBody),
    Scopes(ScopesBody),
    Variables(VariablesBody),
    Evaluate(EvaluateBody),
    Completions(CompletionsBody),
    Error(ErrorBody),
    Empty(EmptyBody),
}

/// Serializes as `{}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EmptyBody {}

// Error responses

/// Numeric ids carried in error response bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UnrecognizedCommand = 1014,
    ProgramNotSpecified = 3000,
    RuntimeNotInitialized = 3001,
    InvalidArguments = 3002,
}

impl ErrorCode {
    pub fn id(self) -> i64 {
        self as i64
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: ErrorMessage,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub id: i64,
    pub format: String,
}

// Initialize

/// The fixed capability set answered to `initialize`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(
    clippy::struct_excessive_bools,
    reason = "mirrors the protocol's flat capability object"
)]
pub struct Capabilities {
    pub supports_configuration_done_request: bool,
    pub supports_evaluate_for_hovers: bool,
    pub supports_set_variable: bool,
    pub supports_restart_request: bool,
    pub supports_step_back: bool,
    pub supports_data_breakpoints: bool,
    pub supports_completions_request: bool,
    pub supports_cancel_request: bool,
    pub supports_breakpoint_locations_request: bool,
    pub supports_step_in_targets_request: bool,
    pub supports_exception_filter_options: bool,
    pub supports_exception_info_request: bool,
    pub supports_value_formatting_options: bool,
    pub supports_exception_options: bool,
    pub supports_function_breakpoints: bool,
    pub supports_delayed_stack_trace_loading: bool,
    pub supports_loaded_sources_request: bool,
    pub supports_log_points: bool,
    pub supports_terminate_threads_request: bool,
    pub supports_set_expression: bool,
    pub supports_terminate_request: bool,
    pub supports_modules_request: bool,
    pub supports_conditional_breakpoints: bool,
    pub supports_hit_conditional_breakpoints: bool,
    pub supports_read_memory_request: bool,
    pub supports_write_memory_request: bool,
    pub supports_disassemble_request: bool,
    pub supports_stepping_granularity: bool,
    pub supports_instruction_breakpoints: bool,
    pub supports_exception_breakpoint_filters: bool,
    pub supports_single_thread_execution_requests: bool,
}

impl Capabilities {
    pub fn gamelang() -> Self {
        Capabilities {
            supports_configuration_done_request: true,
            supports_evaluate_for_hovers: true,
            supports_set_variable: true,
            supports_restart_request: true,
            supports_step_back: false,
            supports_data_breakpoints: false,
            supports_completions_request: true,
            supports_cancel_request: true,
            supports_breakpoint_locations_request: true,
            supports_step_in_targets_request: false,
            supports_exception_filter_options: false,
            supports_exception_info_request: false,
            supports_value_formatting_options: false,
            supports_exception_options: false,
            supports_function_breakpoints: false,
            supports_delayed_stack_trace_loading: false,
            supports_loaded_sources_request: false,
            supports_log_points: false,
            supports_terminate_threads_request: false,
            supports_set_expression: false,
            supports_terminate_request: true,
            supports_modules_request: false,
            supports_conditional_breakpoints: true,
            supports_hit_conditional_breakpoints: false,
            supports_read_memory_request: false,
            supports_write_memory_request: false,
            supports_disassemble_request: false,
            supports_stepping_granularity: false,
            supports_instruction_breakpoints: false,
            supports_exception_breakpoint_filters: false,
            supports_single_thread_execution_requests: false,
        }
    }
}

// Request arguments

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LaunchArguments {
    #[serde(default)]
    pub program: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SetBreakpointsArguments {
    pub source: Source,
    #[serde(default)]
    pub breakpoints: Vec<SourceBreakpoint>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SourceBreakpoint {
    pub line: i64,
    #[serde(default)]
    pub condition: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablesArguments {
    pub variables_reference: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct EvaluateArguments {
    pub expression: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CompletionsArguments {
    pub text: String,
    /// 1-based cursor column inside `text`; the end of `text` when absent.
    #[serde(default)]
    pub column: Option<i64>,
}

// Response bodies

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Breakpoint {
    pub verified: bool,
    pub line: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SetBreakpointsBody {
    pub breakpoints: Vec<Breakpoint>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Thread {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ThreadsBody {
    pub threads: Vec<Thread>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StackFrame {
    pub id: i64,
    pub name: String,
    pub source: Source,
    pub line: i64,
    pub column: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackTraceBody {
    pub stack_frames: Vec<StackFrame>,
    pub total_frames: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    pub name: String,
    pub variables_reference: i64,
    pub expensive: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScopesBody {
    pub scopes: Vec<Scope>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub variables_reference: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VariablesBody {
    pub variables: Vec<Variable>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateBody {
    pub result: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub variables_reference: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompletionItem {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: CompletionKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    Function,
    Keyword,
    Variable,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompletionsBody {
    pub targets: Vec<CompletionItem>,
}
