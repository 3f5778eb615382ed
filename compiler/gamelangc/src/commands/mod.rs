//! Command handlers for the GameLang CLI.
//!
//! Each submodule implements one command; `main.rs` only parses argv and
//! dispatches here.

mod dap;
mod run;
mod search;

pub use dap::serve_stdio;
pub use run::{
    load_source, parse_run_args, run_file, run_source, RunError, RunOptions, SOURCE_EXTENSION,
};
pub use search::search_builtins;
