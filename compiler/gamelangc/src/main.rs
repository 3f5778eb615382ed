//! GameLang CLI
//!
//! Runs `.ln` scripts and hosts the debug adapter.

use std::path::Path;

use gamelang_eval::{stdout_sink, StdoutSink};
use gamelangc::commands::{
    parse_run_args, run_file, search_builtins, serve_stdio, RunOptions, SOURCE_EXTENSION,
};

fn main() {
    gamelangc::init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let (options, path) = parse_run_args(&args[2..]);
            let Some(path) = path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: gamelang run <file.{SOURCE_EXTENSION}> [--no-banner] [--any-ext]");
                std::process::exit(1);
            };
            run_or_exit(path, options);
        }
        "dap" => {
            if let Err(err) = serve_stdio() {
                eprintln!("error: debug adapter stopped: {err}");
                std::process::exit(1);
            }
        }
        "search" => {
            if args.len() < 3 {
                eprintln!("Usage: gamelang search <term>");
                eprintln!("Example: gamelang search random");
                std::process::exit(1);
            }
            let term = args[2..].join(" ");
            if search_builtins(&term, &StdoutSink) == 0 {
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("GameLang {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // If it looks like a source file, try to run it
            if Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
            {
                let (options, _) = parse_run_args(&args[2..]);
                run_or_exit(command, options);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn run_or_exit(path: &str, options: RunOptions) {
    if let Err(err) = run_file(Path::new(path), options, &stdout_sink()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("GameLang interpreter and debug adapter");
    println!();
    println!("Usage: gamelang <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.ln>        Run a GameLang script");
    println!("  <file.ln>            Shorthand for `run <file.ln>`");
    println!("  dap                  Serve the Debug Adapter Protocol on stdin/stdout");
    println!("  search <term>        Search builtins by name, alias or keyword");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --no-banner, -q     Do not print the file banner and summary");
    println!("  --any-ext           Accept files without the .ln extension");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=gamelang_eval=debug) for diagnostics on stderr.");
}
