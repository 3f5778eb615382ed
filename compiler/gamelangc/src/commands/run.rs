//! The `run` command: load a `.ln` file and execute it line by line.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gamelang_eval::{Interpreter, RunReport, SharedSink};

/// Extension a source file must carry unless `--any-ext` is given.
pub const SOURCE_EXTENSION: &str = "ln";

/// Options for `gamelang run`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Print the file banner before and the summary after execution.
    pub show_banner: bool,
    /// Skip the `.ln` extension check.
    pub allow_any_extension: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            show_banner: true,
            allow_any_extension: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("file not found: {}", .path.display())]
    MissingFile { path: PathBuf },

    #[error("not a GameLang file (expected .ln): {}", .path.display())]
    NotGameLangFile { path: PathBuf },

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Split `run` arguments into options and the first non-flag argument.
///
/// Unknown flags are ignored.
pub fn parse_run_args(args: &[String]) -> (RunOptions, Option<&str>) {
    let mut options = RunOptions::default();
    let mut path = None;
    for arg in args {
        match arg.as_str() {
            "--no-banner" | "-q" => options.show_banner = false,
            "--any-ext" => options.allow_any_extension = true,
            other if !other.starts_with('-') && path.is_none() => path = Some(other),
            other => tracing::debug!(flag = other, "ignoring run argument"),
        }
    }
    (options, path)
}

/// Check the path and read its contents.
pub fn load_source(path: &Path, options: RunOptions) -> Result<String, RunError> {
    if !path.is_file() {
        return Err(RunError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION));
    if !options.allow_any_extension && !has_extension {
        return Err(RunError::NotGameLangFile {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|source| RunError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Execute already-loaded source, framed by banners when enabled.
///
/// Each run starts from a cleared sink brought to the front, so output
/// from an earlier run never mixes with this one.
pub fn run_source(
    path: &Path,
    source: &str,
    options: RunOptions,
    sink: &SharedSink,
) -> RunReport {
    sink.clear();
    sink.show();
    if options.show_banner {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        sink.write_line("=== GameLang ===");
        sink.write_line(&format!("file: {name}"));
        sink.write_line(&format!("path: {}", path.display()));
        sink.write_line(&format!("lines: {}", source.lines().count()));
    }

    let mut interpreter = Interpreter::new(Arc::clone(sink));
    let report = interpreter.execute(source);

    if options.show_banner {
        sink.write_line(&format!(
            "=== finished: {} statements, {} errors ===",
            report.executed,
            report.errors.len()
        ));
    }
    report
}

/// Load and run a GameLang file.
pub fn run_file(path: &Path, options: RunOptions, sink: &SharedSink) -> Result<RunReport, RunError> {
    let source = load_source(path, options)?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "running file");
    Ok(run_source(path, &source, options, sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parse_defaults() {
        let argv = args(&["game.ln"]);
        assert_eq!(parse_run_args(&argv), (RunOptions::default(), Some("game.ln")));
    }

    #[test]
    fn parse_flags_anywhere() {
        let argv = args(&["--no-banner", "game.txt", "--any-ext", "extra.ln", "--verbose"]);
        let (options, path) = parse_run_args(&argv);
        assert!(!options.show_banner);
        assert!(options.allow_any_extension);
        assert_eq!(path, Some("game.txt"));
    }

    #[test]
    fn parse_without_path() {
        let argv = args(&["--no-banner"]);
        assert_eq!(parse_run_args(&argv).1, None);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_source(Path::new("/definitely/not/here.ln"), RunOptions::default());
        assert!(matches!(err, Err(RunError::MissingFile { .. })));
    }
}
