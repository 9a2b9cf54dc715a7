//! Logging init: file under XDG state dir, or graceful fallback to stderr.
//!
//! The operator picks a verbosity level on the command line; an invalid
//! name is rejected here before any network or filesystem work starts.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Parses an operator-supplied verbosity name.
///
/// Accepts `DEBUG`, `INFO`, `WARNING` (or `WARN`), `ERROR`, and `CRITICAL`
/// case-insensitively. `CRITICAL` collapses to [`Level::ERROR`], the most
/// severe level the subscriber distinguishes.
pub fn parse_level(name: &str) -> Result<Level> {
    match name.to_ascii_uppercase().as_str() {
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" | "WARNING" => Ok(Level::WARN),
        "ERROR" | "CRITICAL" => Ok(Level::ERROR),
        other => anyhow::bail!("invalid log level: {}", other),
    }
}

/// `RUST_LOG` still wins when set; otherwise the CLI level applies globally.
fn level_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

/// Writer that is either the log file or stderr (used when file clone fails).
enum LogSink {
    File(fs::File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct SinkMaker(fs::File);

impl<'a> MakeWriter<'a> for SinkMaker {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(LogSink::File)
            .unwrap_or(LogSink::Stderr)
    }
}

/// Initialize structured logging to `~/.local/state/mfr/mfr.log`.
/// On failure (e.g. state dir unwritable), returns Err so the caller can
/// fall back to [`init_logging_stderr`].
pub fn init_logging(level: Level) -> Result<()> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mfr")?;
    let log_dir = xdg_dirs.get_state_home();

    fs::create_dir_all(&log_dir)?;
    let log_file_path: PathBuf = log_dir.join("mfr.log");

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(level_filter(level))
        .with_writer(SinkMaker(file))
        .with_ansi(false)
        .init();

    tracing::info!("mfr logging initialized at {}", log_file_path.display());

    Ok(())
}

/// Initialize logging to stderr only (no file).
pub fn init_logging_stderr(level: Level) {
    tracing_subscriber::fmt()
        .with_env_filter(level_filter(level))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_five_operator_levels_parse() {
        assert_eq!(parse_level("DEBUG").unwrap(), Level::DEBUG);
        assert_eq!(parse_level("INFO").unwrap(), Level::INFO);
        assert_eq!(parse_level("WARNING").unwrap(), Level::WARN);
        assert_eq!(parse_level("ERROR").unwrap(), Level::ERROR);
        assert_eq!(parse_level("CRITICAL").unwrap(), Level::ERROR);
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(parse_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_level("Warn").unwrap(), Level::WARN);
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(parse_level("VERBOSE").is_err());
        assert!(parse_level("").is_err());
    }
}
