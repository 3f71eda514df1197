//! tracing setup for the `oac` binary.
//!
//! Events go to `oac.log` in the XDG state dir; `RUST_LOG` overrides the filter.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,oac=debug,oac_core=debug";

/// Destination of one log write. A handle that cannot be cloned degrades to stderr.
enum LogSink {
    File(std::fs::File),
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

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to `~/.local/state/oac/oac.log`.
/// Errors if the log file cannot be opened; nothing is installed in that case.
pub fn init_logging() -> Result<()> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("oac")?;
    let log_dir = xdg_dirs.get_state_home().join("oac");

    fs::create_dir_all(&log_dir)?;
    let log_file_path: PathBuf = log_dir.join("oac.log");

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    struct SharedLogFile(std::fs::File);

    impl<'a> MakeWriter<'a> for SharedLogFile {
        type Writer = LogSink;

        fn make_writer(&'a self) -> Self::Writer {
            self.0
                .try_clone()
                .map(LogSink::File)
                .unwrap_or(LogSink::Stderr)
        }
    }

    let writer: BoxMakeWriter = BoxMakeWriter::new(SharedLogFile(file));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!("oac logging initialized at {}", log_file_path.display());

    Ok(())
}

/// Install the global subscriber writing to stderr.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
