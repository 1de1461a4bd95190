use std::io::{IsTerminal, Write};
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use parking_lot::Mutex;

use crate::theme;

/// Level used when `RUST_LOG` is unset or unparsable
const DEFAULT_FILTER: LevelFilter = LevelFilter::Warn;

struct CommanderLogger {
    file: Option<Mutex<std::fs::File>>,
    filter: LevelFilter,
    color: bool,
    start: Instant,
}

impl Log for CommanderLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // stdout carries command output, keep diagnostics on stderr
        if self.color {
            let dim = theme::DIM;
            eprintln!("{dim}[{}]{dim:#} {}", record.level(), record.args());
        } else {
            eprintln!("[{}] {}", record.level(), record.args());
        }

        if let Some(ref file) = self.file {
            let elapsed = self.start.elapsed().as_secs_f64();
            let _ = writeln!(
                file.lock(),
                "[{elapsed:.3}s] [{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Some(ref file) = self.file {
            let _ = file.lock().flush();
        }
    }
}

fn parse_filter(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_FILTER)
}

/// Initialize the global logger, filtered by `RUST_LOG` (default `warn`).
///
/// Records go to stderr and, when given, to `log_file` as well.
///
/// # Errors
///
/// Returns `SetLoggerError` if a logger was already installed.
pub fn init(log_file: Option<std::fs::File>) -> Result<(), SetLoggerError> {
    let filter = parse_filter(std::env::var("RUST_LOG").ok().as_deref());

    let logger = CommanderLogger {
        file: log_file.map(Mutex::new),
        filter,
        color: std::io::stderr().is_terminal(),
        start: Instant::now(),
    };

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(filter);
    Ok(())
}
