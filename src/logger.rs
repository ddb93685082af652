// Logger - backend for the `log` facade
//
// Provides:
// - Configurable log levels (serde-friendly for the config file)
// - A bounded in-memory buffer of recent entries
// - Log output to a file, or to stderr when no file is given

use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{LevelFilter, Log, Metadata, Record};
use serde::{Deserialize, Serialize};

/// Default capacity of the in-memory buffer
pub const DEFAULT_BUFFER_SIZE: usize = 10_000;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging
    None,
    /// Error messages only
    Error,
    /// Warnings and errors
    #[default]
    Warning,
    /// Info, warnings, and errors
    Info,
    /// Debug information
    Debug,
    /// Verbose trace logging (includes the per-instruction CPU trace)
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::None => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(LogLevel::None),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// One recorded log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: log::Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:<5} {}] {}", self.level, self.target, self.message)
    }
}

/// Errors from installing the global logger
#[derive(Debug)]
pub enum LoggerError {
    /// The log file could not be created
    Io(io::Error),
    /// Another logger is already registered with the `log` crate
    AlreadyInstalled,
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::Io(err) => write!(f, "cannot open log file: {}", err),
            LoggerError::AlreadyInstalled => write!(f, "a logger is already installed"),
        }
    }
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggerError::Io(err) => Some(err),
            LoggerError::AlreadyInstalled => None,
        }
    }
}

impl From<io::Error> for LoggerError {
    fn from(err: io::Error) -> Self {
        LoggerError::Io(err)
    }
}

struct LoggerState {
    /// In-memory buffer of recent entries
    buffer: VecDeque<LogEntry>,
    /// Maximum number of entries in the buffer (0 = unlimited)
    max_buffer_size: usize,
    output_file: Option<File>,
    echo_stderr: bool,
}

/// Logger
///
/// Keeps recent entries in memory and mirrors them to a file or stderr.
pub struct Logger {
    level: LogLevel,
    state: Mutex<LoggerState>,
}

impl Logger {
    /// Create a logger that only buffers in memory
    pub fn new(level: LogLevel) -> Self {
        Logger {
            level,
            state: Mutex::new(LoggerState {
                buffer: VecDeque::new(),
                max_buffer_size: DEFAULT_BUFFER_SIZE,
                output_file: None,
                echo_stderr: false,
            }),
        }
    }

    /// Build a logger and register it as the global `log` backend
    ///
    /// Entries go to `file` when given, otherwise to stderr. The returned
    /// handle gives access to the in-memory buffer.
    ///
    /// # Errors
    /// `LoggerError::Io` if the file cannot be created,
    /// `LoggerError::AlreadyInstalled` if a logger was registered before
    pub fn install(level: LogLevel, file: Option<&Path>) -> Result<Arc<Logger>, LoggerError> {
        let logger = Logger::new(level);
        match file {
            Some(path) => logger.open_log_file(path)?,
            None => logger.lock().echo_stderr = true,
        }

        let logger = Arc::new(logger);
        log::set_boxed_logger(Box::new(SharedLogger(Arc::clone(&logger))))
            .map_err(|_| LoggerError::AlreadyInstalled)?;
        log::set_max_level(level.to_level_filter());
        Ok(logger)
    }

    pub fn log_level(&self) -> LogLevel {
        self.level
    }

    /// Set maximum buffer size
    ///
    /// When the buffer exceeds this size, old entries are removed.
    /// Set to 0 for unlimited size.
    pub fn set_max_buffer_size(&self, size: usize) {
        let mut state = self.lock();
        state.max_buffer_size = size;
        if size > 0 {
            while state.buffer.len() > size {
                state.buffer.pop_front();
            }
        }
    }

    /// Open a log file for output
    pub fn open_log_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        self.lock().output_file = Some(file);
        Ok(())
    }

    /// Record an entry in the buffer and mirror it to the outputs
    pub fn add_entry(&self, entry: LogEntry) {
        let mut state = self.lock();

        if let Some(file) = state.output_file.as_mut() {
            // Write failures are dropped
            let _ = writeln!(file, "{}", entry);
        }
        if state.echo_stderr {
            eprintln!("{}", entry);
        }

        state.buffer.push_back(entry);
        if state.max_buffer_size > 0 && state.buffer.len() > state.max_buffer_size {
            state.buffer.pop_front();
        }
    }

    /// Number of buffered entries
    pub fn len(&self) -> usize {
        self.lock().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the last N entries, oldest first
    pub fn last_entries(&self, count: usize) -> Vec<LogEntry> {
        let state = self.lock();
        let start = state.buffer.len().saturating_sub(count);
        state.buffer.iter().skip(start).cloned().collect()
    }

    pub fn clear_buffer(&self) {
        self.lock().buffer.clear();
    }

    /// Format the last N entries, one per line
    pub fn format_last_entries(&self, count: usize) -> String {
        self.last_entries(count)
            .iter()
            .map(|entry| format!("{}\n", entry))
            .collect()
    }

    /// Lock the state, recovering it from a poisoned mutex
    fn lock(&self) -> MutexGuard<'_, LoggerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level.to_level_filter()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.add_entry(LogEntry {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        });
    }

    fn flush(&self) {
        if let Some(file) = self.lock().output_file.as_mut() {
            let _ = file.flush();
        }
    }
}

/// Registered form of a logger whose handle the caller keeps
struct SharedLogger(Arc<Logger>);

impl Log for SharedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.0.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        self.0.log(record)
    }

    fn flush(&self) {
        self.0.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Record};

    fn emit(logger: &Logger, level: Level, target: &str, message: &str) {
        logger.log(
            &Record::builder()
                .args(format_args!("{}", message))
                .level(level)
                .target(target)
                .build(),
        );
    }

    #[test]
    fn test_logger_creation() {
        let logger = Logger::new(LogLevel::None);
        assert_eq!(logger.log_level(), LogLevel::None);
        assert!(logger.is_empty());
    }

    #[test]
    fn test_level_filters_records() {
        let logger = Logger::new(LogLevel::Info);
        emit(&logger, Level::Info, "nes", "kept");
        emit(&logger, Level::Debug, "nes", "dropped");
        emit(&logger, Level::Trace, "cpu", "dropped");
        emit(&logger, Level::Error, "nes", "kept");
        assert_eq!(logger.len(), 2);
    }

    #[test]
    fn test_none_level_records_nothing() {
        let logger = Logger::new(LogLevel::None);
        emit(&logger, Level::Error, "nes", "x");
        assert!(logger.is_empty());
    }

    #[test]
    fn test_entry_format() {
        let logger = Logger::new(LogLevel::Trace);
        emit(&logger, Level::Trace, "cpu", "C000  4C F5 C5");
        assert_eq!(logger.format_last_entries(1), "[TRACE cpu] C000  4C F5 C5\n");
    }

    #[test]
    fn test_max_buffer_size() {
        let logger = Logger::new(LogLevel::Info);
        logger.set_max_buffer_size(3);
        for message in ["1", "2", "3", "4"] {
            emit(&logger, Level::Info, "nes", message);
        }

        let entries = logger.last_entries(10);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "2", "Oldest entry dropped");
    }

    #[test]
    fn test_last_entries_and_clear() {
        let logger = Logger::new(LogLevel::Info);
        for message in ["1", "2", "3"] {
            emit(&logger, Level::Info, "nes", message);
        }
        let last: Vec<String> = logger.last_entries(2).into_iter().map(|e| e.message).collect();
        assert_eq!(last, ["2", "3"]);

        logger.clear_buffer();
        assert!(logger.is_empty());
    }

    #[test]
    fn test_log_file_output() {
        let path = std::env::temp_dir().join(format!("nes_core_logger_{}.log", std::process::id()));
        let logger = Logger::new(LogLevel::Warning);
        logger.open_log_file(&path).unwrap();
        emit(&logger, Level::Warn, "mapper", "ignored PRG write");
        logger.flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(contents, "[WARN  mapper] ignored PRG write\n");
    }

    #[test]
    fn test_log_level_parsing_and_ordering() {
        assert_eq!("trace".parse::<LogLevel>(), Ok(LogLevel::Trace));
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert!("loud".parse::<LogLevel>().is_err());

        assert!(LogLevel::None < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Debug < LogLevel::Trace);
        assert_eq!(LogLevel::default(), LogLevel::Warning);
    }
}
