//! Logging for the vob culling engine
//!
//! This module provides a pluggable, process-wide logger:
//! - Customizable sink via the Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error) with a minimum-severity filter
//! - Colored console output by default
//! - File and line information for ERROR logs
//!
//! The logger is the only process-wide state of the crate. Culling managers
//! are plain instances owned by the caller.

use colored::*;
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// # Example
///
/// ```no_run
/// use vob_culling_engine::vobcull::log::{Logger, LogEntry};
///
/// struct FrameLogger;
///
/// impl Logger for FrameLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Forward to the game's console...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source component (e.g. "vobcull::Manager", "vobcull::Buckets")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-frame details (poll results, individual visibility events)
    Trace,

    /// State machine transitions and ignored requests
    Debug,

    /// Lifecycle events (init, bucket population, shutdown)
    Info,

    /// Suspicious but recoverable situations
    Warn,

    /// Errors, reported with file:line
    Error,
}

/// Default logger implementation using colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity_str = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let source = entry.source.bright_blue();

        match (entry.file, entry.line) {
            (Some(file), Some(line)) => println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity_str, source, entry.message, file, line
            ),
            _ => println!(
                "[{}] [{}] [{}] {}",
                timestamp, severity_str, source, entry.message
            ),
        }
    }
}

// ===== GLOBAL SINK =====

struct LogState {
    logger: Box<dyn Logger>,
    min_severity: LogSeverity,
}

static LOGGER: OnceLock<RwLock<LogState>> = OnceLock::new();

fn state() -> &'static RwLock<LogState> {
    LOGGER.get_or_init(|| RwLock::new(LogState {
        logger: Box::new(DefaultLogger),
        min_severity: LogSeverity::Trace,
    }))
}

/// Replace the active logger (file logger, game console, test capture...)
pub fn set_logger<L: Logger + 'static>(logger: L) {
    if let Ok(mut lock) = state().write() {
        lock.logger = Box::new(logger);
    }
}

/// Restore the DefaultLogger and let every severity through.
pub fn reset_logger() {
    if let Ok(mut lock) = state().write() {
        lock.logger = Box::new(DefaultLogger);
        lock.min_severity = LogSeverity::Trace;
    }
}

/// Drop entries below `severity` before they reach the logger.
pub fn set_min_severity(severity: LogSeverity) {
    if let Ok(mut lock) = state().write() {
        lock.min_severity = severity;
    }
}

/// Current minimum severity.
pub fn min_severity() -> LogSeverity {
    state().read().map(|lock| lock.min_severity).unwrap_or(LogSeverity::Trace)
}

/// Log without location info. Used by `engine_trace!` .. `engine_warn!`.
pub fn log(severity: LogSeverity, source: &str, message: String) {
    dispatch(severity, source, message, None, None);
}

/// Log with file:line. Used by `engine_error!`, `engine_err!` and `engine_bail!`.
pub fn log_detailed(
    severity: LogSeverity,
    source: &str,
    message: String,
    file: &'static str,
    line: u32,
) {
    dispatch(severity, source, message, Some(file), Some(line));
}

fn dispatch(
    severity: LogSeverity,
    source: &str,
    message: String,
    file: Option<&'static str>,
    line: Option<u32>,
) {
    if let Ok(lock) = state().read() {
        if severity < lock.min_severity {
            return;
        }
        lock.logger.log(&LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file,
            line,
        });
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (per-frame detail)
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log($crate::log::LogSeverity::Trace, $source, format!($($arg)*))
    };
}

/// Log a DEBUG message
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log($crate::log::LogSeverity::Debug, $source, format!($($arg)*))
    };
}

/// Log an INFO message
///
/// ```no_run
/// vob_culling_engine::engine_info!("vobcull::Manager", "Buckets ready: {} objects", 42);
/// ```
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log($crate::log::LogSeverity::Info, $source, format!($($arg)*))
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log($crate::log::LogSeverity::Warn, $source, format!($($arg)*))
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an ERROR and evaluate to `Error::InvalidState` carrying the same message.
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::vobcull::Error::InvalidState(message)
    }};
}

/// Log an ERROR and return `Err(Error::InvalidState(..))` from the enclosing function.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
