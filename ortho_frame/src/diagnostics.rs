/// Diagnostics - global logging hub for the toolkit
///
/// Holds the active logger and the diagnostics configuration in thread-safe
/// static storage. Every `ortho_*!` logging macro routes through here.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Global diagnostics configuration
static CONFIG: OnceLock<RwLock<DiagnosticsConfig>> = OnceLock::new();

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

fn config_lock() -> &'static RwLock<DiagnosticsConfig> {
    CONFIG.get_or_init(|| RwLock::new(DiagnosticsConfig::default()))
}

// ===== CONFIGURATION =====

/// Diagnostics configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    /// Entries below this severity are discarded before reaching the logger
    pub min_severity: LogSeverity,
    /// Attach file:line to ERROR entries
    pub detailed_errors: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            min_severity: if cfg!(debug_assertions) {
                LogSeverity::Debug
            } else {
                LogSeverity::Info
            },
            detailed_errors: true,
        }
    }
}

// ===== PUBLIC API =====

/// Global diagnostics manager
///
/// # Example
///
/// ```no_run
/// use ortho_frame::ortho::{Diagnostics, DiagnosticsConfig, log::LogSeverity};
///
/// Diagnostics::configure(DiagnosticsConfig {
///     min_severity: LogSeverity::Warn,
///     detailed_errors: true,
/// });
/// ```
pub struct Diagnostics;

impl Diagnostics {
    /// Replace the active configuration
    pub fn configure(config: DiagnosticsConfig) {
        if let Ok(mut lock) = config_lock().write() {
            *lock = config;
        }
    }

    /// Current configuration
    pub fn config() -> DiagnosticsConfig {
        config_lock()
            .read()
            .map(|lock| *lock)
            .unwrap_or_default()
    }

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger,
    /// in-memory capture for tests, etc.)
    pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(logger_impl);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Whether an entry of this severity passes the configured filter
    pub fn enabled(severity: LogSeverity) -> bool {
        severity >= Self::config().min_severity
    }

    /// Logging entry point used by `ortho_trace!` .. `ortho_warn!`
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level
    /// * `source` - Source module (e.g., "ortho::Mesh")
    /// * `message` - Log message
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if !Self::enabled(severity) {
            return;
        }
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Logging entry point with file:line information (used by `ortho_error!`)
    ///
    /// The location is dropped when `detailed_errors` is disabled.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        let config = Self::config();
        if severity < config.min_severity {
            return;
        }
        let (file, line) = if config.detailed_errors {
            (Some(file), Some(line))
        } else {
            (None, None)
        };
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;
