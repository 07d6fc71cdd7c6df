//! A minimal injectable logger, handed to layers through
//! [`crate::SetupContext::get_logger`].
//!
//! There is no logging-framework dependency here: the teacher's only
//! diagnostic precedent is a bare `eprintln!`, so the default
//! implementation does the same, gated by a per-factory minimum level.

use std::fmt;

/// Severity of a log message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Fine-grained diagnostic detail.
    Trace,
    /// Development-time detail.
    Debug,
    /// Normal operational messages.
    Info,
    /// Recoverable anomalies (hardware errors, stale sensor reads).
    Warn,
    /// Conditions that are about to become fatal shape/routing/contract
    /// errors.
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// A sink for a single named logger.
pub trait Logger {
    /// Logs `message` at `level`.
    fn log(&self, level: LogLevel, message: &str);

    /// Convenience for [`LogLevel::Trace`].
    fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message);
    }

    /// Convenience for [`LogLevel::Debug`].
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Convenience for [`LogLevel::Info`].
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Convenience for [`LogLevel::Warn`].
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    /// Convenience for [`LogLevel::Error`].
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// A factory producing labeled [`Logger`]s, cloneable so each layer can
/// hold an independent handle.
pub trait LoggerFactory {
    /// Returns a logger labeled with `label` (typically the layer's name).
    fn get_logger(&self, label: &str) -> Box<dyn Logger>;

    /// Clones this factory into a new boxed instance.
    fn clone_factory(&self) -> Box<dyn LoggerFactory>;
}

/// The default [`Logger`]: writes `[label] LEVEL: message` to stderr,
/// filtered by a minimum level.
pub struct StderrLogger {
    label: String,
    min_level: LogLevel,
}

impl Logger for StderrLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if level >= self.min_level {
            eprintln!("[{}] {}: {}", self.label, level, message);
        }
    }
}

/// The default [`LoggerFactory`], producing [`StderrLogger`]s.
#[derive(Clone)]
pub struct StderrLoggerFactory {
    min_level: LogLevel,
}

impl StderrLoggerFactory {
    /// Creates a factory whose loggers pass through everything at or above
    /// `min_level`.
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Default for StderrLoggerFactory {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl LoggerFactory for StderrLoggerFactory {
    fn get_logger(&self, label: &str) -> Box<dyn Logger> {
        Box::new(StderrLogger {
            label: label.to_string(),
            min_level: self.min_level,
        })
    }

    fn clone_factory(&self) -> Box<dyn LoggerFactory> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ordering_places_error_above_trace() {
        assert!(LogLevel::Error > LogLevel::Trace);
    }

    #[test]
    fn factory_produces_independent_loggers() {
        let factory = StderrLoggerFactory::default();
        let a = factory.get_logger("A");
        let b = factory.get_logger("B");
        a.info("hello from A");
        b.warn("hello from B");
    }
}
