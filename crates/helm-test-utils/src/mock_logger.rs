//! A [`LoggerFactory`] that records every message instead of printing it,
//! for tests asserting on what a layer logged.

use std::cell::RefCell;
use std::rc::Rc;

use helm_core::{LogLevel, Logger, LoggerFactory};

/// One recorded log call.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    /// The label of the logger that produced this entry (its `get_logger`
    /// argument).
    pub label: String,
    /// Severity of the message.
    pub level: LogLevel,
    /// The logged text.
    pub message: String,
}

/// A [`LoggerFactory`] whose loggers append to a shared, inspectable log.
#[derive(Clone, Default)]
pub struct MockLoggerFactory {
    entries: Rc<RefCell<Vec<Entry>>>,
}

impl MockLoggerFactory {
    /// Creates an empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries recorded so far, across every logger this factory
    /// produced.
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.borrow().clone()
    }
}

impl LoggerFactory for MockLoggerFactory {
    fn get_logger(&self, label: &str) -> Box<dyn Logger> {
        Box::new(MockLogger {
            label: label.to_string(),
            entries: self.entries.clone(),
        })
    }

    fn clone_factory(&self) -> Box<dyn LoggerFactory> {
        Box::new(self.clone())
    }
}

struct MockLogger {
    label: String,
    entries: Rc<RefCell<Vec<Entry>>>,
}

impl Logger for MockLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.entries.borrow_mut().push(Entry {
            label: self.label.clone(),
            level,
            message: message.to_string(),
        });
    }
}
