//! Leveled, timestamped diagnostics with a bounded in-memory history.
//!
//! Every call appends a [`LogEntry`] to the history (oldest evicted past
//! `max_history`) and hands it to a [`LogSink`] for display. The default sink
//! forwards to the `log` facade; the browser front end installs a console
//! sink instead.
//!
//! Logging never fails and never panics. A disabled logger drops everything,
//! including history.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{SecondsFormat, Utc};
use lazy_static::lazy_static;
use serde::Serialize;
use serde_json::Value;

use crate::config::LoggerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogLevel {
    Debug,
    Info,
    Success,
    Warn,
    Error,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Success => "SUCCESS",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    /// RFC 3339, millisecond precision, UTC.
    pub timestamp: String,
    pub level: LogLevel,
    pub component: String,
    pub message: String,
    pub data: Option<Value>,
}

impl LogEntry {
    /// `[timestamp] LEVEL component: message`
    pub fn format_line(&self) -> String {
        format!(
            "[{}] {} {}: {}",
            self.timestamp, self.level, self.component, self.message
        )
    }
}

/// Where formatted entries end up.
pub trait LogSink: Send + Sync {
    /// `depth` is the number of currently open groups.
    fn write(&self, entry: &LogEntry, depth: usize);

    /// Full rendering of an error object passed to [`Logger::error`].
    fn write_error_detail(&self, detail: &str);

    fn group(&self, label: &str);

    fn group_end(&self);
}

/// Sink forwarding to the `log` crate, with the component as target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCrateSink;

impl LogSink for LogCrateSink {
    fn write(&self, entry: &LogEntry, depth: usize) {
        let indent = "  ".repeat(depth);
        let level = match entry.level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info | LogLevel::Success => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        };
        log::log!(target: "panel", level, "{}{}", indent, entry.format_line());
        if let Some(data) = &entry.data {
            log::log!(target: "panel", level, "{}[{}] {}", indent, entry.timestamp, data);
        }
    }

    fn write_error_detail(&self, detail: &str) {
        log::error!(target: "panel", "{}", detail);
    }

    fn group(&self, label: &str) {
        log::info!(target: "panel", "▸ {}", label);
    }

    fn group_end(&self) {}
}

struct LoggerState {
    config: LoggerConfig,
    history: VecDeque<LogEntry>,
    sink: Arc<dyn LogSink>,
    depth: usize,
}

pub struct Logger {
    state: Mutex<LoggerState>,
}

lazy_static! {
    static ref GLOBAL: Logger = Logger::new(LoggerConfig::default(), Arc::new(LogCrateSink));
}

/// The process-wide logger used by every panel component.
pub fn logger() -> &'static Logger {
    &GLOBAL
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerConfig::default(), Arc::new(LogCrateSink))
    }
}

impl Logger {
    pub fn new(config: LoggerConfig, sink: Arc<dyn LogSink>) -> Self {
        Self {
            state: Mutex::new(LoggerState {
                config,
                history: VecDeque::new(),
                sink,
                depth: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoggerState> {
        // A panic while logging must not silence every later call.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn configure(&self, config: LoggerConfig) {
        let mut state = self.lock();
        state.config = config;
        let max = state.config.max_history;
        while state.history.len() > max {
            state.history.pop_front();
        }
    }

    pub fn set_sink(&self, sink: Arc<dyn LogSink>) {
        self.lock().sink = sink;
    }

    pub fn debug(&self, component: &str, message: impl Into<String>, data: Option<Value>) {
        self.log(LogLevel::Debug, component, message.into(), data);
    }

    pub fn info(&self, component: &str, message: impl Into<String>, data: Option<Value>) {
        self.log(LogLevel::Info, component, message.into(), data);
    }

    pub fn success(&self, component: &str, message: impl Into<String>, data: Option<Value>) {
        self.log(LogLevel::Success, component, message.into(), data);
    }

    pub fn warn(&self, component: &str, message: impl Into<String>, data: Option<Value>) {
        self.log(LogLevel::Warn, component, message.into(), data);
    }

    /// Logs at error level. When `error` is given its display form is kept
    /// as the entry's data and its debug form is printed through the sink.
    pub fn error(
        &self,
        component: &str,
        message: impl Into<String>,
        error: Option<&dyn std::error::Error>,
    ) {
        let data = error.map(|e| Value::String(e.to_string()));
        let Some(sink) = self.log(LogLevel::Error, component, message.into(), data) else {
            return;
        };
        if let Some(error) = error {
            sink.write_error_detail(&format!("{:?}", error));
        }
    }

    pub fn group(&self, component: &str, label: &str) {
        let sink = {
            let mut state = self.lock();
            if !state.config.enabled || !state.config.grouping {
                return;
            }
            state.depth += 1;
            state.sink.clone()
        };
        sink.group(&format!("{} - {}", component, label));
    }

    pub fn group_end(&self) {
        let sink = {
            let mut state = self.lock();
            if !state.config.enabled || !state.config.grouping || state.depth == 0 {
                return;
            }
            state.depth -= 1;
            state.sink.clone()
        };
        sink.group_end();
    }

    pub fn history(&self) -> Vec<LogEntry> {
        self.lock().history.iter().cloned().collect()
    }

    pub fn clear_history(&self) {
        self.lock().history.clear();
    }

    /// Records the entry and writes it out. Returns the sink used, or `None`
    /// when logging is disabled.
    fn log(
        &self,
        level: LogLevel,
        component: &str,
        message: String,
        data: Option<Value>,
    ) -> Option<Arc<dyn LogSink>> {
        let entry = LogEntry {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            level,
            component: component.to_string(),
            message,
            data,
        };

        // The sink runs outside the lock so it may log itself.
        let (sink, depth) = {
            let mut state = self.lock();
            if !state.config.enabled {
                return None;
            }
            state.history.push_back(entry.clone());
            while state.history.len() > state.config.max_history {
                state.history.pop_front();
            }
            (state.sink.clone(), state.depth)
        };
        sink.write(&entry, depth);
        Some(sink)
    }
}
