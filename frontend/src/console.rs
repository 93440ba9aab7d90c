use panel::logger::{LogEntry, LogLevel, LogSink};
use wasm_bindgen::JsValue;

/// Writes panel log entries to the browser console.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, entry: &LogEntry, _depth: usize) {
        // The console indents groups itself.
        let line = entry.format_line();
        let data = entry
            .data
            .as_ref()
            .map(|data| JsValue::from_str(&data.to_string()))
            .unwrap_or(JsValue::UNDEFINED);
        match entry.level {
            LogLevel::Debug => gloo_console::debug!(line.as_str(), data),
            LogLevel::Info => gloo_console::info!(line.as_str(), data),
            LogLevel::Success => gloo_console::log!(format!("✓ {}", line), data),
            LogLevel::Warn => gloo_console::warn!(line.as_str(), data),
            LogLevel::Error => gloo_console::error!(line.as_str(), data),
        }
    }

    fn write_error_detail(&self, detail: &str) {
        gloo_console::error!(detail);
    }

    fn group(&self, label: &str) {
        web_sys::console::group_1(&JsValue::from_str(label));
    }

    fn group_end(&self) {
        web_sys::console::group_end();
    }
}
