//! Browser console logging
//!
//! Formatted `tracing` events are buffered per event and handed to the
//! matching `console.*` method when the writer is dropped.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use wasm_bindgen::JsValue;

/// Directive used when the host page passes nothing usable
pub const DEFAULT_FILTER: &str = "info";

/// Install the console subscriber.
///
/// Returns `false` when a global subscriber is already installed.
pub fn init(directive: &str) -> bool {
    let layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .with_writer(ConsoleMakeWriter);

    tracing_subscriber::registry()
        .with(layer)
        .with(filter(directive))
        .try_init()
        .is_ok()
}

/// Parse an `EnvFilter` directive, falling back to `info`
pub fn filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive.trim()).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[derive(Clone, Copy, Debug, Default)]
struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buffer);
        let message = JsValue::from_str(text.trim_end());
        match self.level {
            Level::ERROR => web_sys::console::error_1(&message),
            Level::WARN => web_sys::console::warn_1(&message),
            Level::INFO => web_sys::console::info_1(&message),
            Level::DEBUG => web_sys::console::debug_1(&message),
            _ => web_sys::console::log_1(&message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn valid_directive_is_kept() {
        assert_eq!(
            filter("ganttline_layout=debug").to_string(),
            "ganttline_layout=debug"
        );
    }

    #[test]
    fn invalid_directive_falls_back_to_info() {
        assert_eq!(filter("ganttline=loud").to_string(), "info");
    }
}
