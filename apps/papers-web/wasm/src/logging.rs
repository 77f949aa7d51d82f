//! Route `tracing` events to the browser console
//!
//! A plain `fmt` subscriber formats each event; the writer below buffers the
//! formatted line and hands it to the console method matching the event's
//! level when the writer is dropped.

use std::io;
use std::sync::Once;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

static INIT: Once = Once::new();

/// Install the console subscriber. Later calls are no-ops.
pub fn init_logging(max_level: Level) {
    INIT.call_once(|| {
        let result = tracing_subscriber::fmt()
            .with_writer(ConsoleMakeWriter)
            .with_max_level(max_level)
            .with_target(false)
            .without_time()
            .try_init();
        if result.is_err() {
            web_sys::console::warn_1(&"tracing subscriber already installed".into());
        }
    });
}

pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

pub struct ConsoleWriter {
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
            Level::DEBUG => web_sys::console::log_1(&message),
            _ => web_sys::console::debug_1(&message),
        }
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use std::io::Write;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_init_logging_is_idempotent() {
        init_logging(Level::DEBUG);
        init_logging(Level::INFO);
        tracing::info!("logging initialised twice");
    }

    #[wasm_bindgen_test]
    fn test_writer_buffers_until_drop() {
        let mut writer = ConsoleMakeWriter.make_writer();
        writer.write_all(b"WARN partial ").unwrap();
        writer.write_all(b"line\n").unwrap();
        assert_eq!(writer.buffer, b"WARN partial line\n");
    }
}
