use std::io;

use tracing_subscriber::EnvFilter;

/// Sends `tracing` output to the browser console, one event per call.
#[derive(Default)]
struct ConsoleWriter {
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            let line = String::from_utf8_lossy(&self.buffer);
            gloo_console::log!(line.trim_end().to_owned());
            self.buffer.clear();
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

pub fn init(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    // No clock on wasm32, so no timestamps
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(ConsoleWriter::default)
        .with_ansi(false)
        .without_time()
        .try_init();

    if result.is_err() {
        gloo_console::warn!("Logging was already initialized");
    }
}
