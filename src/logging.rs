//! Log capture while the terminal is in raw mode.
//!
//! Writing to stderr would corrupt the alternate screen, so log lines go to
//! an in-memory [`LogBuffer`] that is flushed once the terminal is restored.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Shared, growable buffer of formatted log output.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Everything logged so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Write the buffered output to `out` and clear the buffer.
    pub fn flush_to(&self, out: &mut impl Write) -> io::Result<()> {
        let mut bytes = self.lock();
        out.write_all(&bytes)?;
        out.flush()?;
        bytes.clear();
        Ok(())
    }
}

/// Writer handed out to the subscriber for each event.
pub struct LogWriter {
    buffer: LogBuffer,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.clone(),
        }
    }
}

/// Install the global subscriber writing into a fresh buffer.
///
/// `debug` lowers the level from INFO to DEBUG. If a global subscriber is
/// already set, the returned buffer simply stays empty.
pub fn init(debug: bool) -> LogBuffer {
    let buffer = LogBuffer::new();
    let level = if debug { Level::DEBUG } else { Level::INFO };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(buffer.clone())
        .with_ansi(false)
        .compact()
        .try_init();

    buffer
}
