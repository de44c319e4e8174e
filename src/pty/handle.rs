use parking_lot::Mutex;
use portable_pty::MasterPty;
use std::io::{self, Write};
use std::sync::Arc;

/// Terminator appended to every line sent to the child.
///
/// Raw-mode programs read a carriage return as Enter; a cooked-mode line
/// discipline translates it to a newline.
pub const LINE_ENDING: &str = "\r";

/// Shared access to the writing side of the pseudo-terminal.
#[derive(Clone)]
pub struct PtyHandle {
    writer: Arc<Mutex<Option<Box<dyn Write + Send>>>>,
    master: Arc<Mutex<Box<dyn MasterPty + Send>>>,
}

impl PtyHandle {
    pub fn new(writer: Box<dyn Write + Send>, master: Box<dyn MasterPty + Send>) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Some(writer))),
            master: Arc::new(Mutex::new(master)),
        }
    }

    pub fn send_input(&self, bytes: &[u8]) -> io::Result<()> {
        let mut writer = self.writer.lock();
        let Some(writer) = writer.as_mut() else {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "pty input already closed",
            ));
        };
        writer.write_all(bytes)?;
        writer.flush()?;
        Ok(())
    }

    pub fn send_line(&self, line: &str) -> io::Result<()> {
        let mut bytes = Vec::with_capacity(line.len() + LINE_ENDING.len());
        bytes.extend_from_slice(line.as_bytes());
        bytes.extend_from_slice(LINE_ENDING.as_bytes());
        self.send_input(&bytes)
    }

    #[cfg(unix)]
    pub fn resize(&self, cols: u16, rows: u16) -> anyhow::Result<()> {
        let size = portable_pty::PtySize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        };
        self.master.lock().resize(size)
    }

    pub fn close_writer(&self) {
        *self.writer.lock() = None;
    }
}
