use crossterm::terminal::{disable_raw_mode, enable_raw_mode, size};
use std::io;

/// Size of the invoking terminal as `(cols, rows)`, or 80x24 when unknown.
pub fn terminal_size() -> (u16, u16) {
    size().unwrap_or((80, 24))
}

/// Keeps the invoking terminal in raw mode while alive.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}
