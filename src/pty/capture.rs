//! Bounded window over the child's most recent output.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};

/// Most bytes ever held for prompt classification.
pub const CAPTURE_BUDGET: usize = 4096;

/// Output recorded by the mirror thread until it is taken once.
///
/// Only the newest `budget` bytes are kept; older bytes are discarded as new
/// output arrives. After [`Capture::take`] the capture stops recording.
pub struct Capture {
    state: Mutex<CaptureState>,
    ready: Condvar,
}

struct CaptureState {
    bytes: VecDeque<u8>,
    budget: usize,
    recording: bool,
    closed: bool,
}

impl Capture {
    pub fn new(budget: usize) -> Self {
        Self {
            state: Mutex::new(CaptureState {
                bytes: VecDeque::with_capacity(budget),
                budget,
                recording: true,
                closed: false,
            }),
            ready: Condvar::new(),
        }
    }

    /// Record a chunk of child output.
    pub fn push(&self, chunk: &[u8]) {
        let mut state = self.state.lock();
        if !state.recording || chunk.is_empty() {
            return;
        }
        state.bytes.extend(chunk);
        let excess = state.bytes.len().saturating_sub(state.budget);
        state.bytes.drain(..excess);
        self.ready.notify_all();
    }

    /// Mark the output stream as finished.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        self.ready.notify_all();
    }

    /// Wait at most `timeout` for the output stream to finish.
    ///
    /// Returns whether it did.
    pub fn wait_closed(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while !state.closed {
            if self.ready.wait_until(&mut state, deadline).timed_out() {
                break;
            }
        }
        state.closed
    }

    /// Take up to `size` of the newest bytes and stop recording.
    ///
    /// Waits at most `timeout` for output when nothing is buffered yet.
    /// Fails with `TimedOut` if nothing arrives, or `UnexpectedEof` if the
    /// child closed its output first.
    pub fn take(&self, size: usize, timeout: Duration) -> io::Result<Vec<u8>> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while state.bytes.is_empty() && !state.closed && state.recording {
            if self.ready.wait_until(&mut state, deadline).timed_out() {
                break;
            }
        }
        state.recording = false;

        if state.bytes.is_empty() {
            let kind = if state.closed {
                io::ErrorKind::UnexpectedEof
            } else {
                io::ErrorKind::TimedOut
            };
            return Err(io::Error::new(kind, "no pending output"));
        }

        let skip = state.bytes.len().saturating_sub(size);
        let taken = state.bytes.drain(..).skip(skip).collect();
        Ok(taken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn keeps_only_the_newest_bytes() {
        let capture = Capture::new(8);
        capture.push(b"0123456789");
        capture.push(b"ab");
        let taken = capture.take(8, Duration::ZERO).unwrap();
        assert_eq!(taken, b"456789ab");
    }

    #[test]
    fn take_honors_requested_size() {
        let capture = Capture::new(64);
        capture.push(b"Loading...\nContinue? [y/N] ");
        let taken = capture.take(11, Duration::ZERO).unwrap();
        assert_eq!(taken, b"nue? [y/N] ");
    }

    #[test]
    fn empty_capture_times_out() {
        let capture = Capture::new(16);
        let started = Instant::now();
        let err = capture.take(16, Duration::from_millis(50)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn closed_stream_reports_eof() {
        let capture = Capture::new(16);
        capture.close();
        let err = capture.take(16, Duration::from_secs(5)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn buffered_output_survives_close() {
        let capture = Capture::new(16);
        capture.push(b"bye");
        capture.close();
        assert_eq!(capture.take(16, Duration::ZERO).unwrap(), b"bye");
    }

    #[test]
    fn waits_for_late_output() {
        let capture = Arc::new(Capture::new(16));
        let writer = Arc::clone(&capture);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            writer.push(b"[Y/n]");
        });
        let taken = capture.take(16, Duration::from_secs(5)).unwrap();
        handle.join().unwrap();
        assert_eq!(taken, b"[Y/n]");
    }

    #[test]
    fn wait_closed_sees_a_finished_stream() {
        let capture = Arc::new(Capture::new(16));
        let reader = Arc::clone(&capture);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            reader.close();
        });
        assert!(capture.wait_closed(Duration::from_secs(5)));
        handle.join().unwrap();
    }

    #[test]
    fn wait_closed_gives_up_on_an_open_stream() {
        let capture = Capture::new(16);
        let started = Instant::now();
        assert!(!capture.wait_closed(Duration::from_millis(50)));
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn stops_recording_after_take() {
        let capture = Capture::new(16);
        capture.push(b"first");
        capture.take(16, Duration::ZERO).unwrap();
        capture.push(b"second");
        let err = capture.take(16, Duration::ZERO).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }
}
