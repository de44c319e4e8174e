use crate::best_effort::best_effort;
use crate::error::AutorespondError;
use crate::pty::capture::{Capture, CAPTURE_BUDGET};
use crate::pty::handle::PtyHandle;
use crate::pty::resize::ResizeWatcher;
use crate::pty::terminal::{terminal_size, RawModeGuard};
use crate::response::LineSink;
use portable_pty::{native_pty_system, Child, CommandBuilder, ExitStatus, PtySize};
use std::io::{self, IsTerminal, Read, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Longest wait at close for the child's last output to be mirrored.
///
/// A background process that inherited the terminal keeps the output open
/// after the child exits; the mirror thread is then left running.
const MIRROR_DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

/// A child process running on a pseudo-terminal.
///
/// Everything the child writes is mirrored to stdout by a background thread
/// for the whole life of the session. Until [`PtySession::read_nonblocking`]
/// is called, the newest output is also kept for inspection.
pub struct PtySession {
    handle: PtyHandle,
    child: Box<dyn Child + Send + Sync>,
    capture: Arc<Capture>,
    mirror: Option<thread::JoinHandle<()>>,
    status: Option<ExitStatus>,
    closed: bool,
}

impl PtySession {
    pub fn spawn(command: &str, args: &[String]) -> Result<Self, AutorespondError> {
        let pty_system = native_pty_system();
        let (cols, rows) = terminal_size();
        let pair = pty_system
            .openpty(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(AutorespondError::OpenPty)?;

        let mut cmd = CommandBuilder::new(command);
        cmd.args(args);
        cmd.cwd(std::env::current_dir()?);
        if std::env::var_os("TERM").is_none() {
            cmd.env("TERM", "xterm-256color");
        }

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|source| AutorespondError::Spawn {
                command: command.to_string(),
                source,
            })?;
        drop(pair.slave);

        let reader = pair
            .master
            .try_clone_reader()
            .map_err(AutorespondError::OpenPty)?;
        let writer = pair
            .master
            .take_writer()
            .map_err(AutorespondError::OpenPty)?;
        let handle = PtyHandle::new(writer, pair.master);

        let capture = Arc::new(Capture::new(CAPTURE_BUDGET));
        let mirror = spawn_mirror(reader, Arc::clone(&capture));

        tracing::info!(command, ?args, cols, rows, "spawned child on pty");

        Ok(Self {
            handle,
            child,
            capture,
            mirror: Some(mirror),
            status: None,
            closed: false,
        })
    }

    /// Take the child's pending output, waiting at most `timeout` for some.
    ///
    /// Returns at most `size` bytes, the newest ones, decoded lossily. Only
    /// the first call can see output.
    pub fn read_nonblocking(&self, size: usize, timeout: Duration) -> io::Result<String> {
        let bytes = self.capture.take(size, timeout)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Connect the invoking terminal to the child until the child exits.
    ///
    /// Raw mode and resize forwarding are set up when possible; failing to
    /// set either up still leaves the user connected.
    pub fn interact(&mut self) -> Result<(), AutorespondError> {
        let _raw_mode = if io::stdin().is_terminal() {
            best_effort("enable raw mode", RawModeGuard::new)
        } else {
            None
        };
        let resize_watcher =
            best_effort("watch resizes", || ResizeWatcher::start(self.handle.clone())).flatten();

        spawn_input_forwarder(self.handle.clone());

        let status = self.child.wait();
        if let Some(watcher) = resize_watcher {
            watcher.stop();
        }
        let status = status?;
        tracing::info!(code = status.exit_code(), signal = ?status.signal(), "child exited");
        self.status = Some(status);
        Ok(())
    }

    /// Release the pseudo-terminal, terminating the child if it is still alive.
    pub fn close(&mut self) -> Result<(), AutorespondError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.handle.close_writer();

        if self.status.is_none() {
            match self.child.try_wait()? {
                Some(status) => self.status = Some(status),
                None => {
                    tracing::debug!("child still running at close, killing it");
                    let _ = self.child.kill();
                    let _ = self.child.wait();
                }
            }
        }

        if let Some(mirror) = self.mirror.take() {
            if self.capture.wait_closed(MIRROR_DRAIN_TIMEOUT) {
                let _ = mirror.join();
            } else {
                tracing::debug!("pty output still open after child exit, detaching mirror");
            }
        }
        Ok(())
    }

    /// The child's exit code, if it exited on its own.
    ///
    /// `None` while the child runs, and when it was ended by a signal.
    pub fn exit_code(&self) -> Option<i32> {
        let status = self.status.as_ref()?;
        if status.signal().is_some() {
            return None;
        }
        Some(status.exit_code() as i32)
    }
}

impl LineSink for PtySession {
    fn send_line(&mut self, line: &str) -> io::Result<()> {
        self.handle.send_line(line)
    }
}

impl Drop for PtySession {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

fn spawn_mirror(reader: Box<dyn Read + Send>, capture: Arc<Capture>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut reader = reader;
        let mut stdout = io::stdout();
        let mut buffer = [0u8; 8192];

        loop {
            let count = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(count) => count,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            };
            let chunk = &buffer[..count];
            if stdout.write_all(chunk).and_then(|()| stdout.flush()).is_err() {
                tracing::trace!("stdout closed, output no longer mirrored");
            }
            capture.push(chunk);
        }
        capture.close();
    })
}

fn spawn_input_forwarder(handle: PtyHandle) {
    thread::spawn(move || {
        let mut stdin = io::stdin();
        let mut buffer = [0u8; 1024];

        loop {
            let read_bytes = match stdin.read(&mut buffer) {
                Ok(0) => break,
                Ok(count) => count,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            };
            if handle.send_input(&buffer[..read_bytes]).is_err() {
                break;
            }
        }
    });
}
