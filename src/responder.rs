//! The auto-responder run: spawn, wait, read, answer, hand off.

use crate::best_effort::best_effort;
use crate::cli::Cli;
use crate::error::AutorespondError;
use crate::hints::{classify, PromptHints};
use crate::pty::{PtySession, CAPTURE_BUDGET};
use crate::response::{respond, LineSink, Response};
use std::io;
use std::thread;
use std::time::Duration;

/// Longest wait for output once the delay has passed.
pub const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// The operations a run needs from a live child session.
pub trait InteractiveSession: LineSink {
    /// Pending output, waiting at most `timeout` for some.
    fn read_pending(&mut self, size: usize, timeout: Duration) -> io::Result<String>;

    /// Give the user the terminal until the child exits.
    fn interact(&mut self) -> Result<(), AutorespondError>;

    fn close(&mut self) -> Result<(), AutorespondError>;

    /// The child's own exit code, when known.
    fn exit_code(&self) -> Option<i32>;
}

impl InteractiveSession for PtySession {
    fn read_pending(&mut self, size: usize, timeout: Duration) -> io::Result<String> {
        self.read_nonblocking(size, timeout)
    }

    fn interact(&mut self) -> Result<(), AutorespondError> {
        PtySession::interact(self)
    }

    fn close(&mut self) -> Result<(), AutorespondError> {
        PtySession::close(self)
    }

    fn exit_code(&self) -> Option<i32> {
        PtySession::exit_code(self)
    }
}

/// What happened during one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub hints: PromptHints,
    pub response: Response,
    /// The child's exit code, or 0 when it is unknown.
    pub exit_code: i32,
}

/// Spawn the command named by `cli` and drive it to completion.
///
/// Only a missing command or a failed spawn is an error; everything after
/// the spawn degrades to an empty result instead.
pub fn run(cli: &Cli) -> Result<RunReport, AutorespondError> {
    let (command, args) = cli.program().ok_or(AutorespondError::MissingCommand)?;
    let mut session = PtySession::spawn(command, args)?;
    Ok(drive(&mut session, cli.delay()))
}

/// Wait `delay`, answer the child's prompt once, then hand off until exit.
pub fn drive<S: InteractiveSession + ?Sized>(session: &mut S, delay: Duration) -> RunReport {
    tracing::debug!(?delay, "waiting before inspecting output");
    thread::sleep(delay);

    let text = best_effort("read pending output", || {
        session.read_pending(CAPTURE_BUDGET, READ_TIMEOUT)
    })
    .unwrap_or_default();

    let hints = classify(&text);
    let response = respond(hints, session);
    tracing::info!(
        captured = text.len(),
        select_all = hints.select_all,
        default_choice = hints.default_choice,
        sent = ?response.line(),
        "answered prompt"
    );

    best_effort("interact", || session.interact());
    best_effort("close session", || session.close());

    RunReport {
        hints,
        response,
        exit_code: session.exit_code().unwrap_or(0),
    }
}
