//! Choosing and sending the one automated answer.

use crate::best_effort::best_effort;
use crate::hints::PromptHints;
use std::io;

/// Tokens that common CLIs accept as "select everything", in the order tried.
pub const SELECT_ALL_CANDIDATES: &[&str] = &["a", "*", "all"];

/// Anything that can receive one line of input.
pub trait LineSink {
    fn send_line(&mut self, line: &str) -> io::Result<()>;
}

/// The answer actually delivered to the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Nothing could be sent.
    None,
    /// A select-all token followed by Enter.
    SelectAll(&'static str),
    /// A bare Enter, accepting whatever default the prompt offers.
    Acknowledge,
}

impl Response {
    /// The line that was written, if any.
    pub fn line(&self) -> Option<&'static str> {
        match *self {
            Response::None => None,
            Response::SelectAll(token) => Some(token),
            Response::Acknowledge => Some(""),
        }
    }
}

/// Send the first candidate the sink accepts and return it.
///
/// Candidates are tried once each, in order. Failed sends are discarded.
pub fn first_sent<S: LineSink + ?Sized>(
    candidates: &[&'static str],
    sink: &mut S,
) -> Option<&'static str> {
    candidates.iter().copied().find(|candidate| {
        best_effort("send select-all token", || sink.send_line(candidate)).is_some()
    })
}

/// Answer a prompt classified as `hints`, sending at most one line.
///
/// A select-all prompt gets the first accepted select-all token. Every other
/// case, including a select-all prompt where no token could be sent, falls
/// back to a bare Enter. The default-choice hint is reported but does not
/// gate the fallback.
pub fn respond<S: LineSink + ?Sized>(hints: PromptHints, sink: &mut S) -> Response {
    if hints.select_all {
        if let Some(token) = first_sent(SELECT_ALL_CANDIDATES, sink) {
            return Response::SelectAll(token);
        }
    }

    tracing::debug!(
        default_choice = hints.default_choice,
        "falling back to acknowledgment"
    );
    match best_effort("send acknowledgment", || sink.send_line("")) {
        Some(()) => Response::Acknowledge,
        None => Response::None,
    }
}
