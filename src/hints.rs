//! Prompt classification over captured terminal output.
//!
//! Both classifiers are pure functions of their input: they strip terminal
//! escape sequences, then match case-insensitively against a fixed pattern
//! set compiled once per process.

use regex::{Regex, RegexSet, RegexSetBuilder};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Phrases suggesting the prompt lets the user choose every option at once.
pub const SELECT_ALL_HINTS: &[&str] = &[
    r"select all",
    r"choose all",
    r"pick all",
    r"\(.*all.*\)",
    r"comma[- ]separated.*all",
    r"\[.*\].*all",
];

/// Phrases suggesting a single default answer is accepted with Enter.
pub const DEFAULT_CHOICE_HINTS: &[&str] = &[
    r"\[y/n\]",
    r"\(default[:=]\s*\w+\)",
    r"press enter to accept",
    r"default is",
    r"select one",
];

static SELECT_ALL: LazyLock<RegexSet> = LazyLock::new(|| hint_set(SELECT_ALL_HINTS));
static DEFAULT_CHOICE: LazyLock<RegexSet> = LazyLock::new(|| hint_set(DEFAULT_CHOICE_HINTS));

// CSI sequences (colors, cursor movement) and two-byte escapes.
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b(?:\[[0-9;?]*[ -/]*[@-~]|[@-Z\\-_])").expect("ANSI pattern is valid")
});

fn hint_set(patterns: &[&str]) -> RegexSet {
    RegexSetBuilder::new(patterns)
        .case_insensitive(true)
        .build()
        .expect("hint patterns are valid")
}

/// Result of classifying one capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptHints {
    pub select_all: bool,
    pub default_choice: bool,
}

/// Run both classifiers over `text`.
pub fn classify(text: &str) -> PromptHints {
    PromptHints {
        select_all: should_select_all(text),
        default_choice: looks_like_choice(text),
    }
}

/// Whether `text` looks like a prompt that accepts "all".
pub fn should_select_all(text: &str) -> bool {
    SELECT_ALL.is_match(&strip_ansi(text))
}

/// Whether `text` looks like a prompt offering a default answer.
pub fn looks_like_choice(text: &str) -> bool {
    DEFAULT_CHOICE.is_match(&strip_ansi(text))
}

/// Remove terminal escape sequences so styling between words cannot hide a hint.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(text, "")
}
