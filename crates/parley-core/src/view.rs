//! Console view collaborator.
//!
//! Keeps every printed line in memory so tests can inspect what a client
//! displayed, and mirrors each line to `tracing`.

use std::cell::RefCell;

use parley_proto::Address;

/// ANSI reset sequence.
pub const RESET: &str = "\u{1b}[0m";
/// ANSI black foreground.
pub const BLACK: &str = "\u{1b}[30m";
/// ANSI red foreground.
pub const RED: &str = "\u{1b}[31m";
/// ANSI green foreground.
pub const GREEN: &str = "\u{1b}[32m";
/// ANSI yellow foreground.
pub const YELLOW: &str = "\u{1b}[33m";
/// ANSI blue foreground.
pub const BLUE: &str = "\u{1b}[34m";

/// Simulated console that records displayed lines.
#[derive(Debug, Default)]
pub struct View {
    history: RefCell<Vec<String>>,
}

impl View {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Display `[sender] text`.
    pub fn print_message(&self, sender: Address, text: &str) {
        self.push(format!("[{sender}] {text}"));
    }

    /// Display `[sender] text` wrapped in `color` and reset sequences.
    pub fn print_colored_message(&self, sender: Address, text: &str, color: &str) {
        self.push(format!("{RESET}{color}[{sender}] {text}{RESET}"));
    }

    /// Most recently displayed line, or `""` if nothing was displayed.
    pub fn last_displayed_message(&self) -> String {
        self.history.borrow().last().cloned().unwrap_or_default()
    }

    /// Every displayed line, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    fn push(&self, line: String) {
        tracing::info!(target: "parley::view", "{line}");
        self.history.borrow_mut().push(line);
    }
}
