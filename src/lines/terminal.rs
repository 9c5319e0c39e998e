//! [`LineRenderer`] that streams to stdout.
//!
//! The terminal always has a line to write to, so every lookup succeeds.
//! Focusing an input prints the prompt.

use std::io::{self, Write};

use super::{LineIndex, LineRenderer};
use crate::consts::{FAILED_TAG, INFO_TAG, SUCCESS_TAG};

const BLUE: &str = "\x1b[38;5;32m";
const GREEN: &str = "\x1b[38;5;35m";
const RED: &str = "\x1b[38;5;160m";
const RESET: &str = "\x1b[0m";

pub struct TerminalRenderer {
    prompt: String,
    color: bool,
}

impl TerminalRenderer {
    pub fn new(prompt: impl Into<String>, color: bool) -> Self {
        Self {
            prompt: prompt.into(),
            color,
        }
    }

    /// Print the prompt for the first line, before anything is focused.
    pub fn print_prompt(&self) {
        print!("\n{} ", self.prompt);
        let _ = io::stdout().flush();
    }

    fn paint(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        text.replace(INFO_TAG, &format!("{BLUE}{INFO_TAG}{RESET}"))
            .replace(SUCCESS_TAG, &format!("{GREEN}{SUCCESS_TAG}{RESET}"))
            .replace(FAILED_TAG, &format!("{RED}{FAILED_TAG}{RESET}"))
    }
}

impl LineRenderer for TerminalRenderer {
    fn append_output(&self, _line: LineIndex, text: &str) -> bool {
        print!("{}", self.paint(text));
        let _ = io::stdout().flush();
        true
    }

    fn set_input_disabled(&self, _line: LineIndex, _disabled: bool) -> bool {
        true
    }

    fn focus_input(&self, _line: LineIndex) -> bool {
        self.print_prompt();
        true
    }
}
