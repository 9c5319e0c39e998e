//! In-memory [`LineRenderer`] that records every line pair.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use super::{LineIndex, LineRenderer};

/// One recorded line pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRecord {
    pub line: LineIndex,
    pub input: String,
    pub output: String,
    pub disabled: bool,
}

impl LineRecord {
    fn new(line: LineIndex) -> Self {
        Self {
            line,
            input: String::new(),
            output: String::new(),
            disabled: false,
        }
    }
}

#[derive(Default)]
struct State {
    lines: BTreeMap<LineIndex, LineRecord>,
    focused: Option<LineIndex>,
}

/// Records line pairs in memory.
///
/// A strict transcript ([`Transcript::new`]) only knows lines the host
/// opened with [`Transcript::open`]. An auto-opening one creates a line the
/// first time anything touches it.
pub struct Transcript {
    state: Mutex<State>,
    auto_open: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            auto_open: false,
        }
    }

    pub fn auto_open() -> Self {
        Self {
            state: Mutex::new(State::default()),
            auto_open: true,
        }
    }

    /// Create the elements for `line`. Opening an existing line keeps it.
    pub fn open(&self, line: LineIndex) {
        self.lock()
            .lines
            .entry(line)
            .or_insert_with(|| LineRecord::new(line));
    }

    /// Record what the user typed into `line`.
    pub fn set_input(&self, line: LineIndex, text: &str) -> bool {
        self.with_line(line, |record| record.input = text.to_string())
    }

    pub fn output(&self, line: LineIndex) -> Option<String> {
        self.lock().lines.get(&line).map(|r| r.output.clone())
    }

    pub fn is_disabled(&self, line: LineIndex) -> Option<bool> {
        self.lock().lines.get(&line).map(|r| r.disabled)
    }

    pub fn focused(&self) -> Option<LineIndex> {
        self.lock().focused
    }

    /// All known lines, oldest first.
    pub fn records(&self) -> Vec<LineRecord> {
        self.lock().lines.values().cloned().collect()
    }

    /// Every output line joined in order.
    pub fn full_output(&self) -> String {
        self.lock()
            .lines
            .values()
            .map(|r| r.output.as_str())
            .collect()
    }

    fn with_line(&self, line: LineIndex, f: impl FnOnce(&mut LineRecord)) -> bool {
        let mut state = self.lock();
        if self.auto_open {
            f(state
                .lines
                .entry(line)
                .or_insert_with(|| LineRecord::new(line)));
            return true;
        }
        match state.lines.get_mut(&line) {
            Some(record) => {
                f(record);
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl LineRenderer for Transcript {
    fn append_output(&self, line: LineIndex, text: &str) -> bool {
        self.with_line(line, |record| record.output.push_str(text))
    }

    fn set_input_disabled(&self, line: LineIndex, disabled: bool) -> bool {
        self.with_line(line, |record| record.disabled = disabled)
    }

    fn focus_input(&self, line: LineIndex) -> bool {
        let exists = self.with_line(line, |_| {});
        if exists {
            self.lock().focused = Some(line);
        }
        exists
    }
}
