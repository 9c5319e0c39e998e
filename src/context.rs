//! The handle a command uses to talk back to the shell.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::lines::LineIndex;
use crate::session::Session;
use crate::status::ExecutionStatus;

/// One invocation's view of the shell, bound to the line pair that was
/// active when it was created. The binding never moves, so a handler that
/// resumes after a suspension still writes to its own line.
pub struct ExecutionContext {
    command: String,
    line: LineIndex,
    session: Arc<Session>,
}

impl ExecutionContext {
    pub fn new(command: &str, session: Arc<Session>) -> Self {
        let line = session.lines.current();
        Self {
            command: command.to_string(),
            line,
            session,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn line(&self) -> LineIndex {
        self.line
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Write `text` plus a line break to the bound output line.
    pub fn append(&self, text: &str) {
        let text = format!("{text}\n");
        if !self.session.renderer.append_output(self.line, &text) {
            warn!(element = %self.line.output_id(), "output element does not exist");
        }
    }

    /// Mark the execution pending and lock the bound input.
    pub fn pending(&self) {
        self.session
            .executions
            .set_execution(&self.command, ExecutionStatus::Pending);
        self.disable_input(self.line);
    }

    /// Mark the execution failed and move on to a new line. The bound input
    /// stays locked.
    pub fn failed(&self) {
        self.session
            .executions
            .set_execution(&self.command, ExecutionStatus::Failed);
        let next = self.session.lines.advance();
        self.focus_input(next);
        self.disable_input(self.line);
    }

    /// Mark the execution finished and move on to a new line, unless the
    /// current execution has already failed.
    pub fn finished(&self) {
        match self.session.executions.status() {
            Some(ExecutionStatus::Failed) => {
                debug!(command = %self.command, line = %self.line, "finish after failure ignored");
            }
            Some(_) => {
                self.session
                    .executions
                    .update_execution_status(ExecutionStatus::Finished);
                self.session.lines.advance();
            }
            None => {
                self.session
                    .executions
                    .set_execution(&self.command, ExecutionStatus::Finished);
                self.session.lines.advance();
            }
        }
        self.focus_input(self.session.lines.current());
        self.disable_input(self.line);
    }

    fn disable_input(&self, line: LineIndex) {
        if !self.session.renderer.set_input_disabled(line, true) {
            warn!(element = %line.input_id(), "input element does not exist");
        }
    }

    fn focus_input(&self, line: LineIndex) {
        if !self.session.renderer.focus_input(line) {
            warn!(element = %line.input_id(), "input element does not exist");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::mock::MockClock;
    use crate::lines::transcript::Transcript;
    use crate::programs::TaskManager;

    fn session(transcript: Arc<Transcript>) -> Arc<Session> {
        Arc::new(Session::new(
            transcript,
            Arc::new(TaskManager::new(&[])),
            Arc::new(MockClock::new()),
        ))
    }

    #[test]
    fn binds_current_line_at_creation() {
        let session = session(Arc::new(Transcript::auto_open()));
        session.lines.advance();
        let ctx = ExecutionContext::new("help interface", Arc::clone(&session));
        session.lines.advance();
        assert_eq!(ctx.line(), LineIndex::new(1));
    }

    #[test]
    fn append_adds_line_break() {
        let transcript = Arc::new(Transcript::auto_open());
        let ctx = ExecutionContext::new("x", session(Arc::clone(&transcript)));
        ctx.append("one");
        ctx.append("");
        assert_eq!(transcript.output(LineIndex::new(0)).unwrap(), "one\n\n");
    }

    #[test]
    fn append_to_missing_line_is_noop() {
        let transcript = Arc::new(Transcript::new());
        let ctx = ExecutionContext::new("x", session(Arc::clone(&transcript)));
        ctx.append("lost");
        assert!(transcript.output(LineIndex::new(0)).is_none());
    }

    #[test]
    fn pending_disables_bound_input() {
        let transcript = Arc::new(Transcript::auto_open());
        let session = session(Arc::clone(&transcript));
        let ctx = ExecutionContext::new("x", Arc::clone(&session));
        ctx.pending();
        assert_eq!(session.executions.status(), Some(ExecutionStatus::Pending));
        assert_eq!(transcript.is_disabled(LineIndex::new(0)), Some(true));
        assert_eq!(session.lines.current(), LineIndex::new(0));
    }

    #[test]
    fn finished_advances_once() {
        let transcript = Arc::new(Transcript::auto_open());
        let session = session(Arc::clone(&transcript));
        let ctx = ExecutionContext::new("x", Arc::clone(&session));
        ctx.pending();
        ctx.finished();
        assert_eq!(session.executions.status(), Some(ExecutionStatus::Finished));
        assert_eq!(session.lines.current(), LineIndex::new(1));
        assert_eq!(transcript.focused(), Some(LineIndex::new(1)));
        assert_eq!(transcript.is_disabled(LineIndex::new(0)), Some(true));
    }

    #[test]
    fn failed_then_finished_advances_once() {
        let transcript = Arc::new(Transcript::auto_open());
        let session = session(Arc::clone(&transcript));
        let ctx = ExecutionContext::new("x", Arc::clone(&session));
        ctx.pending();
        ctx.failed();
        ctx.finished();
        assert_eq!(session.executions.status(), Some(ExecutionStatus::Failed));
        assert_eq!(session.lines.current(), LineIndex::new(1));
        assert_eq!(transcript.focused(), Some(LineIndex::new(1)));
    }

    #[test]
    fn finished_without_pending_records_execution() {
        let session = session(Arc::new(Transcript::auto_open()));
        let ctx = ExecutionContext::new("x", Arc::clone(&session));
        ctx.finished();
        let current = session.executions.current().unwrap();
        assert_eq!(current.command, "x");
        assert_eq!(current.status, ExecutionStatus::Finished);
        assert_eq!(session.lines.current(), LineIndex::new(1));
    }

    #[test]
    fn missing_elements_do_not_panic() {
        let session = session(Arc::new(Transcript::new()));
        let ctx = ExecutionContext::new("x", Arc::clone(&session));
        ctx.pending();
        ctx.failed();
        assert_eq!(session.lines.current(), LineIndex::new(1));
    }
}
