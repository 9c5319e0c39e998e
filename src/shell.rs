//! Entry point for typed input.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::commands::CommandRegistry;
use crate::consts::not_recognized;
use crate::context::ExecutionContext;
use crate::session::Session;
use crate::status::ExecutionStatus;

/// What happened to one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// A command ran; carries the status it left behind.
    Executed { status: Option<ExecutionStatus> },
    /// No command by that name. The message was printed and the line advanced.
    NotRecognized,
    /// Another command is still suspended. Nothing was touched.
    Busy,
}

/// Resolves input against the registry and runs at most one command at a time.
pub struct Shell {
    registry: CommandRegistry,
    session: Arc<Session>,
    in_flight: Mutex<()>,
}

impl Shell {
    pub fn new(registry: CommandRegistry, session: Arc<Session>) -> Self {
        Self {
            registry,
            session,
            in_flight: Mutex::new(()),
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Whether a command is currently running (or suspended).
    pub fn is_busy(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    /// Run one line of input to completion.
    pub async fn run_command(&self, input: &str) -> RunOutcome {
        let Ok(_guard) = self.in_flight.try_lock() else {
            warn!(input, "command rejected, another command is running");
            return RunOutcome::Busy;
        };

        let Some(command) = self.registry.resolve(input) else {
            debug!(input, "command not recognized");
            self.force_output(&not_recognized(input));
            return RunOutcome::NotRecognized;
        };

        let ctx = ExecutionContext::new(command.name(), Arc::clone(&self.session));
        debug!(command = command.name(), line = %ctx.line(), "running command");
        command.execute(&ctx).await;

        RunOutcome::Executed {
            status: self.session.executions.status(),
        }
    }

    /// Print `message` on the active line and open a new one, bypassing the
    /// execution record.
    fn force_output(&self, message: &str) {
        let renderer = &self.session.renderer;
        let line = self.session.lines.current();
        if !renderer.append_output(line, &format!("{message}\n")) {
            warn!(element = %line.output_id(), "output element does not exist");
        }
        if !renderer.set_input_disabled(line, true) {
            warn!(element = %line.input_id(), "input element does not exist");
        }
        let next = self.session.lines.advance();
        if !renderer.focus_input(next) {
            warn!(element = %next.input_id(), "input element does not exist");
        }
    }
}
