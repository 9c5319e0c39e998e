//! Shell commands.
//!
//! Commands implement the [`Command`] trait and are registered in a
//! [`CommandRegistry`]. The registry is built once at startup and resolves
//! typed input to a command by normalized name.

mod authenticate;
mod help_interface;

pub use authenticate::{AuthOutcome, AuthenticateCommand};
pub use help_interface::HelpInterfaceCommand;

use async_trait::async_trait;
use std::sync::Arc;

use crate::context::ExecutionContext;

/// A shell command. Implement this trait to add new commands.
///
/// A well-behaved handler calls [`ExecutionContext::pending`], appends zero
/// or more lines, and ends with [`ExecutionContext::finished`] or
/// [`ExecutionContext::failed`]. It reports failure through the context,
/// never by panicking.
#[async_trait]
pub trait Command: Send + Sync {
    /// Name as typed, e.g. `"help interface"`.
    fn name(&self) -> &str;

    /// One-line description for host help.
    fn description(&self) -> &str;

    /// Run the command.
    async fn execute(&self, ctx: &ExecutionContext);
}

/// Holds registered commands in registration order.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry with all built-in commands.
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(HelpInterfaceCommand),
            Arc::new(AuthenticateCommand),
        ];
        Self { commands }
    }

    /// Register an additional command before the shell starts.
    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    /// Whether `input` names a registered command.
    pub fn exists(&self, input: &str) -> bool {
        self.resolve(input).is_some()
    }

    /// Find the command `input` names.
    pub fn resolve(&self, input: &str) -> Option<Arc<dyn Command>> {
        let wanted = normalize(input);
        if wanted.is_empty() {
            return None;
        }
        self.commands
            .iter()
            .find(|c| normalize(c.name()) == wanted)
            .cloned()
    }

    /// Generate help text from all registered commands.
    pub fn help_text(&self) -> String {
        let max_width = self
            .commands
            .iter()
            .map(|c| c.name().len())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for command in &self.commands {
            out.push_str(&format!(
                "  {:<max_width$}  {}\n",
                command.name(),
                command.description()
            ));
        }
        out
    }

    /// All registered command names.
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase, trimmed, single-spaced.
pub fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::clock::mock::MockClock;
    use crate::lines::transcript::Transcript;
    use crate::programs::TaskManager;
    use crate::session::Session;

    pub(crate) fn test_session(programs: Arc<TaskManager>) -> (Arc<Session>, Arc<Transcript>) {
        let transcript = Arc::new(Transcript::auto_open());
        let session = Arc::new(Session::new(
            transcript.clone(),
            programs,
            Arc::new(MockClock::new()),
        ));
        (session, transcript)
    }

    #[test]
    fn all_builtins_registered() {
        let reg = CommandRegistry::new();
        assert_eq!(reg.names(), vec!["help interface", "ovrs authenticate"]);
    }

    #[test]
    fn no_duplicate_names() {
        let reg = CommandRegistry::new();
        let mut seen = Vec::new();
        for name in reg.names() {
            let name = normalize(name);
            assert!(!seen.contains(&name), "duplicate command: {name}");
            seen.push(name);
        }
    }

    #[test]
    fn exists_and_resolve_agree() {
        let reg = CommandRegistry::new();
        let inputs = [
            "help interface",
            "HELP INTERFACE",
            "Help Interface",
            "  help   interface ",
            "ovrs authenticate",
            "OVRS Authenticate",
            "help",
            "",
            "   ",
            "ovrs",
            "dir",
        ];
        for input in inputs {
            assert_eq!(
                reg.exists(input),
                reg.resolve(input).is_some(),
                "disagreement on {input:?}"
            );
        }
    }

    #[test]
    fn resolve_ignores_case() {
        let reg = CommandRegistry::new();
        let cmd = reg.resolve("OVRS AUTHENTICATE").unwrap();
        assert_eq!(cmd.name(), "ovrs authenticate");
        assert!(reg.exists("OVRS AUTHENTICATE"));
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        let reg = CommandRegistry::new();
        assert!(!reg.exists("dir"));
        assert!(reg.resolve("help interfaces").is_none());
        assert!(reg.resolve("").is_none());
    }

    #[test]
    fn help_text_includes_all_commands() {
        let reg = CommandRegistry::new();
        let text = reg.help_text();
        for name in reg.names() {
            assert!(text.contains(name), "help missing: {name}");
        }
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize("  Help \t INTERFACE "), "help interface");
        assert_eq!(normalize(""), "");
    }

    #[tokio::test]
    async fn plugin_command_works() {
        struct PingCommand;

        #[async_trait]
        impl Command for PingCommand {
            fn name(&self) -> &str {
                "ping"
            }
            fn description(&self) -> &str {
                "pong"
            }
            async fn execute(&self, ctx: &ExecutionContext) {
                ctx.pending();
                ctx.append("pong");
                ctx.finished();
            }
        }

        let mut reg = CommandRegistry::new();
        reg.register(Arc::new(PingCommand));
        assert!(reg.exists("PING"));
        assert!(reg.help_text().contains("ping"));

        let (session, transcript) = test_session(Arc::new(TaskManager::new(&[])));
        let ctx = ExecutionContext::new("ping", Arc::clone(&session));
        reg.resolve("ping").unwrap().execute(&ctx).await;
        assert_eq!(
            transcript.output(crate::lines::LineIndex::new(0)).unwrap(),
            "pong\n"
        );
    }
}
