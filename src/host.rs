//! Host commands prefixed with `/`.
//!
//! These act on the host, not on the shell: they list and start/kill
//! programs and show the workflow stage. They never touch line pairs or
//! the execution record.

use crate::programs::{ProgramManager, TaskManager};
use crate::shell::Shell;

/// What the host can reach while handling a slash command.
pub struct HostInfo<'a> {
    pub shell: &'a Shell,
    pub tasks: &'a TaskManager,
}

/// What the REPL should do after a host command.
#[derive(Debug, PartialEq, Eq)]
pub enum HostResult {
    /// Not a host command — pass input to the shell.
    NotAHostCommand,
    /// Handled; print the text.
    Handled(String),
    /// Exit the REPL.
    Quit,
}

struct HostCommand {
    name: &'static str,
    aliases: &'static [&'static str],
    usage: &'static str,
    description: &'static str,
    run: fn(&HostInfo, &str) -> HostResult,
}

const HOST_COMMANDS: &[HostCommand] = &[
    HostCommand {
        name: "/help",
        aliases: &["/h", "/?"],
        usage: "/help",
        description: "show host and shell commands",
        run: cmd_help,
    },
    HostCommand {
        name: "/ps",
        aliases: &["/tasklist"],
        usage: "/ps",
        description: "list running programs",
        run: cmd_ps,
    },
    HostCommand {
        name: "/start",
        aliases: &[],
        usage: "/start <program>",
        description: "start a program",
        run: cmd_start,
    },
    HostCommand {
        name: "/kill",
        aliases: &["/taskkill"],
        usage: "/kill <program>",
        description: "stop a program",
        run: cmd_kill,
    },
    HostCommand {
        name: "/stage",
        aliases: &[],
        usage: "/stage",
        description: "show the website stage",
        run: cmd_stage,
    },
    HostCommand {
        name: "/quit",
        aliases: &["/exit", "exit"],
        usage: "/quit",
        description: "exit the shell",
        run: cmd_quit,
    },
];

/// Try to handle input as a host command.
pub fn handle_host_command(input: &str, info: &HostInfo) -> HostResult {
    let input = input.trim();
    let (cmd, args) = match input.split_once(char::is_whitespace) {
        Some((cmd, args)) => (cmd, args.trim()),
        None => (input, ""),
    };

    for command in HOST_COMMANDS {
        if cmd == command.name || command.aliases.contains(&cmd) {
            return (command.run)(info, args);
        }
    }

    if cmd.starts_with('/') {
        return HostResult::Handled(format!(
            "unknown host command: {cmd}\ntype /help for available commands\n"
        ));
    }

    HostResult::NotAHostCommand
}

fn cmd_help(info: &HostInfo, _args: &str) -> HostResult {
    let max_width = HOST_COMMANDS
        .iter()
        .map(|c| c.usage.len())
        .max()
        .unwrap_or(10);

    let mut out = String::from("host commands:\n");
    for command in HOST_COMMANDS {
        out.push_str(&format!(
            "  {:<max_width$}  {}\n",
            command.usage, command.description
        ));
    }
    out.push_str("shell commands:\n");
    out.push_str(&info.shell.registry().help_text());
    HostResult::Handled(out)
}

fn cmd_ps(info: &HostInfo, _args: &str) -> HostResult {
    let active = info.tasks.active();
    if active.is_empty() {
        return HostResult::Handled("  (no programs running)\n".to_string());
    }
    let mut out = String::new();
    for program in active {
        out.push_str(&format!("  {:>5}  {}\n", program.pid, program.name));
    }
    HostResult::Handled(out)
}

fn cmd_start(info: &HostInfo, args: &str) -> HostResult {
    if args.is_empty() {
        return HostResult::Handled("usage: /start <program>\n".to_string());
    }
    match info.tasks.start(args) {
        Ok(handle) => HostResult::Handled(format!("  ✓ {} running (pid {})\n", handle.name, handle.pid)),
        Err(e) => HostResult::Handled(format!("  ✗ {e}\n")),
    }
}

fn cmd_kill(info: &HostInfo, args: &str) -> HostResult {
    if args.is_empty() {
        return HostResult::Handled("usage: /kill <program>\n".to_string());
    }
    match info.tasks.kill(args) {
        Ok(true) => HostResult::Handled(format!("  ✓ {args} stopped\n")),
        Ok(false) => HostResult::Handled(format!("  {args} was not running\n")),
        Err(e) => HostResult::Handled(format!("  ✗ {e}\n")),
    }
}

fn cmd_stage(info: &HostInfo, _args: &str) -> HostResult {
    let stage = info.shell.session().stage.get();
    HostResult::Handled(format!("  stage {} ({})\n", stage.as_u8(), stage.label()))
}

fn cmd_quit(_info: &HostInfo, _args: &str) -> HostResult {
    HostResult::Quit
}
