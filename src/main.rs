use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use overseer::banner::{BannerInfo, print_banner, print_session_summary};
use overseer::clock::TokioClock;
use overseer::commands::CommandRegistry;
use overseer::config::Config;
use overseer::consts::{DEFAULT_PROMPT, PROGRAM_CATALOG};
use overseer::host::{HostInfo, HostResult, handle_host_command};
use overseer::lines::LineRenderer;
use overseer::lines::terminal::TerminalRenderer;
use overseer::lines::transcript::Transcript;
use overseer::programs::TaskManager;
use overseer::session::Session;
use overseer::shell::{RunOutcome, Shell};

#[derive(Parser)]
#[command(name = "overseer", version, about = "A command prompt with something to hide.")]
struct Cli {
    /// Multiplier on every workflow delay (0 = instant)
    #[arg(long, default_value_t = 1.0)]
    pace: f64,

    /// Prompt shown before each input line
    #[arg(long, default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Comma-separated programs running at startup
    #[arg(long, default_value = "cmd")]
    programs: String,

    /// Disable colored tags
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Run a single command and exit (non-interactive)
    #[arg(short, long)]
    run: Option<String>,

    /// With --run, print the transcript as JSON instead of streaming it
    #[arg(long, default_value_t = false, requires = "run")]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = Config {
        pace: cli.pace,
        prompt: cli.prompt,
        programs: Config::parse_programs(&cli.programs),
        color: !cli.no_color,
    };
    config.validate()?;

    let tasks = Arc::new(TaskManager::new(PROGRAM_CATALOG));
    for program in &config.programs {
        tasks.start(program)?;
    }

    // Single command mode
    if let Some(input) = cli.run {
        return run_once(&input, &config, tasks, cli.json).await;
    }

    let terminal = Arc::new(TerminalRenderer::new(config.prompt.clone(), config.color));
    let session = Arc::new(Session::new(
        terminal.clone(),
        tasks.clone(),
        Arc::new(TokioClock::new(config.pace)),
    ));
    let shell = Arc::new(Shell::new(CommandRegistry::new(), session));

    print_banner(&BannerInfo {
        programs: &config.programs,
        pace: config.pace,
    });
    terminal.print_prompt();

    // Async stdin so host commands keep working while a workflow is suspended
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let input = line.trim_end();

        let info = HostInfo {
            shell: &shell,
            tasks: &tasks,
        };
        match handle_host_command(input, &info) {
            HostResult::Quit => break,
            HostResult::Handled(text) => {
                print!("{text}");
                if !shell.is_busy() {
                    terminal.print_prompt();
                }
                continue;
            }
            HostResult::NotAHostCommand => {}
        }

        if input.trim().is_empty() {
            if !shell.is_busy() {
                terminal.print_prompt();
            }
            continue;
        }

        if shell.is_busy() {
            println!("  a command is still running");
            continue;
        }

        let shell = Arc::clone(&shell);
        let input = input.to_string();
        tokio::spawn(async move {
            if let RunOutcome::Busy = shell.run_command(&input).await {
                println!("  a command is still running");
            }
        });
        // Let the command take the in-flight slot before the next line is read
        tokio::task::yield_now().await;
    }

    print_session_summary(shell.session().stage.get());
    io::stdout().flush()?;
    Ok(())
}

async fn run_once(
    input: &str,
    config: &Config,
    tasks: Arc<TaskManager>,
    json: bool,
) -> anyhow::Result<()> {
    let transcript = Arc::new(Transcript::auto_open());
    let renderer: Arc<dyn LineRenderer> = if json {
        transcript.clone()
    } else {
        Arc::new(TerminalRenderer::new(config.prompt.clone(), config.color))
    };
    let session = Arc::new(Session::new(
        renderer,
        tasks,
        Arc::new(TokioClock::new(config.pace)),
    ));
    let shell = Shell::new(CommandRegistry::new(), session);

    transcript.set_input(shell.session().lines.current(), input);
    let outcome = shell.run_command(input).await;

    if json {
        let report = serde_json::json!({
            "input": input,
            "result": outcome,
            "stage": shell.session().stage.get(),
            "lines": transcript.records(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}
