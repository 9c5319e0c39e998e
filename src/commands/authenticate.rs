//! `ovrs authenticate`: the scripted GuardianX access workflow.
//!
//! The narrative runs through fixed phases separated by suspensions. Twice
//! it re-reads the process set after waking up, because the host may have
//! started or killed programs in the meantime:
//!
//! - after the address phase, `ie9` must be running or the run fails and the
//!   stage drops back to [`Stage::None`];
//! - after the access phase, `ie9` must still be running. If `cmd` is gone
//!   by then the run ends in [`Stage::PartialAccess`] (finished, then failed),
//!   otherwise in [`Stage::FullAccess`].
//!
//! A run that starts at full access only reports that and finishes.

use async_trait::async_trait;
use tracing::{debug, info};

use super::Command;
use crate::consts::{AUTH_DELAYS, FAILED_TAG, INFO_TAG, SUCCESS_TAG, TARGET_SITE};
use crate::context::ExecutionContext;
use crate::programs::ProgramHandle;
use crate::stage::Stage;

/// Program that must stay open for the whole run.
const BROWSER: &str = "ie9";
/// Program whose absence at the end downgrades the result to partial access.
const CONSOLE: &str = "cmd";

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Stage was already full access; nothing ran.
    AlreadyGranted,
    /// Browser missing after the address phase.
    AnalysisFailed,
    /// Browser present at the end, console missing.
    PartialAccess,
    /// Browser and console present at the end.
    FullAccess,
    /// Browser missing at the end.
    AccessDenied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    KeyEntry,
    Address,
    Authorization,
    Verification,
    Access,
}

pub struct AuthenticateCommand;

#[async_trait]
impl Command for AuthenticateCommand {
    fn name(&self) -> &str {
        "ovrs authenticate"
    }

    fn description(&self) -> &str {
        "request Overseer access to the website"
    }

    async fn execute(&self, ctx: &ExecutionContext) {
        let outcome = authenticate(ctx).await;
        info!(?outcome, stage = ctx.session().stage.get().label(), "authenticate done");
    }
}

/// Run the workflow to completion and report how it ended.
pub async fn authenticate(ctx: &ExecutionContext) -> AuthOutcome {
    let session = ctx.session();

    if session.stage.get() == Stage::FullAccess {
        ctx.pending();
        ctx.append("");
        ctx.append(&format!("{INFO_TAG} Access has already been granted."));
        ctx.finished();
        return AuthOutcome::AlreadyGranted;
    }

    let browser = session.programs.find(BROWSER);
    let console = session.programs.find(CONSOLE);

    ctx.pending();
    session.stage.set(Stage::KeyValidated);

    let mut phase = Phase::KeyEntry;
    loop {
        debug!(?phase, "authenticate phase");
        phase = match phase {
            Phase::KeyEntry => {
                ctx.append("");
                ctx.append(&format!("{INFO_TAG} Welcome to Overseer GuardianX"));
                ctx.append(&format!("{INFO_TAG} Please enter your access key to proceed:"));
                ctx.append("");
                ctx.append("> Enter Access Key: **********");
                session.clock.sleep(AUTH_DELAYS[0]).await;
                Phase::Address
            }
            Phase::Address => {
                ctx.append("");
                ctx.append(&format!("{INFO_TAG} Validating Access Key..."));
                ctx.append(&format!(
                    "{SUCCESS_TAG} Access key verified. Initiating GuardianX."
                ));
                heading(ctx, "Initiate Access Request");
                ctx.append(&format!(
                    "{INFO_TAG} To proceed, please provide the website address you want to access:"
                ));
                ctx.append(&format!("> Enter Website Address: {TARGET_SITE}"));
                ctx.append("");
                ctx.append(&format!("{INFO_TAG} Analyzing the target website..."));
                session.clock.sleep(AUTH_DELAYS[1]).await;

                let active = session.programs.active();
                if !is_running(&active, &browser) {
                    ctx.append(&format!("{FAILED_TAG} failed to analyze target website."));
                    ctx.append("");
                    ctx.failed();
                    session.stage.set(Stage::None);
                    return AuthOutcome::AnalysisFailed;
                }
                Phase::Authorization
            }
            Phase::Authorization => {
                heading(ctx, "Requesting Overseer Authorization");
                ctx.append(&format!("{INFO_TAG} Connecting to Overseer Security Servers..."));
                ctx.append(&format!("{SUCCESS_TAG} Connection established."));
                ctx.append("");
                ctx.append(&format!(
                    "{INFO_TAG} Requesting authorized access to {TARGET_SITE}..."
                ));
                session.clock.sleep(AUTH_DELAYS[2]).await;

                heading(ctx, "Requesting Overseer Authorization");
                ctx.append(&format!("{INFO_TAG} Connecting to Overseer Security Servers..."));
                ctx.append("");
                ctx.append(&format!("{SUCCESS_TAG} Authorization granted by Overseer."));
                session.clock.sleep(AUTH_DELAYS[3]).await;
                Phase::Verification
            }
            Phase::Verification => {
                heading(ctx, "Overseer Verification");
                ctx.append(&format!("{INFO_TAG} Waiting for Overseer system response..."));
                ctx.append("");
                ctx.append(&format!("{SUCCESS_TAG} Authorization granted by Overseer."));
                session.clock.sleep(AUTH_DELAYS[4]).await;
                Phase::Access
            }
            Phase::Access => {
                heading(ctx, "Accessing the Website");
                ctx.append(&format!("{INFO_TAG} Initiating access to {TARGET_SITE}..."));
                ctx.append("");
                session.clock.sleep(AUTH_DELAYS[5]).await;

                let active = session.programs.active();
                if !is_running(&active, &browser) {
                    ctx.append(&format!("{FAILED_TAG} Website access was not granted."));
                    ctx.append("");
                    ctx.failed();
                    session.stage.set(Stage::None);
                    return AuthOutcome::AccessDenied;
                }

                ctx.append(&format!("{SUCCESS_TAG} Website access granted."));
                ctx.append("");
                ctx.finished();
                if !is_running(&active, &console) {
                    session.stage.set(Stage::PartialAccess);
                    ctx.failed();
                    return AuthOutcome::PartialAccess;
                }
                session.stage.set(Stage::FullAccess);
                return AuthOutcome::FullAccess;
            }
        };
    }
}

fn heading(ctx: &ExecutionContext, title: &str) {
    ctx.append("");
    ctx.append(&format!("-- {title} --"));
    ctx.append("");
}

/// A program missing from the catalog is never running.
fn is_running(active: &[ProgramHandle], program: &Option<ProgramHandle>) -> bool {
    program.as_ref().is_some_and(|p| active.contains(p))
}
