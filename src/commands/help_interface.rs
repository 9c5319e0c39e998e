use async_trait::async_trait;

use super::Command;
use crate::context::ExecutionContext;

pub struct HelpInterfaceCommand;

#[async_trait]
impl Command for HelpInterfaceCommand {
    fn name(&self) -> &str {
        "help interface"
    }

    fn description(&self) -> &str {
        "describe the INTERFACE command"
    }

    async fn execute(&self, ctx: &ExecutionContext) {
        ctx.pending();
        ctx.append(
            "Tells cmd.exe what interface the webpage should display. \
             Internet Explorer must be opened and unlocked in order to execute",
        );
        ctx.append("");
        ctx.append(" INTERFACE [ABOUT | TEST | TEST2]");
        ctx.append("");
        ctx.append(" INTERFACE must have a parameter specified in order to work.");
        ctx.append("");
        ctx.finished();
    }
}
