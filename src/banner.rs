//! Startup banner and farewell display.

use crate::consts::{AUTHOR, HOMEPAGE};
use crate::stage::Stage;

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub programs: &'a [String],
    pub pace: f64,
}

/// Print the startup banner with session info.
pub fn print_banner(info: &BannerInfo) {
    let programs = if info.programs.is_empty() {
        "(none)".to_string()
    } else {
        info.programs.join(", ")
    };
    println!(
        r#"Overseer Command Processor [Version {}]
(c) {}. {}

   running   {}
   pace      {}x
   type /help for host commands"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        programs,
        info.pace,
    );
}

/// Print where the session ended up.
pub fn print_session_summary(stage: Stage) {
    println!("stage: {} ({})", stage.as_u8(), stage.label());
    println!("goodbye.");
}
