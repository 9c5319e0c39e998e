//! Project-wide constants.

use std::time::Duration;

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");

/// Default prompt shown before every input line.
pub const DEFAULT_PROMPT: &str = "C:\\>";

/// Programs running when the shell starts.
pub const DEFAULT_PROGRAMS: &[&str] = &["cmd"];

/// Every program the task manager knows how to start.
pub const PROGRAM_CATALOG: &[&str] = &["cmd", "ie9"];

pub const INFO_TAG: &str = "[INFO]";
pub const SUCCESS_TAG: &str = "[SUCCESS]";
pub const FAILED_TAG: &str = "[FAILED]";

/// Site the authentication narrative pretends to unlock.
pub const TARGET_SITE: &str = "https://zeljko.me/";

/// Suspensions of `ovrs authenticate`, in the order they happen.
pub const AUTH_DELAYS: [Duration; 6] = [
    Duration::from_millis(800),
    Duration::from_millis(1600),
    Duration::from_millis(2000),
    Duration::from_millis(2000),
    Duration::from_millis(1500),
    Duration::from_millis(3000),
];

/// The message for input that names no registered command.
pub fn not_recognized(input: &str) -> String {
    format!(
        "'{input}' is not recognized as an internal or external command, operable program or batch file."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consts_are_non_empty() {
        assert!(!AUTHOR.is_empty());
        assert!(!HOMEPAGE.is_empty());
        assert!(!DEFAULT_PROMPT.is_empty());
    }

    #[test]
    fn default_programs_are_in_catalog() {
        for program in DEFAULT_PROGRAMS {
            assert!(PROGRAM_CATALOG.contains(program), "{program} not in catalog");
        }
    }

    #[test]
    fn not_recognized_keeps_raw_input() {
        assert_eq!(
            not_recognized("Dir /w"),
            "'Dir /w' is not recognized as an internal or external command, operable program or batch file."
        );
    }

    #[test]
    fn not_recognized_empty_input() {
        assert!(not_recognized("").starts_with("'' is not recognized"));
    }

    #[test]
    fn auth_delays_sum() {
        let total: Duration = AUTH_DELAYS.iter().sum();
        assert_eq!(total, Duration::from_millis(10_900));
    }
}
