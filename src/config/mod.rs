//! Startup configuration for the shell host.

use anyhow::{Result, bail};

use crate::consts::{DEFAULT_PROGRAMS, DEFAULT_PROMPT, PROGRAM_CATALOG};

/// Host settings, filled from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Multiplier on every suspension. `0.0` runs workflows instantly.
    pub pace: f64,
    /// Prompt printed before each input line.
    pub prompt: String,
    /// Programs running at startup.
    pub programs: Vec<String>,
    /// Paint `[INFO]`/`[SUCCESS]`/`[FAILED]` tags.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pace: 1.0,
            prompt: DEFAULT_PROMPT.to_string(),
            programs: DEFAULT_PROGRAMS.iter().map(|p| p.to_string()).collect(),
            color: true,
        }
    }
}

impl Config {
    /// Parse a comma-separated program list, e.g. `"cmd, ie9"`.
    /// An empty string means no programs.
    pub fn parse_programs(list: &str) -> Vec<String> {
        list.split(',')
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.pace.is_finite() || self.pace < 0.0 {
            bail!("pace must be a finite number >= 0, got {}", self.pace);
        }
        if self.prompt.trim().is_empty() {
            bail!("prompt must not be empty");
        }
        for program in &self.programs {
            if !PROGRAM_CATALOG.contains(&program.as_str()) {
                bail!(
                    "unknown program: {program} (known: {})",
                    PROGRAM_CATALOG.join(", ")
                );
            }
        }
        Ok(())
    }
}
