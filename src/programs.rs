//! Simulated running programs.
//!
//! The shell only observes programs through [`ProgramManager`]. The host
//! starts and kills them on a [`TaskManager`].

use std::sync::{Mutex, MutexGuard};

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::debug;

/// Identity of one program in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProgramHandle {
    pub pid: u32,
    pub name: String,
}

/// Read-only view of the process set.
pub trait ProgramManager: Send + Sync {
    /// Look a program up in the catalog, running or not.
    fn find(&self, name: &str) -> Option<ProgramHandle>;

    /// Snapshot of the programs running right now.
    fn active(&self) -> Vec<ProgramHandle>;
}

/// In-memory process set with a fixed catalog.
pub struct TaskManager {
    catalog: Vec<ProgramHandle>,
    running: Mutex<Vec<ProgramHandle>>,
}

impl TaskManager {
    /// An empty task manager over the given catalog. Pids follow catalog order.
    pub fn new(catalog: &[&str]) -> Self {
        let catalog = catalog
            .iter()
            .zip(1u32..)
            .map(|(name, n)| ProgramHandle {
                pid: n * 4,
                name: name.to_string(),
            })
            .collect();
        Self {
            catalog,
            running: Mutex::new(Vec::new()),
        }
    }

    /// Start a program. Starting a running program returns its handle.
    pub fn start(&self, name: &str) -> Result<ProgramHandle> {
        let Some(handle) = self.find(name) else {
            bail!("unknown program: {name}");
        };
        let mut running = self.lock();
        if !running.contains(&handle) {
            running.push(handle.clone());
            debug!(program = %handle.name, pid = handle.pid, "program started");
        }
        Ok(handle)
    }

    /// Stop a program. Returns whether it was running.
    pub fn kill(&self, name: &str) -> Result<bool> {
        let Some(handle) = self.find(name) else {
            bail!("unknown program: {name}");
        };
        let mut running = self.lock();
        let before = running.len();
        running.retain(|p| p != &handle);
        let killed = running.len() != before;
        if killed {
            debug!(program = %handle.name, pid = handle.pid, "program stopped");
        }
        Ok(killed)
    }

    pub fn is_running(&self, name: &str) -> bool {
        self.find(name)
            .is_some_and(|handle| self.lock().contains(&handle))
    }

    /// Every catalog name.
    pub fn catalog(&self) -> Vec<&str> {
        self.catalog.iter().map(|p| p.name.as_str()).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ProgramHandle>> {
        self.running.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProgramManager for TaskManager {
    fn find(&self, name: &str) -> Option<ProgramHandle> {
        let name = name.trim().to_lowercase();
        self.catalog.iter().find(|p| p.name == name).cloned()
    }

    fn active(&self) -> Vec<ProgramHandle> {
        self.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PROGRAM_CATALOG;

    #[test]
    fn starts_with_nothing_running() {
        let manager = TaskManager::new(PROGRAM_CATALOG);
        assert!(manager.active().is_empty());
        assert_eq!(manager.catalog(), vec!["cmd", "ie9"]);
    }

    #[test]
    fn find_is_catalog_lookup() {
        let manager = TaskManager::new(PROGRAM_CATALOG);
        let ie9 = manager.find("ie9").unwrap();
        assert_eq!(ie9.name, "ie9");
        assert!(manager.active().is_empty());
        assert!(manager.find("notepad").is_none());
    }

    #[test]
    fn find_ignores_case() {
        let manager = TaskManager::new(PROGRAM_CATALOG);
        assert_eq!(manager.find("IE9"), manager.find("ie9"));
    }

    #[test]
    fn pids_are_distinct() {
        let manager = TaskManager::new(PROGRAM_CATALOG);
        let cmd = manager.find("cmd").unwrap();
        let ie9 = manager.find("ie9").unwrap();
        assert_ne!(cmd.pid, ie9.pid);
    }

    #[test]
    fn start_is_idempotent() {
        let manager = TaskManager::new(PROGRAM_CATALOG);
        let first = manager.start("ie9").unwrap();
        let second = manager.start("ie9").unwrap();
        assert_eq!(first, second);
        assert_eq!(manager.active(), vec![first]);
    }

    #[test]
    fn kill_reports_whether_running() {
        let manager = TaskManager::new(PROGRAM_CATALOG);
        manager.start("ie9").unwrap();
        assert!(manager.kill("ie9").unwrap());
        assert!(!manager.kill("ie9").unwrap());
        assert!(!manager.is_running("ie9"));
    }

    #[test]
    fn unknown_program_is_an_error() {
        let manager = TaskManager::new(PROGRAM_CATALOG);
        assert!(manager.start("doom").is_err());
        assert!(manager.kill("doom").is_err());
    }

    #[test]
    fn snapshot_does_not_follow_later_changes() {
        let manager = TaskManager::new(PROGRAM_CATALOG);
        manager.start("ie9").unwrap();
        let snapshot = manager.active();
        manager.kill("ie9").unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(manager.active().is_empty());
    }
}
