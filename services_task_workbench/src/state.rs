//! Workbench modes, task status and table selection

use serde::{Deserialize, Serialize};

/// What the workbench is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkbenchMode {
    /// Solving a task: runs and submissions go to that task
    Task(u64),
    /// Writing a reference query over hand-picked tables
    Authoring,
}

impl WorkbenchMode {
    pub fn task_id(&self) -> Option<u64> {
        match self {
            WorkbenchMode::Task(id) => Some(*id),
            WorkbenchMode::Authoring => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkbenchMode::Task(_) => "TASK",
            WorkbenchMode::Authoring => "AUTHORING",
        }
    }
}

/// Solved state of the current task. Moves forward only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Unsolved,
    Solved,
}

impl TaskStatus {
    pub fn is_solved(&self) -> bool {
        matches!(self, TaskStatus::Solved)
    }
}

/// Tables chosen for an authoring run, in the order they were picked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSelection {
    tables: Vec<String>,
}

impl TableSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if it was already selected
    pub fn select(&mut self, table: &str) -> bool {
        if self.contains(table) {
            return false;
        }
        self.tables.push(table.to_string());
        true
    }

    /// Returns false if it was not selected
    pub fn deselect(&mut self, table: &str) -> bool {
        let before = self.tables.len();
        self.tables.retain(|t| t != table);
        self.tables.len() != before
    }

    /// Flip membership; returns whether the table is now selected
    pub fn toggle(&mut self, table: &str) -> bool {
        if self.deselect(table) {
            false
        } else {
            self.select(table)
        }
    }

    pub fn contains(&self, table: &str) -> bool {
        self.tables.iter().any(|t| t == table)
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_keeps_pick_order() {
        let mut selection = TableSelection::new();
        assert!(selection.select("orders"));
        assert!(selection.select("customers"));
        assert!(!selection.select("orders"));
        assert_eq!(selection.tables(), ["orders", "customers"]);
    }

    #[test]
    fn test_toggle() {
        let mut selection = TableSelection::new();
        assert!(selection.toggle("users"));
        assert!(selection.contains("users"));
        assert!(!selection.toggle("users"));
        assert!(selection.is_empty());
        assert!(!selection.deselect("users"));
    }

    #[test]
    fn test_mode_task_id() {
        assert_eq!(WorkbenchMode::Task(4).task_id(), Some(4));
        assert_eq!(WorkbenchMode::Authoring.task_id(), None);
    }

    #[test]
    fn test_status_default_unsolved() {
        assert!(!TaskStatus::default().is_solved());
    }
}
