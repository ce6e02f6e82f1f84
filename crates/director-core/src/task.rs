use crate::file::FileHandle;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A submitted instruction plus the file handles accepted at submit time.
///
/// Only the collector creates tasks, and only from a non-empty instruction.
/// A task is never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub instruction: String,
    pub files: Vec<FileHandle>,
    pub submitted_at: DateTime<Local>,
}

impl Task {
    pub(crate) fn new(instruction: impl Into<String>, files: Vec<FileHandle>) -> Self {
        Self {
            id: Uuid::new_v4(),
            instruction: instruction.into(),
            files,
            submitted_at: Local::now(),
        }
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_keep_order() {
        let task = Task::new(
            "Compare the quarters",
            vec![
                FileHandle::new("q1.csv", "text/csv"),
                FileHandle::new("q2.csv", "text/csv"),
            ],
        );
        assert!(task.has_files());
        assert_eq!(task.file_names(), vec!["q1.csv", "q2.csv"]);
    }

    #[test]
    fn each_task_gets_its_own_id() {
        let a = Task::new("one", Vec::new());
        let b = Task::new("one", Vec::new());
        assert_ne!(a.id, b.id);
        assert!(!a.has_files());
    }
}
