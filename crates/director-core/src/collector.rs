//! Task input collector: the instruction field plus the file drop zone.
//!
//! State stays local to the collector until `submit()`. Submitting hands a
//! `Task` back to the caller and leaves the collector untouched; the caller
//! owns the switch to the workspace view.

use crate::file::FileHandle;
use crate::task::Task;

#[derive(Debug, Clone, Default)]
pub struct TaskInput {
    instruction: String,
    files: Vec<FileHandle>,
    drag_over: bool,
}

impl TaskInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_instruction(&mut self, text: impl Into<String>) {
        self.instruction = text.into();
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    pub fn drag_enter(&mut self) {
        self.drag_over = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_over = false;
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    /// Accept files dropped onto the upload area. Returns the rejected ones.
    pub fn drop_files(&mut self, files: impl IntoIterator<Item = FileHandle>) -> Vec<FileHandle> {
        self.drag_over = false;
        self.accept(files, "drop")
    }

    /// Accept files chosen through the file picker. Returns the rejected ones.
    pub fn pick_files(&mut self, files: impl IntoIterator<Item = FileHandle>) -> Vec<FileHandle> {
        self.accept(files, "picker")
    }

    pub fn remove_file(&mut self, position: usize) -> Option<FileHandle> {
        if position < self.files.len() {
            Some(self.files.remove(position))
        } else {
            None
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.instruction.trim().is_empty()
    }

    /// Create a task from the current input, or `None` for a blank
    /// instruction.
    pub fn submit(&self) -> Option<Task> {
        if !self.can_submit() {
            tracing::debug!("ignoring submit with empty instruction");
            return None;
        }
        let task = Task::new(self.instruction.clone(), self.files.clone());
        tracing::info!(task_id = %task.id, files = task.files.len(), "task submitted");
        Some(task)
    }

    fn accept(
        &mut self,
        files: impl IntoIterator<Item = FileHandle>,
        source: &'static str,
    ) -> Vec<FileHandle> {
        let mut rejected = Vec::new();
        for file in files {
            if file.is_supported() {
                self.files.push(file);
            } else {
                tracing::debug!(
                    source,
                    name = %file.name,
                    media_type = %file.media_type,
                    "skipping unsupported file"
                );
                rejected.push(file);
            }
        }
        rejected
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::SupportedFormat;

    fn csv(name: &str) -> FileHandle {
        FileHandle::new(name, SupportedFormat::Csv.mime())
    }

    #[test]
    fn submit_yields_task_with_instruction_and_files() {
        let mut input = TaskInput::new();
        input.set_instruction("Summarize sales data");
        input.drop_files([csv("report.csv")]);

        let task = input.submit().unwrap();
        assert_eq!(task.instruction, "Summarize sales data");
        assert_eq!(task.file_names(), vec!["report.csv"]);
    }

    #[test]
    fn blank_instruction_never_submits() {
        let mut input = TaskInput::new();
        for text in ["", "   ", "\t\n"] {
            input.set_instruction(text);
            assert!(!input.can_submit());
            assert!(input.submit().is_none());
        }
    }

    #[test]
    fn instruction_is_kept_as_typed() {
        let mut input = TaskInput::new();
        input.set_instruction("  book a table  ");
        assert_eq!(input.submit().unwrap().instruction, "  book a table  ");
    }

    #[test]
    fn submit_does_not_clear_input() {
        let mut input = TaskInput::new();
        input.set_instruction("Check inventory");
        input.drop_files([csv("stock.csv")]);
        input.submit().unwrap();
        assert_eq!(input.instruction(), "Check inventory");
        assert_eq!(input.files().len(), 1);
    }

    #[test]
    fn drop_filters_unsupported_and_keeps_order() {
        let mut input = TaskInput::new();
        let rejected = input.drop_files([
            FileHandle::new("a.pdf", SupportedFormat::Pdf.mime()),
            FileHandle::new("photo.png", "image/png"),
            FileHandle::new("b.docx", SupportedFormat::Docx.mime()),
            FileHandle::new("notes.txt", "text/plain"),
            csv("c.csv"),
        ]);

        let names: Vec<&str> = input.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.docx", "c.csv"]);
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].name, "photo.png");
    }

    #[test]
    fn picker_uses_the_same_filter() {
        let mut input = TaskInput::new();
        let rejected = input.pick_files([
            FileHandle::new("sheet.xlsx", SupportedFormat::Xlsx.mime()),
            FileHandle::new("movie.mp4", "video/mp4"),
        ]);
        assert_eq!(input.files().len(), 1);
        assert_eq!(rejected[0].name, "movie.mp4");
    }

    #[test]
    fn drops_accumulate_across_calls() {
        let mut input = TaskInput::new();
        input.drop_files([csv("one.csv")]);
        input.pick_files([csv("two.csv")]);
        input.drop_files([csv("three.csv")]);
        let names: Vec<&str> = input.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["one.csv", "two.csv", "three.csv"]);
    }

    #[test]
    fn drag_flag_clears_on_drop() {
        let mut input = TaskInput::new();
        input.drag_enter();
        assert!(input.is_drag_over());
        input.drop_files(Vec::new());
        assert!(!input.is_drag_over());

        input.drag_enter();
        input.drag_leave();
        assert!(!input.is_drag_over());
    }

    #[test]
    fn remove_file_by_position() {
        let mut input = TaskInput::new();
        input.drop_files([csv("a.csv"), csv("b.csv"), csv("c.csv")]);
        assert_eq!(input.remove_file(1).unwrap().name, "b.csv");
        assert!(input.remove_file(5).is_none());
        let names: Vec<&str> = input.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.csv", "c.csv"]);
    }
}
