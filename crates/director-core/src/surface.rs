//! Presentation model for the workspace view.
//!
//! Everything here is a pure function of the task, the current progress and
//! the config. Renderers only format what these types hold.

use crate::config::Config;
use crate::file::FileCategory;
use crate::task::Task;
use crate::timeline::Progress;
use crate::types::{ActionKind, StepStatus};
use serde::Serialize;

pub const NAME_FIELD_VALUE: &str = "AI Generated Content";
pub const EMAIL_FIELD_VALUE: &str = "ai@example.com";
pub const CURSOR_LABEL: &str = "AI Operating...";

const METRIC_STEP_PERCENT: u32 = 23;
const METRIC_COUNT: u32 = 3;

// ---------------------------------------------------------------------------
// TaskCard
// ---------------------------------------------------------------------------

/// A listed upload: its name and the icon hint derived from its media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChip {
    pub name: String,
    pub category: FileCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCard {
    pub instruction: String,
    pub file_count: usize,
    pub shown_files: Vec<FileChip>,
    /// Files not listed by name; rendered as "+N more files".
    pub more_files: usize,
}

impl TaskCard {
    pub fn new(task: &Task, preview_limit: usize) -> Self {
        let shown_files: Vec<FileChip> = task
            .files
            .iter()
            .take(preview_limit)
            .map(|f| FileChip {
                name: f.name.clone(),
                category: f.category(),
            })
            .collect();
        Self {
            instruction: task.instruction.clone(),
            file_count: task.files.len(),
            more_files: task.files.len() - shown_files.len(),
            shown_files,
        }
    }

    pub fn has_files(&self) -> bool {
        self.file_count > 0
    }

    pub fn overflow_label(&self) -> Option<String> {
        (self.more_files > 0).then(|| format!("+{} more files", self.more_files))
    }
}

// ---------------------------------------------------------------------------
// StepRow
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepIcon {
    Pointer,
    Type,
    Eye,
    FileText,
    CheckCircle,
}

impl From<ActionKind> for StepIcon {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Click => StepIcon::Pointer,
            ActionKind::Type => StepIcon::Type,
            ActionKind::Scroll | ActionKind::Analyze => StepIcon::Eye,
            ActionKind::Read => StepIcon::FileText,
            ActionKind::Complete => StepIcon::CheckCircle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Accent,
    Muted,
}

impl From<StepStatus> for Tone {
    fn from(status: StepStatus) -> Self {
        match status {
            StepStatus::Completed => Tone::Success,
            StepStatus::Active => Tone::Accent,
            StepStatus::Pending => Tone::Muted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRow {
    pub id: String,
    pub kind: ActionKind,
    pub description: String,
    pub time: String,
    pub status: StepStatus,
    pub icon: StepIcon,
    pub tone: Tone,
    /// Blinking terminal cursor on the active row.
    pub cursor: bool,
}

pub fn step_rows(progress: &Progress) -> Vec<StepRow> {
    let timeline = progress.timeline();
    progress
        .steps()
        .map(|(step, status)| StepRow {
            id: step.id.clone(),
            kind: step.kind,
            description: step.description.clone(),
            time: timeline.time_label(step),
            status,
            icon: step.kind.into(),
            tone: status.into(),
            cursor: status == StepStatus::Active,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// BrowserPanel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub glow: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserPanel {
    pub url: String,
    pub name: FormField,
    pub email: FormField,
    pub metrics: Vec<Metric>,
    /// The "AI Operating..." pointer overlay.
    pub cursor_visible: bool,
}

impl BrowserPanel {
    pub fn at(progress: &Progress, url: &str) -> Self {
        let index = progress.index();
        let len = progress.timeline().len();

        let name = FormField {
            label: "Name",
            value: if index >= 4 { NAME_FIELD_VALUE.to_string() } else { String::new() },
            glow: index >= 3,
        };
        let email = FormField {
            label: "Email",
            value: if index >= 5 { EMAIL_FIELD_VALUE.to_string() } else { String::new() },
            glow: index >= 4,
        };
        let metrics = (1..=METRIC_COUNT)
            .map(|i| Metric {
                label: format!("Metric {i}"),
                percent: if index >= 5 { i * METRIC_STEP_PERCENT } else { 0 },
            })
            .collect();

        Self {
            url: url.to_string(),
            name,
            email,
            metrics,
            cursor_visible: index > 0 && index + 1 < len,
        }
    }
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// Everything the workspace view shows at one index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Surface {
    pub index: usize,
    pub complete: bool,
    pub task: TaskCard,
    pub steps: Vec<StepRow>,
    pub browser: BrowserPanel,
}

impl Surface {
    pub fn compose(task: &Task, progress: &Progress, config: &Config) -> Self {
        Self {
            index: progress.index(),
            complete: progress.is_complete(),
            task: TaskCard::new(task, config.file_preview_limit),
            steps: step_rows(progress),
            browser: BrowserPanel::at(progress, &config.browser_url),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
