//! The fixed action timeline and its status derivation.
//!
//! A `Timeline` is immutable once built. The only moving part is the
//! `index` carried by `Progress`; every step status is recomputed from it on
//! read, so statuses cannot drift from the index.

use crate::task::Task;
use crate::types::{ActionKind, StepStatus};
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;

pub const STEP_COUNT: usize = 6;

const TIME_LABEL_FORMAT: &str = "%H:%M:%S";

// ---------------------------------------------------------------------------
// ActionStep
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionStep {
    pub id: String,
    pub kind: ActionKind,
    pub description: String,
    /// Offset from the timeline start shown as the step's time label.
    pub offset: Duration,
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub started_at: DateTime<Local>,
    steps: Vec<ActionStep>,
}

impl Timeline {
    /// Build the six-step timeline for a task. Only step 2 depends on the
    /// task: it mentions the uploaded files when there are any.
    pub fn for_task(task: &Task, started_at: DateTime<Local>) -> Self {
        Self::build(task.files.len(), started_at)
    }

    pub fn build(file_count: usize, started_at: DateTime<Local>) -> Self {
        let read_description = if file_count > 0 {
            format!("Processing {file_count} uploaded files")
        } else {
            "Opening browser session".to_string()
        };

        let plan: [(ActionKind, String, u64); STEP_COUNT] = [
            (ActionKind::Analyze, "Analyzing task requirements".into(), 0),
            (ActionKind::Read, read_description, 1),
            (ActionKind::Click, "Navigating to target website".into(), 3),
            (ActionKind::Type, "Filling form fields".into(), 5),
            (ActionKind::Scroll, "Scanning page content".into(), 7),
            (ActionKind::Complete, "Task completed successfully".into(), 9),
        ];

        let steps = plan
            .into_iter()
            .enumerate()
            .map(|(i, (kind, description, secs))| ActionStep {
                id: (i + 1).to_string(),
                kind,
                description,
                offset: Duration::from_secs(secs),
            })
            .collect();

        Self { started_at, steps }
    }

    pub fn steps(&self) -> &[ActionStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Wall-clock label for a step: timeline start plus the step offset.
    pub fn time_label(&self, step: &ActionStep) -> String {
        let offset =
            chrono::Duration::from_std(step.offset).unwrap_or_else(|_| chrono::Duration::zero());
        (self.started_at + offset).format(TIME_LABEL_FORMAT).to_string()
    }
}

/// Status of the step at `position` when the current index is `index`.
///
/// Once the index reaches the final step the run is complete and every step,
/// the final one included, reports `Completed`.
pub fn status_at(position: usize, index: usize, len: usize) -> StepStatus {
    if len == 0 || index + 1 >= len {
        return StepStatus::Completed;
    }
    if position < index {
        StepStatus::Completed
    } else if position == index {
        StepStatus::Active
    } else {
        StepStatus::Pending
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// A timeline plus the one authoritative current index.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    timeline: Arc<Timeline>,
    index: usize,
}

impl Progress {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline: Arc::new(timeline),
            index: 0,
        }
    }

    /// Progress frozen at `index`, clamped to the final step.
    pub fn at(timeline: Timeline, index: usize) -> Self {
        let index = index.min(timeline.last_index());
        Self {
            timeline: Arc::new(timeline),
            index,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.timeline.last_index()
    }

    /// Advance by one step. Returns false when already on the final step.
    pub(crate) fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Progress at each index after `last`, up to and including the current
    /// one. The replayed values share this timeline.
    pub fn replay_after(&self, last: usize) -> impl Iterator<Item = Progress> + '_ {
        (last + 1..=self.index).map(move |index| Progress {
            timeline: Arc::clone(&self.timeline),
            index,
        })
    }

    pub fn status_of(&self, position: usize) -> StepStatus {
        status_at(position, self.index, self.timeline.len())
    }

    pub fn steps(&self) -> impl Iterator<Item = (&ActionStep, StepStatus)> + '_ {
        self.timeline
            .steps()
            .iter()
            .enumerate()
            .map(move |(i, step)| (step, self.status_of(i)))
    }

    pub fn active_step(&self) -> Option<&ActionStep> {
        self.steps()
            .find(|(_, status)| *status == StepStatus::Active)
            .map(|(step, _)| step)
    }

    /// "4/6 steps complete"
    pub fn summarize(&self) -> String {
        let done = self
            .steps()
            .filter(|(_, s)| *s == StepStatus::Completed)
            .count();
        format!("{done}/{} steps complete", self.timeline.len())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_start() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap()
    }

    #[test]
    fn timeline_has_six_steps_in_order() {
        let timeline = Timeline::build(0, fixed_start());
        let kinds: Vec<ActionKind> = timeline.steps().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, ActionKind::all());
        let ids: Vec<&str> = timeline.steps().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn read_step_mentions_upload_count() {
        let with_files = Timeline::build(1, fixed_start());
        assert_eq!(with_files.steps()[1].description, "Processing 1 uploaded files");

        let without = Timeline::build(0, fixed_start());
        assert_eq!(without.steps()[1].description, "Opening browser session");
    }

    #[test]
    fn time_labels_follow_offsets() {
        let timeline = Timeline::build(0, fixed_start());
        let labels: Vec<String> = timeline
            .steps()
            .iter()
            .map(|s| timeline.time_label(s))
            .collect();
        assert_eq!(
            labels,
            vec!["14:30:00", "14:30:01", "14:30:03", "14:30:05", "14:30:07", "14:30:09"]
        );
    }

    #[test]
    fn exactly_one_active_before_the_final_step() {
        for index in 0..STEP_COUNT - 1 {
            let active = (0..STEP_COUNT)
                .filter(|&p| status_at(p, index, STEP_COUNT) == StepStatus::Active)
                .count();
            assert_eq!(active, 1, "index {index}");
            assert_eq!(status_at(index, index, STEP_COUNT), StepStatus::Active);
        }
    }

    #[test]
    fn final_index_completes_everything() {
        let last = STEP_COUNT - 1;
        for p in 0..STEP_COUNT {
            assert_eq!(status_at(p, last, STEP_COUNT), StepStatus::Completed);
        }
    }

    #[test]
    fn statuses_split_around_index() {
        assert_eq!(status_at(0, 2, STEP_COUNT), StepStatus::Completed);
        assert_eq!(status_at(1, 2, STEP_COUNT), StepStatus::Completed);
        assert_eq!(status_at(2, 2, STEP_COUNT), StepStatus::Active);
        assert_eq!(status_at(3, 2, STEP_COUNT), StepStatus::Pending);
        assert_eq!(status_at(5, 2, STEP_COUNT), StepStatus::Pending);
    }

    #[test]
    fn progress_advances_until_complete() {
        let mut progress = Progress::new(Timeline::build(0, fixed_start()));
        assert_eq!(progress.active_step().unwrap().kind, ActionKind::Analyze);

        let mut advanced = 0;
        while progress.advance() {
            advanced += 1;
        }
        assert_eq!(advanced, 5);
        assert!(progress.is_complete());
        assert!(progress.active_step().is_none());
        assert_eq!(progress.summarize(), "6/6 steps complete");
        assert!(!progress.advance());
        assert_eq!(progress.index(), 5);
    }

    #[test]
    fn replay_fills_skipped_indices() {
        let progress = Progress::at(Timeline::build(0, fixed_start()), 5);
        let indices: Vec<usize> = progress.replay_after(2).map(|p| p.index()).collect();
        assert_eq!(indices, vec![3, 4, 5]);
        assert!(progress.replay_after(5).next().is_none());

        let replayed: Vec<Progress> = progress.replay_after(3).collect();
        assert_eq!(replayed[0].active_step().unwrap().kind, ActionKind::Scroll);
        assert!(replayed[1].is_complete());
    }

    #[test]
    fn progress_at_clamps_index() {
        let progress = Progress::at(Timeline::build(2, fixed_start()), 42);
        assert_eq!(progress.index(), 5);
        assert!(progress.is_complete());

        let mid = Progress::at(Timeline::build(2, fixed_start()), 3);
        assert_eq!(mid.active_step().unwrap().kind, ActionKind::Type);
        assert_eq!(mid.summarize(), "3/6 steps complete");
    }
}
