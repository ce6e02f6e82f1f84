//! Progress driver state machine.
//!
//! Transitions: `Idle → Running → Terminal`, and back to `Running` whenever a
//! new task starts. The driver itself is synchronous and clock-free; the
//! ticker owns one and calls `tick()` on each timer fire.

use crate::task::Task;
use crate::timeline::{Progress, Timeline};
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    Terminal,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Index moved forward and the run continues.
    Advanced(usize),
    /// Index reached the final step; the timer must stop.
    Finished(usize),
    /// Nothing to do: idle, or already terminal.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub enum ProgressDriver {
    #[default]
    Idle,
    Running(Progress),
    Terminal(Progress),
}

impl ProgressDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a run for `task`: rebuild the timeline and reset
    /// the index to 0. Valid from every state.
    pub fn start(&mut self, task: &Task, started_at: DateTime<Local>) -> Progress {
        let progress = Progress::new(Timeline::for_task(task, started_at));
        *self = if progress.is_complete() {
            ProgressDriver::Terminal(progress.clone())
        } else {
            ProgressDriver::Running(progress.clone())
        };
        progress
    }

    pub fn tick(&mut self) -> Tick {
        match std::mem::take(self) {
            ProgressDriver::Running(mut progress) => {
                progress.advance();
                let index = progress.index();
                if progress.is_complete() {
                    *self = ProgressDriver::Terminal(progress);
                    Tick::Finished(index)
                } else {
                    *self = ProgressDriver::Running(progress);
                    Tick::Advanced(index)
                }
            }
            other => {
                *self = other;
                Tick::Ignored
            }
        }
    }

    pub fn state(&self) -> DriverState {
        match self {
            ProgressDriver::Idle => DriverState::Idle,
            ProgressDriver::Running(_) => DriverState::Running,
            ProgressDriver::Terminal(_) => DriverState::Terminal,
        }
    }

    pub fn progress(&self) -> Option<&Progress> {
        match self {
            ProgressDriver::Idle => None,
            ProgressDriver::Running(p) | ProgressDriver::Terminal(p) => Some(p),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::TaskInput;
    use crate::file::FileHandle;
    use crate::types::StepStatus;

    fn task(instruction: &str, files: Vec<FileHandle>) -> Task {
        let mut input = TaskInput::new();
        input.set_instruction(instruction);
        input.drop_files(files);
        input.submit().unwrap()
    }

    #[test]
    fn starts_idle_and_ignores_ticks() {
        let mut driver = ProgressDriver::new();
        assert_eq!(driver.state(), DriverState::Idle);
        assert_eq!(driver.tick(), Tick::Ignored);
        assert!(driver.progress().is_none());
    }

    #[test]
    fn five_ticks_reach_terminal() {
        let mut driver = ProgressDriver::new();
        driver.start(&task("Book a flight", Vec::new()), Local::now());
        assert_eq!(driver.state(), DriverState::Running);
        assert_eq!(driver.progress().unwrap().index(), 0);

        for expected in 1..=4 {
            assert_eq!(driver.tick(), Tick::Advanced(expected));
            assert_eq!(driver.state(), DriverState::Running);
        }
        assert_eq!(driver.tick(), Tick::Finished(5));
        assert_eq!(driver.state(), DriverState::Terminal);

        let progress = driver.progress().unwrap();
        assert!(progress.steps().all(|(_, s)| s == StepStatus::Completed));
    }

    #[test]
    fn terminal_ignores_further_ticks() {
        let mut driver = ProgressDriver::new();
        driver.start(&task("Book a flight", Vec::new()), Local::now());
        for _ in 0..5 {
            driver.tick();
        }
        for _ in 0..10 {
            assert_eq!(driver.tick(), Tick::Ignored);
        }
        assert_eq!(driver.progress().unwrap().index(), 5);
        assert_eq!(driver.state(), DriverState::Terminal);
    }

    #[test]
    fn new_task_restarts_from_terminal() {
        let mut driver = ProgressDriver::new();
        driver.start(&task("First", Vec::new()), Local::now());
        for _ in 0..5 {
            driver.tick();
        }
        assert_eq!(driver.state(), DriverState::Terminal);

        let files = vec![FileHandle::new("report.csv", "text/csv")];
        let progress = driver.start(&task("Second", files), Local::now());
        assert_eq!(progress.index(), 0);
        assert_eq!(
            progress.timeline().steps()[1].description,
            "Processing 1 uploaded files"
        );
        assert_eq!(driver.state(), DriverState::Running);
    }

    #[test]
    fn restart_mid_run_resets_index() {
        let mut driver = ProgressDriver::new();
        driver.start(&task("First", Vec::new()), Local::now());
        driver.tick();
        driver.tick();
        driver.start(&task("Second", Vec::new()), Local::now());
        assert_eq!(driver.progress().unwrap().index(), 0);
    }

    #[test]
    fn one_active_step_per_running_index() {
        let mut driver = ProgressDriver::new();
        driver.start(&task("Audit", Vec::new()), Local::now());
        loop {
            let progress = driver.progress().unwrap();
            let active = progress
                .steps()
                .filter(|(_, s)| *s == StepStatus::Active)
                .count();
            if driver.state() == DriverState::Terminal {
                assert_eq!(active, 0);
                break;
            }
            assert_eq!(active, 1);
            driver.tick();
        }
    }
}
