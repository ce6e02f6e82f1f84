//! Top-level view coordinator.
//!
//! `View::Workspace` owns both the task and its running timer, so the
//! workspace cannot be shown without a task, and leaving it always stops the
//! timer.

use crate::config::Config;
use crate::error::Result;
use crate::task::Task;
use crate::ticker::ProgressHandle;

pub struct Workspace {
    task: Task,
    progress: ProgressHandle,
}

impl Workspace {
    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn progress(&self) -> &ProgressHandle {
        &self.progress
    }
}

pub enum View {
    Home,
    Workspace(Workspace),
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Workspace(_) => "workspace",
        }
    }
}

pub struct Coordinator {
    config: Config,
    view: View,
}

impl Coordinator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            view: View::Home,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn workspace(&self) -> Option<&Workspace> {
        match &self.view {
            View::Workspace(ws) => Some(ws),
            View::Home => None,
        }
    }

    pub fn is_workspace(&self) -> bool {
        matches!(self.view, View::Workspace(_))
    }

    /// Switch to the workspace for `task`. Any previous run is torn down
    /// before the new timer starts.
    pub fn run_task(&mut self, task: Task) -> Result<()> {
        self.back_home();
        let progress = ProgressHandle::spawn(&task, self.config.tick_interval())?;
        tracing::info!(task_id = %task.id, "entering workspace");
        self.view = View::Workspace(Workspace { task, progress });
        Ok(())
    }

    /// Return to the home view, stopping the timer. Returns the task that
    /// was active, if any.
    pub fn back_home(&mut self) -> Option<Task> {
        match std::mem::replace(&mut self.view, View::Home) {
            View::Workspace(ws) => {
                tracing::info!(task_id = %ws.task.id, "leaving workspace");
                // Dropping the handle cancels the timer.
                let Workspace { task, progress } = ws;
                drop(progress);
                Some(task)
            }
            View::Home => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
