use crate::output::print_json_line;
use crate::render;
use anyhow::Context;
use clap::Args;
use director_core::collector::TaskInput;
use director_core::config::Config;
use director_core::file::FileHandle;
use director_core::surface::Surface;
use director_core::task::Task;
use director_core::timeline::Progress;
use director_core::view::Coordinator;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct RunArgs {
    /// What the operator should do
    #[arg(required = true)]
    pub instruction: Vec<String>,

    /// Attach a file through the picker (repeatable)
    #[arg(long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Attach a file through the drop zone (repeatable)
    #[arg(long = "drop", value_name = "PATH")]
    pub drops: Vec<PathBuf>,

    /// Override the delay between steps
    #[arg(long, value_name = "MS", env = "DIRECTOR_INTERVAL_MS")]
    pub interval_ms: Option<u64>,
}

pub fn run(root: &Path, args: RunArgs, json: bool) -> anyhow::Result<()> {
    let mut config = Config::load(root).context("failed to load config")?;
    if let Some(ms) = args.interval_ms {
        config.tick_interval_ms = ms;
    }
    config.ensure_valid()?;

    let mut input = TaskInput::new();
    input.set_instruction(args.instruction.join(" "));
    if !args.drops.is_empty() {
        input.drag_enter();
        input.drop_files(args.drops.iter().map(|p| FileHandle::from_path(p)));
    }
    input.pick_files(args.files.iter().map(|p| FileHandle::from_path(p)));

    let Some(task) = input.submit() else {
        return Ok(());
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(play(task, config, json))
}

async fn play(task: Task, config: Config, json: bool) -> anyhow::Result<()> {
    let mut coord = Coordinator::new(config);
    coord.run_task(task).context("failed to start the progress timer")?;

    let (task, mut rx) = {
        let ws = coord.workspace().context("workspace not active")?;
        (ws.task().clone(), ws.progress().subscribe())
    };

    let initial = rx.borrow_and_update().clone();
    emit(&task, &initial, coord.config(), json)?;
    let mut last_emitted = initial.index();

    loop {
        tokio::select! {
            changed = rx.changed() => {
                // The watch only holds the latest value; fill in any
                // indices that advanced while the previous frame printed.
                let progress = rx.borrow_and_update().clone();
                for frame in progress.replay_after(last_emitted) {
                    emit(&task, &frame, coord.config(), json)?;
                }
                last_emitted = last_emitted.max(progress.index());
                if changed.is_err() || progress.is_complete() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!(task_id = %task.id, "interrupted, stopping run");
                break;
            }
        }
    }

    coord.back_home();
    Ok(())
}

fn emit(task: &Task, progress: &Progress, config: &Config, json: bool) -> anyhow::Result<()> {
    let surface = Surface::compose(task, progress, config);
    if json {
        print_json_line(&surface)?;
    } else {
        if progress.index() > 0 {
            println!();
        }
        println!("{}", render::frame(&surface));
    }
    Ok(())
}
