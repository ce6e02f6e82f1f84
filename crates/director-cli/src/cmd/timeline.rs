use crate::output::{print_json, print_table};
use chrono::Local;
use clap::Args;
use director_core::surface::step_rows;
use director_core::timeline::{Progress, Timeline};

#[derive(Args)]
pub struct TimelineArgs {
    /// Number of attached files the timeline is built for
    #[arg(long, default_value = "0")]
    pub files: usize,

    /// Current step index to derive statuses from
    #[arg(long, default_value = "0")]
    pub index: usize,
}

pub fn run(args: TimelineArgs, json: bool) -> anyhow::Result<()> {
    let progress = Progress::at(Timeline::build(args.files, Local::now()), args.index);
    let rows = step_rows(&progress);

    if json {
        print_json(&serde_json::json!({
            "index": progress.index(),
            "complete": progress.is_complete(),
            "steps": rows,
        }))?;
        return Ok(());
    }

    println!("{}", progress.summarize());
    println!();

    let table: Vec<Vec<String>> = rows
        .into_iter()
        .map(|r| {
            vec![
                r.id,
                r.status.to_string(),
                r.kind.to_string(),
                r.time,
                r.description,
            ]
        })
        .collect();
    print_table(&["ID", "STATUS", "KIND", "TIME", "DESCRIPTION"], table);
    Ok(())
}
