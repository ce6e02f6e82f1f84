//! Plain-text rendering of a workspace `Surface`.

use director_core::surface::{BrowserPanel, FormField, StepRow, Surface, TaskCard, CURSOR_LABEL};
use director_core::types::StepStatus;

pub fn frame(surface: &Surface) -> String {
    let mut lines = Vec::new();
    task_card(&mut lines, &surface.task);
    lines.push(String::new());
    action_log(&mut lines, &surface.steps);
    lines.push(String::new());
    browser(&mut lines, &surface.browser);
    lines.join("\n")
}

fn task_card(lines: &mut Vec<String>, card: &TaskCard) {
    lines.push("== Current Task ==".to_string());
    lines.push(card.instruction.clone());
    if card.has_files() {
        lines.push(format!("Uploaded Files ({})", card.file_count));
        for chip in &card.shown_files {
            lines.push(format!("  {} ({})", chip.name, chip.category.as_str()));
        }
        if let Some(more) = card.overflow_label() {
            lines.push(format!("  {more}"));
        }
    }
}

fn action_log(lines: &mut Vec<String>, steps: &[StepRow]) {
    let done = steps
        .iter()
        .filter(|s| s.status == StepStatus::Completed)
        .count();
    lines.push(format!("== Action Log ({done}/{}) ==", steps.len()));
    for step in steps {
        let marker = match step.status {
            StepStatus::Completed => "[x]",
            StepStatus::Active => "[>]",
            StepStatus::Pending => "[ ]",
        };
        let cursor = if step.cursor { " _" } else { "" };
        lines.push(format!(
            "{marker} {:<8} {}  {}{cursor}",
            step.kind.as_str(),
            step.time,
            step.description
        ));
    }
}

fn browser(lines: &mut Vec<String>, panel: &BrowserPanel) {
    lines.push(format!("== {} ==", panel.url));
    lines.push(field(&panel.name));
    lines.push(field(&panel.email));
    let metrics: Vec<String> = panel
        .metrics
        .iter()
        .map(|m| format!("{}: {}%", m.label, m.percent))
        .collect();
    lines.push(metrics.join("  "));
    if panel.cursor_visible {
        lines.push(format!("-> {CURSOR_LABEL}"));
    }
}

fn field(f: &FormField) -> String {
    let glow = if f.glow { " *" } else { "" };
    format!("{:<6} [{}]{glow}", format!("{}:", f.label), f.value)
}
