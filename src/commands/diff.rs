//! Diff command handler
//!
//! Compares the document on disk with a fresh synthesis. A missing
//! document diffs as empty. Nothing is written.

use std::path::PathBuf;

use anyhow::Result;

use funcstack::config::Config;
use funcstack::infrastructure::LocalFs;
use funcstack::synth::stack_path;

use crate::cli::InputArgs;
use crate::commands::pipeline;
use crate::ui::diff::{diff_stats, render_unified_diff};
use crate::ui::json::emit_event;
use crate::ui::json::events::{CompleteEvent, DiffEvent, StartEvent};
use crate::ui::output::success_line;
use crate::ui::UiContext;

const COMMAND: &str = "diff";
const CONTEXT_LINES: usize = 3;

pub fn cmd_diff(
    ui: &UiContext,
    mut config: Config,
    inputs: &InputArgs,
    out: Option<PathBuf>,
) -> Result<()> {
    pipeline::apply_overrides(&mut config, inputs, out);

    if ui.json {
        emit_event(&StartEvent::new(COMMAND))?;
    }

    let composed = pipeline::compose(ui, COMMAND, &config, inputs)?;
    let synthesis = pipeline::render(&config, &composed)?;

    let stack_file = config.stack_file();
    let existing = LocalFs::new().read_optional(&stack_file)?;
    if existing.is_none() {
        tracing::info!(path = %stack_file.display(), "no existing document");
    }
    let old = existing.unwrap_or_default();
    let stats = diff_stats(&old, &synthesis.text);

    if ui.json {
        emit_event(&DiffEvent {
            event: "diff",
            command: COMMAND,
            path: stack_file.display().to_string(),
            changed: !stats.is_empty(),
            added: stats.added,
            removed: stats.removed,
        })?;
        emit_event(&CompleteEvent::success(COMMAND))?;
        return Ok(());
    }

    if stats.is_empty() {
        println!("{}", success_line(ui, "No changes"));
        return Ok(());
    }

    print!(
        "{}",
        render_unified_diff(
            &stack_path(&config.stack.name),
            &old,
            &synthesis.text,
            CONTEXT_LINES,
            ui.color,
        )
    );
    println!(
        "\n{} line(s) added, {} line(s) removed",
        stats.added, stats.removed
    );
    Ok(())
}
