//! Synth command handler
//!
//! Writes `stacks/<name>/cdk.tf.json` and updates `manifest.json` in the
//! output directory, or prints the document with `--stdout`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use funcstack::config::Config;
use funcstack::infrastructure::LocalFs;
use funcstack::synth::{Manifest, MANIFEST_FILE};

use crate::cli::InputArgs;
use crate::commands::pipeline;
use crate::ui::json::emit_event;
use crate::ui::json::events::{CompleteEvent, StartEvent, WrittenEvent};
use crate::ui::output::success_line;
use crate::ui::UiContext;

const COMMAND: &str = "synth";

pub fn cmd_synth(
    ui: &UiContext,
    mut config: Config,
    inputs: &InputArgs,
    out: Option<PathBuf>,
    stdout: bool,
) -> Result<()> {
    pipeline::apply_overrides(&mut config, inputs, out);

    if ui.json && !stdout {
        emit_event(&StartEvent::new(COMMAND))?;
    }

    let composed = pipeline::compose(ui, COMMAND, &config, inputs)?;
    let synthesis = pipeline::render(&config, &composed)?;

    if stdout {
        let mut out = std::io::stdout().lock();
        out.write_all(synthesis.text.as_bytes())?;
        return Ok(());
    }

    let fs = LocalFs::new();
    let stack_file = config.stack_file();
    fs.write_atomic(&stack_file, &synthesis.text)
        .with_context(|| format!("writing {}", stack_file.display()))?;

    let manifest_file = config.stack.out_dir.join(MANIFEST_FILE);
    let mut manifest = match fs.read_optional(&manifest_file)? {
        Some(existing) => serde_json::from_str(&existing).unwrap_or_else(|e| {
            tracing::warn!(file = %manifest_file.display(), error = %e, "replacing unreadable manifest");
            Manifest::default()
        }),
        None => Manifest::default(),
    };
    manifest.record(synthesis.manifest_entry(&config.stack.name));
    let mut manifest_text = serde_json::to_string_pretty(&manifest)?;
    manifest_text.push('\n');
    fs.write_atomic(&manifest_file, &manifest_text)
        .with_context(|| format!("writing {}", manifest_file.display()))?;

    tracing::info!(
        stack = %config.stack.name,
        declarations = synthesis.declarations,
        hash = %synthesis.hash,
        "stack synthesized"
    );

    if ui.json {
        emit_event(
            &WrittenEvent::new(COMMAND, stack_file.display().to_string())
                .with_hash(synthesis.hash.to_string()),
        )?;
        emit_event(&WrittenEvent::new(COMMAND, manifest_file.display().to_string()))?;
        emit_event(&CompleteEvent::success(COMMAND))?;
        return Ok(());
    }

    println!(
        "{}",
        success_line(
            ui,
            &format!(
                "Synthesized {} declarations into {}",
                synthesis.declarations,
                stack_file.display()
            )
        )
    );
    Ok(())
}
