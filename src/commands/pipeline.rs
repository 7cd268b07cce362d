//! Shared compose pipeline
//!
//! inputs -> bound parameters -> declaration graph -> rendered document

use std::path::PathBuf;

use anyhow::Result;

use funcstack::config::Config;
use funcstack::infrastructure::InputSources;
use funcstack::stack::{ComposedStack, ProjectStack};
use funcstack::synth::{self, SynthSettings, Synthesis};

use crate::cli::InputArgs;
use crate::ui::output::print_input_warnings;
use crate::ui::UiContext;

/// Apply per-command flags on top of the resolved config
pub fn apply_overrides(config: &mut Config, inputs: &InputArgs, out: Option<PathBuf>) {
    if let Some(stack) = &inputs.stack {
        config.stack.name = stack.clone();
    }
    if let Some(out) = out {
        config.stack.out_dir = out;
    }
}

/// Gather every input source and compose the stack
pub fn compose(
    ui: &UiContext,
    command: &str,
    config: &Config,
    inputs: &InputArgs,
) -> Result<ComposedStack> {
    let parameters = ProjectStack::parameters();
    let files = config
        .vars
        .files
        .iter()
        .chain(inputs.var_files.iter())
        .cloned();

    let values = InputSources::new()
        .with_process_env()
        .with_files(files)
        .with_assignments(inputs.vars.iter().cloned())
        .collect(&parameters)?;

    let composed = ProjectStack::new(config.repository.settings()).compose(&values)?;
    print_input_warnings(ui, command, &composed.warnings)?;
    Ok(composed)
}

/// Provider and backend settings for one synthesis
pub fn synth_settings(config: &Config, composed: &ComposedStack) -> Result<SynthSettings> {
    let parameters = &composed.parameters;
    Ok(SynthSettings::new(
        config.stack.name.as_str(),
        parameters.string("project_id")?,
        parameters.string("region")?,
    )
    .with_github_owner(config.repository.owner.as_str())
    .with_providers(config.providers.google(), config.providers.github())
    .with_backend(config.backend.clone()))
}

pub fn render(config: &Config, composed: &ComposedStack) -> Result<Synthesis> {
    let settings = synth_settings(config, composed)?;
    Ok(synth::render(&composed.graph, &settings, config.stack.pretty)?)
}
