//! funcstack CLI
//!
//! Usage: funcstack <COMMAND>
//!
//! Commands:
//!   synth   Compose the stack and write Terraform JSON
//!   diff    Show what synth would change
//!   graph   Print declarations in dependency order
//!   params  List the stack parameters

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use funcstack::config::{Config, Verbosity};

use crate::cli::{Cli, ColorWhen, Commands};
use crate::ui::json::emit_event;
use crate::ui::json::events::ErrorEvent;
use crate::ui::output::{error_line, print_config_warnings};
use crate::ui::terminal::detect_capabilities;
use crate::ui::UiContext;

/// Overrides the verbosity-derived filter when set
const LOG_ENV: &str = "FUNCSTACK_LOG";

fn main() {
    let cli = Cli::parse();
    let json = cli.json;
    let color = cli.color;
    let command = cli.command.name();

    if let Err(err) = run(cli) {
        let message = format!("{err:#}");
        if json {
            let _ = emit_event(&ErrorEvent::new(command, message));
        } else {
            let color = match color {
                Some(ColorWhen::Always) => true,
                Some(ColorWhen::Never) => false,
                Some(ColorWhen::Auto) | None => detect_capabilities().supports_color,
            };
            eprintln!("{}", error_line(color, &message));
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let loaded = Config::resolve(cli.config.as_deref(), &cwd)?;
    let config = loaded.config;

    init_tracing(config.output.verbosity.raised_by(cli.verbose));
    if let Some(source) = &loaded.source {
        tracing::debug!(config = %source.display(), "configuration loaded");
    }

    let ui = UiContext::new(cli.json, cli.color, &config);
    let command = cli.command.name();
    print_config_warnings(&ui, command, &loaded.warnings)?;

    match cli.command {
        Commands::Synth { inputs, out, stdout } => {
            commands::synth::cmd_synth(&ui, config, &inputs, out, stdout)
        }
        Commands::Diff { inputs, out } => commands::diff::cmd_diff(&ui, config, &inputs, out),
        Commands::Graph { inputs } => commands::graph::cmd_graph(&ui, config, &inputs),
        Commands::Params => commands::params::cmd_params(&ui),
    }
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
