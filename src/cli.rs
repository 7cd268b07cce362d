//! CLI Argument Parsing
//!
//! Global flags (--config, --json, --color, --verbose) are inherited by all
//! subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// funcstack - compose a scheduled Cloud Run function project into Terraform JSON
#[derive(Parser, Debug)]
#[command(name = "funcstack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./funcstack.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format for CI (NDJSON)
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where parameter values come from
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Vars file (.json, .toml, .yaml); repeatable, later files win
    #[arg(long = "var-file", value_name = "FILE")]
    pub var_files: Vec<PathBuf>,

    /// Single parameter value; repeatable, overrides vars files
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub vars: Vec<String>,

    /// Stack name (overrides config)
    #[arg(long)]
    pub stack: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose the stack and write Terraform JSON
    Synth {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output directory (overrides config)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Print the document to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
    },

    /// Show what synth would change in the existing document
    Diff {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output directory holding the existing document
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Print declarations in dependency order
    Graph {
        #[command(flatten)]
        inputs: InputArgs,
    },

    /// List the stack parameters
    Params,
}

impl Commands {
    /// Name used in `--json` events
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Synth { .. } => "synth",
            Commands::Diff { .. } => "diff",
            Commands::Graph { .. } => "graph",
            Commands::Params => "params",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_synth_with_inputs() {
        let cli = Cli::try_parse_from([
            "funcstack",
            "synth",
            "--var-file",
            "prod.json",
            "--var",
            "project_name=orders",
            "--var",
            "direction=finance",
            "--out",
            "build",
        ])
        .unwrap();

        match cli.command {
            Commands::Synth { inputs, out, stdout } => {
                assert_eq!(inputs.var_files, vec![PathBuf::from("prod.json")]);
                assert_eq!(inputs.vars.len(), 2);
                assert_eq!(out, Some(PathBuf::from("build")));
                assert!(!stdout);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["funcstack", "params", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Params));
        assert_eq!(cli.command.name(), "params");
    }

    #[test]
    fn color_flag_values() {
        let cli = Cli::try_parse_from(["funcstack", "--color", "never", "graph"]).unwrap();
        assert_eq!(cli.color, Some(ColorWhen::Never));
        assert!(Cli::try_parse_from(["funcstack", "--color", "rainbow", "graph"]).is_err());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["funcstack"]).is_err());
    }
}
