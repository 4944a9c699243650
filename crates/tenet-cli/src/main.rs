//! # tenet
//!
//! Diagnostic binary for the rule engine: loads a rule catalog, a message and
//! context files, then reports which rules apply and the composed system
//! message.

#![deny(unsafe_code)]

mod explain;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tenet_core::logging::init_subscriber;
use tenet_settings::{TenetSettings, get_settings, init_settings, load_settings_from_path};

/// Rule applicability diagnostics.
#[derive(Parser, Debug)]
#[command(name = "tenet", about = "Explain which rules apply to a message")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate every rule and print the composed system message.
    Explain(ExplainArgs),
}

/// Arguments for `tenet explain`.
#[derive(Args, Debug)]
pub(crate) struct ExplainArgs {
    /// JSON file holding an array of rules.
    #[arg(long)]
    pub rules: PathBuf,

    /// File with the user message (`-` for stdin).
    #[arg(long)]
    pub message: Option<PathBuf>,

    /// File attached as context. Repeatable.
    #[arg(long = "context")]
    pub context: Vec<PathBuf>,

    /// Base system message.
    #[arg(long)]
    pub base: Option<String>,

    /// Settings file (defaults to `~/.tenet/settings.json`).
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Print `{ appliedRules, systemMessage }` as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Install the settings named on the command line as the global settings,
/// then return the global instance.
fn load_settings(path: Option<&PathBuf>) -> Result<&'static TenetSettings> {
    if let Some(path) = path {
        let settings = load_settings_from_path(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?;
        if init_settings(settings).is_err() {
            tracing::warn!(path = %path.display(), "settings already initialized, ignoring file");
        }
    }
    Ok(get_settings())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Explain(args) => {
            let settings = load_settings(args.settings.as_ref())?;
            init_subscriber(&settings.logging.level);
            tracing::debug!(rules = %args.rules.display(), "explaining rule catalog");

            let output = explain::run(&args, settings)?;
            println!("{output}");
        }
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
