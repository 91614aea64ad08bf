//! CLI command definitions and handlers

mod analyze;
mod suggest;
mod train;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use std::path::{Path, PathBuf};

/// Odeur - code smell detection with ML severity classification
#[derive(Parser, Debug)]
#[command(name = "odeur")]
#[command(
    version,
    about = "Detect structural code smells in Python source and classify their severity",
    long_about = "Odeur walks the syntax tree of a Python source file, flags structural \
code smells (long functions, long parameter lists, god classes), and assigns each \
finding a severity — from a trained logistic-regression model when one is available, \
or a deterministic rule table otherwise.\n\n\
An optional LLM-backed suggestion pass turns findings into refactoring advice \
(BYOK: keys are read from environment variables).",
    after_help = "\
Examples:
  odeur analyze app.py                     Analyze one source file
  odeur analyze app.py --format json       JSON output for scripting
  odeur train --builtin                    Train on the built-in sample set
  odeur train --data labels.jsonl          Train on your labeled findings
  odeur suggest app.py --backend anthropic AI advice for each finding"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an odeur.toml config file with the default thresholds
    Init,

    /// Analyze a Python source file for structural smells
    Analyze {
        /// Path to the source file
        file: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Classifier model file (default: the per-user data directory)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Skip severity classification and report rule severities only
        #[arg(long)]
        no_classify: bool,
    },

    /// Train the severity classifier and save the model
    Train {
        /// JSONL file of labeled findings (one JSON record per line)
        #[arg(long, conflicts_with = "builtin")]
        data: Option<PathBuf>,

        /// Use the built-in synthetic training set
        #[arg(long)]
        builtin: bool,

        /// Where to write the trained model
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Generate AI refactoring suggestions for each finding in a file
    Suggest {
        /// Path to the source file
        file: PathBuf,

        /// LLM backend: openai, anthropic, ollama
        #[arg(long, default_value = "openai", value_parser = ["openai", "anthropic", "ollama"])]
        backend: String,

        /// Classifier model file (default: the per-user data directory)
        #[arg(long)]
        model: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => init(),
        Commands::Analyze {
            file,
            format,
            model,
            no_classify,
        } => analyze::run(&file, &format, model.as_deref(), no_classify),
        Commands::Train {
            data,
            builtin,
            output,
        } => train::run(data.as_deref(), builtin, output.as_deref()),
        Commands::Suggest {
            file,
            backend,
            model,
        } => suggest::run(&file, &backend, model.as_deref()),
    }
}

fn init() -> Result<()> {
    let path = crate::config::write_default(Path::new("."))?;
    println!("{} wrote {}", style("✓").green(), path.display());
    Ok(())
}

/// Default location for the persisted model blob
pub(crate) fn default_model_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("odeur")
        .join("severity_model.json")
}
