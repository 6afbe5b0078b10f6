pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{Config, OutputFormat};
use crate::node::Mode;

#[derive(Parser)]
#[command(name = "feedloom")]
#[command(about = "Normalize RSS/Atom feeds into one model", long_about = None)]
pub struct Cli {
    /// How scalar values are read: strict or coerce
    #[arg(short, long, value_enum, global = true)]
    pub mode: Option<ModeArg>,

    /// Number of parallel workers for batch normalization
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Command-line spelling of [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Only values that already have the target type are accepted
    Strict,
    /// Numbers and booleans become strings, numeric strings become numbers
    Coerce,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Strict => Mode::Strict,
            ModeArg::Coerce => Mode::Coerce,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the detected format of a document
    Detect {
        /// Path to the feed document
        path: PathBuf,
    },
    /// Normalize a document and print it as JSON
    Parse {
        /// Path to the feed document
        path: PathBuf,

        /// Output representation
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Normalize many documents concurrently and summarize them
    Batch {
        /// Paths to the feed documents
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

impl Cli {
    /// Command-line flags take precedence over the config file.
    pub fn apply(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.parse.mode = mode.into();
        }
        if let Some(workers) = self.workers {
            config.batch.workers = workers;
        }
        if self.compact {
            config.output.pretty = false;
        }
        if let Commands::Parse {
            format: Some(format),
            ..
        } = &self.command
        {
            config.output.format = *format;
        }
    }
}
