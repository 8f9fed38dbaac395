//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Graph Simplifier - Reduce dense sensor series for charting
#[derive(Parser, Debug)]
#[command(name = "graph-simp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simplify a sample recording
    Simplify {
        /// Input recording file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Epsilon to use instead of the stored preference
        #[arg(short, long)]
        epsilon: Option<f64>,

        /// Write the simplified recording here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect or change the stored epsilon preference
    Epsilon {
        #[command(subcommand)]
        action: EpsilonAction,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View or reset configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Epsilon preference subcommands
#[derive(Subcommand, Debug)]
pub enum EpsilonAction {
    /// Show the stored preference
    Show,

    /// Set the epsilon by hand (marks it manual)
    Set {
        /// Epsilon value, must be > 0
        value: f64,
    },

    /// Clear the manual override so the next estimate replaces it
    Clear,

    /// Estimate epsilon from a recording and store it
    Estimate {
        /// Input recording file (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "tolerance.auto_ratio")
        key: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
