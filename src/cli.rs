//! CLI argument parsing for rdelta

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rdelta - Streaming rsync-style binary delta tool
#[derive(Parser, Debug)]
#[command(name = "rdelta")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the delta from a source file to a target file
    Diff(DiffArgs),

    /// Generate a signature sidecar (.rdsig) for a file
    Sign(SignArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Arguments for the diff command
#[derive(Parser, Debug)]
pub struct DiffArgs {
    /// Source file (the receiver's existing copy)
    pub source: PathBuf,

    /// Target file (the content to reconstruct)
    pub target: PathBuf,

    /// Block/window size in bytes
    #[arg(short = 'w', long, default_value_t = crate::config::DEFAULT_WINDOW_SIZE as u64, value_parser = clap::value_parser!(u64).range(1..))]
    pub window: u64,

    /// Emit the delta as JSON
    #[arg(long)]
    pub json: bool,

    /// Configuration file path
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
}

impl DiffArgs {
    /// Convert CLI args to Config, merging with file config
    pub fn to_config(&self) -> crate::config::Config {
        let mut config = if let Some(ref path) = self.config {
            crate::config::Config::load_from(path).unwrap_or_default()
        } else {
            crate::config::Config::load().unwrap_or_default()
        };

        // CLI args override config file
        config.window_size = crate::config::Config::validate_window_size(self.window as usize);
        if self.json {
            config.json = true;
        }

        config
    }
}

/// Arguments for the sign command
#[derive(Parser, Debug)]
pub struct SignArgs {
    /// File to generate a signature for
    pub file: PathBuf,

    /// Output signature file path (default: <file>.rdsig)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Block/window size in bytes
    #[arg(short = 'w', long, default_value_t = crate::config::DEFAULT_WINDOW_SIZE as u64, value_parser = clap::value_parser!(u64).range(1..))]
    pub window: u64,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show the configuration file path
    #[arg(long)]
    pub path: bool,

    /// Create default configuration file
    #[arg(long)]
    pub init: bool,
}
