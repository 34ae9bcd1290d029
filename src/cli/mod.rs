//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for barque using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// barque - distributed backup control plane
#[derive(Parser, Debug)]
#[command(name = "barque")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to settings file
    #[arg(short, long, default_value = "barque.toml", env = "BARQUE_SETTINGS")]
    pub settings: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "BARQUE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect and change the deployment configuration
    Config(commands::config::ConfigArgs),
}
