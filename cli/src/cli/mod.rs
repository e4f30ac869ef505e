pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "devproxy")]
#[command(author, version, about = "Dev proxy CLI - redirect /dev/ requests to a frontend development server")]
pub struct Cli {
    /// Path to config file (checked in order: local config.toml, ~/.config/devproxy/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the proxy server
    Start {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Development server base URL (overrides config)
        #[arg(short, long, env = "DEV_SERVER_URL")]
        dev_server: Option<String>,
    },

    /// Show proxy status
    Status,

    /// Print the effective configuration as TOML
    Config,
}
