pub mod init;
pub mod list;
pub mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "portfolio")]
#[command(version)]
#[command(about = "A dance portfolio gallery with a password-gated admin", long_about = None)]
pub struct Cli {
    #[arg(short, long, default_value = "portfolio.toml", env = "PORTFOLIO_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter config and create the data directories
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long)]
        name: Option<String>,
    },
    /// Run the web server
    Serve {
        #[arg(short = 'H', long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the media list
    List {
        /// Include archived items
        #[arg(long)]
        all: bool,
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
