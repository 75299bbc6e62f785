use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "Catalog Switch game dumps against a local titledb mirror")]
pub struct Cli {
    /// Config file, merged over the user configuration.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Increase verbosity (-v, -vv). Default WARN.
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Decrease verbosity (-q).
    #[arg(short = 'q', action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scan a library directory and summarize it by title
    Scan {
        /// Directory to scan; defaults to `library.path` from the configuration
        path: Option<PathBuf>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Identify individual files
    Identify {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show titledb metadata and version history for a title
    Info {
        title_id: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Clone or update the local titledb mirror
    Update,
}
