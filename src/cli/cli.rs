use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Builds a file tree from paths and prints it.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Files to insert, relative to the tree root (e.g. `src/lib/a.ts`)
    pub paths: Vec<String>,
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// YAML file with the tree settings
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    /// Path of the node to select
    #[clap(long, short)]
    pub select: Option<String>,
    /// Path of the file to open
    #[clap(long, short)]
    pub open: Option<String>,
    /// Path of the file to focus
    #[clap(long, short)]
    pub focus: Option<String>,

    /// Print without colors even when the terminal supports them
    #[clap(long)]
    pub no_color: bool,
}
