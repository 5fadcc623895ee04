use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub paths: Vec<String>,
    pub config: Option<PathBuf>,
    pub select: Option<String>,
    pub open: Option<String>,
    pub focus: Option<String>,
    pub colors: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            paths: cli.paths,
            config: cli.config,
            select: cli.select,
            open: cli.open,
            focus: cli.focus,
            colors: !cli.no_color
                && supports_color::on(supports_color::Stream::Stdout).is_some(),
        }
    }
}
