use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use filetree::changes::ChangeFilter;
use filetree::config::{TreeConfig, TreeConfigError};
use filetree::tree::{FileId, FileTree, NodeId, TreeError};

use crate::application::{Renderer, RuntimeConfig};

pub struct Application;

impl Application {
    /// Builds the tree described by `runtime_config` and returns it rendered.
    pub fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<String, ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        let config = match &runtime_config.config {
            Some(path) => TreeConfig::from_path(path).context(ConfigSnafu)?,
            None => TreeConfig::default(),
        };
        debug!("Using tree config: {config:?}");

        let mut tree = FileTree::with_config(config);
        let root = tree.root();
        tree.subscribe(root, ChangeFilter::any(), |change, tree| {
            let path = tree.path(change.origin).unwrap_or_default();
            info!("{change} at '{path}'");
        })
        .context(MutationSnafu)?;

        for path in &runtime_config.paths {
            tree.insert_path(path)
                .context(InsertSnafu { path: path.as_str() })?;
        }

        if let Some(path) = &runtime_config.select {
            let node = resolve(&tree, path)?;
            tree.select(node).context(MutationSnafu)?;
        }
        if let Some(path) = &runtime_config.open {
            let file = resolve_file(&tree, path)?;
            tree.open(file).context(MutationSnafu)?;
        }
        if let Some(path) = &runtime_config.focus {
            let file = resolve_file(&tree, path)?;
            tree.focus(file).context(MutationSnafu)?;
        }

        Ok(Renderer::new(runtime_config.colors).render(&tree))
    }
}

fn resolve(tree: &FileTree, path: &str) -> Result<NodeId, ApplicationError> {
    tree.find_by_path(path)
        .context(LookupSnafu { path })?
        .context(PathNotFoundSnafu { path })
}

fn resolve_file(tree: &FileTree, path: &str) -> Result<FileId, ApplicationError> {
    let node = resolve(tree, path)?;
    tree.as_file(node).context(NotAFileSnafu { path })
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the tree config"))]
    ConfigError { source: TreeConfigError },
    #[snafu(display("Failed to insert '{}'", path))]
    InsertError { path: String, source: TreeError },
    #[snafu(display("Failed to look up '{}'", path))]
    LookupError { path: String, source: TreeError },
    #[snafu(display("Nothing exists at '{}'", path))]
    PathNotFoundError { path: String },
    #[snafu(display("'{}' is not a file", path))]
    NotAFileError { path: String },
    #[snafu(display("Failed to update the tree"))]
    MutationError { source: TreeError },
}
