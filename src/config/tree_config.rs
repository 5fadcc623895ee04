use std::fs;
use std::path::Path;

use saphyr::{LoadableYamlNode, Yaml};
use snafu::prelude::*;
use tracing::debug;

/// Name carried by the distinguished root folder unless configured otherwise.
pub const DEFAULT_ROOT_NAME: &str = "::root::";
pub const DEFAULT_SEPARATOR: &str = "/";

/// Tunables of a [`FileTree`](crate::tree::FileTree).
///
/// ```yaml
/// root_name: "::root::"
/// separator: "/"
/// sort_children: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    /// Reserved name of the root folder. No other node may take it.
    pub root_name: String,
    /// Appended to folder paths and used to split paths on insert/lookup.
    pub separator: String,
    /// Keep children in display order after every attach and rename.
    pub sort_children: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            sort_children: true,
        }
    }
}

impl TreeConfig {
    pub fn from_path(path: &Path) -> Result<Self, TreeConfigError> {
        debug!("Reading tree config from {}", path.display());
        let contents = fs::read_to_string(path).context(ReadSnafu {
            file_path: path.display().to_string(),
        })?;
        debug!("Read tree config: {} bytes", contents.len());
        contents.as_str().try_into()
    }

    fn apply_entry(&mut self, key: &str, value: &Yaml) -> Result<(), TreeConfigError> {
        match key {
            "root_name" => {
                let name = value.as_str().context(InvalidValueSnafu {
                    key,
                    expected: "a string",
                })?;
                ensure!(!name.is_empty(), EmptyRootNameSnafu);
                self.root_name = name.to_string();
            }
            "separator" => {
                let separator = value.as_str().context(InvalidValueSnafu {
                    key,
                    expected: "a string",
                })?;
                ensure!(!separator.is_empty(), EmptySeparatorSnafu);
                self.separator = separator.to_string();
            }
            "sort_children" => {
                self.sort_children = value.as_bool().context(InvalidValueSnafu {
                    key,
                    expected: "a boolean",
                })?;
            }
            other => debug!("Skipping unknown tree config key: {other}"),
        }
        Ok(())
    }
}

impl TryFrom<&str> for TreeConfig {
    type Error = TreeConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedConfigSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let mut config = TreeConfig::default();
        for (key, value) in top_level {
            match key.as_str() {
                Some(key) => config.apply_entry(key, value)?,
                None => debug!("Skipping non-string tree config key: {key:?}"),
            }
        }
        debug!("Loaded tree config: {config:?}");
        Ok(config)
    }
}

#[derive(Debug, Snafu)]
pub enum TreeConfigError {
    #[snafu(display("Failed to read the tree config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the tree config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted tree config file"))]
    MalformedConfig,
    #[snafu(display("Top level of the tree config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Tree config key '{}' should be {}", key, expected))]
    InvalidValue { key: String, expected: String },
    #[snafu(display("The path separator cannot be empty"))]
    EmptySeparator,
    #[snafu(display("The root name cannot be empty"))]
    EmptyRootName,
}
