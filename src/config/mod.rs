mod tree_config;

pub use tree_config::{DEFAULT_ROOT_NAME, DEFAULT_SEPARATOR, TreeConfig, TreeConfigError};
