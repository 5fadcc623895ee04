//! An observable file/folder tree with hierarchical change propagation.
//!
//! ```
//! use filetree::changes::ChangeFilter;
//! use filetree::tree::FileTree;
//!
//! let mut tree = FileTree::new();
//! let file = tree.insert_path("src/main.rs").unwrap();
//! tree.subscribe(tree.root(), ChangeFilter::any(), |change, _| {
//!     println!("{change}");
//! })
//! .unwrap();
//!
//! tree.select(file).unwrap();
//! assert_eq!(tree.path(file).unwrap(), "src/main.rs");
//! ```

pub mod changes;
pub mod config;
pub mod tree;

pub use changes::{Change, ChangeFilter, ChangeKind, Relation, SubscriptionId};
pub use config::TreeConfig;
pub use tree::{FileId, FileTree, FolderId, NodeId, TreeError};
