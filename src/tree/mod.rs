//! The mutable file/folder tree.
//!
//! Nodes live in a [`NodeArena`] and are addressed by [`NodeId`] (or the
//! typed [`FileId`] and [`FolderId`]). Every mutation goes through
//! [`FileTree`], which keeps the structural invariants, the per-root
//! singleton flags and the expansion cascade, and reports what changed to
//! the listeners of each affected node.

mod arena;
mod children;
pub(crate) mod error;
mod file_tree;
pub(crate) mod node;
mod node_id;
pub(crate) mod singletons;
mod state;
mod structure;
#[cfg(test)]
pub(crate) mod testing;

pub use arena::NodeArena;
pub use children::{Children, Removal, SortEntry, compare_names};
pub use error::TreeError;
pub use file_tree::FileTree;
pub use node::{FileData, FolderData, Node, NodeData, NodeKind};
pub use node_id::{FileId, FolderId, NodeId};
