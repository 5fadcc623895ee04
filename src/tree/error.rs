use snafu::Snafu;

use crate::tree::{FolderId, NodeId};

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum TreeError {
    #[snafu(display("A child named '{}' already exists in folder {}", name, parent))]
    NameConflict { name: String, parent: FolderId },
    #[snafu(display("Cannot move node {} into its own lineage at {}", node, parent))]
    StructuralViolation { node: NodeId, parent: FolderId },
    #[snafu(display("The root folder cannot be given a parent"))]
    RootReparent,
    #[snafu(display("The root folder cannot be renamed"))]
    RootRename,
    #[snafu(display("The root folder cannot be disposed"))]
    RootDisposal,
    #[snafu(display("The name '{}' is reserved for the root folder", name))]
    ReservedName { name: String },
    #[snafu(display("Node {} does not exist in this tree", id))]
    UnknownNode { id: NodeId },
    #[snafu(display("'{}' is a file, not a folder", path))]
    NotAFolder { path: String },
    #[snafu(display("Cannot insert an empty path"))]
    EmptyPath,
}
