//! Creating, moving, renaming and disposing nodes.

use std::collections::HashSet;

use snafu::prelude::*;
use tracing::debug;

use crate::changes::ChangeKind;
use crate::tree::error::{
    EmptyPathSnafu, NameConflictSnafu, NotAFolderSnafu, ReservedNameSnafu, RootDisposalSnafu,
    RootRenameSnafu, RootReparentSnafu, StructuralViolationSnafu,
};
use crate::tree::{FileId, FileTree, FolderId, NodeId, TreeError};

impl FileTree {
    /// Creates a detached file. An empty name is allowed, and so is the root
    /// name: a detached node is not part of the tree, and
    /// [`set_parent`](Self::set_parent) refuses to attach it under that name.
    pub fn create_file(&mut self, name: impl Into<String>) -> FileId {
        let id = self.nodes.insert_file(name.into());
        debug!("Created file {id}");
        id
    }

    /// Creates a detached folder. Names are checked on attach, as for
    /// [`create_file`](Self::create_file).
    pub fn create_folder(&mut self, name: impl Into<String>) -> FolderId {
        let id = self.nodes.insert_folder(name.into());
        debug!("Created folder {id}");
        id
    }

    /// Moves `node` under `parent`, or detaches it with `None`.
    ///
    /// The former parent and the new parent both report a `children` change,
    /// every new ancestor is expanded and the node reports a `parent` change.
    /// Selection, open and focus flags carried by the moved subtree stay set;
    /// if the destination tree already has a holder for one of them, the
    /// arriving node takes over and the previous holder is cleared.
    pub fn set_parent(
        &mut self,
        node: impl Into<NodeId>,
        parent: Option<FolderId>,
    ) -> Result<(), TreeError> {
        let result = self.reparent(node.into(), parent);
        self.flush();
        result
    }

    pub(crate) fn reparent(
        &mut self,
        id: NodeId,
        parent: Option<FolderId>,
    ) -> Result<(), TreeError> {
        self.existing(id)?;
        ensure!(self.root != id, RootReparentSnafu);
        if let Some(parent) = parent {
            self.existing(parent)?;
            ensure!(
                !self.nodes.is_within(parent, id),
                StructuralViolationSnafu { node: id, parent }
            );
            let name = self.existing(id)?.name();
            ensure!(
                name != self.config.root_name,
                ReservedNameSnafu { name }
            );
        }
        debug!("Moving {id} under {parent:?}");

        let lineage = self.nodes.lineage(id);
        if let Some(old_root) = self.nodes.root_of(id) {
            let moving: HashSet<NodeId> = lineage.iter().copied().collect();
            self.singletons
                .evict(old_root, |holder| moving.contains(&holder));
        }

        if let Some(old_parent) = self.nodes.detach(id) {
            self.queue(old_parent.node(), ChangeKind::Children);
        }
        if let Some(parent) = parent {
            self.nodes.attach(id, parent, self.config.sort_children);
            self.queue(parent.node(), ChangeKind::Children);
        }

        self.expand_ancestors(id);
        self.reconcile_singletons(id, &lineage);
        self.queue(id, ChangeKind::Parent);
        Ok(())
    }

    /// Renames `node`.
    ///
    /// A non-empty name must be unused among the node's siblings, otherwise
    /// the call fails with [`TreeError::NameConflict`] and nothing changes.
    /// The empty name collapses the node instead: every empty-named sibling
    /// and then the node itself are detached from the parent.
    pub fn set_name(
        &mut self,
        node: impl Into<NodeId>,
        name: impl Into<String>,
    ) -> Result<(), TreeError> {
        let result = self.rename(node.into(), name.into());
        self.flush();
        result
    }

    fn rename(&mut self, id: NodeId, name: String) -> Result<(), TreeError> {
        let node = self.existing(id)?;
        ensure!(self.root != id, RootRenameSnafu);
        ensure!(name != self.config.root_name, ReservedNameSnafu { name });
        let parent = node.parent();

        if name.is_empty() {
            return self.clear_name(id, parent);
        }
        if node.name() == name {
            return Ok(());
        }
        if let Some(parent) = parent {
            let taken = self
                .child_named(parent, &name)
                .is_some_and(|sibling| sibling != id);
            ensure!(!taken, NameConflictSnafu { name, parent });
        }

        debug!("Renaming {id} from '{}' to '{name}'", node.name());
        self.apply_name(id, name, parent);
        Ok(())
    }

    fn clear_name(&mut self, id: NodeId, parent: Option<FolderId>) -> Result<(), TreeError> {
        if let Some(parent) = parent {
            let unnamed = self
                .nodes
                .children(parent)
                .map(|children| {
                    children.map_where(
                        |child| {
                            child != id
                                && self.nodes.get(child).is_some_and(|n| n.name().is_empty())
                        },
                        |child| child,
                    )
                })
                .unwrap_or_default();
            for sibling in unnamed {
                debug!("Detaching unnamed sibling {sibling} of {id}");
                self.reparent(sibling, None)?;
            }
        }

        if !self.existing(id)?.name().is_empty() {
            self.apply_name(id, String::new(), parent);
        }
        if parent.is_some() {
            debug!("Detaching {id} after its name was cleared");
            self.reparent(id, None)?;
        }
        Ok(())
    }

    fn apply_name(&mut self, id: NodeId, name: String, parent: Option<FolderId>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.name = name;
        }
        if let Some(parent) = parent
            && self.config.sort_children
        {
            self.nodes.sort_children(parent);
        }
        self.queue(id, ChangeKind::Name);
        if let Some(parent) = parent {
            // Upward only: siblings do not hear a rename.
            self.queue_upward(parent.node(), ChangeKind::Children);
        }
    }

    /// Walks `path` from the root, creating missing folders, and attaches a
    /// file for the last segment. An existing file at that path is returned
    /// as is.
    pub fn insert_path(&mut self, path: &str) -> Result<FileId, TreeError> {
        let result = self.insert_path_inner(path);
        self.flush();
        result
    }

    fn insert_path_inner(&mut self, path: &str) -> Result<FileId, TreeError> {
        let separator = self.config.separator.clone();
        let segments: Vec<&str> = path
            .split(separator.as_str())
            .filter(|segment| !segment.is_empty())
            .collect();
        let Some((file_name, folders)) = segments.split_last() else {
            return EmptyPathSnafu.fail();
        };
        if let Some(&reserved) = segments
            .iter()
            .find(|&&segment| segment == self.config.root_name)
        {
            return ReservedNameSnafu { name: reserved }.fail();
        }

        let mut current = self.root;
        let mut walked: Vec<&str> = Vec::new();
        for &segment in folders {
            walked.push(segment);
            current = match self.child_named(current, segment) {
                Some(existing) => self.as_folder(existing).context(NotAFolderSnafu {
                    path: walked.join(separator.as_str()),
                })?,
                None => {
                    let folder = self.create_folder(segment);
                    self.reparent(folder.node(), Some(current))?;
                    folder
                }
            };
        }

        match self.child_named(current, file_name) {
            Some(existing) => self.as_file(existing).context(NameConflictSnafu {
                name: *file_name,
                parent: current,
            }),
            None => {
                let file = self.create_file(*file_name);
                self.reparent(file.node(), Some(current))?;
                Ok(file)
            }
        }
    }

    /// Detaches `node` and frees it together with everything below it.
    /// Listeners attached to the freed nodes are dropped.
    pub fn dispose(&mut self, node: impl Into<NodeId>) -> Result<(), TreeError> {
        let id = node.into();
        self.existing(id)?;
        ensure!(self.root != id, RootDisposalSnafu);

        let result = self.reparent(id, None);
        self.flush();
        result?;

        if let Some(folder) = self.as_folder(id) {
            self.singletons.forget_root(folder);
        }
        let lineage = self.nodes.lineage(id);
        for freed in &lineage {
            self.nodes.remove(*freed);
        }
        debug!("Disposed {id} and {} nodes below it", lineage.len() - 1);
        Ok(())
    }
}
