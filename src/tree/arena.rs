//! Id-addressed node storage and the read-only traversals over it.

use std::mem;

use crate::tree::{Children, FileId, FolderId, Node, NodeId, Removal, SortEntry};

/// Owns every node of a tree. `parent` and `children` are ids into this
/// arena, so the parent/child cycle carries no ownership.
#[derive(Debug, Default)]
pub struct NodeArena {
    slots: Vec<Option<Node>>,
}

impl NodeArena {
    pub(crate) fn insert_file(&mut self, name: String) -> FileId {
        let id = self.next_id();
        self.slots.push(Some(Node::file(id, name)));
        FileId::new(id)
    }

    pub(crate) fn insert_folder(&mut self, name: String) -> FolderId {
        let id = self.next_id();
        self.slots.push(Some(Node::folder(id, name)));
        FolderId::new(id)
    }

    fn next_id(&self) -> NodeId {
        NodeId::new(self.slots.len())
    }

    pub fn get(&self, id: impl Into<NodeId>) -> Option<&Node> {
        self.slots.get(id.into().index()).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: impl Into<NodeId>) -> Option<&mut Node> {
        self.slots.get_mut(id.into().index()).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: impl Into<NodeId>) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.slots.iter().flatten()
    }

    pub fn parent(&self, id: impl Into<NodeId>) -> Option<FolderId> {
        self.get(id).and_then(Node::parent)
    }

    pub fn is_folder(&self, id: impl Into<NodeId>) -> bool {
        self.get(id).is_some_and(Node::is_folder)
    }

    pub fn children(&self, id: impl Into<NodeId>) -> Option<&Children> {
        self.get(id)
            .and_then(Node::as_folder)
            .map(|folder| folder.children())
    }

    /// Parent first, then up to the topmost folder.
    pub fn ancestors(&self, id: impl Into<NodeId>) -> Vec<FolderId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.parent(parent);
        }
        ancestors
    }

    /// Topmost folder above `id`. A detached folder is its own root, a
    /// detached file has none.
    pub fn root_of(&self, id: impl Into<NodeId>) -> Option<FolderId> {
        let id = id.into();
        match self.ancestors(id).last() {
            Some(&top) => Some(top),
            None if self.is_folder(id) => Some(FolderId::new(id)),
            None => None,
        }
    }

    /// Every node below `id` in pre-order (a parent before its children).
    pub fn descendants(&self, id: impl Into<NodeId>) -> Vec<NodeId> {
        let mut descendants = Vec::new();
        let mut stack: Vec<NodeId> = match self.children(id) {
            Some(children) => children.iter().rev().collect(),
            None => return descendants,
        };
        while let Some(current) = stack.pop() {
            descendants.push(current);
            if let Some(children) = self.children(current) {
                stack.extend(children.iter().rev());
            }
        }
        descendants
    }

    /// `id` followed by its descendants.
    pub fn lineage(&self, id: impl Into<NodeId>) -> Vec<NodeId> {
        let id = id.into();
        let mut lineage = vec![id];
        lineage.extend(self.descendants(id));
        lineage
    }

    /// True when `node` is `ancestor` or lies somewhere below it.
    pub fn is_within(&self, node: impl Into<NodeId>, ancestor: impl Into<NodeId>) -> bool {
        let (node, ancestor) = (node.into(), ancestor.into());
        node == ancestor || self.ancestors(node).iter().any(|&a| a == ancestor)
    }

    /// Derived path. Folders end with `separator`; the tree root contributes
    /// nothing.
    pub fn path(&self, id: impl Into<NodeId>, root: FolderId, separator: &str) -> String {
        let id = id.into();
        let Some(node) = self.get(id) else {
            return String::new();
        };
        if root == id {
            return String::new();
        }
        let mut path = node
            .parent()
            .map(|parent| self.path(parent, root, separator))
            .unwrap_or_default();
        path.push_str(node.name());
        if node.is_folder() {
            path.push_str(separator);
        }
        path
    }

    pub(crate) fn attach(&mut self, id: NodeId, parent: FolderId, sort: bool) {
        if let Some(folder) = self.get_mut(parent).and_then(Node::as_folder_mut) {
            folder.children.push(id);
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = Some(parent);
        }
        if sort {
            self.sort_children(parent);
        }
    }

    /// Unlinks `id` from its parent and returns the former parent.
    pub(crate) fn detach(&mut self, id: NodeId) -> Option<FolderId> {
        let parent = self.get_mut(id)?.parent.take()?;
        if let Some(folder) = self.get_mut(parent).and_then(Node::as_folder_mut) {
            folder.children.remove([Removal::Node(id)]);
        }
        Some(parent)
    }

    pub(crate) fn sort_children(&mut self, folder: FolderId) {
        let Some(data) = self.get_mut(folder).and_then(Node::as_folder_mut) else {
            return;
        };
        let mut children = mem::take(&mut data.children);
        children.sort(|child| {
            self.get(child).map(|node| SortEntry {
                kind: node.kind(),
                name: node.name(),
            })
        });
        if let Some(data) = self.get_mut(folder).and_then(Node::as_folder_mut) {
            data.children = children;
        }
    }

    /// Frees the slot of `id`. Links to and from it must already be cut.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.slots.get_mut(id.index()).and_then(Option::take)
    }
}
