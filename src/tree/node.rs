use derive_more::Display;

use crate::changes::{ChangeBus, ChangeKind};
use crate::tree::{Children, FolderId, NodeId};

/// Discriminates the two node variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NodeKind {
    #[display("file")]
    File,
    #[display("folder")]
    Folder,
}

/// Tree-wide singleton flags. Each one is held by at most one node per root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub(crate) enum Slot {
    #[display("selected")]
    Selected,
    #[display("opened")]
    Opened,
    #[display("focused")]
    Focused,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Selected, Slot::Opened, Slot::Focused];

    pub const fn change_kind(self) -> ChangeKind {
        match self {
            Slot::Selected => ChangeKind::Selected,
            Slot::Opened => ChangeKind::Opened,
            Slot::Focused => ChangeKind::Focused,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileData {
    pub(crate) content: String,
    pub(crate) opened: bool,
    pub(crate) focused: bool,
}

impl FileData {
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderData {
    pub(crate) children: Children,
    pub(crate) expanded: bool,
}

impl FolderData {
    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }
}

/// Variant-specific part of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    File(FileData),
    Folder(FolderData),
}

/// A file or folder stored in the tree arena.
#[derive(Debug)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) parent: Option<FolderId>,
    pub(crate) selected: bool,
    pub(crate) data: NodeData,
    pub(crate) changes: ChangeBus,
}

impl Node {
    pub(crate) fn file(id: NodeId, name: String) -> Self {
        Self::new(id, name, NodeData::File(FileData::default()))
    }

    pub(crate) fn folder(id: NodeId, name: String) -> Self {
        Self::new(id, name, NodeData::Folder(FolderData::default()))
    }

    fn new(id: NodeId, name: String, data: NodeData) -> Self {
        Self {
            id,
            name,
            parent: None,
            selected: false,
            data,
            changes: ChangeBus::default(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<FolderId> {
        self.parent
    }

    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::File(_) => NodeKind::File,
            NodeData::Folder(_) => NodeKind::Folder,
        }
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_file(&self) -> bool {
        matches!(self.data, NodeData::File(_))
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.data, NodeData::Folder(_))
    }

    pub fn as_file(&self) -> Option<&FileData> {
        match &self.data {
            NodeData::File(file) => Some(file),
            NodeData::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&FolderData> {
        match &self.data {
            NodeData::Folder(folder) => Some(folder),
            NodeData::File(_) => None,
        }
    }

    pub(crate) fn as_file_mut(&mut self) -> Option<&mut FileData> {
        match &mut self.data {
            NodeData::File(file) => Some(file),
            NodeData::Folder(_) => None,
        }
    }

    pub(crate) fn as_folder_mut(&mut self) -> Option<&mut FolderData> {
        match &mut self.data {
            NodeData::Folder(folder) => Some(folder),
            NodeData::File(_) => None,
        }
    }

    /// Listeners attached to this node. Empty while the node's own listeners
    /// are running.
    pub fn changes(&self) -> &ChangeBus {
        &self.changes
    }

    pub(crate) fn flag(&self, slot: Slot) -> bool {
        match (slot, &self.data) {
            (Slot::Selected, _) => self.selected,
            (Slot::Opened, NodeData::File(file)) => file.opened,
            (Slot::Focused, NodeData::File(file)) => file.focused,
            (Slot::Opened | Slot::Focused, NodeData::Folder(_)) => false,
        }
    }

    /// Returns false when the slot does not exist on this variant.
    pub(crate) fn set_flag(&mut self, slot: Slot, value: bool) -> bool {
        match (slot, &mut self.data) {
            (Slot::Selected, _) => self.selected = value,
            (Slot::Opened, NodeData::File(file)) => file.opened = value,
            (Slot::Focused, NodeData::File(file)) => file.focused = value,
            (Slot::Opened | Slot::Focused, NodeData::Folder(_)) => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_nodes_are_detached_and_cleared() {
        let file = Node::file(NodeId::new(1), "a.ts".into());
        assert_eq!(file.kind(), NodeKind::File);
        assert_eq!(file.name(), "a.ts");
        assert!(file.parent().is_none());
        assert!(!file.is_selected());
        let data = file.as_file().unwrap();
        assert_eq!(data.content(), "");
        assert!(!data.is_opened());
        assert!(!data.is_focused());

        let folder = Node::folder(NodeId::new(2), String::new());
        assert!(folder.is_folder());
        assert!(folder.as_file().is_none());
        assert!(folder.as_folder().unwrap().children().is_empty());
        assert!(!folder.as_folder().unwrap().is_expanded());
    }

    #[test]
    fn test_flags() {
        let mut file = Node::file(NodeId::new(1), "a.ts".into());
        assert!(file.set_flag(Slot::Opened, true));
        assert!(file.flag(Slot::Opened));
        assert!(!file.flag(Slot::Focused));

        let mut folder = Node::folder(NodeId::new(2), "src".into());
        assert!(!folder.set_flag(Slot::Focused, true));
        assert!(!folder.flag(Slot::Focused));
        assert!(folder.set_flag(Slot::Selected, true));
        assert!(folder.is_selected());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NodeKind::File.to_string(), "file");
        assert_eq!(NodeKind::Folder.to_string(), "folder");
    }
}
