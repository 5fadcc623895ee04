use derive_more::{Display, Into};

/// Stable handle of a node inside a [`FileTree`](crate::tree::FileTree) arena.
///
/// Ids are never reused, so a handle to a disposed node stays invalid instead
/// of silently aliasing a newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("#{_0}")]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const fn new(index: usize) -> Self {
        NodeId(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

/// A [`NodeId`] known to point at a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Into)]
#[display("{_0}")]
pub struct FileId(NodeId);

impl FileId {
    pub(crate) const fn new(id: NodeId) -> Self {
        FileId(id)
    }

    pub const fn node(self) -> NodeId {
        self.0
    }
}

/// A [`NodeId`] known to point at a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Into)]
#[display("{_0}")]
pub struct FolderId(NodeId);

impl FolderId {
    pub(crate) const fn new(id: NodeId) -> Self {
        FolderId(id)
    }

    pub const fn node(self) -> NodeId {
        self.0
    }
}

impl PartialEq<NodeId> for FolderId {
    fn eq(&self, other: &NodeId) -> bool {
        self.0 == *other
    }
}

impl PartialEq<NodeId> for FileId {
    fn eq(&self, other: &NodeId) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_ids_convert_into_node_id() {
        let raw = NodeId::new(3);
        let file = FileId::new(raw);
        let folder = FolderId::new(NodeId::new(4));

        assert_eq!(NodeId::from(file), raw);
        assert_eq!(NodeId::from(folder).index(), 4);
        assert_eq!(file, raw);
        assert_eq!(folder.node(), NodeId::new(4));
    }

    #[test]
    fn test_display() {
        assert_eq!(NodeId::new(7).to_string(), "#7");
        assert_eq!(FileId::new(NodeId::new(7)).to_string(), "#7");
        assert_eq!(FolderId::new(NodeId::new(0)).to_string(), "#0");
    }
}
