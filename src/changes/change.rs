use std::fmt;

use derive_more::Display;

use crate::tree::NodeId;

/// The attribute of a node that changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ChangeKind {
    #[display("name")]
    Name,
    #[display("parent")]
    Parent,
    #[display("children")]
    Children,
    #[display("selected")]
    Selected,
    #[display("expanded")]
    Expanded,
    #[display("opened")]
    Opened,
    #[display("focused")]
    Focused,
    #[display("content")]
    Content,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 8] = [
        ChangeKind::Name,
        ChangeKind::Parent,
        ChangeKind::Children,
        ChangeKind::Selected,
        ChangeKind::Expanded,
        ChangeKind::Opened,
        ChangeKind::Focused,
        ChangeKind::Content,
    ];

    /// Structural changes on a folder are also pushed down to its descendants.
    pub const fn is_structural(self) -> bool {
        matches!(
            self,
            ChangeKind::Name | ChangeKind::Parent | ChangeKind::Children | ChangeKind::Expanded
        )
    }
}

/// Where the receiving node sits relative to the node that changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Relation {
    /// The receiver is the node that changed.
    #[display("own")]
    Own,
    /// The receiver is the direct parent of the changed node.
    #[display("child")]
    Child,
    /// The receiver is a more distant ancestor of the changed node.
    #[display("descendant")]
    Descendant,
    /// The changed folder is the receiver's direct parent.
    #[display("parent")]
    Parent,
    /// The changed folder is a more distant ancestor of the receiver.
    #[display("ancestor")]
    Ancestor,
    /// Tree-wide broadcast of a file's open/focus change to its root.
    #[display("root")]
    Root,
}

/// A single delivered notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Change {
    pub kind: ChangeKind,
    pub relation: Relation,
    /// The node whose attribute changed.
    pub origin: NodeId,
}

impl Change {
    pub const fn new(kind: ChangeKind, relation: Relation, origin: NodeId) -> Self {
        Self {
            kind,
            relation,
            origin,
        }
    }
}

/// Renders as the hierarchical event name, e.g. `name` or `child:name`.
impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.relation {
            Relation::Own => write!(f, "{}", self.kind),
            relation => write!(f, "{}:{}", relation, self.kind),
        }
    }
}

/// Selects which changes a listener receives. `None` fields match anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChangeFilter {
    kind: Option<ChangeKind>,
    relation: Option<Relation>,
}

impl ChangeFilter {
    /// Matches every change delivered to the node.
    pub const fn any() -> Self {
        Self {
            kind: None,
            relation: None,
        }
    }

    /// Matches one kind under every relation.
    pub const fn kind(kind: ChangeKind) -> Self {
        Self {
            kind: Some(kind),
            relation: None,
        }
    }

    /// Matches one kind under one relation.
    pub const fn exact(kind: ChangeKind, relation: Relation) -> Self {
        Self {
            kind: Some(kind),
            relation: Some(relation),
        }
    }

    /// Matches changes of the node itself.
    pub const fn own(kind: ChangeKind) -> Self {
        Self::exact(kind, Relation::Own)
    }

    pub const fn with_relation(self, relation: Relation) -> Self {
        Self {
            kind: self.kind,
            relation: Some(relation),
        }
    }

    pub fn matches(&self, change: &Change) -> bool {
        self.kind.is_none_or(|kind| kind == change.kind)
            && self.relation.is_none_or(|relation| relation == change.relation)
    }
}
