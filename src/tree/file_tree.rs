use std::mem;

use snafu::prelude::*;
use tracing::trace;

use crate::changes::propagation::{self, Delivery};
use crate::changes::{Change, ChangeFilter, ChangeKind, SubscriptionId};
use crate::config::TreeConfig;
use crate::tree::error::{NotAFolderSnafu, UnknownNodeSnafu};
use crate::tree::node::Slot;
use crate::tree::singletons::SingletonIndex;
use crate::tree::{Children, FileData, FileId, FolderId, Node, NodeArena, NodeId, TreeError};

/// An observable file/folder tree anchored at a distinguished root folder.
///
/// Every mutation goes through `&mut FileTree`: it validates, applies the
/// change together with its cross-tree effects (singleton flags, expansion
/// cascade), then delivers the resulting changes to listeners before
/// returning. Listeners see the tree with the whole mutation applied.
///
/// Nodes created with [`create_file`](Self::create_file) or
/// [`create_folder`](Self::create_folder) start detached; they join the tree
/// once given a parent.
#[derive(Debug)]
pub struct FileTree {
    pub(crate) nodes: NodeArena,
    pub(crate) root: FolderId,
    pub(crate) config: TreeConfig,
    pub(crate) singletons: SingletonIndex,
    pending: Vec<Delivery>,
    next_subscription: u64,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTree {
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// The root starts out selected, as the default selection of the tree.
    pub fn with_config(config: TreeConfig) -> Self {
        let mut nodes = NodeArena::default();
        let root = nodes.insert_folder(config.root_name.clone());
        let mut singletons = SingletonIndex::default();
        if let Some(node) = nodes.get_mut(root) {
            node.selected = true;
            singletons.set(root, Slot::Selected, root.node());
        }
        Self {
            nodes,
            root,
            config,
            singletons,
            pending: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// The distinguished root folder.
    pub fn root(&self) -> FolderId {
        self.root
    }

    /// Raw access to node storage and its traversals.
    pub fn nodes(&self) -> &NodeArena {
        &self.nodes
    }

    pub fn node(&self, id: impl Into<NodeId>) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: impl Into<NodeId>) -> bool {
        self.nodes.contains(id)
    }

    pub fn as_file(&self, id: NodeId) -> Option<FileId> {
        self.nodes
            .get(id)
            .filter(|node| node.is_file())
            .map(|_| FileId::new(id))
    }

    pub fn as_folder(&self, id: NodeId) -> Option<FolderId> {
        self.nodes
            .get(id)
            .filter(|node| node.is_folder())
            .map(|_| FolderId::new(id))
    }

    pub(crate) fn existing(&self, id: impl Into<NodeId>) -> Result<&Node, TreeError> {
        let id = id.into();
        self.nodes.get(id).context(UnknownNodeSnafu { id })
    }

    pub fn name(&self, id: impl Into<NodeId>) -> Result<&str, TreeError> {
        self.existing(id).map(Node::name)
    }

    pub fn parent(&self, id: impl Into<NodeId>) -> Result<Option<FolderId>, TreeError> {
        self.existing(id).map(Node::parent)
    }

    /// `""` for the root, `parent path + name` otherwise; folder paths end
    /// with the configured separator.
    pub fn path(&self, id: impl Into<NodeId>) -> Result<String, TreeError> {
        let id = id.into();
        self.existing(id)?;
        Ok(self.nodes.path(id, self.root, &self.config.separator))
    }

    /// Parent first, up to the topmost folder.
    pub fn ancestors(&self, id: impl Into<NodeId>) -> Result<Vec<FolderId>, TreeError> {
        let id = id.into();
        self.existing(id)?;
        Ok(self.nodes.ancestors(id))
    }

    /// Topmost folder reached through parents. A detached folder is its own
    /// root; a detached file has none.
    pub fn root_of(&self, id: impl Into<NodeId>) -> Result<Option<FolderId>, TreeError> {
        let id = id.into();
        self.existing(id)?;
        Ok(self.nodes.root_of(id))
    }

    pub fn children(&self, folder: FolderId) -> Result<&Children, TreeError> {
        self.existing(folder)?;
        self.nodes
            .children(folder)
            .context(UnknownNodeSnafu { id: folder.node() })
    }

    /// All nodes below `folder`, parents before their children. Computed on
    /// every call.
    pub fn descendants(&self, folder: FolderId) -> Result<Vec<NodeId>, TreeError> {
        self.existing(folder)?;
        Ok(self.nodes.descendants(folder))
    }

    /// `folder` followed by its descendants.
    pub fn lineage(&self, folder: FolderId) -> Result<Vec<NodeId>, TreeError> {
        self.existing(folder)?;
        Ok(self.nodes.lineage(folder))
    }

    pub fn content(&self, file: FileId) -> Result<&str, TreeError> {
        Ok(self.file_data(file)?.content())
    }

    pub fn is_selected(&self, id: impl Into<NodeId>) -> Result<bool, TreeError> {
        self.existing(id).map(Node::is_selected)
    }

    pub fn is_opened(&self, file: FileId) -> Result<bool, TreeError> {
        Ok(self.file_data(file)?.is_opened())
    }

    pub fn is_focused(&self, file: FileId) -> Result<bool, TreeError> {
        Ok(self.file_data(file)?.is_focused())
    }

    pub fn is_expanded(&self, folder: FolderId) -> Result<bool, TreeError> {
        Ok(self
            .existing(folder)?
            .as_folder()
            .is_some_and(|data| data.is_expanded()))
    }

    fn file_data(&self, file: FileId) -> Result<&FileData, TreeError> {
        self.existing(file)?
            .as_file()
            .context(UnknownNodeSnafu { id: file.node() })
    }

    /// The selected node under `root`, if any.
    pub fn selected_in(&self, root: FolderId) -> Option<NodeId> {
        self.singletons.holder(root, Slot::Selected)
    }

    /// The opened file under `root`, if any.
    pub fn opened_in(&self, root: FolderId) -> Option<FileId> {
        self.singletons.holder(root, Slot::Opened).map(FileId::new)
    }

    /// The focused file under `root`, if any.
    pub fn focused_in(&self, root: FolderId) -> Option<FileId> {
        self.singletons.holder(root, Slot::Focused).map(FileId::new)
    }

    /// Resolves a separator-delimited path below the root. Folder paths may
    /// carry a trailing separator; `""` is the root itself.
    pub fn find_by_path(&self, path: &str) -> Result<Option<NodeId>, TreeError> {
        let separator = self.config.separator.as_str();
        let mut current = self.root.node();
        let mut walked: Vec<&str> = Vec::new();
        for segment in path.split(separator).filter(|segment| !segment.is_empty()) {
            if !self.nodes.is_folder(current) {
                return NotAFolderSnafu {
                    path: walked.join(separator),
                }
                .fail();
            }
            match self.child_named(current, segment) {
                Some(child) => current = child,
                None => return Ok(None),
            }
            walked.push(segment);
        }
        Ok(Some(current))
    }

    /// The child of `folder` carrying `name`, if any.
    pub(crate) fn child_named(&self, folder: impl Into<NodeId>, name: &str) -> Option<NodeId> {
        self.nodes.children(folder)?.iter().find(|&child| {
            self.nodes
                .get(child)
                .is_some_and(|node| node.name() == name)
        })
    }

    /// Attaches `listener` to the bus of `node`.
    pub fn subscribe(
        &mut self,
        node: impl Into<NodeId>,
        filter: ChangeFilter,
        listener: impl FnMut(&Change, &FileTree) + 'static,
    ) -> Result<SubscriptionId, TreeError> {
        let id = node.into();
        let seq = self.next_subscription;
        let bus = &mut self
            .nodes
            .get_mut(id)
            .context(UnknownNodeSnafu { id })?
            .changes;
        bus.subscribe(seq, filter, Box::new(listener));
        self.next_subscription += 1;
        Ok(SubscriptionId::new(id, seq))
    }

    /// Returns false when the subscription (or its node) no longer exists.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        self.nodes
            .get_mut(subscription.node())
            .is_some_and(|node| node.changes.unsubscribe(subscription.seq()))
    }

    /// Routes `kind` changing on `origin` and holds the deliveries until
    /// [`flush`](Self::flush).
    pub(crate) fn queue(&mut self, origin: NodeId, kind: ChangeKind) {
        let deliveries = propagation::route(&self.nodes, origin, kind);
        self.pending.extend(deliveries);
        if let Some(broadcast) = propagation::root_broadcast(&self.nodes, origin, kind) {
            self.pending.push(broadcast);
        }
    }

    /// Like [`queue`](Self::queue), but the change stops at `origin` and its
    /// ancestors.
    pub(crate) fn queue_upward(&mut self, origin: NodeId, kind: ChangeKind) {
        let deliveries = propagation::route_upward(&self.nodes, origin, kind);
        self.pending.extend(deliveries);
    }

    /// Delivers everything queued so far, in queue order.
    pub(crate) fn flush(&mut self) {
        let pending = mem::take(&mut self.pending);
        for delivery in pending {
            self.deliver(delivery);
        }
    }

    fn deliver(&mut self, Delivery { target, change }: Delivery) {
        let Some(node) = self.nodes.get_mut(target) else {
            return;
        };
        let mut bus = mem::take(&mut node.changes);
        let notified = bus.emit(&change, self);
        trace!("Delivered {change} from {} to {target} ({notified} listeners)", change.origin);
        if let Some(node) = self.nodes.get_mut(target) {
            node.changes = bus;
        }
    }
}
