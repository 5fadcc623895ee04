use std::collections::HashMap;

use crate::tree::node::Slot;
use crate::tree::{FolderId, NodeId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Holders {
    selected: Option<NodeId>,
    opened: Option<NodeId>,
    focused: Option<NodeId>,
}

impl Holders {
    fn get(&self, slot: Slot) -> Option<NodeId> {
        match slot {
            Slot::Selected => self.selected,
            Slot::Opened => self.opened,
            Slot::Focused => self.focused,
        }
    }

    fn get_mut(&mut self, slot: Slot) -> &mut Option<NodeId> {
        match slot {
            Slot::Selected => &mut self.selected,
            Slot::Opened => &mut self.opened,
            Slot::Focused => &mut self.focused,
        }
    }

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Per-root record of which node holds each singleton flag, so enforcing
/// "one per root" never needs a scan of the root's lineage.
#[derive(Debug, Default)]
pub(crate) struct SingletonIndex {
    roots: HashMap<FolderId, Holders>,
}

impl SingletonIndex {
    pub fn holder(&self, root: FolderId, slot: Slot) -> Option<NodeId> {
        self.roots.get(&root).and_then(|holders| holders.get(slot))
    }

    pub fn set(&mut self, root: FolderId, slot: Slot, id: NodeId) {
        *self.roots.entry(root).or_default().get_mut(slot) = Some(id);
    }

    /// Forgets `id` as holder of `slot` under `root`, if it is the holder.
    pub fn release(&mut self, root: FolderId, slot: Slot, id: NodeId) {
        if let Some(holders) = self.roots.get_mut(&root) {
            let holder = holders.get_mut(slot);
            if *holder == Some(id) {
                *holder = None;
            }
            if holders.is_empty() {
                self.roots.remove(&root);
            }
        }
    }

    /// Drops every holder under `root` that `inside` accepts, returning them.
    pub fn evict(
        &mut self,
        root: FolderId,
        inside: impl Fn(NodeId) -> bool,
    ) -> Vec<(Slot, NodeId)> {
        let mut evicted = Vec::new();
        for slot in Slot::ALL {
            if let Some(id) = self.holder(root, slot).filter(|&id| inside(id)) {
                self.release(root, slot, id);
                evicted.push((slot, id));
            }
        }
        evicted
    }

    /// Removes the whole record of a folder that stopped being a root.
    pub fn forget_root(&mut self, root: FolderId) {
        self.roots.remove(&root);
    }
}
