//! Selection, open/focus, expansion and content of nodes.

use snafu::prelude::*;
use tracing::{debug, warn};

use crate::changes::ChangeKind;
use crate::tree::error::UnknownNodeSnafu;
use crate::tree::node::Slot;
use crate::tree::{FileId, FileTree, FolderId, Node, NodeId, TreeError};

impl FileTree {
    /// Selecting expands every ancestor and takes the selection away from
    /// the previous holder in the same root. Deselecting leaves the root
    /// without a selection.
    pub fn set_selected(
        &mut self,
        node: impl Into<NodeId>,
        selected: bool,
    ) -> Result<(), TreeError> {
        let result = self.set_slot(node.into(), Slot::Selected, selected);
        self.flush();
        result
    }

    pub fn select(&mut self, node: impl Into<NodeId>) -> Result<(), TreeError> {
        self.set_selected(node, true)
    }

    /// Hands the selection back to the node's root. A file without a root
    /// is simply cleared.
    pub fn deselect(&mut self, node: impl Into<NodeId>) -> Result<(), TreeError> {
        let result = self.hand_back_selection(node.into());
        self.flush();
        result
    }

    fn hand_back_selection(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.existing(id)?;
        let Some(root) = self.nodes.root_of(id) else {
            return self.set_slot(id, Slot::Selected, false);
        };
        self.set_slot(root.node(), Slot::Selected, true)?;
        if root != id {
            self.set_slot(id, Slot::Selected, false)?;
        }
        Ok(())
    }

    /// Opening closes the previously opened file of the same root.
    pub fn set_opened(&mut self, file: FileId, opened: bool) -> Result<(), TreeError> {
        let result = self.set_slot(file.node(), Slot::Opened, opened);
        self.flush();
        result
    }

    pub fn open(&mut self, file: FileId) -> Result<(), TreeError> {
        self.set_opened(file, true)
    }

    pub fn close(&mut self, file: FileId) -> Result<(), TreeError> {
        self.set_opened(file, false)
    }

    /// Focusing blurs the previously focused file of the same root.
    pub fn set_focused(&mut self, file: FileId, focused: bool) -> Result<(), TreeError> {
        let result = self.set_slot(file.node(), Slot::Focused, focused);
        self.flush();
        result
    }

    pub fn focus(&mut self, file: FileId) -> Result<(), TreeError> {
        self.set_focused(file, true)
    }

    pub fn blur(&mut self, file: FileId) -> Result<(), TreeError> {
        self.set_focused(file, false)
    }

    /// Expanding a folder expands its ancestors first.
    pub fn set_expanded(&mut self, folder: FolderId, expanded: bool) -> Result<(), TreeError> {
        if self.is_expanded(folder)? == expanded {
            return Ok(());
        }
        if expanded {
            self.expand_ancestors(folder.node());
        }
        self.write_expanded(folder, expanded);
        self.flush();
        Ok(())
    }

    pub fn expand(&mut self, folder: FolderId) -> Result<(), TreeError> {
        self.set_expanded(folder, true)
    }

    pub fn collapse(&mut self, folder: FolderId) -> Result<(), TreeError> {
        self.set_expanded(folder, false)
    }

    pub fn set_content(&mut self, file: FileId, content: impl Into<String>) -> Result<(), TreeError> {
        let content = content.into();
        let data = self
            .nodes
            .get_mut(file)
            .and_then(Node::as_file_mut)
            .context(UnknownNodeSnafu { id: file.node() })?;
        if data.content == content {
            return Ok(());
        }
        data.content = content;
        self.queue(file.node(), ChangeKind::Content);
        self.flush();
        Ok(())
    }

    fn set_slot(&mut self, id: NodeId, slot: Slot, value: bool) -> Result<(), TreeError> {
        self.existing(id)?;
        if value && slot == Slot::Selected {
            self.expand_ancestors(id);
        }
        if self.existing(id)?.flag(slot) == value {
            return Ok(());
        }

        let root = self.nodes.root_of(id);
        if value
            && let Some(previous) = root
                .and_then(|root| self.singletons.holder(root, slot))
                .filter(|&holder| holder != id)
        {
            self.write_flag(previous, slot, false, root);
        }
        self.write_flag(id, slot, value, root);
        Ok(())
    }

    /// Sets the flag, keeps the root's index in step and queues the change.
    fn write_flag(&mut self, id: NodeId, slot: Slot, value: bool, root: Option<FolderId>) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if !node.set_flag(slot, value) {
            return;
        }
        if let Some(root) = root {
            if value {
                self.singletons.set(root, slot, id);
            } else {
                self.singletons.release(root, slot, id);
            }
        }
        debug!("Set {slot} of {id} to {value}");
        self.queue(id, slot.change_kind());
    }

    fn write_expanded(&mut self, folder: FolderId, expanded: bool) {
        let Some(data) = self.nodes.get_mut(folder).and_then(Node::as_folder_mut) else {
            return;
        };
        if data.expanded == expanded {
            return;
        }
        data.expanded = expanded;
        self.queue(folder.node(), ChangeKind::Expanded);
    }

    /// Expands every ancestor of `id`, outermost first.
    pub(crate) fn expand_ancestors(&mut self, id: NodeId) {
        for ancestor in self.nodes.ancestors(id).into_iter().rev() {
            self.write_expanded(ancestor, true);
        }
    }

    /// Registers the flags carried by a freshly attached `lineage` with its
    /// new root. The first flagged node in pre-order keeps each flag and
    /// replaces whatever held it in the root before.
    pub(crate) fn reconcile_singletons(&mut self, id: NodeId, lineage: &[NodeId]) {
        let Some(root) = self.nodes.root_of(id) else {
            return;
        };
        for slot in Slot::ALL {
            let flagged: Vec<NodeId> = lineage
                .iter()
                .copied()
                .filter(|&node| self.nodes.get(node).is_some_and(|n| n.flag(slot)))
                .collect();
            let Some((&winner, extra)) = flagged.split_first() else {
                continue;
            };
            for &node in extra {
                self.write_flag(node, slot, false, None);
            }
            if let Some(previous) = self
                .singletons
                .holder(root, slot)
                .filter(|&holder| holder != winner)
            {
                warn!("{winner} arrived {slot} under {root}, clearing {previous}");
                self.write_flag(previous, slot, false, Some(root));
            }
            self.singletons.set(root, slot, winner);
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;
    use crate::tree::testing::record;

    /// root -> src -> {a.ts, b.ts}
    fn sample() -> (FileTree, FolderId, FileId, FileId) {
        let mut tree = FileTree::new();
        let a = tree.insert_path("src/a.ts").unwrap();
        let b = tree.insert_path("src/b.ts").unwrap();
        let src = tree.parent(a).unwrap().unwrap();
        (tree, src, a, b)
    }

    #[test]
    fn test_select_expands_and_keeps_one_selection() {
        let mut tree = FileTree::new();
        let root = tree.root();
        let src = tree.create_folder("src");
        let a = tree.create_file("a.ts");
        tree.set_parent(src, Some(root)).unwrap();
        tree.set_parent(a, Some(src)).unwrap();
        tree.collapse(src).unwrap();

        tree.select(a).unwrap();

        assert!(tree.is_expanded(src).unwrap());
        let selected: Vec<NodeId> = tree
            .lineage(root)
            .unwrap()
            .into_iter()
            .filter(|&id| tree.is_selected(id).unwrap())
            .collect();
        assert_eq!(selected, vec![a.node()]);
        assert_eq!(tree.selected_in(root), Some(a.node()));

        tree.set_name(a, "").unwrap();
        assert_eq!(tree.parent(a).unwrap(), None);
        assert!(tree.children(src).unwrap().is_empty());
    }

    #[test]
    fn test_select_moves_selection() {
        let (mut tree, src, a, b) = sample();
        tree.select(a).unwrap();
        let a_log = record(&mut tree, a);
        let src_log = record(&mut tree, src);

        tree.select(b).unwrap();

        assert!(!tree.is_selected(a).unwrap());
        assert!(tree.is_selected(b).unwrap());
        assert_eq!(*a_log.borrow(), vec!["selected"]);
        assert_eq!(*src_log.borrow(), vec!["child:selected", "child:selected"]);
    }

    #[test]
    fn test_select_twice_emits_once() {
        let (mut tree, _, a, _) = sample();
        let log = record(&mut tree, a);

        tree.select(a).unwrap();
        tree.select(a).unwrap();

        assert_eq!(*log.borrow(), vec!["selected"]);
    }

    #[test]
    fn test_deselect_returns_selection_to_root() {
        let (mut tree, _, a, _) = sample();
        let root = tree.root();
        tree.select(a).unwrap();

        tree.deselect(a).unwrap();
        assert!(!tree.is_selected(a).unwrap());
        assert!(tree.is_selected(root).unwrap());
        assert_eq!(tree.selected_in(root), Some(root.node()));

        tree.deselect(root).unwrap();
        assert!(tree.is_selected(root).unwrap());
    }

    #[test]
    fn test_deselect_detached_file() {
        let mut tree = FileTree::new();
        let loose = tree.create_file("loose");
        tree.select(loose).unwrap();
        assert!(tree.is_selected(loose).unwrap());
        assert_eq!(tree.selected_in(tree.root()), Some(tree.root().node()));

        tree.deselect(loose).unwrap();
        assert!(!tree.is_selected(loose).unwrap());
    }

    #[test]
    fn test_set_selected_false_leaves_no_selection() {
        let (mut tree, _, a, _) = sample();
        let root = tree.root();
        tree.select(a).unwrap();

        tree.set_selected(a, false).unwrap();

        assert_eq!(tree.selected_in(root), None);
        assert!(!tree.is_selected(root).unwrap());
    }

    #[test]
    fn test_open_broadcasts_to_root() {
        let (mut tree, src, a, _) = sample();
        let root = tree.root();
        let root_log = record(&mut tree, root);
        let src_log = record(&mut tree, src);

        tree.open(a).unwrap();

        assert_eq!(*src_log.borrow(), vec!["child:opened"]);
        assert_eq!(
            *root_log.borrow(),
            vec!["descendant:opened", "root:opened"]
        );
        assert_eq!(tree.opened_in(root), Some(a));
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn test_open_and_focus_are_singletons(#[case] use_focus: bool) {
        let (mut tree, _, a, b) = sample();
        let root = tree.root();
        let set = |tree: &mut FileTree, file: FileId| {
            if use_focus {
                tree.focus(file)
            } else {
                tree.open(file)
            }
        };
        let get = |tree: &FileTree, file: FileId| {
            if use_focus {
                tree.is_focused(file)
            } else {
                tree.is_opened(file)
            }
        };

        set(&mut tree, a).unwrap();
        set(&mut tree, b).unwrap();

        assert!(!get(&tree, a).unwrap());
        assert!(get(&tree, b).unwrap());
        let holder = if use_focus {
            tree.focused_in(root)
        } else {
            tree.opened_in(root)
        };
        assert_eq!(holder, Some(b));
    }

    #[test]
    fn test_open_and_focus_are_independent() {
        let (mut tree, _, a, b) = sample();
        let root = tree.root();

        tree.open(a).unwrap();
        tree.focus(b).unwrap();

        assert_eq!(tree.opened_in(root), Some(a));
        assert_eq!(tree.focused_in(root), Some(b));

        tree.close(a).unwrap();
        tree.blur(b).unwrap();
        assert_eq!(tree.opened_in(root), None);
        assert_eq!(tree.focused_in(root), None);
    }

    #[test]
    fn test_expand_twice_emits_once() {
        let (mut tree, src, _, _) = sample();
        tree.collapse(src).unwrap();
        let log = record(&mut tree, src);

        tree.expand(src).unwrap();
        tree.expand(src).unwrap();
        tree.collapse(src).unwrap();

        assert_eq!(*log.borrow(), vec!["expanded", "expanded"]);
        assert!(!tree.is_expanded(src).unwrap());
    }

    #[test]
    fn test_expand_cascades_to_ancestors() {
        let mut tree = FileTree::new();
        let outer = tree.create_folder("outer");
        let inner = tree.create_folder("inner");
        tree.set_parent(inner, Some(outer)).unwrap();
        tree.collapse(outer).unwrap();
        let outer_log = record(&mut tree, outer);
        let inner_log = record(&mut tree, inner);

        tree.expand(inner).unwrap();

        assert!(tree.is_expanded(outer).unwrap());
        assert_eq!(*outer_log.borrow(), vec!["expanded", "child:expanded"]);
        assert_eq!(*inner_log.borrow(), vec!["parent:expanded", "expanded"]);
    }

    #[test]
    fn test_content() {
        let (mut tree, src, a, _) = sample();
        let src_log = record(&mut tree, src);

        tree.set_content(a, "let x = 1;").unwrap();
        tree.set_content(a, "let x = 1;").unwrap();

        assert_eq!(tree.content(a).unwrap(), "let x = 1;");
        assert_eq!(*src_log.borrow(), vec!["child:content"]);
    }

    #[test]
    fn test_sibling_hears_nothing() {
        let (mut tree, _, a, b) = sample();
        let log = record(&mut tree, b);

        tree.set_name(a, "c.ts").unwrap();
        tree.set_content(a, "body").unwrap();
        tree.open(a).unwrap();

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_attached_subtree_brings_its_selection() {
        let mut tree = FileTree::new();
        let root = tree.root();
        let lib = tree.create_folder("lib");
        let x = tree.create_file("x.rs");
        tree.set_parent(x, Some(lib)).unwrap();
        tree.select(x).unwrap();
        tree.open(x).unwrap();
        assert_eq!(tree.selected_in(lib), Some(x.node()));
        let root_log = record(&mut tree, root);

        tree.set_parent(lib, Some(root)).unwrap();

        assert!(!tree.is_selected(root).unwrap());
        assert_eq!(tree.selected_in(root), Some(x.node()));
        assert_eq!(tree.opened_in(root), Some(x));
        assert_eq!(tree.selected_in(lib), None);
        assert!(root_log.borrow().contains(&"selected".to_string()));
    }

    #[test]
    fn test_detached_subtree_keeps_its_flags() {
        let (mut tree, src, a, _) = sample();
        let root = tree.root();
        tree.open(a).unwrap();

        tree.set_parent(src, None).unwrap();

        assert_eq!(tree.opened_in(root), None);
        assert_eq!(tree.opened_in(src), Some(a));
        assert!(tree.is_opened(a).unwrap());
    }

    #[test]
    fn test_unknown_file_errors() {
        let mut tree = FileTree::new();
        let ghost = FileId::new(NodeId::new(99));
        assert_eq!(
            tree.open(ghost),
            Err(TreeError::UnknownNode { id: ghost.node() })
        );
        assert!(tree.set_content(ghost, "x").is_err());
    }
}
