use std::cell::RefCell;
use std::rc::Rc;

use crate::changes::ChangeFilter;
use crate::tree::{FileTree, NodeId};

/// Subscribes to every change on `node` and collects the rendered names.
pub(crate) fn record(tree: &mut FileTree, node: impl Into<NodeId>) -> Rc<RefCell<Vec<String>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    tree.subscribe(node, ChangeFilter::any(), move |change, _| {
        sink.borrow_mut().push(change.to_string());
    })
    .expect("recorded node should exist");
    log
}
