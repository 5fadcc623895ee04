use std::fmt;

use derive_more::Display;
use hashlink::LinkedHashMap;

use crate::changes::{Change, ChangeFilter};
use crate::tree::{FileTree, NodeId};

/// Callback invoked for each matching change. The tree is passed in its
/// post-mutation state and is read-only during delivery.
///
/// While a node's listeners run, that node's bus is out of the tree:
/// `tree.node(target).changes()` reads as empty from inside them. Buses of
/// other nodes are unaffected.
pub type Listener = Box<dyn FnMut(&Change, &FileTree)>;

/// Handle returned by [`FileTree::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{node}/{seq}")]
pub struct SubscriptionId {
    node: NodeId,
    seq: u64,
}

impl SubscriptionId {
    pub(crate) const fn new(node: NodeId, seq: u64) -> Self {
        Self { node, seq }
    }

    /// The node the subscription is attached to.
    pub const fn node(self) -> NodeId {
        self.node
    }

    pub(crate) const fn seq(self) -> u64 {
        self.seq
    }
}

struct Subscription {
    filter: ChangeFilter,
    listener: Listener,
}

/// Per-node observer registry. Listeners run in subscription order.
#[derive(Default)]
pub struct ChangeBus {
    subscriptions: LinkedHashMap<u64, Subscription>,
}

impl ChangeBus {
    pub(crate) fn subscribe(&mut self, seq: u64, filter: ChangeFilter, listener: Listener) {
        self.subscriptions
            .insert(seq, Subscription { filter, listener });
    }

    pub(crate) fn unsubscribe(&mut self, seq: u64) -> bool {
        self.subscriptions.remove(&seq).is_some()
    }

    /// Calls every listener whose filter matches and returns how many ran.
    pub(crate) fn emit(&mut self, change: &Change, tree: &FileTree) -> usize {
        let mut notified = 0;
        for subscription in self.subscriptions.values_mut() {
            if subscription.filter.matches(change) {
                (subscription.listener)(change, tree);
                notified += 1;
            }
        }
        notified
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeBus")
            .field("listeners", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::changes::{ChangeKind, Relation};

    fn recorder(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> Listener {
        let log = Rc::clone(log);
        Box::new(move |change, _| log.borrow_mut().push(format!("{tag}:{change}")))
    }

    #[test]
    fn test_emit_respects_filters_and_order() {
        let tree = FileTree::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = ChangeBus::default();
        bus.subscribe(1, ChangeFilter::any(), recorder(&log, "a"));
        bus.subscribe(2, ChangeFilter::kind(ChangeKind::Content), recorder(&log, "b"));
        bus.subscribe(3, ChangeFilter::any(), recorder(&log, "c"));

        let origin = NodeId::new(5);
        let notified = bus.emit(&Change::new(ChangeKind::Name, Relation::Child, origin), &tree);

        assert_eq!(notified, 2);
        assert_eq!(*log.borrow(), vec!["a:child:name", "c:child:name"]);
    }

    #[test]
    fn test_unsubscribe() {
        let tree = FileTree::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = ChangeBus::default();
        bus.subscribe(1, ChangeFilter::any(), recorder(&log, "a"));

        assert!(bus.unsubscribe(1));
        assert!(!bus.unsubscribe(1));
        assert!(bus.is_empty());

        bus.emit(
            &Change::new(ChangeKind::Name, Relation::Own, NodeId::new(0)),
            &tree,
        );
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_subscription_id_display() {
        let id = SubscriptionId::new(NodeId::new(2), 9);
        assert_eq!(id.to_string(), "#2/9");
        assert_eq!(id.node(), NodeId::new(2));
    }
}
