//! Routing of a single mutation to every node that should hear about it.

use crate::changes::{Change, ChangeKind, Relation};
use crate::tree::{NodeArena, NodeId};

/// A change addressed to the bus of `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Delivery {
    pub target: NodeId,
    pub change: Change,
}

/// Computes the deliveries for `kind` changing on `origin`, in delivery order:
/// the node itself, its ancestors nearest first, then (for structural changes
/// of a folder) its descendants in pre-order.
pub(crate) fn route(nodes: &NodeArena, origin: NodeId, kind: ChangeKind) -> Vec<Delivery> {
    let mut deliveries = route_upward(nodes, origin, kind);

    if kind.is_structural() && nodes.is_folder(origin) {
        for descendant in nodes.descendants(origin) {
            let relation = if nodes.parent(descendant).is_some_and(|p| p == origin) {
                Relation::Parent
            } else {
                Relation::Ancestor
            };
            deliveries.push(Delivery {
                target: descendant,
                change: Change::new(kind, relation, origin),
            });
        }
    }

    deliveries
}

/// The node itself and its ancestors, nearest first. Nothing goes down.
pub(crate) fn route_upward(nodes: &NodeArena, origin: NodeId, kind: ChangeKind) -> Vec<Delivery> {
    let mut deliveries = vec![Delivery {
        target: origin,
        change: Change::new(kind, Relation::Own, origin),
    }];

    let parent = nodes.parent(origin);
    for ancestor in nodes.ancestors(origin) {
        let relation = if Some(ancestor) == parent {
            Relation::Child
        } else {
            Relation::Descendant
        };
        deliveries.push(Delivery {
            target: ancestor.node(),
            change: Change::new(kind, relation, origin),
        });
    }

    deliveries
}

/// The extra `root:` delivery announcing a file's open/focus change tree-wide.
pub(crate) fn root_broadcast(
    nodes: &NodeArena,
    origin: NodeId,
    kind: ChangeKind,
) -> Option<Delivery> {
    if !matches!(kind, ChangeKind::Opened | ChangeKind::Focused) {
        return None;
    }
    nodes.root_of(origin).map(|root| Delivery {
        target: root.node(),
        change: Change::new(kind, Relation::Root, origin),
    })
}
