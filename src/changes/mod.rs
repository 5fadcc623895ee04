//! Hierarchical change notifications.
//!
//! Every node owns a [`ChangeBus`]. A mutation on one node is delivered to the
//! node itself and, tagged with a [`Relation`], to its ancestors and (for
//! structural folder changes) its descendants, so a listener anywhere in the
//! tree can tell "my direct child changed" from "something deeper changed".

mod bus;
mod change;
pub(crate) mod propagation;

pub use bus::{ChangeBus, Listener, SubscriptionId};
pub use change::{Change, ChangeFilter, ChangeKind, Relation};
