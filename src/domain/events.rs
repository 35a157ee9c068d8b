//! Change notification for content nodes
//!
//! Observers are plain callbacks held by the node they watch. They run
//! synchronously, in registration order, after a mutation has been applied.

use std::cell::RefCell;

use tracing::trace;

use super::attributes::Field;
use super::node::ContentNode;
use super::publish::PublishAction;

/// Event delivered to observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeEvent {
    /// One mutation changed these attributes
    Changed { fields: Vec<Field> },

    /// A publish command was requested. Attributes are untouched.
    Publish(PublishAction),
}

impl NodeEvent {
    /// Returns true if this event reports a change to `field`
    pub fn touches(&self, field: Field) -> bool {
        match self {
            NodeEvent::Changed { fields } => fields.contains(&field),
            NodeEvent::Publish(_) => false,
        }
    }
}

/// Handle returned by [`ContentNode::observe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// Observer callback. Receives the node in its post-mutation state.
pub type Observer = Box<dyn FnMut(&ContentNode, &NodeEvent)>;

/// Registered callbacks of one node
///
/// Each callback sits in its own cell so dispatch only needs a shared
/// borrow of the node; the registry stays in place while callbacks run.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, RefCell<Observer>)>,
}

impl Observers {
    pub(crate) fn register(&mut self, observer: Observer) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, RefCell::new(observer)));
        id
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != len_before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn dispatch(&self, node: &ContentNode, event: &NodeEvent) {
        for (id, observer) in &self.entries {
            trace!(node = ?node.id(), observer = id.0, ?event, "notifying observer");
            let mut callback = observer.borrow_mut();
            (*callback)(node, event);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
