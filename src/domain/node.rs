//! Content node model
//!
//! A [`ContentNode`] is one unit of course content (course, section,
//! subsection, unit or component). Nested payloads are materialized into
//! child and ancestor nodes when the node is built; after that the tree
//! only holds typed nodes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use super::attributes::{swap_if_changed, Field, NodeAttributes};
use super::events::{NodeEvent, Observer, ObserverId, Observers};
use super::info::{AncestorInfo, ChildInfo};
use super::publish::{PublishAction, PublishStatus};
use super::release::{ReleaseSummary, ReleaseTitle};
use crate::config::ModelConfig;
use crate::parse::{ParseError, PayloadParser};

/// One node of the content hierarchy
///
/// Observers are not part of a node's value: clones start with no
/// observers and equality compares attributes only.
pub struct ContentNode {
    attrs: NodeAttributes,
    observers: Observers,
}

impl ContentNode {
    /// Wraps an already-normalized attribute set
    pub fn new(attrs: NodeAttributes) -> Self {
        Self {
            attrs,
            observers: Observers::default(),
        }
    }

    /// Builds a node from a raw payload using the default parser
    pub fn from_payload(payload: Value) -> Result<Self, ParseError> {
        PayloadParser::default().create_child(payload)
    }

    /// Builds a node from JSON text using the default parser
    pub fn from_json_str(json: &str) -> Result<Self, ParseError> {
        PayloadParser::default().parse_json_str(json)
    }

    /// Returns the full attribute set
    pub fn attributes(&self) -> &NodeAttributes {
        &self.attrs
    }

    /// Consumes the node, keeping only its attributes
    pub fn into_attributes(self) -> NodeAttributes {
        self.attrs
    }

    pub fn id(&self) -> Option<&str> {
        self.attrs.id.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.attrs.display_name.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.attrs.category.as_deref()
    }

    pub fn studio_url(&self) -> Option<&str> {
        self.attrs.studio_url.as_deref()
    }

    pub fn child_info(&self) -> Option<&ChildInfo> {
        self.attrs.child_info.as_ref()
    }

    pub fn ancestor_info(&self) -> Option<&AncestorInfo> {
        self.attrs.ancestor_info.as_ref()
    }

    /// Reads one attribute as JSON. Absent attributes read as `null`.
    pub fn get(&self, field: Field) -> Value {
        self.attrs.get(field)
    }

    /// Serializes the node back into payload form, nested nodes included
    pub fn to_payload(&self) -> Value {
        serde_json::to_value(&self.attrs).unwrap_or(Value::Null)
    }

    // --- Derived queries ---

    /// Returns true iff `child_info` is present and lists at least one child
    pub fn has_children(&self) -> bool {
        self.attrs
            .child_info
            .as_ref()
            .is_some_and(|info| !info.children.is_empty())
    }

    /// Direct children; empty when `child_info` is absent
    pub fn children(&self) -> &[ContentNode] {
        self.attrs
            .child_info
            .as_ref()
            .map(|info| info.children.as_slice())
            .unwrap_or(&[])
    }

    /// Mutable access to direct children.
    ///
    /// Changes made through this slice notify the child's observers only;
    /// observers of this node receive no `Changed` event.
    pub fn children_mut(&mut self) -> &mut [ContentNode] {
        self.attrs
            .child_info
            .as_mut()
            .map(|info| info.children.as_mut_slice())
            .unwrap_or(&mut [])
    }

    /// Ancestors, root first; empty when `ancestor_info` is absent
    pub fn ancestors(&self) -> &[ContentNode] {
        self.attrs
            .ancestor_info
            .as_ref()
            .map(|info| info.ancestors.as_slice())
            .unwrap_or(&[])
    }

    /// The direct parent, i.e. the last ancestor
    pub fn parent(&self) -> Option<&ContentNode> {
        self.ancestors().last()
    }

    /// Iterates all descendants depth-first, in document order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(self)
    }

    /// Finds this node or a descendant by id
    pub fn find(&self, id: &str) -> Option<&ContentNode> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.descendants().find(|node| node.id() == Some(id))
    }

    /// Height of the subtree rooted here; 1 for a leaf
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(ContentNode::depth)
            .max()
            .unwrap_or(0)
    }

    pub fn is_published(&self) -> bool {
        self.attrs.published.unwrap_or(false)
    }

    pub fn has_unpublished_changes(&self) -> bool {
        self.attrs.has_changes.unwrap_or(false)
    }

    pub fn is_staff_only(&self) -> bool {
        self.attrs.visible_to_staff_only.unwrap_or(false)
    }

    pub fn publish_status(&self) -> PublishStatus {
        PublishStatus::from_flags(
            self.is_published(),
            self.has_unpublished_changes(),
            self.is_staff_only(),
        )
    }

    /// Release information, when a release date is known
    pub fn release_summary(&self) -> Option<ReleaseSummary> {
        let date = self.attrs.release_date?;
        let title = if self.attrs.released_to_students.unwrap_or(false) {
            ReleaseTitle::Released
        } else {
            ReleaseTitle::Scheduled
        };
        Some(ReleaseSummary {
            title,
            date,
            source: self.attrs.release_date_from.clone(),
        })
    }

    /// Read/update endpoint of this node under `root`
    pub fn url(&self, root: &str) -> Option<String> {
        let id = self.id()?;
        Some(format!(
            "{}/{}",
            root.trim_end_matches('/'),
            urlencoding::encode(id)
        ))
    }

    /// Read/update endpoint under the configured URL root
    pub fn endpoint(&self, config: &ModelConfig) -> Option<String> {
        self.url(&config.url_root)
    }

    // --- Observers ---

    /// Registers an observer; it runs after every later mutation
    pub fn observe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&ContentNode, &NodeEvent) + 'static,
    {
        let boxed: Observer = Box::new(observer);
        self.observers.register(boxed)
    }

    /// Removes an observer. Returns false if it was not registered.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&self, event: NodeEvent) {
        self.observers.dispatch(self, &event);
    }

    /// Asks observers to publish or discard this node's draft.
    ///
    /// Nothing is stored on the node.
    pub fn request_publish(&mut self, action: PublishAction) {
        debug!(node = ?self.id(), %action, "publish requested");
        self.notify(NodeEvent::Publish(action));
    }

    // --- Mutation ---

    /// Sets one attribute from a payload value, using the default parser
    pub fn set(&mut self, field: Field, value: Value) -> Result<bool, ParseError> {
        self.set_many(vec![(field, value)])
    }

    /// Sets several attributes as one mutation, using the default parser
    pub fn set_many(&mut self, updates: Vec<(Field, Value)>) -> Result<bool, ParseError> {
        self.set_many_with(&PayloadParser::default(), updates)
    }

    /// Sets several attributes as one mutation.
    ///
    /// Values go through the same parse rule as whole payloads, so nested
    /// `child_info`/`ancestor_info` values are materialized. If any value
    /// fails to parse nothing is applied. Observers are notified once,
    /// listing the fields that actually changed; returns false (and
    /// notifies nobody) when nothing changed.
    pub fn set_many_with(
        &mut self,
        parser: &PayloadParser,
        updates: Vec<(Field, Value)>,
    ) -> Result<bool, ParseError> {
        let fields: Vec<Field> = updates.iter().map(|(field, _)| *field).collect();
        let patch: Map<String, Value> = updates
            .into_iter()
            .map(|(field, value)| (field.as_str().to_string(), value))
            .collect();
        let mut incoming = parser.parse(Value::Object(patch))?;

        let mut changed = Vec::new();
        for field in fields {
            if !changed.contains(&field) && self.attrs.take_field(&mut incoming, field) {
                changed.push(field);
            }
        }
        Ok(self.finish_update(changed))
    }

    pub fn set_display_name(&mut self, name: impl Into<String>) -> bool {
        let changed = swap_if_changed(&mut self.attrs.display_name, &mut Some(name.into()));
        self.finish_flag(changed, Field::DisplayName)
    }

    pub fn set_has_changes(&mut self, has_changes: bool) -> bool {
        let changed = swap_if_changed(&mut self.attrs.has_changes, &mut Some(has_changes));
        self.finish_flag(changed, Field::HasChanges)
    }

    pub fn set_published(&mut self, published: bool) -> bool {
        let changed = swap_if_changed(&mut self.attrs.published, &mut Some(published));
        self.finish_flag(changed, Field::Published)
    }

    /// Locks or unlocks the node to staff
    pub fn set_staff_only(&mut self, staff_only: bool) -> bool {
        let changed = swap_if_changed(&mut self.attrs.visible_to_staff_only, &mut Some(staff_only));
        self.finish_flag(changed, Field::VisibleToStaffOnly)
    }

    /// Replaces the child summary with already-materialized children
    pub fn set_child_info(&mut self, child_info: Option<ChildInfo>) -> bool {
        let mut incoming = child_info;
        let changed = swap_if_changed(&mut self.attrs.child_info, &mut incoming);
        self.finish_flag(changed, Field::ChildInfo)
    }

    fn finish_flag(&mut self, changed: bool, field: Field) -> bool {
        let fields = if changed { vec![field] } else { Vec::new() };
        self.finish_update(fields)
    }

    fn finish_update(&mut self, fields: Vec<Field>) -> bool {
        if fields.is_empty() {
            return false;
        }
        debug!(node = ?self.id(), ?fields, "attributes changed");
        self.notify(NodeEvent::Changed { fields });
        true
    }
}

impl Clone for ContentNode {
    fn clone(&self) -> Self {
        Self::new(self.attrs.clone())
    }
}

impl PartialEq for ContentNode {
    fn eq(&self, other: &Self) -> bool {
        self.attrs == other.attrs
    }
}

impl std::fmt::Debug for ContentNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentNode")
            .field("attrs", &self.attrs)
            .field("observers", &self.observers)
            .finish()
    }
}

impl From<NodeAttributes> for ContentNode {
    fn from(attrs: NodeAttributes) -> Self {
        Self::new(attrs)
    }
}

impl Serialize for ContentNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.attrs.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ContentNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let payload = Value::deserialize(deserializer)?;
        PayloadParser::default()
            .create_child(payload)
            .map_err(serde::de::Error::custom)
    }
}

/// Depth-first pre-order iterator over a node's descendants
pub struct Descendants<'a> {
    stack: Vec<&'a ContentNode>,
}

impl<'a> Descendants<'a> {
    fn new(root: &'a ContentNode) -> Self {
        Self {
            stack: root.children().iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a ContentNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reverse so the leftmost child is visited first
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
