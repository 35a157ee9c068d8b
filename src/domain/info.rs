//! Nested node collections: children and ancestors

use serde::Serialize;

use super::node::ContentNode;

/// Summary of a node's direct children
///
/// `category` and `display_name` describe the kind of child the node
/// accepts (e.g. a section accepts "sequential" children named "Subsection").
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChildInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    pub children: Vec<ContentNode>,
}

impl ChildInfo {
    /// Creates child info holding the given nodes
    pub fn new(children: Vec<ContentNode>) -> Self {
        Self {
            category: None,
            display_name: None,
            children,
        }
    }

    /// Sets the admissible child category
    pub fn with_category(
        mut self,
        category: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        self.category = Some(category.into());
        self.display_name = Some(display_name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Ancestors of a node, ordered root first, parent last
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AncestorInfo {
    pub ancestors: Vec<ContentNode>,
}

impl AncestorInfo {
    pub fn new(ancestors: Vec<ContentNode>) -> Self {
        Self { ancestors }
    }

    /// Returns the root of the hierarchy, if any ancestors are known
    pub fn root(&self) -> Option<&ContentNode> {
        self.ancestors.first()
    }

    /// Returns the direct parent
    pub fn parent(&self) -> Option<&ContentNode> {
        self.ancestors.last()
    }

    pub fn len(&self) -> usize {
        self.ancestors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ancestors.is_empty()
    }
}
