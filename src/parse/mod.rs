//! # Payload parsing
//!
//! Turns raw content payloads into [`ContentNode`]s.
//!
//! Materialization is eager and depth-first: when [`PayloadParser::create_child`]
//! returns, every entry of `child_info.children` and `ancestor_info.ancestors`
//! (at every level) is a typed node. Entries that are already nodes are
//! passed through untouched, so feeding a normalized list back in never
//! wraps a node twice.
//!
//! ## Payload shape
//!
//! ```text
//! {
//!   "id": "...", "display_name": "...", "category": "...",
//!   "child_info": { "category": "...", "display_name": "...", "children": [ <payload>, ... ] },
//!   "ancestor_info": { "ancestors": [ <payload>, ... ] },
//!   ...
//! }
//! ```

mod error;
mod raw;

pub use error::ParseError;

use raw::RawAttributes;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::config::ModelConfig;
use crate::domain::{AncestorInfo, ChildInfo, ContentNode, Field, NodeAttributes};

const ROOT: &str = "$";
const CHILDREN: &str = "children";
const ANCESTORS: &str = "ancestors";

/// An entry of a nested node list, before or after materialization
#[derive(Debug, Clone, PartialEq)]
pub enum NestedEntry {
    Raw(Value),
    Node(ContentNode),
}

/// Anything that can stand in a nested node list
pub trait Materialize {
    fn into_entry(self) -> NestedEntry;
}

impl Materialize for NestedEntry {
    fn into_entry(self) -> NestedEntry {
        self
    }
}

impl Materialize for Value {
    fn into_entry(self) -> NestedEntry {
        NestedEntry::Raw(self)
    }
}

impl Materialize for ContentNode {
    fn into_entry(self) -> NestedEntry {
        NestedEntry::Node(self)
    }
}

impl Materialize for NodeAttributes {
    fn into_entry(self) -> NestedEntry {
        NestedEntry::Node(ContentNode::new(self))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChildInfoHeader {
    category: Option<String>,
    display_name: Option<String>,
}

/// Recursive factory for content nodes
#[derive(Debug, Clone)]
pub struct PayloadParser {
    strict_fields: bool,
    max_depth: usize,
}

impl Default for PayloadParser {
    fn default() -> Self {
        Self::new(&ModelConfig::default())
    }
}

impl PayloadParser {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            strict_fields: config.strict_fields,
            max_depth: config.max_depth,
        }
    }

    /// Rejects unknown payload keys instead of dropping them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_fields = strict;
        self
    }

    /// Normalizes a raw payload into an attribute set with materialized
    /// children and ancestors
    pub fn parse(&self, payload: Value) -> Result<NodeAttributes, ParseError> {
        self.parse_node(payload, ROOT, 0)
    }

    /// Builds a node from a raw payload
    pub fn create_child(&self, payload: Value) -> Result<ContentNode, ParseError> {
        self.parse(payload).map(ContentNode::new)
    }

    /// Builds a node from JSON text
    pub fn parse_json_str(&self, json: &str) -> Result<ContentNode, ParseError> {
        let payload: Value = serde_json::from_str(json)?;
        self.create_child(payload)
    }

    /// Materializes a single entry. Nodes are returned as they are.
    pub fn materialize<T: Materialize>(&self, entry: T) -> Result<ContentNode, ParseError> {
        self.materialize_entry(entry.into_entry(), ROOT, 0)
    }

    /// Materializes a list that may mix raw payloads and nodes, keeping order
    pub fn parse_entries<I, T>(&self, entries: I) -> Result<Vec<ContentNode>, ParseError>
    where
        I: IntoIterator<Item = T>,
        T: Materialize,
    {
        entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                self.materialize_entry(entry.into_entry(), &format!("{}[{}]", ROOT, index), 0)
            })
            .collect()
    }

    fn materialize_entry(
        &self,
        entry: NestedEntry,
        path: &str,
        depth: usize,
    ) -> Result<ContentNode, ParseError> {
        match entry {
            NestedEntry::Node(node) => {
                trace!(path, node = ?node.id(), "entry already materialized");
                Ok(node)
            }
            NestedEntry::Raw(payload) => {
                self.parse_node(payload, path, depth).map(ContentNode::new)
            }
        }
    }

    fn parse_node(
        &self,
        payload: Value,
        path: &str,
        depth: usize,
    ) -> Result<NodeAttributes, ParseError> {
        if depth > self.max_depth {
            return Err(ParseError::TooDeep {
                path: path.to_string(),
                max_depth: self.max_depth,
            });
        }

        let mut map = expect_object(payload, path)?;
        self.check_keys(&map, path, |key| key.parse::<Field>().is_ok())?;

        let child_info = map.remove(Field::ChildInfo.as_str());
        let ancestor_info = map.remove(Field::AncestorInfo.as_str());

        let raw: RawAttributes =
            serde_json::from_value(Value::Object(map)).map_err(|source| {
                ParseError::InvalidAttributes {
                    path: path.to_string(),
                    source,
                }
            })?;
        let mut attrs = raw.into_attributes();
        attrs.ancestor_info = self.parse_ancestor_info(ancestor_info, path, depth)?;
        attrs.child_info = self.parse_child_info(child_info, path, depth)?;

        debug!(
            path,
            depth,
            id = ?attrs.id,
            children = attrs.child_info.as_ref().map_or(0, ChildInfo::len),
            "materialized content node"
        );
        Ok(attrs)
    }

    fn parse_child_info(
        &self,
        raw: Option<Value>,
        path: &str,
        depth: usize,
    ) -> Result<Option<ChildInfo>, ParseError> {
        let info_path = format!("{}.{}", path, Field::ChildInfo);
        let mut map = match raw {
            None | Some(Value::Null) => return Ok(None),
            Some(value) => expect_object(value, &info_path)?,
        };
        self.check_keys(&map, &info_path, |key| {
            matches!(key, "category" | "display_name" | CHILDREN)
        })?;

        let children_path = format!("{}.{}", info_path, CHILDREN);
        let children = self.parse_list(map.remove(CHILDREN), &children_path, depth)?;
        let header: ChildInfoHeader =
            serde_json::from_value(Value::Object(map)).map_err(|source| {
                ParseError::InvalidAttributes {
                    path: info_path.clone(),
                    source,
                }
            })?;

        Ok(Some(ChildInfo {
            category: header.category,
            display_name: header.display_name,
            children,
        }))
    }

    fn parse_ancestor_info(
        &self,
        raw: Option<Value>,
        path: &str,
        depth: usize,
    ) -> Result<Option<AncestorInfo>, ParseError> {
        let info_path = format!("{}.{}", path, Field::AncestorInfo);
        let mut map = match raw {
            None | Some(Value::Null) => return Ok(None),
            Some(value) => expect_object(value, &info_path)?,
        };
        self.check_keys(&map, &info_path, |key| key == ANCESTORS)?;

        let ancestors_path = format!("{}.{}", info_path, ANCESTORS);
        let ancestors = self.parse_list(map.remove(ANCESTORS), &ancestors_path, depth)?;
        Ok(Some(AncestorInfo::new(ancestors)))
    }

    fn parse_list(
        &self,
        raw: Option<Value>,
        path: &str,
        depth: usize,
    ) -> Result<Vec<ContentNode>, ParseError> {
        match raw {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    self.materialize_entry(
                        NestedEntry::Raw(item),
                        &format!("{}[{}]", path, index),
                        depth + 1,
                    )
                })
                .collect(),
            Some(other) => Err(ParseError::NotASequence {
                path: path.to_string(),
                found: kind(&other),
            }),
        }
    }

    fn check_keys<F>(
        &self,
        map: &Map<String, Value>,
        path: &str,
        known: F,
    ) -> Result<(), ParseError>
    where
        F: Fn(&str) -> bool,
    {
        for key in map.keys().filter(|key| !known(key.as_str())) {
            if self.strict_fields {
                return Err(ParseError::UnknownField {
                    path: path.to_string(),
                    field: key.clone(),
                });
            }
            debug!(path, field = %key, "dropping unknown field");
        }
        Ok(())
    }
}

fn expect_object(value: Value, path: &str) -> Result<Map<String, Value>, ParseError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ParseError::NotAnObject {
            path: path.to_string(),
            found: kind(&other),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
