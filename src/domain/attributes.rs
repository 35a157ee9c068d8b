//! Attribute record for content nodes
//!
//! The attribute set is closed: every key a content payload may carry is a
//! [`Field`] and a typed member of [`NodeAttributes`]. Anything else is
//! dropped (or rejected, in strict mode) by the parser.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::info::{AncestorInfo, ChildInfo};
use super::release::ReleaseSource;
use crate::parse::PayloadParser;

/// Name of a content node attribute, as it appears in payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    DisplayName,
    Category,
    Data,
    Metadata,
    StudioUrl,
    ChildInfo,
    AncestorInfo,
    HasChanges,
    Published,
    VisibleToStaffOnly,
    EditedOn,
    EditedBy,
    PublishedOn,
    PublishedBy,
    ReleasedToStudents,
    ReleaseDate,
    ReleaseDateFrom,
}

impl Field {
    /// Returns every attribute name, in payload order
    pub fn all() -> &'static [Field] {
        &[
            Field::Id,
            Field::DisplayName,
            Field::Category,
            Field::Data,
            Field::Metadata,
            Field::StudioUrl,
            Field::ChildInfo,
            Field::AncestorInfo,
            Field::HasChanges,
            Field::Published,
            Field::VisibleToStaffOnly,
            Field::EditedOn,
            Field::EditedBy,
            Field::PublishedOn,
            Field::PublishedBy,
            Field::ReleasedToStudents,
            Field::ReleaseDate,
            Field::ReleaseDateFrom,
        ]
    }

    /// Returns the payload key for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::DisplayName => "display_name",
            Field::Category => "category",
            Field::Data => "data",
            Field::Metadata => "metadata",
            Field::StudioUrl => "studio_url",
            Field::ChildInfo => "child_info",
            Field::AncestorInfo => "ancestor_info",
            Field::HasChanges => "has_changes",
            Field::Published => "published",
            Field::VisibleToStaffOnly => "visible_to_staff_only",
            Field::EditedOn => "edited_on",
            Field::EditedBy => "edited_by",
            Field::PublishedOn => "published_on",
            Field::PublishedBy => "published_by",
            Field::ReleasedToStudents => "released_to_students",
            Field::ReleaseDate => "release_date",
            Field::ReleaseDateFrom => "release_date_from",
        }
    }

    /// Returns true for the two fields holding nested nodes
    pub fn is_nested(&self) -> bool {
        matches!(self, Field::ChildInfo | Field::AncestorInfo)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::all()
            .iter()
            .find(|field| field.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown content node field: {}", s))
    }
}

/// The normalized attribute set of a content node
///
/// Every field defaults to absent. Deserializing goes through
/// [`PayloadParser`], so `child_info` and `ancestor_info` always hold
/// materialized nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Block type tag (e.g. "chapter", "vertical", "html")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Opaque content payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Opaque settings payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    /// Editor page for this node, when it has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub studio_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_info: Option<ChildInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestor_info: Option<AncestorInfo>,

    /// True when the draft differs from the published version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_changes: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,

    /// Staff lock
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to_staff_only: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_to_students: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTime<Utc>>,

    /// The node whose settings determine `release_date`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date_from: Option<ReleaseSource>,
}

impl NodeAttributes {
    /// Creates an attribute set with only the id filled in
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Reads a single attribute as JSON. Absent attributes read as `null`.
    pub fn get(&self, field: Field) -> Value {
        let value = match field {
            Field::Id => serde_json::to_value(&self.id),
            Field::DisplayName => serde_json::to_value(&self.display_name),
            Field::Category => serde_json::to_value(&self.category),
            Field::Data => serde_json::to_value(&self.data),
            Field::Metadata => serde_json::to_value(&self.metadata),
            Field::StudioUrl => serde_json::to_value(&self.studio_url),
            Field::ChildInfo => serde_json::to_value(&self.child_info),
            Field::AncestorInfo => serde_json::to_value(&self.ancestor_info),
            Field::HasChanges => serde_json::to_value(self.has_changes),
            Field::Published => serde_json::to_value(self.published),
            Field::VisibleToStaffOnly => serde_json::to_value(self.visible_to_staff_only),
            Field::EditedOn => serde_json::to_value(self.edited_on),
            Field::EditedBy => serde_json::to_value(&self.edited_by),
            Field::PublishedOn => serde_json::to_value(self.published_on),
            Field::PublishedBy => serde_json::to_value(&self.published_by),
            Field::ReleasedToStudents => serde_json::to_value(self.released_to_students),
            Field::ReleaseDate => serde_json::to_value(self.release_date),
            Field::ReleaseDateFrom => serde_json::to_value(&self.release_date_from),
        };
        value.unwrap_or(Value::Null)
    }

    /// Moves `field` from `other` into `self` if the two values differ.
    ///
    /// Returns true when `self` changed. `other` is left holding the old value.
    pub(crate) fn take_field(&mut self, other: &mut NodeAttributes, field: Field) -> bool {
        match field {
            Field::Id => swap_if_changed(&mut self.id, &mut other.id),
            Field::DisplayName => swap_if_changed(&mut self.display_name, &mut other.display_name),
            Field::Category => swap_if_changed(&mut self.category, &mut other.category),
            Field::Data => swap_if_changed(&mut self.data, &mut other.data),
            Field::Metadata => swap_if_changed(&mut self.metadata, &mut other.metadata),
            Field::StudioUrl => swap_if_changed(&mut self.studio_url, &mut other.studio_url),
            Field::ChildInfo => swap_if_changed(&mut self.child_info, &mut other.child_info),
            Field::AncestorInfo => {
                swap_if_changed(&mut self.ancestor_info, &mut other.ancestor_info)
            }
            Field::HasChanges => swap_if_changed(&mut self.has_changes, &mut other.has_changes),
            Field::Published => swap_if_changed(&mut self.published, &mut other.published),
            Field::VisibleToStaffOnly => swap_if_changed(
                &mut self.visible_to_staff_only,
                &mut other.visible_to_staff_only,
            ),
            Field::EditedOn => swap_if_changed(&mut self.edited_on, &mut other.edited_on),
            Field::EditedBy => swap_if_changed(&mut self.edited_by, &mut other.edited_by),
            Field::PublishedOn => swap_if_changed(&mut self.published_on, &mut other.published_on),
            Field::PublishedBy => swap_if_changed(&mut self.published_by, &mut other.published_by),
            Field::ReleasedToStudents => swap_if_changed(
                &mut self.released_to_students,
                &mut other.released_to_students,
            ),
            Field::ReleaseDate => swap_if_changed(&mut self.release_date, &mut other.release_date),
            Field::ReleaseDateFrom => {
                swap_if_changed(&mut self.release_date_from, &mut other.release_date_from)
            }
        }
    }
}

impl<'de> Deserialize<'de> for NodeAttributes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let payload = Value::deserialize(deserializer)?;
        PayloadParser::default()
            .parse(payload)
            .map_err(serde::de::Error::custom)
    }
}

pub(crate) fn swap_if_changed<T: PartialEq>(current: &mut T, incoming: &mut T) -> bool {
    if current == incoming {
        return false;
    }
    std::mem::swap(current, incoming);
    true
}
