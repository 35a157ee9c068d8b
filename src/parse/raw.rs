use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{NodeAttributes, ReleaseSource};

/// Scalar attributes of one payload, before nested lists are materialized
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawAttributes {
    id: Option<String>,
    display_name: Option<String>,
    category: Option<String>,
    data: Option<Value>,
    metadata: Option<Value>,
    studio_url: Option<String>,
    has_changes: Option<bool>,
    published: Option<bool>,
    visible_to_staff_only: Option<bool>,
    edited_on: Option<DateTime<Utc>>,
    edited_by: Option<String>,
    published_on: Option<DateTime<Utc>>,
    published_by: Option<String>,
    released_to_students: Option<bool>,
    release_date: Option<DateTime<Utc>>,
    release_date_from: Option<ReleaseSource>,
}

impl RawAttributes {
    /// Attribute set with no children or ancestors yet
    pub(super) fn into_attributes(self) -> NodeAttributes {
        NodeAttributes {
            id: self.id,
            display_name: self.display_name,
            category: self.category,
            data: self.data,
            metadata: self.metadata,
            studio_url: self.studio_url,
            child_info: None,
            ancestor_info: None,
            has_changes: self.has_changes,
            published: self.published,
            visible_to_staff_only: self.visible_to_staff_only,
            edited_on: self.edited_on,
            edited_by: self.edited_by,
            published_on: self.published_on,
            published_by: self.published_by,
            released_to_students: self.released_to_students,
            release_date: self.release_date,
            release_date_from: self.release_date_from,
        }
    }
}
