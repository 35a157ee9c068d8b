//! Release date information
//!
//! A node's release date is usually inherited from an enclosing section or
//! subsection. `release_date_from` points back at that node so authors can
//! see where the date comes from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Back-reference to the node that determines a release date
///
/// Older payloads send only the display name of that node; newer ones send
/// a small object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReleaseSource {
    Name(String),
    Node {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
    },
}

impl ReleaseSource {
    pub fn display_name(&self) -> Option<&str> {
        match self {
            ReleaseSource::Name(name) => Some(name),
            ReleaseSource::Node { display_name, .. } => display_name.as_deref(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            ReleaseSource::Name(_) => None,
            ReleaseSource::Node { id, .. } => id.as_deref(),
        }
    }

    /// Author-facing label for the source's category
    pub fn label(&self) -> &str {
        match self {
            ReleaseSource::Name(_) => "Section",
            ReleaseSource::Node { category, .. } => match category.as_deref() {
                Some("chapter") | None => "Section",
                Some("sequential") => "Subsection",
                Some("vertical") => "Unit",
                Some(other) => other,
            },
        }
    }
}

/// Whether the release date has passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseTitle {
    Released,
    Scheduled,
}

impl ReleaseTitle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseTitle::Released => "RELEASED:",
            ReleaseTitle::Scheduled => "SCHEDULED:",
        }
    }
}

/// Release information as shown in the publishing sidebar
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSummary {
    pub title: ReleaseTitle,
    pub date: DateTime<Utc>,
    pub source: Option<ReleaseSource>,
}

impl ReleaseSummary {
    /// Formats the release date, e.g. `Jan 01, 1970 at 00:00 UTC`
    pub fn date_text(&self) -> String {
        self.date.format("%b %d, %Y at %H:%M UTC").to_string()
    }
}

impl fmt::Display for ReleaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date_text())?;
        if let Some(source) = &self.source {
            if let Some(name) = source.display_name() {
                write!(f, " with {} \"{}\"", source.label(), name)?;
            }
        }
        Ok(())
    }
}
