//! Publishing state and publish commands
//!
//! A publish request is a one-shot command sent to observers, not an
//! attribute of the node. [`PublishStatus`] is derived from the node's
//! stored flags.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Publish command a view layer forwards to the content endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishAction {
    /// Publish the draft for the first time
    MakePublic,
    /// Publish pending changes over an existing published version
    Republish,
    /// Throw away the draft and revert to the published version
    DiscardChanges,
}

impl PublishAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishAction::MakePublic => "make_public",
            PublishAction::Republish => "republish",
            PublishAction::DiscardChanges => "discard_changes",
        }
    }

    /// Request body understood by the node's update endpoint
    pub fn request_body(&self) -> Value {
        json!({ "publish": self.as_str() })
    }
}

impl std::fmt::Display for PublishAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PublishAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "make_public" | "publish" => Ok(PublishAction::MakePublic),
            "republish" => Ok(PublishAction::Republish),
            "discard_changes" | "discard" => Ok(PublishAction::DiscardChanges),
            _ => Err(format!("Unknown publish action: {}", s)),
        }
    }
}

/// Publishing state shown to authors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    /// Published and identical to the draft
    Published,
    /// Published, with unpublished changes in the draft
    Draft,
    /// Never published
    NeverPublished,
    /// Locked to staff, regardless of publish state
    StaffOnly,
}

impl PublishStatus {
    /// Derives the status from stored flags. Missing flags count as false.
    pub fn from_flags(published: bool, has_changes: bool, staff_only: bool) -> Self {
        if staff_only {
            PublishStatus::StaffOnly
        } else if !published {
            PublishStatus::NeverPublished
        } else if has_changes {
            PublishStatus::Draft
        } else {
            PublishStatus::Published
        }
    }

    /// Sidebar title for this status
    pub fn title(&self) -> &'static str {
        match self {
            PublishStatus::Published => "Published",
            PublishStatus::Draft => "Draft (Unpublished changes)",
            PublishStatus::NeverPublished => "Draft (Never published)",
            PublishStatus::StaffOnly => "Unpublished (Staff only)",
        }
    }

    /// Returns true if students can currently see the published version
    pub fn is_live(&self) -> bool {
        matches!(self, PublishStatus::Published | PublishStatus::Draft)
    }

    /// The publish action that applies in this state, if any
    pub fn pending_action(&self) -> Option<PublishAction> {
        match self {
            PublishStatus::Published => None,
            PublishStatus::Draft => Some(PublishAction::Republish),
            PublishStatus::NeverPublished => Some(PublishAction::MakePublic),
            PublishStatus::StaffOnly => None,
        }
    }
}

impl std::fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishStatus::Published => write!(f, "published"),
            PublishStatus::Draft => write!(f, "draft"),
            PublishStatus::NeverPublished => write!(f, "never_published"),
            PublishStatus::StaffOnly => write!(f, "staff_only"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_lock_wins() {
        assert_eq!(PublishStatus::from_flags(true, false, true), PublishStatus::StaffOnly);
        assert_eq!(PublishStatus::from_flags(false, true, true), PublishStatus::StaffOnly);
    }

    #[test]
    fn status_precedence() {
        assert_eq!(PublishStatus::from_flags(false, true, false), PublishStatus::NeverPublished);
        assert_eq!(PublishStatus::from_flags(true, true, false), PublishStatus::Draft);
        assert_eq!(PublishStatus::from_flags(true, false, false), PublishStatus::Published);
    }

    #[test]
    fn titles() {
        assert_eq!(PublishStatus::Published.title(), "Published");
        assert_eq!(PublishStatus::Draft.title(), "Draft (Unpublished changes)");
        assert_eq!(PublishStatus::StaffOnly.title(), "Unpublished (Staff only)");
    }

    #[test]
    fn pending_action() {
        assert_eq!(PublishStatus::Draft.pending_action(), Some(PublishAction::Republish));
        assert_eq!(PublishStatus::NeverPublished.pending_action(), Some(PublishAction::MakePublic));
        assert_eq!(PublishStatus::Published.pending_action(), None);
    }

    #[test]
    fn request_body() {
        assert_eq!(
            PublishAction::DiscardChanges.request_body(),
            json!({"publish": "discard_changes"})
        );
    }

    #[test]
    fn parse_action() {
        assert_eq!("publish".parse::<PublishAction>().unwrap(), PublishAction::MakePublic);
        assert_eq!("DISCARD".parse::<PublishAction>().unwrap(), PublishAction::DiscardChanges);
        assert!("delete".parse::<PublishAction>().is_err());
    }
}
