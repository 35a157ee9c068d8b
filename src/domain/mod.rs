//! Domain model for course content trees
//!
//! Contains the node model and its derived state, without any I/O concerns.

mod attributes;
mod events;
mod info;
mod node;
mod publish;
mod release;

pub use attributes::{Field, NodeAttributes};
pub use events::{NodeEvent, Observer, ObserverId};
pub use info::{AncestorInfo, ChildInfo};
pub use node::{ContentNode, Descendants};
pub use publish::{PublishAction, PublishStatus};
pub use release::{ReleaseSource, ReleaseSummary, ReleaseTitle};
