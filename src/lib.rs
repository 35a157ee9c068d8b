//! Content Tree - hierarchical course content model
//!
//! A course is a tree of content nodes (sections, subsections, units,
//! components). The content API returns each node as a JSON payload whose
//! children and ancestors are nested payloads of the same shape. This crate
//! materializes those payloads into typed [`ContentNode`]s up front and
//! notifies registered observers whenever a node changes.

pub mod config;
pub mod domain;
pub mod parse;

pub use config::{ConfigError, ModelConfig};
pub use domain::{
    AncestorInfo, ChildInfo, ContentNode, Field, NodeAttributes, NodeEvent, ObserverId,
    PublishAction, PublishStatus,
};
pub use parse::{Materialize, NestedEntry, ParseError, PayloadParser};
