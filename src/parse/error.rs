use thiserror::Error;

/// Failure to build a content node from a payload
///
/// Every variant carries the location of the offending value, written as
/// a path from the payload root (e.g. `$.child_info.children[1]`).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Expected an object at {path}, found {found}")]
    NotAnObject { path: String, found: &'static str },

    #[error("Expected a sequence at {path}, found {found}")]
    NotASequence { path: String, found: &'static str },

    #[error("Invalid attributes at {path}: {source}")]
    InvalidAttributes {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown field '{field}' at {path}")]
    UnknownField { path: String, field: String },

    #[error("Payload nesting exceeds {max_depth} levels at {path}")]
    TooDeep { path: String, max_depth: usize },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParseError {
    /// Location of the failure, if it has one
    pub fn path(&self) -> Option<&str> {
        match self {
            ParseError::NotAnObject { path, .. }
            | ParseError::NotASequence { path, .. }
            | ParseError::InvalidAttributes { path, .. }
            | ParseError::UnknownField { path, .. }
            | ParseError::TooDeep { path, .. } => Some(path),
            ParseError::Json(_) => None,
        }
    }
}
