//! Structural errors raised while parsing a request description.
//!
//! Errors are built at the leaf that failed and gain one path segment per
//! composite they bubble through, so the path is always complete by the
//! time it reaches the caller. Text is produced only by `Display`.

use std::fmt;
use thiserror::Error;

/// Ordered field names from the outermost composite to the failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<&'static str>);

impl FieldPath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[&'static str] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Prepend a segment as the error leaves a composite.
    fn push_front(&mut self, field: &'static str) {
        self.0.insert(0, field);
    }

    /// Split into the parent path and the last segment.
    fn split_last(&self) -> Option<(&'static str, &[&'static str])> {
        self.0.split_last().map(|(last, parent)| (*last, parent))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        f.write_str(&self.0.join(":"))
    }
}

impl From<Vec<&'static str>> for FieldPath {
    fn from(segments: Vec<&'static str>) -> Self {
        Self(segments)
    }
}

/// Why a description could not be turned into an encodable tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A required field was absent.
    #[error("{}", missing_message(.path))]
    MissingField { path: FieldPath },

    /// A field was present but its value is malformed.
    #[error("invalid value at {path}: {reason}")]
    InvalidValue { path: FieldPath, reason: String },

    /// The operation name is not in the registry.
    #[error("unsupported operation '{name}'")]
    UnsupportedOperation { name: String, path: FieldPath },
}

fn missing_message(path: &FieldPath) -> String {
    match path.split_last() {
        None => "attribute is missing".to_string(),
        Some((name, [])) => format!("attribute '{}' is missing", name),
        Some((name, parent)) => {
            format!("attribute '{}' is missing from {}", name, parent.join(":"))
        }
    }
}

impl ParseError {
    pub fn missing() -> Self {
        ParseError::MissingField {
            path: FieldPath::new(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        ParseError::InvalidValue {
            path: FieldPath::new(),
            reason: reason.into(),
        }
    }

    pub fn unsupported(name: impl Into<String>) -> Self {
        ParseError::UnsupportedOperation {
            name: name.into(),
            path: FieldPath::new(),
        }
    }

    /// Record that the error happened inside `field`.
    pub fn within(mut self, field: &'static str) -> Self {
        match &mut self {
            ParseError::MissingField { path }
            | ParseError::InvalidValue { path, .. }
            | ParseError::UnsupportedOperation { path, .. } => path.push_front(field),
        }
        self
    }

    pub fn path(&self) -> &FieldPath {
        match self {
            ParseError::MissingField { path }
            | ParseError::InvalidValue { path, .. }
            | ParseError::UnsupportedOperation { path, .. } => path,
        }
    }
}
