//! Structured error types shared across hgr crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`HgrError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (identifiers, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the hgr engine.
///
/// Every variant is fatal at the layer that raises it: graph construction,
/// clustering and propagation never continue with a best-effort guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum HgrError {
    /// A weight vector does not match the configured dimension.
    #[error("dimension error: {0}")]
    Dimension(ErrorInfo),
    /// A hyperedge has fewer than two distinct members or references a missing node.
    #[error("invalid edge: {0}")]
    InvalidEdge(ErrorInfo),
    /// Unknown identifiers or illegal structural mutations.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// A partition result does not fit the graph it is evaluated against.
    #[error("partition error: {0}")]
    Partition(ErrorInfo),
    /// Malformed clustering supplied to a child graph constructor.
    #[error("clustering error: {0}")]
    Clustering(ErrorInfo),
    /// Results cannot be moved between hierarchy levels.
    #[error("propagation error: {0}")]
    Propagation(ErrorInfo),
    /// Filesystem failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Malformed or truncated text input.
    #[error("format error: {0}")]
    Format(ErrorInfo),
    /// Serialization and configuration errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl HgrError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HgrError::Dimension(info)
            | HgrError::InvalidEdge(info)
            | HgrError::Graph(info)
            | HgrError::Partition(info)
            | HgrError::Clustering(info)
            | HgrError::Propagation(info)
            | HgrError::Io(info)
            | HgrError::Format(info)
            | HgrError::Serde(info) => info,
        }
    }

    /// Returns the stable code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Attaches a context entry to the payload regardless of the variant.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        self.map_info(|info| info.with_context(key, value))
    }

    /// Attaches a remediation hint regardless of the variant.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        self.map_info(|info| info.with_hint(hint))
    }

    fn map_info(self, f: impl FnOnce(ErrorInfo) -> ErrorInfo) -> Self {
        match self {
            HgrError::Dimension(info) => HgrError::Dimension(f(info)),
            HgrError::InvalidEdge(info) => HgrError::InvalidEdge(f(info)),
            HgrError::Graph(info) => HgrError::Graph(f(info)),
            HgrError::Partition(info) => HgrError::Partition(f(info)),
            HgrError::Clustering(info) => HgrError::Clustering(f(info)),
            HgrError::Propagation(info) => HgrError::Propagation(f(info)),
            HgrError::Io(info) => HgrError::Io(f(info)),
            HgrError::Format(info) => HgrError::Format(f(info)),
            HgrError::Serde(info) => HgrError::Serde(f(info)),
        }
    }
}

impl From<std::io::Error> for HgrError {
    fn from(err: std::io::Error) -> Self {
        HgrError::Io(
            ErrorInfo::new("io", err.to_string()).with_context("kind", format!("{:?}", err.kind())),
        )
    }
}

/// Builds a [`HgrError::Dimension`] describing a length mismatch.
pub fn dimension_mismatch(what: &str, expected: usize, actual: usize) -> HgrError {
    HgrError::Dimension(
        ErrorInfo::new("dimension-mismatch", format!("{what} has the wrong dimension"))
            .with_context("expected", expected)
            .with_context("actual", actual),
    )
}
