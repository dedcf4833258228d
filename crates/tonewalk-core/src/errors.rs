//! Structured error types shared across tonewalk crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error code raised when a sampling step has no candidates to choose from.
pub const EMPTY_NEIGHBOR_SET: &str = "empty-neighbor-set";

/// Structured payload attached to every [`TwError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (state indices, lengths, paths).
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
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for tonewalk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum TwError {
    /// Transition graph construction and lookup errors.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Random sampling errors (empty candidate sets).
    #[error("sampling error: {0}")]
    Sampling(ErrorInfo),
    /// Invalid configuration or caller supplied values.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization, schema and file I/O errors.
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

impl TwError {
    /// Builds the error returned when `state` has no candidate successor for `operation`.
    ///
    /// The graph is treated as misconfigured; callers should not retry.
    pub fn empty_neighbor_set(state: impl Display, operation: &str) -> Self {
        TwError::Sampling(
            ErrorInfo::new(EMPTY_NEIGHBOR_SET, "no candidate states to sample from")
                .with_context("state", state.to_string())
                .with_context("operation", operation)
                .with_hint("check that the transition graph preset name is recognised"),
        )
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            TwError::Graph(info)
            | TwError::Sampling(info)
            | TwError::Config(info)
            | TwError::Serde(info) => info,
        }
    }

    /// Returns `true` when the error reports an empty sampling domain.
    pub fn is_empty_neighbor_set(&self) -> bool {
        matches!(self, TwError::Sampling(info) if info.code == EMPTY_NEIGHBOR_SET)
    }
}
