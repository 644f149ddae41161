use serde::{Deserialize, Serialize};

use revise_api::TextDocument;

/// Output of a refiner: the new document and a description for the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refinement {
    /// Refined document content.
    pub content: TextDocument,
    /// Label recorded on the revision created from this refinement.
    pub label: String,
}

impl Refinement {
    /// Construct a refinement.
    #[must_use]
    pub fn new(content: TextDocument, label: impl Into<String>) -> Self {
        Self {
            content,
            label: label.into(),
        }
    }
}

/// Summary information about a registered refiner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinerSummary {
    /// Stable identifier for the refiner.
    pub id: String,
    /// Human-friendly label for display.
    pub label: String,
}

/// Errors surfaced by refiners.
#[derive(Debug, thiserror::Error)]
pub enum RefinerError {
    /// The refiner did not finish within its time budget.
    #[error("refiner timed out after {after_secs}s")]
    Timeout {
        /// Budget that was exceeded, in seconds.
        after_secs: u64,
    },
    /// Generic failure surfaced by the refiner.
    #[error("{message}")]
    Failure {
        /// Human-readable error message.
        message: String,
    },
}

impl RefinerError {
    /// Helper to construct a failure from any displayable message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }
}

/// Convenience result alias for refiner operations.
pub type RefinerResult<T> = std::result::Result<T, RefinerError>;
