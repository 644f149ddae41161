use serde::{Deserialize, Serialize};

use crate::document::TextDocument;

/// Immutable snapshot of a document at one point in a revision history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    /// Identifier assigned by the owning history; never reused within it.
    pub id: u64,
    /// Document content captured by this revision.
    pub content: TextDocument,
    /// Unix timestamp (milliseconds) when the revision was created.
    pub created_at: i64,
    /// Human-readable description of what produced the revision.
    pub label: String,
}

impl Revision {
    /// Construct a revision from its parts.
    pub fn new(id: u64, content: TextDocument, created_at: i64, label: impl Into<String>) -> Self {
        Self {
            id,
            content,
            created_at,
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_round_trip() {
        let revision = Revision::new(
            3,
            TextDocument::from_text("Sub Main()\nEnd Sub"),
            1_700_000_000_000,
            "Added error handling",
        );

        let json = serde_json::to_string(&revision).expect("serialize revision");
        let decoded: Revision = serde_json::from_str(&json).expect("deserialize revision");
        assert_eq!(revision, decoded);
    }

    #[test]
    fn revision_fields_use_snake_case() {
        let revision = Revision::new(0, TextDocument::from_text(""), 42, "Original version");
        let json = serde_json::to_string(&revision).expect("serialize revision");
        assert!(json.contains("\"created_at\":42"));
    }
}
