use serde::{Deserialize, Serialize};

use revise_api::TextDocument;
use revise_refiner_api::{Refinement, Refiner, RefinerResult};

/// Options for [`AnnotationRefiner`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationOptions {
    /// Line comment token of the document's language, including trailing space.
    pub comment_prefix: String,
    /// Note appended as a comment; also used as the revision label.
    pub note: String,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            comment_prefix: "' ".into(),
            note: "Added error handling".into(),
        }
    }
}

/// Local refiner that appends a comment note after a blank line.
///
/// Stands in for an assistant pass when no external refiner is configured.
#[derive(Debug, Clone, Default)]
pub struct AnnotationRefiner {
    options: AnnotationOptions,
}

impl AnnotationRefiner {
    /// Construct a refiner with explicit options.
    #[must_use]
    pub const fn new(options: AnnotationOptions) -> Self {
        Self { options }
    }
}

impl Refiner for AnnotationRefiner {
    fn id(&self) -> &'static str {
        "annotate"
    }

    fn label(&self) -> &'static str {
        "Annotate"
    }

    fn refine(&self, document: &TextDocument) -> RefinerResult<Refinement> {
        let mut lines = document.lines().to_vec();
        lines.push(String::new());
        lines.push(format!("{}{}", self.options.comment_prefix, self.options.note));

        Ok(Refinement::new(
            TextDocument::from_lines(lines),
            self.options.note.clone(),
        ))
    }
}
