mod error;
mod session;

pub use error::CoreError;
pub use session::{compute_diff, open, RefineSession};

#[allow(
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc,
    clippy::empty_line_after_doc_comments,
    clippy::missing_safety_doc
)]
mod scaffolding {
    use super::{compute_diff, open, CoreError, RefineSession};
    use crate::{DiffLine, DiffStats, RefinerSummary, Revision, TextDocument};

    uniffi::include_scaffolding!("revise_core");
}

pub use scaffolding::*;
