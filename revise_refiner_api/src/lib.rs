//! Interfaces implemented by document refiners.

mod registry;
mod types;

pub use registry::RefinerRegistry;
pub use types::{Refinement, RefinerError, RefinerResult, RefinerSummary};

use revise_api::TextDocument;

/// Producer of a new document revision from the current one (e.g. an
/// assistant pass or an external formatter).
pub trait Refiner: Send + Sync {
    /// Stable identifier used for lookup and logging.
    fn id(&self) -> &'static str;

    /// Human-friendly label for UI surfaces.
    fn label(&self) -> &'static str;

    /// Produce the refined document.
    ///
    /// # Errors
    ///
    /// Implementors should surface any failure to produce new content.
    fn refine(&self, document: &TextDocument) -> RefinerResult<Refinement>;
}
