use std::sync::Arc;

use tracing::info;

use super::{
    default_registry, Refinement, Refiner, RefinerRegistry, RefinerResult, RefinerSummary,
};
use crate::history::RevisionHistory;
use crate::{Error, Result, Revision, TextDocument};

/// High-level façade for running refiners against a revision history.
#[derive(Clone)]
pub struct RefinerService {
    registry: Arc<RefinerRegistry>,
}

impl RefinerService {
    /// Create a refiner service backed by the provided registry.
    #[must_use]
    pub fn new(registry: RefinerRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Access the underlying registry.
    #[must_use]
    pub fn registry(&self) -> Arc<RefinerRegistry> {
        Arc::clone(&self.registry)
    }

    /// List summaries for all registered refiners.
    #[must_use]
    pub fn summaries(&self) -> Vec<RefinerSummary> {
        self.registry.summaries()
    }

    /// Refine the current revision and append the result to `history`.
    ///
    /// The cursor moves onto the new revision, following the history's
    /// append policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RefinerNotRegistered`] when the id is unknown or
    /// [`Error::Refiner`] when the refiner fails; the history is left untouched.
    pub fn refine<'h>(
        &self,
        refiner_id: &str,
        history: &'h mut RevisionHistory,
    ) -> Result<&'h Revision> {
        let refinement = self.run(refiner_id, &history.current().content)?;
        Ok(history.append(refinement.content, refinement.label))
    }

    /// Run a refiner on `document` without touching any history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RefinerNotRegistered`] when the id is unknown or
    /// [`Error::Refiner`] when the refiner fails.
    pub fn run(&self, refiner_id: &str, document: &TextDocument) -> Result<Refinement> {
        let refiner = self.refiner(refiner_id)?;
        let refinement = Self::invoke(refiner_id, refiner.refine(document))?;
        info!(refiner = refiner_id, label = %refinement.label, "refinement produced");
        Ok(refinement)
    }

    fn refiner(&self, refiner_id: &str) -> Result<Arc<dyn Refiner>> {
        self.registry
            .get(refiner_id)
            .ok_or_else(|| Error::RefinerNotRegistered {
                refiner: refiner_id.to_string(),
            })
    }

    fn invoke<T>(refiner_id: &str, result: RefinerResult<T>) -> Result<T> {
        result.map_err(|source| Error::Refiner {
            refiner: refiner_id.to_string(),
            source,
        })
    }
}

impl Default for RefinerService {
    fn default() -> Self {
        Self::new(default_registry())
    }
}

impl std::fmt::Debug for RefinerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefinerService")
            .field("registry", &self.registry)
            .finish()
    }
}
