//! Registry keeping track of available refiners.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{Refiner, RefinerSummary};

/// In-memory registry for refiners.
#[derive(Default)]
pub struct RefinerRegistry {
    refiners: HashMap<&'static str, Arc<dyn Refiner>>,
}

impl RefinerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a refiner keyed by its `Refiner::id`.
    pub fn register<R>(&mut self, refiner: R)
    where
        R: Refiner + 'static,
    {
        self.register_arc(Arc::new(refiner));
    }

    /// Register an already shared refiner.
    pub fn register_arc(&mut self, refiner: Arc<dyn Refiner>) {
        self.refiners.insert(refiner.id(), refiner);
    }

    /// Retrieve a refiner by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn Refiner>> {
        self.refiners.get(id).cloned()
    }

    /// Returns the registered refiner identifiers.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.refiners.keys().copied()
    }

    /// Summaries for every registered refiner, sorted by id.
    #[must_use]
    pub fn summaries(&self) -> Vec<RefinerSummary> {
        let mut summaries: Vec<RefinerSummary> = self
            .refiners
            .values()
            .map(|refiner| RefinerSummary {
                id: refiner.id().to_owned(),
                label: refiner.label().to_owned(),
            })
            .collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        summaries
    }
}

impl std::fmt::Debug for RefinerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&str> = self.ids().collect();
        ids.sort_unstable();
        f.debug_struct("RefinerRegistry").field("refiners", &ids).finish()
    }
}
