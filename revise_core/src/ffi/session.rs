use std::sync::{Arc, Mutex};

use crate::{
    diff::DiffEngine, history::RevisionHistory, refiners::RefinerService, DiffLine, DiffStats,
    RefinerSummary, Revision, TextDocument,
};

use super::CoreError;

type Result<T> = std::result::Result<T, CoreError>;

/// High-level handle exposed to Swift via `UniFFI`.
///
/// Wraps one [`RevisionHistory`] behind a mutex so every call on a session
/// is serialized.
#[derive(Debug)]
pub struct RefineSession {
    history: Arc<Mutex<RevisionHistory>>,
    refiners: RefinerService,
    diff_engine: DiffEngine,
}

impl RefineSession {
    /// Construct a session around an existing history.
    #[must_use]
    pub fn new(history: RevisionHistory, refiners: RefinerService) -> Self {
        Self {
            history: Arc::new(Mutex::new(history)),
            refiners,
            diff_engine: DiffEngine::new(),
        }
    }

    /// Revision under the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error when the history lock is poisoned.
    pub fn current(&self) -> Result<Revision> {
        self.with_history(|history| Ok(history.current().clone()))
    }

    /// All revisions in chronological order.
    ///
    /// # Errors
    ///
    /// Returns an error when the history lock is poisoned.
    pub fn revisions(&self) -> Result<Vec<Revision>> {
        self.with_history(|history| Ok(history.revisions().to_vec()))
    }

    /// Zero-based cursor position.
    ///
    /// # Errors
    ///
    /// Returns an error when the history lock is poisoned.
    pub fn cursor(&self) -> Result<u32> {
        self.with_history(|history| Ok(u32::try_from(history.cursor()).unwrap_or(u32::MAX)))
    }

    /// Append an edited document and select it.
    ///
    /// # Errors
    ///
    /// Returns an error when the history lock is poisoned.
    pub fn append(&self, text: String, label: String) -> Result<Revision> {
        let mut history = self.history.lock().map_err(CoreError::from)?;
        Ok(history.append(TextDocument::from(text), label).clone())
    }

    /// Step back one revision.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AtBoundary`] on the baseline.
    pub fn undo(&self) -> Result<Revision> {
        let mut history = self.history.lock().map_err(CoreError::from)?;
        history.undo().cloned().map_err(CoreError::from)
    }

    /// Step forward one revision.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AtBoundary`] on the latest revision.
    pub fn redo(&self) -> Result<Revision> {
        let mut history = self.history.lock().map_err(CoreError::from)?;
        history.redo().cloned().map_err(CoreError::from)
    }

    /// Select the revision at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IndexOutOfRange`] for an invalid index.
    pub fn jump_to(&self, index: u32) -> Result<Revision> {
        let index = usize::try_from(index).unwrap_or(usize::MAX);
        let mut history = self.history.lock().map_err(CoreError::from)?;
        history.jump_to(index).cloned().map_err(CoreError::from)
    }

    /// Apply the session: the current revision becomes the new baseline.
    ///
    /// # Errors
    ///
    /// Returns an error when the history lock is poisoned.
    pub fn commit(&self) -> Result<Revision> {
        let mut history = self.history.lock().map_err(CoreError::from)?;
        Ok(history.commit().clone())
    }

    /// Cancel the session and return to the baseline.
    ///
    /// # Errors
    ///
    /// Returns an error when the history lock is poisoned.
    pub fn rollback(&self) -> Result<Revision> {
        let mut history = self.history.lock().map_err(CoreError::from)?;
        Ok(history.rollback().clone())
    }

    /// Compare the baseline against the current revision.
    ///
    /// # Errors
    ///
    /// Returns an error when the history lock is poisoned.
    pub fn diff_from_baseline(&self) -> Result<Vec<DiffLine>> {
        self.with_history(|history| {
            Ok(self
                .diff_engine
                .compute(&history.baseline().content, &history.current().content))
        })
    }

    /// Row counts for the baseline/current comparison.
    ///
    /// # Errors
    ///
    /// Returns an error when the history lock is poisoned.
    pub fn stats_from_baseline(&self) -> Result<DiffStats> {
        self.with_history(|history| {
            Ok(self
                .diff_engine
                .stats(&history.baseline().content, &history.current().content))
        })
    }

    /// Unified patch from the baseline to the current revision.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Patch`] when rendering fails.
    pub fn unified_patch(&self, path: String) -> Result<String> {
        self.with_history(|history| {
            self.diff_engine
                .unified_patch(&path, &history.baseline().content, &history.current().content)
                .map_err(CoreError::from)
        })
    }

    /// Refiners available to this session.
    #[must_use]
    pub fn refiners(&self) -> Vec<RefinerSummary> {
        self.refiners.summaries()
    }

    /// Run a refiner on the current revision and append its output.
    ///
    /// The history lock is released while the refiner runs, so other calls on
    /// the session proceed. The output is appended at whatever revision is
    /// current once the refiner returns.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RefinerNotRegistered`] or [`CoreError::Refiner`].
    pub fn refine(&self, refiner_id: String) -> Result<Revision> {
        let document = self.with_history(|history| Ok(history.current().content.clone()))?;
        let refinement = self
            .refiners
            .run(&refiner_id, &document)
            .map_err(CoreError::from)?;

        let mut history = self.history.lock().map_err(CoreError::from)?;
        Ok(history.append(refinement.content, refinement.label).clone())
    }

    fn with_history<F, T>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&RevisionHistory) -> Result<T>,
    {
        let history = self.history.lock().map_err(CoreError::from)?;
        op(&history)
    }
}

/// Open a refinement session via the `UniFFI` namespace function.
#[must_use]
pub fn open(text: String, label: String) -> Arc<RefineSession> {
    let history = RevisionHistory::new(TextDocument::from(text), label);
    Arc::new(RefineSession::new(history, RefinerService::default()))
}

/// Compare two raw texts via the `UniFFI` namespace function.
#[must_use]
pub fn compute_diff(original: String, modified: String) -> Vec<DiffLine> {
    DiffEngine::new().diff_texts(&original, &modified)
}
