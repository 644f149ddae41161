//! Cursor-based revision history for a single refinement session.
//!
//! Index 0 is always the baseline (the last committed state) and the
//! sequence is never empty. Navigation only moves the cursor; `append`,
//! `commit` and `rollback` are the only operations that change the sequence.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Error, Result, Revision, TextDocument};

const DEFAULT_BASELINE_LABEL: &str = "Original version";

/// What happens to revisions after the cursor when a new one is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppendPolicy {
    /// Discard revisions after the cursor, then append.
    #[default]
    Truncate,
    /// Keep revisions after the cursor and append after the last one.
    Preserve,
}

/// Tunables for a [`RevisionHistory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Handling of revisions ahead of the cursor on append.
    pub append_policy: AppendPolicy,
    /// Upper bound on stored revisions; oldest non-baseline revisions are
    /// evicted first. Values below 2 are treated as 2.
    pub max_revisions: Option<usize>,
    /// Label given to the baseline produced by [`RevisionHistory::commit`].
    pub baseline_label: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            append_policy: AppendPolicy::Truncate,
            max_revisions: None,
            baseline_label: DEFAULT_BASELINE_LABEL.into(),
        }
    }
}

/// Ordered snapshots of a document plus the cursor selecting the current one.
///
/// Not internally synchronized; hosts sharing a history across threads must
/// serialize access (see [`crate::ffi::RefineSession`]).
#[derive(Debug, Clone)]
pub struct RevisionHistory {
    revisions: Vec<Revision>,
    cursor: usize,
    next_id: u64,
    config: HistoryConfig,
    clock: fn() -> i64,
}

#[allow(clippy::len_without_is_empty)]
impl RevisionHistory {
    /// Start a history whose baseline is `baseline`.
    pub fn new(baseline: TextDocument, label: impl Into<String>) -> Self {
        Self::with_config(baseline, label, HistoryConfig::default())
    }

    /// Start a history with explicit configuration.
    pub fn with_config(
        baseline: TextDocument,
        label: impl Into<String>,
        config: HistoryConfig,
    ) -> Self {
        Self::with_clock(baseline, label, config, system_millis)
    }

    /// Start a history that reads timestamps (unix milliseconds) from `clock`.
    pub fn with_clock(
        baseline: TextDocument,
        label: impl Into<String>,
        config: HistoryConfig,
        clock: fn() -> i64,
    ) -> Self {
        let baseline = Revision::new(0, baseline, clock(), label);
        Self {
            revisions: vec![baseline],
            cursor: 0,
            next_id: 1,
            config,
            clock,
        }
    }

    /// Record a new revision and move the cursor onto it.
    pub fn append(&mut self, content: TextDocument, label: impl Into<String>) -> &Revision {
        if self.config.append_policy == AppendPolicy::Truncate && self.can_redo() {
            debug!(
                cursor = self.cursor,
                discarded = self.revisions.len() - self.cursor - 1,
                "truncating revisions ahead of cursor"
            );
            self.revisions.truncate(self.cursor + 1);
        }

        let revision = Revision::new(self.allocate_id(), content, self.timestamp(), label);
        debug!(revision = revision.id, label = %revision.label, "appending revision");
        self.revisions.push(revision);
        self.evict_overflow();
        self.cursor = self.revisions.len() - 1;
        self.current()
    }

    /// Step the cursor back one revision.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AtBoundary`] when the cursor is on the baseline.
    pub fn undo(&mut self) -> Result<&Revision> {
        if !self.can_undo() {
            return Err(Error::AtBoundary { operation: "undo" });
        }
        self.cursor -= 1;
        debug!(cursor = self.cursor, len = self.revisions.len(), "undo");
        Ok(self.current())
    }

    /// Step the cursor forward one revision.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AtBoundary`] when the cursor is on the last revision.
    pub fn redo(&mut self) -> Result<&Revision> {
        if !self.can_redo() {
            return Err(Error::AtBoundary { operation: "redo" });
        }
        self.cursor += 1;
        debug!(cursor = self.cursor, len = self.revisions.len(), "redo");
        Ok(self.current())
    }

    /// Move the cursor to an arbitrary revision.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] when `index` is not a valid position.
    pub fn jump_to(&mut self, index: usize) -> Result<&Revision> {
        if index >= self.revisions.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.revisions.len(),
            });
        }
        self.cursor = index;
        debug!(cursor = self.cursor, len = self.revisions.len(), "jump");
        Ok(self.current())
    }

    /// Promote the current revision to be the new baseline.
    ///
    /// The history collapses to a single revision carrying the current
    /// content under the configured baseline label. Does nothing when no
    /// revision was appended since the last commit or rollback.
    pub fn commit(&mut self) -> &Revision {
        if !self.is_pending() {
            debug!("commit with nothing pending");
            return self.current();
        }

        let content = self.current().content.clone();
        let baseline = Revision::new(
            self.allocate_id(),
            content,
            self.timestamp(),
            self.config.baseline_label.clone(),
        );
        info!(
            revision = baseline.id,
            discarded = self.revisions.len(),
            "committed revision as new baseline"
        );
        self.revisions = vec![baseline];
        self.cursor = 0;
        self.current()
    }

    /// Discard every revision after the baseline and return to it.
    ///
    /// Does nothing when no revision was appended since the last commit or
    /// rollback.
    pub fn rollback(&mut self) -> &Revision {
        if self.is_pending() {
            info!(discarded = self.revisions.len() - 1, "rolled back to baseline");
            self.revisions.truncate(1);
        }
        self.cursor = 0;
        self.current()
    }

    /// Revision under the cursor.
    #[must_use]
    pub fn current(&self) -> &Revision {
        &self.revisions[self.cursor]
    }

    /// Revision at index 0.
    #[must_use]
    pub fn baseline(&self) -> &Revision {
        &self.revisions[0]
    }

    /// Most recently appended revision.
    #[must_use]
    pub fn latest(&self) -> &Revision {
        &self.revisions[self.revisions.len() - 1]
    }

    /// Revision at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Revision> {
        self.revisions.get(index)
    }

    /// All revisions in chronological order.
    #[must_use]
    pub fn revisions(&self) -> &[Revision] {
        &self.revisions
    }

    /// Zero-based cursor position.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of revisions; always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    /// Whether [`RevisionHistory::undo`] would succeed.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether [`RevisionHistory::redo`] would succeed.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.revisions.len()
    }

    /// Whether revisions exist beyond the baseline.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.revisions.len() > 1
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HistoryConfig {
        &self.config
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // Clamped so timestamps never decrease along the sequence.
    fn timestamp(&self) -> i64 {
        let now = (self.clock)();
        now.max(self.latest().created_at)
    }

    fn evict_overflow(&mut self) {
        let Some(max) = self.config.max_revisions else {
            return;
        };
        let max = max.max(2);
        if self.revisions.len() > max {
            let excess = self.revisions.len() - max;
            debug!(evicted = excess, "evicting oldest revisions");
            self.revisions.drain(1..=excess);
        }
    }
}

fn system_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}
