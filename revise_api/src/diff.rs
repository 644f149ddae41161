use serde::{Deserialize, Serialize};

/// One aligned row of a positional comparison between two documents.
///
/// Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiffLine {
    /// Identical line present at the same position in both documents.
    Unchanged {
        /// Line number shared by both sides.
        line: u32,
        /// Text of the line.
        text: String,
    },
    /// Line present only in the modified document.
    Added {
        /// Line number on the modified side.
        modified_line: u32,
        /// Text of the added line.
        text: String,
    },
    /// Line present only in the original document.
    Deleted {
        /// Line number on the original side.
        original_line: u32,
        /// Text of the deleted line.
        text: String,
    },
    /// Both documents have a line at this position but the text differs.
    Modified {
        /// Line number on the original side.
        original_line: u32,
        /// Line number on the modified side.
        modified_line: u32,
        /// Text on the original side.
        original_text: String,
        /// Text on the modified side.
        modified_text: String,
    },
}

impl DiffLine {
    /// Classification of the row without its payload.
    #[must_use]
    pub const fn kind(&self) -> DiffLineKind {
        match self {
            Self::Unchanged { .. } => DiffLineKind::Unchanged,
            Self::Added { .. } => DiffLineKind::Added,
            Self::Deleted { .. } => DiffLineKind::Deleted,
            Self::Modified { .. } => DiffLineKind::Modified,
        }
    }

    /// Whether the row represents any kind of change.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged { .. })
    }

    /// Line number displayed in the gutter of the given pane.
    #[must_use]
    pub const fn line_number(&self, side: DiffSide) -> Option<u32> {
        match (self, side) {
            (Self::Unchanged { line, .. }, _) => Some(*line),
            (Self::Added { modified_line, .. }, DiffSide::Modified)
            | (Self::Modified { modified_line, .. }, DiffSide::Modified) => Some(*modified_line),
            (Self::Deleted { original_line, .. }, DiffSide::Original)
            | (Self::Modified { original_line, .. }, DiffSide::Original) => Some(*original_line),
            (Self::Added { .. }, DiffSide::Original) | (Self::Deleted { .. }, DiffSide::Modified) => {
                None
            }
        }
    }

    /// Text displayed in the given pane, if the row exists on that side.
    #[must_use]
    pub fn text(&self, side: DiffSide) -> Option<&str> {
        match (self, side) {
            (Self::Unchanged { text, .. }, _)
            | (Self::Added { text, .. }, DiffSide::Modified)
            | (Self::Deleted { text, .. }, DiffSide::Original) => Some(text),
            (Self::Modified { original_text, .. }, DiffSide::Original) => Some(original_text),
            (Self::Modified { modified_text, .. }, DiffSide::Modified) => Some(modified_text),
            (Self::Added { .. }, DiffSide::Original) | (Self::Deleted { .. }, DiffSide::Modified) => {
                None
            }
        }
    }

    /// Gutter marker for the given pane (`-`, `+` or `~`).
    #[must_use]
    pub const fn marker(&self, side: DiffSide) -> Option<char> {
        match (self, side) {
            (Self::Deleted { .. }, DiffSide::Original) => Some('-'),
            (Self::Added { .. }, DiffSide::Modified) => Some('+'),
            (Self::Modified { .. }, _) => Some('~'),
            _ => None,
        }
    }
}

/// Classification of a [`DiffLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffLineKind {
    /// Same text on both sides.
    Unchanged,
    /// Only present in the modified document.
    Added,
    /// Only present in the original document.
    Deleted,
    /// Present on both sides with different text.
    Modified,
}

/// Pane of a side-by-side comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffSide {
    /// Left pane showing the baseline.
    Original,
    /// Right pane showing the selected revision.
    Modified,
}

/// Per-kind row counts for a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DiffStats {
    /// Rows identical on both sides.
    pub unchanged: u32,
    /// Rows only present in the modified document.
    pub added: u32,
    /// Rows only present in the original document.
    pub deleted: u32,
    /// Rows whose text differs.
    pub modified: u32,
}

impl DiffStats {
    /// A stats instance with every count at zero.
    pub const ZERO: Self = Self {
        unchanged: 0,
        added: 0,
        deleted: 0,
        modified: 0,
    };

    /// Tally the rows of an already computed comparison.
    #[must_use]
    pub fn from_lines(lines: &[DiffLine]) -> Self {
        lines.iter().fold(Self::ZERO, |stats, line| stats.record(line.kind()))
    }

    /// Return a copy with one more row of the given kind.
    #[must_use]
    pub const fn record(self, kind: DiffLineKind) -> Self {
        let mut next = self;
        match kind {
            DiffLineKind::Unchanged => next.unchanged += 1,
            DiffLineKind::Added => next.added += 1,
            DiffLineKind::Deleted => next.deleted += 1,
            DiffLineKind::Modified => next.modified += 1,
        }
        next
    }

    /// Number of rows that are not unchanged.
    #[must_use]
    pub const fn changes(self) -> u32 {
        self.added + self.deleted + self.modified
    }

    /// Whether the two compared documents were identical.
    #[must_use]
    pub const fn is_identical(self) -> bool {
        self.changes() == 0
    }
}
