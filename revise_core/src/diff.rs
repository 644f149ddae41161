//! Positional diff generation and patch export.
//!
//! Rows are aligned by line index, not by a longest-common-subsequence
//! search: inserting a line at the top reports every following line as
//! modified. Rendering depends on this alignment.

use std::path::Path;

use git2::{DiffOptions, Patch};

use crate::{DiffLine, DiffStats, Result, TextDocument};

const DEFAULT_CONTEXT_LINES: u32 = 3;

/// Entry point for comparing two documents.
#[derive(Debug, Clone, Copy)]
pub struct DiffEngine {
    context_lines: u32,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

impl DiffEngine {
    /// Construct a new diff engine instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the number of context lines used in unified patches.
    #[must_use]
    pub const fn with_context_lines(mut self, context_lines: u32) -> Self {
        self.context_lines = context_lines;
        self
    }

    /// Compare two documents row by row.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn compute(&self, original: &TextDocument, modified: &TextDocument) -> Vec<DiffLine> {
        compute_diff(original, modified)
    }

    /// Compare two raw texts after splitting them into lines.
    #[must_use]
    pub fn diff_texts(&self, original: &str, modified: &str) -> Vec<DiffLine> {
        self.compute(
            &TextDocument::from_text(original),
            &TextDocument::from_text(modified),
        )
    }

    /// Row counts for the comparison of two documents.
    #[must_use]
    pub fn stats(&self, original: &TextDocument, modified: &TextDocument) -> DiffStats {
        DiffStats::from_lines(&self.compute(original, modified))
    }

    /// Render a git-style unified patch between two documents.
    ///
    /// Equal documents produce an empty string. The patch uses libgit2's
    /// alignment and is meant for export, not for the side-by-side view.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Patch`] when libgit2 cannot build or print the patch.
    pub fn unified_patch(
        &self,
        path: &str,
        original: &TextDocument,
        modified: &TextDocument,
    ) -> Result<String> {
        if original == modified {
            return Ok(String::new());
        }

        let original_text = original.text();
        let modified_text = modified.text();
        let path_ref = Path::new(path);
        let mut options = DiffOptions::new();
        options.context_lines(self.context_lines);

        let mut patch = Patch::from_buffers(
            original_text.as_bytes(),
            Some(path_ref),
            modified_text.as_bytes(),
            Some(path_ref),
            Some(&mut options),
        )?;

        let buffer = patch.to_buf()?;
        Ok(String::from_utf8_lossy(buffer.as_ref()).into_owned())
    }
}

/// Compare two documents by line position.
///
/// Produces exactly one row per index up to the longer document's length.
#[must_use]
pub fn compute_diff(original: &TextDocument, modified: &TextDocument) -> Vec<DiffLine> {
    let (left, right) = (original.lines(), modified.lines());

    let paired = left
        .iter()
        .zip(right)
        .enumerate()
        .map(|(index, (original, modified))| pair(index, original, modified));
    // At most one of these tails is non-empty.
    let deleted = left
        .iter()
        .enumerate()
        .skip(right.len())
        .map(|(index, text)| DiffLine::Deleted {
            original_line: line_number(index),
            text: text.clone(),
        });
    let added = right
        .iter()
        .enumerate()
        .skip(left.len())
        .map(|(index, text)| DiffLine::Added {
            modified_line: line_number(index),
            text: text.clone(),
        });

    paired.chain(deleted).chain(added).collect()
}

fn pair(index: usize, original: &str, modified: &str) -> DiffLine {
    let number = line_number(index);
    if original == modified {
        DiffLine::Unchanged {
            line: number,
            text: original.to_owned(),
        }
    } else {
        DiffLine::Modified {
            original_line: number,
            modified_line: number,
            original_text: original.to_owned(),
            modified_text: modified.to_owned(),
        }
    }
}

fn line_number(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}
