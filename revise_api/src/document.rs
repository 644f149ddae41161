use std::fmt;

use serde::{Deserialize, Serialize};

/// Immutable line-oriented view of a text document.
///
/// Lines are produced by splitting on `'\n'` only. The empty string is a
/// single empty line and a trailing newline yields a trailing empty line, so
/// [`TextDocument::text`] always reproduces the input of
/// [`TextDocument::from_text`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextDocument {
    /// Lines of the document without their terminating newline.
    pub lines: Vec<String>,
}

impl TextDocument {
    /// Split raw text into a document.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_owned).collect(),
        }
    }

    /// Build a document from already separated lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// All lines in order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line at a zero-based index, if present.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Number of lines in the document.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document holds no lines at all.
    ///
    /// Documents built with [`TextDocument::from_text`] always hold at least one line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join the lines back into a single string.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl From<&str> for TextDocument {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for TextDocument {
    fn from(text: String) -> Self {
        Self::from_text(&text)
    }
}

impl fmt::Display for TextDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
