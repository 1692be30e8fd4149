//! Raw build log text and where it came from.

use std::path::{Path, PathBuf};

/// Build log contents read from disk.
///
/// Invalid UTF-8 sequences are replaced on read; the text is immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContent {
    text: String,
    source: Option<PathBuf>,
}

impl LogContent {
    /// Wrap in-memory log text with no backing file.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
        }
    }

    /// Decode raw bytes read from `path`.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: &[u8]) -> Self {
        Self {
            text: String::from_utf8_lossy(bytes).into_owned(),
            source: Some(path.into()),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// True when the log has no content at all. Whitespace counts as content.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Last `max_chars` characters of the log, or the whole log if shorter.
    pub fn tail(&self, max_chars: usize) -> &str {
        let total = self.char_count();
        if total <= max_chars {
            return &self.text;
        }
        let skip = total - max_chars;
        match self.text.char_indices().nth(skip) {
            Some((idx, _)) => &self.text[idx..],
            None => "",
        }
    }
}

impl From<&str> for LogContent {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
