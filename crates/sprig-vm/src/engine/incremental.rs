//! Text edits for incremental reparsing.

use std::ops::Range;

use super::error::EditError;

/// Replace `removed_len` bytes at `start` with `inserted_text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub removed_len: usize,
    pub inserted_text: String,
}

impl Edit {
    pub fn new(start: usize, removed_len: usize, inserted_text: impl Into<String>) -> Self {
        Self {
            start,
            removed_len,
            inserted_text: inserted_text.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at, 0, text)
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self::new(range.start, range.len(), "")
    }

    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self::new(range.start, range.len(), text)
    }

    pub fn inserted_len(&self) -> usize {
        self.inserted_text.len()
    }

    /// End of the removed span in the old text.
    pub fn removed_end(&self) -> usize {
        self.start.saturating_add(self.removed_len)
    }

    /// Check the edit against `text`.
    pub fn validate(&self, text: &str) -> Result<(), EditError> {
        let end = self.removed_end();
        if end > text.len() {
            return Err(EditError::OutOfBounds {
                start: self.start,
                end,
                len: text.len(),
            });
        }
        for offset in [self.start, end] {
            if !text.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary(offset));
            }
        }
        Ok(())
    }

    /// The text after the edit.
    pub fn apply(&self, text: &str) -> Result<String, EditError> {
        self.validate(text)?;
        let mut out = String::with_capacity(text.len() - self.removed_len + self.inserted_len());
        out.push_str(&text[..self.start]);
        out.push_str(&self.inserted_text);
        out.push_str(&text[self.removed_end()..]);
        Ok(out)
    }
}
