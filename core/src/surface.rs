//! Text surface abstraction and an in-memory implementation.
//!
//! The visual editing surface is an external collaborator; the core only
//! depends on the small operation set defined by [`TextSurface`]. All
//! positions are character offsets. A real surface delivers edit
//! notifications through a subscription; in this synchronous model the
//! mutating operations return the [`EditNotice`] a subscriber would have
//! received, and the caller forwards it to the interaction handler.

use thiserror::Error;

/// Errors reported by a text surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// Requested range lies outside the current text bounds.
    #[error("substring {start}..{end} out of range for text of length {len}")]
    OutOfRange {
        start: usize,
        end: usize,
        len: usize,
    },
}

/// One edit notification from a text surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditNotice {
    /// Character offset where the edit happened.
    pub offset: usize,
    /// Number of characters inserted (0 for pure deletions).
    pub length_inserted: usize,
}

/// The editing-surface operations the completion core consumes.
///
/// The caret and the selection anchor together describe the selection:
/// `set_caret` collapses both to one position, `extend_selection_to`
/// moves only the caret, leaving the anchor behind.
pub trait TextSurface {
    /// Read the text in `[start, end)`.
    fn read_substring(&self, start: usize, end: usize) -> Result<String, SurfaceError>;

    /// Insert text at a position. Caret and anchor at or after the
    /// position shift right by the inserted length.
    fn insert(&mut self, text: &str, position: usize) -> EditNotice;

    /// Replace the current selection (possibly empty) with text, leaving
    /// the caret collapsed after it.
    fn replace_selection(&mut self, text: &str) -> EditNotice;

    /// Collapse caret and selection anchor to one position.
    fn set_caret(&mut self, position: usize);

    /// Move the caret without moving the selection anchor.
    fn extend_selection_to(&mut self, position: usize);

    /// Current caret position.
    fn caret(&self) -> usize;

    /// Lower end of the selection (equals `caret` when nothing is selected).
    fn selection_start(&self) -> usize;

    /// Upper end of the selection (equals `caret` when nothing is selected).
    fn selection_end(&self) -> usize;

    /// Current text length in characters.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn has_selection(&self) -> bool {
        self.selection_start() != self.selection_end()
    }
}

/// In-memory text surface used by tests and the CLI demo.
///
/// Stores the text as characters so every offset in the interface is a
/// plain index, and tracks the caret plus a selection anchor.
#[derive(Debug, Clone, Default)]
pub struct BufferSurface {
    text: Vec<char>,
    caret: usize,
    anchor: usize,
}

impl BufferSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface with initial text, caret collapsed at the end.
    pub fn from_text(text: &str) -> Self {
        let text: Vec<char> = text.chars().collect();
        let end = text.len();
        Self {
            text,
            caret: end,
            anchor: end,
        }
    }

    /// The full text.
    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// The selected text (empty when the selection is collapsed).
    pub fn selected_text(&self) -> String {
        self.text[self.selection_start()..self.selection_end()]
            .iter()
            .collect()
    }

    fn clamp(&self, position: usize) -> usize {
        position.min(self.text.len())
    }
}

impl TextSurface for BufferSurface {
    fn read_substring(&self, start: usize, end: usize) -> Result<String, SurfaceError> {
        if start > end || end > self.text.len() {
            return Err(SurfaceError::OutOfRange {
                start,
                end,
                len: self.text.len(),
            });
        }
        Ok(self.text[start..end].iter().collect())
    }

    fn insert(&mut self, text: &str, position: usize) -> EditNotice {
        let position = self.clamp(position);
        let inserted: Vec<char> = text.chars().collect();
        let length = inserted.len();
        self.text.splice(position..position, inserted);
        if self.caret >= position {
            self.caret += length;
        }
        if self.anchor >= position {
            self.anchor += length;
        }
        EditNotice {
            offset: position,
            length_inserted: length,
        }
    }

    fn replace_selection(&mut self, text: &str) -> EditNotice {
        let start = self.selection_start();
        let end = self.selection_end();
        let inserted: Vec<char> = text.chars().collect();
        let length = inserted.len();
        self.text.splice(start..end, inserted);
        self.caret = start + length;
        self.anchor = self.caret;
        EditNotice {
            offset: start,
            length_inserted: length,
        }
    }

    fn set_caret(&mut self, position: usize) {
        let position = self.clamp(position);
        self.caret = position;
        self.anchor = position;
    }

    fn extend_selection_to(&mut self, position: usize) {
        self.caret = self.clamp(position);
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn selection_start(&self) -> usize {
        self.caret.min(self.anchor)
    }

    fn selection_end(&self) -> usize {
        self.caret.max(self.anchor)
    }

    fn len(&self) -> usize {
        self.text.len()
    }
}
