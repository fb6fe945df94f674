//! Completion interaction state machine.
//!
//! The editor observes edit notifications from a [`TextSurface`] and
//! decides when a completion should be offered, withdrawn, or committed.
//! It never mutates the surface while handling a notification: when a
//! completion is found, [`CompletionEditor::on_edit`] returns a
//! [`PendingCompletion`] describing the insertion, and the driver applies
//! it once the notification has fully returned. The current [`Mode`] is
//! threaded through every call rather than held as editor state, so the
//! handler is a pure function of (mode, event, surface contents).

use std::sync::Arc;

use crate::completer::Completer;
use crate::surface::{EditNotice, SurfaceError, TextSurface};
use crate::Config;

/// Interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Plain typing; no tentative completion on the surface.
    #[default]
    Insert,
    /// A completion suffix has been inserted and sits selected, awaiting
    /// acceptance or overwrite.
    Completion,
}

/// A deferred completion insertion, returned by
/// [`CompletionEditor::on_edit`] and applied by the driver after the
/// triggering notification returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCompletion {
    text: String,
    position: usize,
}

impl PendingCompletion {
    pub fn new<T: Into<String>>(text: T, position: usize) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }

    /// The suffix text to insert.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The character offset the suffix is inserted at.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Apply the insertion: place the suffix, put the caret at its end,
    /// then extend the selection anchor back to the insertion point so
    /// the suffix sits selected, ready to be overwritten by continued
    /// typing. Returns the resulting mode.
    ///
    /// The insertion is applied directly, not replayed through the
    /// notification path: a programmatic edit must not re-enter the
    /// completion logic.
    pub fn apply<S: TextSurface>(&self, surface: &mut S) -> Mode {
        surface.insert(&self.text, self.position);
        let end = self.position + self.text.chars().count();
        surface.set_caret(end);
        surface.extend_selection_to(self.position);
        Mode::Completion
    }
}

/// Outcome of observing one edit notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub mode: Mode,
    pub pending: Option<PendingCompletion>,
}

impl EditOutcome {
    fn stay(mode: Mode) -> Self {
        Self {
            mode,
            pending: None,
        }
    }
}

/// The completion interaction state machine.
pub struct CompletionEditor {
    completer: Arc<Completer>,
    min_prefix_len: usize,
}

impl CompletionEditor {
    pub fn new(completer: Arc<Completer>, config: &Config) -> Self {
        Self {
            completer,
            min_prefix_len: config.min_prefix_len,
        }
    }

    /// The completion search backend.
    pub fn completer(&self) -> &Completer {
        &self.completer
    }

    /// Observe one edit notification.
    ///
    /// Only single-character insertions can trigger a completion: the run
    /// of alphabetic characters ending at the inserted position becomes
    /// the query prefix once it reaches the configured minimum length.
    /// Any other edit (deletion, multi-character insertion) withdraws a
    /// tentative completion by returning to [`Mode::Insert`].
    ///
    /// A [`SurfaceError`] while reading the surface aborts the completion
    /// attempt; the caller leaves the mode unchanged.
    pub fn on_edit<S: TextSurface>(
        &self,
        mode: Mode,
        notice: EditNotice,
        surface: &S,
    ) -> Result<EditOutcome, SurfaceError> {
        if notice.length_inserted != 1 {
            return Ok(EditOutcome::stay(Mode::Insert));
        }

        let position = notice.offset;
        let content = surface.read_substring(0, position + 1)?;
        let chars: Vec<char> = content.chars().collect();

        // Contiguous run of letters ending at the inserted character.
        let mut start = position + 1;
        while start > 0 && chars[start - 1].is_alphabetic() {
            start -= 1;
        }
        let run_len = position + 1 - start;
        if run_len < self.min_prefix_len {
            // Too few characters to disambiguate.
            return Ok(EditOutcome::stay(mode));
        }

        let prefix: String = chars[start..=position]
            .iter()
            .collect::<String>()
            .to_lowercase();

        match self.completer.most_frequent(&prefix) {
            None => Ok(EditOutcome::stay(Mode::Insert)),
            Some(candidate) => {
                let word = candidate.text;
                if word.starts_with(&prefix) && word.chars().count() > prefix.chars().count() {
                    let suffix: String = word.chars().skip(run_len).collect();
                    Ok(EditOutcome {
                        mode,
                        pending: Some(PendingCompletion::new(suffix, position + 1)),
                    })
                } else {
                    // The match is the prefix itself; nothing to offer.
                    Ok(EditOutcome::stay(mode))
                }
            }
        }
    }

    /// Handle the commit action.
    ///
    /// With a completion pending, the caret moves past the selected
    /// suffix, one space is inserted there, and the mode returns to
    /// [`Mode::Insert`]. Otherwise the action falls back to the surface's
    /// plain newline insertion at the current selection.
    pub fn on_commit<S: TextSurface>(&self, mode: Mode, surface: &mut S) -> Mode {
        match mode {
            Mode::Completion => {
                let position = surface.selection_end();
                surface.insert(" ", position);
                surface.set_caret(position + 1);
                Mode::Insert
            }
            Mode::Insert => {
                surface.replace_selection("\n");
                Mode::Insert
            }
        }
    }
}

impl std::fmt::Debug for CompletionEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionEditor")
            .field("min_prefix_len", &self.min_prefix_len)
            .finish()
    }
}
