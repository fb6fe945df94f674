//! Editing session driving a text surface through the completion editor.
//!
//! The session is the integration layer: it owns a surface, forwards
//! every edit notification to the [`CompletionEditor`], and executes any
//! returned [`PendingCompletion`] as the very next unit of work after
//! the notification has returned. Everything runs on one logical thread
//! in strict arrival order; the deferral is sequencing, not concurrency.

use tracing::debug;

use crate::editor::{CompletionEditor, Mode};
use crate::surface::{EditNotice, TextSurface};

/// An interactive editing session with word completion.
#[derive(Debug)]
pub struct Session<S: TextSurface> {
    surface: S,
    editor: CompletionEditor,
    mode: Mode,
}

impl<S: TextSurface> Session<S> {
    pub fn new(surface: S, editor: CompletionEditor) -> Self {
        Self {
            surface,
            editor,
            mode: Mode::default(),
        }
    }

    /// Current interaction mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The underlying surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The full surface text.
    pub fn text(&self) -> String {
        self.surface
            .read_substring(0, self.surface.len())
            .unwrap_or_default()
    }

    /// Type one character at the caret. An active selection is replaced,
    /// which is how a tentatively offered suffix gets overwritten by
    /// continued typing.
    pub fn type_char(&mut self, ch: char) {
        let text = ch.to_string();
        let notice = if self.surface.has_selection() {
            self.surface.replace_selection(&text)
        } else {
            let caret = self.surface.caret();
            self.surface.insert(&text, caret)
        };
        self.dispatch(notice);
    }

    /// Insert a whole string at once (paste). Multi-character insertions
    /// never trigger completion logic and withdraw any tentative suffix.
    pub fn type_str(&mut self, text: &str) {
        let notice = if self.surface.has_selection() {
            self.surface.replace_selection(text)
        } else {
            let caret = self.surface.caret();
            self.surface.insert(text, caret)
        };
        self.dispatch(notice);
    }

    /// Delete the selection, or the character before the caret.
    pub fn backspace(&mut self) {
        let notice = if self.surface.has_selection() {
            self.surface.replace_selection("")
        } else {
            let caret = self.surface.caret();
            if caret == 0 {
                return;
            }
            self.surface.extend_selection_to(caret - 1);
            self.surface.replace_selection("")
        };
        self.dispatch(notice);
    }

    /// The commit action: accept a pending completion (inserting one
    /// space after it), or insert a plain newline when none is pending.
    pub fn commit(&mut self) {
        self.mode = self.editor.on_commit(self.mode, &mut self.surface);
    }

    /// Empty the surface and return to [`Mode::Insert`].
    pub fn clear(&mut self) {
        let len = self.surface.len();
        self.surface.set_caret(len);
        self.surface.extend_selection_to(0);
        let notice = self.surface.replace_selection("");
        self.dispatch(notice);
    }

    /// Forward a notification to the editor, then run any scheduled
    /// insertion before accepting further input.
    fn dispatch(&mut self, notice: EditNotice) {
        match self.editor.on_edit(self.mode, notice, &self.surface) {
            Ok(outcome) => {
                self.mode = outcome.mode;
                if let Some(pending) = outcome.pending {
                    self.mode = pending.apply(&mut self.surface);
                }
            }
            Err(err) => {
                // Abort this completion attempt; state stays unchanged.
                debug!(error = %err, "completion attempt aborted");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::completer::Completer;
    use crate::surface::BufferSurface;
    use crate::trie::Trie;
    use crate::Config;

    fn session() -> Session<BufferSurface> {
        let mut trie = Trie::new();
        trie.insert("the", 100);
        trie.insert("theory", 5);
        trie.insert("therefore", 3);
        let config = Config::default();
        let editor = CompletionEditor::new(Arc::new(Completer::new(trie, &config)), &config);
        Session::new(BufferSurface::new(), editor)
    }

    fn type_word(session: &mut Session<BufferSurface>, word: &str) {
        for ch in word.chars() {
            session.type_char(ch);
        }
    }

    #[test]
    fn typing_a_prefix_offers_the_selected_suffix() {
        let mut session = session();
        type_word(&mut session, "theo");

        assert_eq!(session.text(), "theory");
        assert_eq!(session.mode(), Mode::Completion);
        assert_eq!(session.surface().selected_text(), "ry");
    }

    #[test]
    fn exact_word_offers_nothing_beyond_itself() {
        let mut session = session();
        // "th" offers "the" with "e" selected; typing 'e' overwrites the
        // selection and the match then equals the prefix.
        type_word(&mut session, "the");
        assert_eq!(session.text(), "the");
        assert_eq!(session.surface().selected_text(), "");
    }

    #[test]
    fn continued_typing_overwrites_the_offer() {
        let mut session = session();
        type_word(&mut session, "ther");

        // "theo..." offer from "th"/"the" is overwritten; "ther" matches
        // "therefore" and offers "efore".
        assert_eq!(session.text(), "therefore");
        assert_eq!(session.surface().selected_text(), "efore");
        assert_eq!(session.mode(), Mode::Completion);
    }

    #[test]
    fn commit_accepts_with_exactly_one_space() {
        let mut session = session();
        type_word(&mut session, "theo");
        session.commit();

        assert_eq!(session.text(), "theory ");
        assert_eq!(session.mode(), Mode::Insert);
        assert_eq!(session.surface().caret(), 7);
    }

    #[test]
    fn commit_without_offer_inserts_newline() {
        let mut session = session();
        type_word(&mut session, "xy");
        session.commit();

        assert_eq!(session.text(), "xy\n");
        assert_eq!(session.mode(), Mode::Insert);
    }

    #[test]
    fn backspace_withdraws_a_pending_offer() {
        let mut session = session();
        type_word(&mut session, "theo");
        assert_eq!(session.mode(), Mode::Completion);

        // The selected suffix is the selection, so backspace removes it.
        session.backspace();
        assert_eq!(session.text(), "theo");
        assert_eq!(session.mode(), Mode::Insert);
    }

    #[test]
    fn paste_never_triggers_completion() {
        let mut session = session();
        session.type_str("theo");

        assert_eq!(session.text(), "theo");
        assert_eq!(session.mode(), Mode::Insert);
    }

    #[test]
    fn non_letter_input_separates_words() {
        let mut session = session();
        type_word(&mut session, "theo");
        session.commit();
        type_word(&mut session, "th");

        assert_eq!(session.text(), "theory the");
        assert_eq!(session.surface().selected_text(), "e");
    }

    #[test]
    fn clear_empties_the_surface() {
        let mut session = session();
        type_word(&mut session, "theo");
        session.clear();

        assert_eq!(session.text(), "");
        assert_eq!(session.mode(), Mode::Insert);
        assert_eq!(session.surface().caret(), 0);
    }

    #[test]
    fn empty_dictionary_leaves_typing_untouched() {
        let config = Config::default();
        let editor =
            CompletionEditor::new(Arc::new(Completer::new(Trie::new(), &config)), &config);
        let mut session = Session::new(BufferSurface::new(), editor);

        type_word(&mut session, "theo");
        assert_eq!(session.text(), "theo");
        assert_eq!(session.mode(), Mode::Insert);
    }
}
