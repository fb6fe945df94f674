//! End-to-end completion behavior over the public API: dictionary in,
//! keystrokes through a session, completions out.

use std::cell::Cell;
use std::io::Cursor;
use std::sync::Arc;

use libcomplete_core::{
    dictionary, BufferSurface, Completer, CompletionEditor, Config, EditNotice, Mode, Session,
    SurfaceError, TextSurface, Trie,
};

const DICTIONARY: &str = "\
1 the 100
2 theory 5
3 therefore 3
";

fn demo_trie() -> Trie {
    dictionary::load_from_reader(Cursor::new(DICTIONARY))
}

fn demo_session() -> Session<BufferSurface> {
    let config = Config::default();
    let completer = Arc::new(Completer::new(demo_trie(), &config));
    let editor = CompletionEditor::new(completer, &config);
    Session::new(BufferSurface::new(), editor)
}

fn type_word<S: TextSurface>(session: &mut Session<S>, word: &str) {
    for ch in word.chars() {
        session.type_char(ch);
    }
}

#[test]
fn exact_match_offers_no_suffix() {
    let config = Config::default();
    let completer = Completer::new(demo_trie(), &config);

    // "the" is itself the most frequent word with prefix "the", so there
    // is no suffix to offer.
    let best = completer.most_frequent("the").unwrap();
    assert_eq!(best.text, "the");
    assert_eq!(best.frequency, 100);
}

#[test]
fn theo_offers_ry() {
    let config = Config::default();
    let completer = Completer::new(demo_trie(), &config);

    let best = completer.most_frequent("theo").unwrap();
    assert_eq!(best.text, "theory");

    let mut session = demo_session();
    type_word(&mut session, "theo");
    assert_eq!(session.text(), "theory");
    assert_eq!(session.surface().selected_text(), "ry");
    assert_eq!(session.mode(), Mode::Completion);
}

#[test]
fn commit_in_completion_mode_inserts_one_space_and_returns_to_insert() {
    let mut session = demo_session();
    type_word(&mut session, "theo");
    session.commit();

    assert_eq!(session.text(), "theory ");
    assert_eq!(session.mode(), Mode::Insert);
}

#[test]
fn typing_through_a_sentence() {
    let mut session = demo_session();
    type_word(&mut session, "theo");
    session.commit();
    type_word(&mut session, "ther");
    session.commit();

    assert_eq!(session.text(), "theory therefore ");
    assert_eq!(session.mode(), Mode::Insert);
}

#[test]
fn dictionary_file_to_session_flow() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("word-freq.txt");
    std::fs::write(&path, DICTIONARY).unwrap();

    let config = Config::default();
    let trie = dictionary::load_from_path(&path);
    assert_eq!(trie.word_count(), 3);

    let completer = Arc::new(Completer::new(trie, &config));
    assert_eq!(
        completer.completions("the"),
        vec!["the", "theory", "therefore"],
    );

    let mut session = Session::new(
        BufferSurface::new(),
        CompletionEditor::new(completer, &config),
    );
    type_word(&mut session, "theo");
    assert_eq!(session.text(), "theory");
}

#[test]
fn missing_dictionary_degrades_to_no_completions() {
    let dir = tempfile::tempdir().unwrap();
    let trie = dictionary::load_from_path(dir.path().join("absent.txt"));
    assert!(trie.is_empty());

    let config = Config::default();
    let editor = CompletionEditor::new(Arc::new(Completer::new(trie, &config)), &config);
    let mut session = Session::new(BufferSurface::new(), editor);
    type_word(&mut session, "theo");

    assert_eq!(session.text(), "theo");
    assert_eq!(session.mode(), Mode::Insert);
}

/// Surface whose reads can be made to fail, for exercising the abort path.
#[derive(Debug, Default)]
struct FlakySurface {
    inner: BufferSurface,
    fail_reads: Cell<bool>,
}

impl TextSurface for FlakySurface {
    fn read_substring(&self, start: usize, end: usize) -> Result<String, SurfaceError> {
        if self.fail_reads.get() {
            return Err(SurfaceError::OutOfRange {
                start,
                end,
                len: self.inner.len(),
            });
        }
        self.inner.read_substring(start, end)
    }

    fn insert(&mut self, text: &str, position: usize) -> EditNotice {
        self.inner.insert(text, position)
    }

    fn replace_selection(&mut self, text: &str) -> EditNotice {
        self.inner.replace_selection(text)
    }

    fn set_caret(&mut self, position: usize) {
        self.inner.set_caret(position)
    }

    fn extend_selection_to(&mut self, position: usize) {
        self.inner.extend_selection_to(position)
    }

    fn caret(&self) -> usize {
        self.inner.caret()
    }

    fn selection_start(&self) -> usize {
        self.inner.selection_start()
    }

    fn selection_end(&self) -> usize {
        self.inner.selection_end()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

#[test]
fn surface_read_failure_aborts_the_attempt_and_leaves_state_unchanged() {
    let config = Config::default();
    let editor = CompletionEditor::new(Arc::new(Completer::new(demo_trie(), &config)), &config);
    let surface = FlakySurface::default();
    surface.fail_reads.set(true);
    let mut session = Session::new(surface, editor);

    type_word(&mut session, "theo");

    // The typed characters land, but no completion was ever offered.
    assert_eq!(session.surface().inner.text(), "theo");
    assert_eq!(session.mode(), Mode::Insert);
}
