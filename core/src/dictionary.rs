//! Line-oriented dictionary loading.
//!
//! The dictionary source is a plain text frequency list: each line is
//! whitespace-split into fields, the second field is the word and the
//! third its non-negative integer frequency. Anything that does not fit
//! that shape is skipped silently; a missing source is a non-fatal
//! diagnostic and yields an empty [`Trie`]. The loaded trie can also be
//! cached in a compiled bincode form to skip re-parsing on later runs.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::trie::Trie;

/// Errors from the compiled-dictionary cache.
///
/// The text loader itself never surfaces errors: malformed lines are
/// skipped and an unreadable source degrades to an empty trie.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("dictionary i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("dictionary encoding: {0}")]
    Encode(#[from] bincode::Error),
}

/// A single `(word, frequency)` pair parsed from one dictionary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub word: String,
    pub frequency: u64,
}

/// Parse one dictionary line.
///
/// A valid entry has at least three whitespace-separated fields; the
/// first is ignored, the second is the word, the third the frequency.
/// Fields beyond the third are ignored. Returns `None` for short lines
/// and for frequencies that do not parse as a non-negative integer.
///
/// # Example
/// ```
/// use libcomplete_core::dictionary::parse_line;
///
/// let entry = parse_line("1 hello 57").unwrap();
/// assert_eq!(entry.word, "hello");
/// assert_eq!(entry.frequency, 57);
///
/// assert!(parse_line("foo bar baz extra").is_none()); // "baz" not an integer
/// assert!(parse_line("too short").is_none());
/// ```
pub fn parse_line(line: &str) -> Option<DictionaryEntry> {
    let mut fields = line.split_whitespace();
    let _rank = fields.next()?;
    let word = fields.next()?;
    let frequency: u64 = fields.next()?.parse().ok()?;
    Some(DictionaryEntry {
        word: word.to_string(),
        frequency,
    })
}

/// Load a trie from a line source, skipping malformed lines.
///
/// Duplicate words overwrite the stored frequency per the trie's
/// last-write-wins contract.
pub fn load_from_reader<R: BufRead>(reader: R) -> Trie {
    let mut trie = Trie::new();
    let mut skipped = 0usize;
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "dictionary read error, stopping load");
                break;
            }
        };
        match parse_line(&line) {
            Some(entry) => trie.insert(&entry.word, entry.frequency),
            None => {
                skipped += 1;
                trace!(%line, "skipping malformed dictionary line");
            }
        }
    }
    debug!(words = trie.word_count(), skipped, "dictionary loaded");
    trie
}

/// Load a trie from a dictionary file.
///
/// A source that cannot be opened is non-fatal: the diagnostic is logged
/// and an empty trie is returned, so completion queries simply find
/// nothing.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Trie {
    let path = path.as_ref();
    match File::open(path) {
        Ok(file) => load_from_reader(BufReader::new(file)),
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "dictionary unavailable, continuing with empty trie",
            );
            Trie::new()
        }
    }
}

/// Save a loaded trie to a compiled bincode cache file.
pub fn save_bincode<P: AsRef<Path>>(trie: &Trie, path: P) -> Result<(), DictionaryError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    bincode::serialize_into(writer, trie)?;
    Ok(())
}

/// Load a trie from a compiled cache produced by [`save_bincode`].
pub fn load_bincode<P: AsRef<Path>>(path: P) -> Result<Trie, DictionaryError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let trie: Trie = bincode::deserialize_from(reader)?;
    Ok(trie)
}
