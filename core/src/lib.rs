//! libcomplete-core
//!
//! Trie-backed, frequency-ranked word completion: dictionary loading,
//! prefix search, and the interaction state machine that decides when a
//! completion is offered, overwritten, or committed. Frontends supply a
//! text surface (real or in-memory) and feed edit events through a
//! [`Session`].
//!
//! Public API:
//! - [`Trie`] / [`TrieNode`] - prefix tree with per-word frequencies
//! - [`dictionary`] - line-oriented loader and compiled bincode cache
//! - [`Completer`] / [`Candidate`] - normalized, cached ranked queries
//! - [`CompletionEditor`] / [`Mode`] / [`PendingCompletion`] - the
//!   interaction state machine and its deferred-insertion protocol
//! - [`Session`] - surface driver tying the pieces together
//! - [`TextSurface`] / [`BufferSurface`] - editing-surface abstraction
//! - [`Config`] - TOML-backed tuning knobs

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod trie;
pub use trie::{Trie, TrieNode};

pub mod dictionary;
pub use dictionary::{DictionaryEntry, DictionaryError};

pub mod completer;
pub use completer::{Candidate, Completer};

pub mod surface;
pub use surface::{BufferSurface, EditNotice, SurfaceError, TextSurface};

pub mod editor;
pub use editor::{CompletionEditor, EditOutcome, Mode, PendingCompletion};

pub mod session;
pub use session::Session;

/// Errors from reading or writing a [`Config`] file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialize: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Tuning knobs for the completion core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Minimum number of trailing letters before a completion query runs.
    /// Shorter runs are too ambiguous to disambiguate.
    pub min_prefix_len: usize,

    /// Maximum number of entries in the prefix -> candidate query cache.
    pub max_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_prefix_len: 2,
            max_cache_size: 1000,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize a typed query: NFC, then simple lowercase mapping.
    ///
    /// Dictionary words are assumed to be stored lowercase already, so
    /// normalization is applied to queries only.
    pub fn normalize_query(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = Config::default();
        assert_eq!(config.min_prefix_len, 2);
        assert_eq!(config.max_cache_size, 1000);
    }

    #[test]
    fn config_toml_roundtrip() {
        let config = Config {
            min_prefix_len: 3,
            max_cache_size: 64,
        };
        let text = config.to_toml_string().unwrap();
        let parsed = Config::from_toml_str(&text).unwrap();
        assert_eq!(parsed.min_prefix_len, 3);
        assert_eq!(parsed.max_cache_size, 64);
    }

    #[test]
    fn config_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("libcomplete.toml");

        let config = Config::default();
        config.save_toml(&path).unwrap();
        let loaded = Config::load_toml(&path).unwrap();
        assert_eq!(loaded.min_prefix_len, config.min_prefix_len);
    }

    #[test]
    fn normalize_query_lowercases() {
        assert_eq!(utils::normalize_query("Theory"), "theory");
        assert_eq!(utils::normalize_query("THE"), "the");
        assert_eq!(utils::normalize_query("café"), "café");
    }
}
