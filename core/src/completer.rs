//! Frequency-ranked completion queries over a loaded trie.
//!
//! The `Completer` is a thin orchestration layer: it normalizes raw typed
//! prefixes (dictionary words are assumed already lowercase, so query
//! normalization is one-directional) and delegates to the trie's ranked
//! search. Results are memoized in an LRU cache, which is sound because
//! the trie is immutable once loaded.

use std::cell::RefCell;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::trie::Trie;
use crate::Config;

/// A ranked query result: word text plus its stored corpus frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    pub frequency: u64,
}

impl Candidate {
    pub fn new<T: Into<String>>(text: T, frequency: u64) -> Self {
        Candidate {
            text: text.into(),
            frequency,
        }
    }
}

/// Completion search over an immutable dictionary trie.
pub struct Completer {
    trie: Trie,
    cache: RefCell<lru::LruCache<String, Option<Candidate>>>,
    cache_hits: RefCell<usize>,
    cache_misses: RefCell<usize>,
}

impl Completer {
    /// Create a completer over a loaded trie. The query-cache capacity
    /// comes from [`Config::max_cache_size`].
    pub fn new(trie: Trie, config: &Config) -> Self {
        let capacity = NonZeroUsize::new(config.max_cache_size)
            .unwrap_or_else(|| NonZeroUsize::new(1000).unwrap());
        Self {
            trie,
            cache: RefCell::new(lru::LruCache::new(capacity)),
            cache_hits: RefCell::new(0),
            cache_misses: RefCell::new(0),
        }
    }

    /// The underlying trie.
    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// The most frequent dictionary word extending `prefix`, or `None`
    /// when the normalized prefix has no selectable completion.
    pub fn most_frequent(&self, prefix: &str) -> Option<Candidate> {
        let key = crate::utils::normalize_query(prefix);

        if let Some(cached) = self.cache.borrow_mut().get(&key) {
            *self.cache_hits.borrow_mut() += 1;
            return cached.clone();
        }
        *self.cache_misses.borrow_mut() += 1;

        let result = self
            .trie
            .most_frequent_with_prefix(&key)
            .map(|(text, frequency)| Candidate::new(text, frequency));
        self.cache.borrow_mut().put(key, result.clone());
        result
    }

    /// All dictionary words extending `prefix`, alphabetically ordered.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        self.trie
            .words_with_prefix(&crate::utils::normalize_query(prefix))
    }

    /// Query cache statistics as a `(hits, misses)` tuple.
    pub fn cache_stats(&self) -> (usize, usize) {
        (*self.cache_hits.borrow(), *self.cache_misses.borrow())
    }

    /// Clear the query cache and its counters.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
        *self.cache_hits.borrow_mut() = 0;
        *self.cache_misses.borrow_mut() = 0;
    }
}

impl std::fmt::Debug for Completer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completer")
            .field("words", &self.trie.word_count())
            .field("cache_len", &self.cache.borrow().len())
            .finish()
    }
}
