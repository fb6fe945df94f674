//! Prefix trie storing dictionary words with corpus frequencies.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A single node in the prefix tree.
///
/// Each node is exclusively owned by its parent; traversal is always
/// top-down, so no parent back-references are needed. Nodes are created
/// lazily during insertion and never deleted.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TrieNode {
    children: AHashMap<char, Box<TrieNode>>,
    is_terminal: bool,
    /// Present iff `is_terminal`; the word's corpus occurrence count.
    frequency: Option<u64>,
}

impl TrieNode {
    /// Lookup the child node associated with a character label.
    pub fn child(&self, label: char) -> Option<&TrieNode> {
        self.children.get(&label).map(|b| b.as_ref())
    }

    /// True iff the path from the root to this node spells a complete word.
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// The stored frequency, present only on terminal nodes.
    pub fn frequency(&self) -> Option<u64> {
        self.frequency
    }

    /// Number of direct children.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }
}

/// A prefix tree mapping dictionary words to their frequencies.
///
/// The root node always exists and represents the empty prefix. The tree
/// is append-only: words are inserted once at load time and the structure
/// is read-only thereafter.
///
/// # Example
/// ```
/// use libcomplete_core::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("the", 100);
/// trie.insert("theory", 5);
///
/// assert!(trie.find_word_node("the").is_some());
/// assert!(trie.find_word_node("th").is_none()); // prefix, not a stored word
/// assert_eq!(
///     trie.most_frequent_with_prefix("th"),
///     Some(("the".to_string(), 100)),
/// );
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Trie {
    root: TrieNode,
    words: usize,
}

impl Trie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct words stored.
    pub fn word_count(&self) -> usize {
        self.words
    }

    /// True if no words have been inserted.
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Insert a word with its frequency, creating missing nodes along the
    /// path. Re-inserting an existing word overwrites the stored frequency
    /// (last write wins); no duplicate terminal node is ever created.
    pub fn insert(&mut self, word: &str, frequency: u64) {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        if !node.is_terminal {
            node.is_terminal = true;
            self.words += 1;
        }
        node.frequency = Some(frequency);
    }

    /// Walk the tree following `prefix` character by character and return
    /// the node reached. This is a pure traversal: the prefix does not need
    /// to be a complete word. The empty prefix returns the root.
    pub fn find_node(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in prefix.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    /// Like [`find_node`](Self::find_node), but the reached node must also
    /// be terminal. A prefix can be a valid path in the tree without being
    /// a stored word; this distinguishes the two.
    pub fn find_word_node(&self, word: &str) -> Option<&TrieNode> {
        self.find_node(word).filter(|n| n.is_terminal)
    }

    /// All complete words having `prefix` as a prefix, alphabetically
    /// ordered. The child maps carry no ordering, so the collected words
    /// are sorted before return. Empty when the prefix is absent.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut words: Vec<String> = self
            .terminals_with_prefix(prefix)
            .into_iter()
            .map(|(word, _)| word)
            .collect();
        words.sort();
        words
    }

    /// The terminal word under `prefix` with the strictly largest stored
    /// frequency, or `None` when the prefix is absent or no terminal node
    /// exists beneath it.
    ///
    /// Candidates are visited in lexicographic order and replaced only on a
    /// strictly greater frequency, so ties resolve to the lexicographically
    /// smallest word. The best-seen frequency starts at zero with the same
    /// strict comparison, so a word stored with frequency 0 is never
    /// selectable; a prefix whose only terminals have frequency 0 yields
    /// `None` (the words still appear in
    /// [`words_with_prefix`](Self::words_with_prefix)).
    pub fn most_frequent_with_prefix(&self, prefix: &str) -> Option<(String, u64)> {
        let mut terminals = self.terminals_with_prefix(prefix);
        terminals.sort_by(|a, b| a.0.cmp(&b.0));

        let mut best: Option<(String, u64)> = None;
        let mut best_frequency = 0u64;
        for (word, frequency) in terminals {
            if frequency > best_frequency {
                best_frequency = frequency;
                best = Some((word, frequency));
            }
        }
        best
    }

    /// Depth-first collection of every terminal word under `prefix`,
    /// paired with its frequency. Order follows the child maps and is not
    /// guaranteed; callers sort as needed.
    fn terminals_with_prefix(&self, prefix: &str) -> Vec<(String, u64)> {
        let mut out = Vec::new();
        if let Some(node) = self.find_node(prefix) {
            let mut word = String::from(prefix);
            Self::collect_terminals(node, &mut word, &mut out);
        }
        out
    }

    fn collect_terminals(node: &TrieNode, word: &mut String, out: &mut Vec<(String, u64)>) {
        if node.is_terminal {
            out.push((word.clone(), node.frequency.unwrap_or(0)));
        }
        for (ch, child) in &node.children {
            word.push(*ch);
            Self::collect_terminals(child, word, out);
            word.pop();
        }
    }
}
