//! Abbreviation trie for backward lookups at a dot
//!
//! Keys are stored lower-cased; lookups are case-insensitive. Multi-dot
//! abbreviations such as `z.B` or `U.S.A` also insert their prefixes so the
//! intermediate dots are recognized.

use std::collections::HashMap;

/// Characters that end a token when scanning backwards from a dot
const TOKEN_DELIMITERS: &[char] = &[
    ',', ';', ':', '(', ')', '[', ']', '{', '}', '"', '\'', '!', '?', '«', '»', '„', '“', '”',
];

/// Maximum number of spaced parts combined into one abbreviation (`z. B.`)
const MAX_SPACED_PARTS: usize = 3;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: HashMap<char, u32>,
    is_end: bool,
    category: Option<String>,
}

/// Case-insensitive abbreviation set
#[derive(Debug, Clone)]
pub struct AbbreviationTrie {
    nodes: Vec<TrieNode>,
    len: usize,
}

impl Default for AbbreviationTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl AbbreviationTrie {
    /// Empty trie
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            len: 0,
        }
    }

    /// Build from category name to abbreviation lists
    pub fn from_categories(categories: &HashMap<String, Vec<String>>) -> Self {
        let mut trie = Self::new();

        // Sorted so that a token listed in two categories resolves the same way every time
        let mut names: Vec<&String> = categories.keys().collect();
        names.sort();

        for category in names {
            for abbr in &categories[category] {
                let abbr = abbr.trim().trim_end_matches('.');
                if abbr.is_empty() {
                    continue;
                }
                trie.insert(abbr, Some(category.clone()));

                let parts: Vec<&str> = abbr.split('.').collect();
                for i in 1..parts.len() {
                    let prefix = parts[..i].join(".");
                    if !prefix.is_empty() && !trie.contains(&prefix) {
                        trie.insert(&prefix, Some(format!("{category}_prefix")));
                    }
                }
            }
        }

        trie
    }

    /// Insert one abbreviation, without its trailing dot
    pub fn insert(&mut self, abbreviation: &str, category: Option<String>) {
        let mut current = 0usize;

        for ch in abbreviation.chars().flat_map(char::to_lowercase) {
            current = match self.nodes[current].children.get(&ch) {
                Some(&child) => child as usize,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[current].children.insert(ch, child as u32);
                    child
                }
            };
        }

        let node = &mut self.nodes[current];
        if !node.is_end {
            self.len += 1;
        }
        node.is_end = true;
        node.category = category;
    }

    fn node_for(&self, token: &str) -> Option<&TrieNode> {
        let mut current = 0usize;
        for ch in token.chars().flat_map(char::to_lowercase) {
            current = *self.nodes[current].children.get(&ch)? as usize;
        }
        let node = &self.nodes[current];
        node.is_end.then_some(node)
    }

    /// Whether `token` (without trailing dot) is a known abbreviation
    pub fn contains(&self, token: &str) -> bool {
        !token.is_empty() && self.node_for(token).is_some()
    }

    /// Category of a known abbreviation
    pub fn category(&self, token: &str) -> Option<&str> {
        self.node_for(token)?.category.as_deref()
    }

    /// Number of stored entries, prefixes included
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Find the abbreviation that ends at the dot at byte `dot`
    ///
    /// Tries the token directly before the dot, then the token joined with up
    /// to two preceding dotted tokens, so `z. B.` is found as `z.B`.
    pub fn find_before(&self, text: &str, dot: usize) -> Option<String> {
        if dot > text.len() || !text[dot..].starts_with('.') {
            return None;
        }

        let start = token_start(text, dot);
        let mut combined = text[start..dot].to_string();
        if self.contains(&combined) {
            return Some(combined);
        }
        if combined.is_empty() {
            return None;
        }

        let mut cursor = start;
        for _ in 1..MAX_SPACED_PARTS {
            let before = text[..cursor].trim_end();
            if before.len() == cursor || !before.ends_with('.') {
                break;
            }
            let part_start = token_start(before, before.len());
            let part = &before[part_start..];
            if part.len() < 2 {
                break;
            }
            combined.insert_str(0, part);
            if self.contains(&combined) {
                return Some(combined);
            }
            cursor = part_start;
        }

        None
    }
}

/// Byte offset where the token ending at `end` starts
pub(crate) fn token_start(text: &str, end: usize) -> usize {
    text[..end]
        .char_indices()
        .rev()
        .find(|&(_, ch)| ch.is_whitespace() || TOKEN_DELIMITERS.contains(&ch))
        .map_or(0, |(idx, ch)| idx + ch.len_utf8())
}
