//! Sentence segmentation for a single speech
//!
//! A boundary is a run of terminator characters, optionally followed by
//! closing quotes or brackets, followed by whitespace or the end of the text.
//! It is suppressed when the next word starts lower-case, or when the
//! terminator is a single dot that ends a known abbreviation, an initial or
//! an ordinal number (depending on the language policy).
//!
//! ```
//! use cicero_core::sentence::SentenceSplitter;
//!
//! let splitter = SentenceSplitter::for_language("de")?;
//! let sentences: Vec<String> = splitter
//!     .split("Wir beraten z. B. den Haushalt.  Danke!")
//!     .collect();
//! assert_eq!(sentences, vec!["Wir beraten z. B. den Haushalt.", "Danke!"]);
//! # Ok::<(), cicero_core::Error>(())
//! ```

pub mod abbreviation;
pub mod config;
pub mod loader;

pub use abbreviation::AbbreviationTrie;
pub use config::LanguageConfig;
pub use loader::{available_languages, embedded_language_configs, get_language_config};

use crate::error::Result;
use std::collections::HashMap;
use std::iter::FusedIterator;

const DEFAULT_TERMINATORS: [char; 3] = ['.', '?', '!'];
const DEFAULT_CLOSERS: [char; 4] = ['"', '\'', ')', ']'];

/// Sentence boundary policy for one language
#[derive(Debug, Clone)]
pub struct SplitPolicy {
    language: String,
    terminators: Vec<char>,
    closers: Vec<char>,
    abbreviations: AbbreviationTrie,
    ordinal_numbers: bool,
    initials: bool,
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            language: "custom".to_string(),
            terminators: DEFAULT_TERMINATORS.to_vec(),
            closers: DEFAULT_CLOSERS.to_vec(),
            abbreviations: AbbreviationTrie::new(),
            ordinal_numbers: false,
            initials: false,
        }
    }
}

impl SplitPolicy {
    /// Start a programmatic policy
    pub fn builder() -> SplitPolicyBuilder {
        SplitPolicyBuilder::default()
    }

    /// Build a policy from a validated language configuration
    pub fn from_config(config: &LanguageConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            language: config.metadata.code.clone(),
            terminators: config.terminators.chars.clone(),
            closers: config.closers.chars.clone(),
            abbreviations: AbbreviationTrie::from_categories(&config.abbreviations.categories),
            ordinal_numbers: config.numbers.ordinal_numbers,
            initials: config.abbreviations.initials,
        })
    }

    /// Policy of an embedded language
    pub fn for_language(code: &str) -> Result<Self> {
        Self::from_config(get_language_config(code)?)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn terminators(&self) -> &[char] {
        &self.terminators
    }

    pub fn closers(&self) -> &[char] {
        &self.closers
    }

    pub fn abbreviations(&self) -> &AbbreviationTrie {
        &self.abbreviations
    }

    pub fn ordinal_numbers(&self) -> bool {
        self.ordinal_numbers
    }

    pub fn initials(&self) -> bool {
        self.initials
    }

    fn is_terminator(&self, ch: char) -> bool {
        self.terminators.contains(&ch)
    }

    fn is_closer(&self, ch: char) -> bool {
        self.closers.contains(&ch)
    }

    /// Byte offset just past the next boundary at or after `from`
    fn next_boundary(&self, text: &str, from: usize) -> Option<usize> {
        let mut pos = from;

        while let Some(ch) = text[pos..].chars().next() {
            if !self.is_terminator(ch) {
                pos += ch.len_utf8();
                continue;
            }

            let run_end = skip_while(text, pos, |c| self.is_terminator(c));
            let end = skip_while(text, run_end, |c| self.is_closer(c));
            if self.is_boundary(text, pos, run_end, end) {
                return Some(end);
            }
            pos = run_end;
        }

        None
    }

    fn is_boundary(&self, text: &str, run_start: usize, run_end: usize, end: usize) -> bool {
        let rest = &text[end..];
        if rest.chars().next().is_some_and(|c| !c.is_whitespace()) {
            return false;
        }
        if rest.trim_start().chars().next().is_some_and(char::is_lowercase) {
            return false;
        }

        !(&text[run_start..run_end] == "." && self.suppresses_dot(text, run_start))
    }

    fn suppresses_dot(&self, text: &str, dot: usize) -> bool {
        let token = &text[abbreviation::token_start(text, dot)..dot];

        if self.ordinal_numbers && !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
            return true;
        }

        if self.initials {
            let mut chars = token.chars();
            if let (Some(first), None) = (chars.next(), chars.next()) {
                if first.is_uppercase() {
                    return true;
                }
            }
        }

        match self.abbreviations.find_before(text, dot) {
            Some(abbr) => {
                log::trace!("no boundary after abbreviation '{abbr}'");
                true
            }
            None => false,
        }
    }
}

fn skip_while(text: &str, from: usize, pred: impl Fn(char) -> bool) -> usize {
    from + text[from..]
        .chars()
        .take_while(|&c| pred(c))
        .map(char::len_utf8)
        .sum::<usize>()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Programmatic construction of a [`SplitPolicy`]
#[derive(Debug, Clone)]
pub struct SplitPolicyBuilder {
    language: String,
    terminators: Vec<char>,
    closers: Vec<char>,
    categories: HashMap<String, Vec<String>>,
    ordinal_numbers: bool,
    initials: bool,
}

impl Default for SplitPolicyBuilder {
    fn default() -> Self {
        Self {
            language: "custom".to_string(),
            terminators: DEFAULT_TERMINATORS.to_vec(),
            closers: DEFAULT_CLOSERS.to_vec(),
            categories: HashMap::new(),
            ordinal_numbers: false,
            initials: false,
        }
    }
}

impl SplitPolicyBuilder {
    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.language = code.into();
        self
    }

    pub fn terminators(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.terminators = chars.into_iter().collect();
        self
    }

    pub fn closers(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.closers = chars.into_iter().collect();
        self
    }

    /// Add abbreviations under a category
    pub fn abbreviations<S: Into<String>>(
        mut self,
        category: impl Into<String>,
        tokens: impl IntoIterator<Item = S>,
    ) -> Self {
        self.categories
            .entry(category.into())
            .or_default()
            .extend(tokens.into_iter().map(Into::into));
        self
    }

    pub fn ordinal_numbers(mut self, enabled: bool) -> Self {
        self.ordinal_numbers = enabled;
        self
    }

    pub fn initials(mut self, enabled: bool) -> Self {
        self.initials = enabled;
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<SplitPolicy> {
        let config = LanguageConfig {
            metadata: config::Metadata {
                name: self.language.clone(),
                code: self.language,
            },
            terminators: config::Terminators {
                chars: self.terminators,
            },
            closers: config::Closers {
                chars: self.closers,
            },
            numbers: config::Numbers {
                ordinal_numbers: self.ordinal_numbers,
            },
            abbreviations: config::Abbreviations {
                initials: self.initials,
                categories: self.categories,
            },
        };
        SplitPolicy::from_config(&config)
    }
}

/// Splits speech text into sentences under a [`SplitPolicy`]
#[derive(Debug, Clone, Default)]
pub struct SentenceSplitter {
    policy: SplitPolicy,
}

impl SentenceSplitter {
    pub fn new(policy: SplitPolicy) -> Self {
        Self { policy }
    }

    /// Splitter for an embedded language (`de`, `en`, `nl`)
    pub fn for_language(code: &str) -> Result<Self> {
        SplitPolicy::for_language(code).map(Self::new)
    }

    /// Splitter for an external language configuration
    pub fn from_config(config: &LanguageConfig) -> Result<Self> {
        SplitPolicy::from_config(config).map(Self::new)
    }

    pub fn policy(&self) -> &SplitPolicy {
        &self.policy
    }

    /// Lazily split `text`; nothing is scanned until the iterator is advanced
    pub fn split<'a>(&'a self, text: &'a str) -> Sentences<'a> {
        Sentences {
            policy: &self.policy,
            text,
            pos: 0,
        }
    }
}

/// Iterator over the sentences of one text
///
/// Cloning snapshots the current position; [`Sentences::restart`] rewinds to
/// the beginning.
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    policy: &'a SplitPolicy,
    text: &'a str,
    pos: usize,
}

impl Sentences<'_> {
    /// Rewind to the first sentence
    pub fn restart(&mut self) {
        self.pos = 0;
    }
}

impl Iterator for Sentences<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while self.pos < self.text.len() {
            let end = self
                .policy
                .next_boundary(self.text, self.pos)
                .unwrap_or(self.text.len());
            let sentence = collapse_whitespace(&self.text[self.pos..end]);
            self.pos = end;
            if !sentence.is_empty() {
                return Some(sentence);
            }
        }
        None
    }
}

impl FusedIterator for Sentences<'_> {}
