//! Pattern rules: jurisdiction-specific speech boundary grammars
//!
//! A rule pairs a [`Specification`] with a compiled matcher. Each match of
//! the matcher marks the start of a speech and carries the speaker label;
//! the speech runs until the next match or the end of the session region.
//!
//! Capture group contract for matcher expressions:
//! - `speaker` (required): the raw speaker label
//! - `constituency`, `party`, `role` (optional): speaker attributes
//! - `body` (optional): where the speech text starts; defaults to the match end

pub mod builtin;
pub mod config;
mod regex_rule;

pub use config::{MatcherConfig, RuleConfig, RuleMetadata, SessionConfig};
pub use regex_rule::RegexPatternRule;

use crate::error::{Error, Result};
use crate::segment::{SpeakerAttributes, SpeechSegment};
use crate::specification::Specification;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::ops::Range;

const OPTIONAL_GROUPS: [&str; 4] = ["constituency", "party", "role", "body"];

/// What happens to text outside every speech boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResidualPolicy {
    /// Drop it (logged at debug level)
    Discard,
    /// Keep it as a preamble or closing segment
    Retain,
}

/// Capability set every extraction rule provides
pub trait PatternRule: Send + Sync + 'static {
    /// The specification this rule is registered under
    fn specification(&self) -> &Specification;

    /// Human readable description for listings
    fn description(&self) -> &str {
        ""
    }

    /// Policy for text outside every speech
    fn residual_policy(&self) -> ResidualPolicy;

    /// Build the matcher once and return the cached instance
    fn compile(&self) -> Result<&CompiledMatcher>;

    /// Split raw protocol text into ordered, non-overlapping segments
    fn extract(&self, raw_text: &str) -> Result<Vec<SpeechSegment>>;

    /// Exact tuple equality against the rule's own specification
    fn matches(&self, specification: &Specification) -> bool {
        self.specification() == specification
    }
}

impl std::fmt::Debug for dyn PatternRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternRule")
            .field("specification", self.specification())
            .finish_non_exhaustive()
    }
}

/// A speaker marker found by the matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerMarker {
    /// Byte range of the whole match
    pub span: Range<usize>,
    /// Where the speech text begins
    pub body_start: usize,
    /// Raw speaker label, trimmed
    pub speaker: String,
    /// Captured attributes
    pub attributes: SpeakerAttributes,
}

/// Compiled speaker expression plus optional session markers
#[derive(Debug)]
pub struct CompiledMatcher {
    speaker: Regex,
    session_start: Option<Regex>,
    session_end: Option<Regex>,
}

impl CompiledMatcher {
    /// Compile and check the capture group contract
    pub fn new(
        specification: &Specification,
        pattern: &str,
        session_start: Option<&str>,
        session_end: Option<&str>,
    ) -> Result<Self> {
        let compile = |expr: &str| {
            Regex::new(expr).map_err(|source| Error::PatternCompilation {
                specification: specification.clone(),
                source,
            })
        };

        let speaker = compile(pattern)?;
        if !speaker.capture_names().flatten().any(|name| name == "speaker") {
            return Err(Error::InvalidPattern {
                specification: specification.clone(),
                reason: "missing required capture group 'speaker'".to_string(),
            });
        }

        Ok(Self {
            speaker,
            session_start: session_start.map(compile).transpose()?,
            session_end: session_end.map(compile).transpose()?,
        })
    }

    /// Optional capture groups the speaker expression defines, in pattern order
    pub fn optional_groups(&self) -> Vec<&str> {
        self.speaker
            .capture_names()
            .flatten()
            .filter(|name| OPTIONAL_GROUPS.contains(name))
            .collect()
    }

    /// Whether any session marker is configured
    pub fn has_session_markers(&self) -> bool {
        self.session_start.is_some() || self.session_end.is_some()
    }

    /// Byte range of the session body
    ///
    /// Starts after the start marker and ends before the first end marker
    /// that follows it. A configured marker that does not occur leaves that
    /// edge at the document boundary.
    pub fn session_region(&self, text: &str) -> Range<usize> {
        let start = match &self.session_start {
            Some(re) => match re.find(text) {
                Some(m) => m.end(),
                None => {
                    log::warn!("session start marker not found, searching from document start");
                    0
                }
            },
            None => 0,
        };

        let end = match &self.session_end {
            Some(re) => match re.find_at(text, start) {
                Some(m) => m.start(),
                None => {
                    log::warn!("session end marker not found, searching to document end");
                    text.len()
                }
            },
            None => text.len(),
        };

        start..end
    }

    /// All speaker markers that lie entirely inside `region`, in document order
    ///
    /// Searching happens on the full text so that anchors and word
    /// boundaries see the real surrounding characters.
    pub fn speaker_markers(&self, text: &str, region: Range<usize>) -> Vec<SpeakerMarker> {
        let mut markers = Vec::new();
        let mut pos = region.start;

        while pos <= region.end {
            let Some(caps) = self.speaker.captures_at(text, pos) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            if whole.end() > region.end {
                break;
            }

            pos = if whole.is_empty() {
                // Step past the empty match without splitting a character
                text[whole.end()..]
                    .chars()
                    .next()
                    .map_or(text.len() + 1, |ch| whole.end() + ch.len_utf8())
            } else {
                whole.end()
            };

            if let Some(marker) = Self::marker_from_captures(&caps) {
                markers.push(marker);
            }
        }

        markers
    }

    fn marker_from_captures(caps: &Captures<'_>) -> Option<SpeakerMarker> {
        let whole = caps.get(0)?;
        let speaker = caps.name("speaker")?.as_str().trim().to_string();
        let capture = |name: &str| {
            caps.name(name)
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let body_start = caps
            .name("body")
            .map_or(whole.end(), |m| m.start());

        Some(SpeakerMarker {
            span: whole.start()..whole.end(),
            body_start,
            speaker,
            attributes: SpeakerAttributes {
                constituency: capture("constituency"),
                party: capture("party"),
                role: capture("role"),
            },
        })
    }
}
