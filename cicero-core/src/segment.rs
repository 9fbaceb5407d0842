//! Speech segments and the per-document extraction result

use crate::specification::Specification;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// What a segment holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// A speaker's contribution
    Speech,
    /// Text before the first speech, kept by a retaining rule
    Preamble,
    /// Text after the session end marker, kept by a retaining rule
    Closing,
}

/// Optional attributes captured next to the speaker label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerAttributes {
    /// Electoral district or federal state, e.g. `Bayern`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constituency: Option<String>,
    /// Party or parliamentary group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    /// Office held while speaking, e.g. `Bundesminister der Finanzen`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl SpeakerAttributes {
    /// True when nothing was captured
    pub fn is_empty(&self) -> bool {
        self.constituency.is_none() && self.party.is_none() && self.role.is_none()
    }
}

/// One contiguous contribution extracted from a protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechSegment {
    /// Raw speaker label as it appears in the text; empty for residual buckets
    pub speaker: String,
    /// Captured attributes
    #[serde(default, skip_serializing_if = "SpeakerAttributes::is_empty")]
    pub attributes: SpeakerAttributes,
    /// Position within the protocol, starting at 0
    pub ordinal: usize,
    /// Byte range of `text` in the source document
    pub span: Range<usize>,
    /// Trimmed segment text
    pub text: String,
    /// Speech or residual bucket
    pub kind: SegmentKind,
}

impl SpeechSegment {
    /// Build a speech segment, trimming `span` to the non-whitespace text
    ///
    /// The ordinal is left at 0; rules renumber once the full list is known.
    pub(crate) fn from_span(
        source: &str,
        span: Range<usize>,
        speaker: String,
        attributes: SpeakerAttributes,
        kind: SegmentKind,
    ) -> Self {
        let span = trim_span(source, span);
        Self {
            speaker,
            attributes,
            ordinal: 0,
            text: source[span.clone()].to_string(),
            span,
            kind,
        }
    }

    /// True for a speaker's contribution, false for residual buckets
    pub fn is_speech(&self) -> bool {
        self.kind == SegmentKind::Speech
    }
}

/// Shrink a byte range so that it excludes leading and trailing whitespace
pub(crate) fn trim_span(source: &str, span: Range<usize>) -> Range<usize> {
    let slice = &source[span.clone()];
    let leading = slice.len() - slice.trim_start().len();
    let trailing = slice.len() - slice.trim_end().len();
    if leading == slice.len() {
        return span.start..span.start;
    }
    (span.start + leading)..(span.end - trailing)
}

/// A sentence tagged with its position inside the speech
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Position within the speech, starting at 0
    pub ordinal: usize,
    /// Whitespace-normalized sentence text
    pub text: String,
}

/// A segment together with its sentence sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSpeech {
    /// The extracted segment
    #[serde(flatten)]
    pub segment: SpeechSegment,
    /// Sentences in document order
    pub sentences: Vec<Sentence>,
}

/// Everything extracted from one protocol document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolExtraction {
    /// Specification the document was processed with
    pub specification: Specification,
    /// Segments in document order
    pub speeches: Vec<ExtractedSpeech>,
}

impl ProtocolExtraction {
    /// Number of speaker contributions, residual buckets excluded
    pub fn speech_count(&self) -> usize {
        self.speeches.iter().filter(|s| s.segment.is_speech()).count()
    }

    /// Total number of sentences over all segments
    pub fn sentence_count(&self) -> usize {
        self.speeches.iter().map(|s| s.sentences.len()).sum()
    }
}
