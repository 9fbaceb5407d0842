//! Speech extraction: resolve a rule, apply it, verify its output

use crate::error::{Error, Result};
use crate::registry::PatternRegistry;
use crate::segment::{ExtractedSpeech, ProtocolExtraction, Sentence, SpeechSegment};
use crate::sentence::SentenceSplitter;
use crate::specification::Specification;
use std::sync::Arc;

/// One document queued for batch extraction
#[derive(Debug, Clone)]
pub struct ProtocolDocument {
    /// Raw protocol text
    pub text: String,
    /// Rule selector for this document
    pub specification: Specification,
}

impl ProtocolDocument {
    /// Create a document
    pub fn new(text: impl Into<String>, specification: Specification) -> Self {
        Self {
            text: text.into(),
            specification,
        }
    }
}

/// Extracts speech segments using rules from a shared, sealed registry
///
/// Holds no mutable state; one extractor can serve many threads.
#[derive(Debug, Clone)]
pub struct SpeechExtractor {
    registry: Arc<PatternRegistry>,
}

impl SpeechExtractor {
    /// Create an extractor over `registry`
    pub fn new(registry: Arc<PatternRegistry>) -> Self {
        if !registry.is_sealed() {
            log::warn!("speech extractor created over an unsealed registry");
        }
        Self { registry }
    }

    /// The registry rules are resolved from
    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Split `raw_text` into ordered speech segments
    pub fn extract_speeches(
        &self,
        raw_text: &str,
        specification: &Specification,
    ) -> Result<Vec<SpeechSegment>> {
        let rule = self.registry.resolve(specification)?;
        let segments = rule.extract(raw_text)?;

        if let Err(reason) = validate_segments(raw_text, &segments) {
            log::error!("rule {specification} produced a malformed extraction: {reason}");
            return Err(Error::MalformedExtraction {
                specification: specification.clone(),
                reason,
            });
        }

        log::debug!(
            "extracted {} segments from {} bytes with {specification}",
            segments.len(),
            raw_text.len()
        );
        Ok(segments)
    }

    /// Extract segments and split each one into sentences
    pub fn extract_protocol(
        &self,
        raw_text: &str,
        specification: &Specification,
        splitter: &SentenceSplitter,
    ) -> Result<ProtocolExtraction> {
        let speeches = self
            .extract_speeches(raw_text, specification)?
            .into_iter()
            .map(|segment| {
                let sentences = splitter
                    .split(&segment.text)
                    .enumerate()
                    .map(|(ordinal, text)| Sentence { ordinal, text })
                    .collect();
                ExtractedSpeech {
                    segment,
                    sentences,
                }
            })
            .collect();

        Ok(ProtocolExtraction {
            specification: specification.clone(),
            speeches,
        })
    }

    /// Extract many documents, one task per document
    ///
    /// Results are returned in input order. With the `parallel` feature the
    /// documents are processed on the rayon thread pool.
    pub fn extract_batch(
        &self,
        documents: &[ProtocolDocument],
        splitter: &SentenceSplitter,
    ) -> Vec<Result<ProtocolExtraction>> {
        let run = |doc: &ProtocolDocument| {
            self.extract_protocol(&doc.text, &doc.specification, splitter)
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            documents.par_iter().map(run).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            documents.iter().map(run).collect()
        }
    }
}

/// Check the extraction postcondition
///
/// Spans must lie inside the text on character boundaries, be ordered and
/// pairwise disjoint; ordinals must count up from 0; each segment's text must
/// be its span.
pub fn validate_segments(text: &str, segments: &[SpeechSegment]) -> std::result::Result<(), String> {
    let mut previous_end = 0;

    for (idx, segment) in segments.iter().enumerate() {
        let span = &segment.span;

        if span.start > span.end {
            return Err(format!("segment {idx} has inverted span {span:?}"));
        }
        if span.end > text.len() {
            return Err(format!(
                "segment {idx} span {span:?} exceeds text length {}",
                text.len()
            ));
        }
        if !text.is_char_boundary(span.start) || !text.is_char_boundary(span.end) {
            return Err(format!("segment {idx} span {span:?} splits a character"));
        }
        if span.start < previous_end {
            return Err(format!(
                "segment {idx} starts at {} before the previous segment ends at {previous_end}",
                span.start
            ));
        }
        if segment.ordinal != idx {
            return Err(format!(
                "segment {idx} carries ordinal {}",
                segment.ordinal
            ));
        }
        if text[span.clone()] != segment.text {
            return Err(format!("segment {idx} text does not match its span"));
        }

        previous_end = span.end;
    }

    Ok(())
}
