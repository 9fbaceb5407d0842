//! Speech extraction and sentence segmentation for parliamentary protocols
//!
//! Raw protocol text is split into speeches by a jurisdiction-specific
//! pattern rule, selected by a four-part [`Specification`] (country,
//! institution, language, protocol type). Each speech is then split into
//! sentences under a language policy.
//!
//! # Architecture
//!
//! - **Pattern rules** ([`pattern`]): compiled speaker grammars, data-driven
//!   from TOML
//! - **Registry** ([`registry`]): rules keyed by specification, sealed after
//!   initialization and shared read-only
//! - **Extractor** ([`extractor`]): resolves a rule, applies it, verifies the
//!   result
//! - **Sentence splitter** ([`sentence`]): abbreviation-aware, lazy
//!
//! # Example
//!
//! ```rust
//! use cicero_core::{PatternRegistry, SentenceSplitter, Specification, SpeechExtractor};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(PatternRegistry::with_builtin_rules()?);
//! let extractor = SpeechExtractor::new(registry);
//! let splitter = SentenceSplitter::for_language("nl")?;
//!
//! let spec: Specification = "NL/PARLIAMENT/nl/PLENARY".parse()?;
//! let text = "JANSEN: Welcome. Let us begin.\nDE VRIES: I agree.";
//! let protocol = extractor.extract_protocol(text, &spec, &splitter)?;
//!
//! assert_eq!(protocol.speeches.len(), 2);
//! assert_eq!(protocol.speeches[0].segment.speaker, "JANSEN");
//! assert_eq!(protocol.speeches[0].sentences.len(), 2);
//! # Ok::<(), cicero_core::Error>(())
//! ```

pub mod error;
pub mod extractor;
pub mod pattern;
pub mod registry;
pub mod segment;
pub mod sentence;
pub mod specification;

pub use error::{Error, Result};
pub use extractor::{ProtocolDocument, SpeechExtractor};
pub use pattern::{PatternRule, RegexPatternRule, ResidualPolicy, RuleConfig};
pub use registry::PatternRegistry;
pub use segment::{
    ExtractedSpeech, ProtocolExtraction, SegmentKind, Sentence, SpeakerAttributes, SpeechSegment,
};
pub use sentence::{LanguageConfig, SentenceSplitter, Sentences, SplitPolicy};
pub use specification::Specification;
