//! Error types for extraction and segmentation
//!
//! Every error here is deterministic: retrying the same call with the same
//! input and the same registry produces the same error again.

use crate::specification::Specification;
use thiserror::Error;

/// Errors raised by the registry, the extractor and the sentence splitter
#[derive(Debug, Error)]
pub enum Error {
    /// Two rules were registered under the same specification
    #[error("duplicate pattern specification: {0}")]
    DuplicateSpecification(Specification),

    /// No rule is registered for the requested specification
    #[error("no matching pattern for specification: {0}")]
    NoMatchingPattern(Specification),

    /// A rule produced segments that are unordered, overlapping or out of bounds
    #[error("malformed extraction for {specification}: {reason}")]
    MalformedExtraction {
        /// Specification of the offending rule
        specification: Specification,
        /// What the postcondition check found
        reason: String,
    },

    /// A rule's matcher expression failed to compile
    #[error("pattern compilation failed for {specification}: {source}")]
    PatternCompilation {
        /// Specification of the offending rule
        specification: Specification,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// The matcher compiled but does not honor the capture group contract
    #[error("invalid pattern for {specification}: {reason}")]
    InvalidPattern {
        /// Specification of the offending rule
        specification: Specification,
        /// Which part of the contract is violated
        reason: String,
    },

    /// Registration was attempted after the registry was sealed
    #[error("registry is sealed, cannot register {0}")]
    RegistrySealed(Specification),

    /// Malformed rule or language configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No sentence policy is known for the language code
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Reading an external configuration file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> Specification {
        Specification::new("NL", "PARLIAMENT", "nl", "PLENARY")
    }

    #[test]
    fn test_no_matching_pattern_display() {
        let err = Error::NoMatchingPattern(spec());
        assert_eq!(
            err.to_string(),
            "no matching pattern for specification: NL/PARLIAMENT/nl/PLENARY"
        );
    }

    #[test]
    fn test_malformed_extraction_display() {
        let err = Error::MalformedExtraction {
            specification: spec(),
            reason: "segment 1 overlaps segment 0".to_string(),
        };
        assert!(err.to_string().contains("NL/PARLIAMENT/nl/PLENARY"));
        assert!(err.to_string().contains("overlaps"));
    }

    #[test]
    fn test_pattern_compilation_keeps_source() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = Error::PatternCompilation {
            specification: spec(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
