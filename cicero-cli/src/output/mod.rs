//! Output formatting module

use anyhow::Result;
use cicero_core::ProtocolExtraction;
use std::io::Write;

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format one protocol's speeches, with their sentences when `with_sentences`
    fn format_protocol(
        &mut self,
        source: &str,
        protocol: &ProtocolExtraction,
        with_sentences: bool,
    ) -> Result<()>;

    /// Format the sentences of one plain text document
    fn format_sentences(&mut self, source: &str, sentences: &[String]) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text, one speech or sentence block per entry
    Text,
    /// JSON array with one record per input file
    Json,
    /// Markdown document with a section per input file
    Markdown,
}

impl OutputFormat {
    /// Every format with its description
    pub fn all() -> [(Self, &'static str); 3] {
        [
            (Self::Text, "Plain text, one speech or sentence per line"),
            (Self::Json, "JSON array with speeches, attributes and sentences"),
            (Self::Markdown, "Markdown document with numbered speeches"),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Markdown => "markdown",
        }
    }

    /// Parse a format name as written in the config file
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(name, true).ok()
    }
}

/// Create the formatter for `format` writing to `writer`
pub fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write + Send + Sync>,
    pretty_json: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}

/// Display label of a segment's speaker
pub(crate) fn speaker_label(speech: &cicero_core::ExtractedSpeech) -> String {
    use cicero_core::SegmentKind;

    let segment = &speech.segment;
    let name = match segment.kind {
        SegmentKind::Speech => segment.speaker.as_str(),
        SegmentKind::Preamble => "(preamble)",
        SegmentKind::Closing => "(closing)",
    };

    let attributes: Vec<&str> = [
        segment.attributes.party.as_deref(),
        segment.attributes.constituency.as_deref(),
        segment.attributes.role.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();

    if attributes.is_empty() {
        name.to_string()
    } else {
        format!("{name} [{}]", attributes.join(", "))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names_round_trip() {
        for (format, _) in OutputFormat::all() {
            assert_eq!(OutputFormat::from_name(format.name()), Some(format));
        }
        assert_eq!(OutputFormat::from_name("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name("yaml"), None);
    }

    #[test]
    fn test_speaker_label() {
        let protocol = test_support::sample_protocol();
        assert_eq!(speaker_label(&protocol.speeches[0]), "(preamble)");
        assert_eq!(speaker_label(&protocol.speeches[1]), "JANSEN [VVD]");
        assert_eq!(speaker_label(&protocol.speeches[2]), "DE VRIES");
    }
}
