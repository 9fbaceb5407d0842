//! Plain text output formatter

use super::{speaker_label, OutputFormatter};
use anyhow::Result;
use cicero_core::ProtocolExtraction;
use std::io::Write;

/// Plain text formatter
///
/// Speeches are printed as a `[ordinal] speaker` header followed by the
/// speech text, or one sentence per line.
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_protocol(
        &mut self,
        source: &str,
        protocol: &ProtocolExtraction,
        with_sentences: bool,
    ) -> Result<()> {
        writeln!(self.writer, "# {source} ({})", protocol.specification)?;

        for speech in &protocol.speeches {
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "[{}] {}",
                speech.segment.ordinal,
                speaker_label(speech)
            )?;
            if with_sentences {
                for sentence in &speech.sentences {
                    writeln!(self.writer, "{}", sentence.text)?;
                }
            } else {
                writeln!(self.writer, "{}", speech.segment.text)?;
            }
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn format_sentences(&mut self, _source: &str, sentences: &[String]) -> Result<()> {
        for sentence in sentences {
            writeln!(self.writer, "{sentence}")?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
