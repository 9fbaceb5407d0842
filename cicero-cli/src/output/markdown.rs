//! Markdown output formatter

use super::{speaker_label, OutputFormatter};
use anyhow::Result;
use cicero_core::ProtocolExtraction;
use std::io::Write;

/// Markdown formatter - a section per input file, a subsection per speech
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    speech_count: usize,
    sentence_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            speech_count: 0,
            sentence_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_protocol(
        &mut self,
        source: &str,
        protocol: &ProtocolExtraction,
        with_sentences: bool,
    ) -> Result<()> {
        writeln!(self.writer, "## {source}")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "*{}*", protocol.specification)?;

        for speech in &protocol.speeches {
            self.speech_count += 1;
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "### {}. {}",
                speech.segment.ordinal + 1,
                speaker_label(speech)
            )?;
            writeln!(self.writer)?;

            if with_sentences {
                for (idx, sentence) in speech.sentences.iter().enumerate() {
                    writeln!(self.writer, "{}. {}", idx + 1, sentence.text)?;
                }
                self.sentence_count += speech.sentences.len();
            } else {
                writeln!(self.writer, "{}", speech.segment.text)?;
            }
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn format_sentences(&mut self, source: &str, sentences: &[String]) -> Result<()> {
        writeln!(self.writer, "## {source}")?;
        writeln!(self.writer)?;
        for (idx, sentence) in sentences.iter().enumerate() {
            writeln!(self.writer, "{}. {sentence}", idx + 1)?;
        }
        writeln!(self.writer)?;
        self.sentence_count += sentences.len();
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        if self.speech_count > 0 {
            writeln!(
                self.writer,
                "*Total speeches: {}, sentences: {}*",
                self.speech_count, self.sentence_count
            )?;
        } else {
            writeln!(self.writer, "*Total sentences: {}*", self.sentence_count)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
