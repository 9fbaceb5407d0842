//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use cicero_core::{ProtocolExtraction, Sentence};
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs one record per input file as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    records: Vec<serde_json::Value>,
}

/// Record for an extracted protocol
#[derive(Debug, Serialize)]
struct ProtocolRecord<'a> {
    source: &'a str,
    #[serde(flatten)]
    protocol: &'a ProtocolExtraction,
}

/// Record for a sentence-split document
#[derive(Debug, Serialize)]
struct SentenceRecord<'a> {
    source: &'a str,
    sentences: Vec<Sentence>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            records: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_protocol(
        &mut self,
        source: &str,
        protocol: &ProtocolExtraction,
        with_sentences: bool,
    ) -> Result<()> {
        let mut record = serde_json::to_value(ProtocolRecord { source, protocol })?;
        if !with_sentences {
            if let Some(speeches) = record
                .get_mut("speeches")
                .and_then(serde_json::Value::as_array_mut)
            {
                for speech in speeches {
                    if let Some(object) = speech.as_object_mut() {
                        object.remove("sentences");
                    }
                }
            }
        }
        self.records.push(record);
        Ok(())
    }

    fn format_sentences(&mut self, source: &str, sentences: &[String]) -> Result<()> {
        let sentences = sentences
            .iter()
            .enumerate()
            .map(|(ordinal, text)| Sentence {
                ordinal,
                text: text.clone(),
            })
            .collect();
        self.records
            .push(serde_json::to_value(SentenceRecord { source, sentences })?);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.records)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{sample_protocol, SharedBuffer};

    fn render(with_sentences: bool) -> serde_json::Value {
        let buffer = SharedBuffer::default();
        let mut formatter = JsonFormatter::new(buffer.clone(), false);
        formatter
            .format_protocol("tk.txt", &sample_protocol(), with_sentences)
            .unwrap();
        formatter.finish().unwrap();
        serde_json::from_str(&buffer.contents()).unwrap()
    }

    #[test]
    fn test_protocol_record() {
        let json = render(true);
        let record = &json[0];
        assert_eq!(record["source"], "tk.txt");
        assert_eq!(record["specification"]["country"], "NL");
        assert_eq!(record["speeches"][1]["speaker"], "JANSEN");
        assert_eq!(record["speeches"][1]["attributes"]["party"], "VVD");
        assert_eq!(record["speeches"][1]["sentences"][1]["text"], "Let us begin.");
        assert_eq!(record["speeches"][1]["sentences"][1]["ordinal"], 1);
    }

    #[test]
    fn test_sentences_omitted_when_not_requested() {
        let json = render(false);
        assert!(json[0]["speeches"][1].get("sentences").is_none());
        assert_eq!(json[0]["speeches"][1]["text"], "Welcome. Let us begin.");
    }

    #[test]
    fn test_sentence_record() {
        let buffer = SharedBuffer::default();
        let mut formatter = JsonFormatter::new(buffer.clone(), true);
        formatter
            .format_sentences("a.txt", &["One.".to_string(), "Two.".to_string()])
            .unwrap();
        formatter.finish().unwrap();

        let json: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(json[0]["source"], "a.txt");
        assert_eq!(json[0]["sentences"][1]["text"], "Two.");
    }

    #[test]
    fn test_empty_output_is_empty_array() {
        let buffer = SharedBuffer::default();
        let mut formatter = JsonFormatter::new(buffer.clone(), false);
        formatter.finish().unwrap();
        assert_eq!(buffer.contents(), "[]\n");
    }
}
