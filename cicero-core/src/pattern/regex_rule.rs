use super::{CompiledMatcher, PatternRule, ResidualPolicy, RuleConfig, SpeakerMarker};
use crate::error::Result;
use crate::segment::{SegmentKind, SpeakerAttributes, SpeechSegment};
use crate::specification::Specification;
use std::ops::Range;
use std::sync::OnceLock;

/// Data-driven rule built from a [`RuleConfig`]
///
/// Every accepted speaker marker opens a speech that runs to the next
/// accepted marker or the end of the session region. Markers whose speaker
/// label starts with an excluded word are not boundaries; their text stays
/// with the preceding speech.
#[derive(Debug)]
pub struct RegexPatternRule {
    config: RuleConfig,
    compiled: OnceLock<CompiledMatcher>,
}

impl RegexPatternRule {
    /// Create a rule; the matcher is compiled on first use or at registration
    pub fn new(config: RuleConfig) -> Self {
        Self {
            config,
            compiled: OnceLock::new(),
        }
    }

    /// Parse a rule from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        RuleConfig::from_toml_str(content).map(Self::new)
    }

    /// Parse a rule from a TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        RuleConfig::from_file(path).map(Self::new)
    }

    /// The underlying configuration
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    fn is_excluded(&self, marker: &SpeakerMarker) -> bool {
        let first_word = marker.speaker.split_whitespace().next().unwrap_or_default();
        self.config
            .matcher
            .exclude_speakers
            .iter()
            .any(|word| word == first_word)
    }

    fn residual(&self, text: &str, span: Range<usize>, kind: SegmentKind) -> Option<SpeechSegment> {
        if text[span.clone()].trim().is_empty() {
            return None;
        }
        match self.config.matcher.residual {
            ResidualPolicy::Retain => Some(SpeechSegment::from_span(
                text,
                span,
                String::new(),
                SpeakerAttributes::default(),
                kind,
            )),
            ResidualPolicy::Discard => {
                log::debug!(
                    "{}: discarding {} bytes of {:?} text",
                    self.config.specification,
                    span.len(),
                    kind
                );
                None
            }
        }
    }
}

impl PatternRule for RegexPatternRule {
    fn specification(&self) -> &Specification {
        &self.config.specification
    }

    fn description(&self) -> &str {
        &self.config.metadata.description
    }

    fn residual_policy(&self) -> ResidualPolicy {
        self.config.matcher.residual
    }

    fn compile(&self) -> Result<&CompiledMatcher> {
        if let Some(matcher) = self.compiled.get() {
            return Ok(matcher);
        }

        let session = self.config.session.as_ref();
        let matcher = CompiledMatcher::new(
            &self.config.specification,
            &self.config.matcher.pattern,
            session.and_then(|s| s.start.as_deref()),
            session.and_then(|s| s.end.as_deref()),
        )?;

        // A racing caller may have won; both compiled the same expression.
        Ok(self.compiled.get_or_init(|| matcher))
    }

    fn extract(&self, raw_text: &str) -> Result<Vec<SpeechSegment>> {
        let matcher = self.compile()?;
        let region = matcher.session_region(raw_text);

        let markers: Vec<SpeakerMarker> = matcher
            .speaker_markers(raw_text, region.clone())
            .into_iter()
            .filter(|marker| {
                let excluded = self.is_excluded(marker);
                if excluded {
                    log::trace!("skipping excluded speaker marker '{}'", marker.speaker);
                }
                !excluded
            })
            .collect();

        log::debug!(
            "{}: {} speaker markers in region {}..{}",
            self.config.specification,
            markers.len(),
            region.start,
            region.end
        );

        let mut segments = Vec::with_capacity(markers.len() + 2);

        let first_start = markers.first().map_or(region.end, |m| m.span.start);
        if let Some(preamble) = self.residual(raw_text, 0..first_start, SegmentKind::Preamble) {
            segments.push(preamble);
        }

        for (idx, marker) in markers.iter().enumerate() {
            let end = markers
                .get(idx + 1)
                .map_or(region.end, |next| next.span.start);
            segments.push(SpeechSegment::from_span(
                raw_text,
                marker.body_start..end,
                marker.speaker.clone(),
                marker.attributes.clone(),
                SegmentKind::Speech,
            ));
        }

        if let Some(closing) = self.residual(raw_text, region.end..raw_text.len(), SegmentKind::Closing)
        {
            segments.push(closing);
        }

        for (ordinal, segment) in segments.iter_mut().enumerate() {
            segment.ordinal = ordinal;
        }

        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(residual: &str, extra: &str) -> RegexPatternRule {
        let content = format!(
            r#"
[specification]
country = "NL"
institution = "PARLIAMENT"
language = "nl"
protocol_type = "PLENARY"

[matcher]
pattern = '''(?m)^(?P<speaker>\p{{Lu}}(?:[\p{{Lu}}'\- ]*\p{{Lu}})?):[ \t]*'''
residual = "{residual}"
{extra}
"#
        );
        RegexPatternRule::from_toml_str(&content).unwrap()
    }

    #[test]
    fn test_compile_is_cached() {
        let rule = rule("retain", "");
        let first = rule.compile().unwrap() as *const CompiledMatcher;
        let second = rule.compile().unwrap() as *const CompiledMatcher;
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_two_speakers() {
        let rule = rule("retain", "");
        let text = "JANSEN: Welcome. Let us begin.\nDE VRIES: I agree.";
        let segments = rule.extract(text).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].speaker, "JANSEN");
        assert_eq!(segments[0].text, "Welcome. Let us begin.");
        assert_eq!(segments[0].ordinal, 0);
        assert_eq!(segments[1].speaker, "DE VRIES");
        assert_eq!(segments[1].text, "I agree.");
        assert_eq!(segments[1].ordinal, 1);
    }

    #[test]
    fn test_retained_preamble() {
        let rule = rule("retain", "");
        let text = "Session of 4 June.\nJANSEN: Welcome.";
        let segments = rule.extract(text).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].kind, SegmentKind::Preamble);
        assert_eq!(segments[0].text, "Session of 4 June.");
        assert!(segments[0].speaker.is_empty());
        assert_eq!(segments[1].kind, SegmentKind::Speech);
        assert_eq!(segments[1].ordinal, 1);
    }

    #[test]
    fn test_discarded_preamble() {
        let rule = rule("discard", "");
        let text = "Session of 4 June.\nJANSEN: Welcome.";
        let segments = rule.extract(text).unwrap();

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].speaker, "JANSEN");
        assert_eq!(segments[0].ordinal, 0);
    }

    #[test]
    fn test_no_markers_retain_keeps_whole_text() {
        let rule = rule("retain", "");
        let segments = rule.extract("  just some notes  ").unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Preamble);
        assert_eq!(segments[0].text, "just some notes");
    }

    #[test]
    fn test_excluded_speaker_is_not_a_boundary() {
        let rule = rule("retain", r#"exclude_speakers = ["NOTE"]"#);
        let text = "JANSEN: Welcome.\nNOTE: applause\nDE VRIES: Thanks.";
        let segments = rule.extract(text).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "Welcome.\nNOTE: applause");
        assert_eq!(segments[1].speaker, "DE VRIES");
    }

    #[test]
    fn test_empty_speech_is_kept() {
        let rule = rule("retain", "");
        let segments = rule.extract("JANSEN:\nDE VRIES: Yes.").unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "");
        assert_eq!(segments[0].span.start, segments[0].span.end);
    }

    #[test]
    fn test_session_markers_bound_extraction() {
        let rule = rule(
            "retain",
            "\n[session]\nstart = '(?m)^OPENING$'\nend = '(?m)^CLOSING$'",
        );
        let text = "HEADER: ignored\nOPENING\nJANSEN: Hello.\nCLOSING\nFOOTER: ignored";
        let segments = rule.extract(text).unwrap();

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].kind, SegmentKind::Preamble);
        assert_eq!(segments[0].text, "HEADER: ignored\nOPENING");
        assert_eq!(segments[1].speaker, "JANSEN");
        assert_eq!(segments[1].text, "Hello.");
        assert_eq!(segments[2].kind, SegmentKind::Closing);
        assert_eq!(segments[2].text, "CLOSING\nFOOTER: ignored");
    }
}
