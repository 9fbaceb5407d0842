//! Sentence splitting across the embedded languages and custom policies

use cicero_core::sentence::{available_languages, get_language_config};
use cicero_core::{LanguageConfig, SentenceSplitter, SplitPolicy};
use std::io::Write;
use tempfile::NamedTempFile;

fn split(code: &str, text: &str) -> Vec<String> {
    SentenceSplitter::for_language(code)
        .unwrap()
        .split(text)
        .collect()
}

#[test]
fn test_every_embedded_language_loads() {
    for code in available_languages() {
        let splitter = SentenceSplitter::for_language(code).unwrap();
        assert_eq!(splitter.policy().language(), code);
        assert_eq!(
            splitter.split("One sentence. Another one!").count(),
            2,
            "language {code}"
        );
    }
}

#[test]
fn test_german_parliamentary_phrases() {
    assert_eq!(
        split(
            "de",
            "Gemäß Art. 20 Abs. 1 GG ist das so. Das regelt § 5 Nr. 3 usw. Weitere Fragen?"
        ),
        vec![
            "Gemäß Art. 20 Abs. 1 GG ist das so.",
            "Das regelt § 5 Nr. 3 usw. Weitere Fragen?"
        ]
    );
}

#[test]
fn test_german_spaced_and_compact_abbreviations() {
    assert_eq!(
        split("de", "Das gilt d. h. auch hier. Das gilt z.B. morgen. Ende."),
        vec!["Das gilt d. h. auch hier.", "Das gilt z.B. morgen.", "Ende."]
    );
}

#[test]
fn test_english_titles_and_initials() {
    assert_eq!(
        split(
            "en",
            "The Rt. Hon. Member for Bath spoke. Mr. J. R. Smith replied. Order!"
        ),
        vec![
            "The Rt. Hon. Member for Bath spoke.",
            "Mr. J. R. Smith replied.",
            "Order!"
        ]
    );
}

#[test]
fn test_dutch_abbreviations() {
    assert_eq!(
        split(
            "nl",
            "Dat is bijv. het geval. Mevr. Jansen en Dhr. De Vries stemmen tegen. Dank u."
        ),
        vec![
            "Dat is bijv. het geval.",
            "Mevr. Jansen en Dhr. De Vries stemmen tegen.",
            "Dank u."
        ]
    );
}

#[test]
fn test_whitespace_is_collapsed() {
    assert_eq!(
        split("en", "  First\n\tline   continues.\n\n  Second\u{a0}one. "),
        vec!["First line continues.", "Second one."]
    );
}

#[test]
fn test_external_language_config() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[metadata]
code = "la"
name = "Latin"

[terminators]
chars = [".", ";"]

[abbreviations]
praenomina = ["M", "Cn"]
"#
    )
    .unwrap();

    let config = LanguageConfig::from_file(file.path()).unwrap();
    let splitter = SentenceSplitter::from_config(&config).unwrap();
    let sentences: Vec<String> = splitter
        .split("Cn. Pompeius venit; M. Tullius Cicero dixit. Finis")
        .collect();
    assert_eq!(
        sentences,
        vec!["Cn. Pompeius venit;", "M. Tullius Cicero dixit.", "Finis"]
    );
}

#[test]
fn test_policy_from_embedded_config() {
    let config = get_language_config("german").unwrap();
    let policy = SplitPolicy::from_config(config).unwrap();
    assert!(policy.ordinal_numbers());
    assert!(policy.initials());
    assert!(policy.abbreviations().contains("Z.B"));
    assert!(policy.terminators().contains(&'?'));
    assert!(policy.closers().contains(&'»'));
}
