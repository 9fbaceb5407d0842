//! The four-part key that selects an extraction rule

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Country, institution, language and protocol type of a document
///
/// Used only as a lookup key. Two specifications are equal when all four
/// parts are equal, byte for byte; there is no case folding and no wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Specification {
    /// Country code, e.g. `DE`
    #[serde(rename = "country")]
    pub country_code: String,
    /// Institution code, e.g. `PARLIAMENT`
    #[serde(rename = "institution")]
    pub institution_code: String,
    /// Language code, e.g. `de`
    #[serde(rename = "language")]
    pub language_code: String,
    /// Protocol type, e.g. `PLENARY`
    pub protocol_type: String,
}

impl Specification {
    /// Create a specification from its four parts
    pub fn new(
        country_code: impl Into<String>,
        institution_code: impl Into<String>,
        language_code: impl Into<String>,
        protocol_type: impl Into<String>,
    ) -> Self {
        Self {
            country_code: country_code.into(),
            institution_code: institution_code.into(),
            language_code: language_code.into(),
            protocol_type: protocol_type.into(),
        }
    }

    /// Check that no part is empty
    pub fn validate(&self) -> Result<()> {
        let parts = [
            ("country", &self.country_code),
            ("institution", &self.institution_code),
            ("language", &self.language_code),
            ("protocol_type", &self.protocol_type),
        ];
        for (name, value) in parts {
            if value.trim().is_empty() {
                return Err(Error::Configuration(format!(
                    "specification field '{name}' is empty"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Specification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.country_code, self.institution_code, self.language_code, self.protocol_type
        )
    }
}

impl FromStr for Specification {
    type Err = Error;

    /// Parse the `country/institution/language/protocol_type` form
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('/').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(Error::Configuration(format!(
                "expected 'country/institution/language/protocol_type', got '{s}'"
            )));
        }
        let spec = Self::new(parts[0], parts[1], parts[2], parts[3]);
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let spec = Specification::new("DE", "PARLIAMENT", "de", "PLENARY");
        assert_eq!(spec.to_string(), "DE/PARLIAMENT/de/PLENARY");

        let parsed: Specification = "DE/PARLIAMENT/de/PLENARY".parse().unwrap();
        assert_eq!(parsed, spec);
    }

    #[test]
    fn test_parse_trims_parts() {
        let parsed: Specification = " NL / PARLIAMENT / nl / PLENARY ".parse().unwrap();
        assert_eq!(parsed, Specification::new("NL", "PARLIAMENT", "nl", "PLENARY"));
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        assert!("DE/PARLIAMENT/de".parse::<Specification>().is_err());
        assert!("DE/PARLIAMENT/de/PLENARY/extra".parse::<Specification>().is_err());
    }

    #[test]
    fn test_parse_rejects_empty_part() {
        let err = "DE//de/PLENARY".parse::<Specification>().unwrap_err();
        assert!(err.to_string().contains("institution"));
    }

    #[test]
    fn test_equality_is_exact() {
        let upper = Specification::new("NL", "PARLIAMENT", "nl", "PLENARY");
        let lower = Specification::new("nl", "PARLIAMENT", "nl", "PLENARY");
        assert_ne!(upper, lower);
    }
}
