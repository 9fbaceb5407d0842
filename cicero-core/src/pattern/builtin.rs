//! Built-in extraction rules
//!
//! The static table below is the complete list of rules shipped with the
//! crate. Adding a jurisdiction means adding a TOML file under
//! `configs/patterns/` and one line here.

use super::{RegexPatternRule, RuleConfig};
use crate::error::{Error, Result};
use std::sync::OnceLock;

macro_rules! embed_rule_config {
    ($name:expr, $path:expr) => {
        ($name, include_str!($path))
    };
}

const EMBEDDED_RULES: [(&str, &str); 2] = [
    embed_rule_config!(
        "bundestag_plenary",
        "../../configs/patterns/bundestag_plenary.toml"
    ),
    embed_rule_config!(
        "tweede_kamer_plenary",
        "../../configs/patterns/tweede_kamer_plenary.toml"
    ),
];

static RULE_CONFIGS: OnceLock<std::result::Result<Vec<RuleConfig>, String>> = OnceLock::new();

fn load_embedded_configs() -> std::result::Result<Vec<RuleConfig>, String> {
    EMBEDDED_RULES
        .iter()
        .map(|(name, content)| {
            RuleConfig::from_toml_str(content)
                .map_err(|e| format!("Failed to parse built-in rule '{name}': {e}"))
        })
        .collect()
}

/// Parsed configurations of every built-in rule, in table order
pub fn builtin_rule_configs() -> Result<&'static [RuleConfig]> {
    RULE_CONFIGS
        .get_or_init(load_embedded_configs)
        .as_deref()
        .map_err(|e| Error::Configuration(e.clone()))
}

/// Fresh, uncompiled instances of every built-in rule
pub fn builtin_rules() -> Result<Vec<RegexPatternRule>> {
    Ok(builtin_rule_configs()?
        .iter()
        .cloned()
        .map(RegexPatternRule::new)
        .collect())
}

/// Names of the embedded rule files
pub fn builtin_rule_names() -> impl Iterator<Item = &'static str> {
    EMBEDDED_RULES.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternRule;
    use crate::specification::Specification;

    #[test]
    fn test_builtin_configs_parse() {
        let configs = builtin_rule_configs().expect("built-in rules should parse");
        assert_eq!(configs.len(), EMBEDDED_RULES.len());
    }

    #[test]
    fn test_builtin_rules_compile() {
        for rule in builtin_rules().unwrap() {
            assert!(
                rule.compile().is_ok(),
                "built-in rule {} failed to compile",
                rule.specification()
            );
        }
    }

    #[test]
    fn test_builtin_specifications() {
        let specs: Vec<Specification> = builtin_rule_configs()
            .unwrap()
            .iter()
            .map(|c| c.specification.clone())
            .collect();
        assert!(specs.contains(&Specification::new("DE", "PARLIAMENT", "de", "PLENARY")));
        assert!(specs.contains(&Specification::new("NL", "PARLIAMENT", "nl", "PLENARY")));
    }

    #[test]
    fn test_builtin_configs_are_cached() {
        let first = builtin_rule_configs().unwrap();
        let second = builtin_rule_configs().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_builtin_rule_names() {
        let names: Vec<&str> = builtin_rule_names().collect();
        assert_eq!(names, vec!["bundestag_plenary", "tweede_kamer_plenary"]);
    }
}
