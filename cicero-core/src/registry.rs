//! Catalog of extraction rules keyed by specification
//!
//! The registry has two phases. During initialization rules are registered
//! (and compiled, so a broken expression aborts startup). [`PatternRegistry::seal`]
//! ends that phase; afterwards the registry is shared read-only, typically
//! as `Arc<PatternRegistry>`, and any further registration fails.

use crate::error::{Error, Result};
use crate::pattern::{builtin, PatternRule, RegexPatternRule, RuleConfig};
use crate::specification::Specification;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Registry of pattern rules with exact-match lookup
#[derive(Debug, Default)]
pub struct PatternRegistry {
    rules: Vec<Arc<dyn PatternRule>>,
    index: HashMap<Specification, usize>,
    sealed: bool,
}

impl PatternRegistry {
    /// Create an empty, unsealed registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in rule, already sealed
    pub fn with_builtin_rules() -> Result<Self> {
        let mut registry = Self::new();
        registry.register_builtin_rules()?;
        registry.seal();
        Ok(registry)
    }

    /// Register every built-in rule
    pub fn register_builtin_rules(&mut self) -> Result<()> {
        for rule in builtin::builtin_rules()? {
            self.register(rule)?;
        }
        Ok(())
    }

    /// Register a rule, compiling its matcher eagerly
    ///
    /// Fails with [`Error::DuplicateSpecification`] if a rule with the same
    /// specification is already present; the existing rule is kept.
    pub fn register<R: PatternRule>(&mut self, rule: R) -> Result<()> {
        self.register_shared(Arc::new(rule))
    }

    /// Register an already shared rule
    pub fn register_shared(&mut self, rule: Arc<dyn PatternRule>) -> Result<()> {
        let specification = rule.specification().clone();

        if self.sealed {
            log::error!("registration of {specification} attempted on a sealed registry");
            return Err(Error::RegistrySealed(specification));
        }

        if self.index.contains_key(&specification) {
            return Err(Error::DuplicateSpecification(specification));
        }

        rule.compile()?;

        log::debug!("registered pattern rule {specification}");
        self.index.insert(specification, self.rules.len());
        self.rules.push(rule);
        Ok(())
    }

    /// Register a rule from its configuration
    pub fn register_config(&mut self, config: RuleConfig) -> Result<()> {
        self.register(RegexPatternRule::new(config))
    }

    /// Register the rule defined in a TOML file
    pub fn load_rule_file(&mut self, path: &Path) -> Result<Specification> {
        let rule = RegexPatternRule::from_file(path)?;
        let specification = rule.specification().clone();
        self.register(rule)?;
        Ok(specification)
    }

    /// Register every `*.toml` rule file in a directory, in file name order
    pub fn load_rule_dir(&mut self, dir: &Path) -> Result<Vec<Specification>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
                paths.push(path);
            }
        }
        paths.sort();

        paths.iter().map(|path| self.load_rule_file(path)).collect()
    }

    /// End the initialization phase
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Whether the initialization phase has ended
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// The unique rule registered under `specification`
    pub fn resolve(&self, specification: &Specification) -> Result<Arc<dyn PatternRule>> {
        let rule = self
            .index
            .get(specification)
            .map(|&idx| Arc::clone(&self.rules[idx]))
            .ok_or_else(|| Error::NoMatchingPattern(specification.clone()))?;
        log::debug!("resolved pattern rule for {specification}");
        Ok(rule)
    }

    /// Whether a rule is registered under `specification`
    pub fn contains(&self, specification: &Specification) -> bool {
        self.index.contains_key(specification)
    }

    /// Registered specifications in registration order
    pub fn specifications(&self) -> impl Iterator<Item = &Specification> {
        self.rules.iter().map(|rule| rule.specification())
    }

    /// Registered rules in registration order
    pub fn rules(&self) -> impl Iterator<Item = &Arc<dyn PatternRule>> {
        self.rules.iter()
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rule is registered
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
