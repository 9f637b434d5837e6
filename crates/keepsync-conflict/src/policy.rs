//! Policy engine for automatic strategy selection
//!
//! Evaluates conflict rules from configuration to pick a resolution
//! strategy for a path. Rules are matched using glob patterns in
//! first-match-wins order; `manual` means no automatic choice.
//!
//! Patterns are written relative to a root directory (`Documents/**`).
//! [`PolicyEngine::evaluate_in`] strips that root before matching.

use std::path::Path;

use glob::Pattern;
use tracing::{debug, trace};

use keepsync_core::{
    config::{ConflictRule, ConflictsConfig},
    domain::conflict::Resolution,
};

use crate::error::ConflictError;

/// Validates a rule's glob pattern and strategy
pub fn validate_rule(rule: &ConflictRule) -> Result<(), ConflictError> {
    Pattern::new(&rule.pattern).map_err(|e| ConflictError::InvalidPattern {
        pattern: rule.pattern.clone(),
        reason: e.to_string(),
    })?;

    parse_strategy(&rule.strategy).ok_or_else(|| ConflictError::InvalidPattern {
        pattern: rule.pattern.clone(),
        reason: format!(
            "invalid strategy '{}'; valid: keep_local, keep_remote, keep_both, manual",
            rule.strategy
        ),
    })?;

    Ok(())
}

/// Engine that evaluates conflict resolution rules
pub struct PolicyEngine {
    rules: Vec<(Pattern, Option<Resolution>)>,
    default_strategy: Option<Resolution>,
}

impl PolicyEngine {
    /// Creates a PolicyEngine from the default strategy string and a list of rules
    ///
    /// Invalid rules are logged and skipped. An unknown default falls back
    /// to manual.
    pub fn new(default_strategy: &str, rules: &[ConflictRule]) -> Self {
        let default = parse_strategy(default_strategy).flatten();

        let compiled_rules: Vec<(Pattern, Option<Resolution>)> = rules
            .iter()
            .filter_map(|rule| {
                let pattern = match Pattern::new(&rule.pattern) {
                    Ok(p) => p,
                    Err(e) => {
                        tracing::warn!(
                            pattern = %rule.pattern,
                            error = %e,
                            "Skipping invalid conflict rule pattern"
                        );
                        return None;
                    }
                };
                let resolution = match parse_strategy(&rule.strategy) {
                    Some(r) => r,
                    None => {
                        tracing::warn!(
                            strategy = %rule.strategy,
                            "Skipping invalid conflict rule strategy"
                        );
                        return None;
                    }
                };
                Some((pattern, resolution))
            })
            .collect();

        debug!(
            rules_count = compiled_rules.len(),
            default = %display_strategy(default),
            "PolicyEngine initialized"
        );

        Self {
            rules: compiled_rules,
            default_strategy: default,
        }
    }

    /// Creates a PolicyEngine from the `conflicts` configuration section
    pub fn from_config(config: &ConflictsConfig) -> Self {
        Self::new(&config.default_strategy, &config.rules)
    }

    /// Evaluates the policy for a given path
    ///
    /// Uses first-match-wins: the first rule whose glob matches the path
    /// determines the resolution. If no rule matches, returns the default
    /// strategy. `None` means the user has to decide.
    pub fn evaluate(&self, path: &str) -> Option<Resolution> {
        for (pattern, resolution) in &self.rules {
            if pattern.matches(path) {
                trace!(
                    path = %path,
                    pattern = %pattern,
                    resolution = %display_strategy(*resolution),
                    "Conflict rule matched"
                );
                return *resolution;
            }
        }

        trace!(
            path = %path,
            default = %display_strategy(self.default_strategy),
            "No conflict rule matched, using default"
        );
        self.default_strategy
    }

    /// Evaluates the policy for `path` relative to `root`
    ///
    /// Paths outside `root` are matched as given, so rules like `*.tmp` still apply.
    pub fn evaluate_in(&self, path: &Path, root: &Path) -> Option<Resolution> {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.evaluate(&relative.to_string_lossy())
    }

    /// Returns the default resolution strategy
    pub fn default_strategy(&self) -> Option<Resolution> {
        self.default_strategy
    }

    /// Returns the number of compiled rules
    pub fn rules_count(&self) -> usize {
        self.rules.len()
    }
}

/// Parses a strategy string; `Some(None)` is the explicit `manual`
fn parse_strategy(s: &str) -> Option<Option<Resolution>> {
    match s {
        "manual" => Some(None),
        other => other.parse::<Resolution>().ok().map(Some),
    }
}

fn display_strategy(strategy: Option<Resolution>) -> String {
    strategy.map_or_else(|| "manual".to_string(), |r| r.to_string())
}
