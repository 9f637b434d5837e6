//! Configuration module for keepsync.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::naming::DEFAULT_CONFLICT_MARKER;

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for keepsync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub conflicts: ConflictsConfig,
    pub logging: LoggingConfig,
}

/// Conflict resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConflictsConfig {
    /// Default conflict strategy: `manual`, `keep_local`, `keep_remote`, or `keep_both`.
    pub default_strategy: String,
    /// Upper bound on the `_N` suffix search when keeping both versions.
    pub max_rename_attempts: u32,
    /// Marker appended to the stem of a kept-aside local copy.
    pub marker: String,
    /// Per-path strategy rules, first match wins.
    pub rules: Vec<ConflictRule>,
}

/// A single conflict resolution rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRule {
    /// Glob pattern to match file paths (e.g., "**/*.docx", "Documents/**")
    pub pattern: String,
    /// Resolution strategy to apply when the pattern matches
    pub strategy: String,
}

impl ConflictRule {
    pub fn new(pattern: impl Into<String>, strategy: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            strategy: strategy.into(),
        }
    }
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
    /// Output format: `text` or `json`.
    pub format: String,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/keepsync/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("keepsync")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default cap on the keep-both suffix search.
pub const DEFAULT_MAX_RENAME_ATTEMPTS: u32 = 10_000;

impl Default for ConflictsConfig {
    fn default() -> Self {
        Self {
            default_strategy: "manual".to_string(),
            max_rename_attempts: DEFAULT_MAX_RENAME_ATTEMPTS,
            marker: DEFAULT_CONFLICT_MARKER.to_string(),
            rules: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"conflicts.marker"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid values for `logging.format`.
const VALID_LOG_FORMATS: &[&str] = &["text", "json"];

/// Valid values for `conflicts.default_strategy` and rule strategies.
pub const VALID_CONFLICT_STRATEGIES: &[&str] = &["manual", "keep_local", "keep_remote", "keep_both"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid. Rule glob syntax
    /// is checked by the policy engine, which owns the glob dependency.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- conflicts ---
        if !VALID_CONFLICT_STRATEGIES.contains(&self.conflicts.default_strategy.as_str()) {
            errors.push(ValidationError {
                field: "conflicts.default_strategy".into(),
                message: format!(
                    "invalid strategy '{}'; valid options: {}",
                    self.conflicts.default_strategy,
                    VALID_CONFLICT_STRATEGIES.join(", ")
                ),
            });
        }
        if self.conflicts.max_rename_attempts == 0 {
            errors.push(ValidationError {
                field: "conflicts.max_rename_attempts".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.conflicts.marker.is_empty() {
            errors.push(ValidationError {
                field: "conflicts.marker".into(),
                message: "must not be empty".into(),
            });
        } else if self
            .conflicts
            .marker
            .chars()
            .any(|c| std::path::is_separator(c) || c == '\0')
        {
            errors.push(ValidationError {
                field: "conflicts.marker".into(),
                message: format!(
                    "must not contain path separators: '{}'",
                    self.conflicts.marker
                ),
            });
        }
        for (i, rule) in self.conflicts.rules.iter().enumerate() {
            if !VALID_CONFLICT_STRATEGIES.contains(&rule.strategy.as_str()) {
                errors.push(ValidationError {
                    field: format!("conflicts.rules[{i}].strategy"),
                    message: format!(
                        "invalid strategy '{}'; valid options: {}",
                        rule.strategy,
                        VALID_CONFLICT_STRATEGIES.join(", ")
                    ),
                });
            }
            if rule.pattern.is_empty() {
                errors.push(ValidationError {
                    field: format!("conflicts.rules[{i}].pattern"),
                    message: "must not be empty".into(),
                });
            }
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }
        if !VALID_LOG_FORMATS.contains(&self.logging.format.as_str()) {
            errors.push(ValidationError {
                field: "logging.format".into(),
                message: format!(
                    "invalid format '{}'; valid options: {}",
                    self.logging.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust
/// use keepsync_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .conflicts_default_strategy("keep_both")
///     .conflicts_max_rename_attempts(500)
///     .logging_level("debug")
///     .build();
/// assert_eq!(config.conflicts.max_rename_attempts, 500);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- conflicts ---

    pub fn conflicts_default_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.config.conflicts.default_strategy = strategy.into();
        self
    }

    pub fn conflicts_max_rename_attempts(mut self, attempts: u32) -> Self {
        self.config.conflicts.max_rename_attempts = attempts;
        self
    }

    pub fn conflicts_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.conflicts.marker = marker.into();
        self
    }

    pub fn conflicts_rule(mut self, pattern: impl Into<String>, strategy: impl Into<String>) -> Self {
        self.config
            .conflicts
            .rules
            .push(ConflictRule::new(pattern, strategy));
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn logging_format(mut self, format: impl Into<String>) -> Self {
        self.config.logging.format = format.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    // -- Defaults --

    #[test]
    fn default_config_has_sensible_values() {
        let cfg = Config::default();
        assert_eq!(cfg.conflicts.default_strategy, "manual");
        assert_eq!(cfg.conflicts.max_rename_attempts, 10_000);
        assert_eq!(cfg.conflicts.marker, "_conflict");
        assert!(cfg.conflicts.rules.is_empty());
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.format, "text");
    }

    #[test]
    fn default_config_passes_validation() {
        let errors = Config::default().validate();
        assert!(errors.is_empty(), "unexpected validation errors: {errors:?}");
    }

    // -- Loading --

    #[test]
    fn load_from_yaml_file() {
        let yaml = r#"
conflicts:
  default_strategy: keep_both
  max_rename_attempts: 250
  marker: _mine
  rules:
    - pattern: "**/*.tmp"
      strategy: keep_remote
    - pattern: "Documents/**"
      strategy: keep_both
logging:
  level: debug
  format: json
"#;
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        tmp.write_all(yaml.as_bytes()).unwrap();
        tmp.flush().unwrap();

        let cfg = Config::load(tmp.path()).expect("load config");
        assert_eq!(cfg.conflicts.default_strategy, "keep_both");
        assert_eq!(cfg.conflicts.max_rename_attempts, 250);
        assert_eq!(cfg.conflicts.marker, "_mine");
        assert_eq!(cfg.conflicts.rules.len(), 2);
        assert_eq!(
            cfg.conflicts.rules[0],
            ConflictRule::new("**/*.tmp", "keep_remote")
        );
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.format, "json");
    }

    #[test]
    fn load_partial_yaml_fills_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        tmp.write_all(b"conflicts:\n  default_strategy: keep_local\n")
            .unwrap();
        tmp.flush().unwrap();

        let cfg = Config::load(tmp.path()).expect("load config");
        assert_eq!(cfg.conflicts.default_strategy, "keep_local");
        assert_eq!(cfg.conflicts.max_rename_attempts, DEFAULT_MAX_RENAME_ATTEMPTS);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn load_or_default_returns_default_on_missing_file() {
        let cfg = Config::load_or_default(Path::new("/nonexistent/config.yaml"));
        assert_eq!(cfg.conflicts.default_strategy, "manual");
    }

    #[test]
    fn load_returns_error_on_invalid_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        tmp.write_all(b"not: [valid: yaml: {{{").unwrap();
        tmp.flush().unwrap();

        assert!(Config::load(tmp.path()).is_err());
    }

    // -- Validation --

    #[test]
    fn validate_catches_invalid_conflict_strategy() {
        let mut cfg = Config::default();
        cfg.conflicts.default_strategy = "yolo".to_string();
        let errors = cfg.validate();
        assert!(errors
            .iter()
            .any(|e| e.field == "conflicts.default_strategy" && e.message.contains("yolo")));
    }

    #[test]
    fn validate_catches_zero_rename_attempts() {
        let mut cfg = Config::default();
        cfg.conflicts.max_rename_attempts = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "conflicts.max_rename_attempts"));
    }

    #[test]
    fn validate_catches_bad_marker() {
        let mut cfg = Config::default();
        cfg.conflicts.marker = String::new();
        assert!(cfg.validate().iter().any(|e| e.field == "conflicts.marker"));

        cfg.conflicts.marker = "a/b".to_string();
        assert!(cfg
            .validate()
            .iter()
            .any(|e| e.field == "conflicts.marker" && e.message.contains("separators")));
    }

    #[test]
    fn validate_catches_bad_rule() {
        let cfg = ConfigBuilder::new()
            .conflicts_rule("**/*.txt", "keep_local")
            .conflicts_rule("", "later")
            .build();
        let fields: Vec<String> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"conflicts.rules[1].strategy".to_string()));
        assert!(fields.contains(&"conflicts.rules[1].pattern".to_string()));
        assert!(!fields.iter().any(|f| f.starts_with("conflicts.rules[0]")));
    }

    #[test]
    fn validate_catches_invalid_logging() {
        let mut cfg = Config::default();
        cfg.logging.level = "verbose".to_string();
        cfg.logging.format = "xml".to_string();
        let fields: Vec<String> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"logging.level".to_string()));
        assert!(fields.contains(&"logging.format".to_string()));
    }

    #[test]
    fn validate_accepts_all_valid_conflict_strategies() {
        for strategy in VALID_CONFLICT_STRATEGIES {
            let cfg = ConfigBuilder::new()
                .conflicts_default_strategy(*strategy)
                .build();
            assert!(cfg.validate().is_empty(), "strategy {strategy} rejected");
        }
    }

    // -- Builder --

    #[test]
    fn builder_overrides_fields() {
        let cfg = ConfigBuilder::new()
            .conflicts_default_strategy("keep_remote")
            .conflicts_max_rename_attempts(42)
            .conflicts_marker("_copy")
            .logging_level("trace")
            .logging_format("json")
            .build();
        assert_eq!(cfg.conflicts.default_strategy, "keep_remote");
        assert_eq!(cfg.conflicts.max_rename_attempts, 42);
        assert_eq!(cfg.conflicts.marker, "_copy");
        assert_eq!(cfg.logging.level, "trace");
        assert_eq!(cfg.logging.format, "json");
    }

    #[test]
    fn builder_build_validated_fails_for_invalid_config() {
        let result = ConfigBuilder::new().logging_level("loud").build_validated();
        let errors = result.expect_err("should fail validation");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "logging.level");
    }

    #[test]
    fn default_path_ends_with_config_yaml() {
        let path = Config::default_path();
        assert!(path.ends_with("keepsync/config.yaml"));
    }

    #[test]
    fn validation_error_display() {
        let err = ValidationError {
            field: "conflicts.marker".into(),
            message: "must not be empty".into(),
        };
        assert_eq!(err.to_string(), "conflicts.marker: must not be empty");
    }
}
