use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Once;

use thiserror::Error;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

mod diagnostics;
mod schema;

pub use diagnostics::{ConfigDiagnostics, ConfigWarning};
pub use schema::json_schema;

/// Which refactorings may be offered.
///
/// ```toml
/// [refactorings]
/// enabled = true
/// disable = ["negate_boolean_literal", "wrap_in_*"]
/// enable = []
/// fail_loudly = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct RefactoringsConfig {
    /// Master switch. `false` turns every refactoring off.
    #[serde(default = "default_refactorings_enabled")]
    pub enabled: bool,
    /// Refactoring ids (or `*` patterns) that are never offered.
    #[serde(default)]
    pub disable: Vec<String>,
    /// If non-empty, only refactoring ids matching one of these patterns are offered.
    ///
    /// `disable` wins over `enable`.
    #[serde(default)]
    pub enable: Vec<String>,
    /// Diagnostics mode: internal faults are re-raised instead of being logged
    /// and converted into "no refactorings".
    #[serde(default)]
    pub fail_loudly: bool,
}

fn default_refactorings_enabled() -> bool {
    true
}

impl Default for RefactoringsConfig {
    fn default() -> Self {
        Self {
            enabled: default_refactorings_enabled(),
            disable: Vec::new(),
            enable: Vec::new(),
            fail_loudly: false,
        }
    }
}

impl RefactoringsConfig {
    /// Returns `true` if the refactoring with the given id may be offered.
    ///
    /// - `enabled = false` disables everything
    /// - `disable` always blocks matching ids
    /// - a non-empty `enable` restricts to matching ids
    ///
    /// Pattern syntax: `*` matches any substring; a pattern without `*` is an
    /// exact, case-sensitive match.
    pub fn is_enabled(&self, id: &str) -> bool {
        if !self.enabled {
            return false;
        }

        if self
            .disable
            .iter()
            .any(|pattern| matches_simple_glob(pattern, id))
        {
            return false;
        }

        self.enable.is_empty()
            || self
                .enable
                .iter()
                .any(|pattern| matches_simple_glob(pattern, id))
    }

    /// Warnings for `enable`/`disable` patterns that match none of `known_ids`.
    pub fn unmatched_patterns(&self, known_ids: &[&str]) -> Vec<ConfigWarning> {
        let lists = [("refactorings.disable", &self.disable), ("refactorings.enable", &self.enable)];
        let mut warnings = Vec::new();
        for (toml_path, patterns) in lists {
            for (idx, pattern) in patterns.iter().enumerate() {
                if !known_ids.iter().any(|id| matches_simple_glob(pattern, id)) {
                    warnings.push(ConfigWarning::UnknownRefactoring {
                        toml_path: format!("{toml_path}[{idx}]"),
                        pattern: pattern.clone(),
                    });
                }
            }
        }
        warnings
    }

    fn normalize(&mut self) {
        fn normalize_id_list(list: &mut Vec<String>) {
            let mut out: Vec<String> = list
                .drain(..)
                .map(|raw| raw.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect();
            out.sort();
            out.dedup();
            *list = out;
        }

        normalize_id_list(&mut self.disable);
        normalize_id_list(&mut self.enable);
    }
}

fn matches_simple_glob(pattern: &str, text: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == text;
    }

    let pattern = pattern.as_bytes();
    let text = text.as_bytes();

    let mut p_idx = 0usize;
    let mut t_idx = 0usize;
    let mut star_idx: Option<usize> = None;
    let mut match_idx = 0usize;

    while t_idx < text.len() {
        if p_idx < pattern.len() && pattern[p_idx] == text[t_idx] {
            p_idx += 1;
            t_idx += 1;
        } else if p_idx < pattern.len() && pattern[p_idx] == b'*' {
            star_idx = Some(p_idx);
            match_idx = t_idx;
            p_idx += 1;
        } else if let Some(star) = star_idx {
            p_idx = star + 1;
            match_idx += 1;
            t_idx = match_idx;
        } else {
            return false;
        }
    }

    while p_idx < pattern.len() && pattern[p_idx] == b'*' {
        p_idx += 1;
    }
    p_idx == pattern.len()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level, or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,

    /// Write logs to stderr. When `false`, logs are discarded.
    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::default_level();
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            // Anything else is treated as an `EnvFilter` directive string.
            _ => trimmed.to_owned(),
        }
    }

    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        tracing_subscriber::EnvFilter::try_new(directives).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        })
    }

    /// Create the effective `EnvFilter`.
    ///
    /// If `RUST_LOG` is set, it is merged into the resulting filter.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let config_directives = Self::normalize_level_directives(&self.level);

        match env_directives {
            Some(env_directives) => {
                let combined = format!("{config_directives},{env_directives}");
                tracing_subscriber::EnvFilter::try_new(combined)
                    .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }

    fn level_warning(&self) -> Option<ConfigWarning> {
        let normalized = Self::normalize_level_directives(&self.level);
        tracing_subscriber::EnvFilter::try_new(&normalized)
            .is_err()
            .then(|| ConfigWarning::LoggingLevelInvalid {
                value: self.level.clone(),
                normalized,
            })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
        }
    }
}

/// Top-level configuration loaded from `carve.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct CarveConfig {
    #[serde(default)]
    pub refactorings: RefactoringsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` includes a source snippet; keep just the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl CarveConfig {
    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: CarveConfig = toml::from_str(&text)?;
        config.refactorings.normalize();
        Ok(config)
    }

    /// Load a config from a TOML string and return diagnostics (unknown keys and
    /// recoverable value problems).
    pub fn load_from_str_with_diagnostics(
        text: &str,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let (mut config, unknown_keys) =
            diagnostics::deserialize_toml_with_unknown_keys::<CarveConfig>(text)?;
        config.refactorings.normalize();

        let mut diagnostics = ConfigDiagnostics {
            unknown_keys,
            ..ConfigDiagnostics::default()
        };
        diagnostics.warnings.extend(config.logging.level_warning());

        Ok((config, diagnostics))
    }
}

static TRACING_INIT: Once = Once::new();

/// Initializes structured `tracing` logging.
///
/// This function is safe to call multiple times; only the first call installs a
/// global subscriber. Returns `true` if this call installed it.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let mut installed = false;
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();

        let make_writer = if config.stderr {
            // `TestWriter` keeps `cargo test` output captured in debug builds.
            if cfg!(debug_assertions) {
                BoxMakeWriter::new(tracing_subscriber::fmt::writer::TestWriter::with_stderr)
            } else {
                BoxMakeWriter::new(std::io::stderr)
            }
        } else {
            BoxMakeWriter::new(std::io::sink)
        };

        let layer: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(make_writer)
                .with_ansi(false)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(make_writer)
                .with_ansi(false)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(layer);
        installed = tracing::subscriber::set_global_default(subscriber).is_ok();
        if installed {
            tracing::debug!(target: "carve.config", level = %config.level, "tracing initialized");
        }
    });
    installed
}
