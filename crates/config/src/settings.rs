//! Application settings
//!
//! Layered lowest to highest precedence: built-in defaults, an optional
//! settings file, then SHOP_ASSISTANT_ environment variables (nested
//! fields separated by `__`, e.g. SHOP_ASSISTANT_ASSISTANT__MAX_SUGGESTIONS).

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use shop_assistant_ranking::{RankingOptions, RankingWeights};

use crate::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// Where the product catalog comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a JSON catalog file; the bundled catalog is used when unset
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { path: None }
    }
}

/// Ranking weight overrides and default options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default)]
    pub weights: RankingWeights,

    #[serde(default)]
    pub options: RankingOptions,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            weights: RankingWeights::default(),
            options: RankingOptions::default(),
        }
    }
}

/// Conversation-facing knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Follow-up suggestions per response
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Products listed in a recommendation response
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    /// Candidates returned by similarity lookups
    #[serde(default = "default_similar_limit")]
    pub similar_limit: usize,
}

fn default_max_suggestions() -> usize {
    3
}
fn default_recommendation_limit() -> usize {
    5
}
fn default_similar_limit() -> usize {
    5
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            recommendation_limit: default_recommendation_limit(),
            similar_limit: default_similar_limit(),
        }
    }
}

impl Settings {
    /// Load defaults, then the file at `path` if given, then environment
    /// overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.display().to_string()));
            }
            builder = builder.add_source(File::from(path));
        }

        // prefix_separator must stay a single underscore: the default
        // follows separator, which would demand SHOP_ASSISTANT__ names.
        let settings: Settings = builder
            .add_source(
                Environment::with_prefix("SHOP_ASSISTANT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        tracing::debug!(
            catalog_path = ?settings.catalog.path,
            max_suggestions = settings.assistant.max_suggestions,
            "settings loaded"
        );
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let weights = &self.ranking.weights;
        for (field, value) in [
            ("ranking.weights.category", weights.category),
            ("ranking.weights.brand", weights.brand),
            ("ranking.weights.price", weights.price),
            ("ranking.weights.rating", weights.rating),
            ("ranking.weights.popularity", weights.popularity),
            ("ranking.weights.relevance", weights.relevance),
            ("ranking.weights.recency", weights.recency),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("must be a non-negative number, got {value}"),
                });
            }
        }

        if self.assistant.recommendation_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "assistant.recommendation_limit".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_defaults_are_usable() {
        let settings = Settings::default();
        assert!(settings.catalog.path.is_none());
        assert_eq!(settings.assistant.max_suggestions, 3);
        assert_eq!(settings.assistant.recommendation_limit, 5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[catalog]
path = "catalog.json"

[ranking.weights]
category = 3.0

[assistant]
max_suggestions = 4
"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.catalog.path.as_deref(), Some("catalog.json"));
        assert!((settings.ranking.weights.category - 3.0).abs() < 1e-6);
        // Unset fields keep their defaults.
        assert!((settings.ranking.weights.brand - 1.5).abs() < 1e-6);
        assert_eq!(settings.assistant.max_suggestions, 4);
    }

    #[test]
    fn test_env_override_uses_single_underscore_prefix() {
        // The documented variable form: prefix, one underscore, then
        // nested fields joined by double underscores. Overrides a field
        // no other test reads, since the environment is process-wide.
        std::env::set_var("SHOP_ASSISTANT_ASSISTANT__SIMILAR_LIMIT", "9");
        let settings = Settings::load(None).unwrap();
        std::env::remove_var("SHOP_ASSISTANT_ASSISTANT__SIMILAR_LIMIT");

        assert_eq!(settings.assistant.similar_limit, 9);
        // Untouched fields keep their defaults.
        assert_eq!(settings.assistant.recommendation_limit, 5);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/settings.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut settings = Settings::default();
        settings.ranking.weights.rating = -1.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
