use crate::error::{AnalysisError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default number of tweets selected per run when the caller gives no limit.
pub const DEFAULT_LIMIT: usize = 100;
/// Hard upper bound on a run's selection, protecting the classifier from
/// unbounded batch sizes.
pub const MAX_LIMIT: usize = 1000;

#[derive(Deserialize, Debug, Clone)]
pub struct ElasticsearchConfig {
    /// Base URL, e.g. http://localhost:9200
    pub url: String,
    /// Index holding the tweet documents.
    pub index: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ClassifierConfig {
    /// Inference endpoint accepting {"inputs": text} and returning the full
    /// label/score set.
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    "j-hartmann/emotion-english-distilroberta-base".to_string()
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct LimitsConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "max_limit")]
    pub max_limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn max_limit() -> usize {
    MAX_LIMIT
}

impl Default for LimitsConfig {
    fn default() -> Self {
        LimitsConfig {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

/// Application configuration, read from a YAML file.
#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub elasticsearch: ElasticsearchConfig,
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.elasticsearch.url.is_empty() {
            return Err(AnalysisError::Config(
                "elasticsearch.url must not be empty".to_string(),
            ));
        }
        if self.elasticsearch.index.is_empty() {
            return Err(AnalysisError::Config(
                "elasticsearch.index must not be empty".to_string(),
            ));
        }
        if self.classifier.endpoint.is_empty() {
            return Err(AnalysisError::Config(
                "classifier.endpoint must not be empty".to_string(),
            ));
        }
        if self.limits.default_limit == 0 || self.limits.max_limit == 0 {
            return Err(AnalysisError::Config(
                "limits must be positive".to_string(),
            ));
        }
        if self.limits.default_limit > self.limits.max_limit {
            return Err(AnalysisError::Config(format!(
                "limits.default_limit ({}) exceeds limits.max_limit ({})",
                self.limits.default_limit, self.limits.max_limit
            )));
        }
        Ok(())
    }
}

/// Loads and validates the application configuration from a YAML file.
pub fn load_app_config(path: &Path) -> Result<AppConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        AnalysisError::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config: AppConfig = serde_yaml::from_str(&contents).map_err(|e| {
        AnalysisError::Config(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    config.validate()?;
    Ok(config)
}
