use std::{path::PathBuf, str::FromStr, time::Duration};

use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};

/// Overrides the directory holding `base.yaml` and the per-environment files.
const CONFIG_DIR_ENV: &str = "HELPDESK_CONFIG_DIR";

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub embedding: EmbeddingSettings,
    pub vector_index: VectorIndexSettings,
    pub promotion: PromotionSettings,
    pub retrieval: RetrievalSettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub app_url: String,
    #[serde(default)]
    pub seed_sample_tickets: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct EmbeddingSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl EmbeddingSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct VectorIndexSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub suggestions_collection: String,
    /// Collection of uploaded document chunks. Chat context and uploads are off without it.
    pub documents_collection: Option<String>,
    pub timeout_secs: u64,
}

impl VectorIndexSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct PromotionSettings {
    pub interval_secs: u64,
}

impl PromotionSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct RetrievalSettings {
    pub default_limit: usize,
    pub max_limit: usize,
    pub chat_limit: usize,
    pub context_limit: usize,
}

impl RetrievalSettings {
    /// Requested limit, or the default, capped at `max_limit`.
    pub fn clamp_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let config_directory = match std::env::var(CONFIG_DIR_ENV) {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir()
            .map_err(|e| config::ConfigError::Message(format!("no current directory: {e}")))?
            .join("config"),
    };

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|e| config::ConfigError::Message(format!("invalid APP_ENVIRONMENT: {e}")))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("HELPDESK")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString, PartialEq, Eq)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
