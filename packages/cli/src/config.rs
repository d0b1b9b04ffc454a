use prompt_schema::{InternalFieldType, SampleLanguage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "prompt.config.json";

/// Prompt CLI configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Origin of the task server
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Language used by `sample` when `--lang` is not given
    #[serde(default = "default_language")]
    pub default_language: SampleLanguage,

    /// Type given to variables that have no schema yet
    #[serde(default = "default_field_type")]
    pub default_field_type: InternalFieldType,
}

fn default_endpoint() -> String {
    "http://localhost:8080".to_string()
}

fn default_language() -> SampleLanguage {
    SampleLanguage::Curl
}

fn default_field_type() -> InternalFieldType {
    InternalFieldType::String
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = Self::path(cwd);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn path(cwd: &Path) -> PathBuf {
        cwd.join(DEFAULT_CONFIG_NAME)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            default_language: default_language(),
            default_field_type: default_field_type(),
        }
    }
}
