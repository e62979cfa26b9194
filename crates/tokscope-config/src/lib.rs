use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for tokscope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Encoding used when `--encoding` is not given
    #[serde(default = "default_encoding")]
    pub encoding: String,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Truncation limits for the interactive token breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_max_token_strings")]
    pub max_token_strings: usize,

    #[serde(default = "default_max_token_ids")]
    pub max_token_ids: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Strings encoded and counted when an interactive session starts
    #[serde(default = "default_examples")]
    pub examples: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            display: DisplayConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_token_strings: default_max_token_strings(),
            max_token_ids: default_max_token_ids(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            examples: default_examples(),
        }
    }
}

fn default_encoding() -> String {
    "cl100k_base".to_string()
}

fn default_max_token_strings() -> usize {
    20
}

fn default_max_token_ids() -> usize {
    30
}

fn default_examples() -> Vec<String> {
    vec![
        "Hello, world!".to_string(),
        "GPT-4 is amazing".to_string(),
        "The quick brown fox jumps".to_string(),
    ]
}

impl Config {
    /// Load config from `path`, or from the default location when `path` is None.
    ///
    /// An explicit path must exist. A missing file at the default location
    /// yields the defaults; nothing is written to disk.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Config::default())
                }
            }
        }
    }

    /// Parse a config file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "tokscope", "tokscope") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.tokscope/config.toml")
        }
    }
}
