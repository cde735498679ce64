use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use minichat_memory::BufferConfig;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct MemoryConfig {
    #[serde(default = "MemoryConfig::default_window_size")]
    pub window_size: usize,
    #[serde(default = "MemoryConfig::default_max_words_per_turn")]
    pub max_words_per_turn: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            window_size: Self::default_window_size(),
            max_words_per_turn: Self::default_max_words_per_turn(),
        }
    }
}

impl MemoryConfig {
    const fn default_window_size() -> usize {
        5
    }

    const fn default_max_words_per_turn() -> usize {
        100
    }

    #[must_use]
    pub const fn buffer_config(&self) -> BufferConfig {
        BufferConfig {
            capacity: self.window_size,
            max_words_per_turn: self.max_words_per_turn,
        }
    }
}

/// Generation backend settings.
///
/// `kind` selects the backend: `"http"` talks to an OpenAI-compatible
/// completions endpoint, `"echo"` answers locally without a model.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProviderConfig {
    #[serde(default = "ProviderConfig::default_kind")]
    pub kind: String,
    #[serde(default = "ProviderConfig::default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "ProviderConfig::default_model")]
    pub model: String,
    #[serde(default = "ProviderConfig::default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "ProviderConfig::default_temperature")]
    pub temperature: f32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: Self::default_kind(),
            base_url: Self::default_base_url(),
            api_key: String::new(),
            model: Self::default_model(),
            max_tokens: Self::default_max_tokens(),
            temperature: Self::default_temperature(),
        }
    }
}

impl ProviderConfig {
    fn default_kind() -> String {
        "http".to_string()
    }

    fn default_base_url() -> String {
        "http://localhost:11434/v1".to_string()
    }

    fn default_model() -> String {
        "google/flan-t5-base".to_string()
    }

    const fn default_max_tokens() -> usize {
        128
    }

    const fn default_temperature() -> f32 {
        0.7
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("minichat"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn load() -> anyhow::Result<Self> {
        Self::load_existing(&Self::config_path()?)
    }

    /// Like [`Config::load_from`], with a hint to run `init` when the file
    /// is missing.
    fn load_existing(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'minichat init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(config_path)
    }

    /// Load the config file if present, defaults otherwise.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");
        Self::write_template(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Point provider.base_url at an OpenAI-compatible completions server");
        println!("   2. Set provider.api_key if the server requires one");
        println!("   3. Run 'minichat chat' to start a conversation");
        println!();
        println!("🔧 Configuration options:");
        println!("   - provider.kind: \"http\" for a model server, \"echo\" for offline testing");
        println!("   - memory.window_size: Number of turns kept in the prompt");
        println!("   - memory.max_words_per_turn: Word limit applied to each stored message");
        println!();
        Ok(())
    }

    /// Write the default template to `path`, refusing to overwrite.
    pub fn write_template(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }

        let config_template = r#"{
  "memory": {
    "window_size": 5,
    "max_words_per_turn": 100
  },
  "provider": {
    "kind": "http",
    "base_url": "http://localhost:11434/v1",
    "api_key": "",
    "model": "google/flan-t5-base",
    "max_tokens": 128,
    "temperature": 0.7
  },
  "logging": {
    "level": "info"
  }
}"#;

        std::fs::write(path, config_template)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_matches_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        Config::write_template(&path).unwrap();
        let config = Config::load_from(&path).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_template_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        Config::write_template(&path).unwrap();
        assert!(Config::write_template(&path).is_err());
    }

    #[test]
    fn test_load_existing_requires_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let err = Config::load_existing(&path).unwrap_err();
        assert!(err.to_string().contains("minichat init"));

        std::fs::write(&path, r#"{"provider": {"kind": "echo"}}"#).unwrap();
        let config = Config::load_existing(&path).unwrap();
        assert_eq!(config.provider.kind, "echo");
        assert_eq!(config.memory, MemoryConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"memory": {"window_size": 8}}"#).unwrap();

        assert_eq!(config.memory.window_size, 8);
        assert_eq!(config.memory.max_words_per_turn, 100);
        assert_eq!(config.provider.kind, "http");
        assert_eq!(config.logging.level, "info");

        let buffer = config.memory.buffer_config();
        assert_eq!(buffer.capacity, 8);
    }
}
