use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

// Per-chat tunables live next to the state they shape
use botica_core::ChatConfig;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub username: String,
    /// Chat IDs allowed to talk to the bot; empty allows everyone
    #[serde(default)]
    pub allow_from: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub grok: ProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    #[serde(default = "ProviderConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ProviderConfig::default_model")]
    pub model: String,
    #[serde(default = "ProviderConfig::default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "ProviderConfig::default_temperature")]
    pub temperature: f32,
    #[serde(default = "ProviderConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub retry_delays_ms: Vec<u64>,
}

impl ProviderConfig {
    fn default_base_url() -> String {
        "https://api.x.ai/v1".to_string()
    }

    fn default_model() -> String {
        "grok-beta".to_string()
    }

    const fn default_max_tokens() -> u32 {
        1000
    }

    const fn default_temperature() -> f32 {
        0.7
    }

    const fn default_timeout_secs() -> u64 {
        60
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn retry_delays(&self) -> Vec<Duration> {
        self.retry_delays_ms
            .iter()
            .map(|ms| Duration::from_millis(*ms))
            .collect()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdminConfig {
    #[serde(default = "AdminConfig::default_enabled")]
    pub enabled: bool,
    #[serde(default = "AdminConfig::default_host")]
    pub host: String,
    #[serde(default = "AdminConfig::default_port")]
    pub port: u16,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl AdminConfig {
    const fn default_enabled() -> bool {
        true
    }

    fn default_host() -> String {
        "127.0.0.1".to_string()
    }

    const fn default_port() -> u16 {
        8080
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("botica"))
    }

    /// Load `~/botica/config.json` and apply environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_dir()?.join("config.json");
        let mut config = Self::load_from(&config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'botica init' to create config.",
                config_path.display()
            );
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = serde_json::from_str(&content)?;
        info!("Loaded config from {}", config_path.display());

        Ok(config)
    }

    /// Override file values with the deployment variables
    /// `TELEGRAM_BOT_TOKEN`, `TELEGRAM_BOT_USERNAME`, `AI_API_KEY`,
    /// `AI_API_URL` and `AI_MODEL`. Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get("TELEGRAM_BOT_TOKEN") {
            self.telegram.token = token;
        }
        if let Some(username) = get("TELEGRAM_BOT_USERNAME") {
            self.telegram.username = username;
        }
        if let Some(api_key) = get("AI_API_KEY") {
            self.providers.grok.api_key = api_key;
        }
        if let Some(base_url) = get("AI_API_URL") {
            self.providers.grok.base_url = base_url;
        }
        if let Some(model) = get("AI_MODEL") {
            self.providers.grok.model = model;
        }
    }

    /// Check the settings required to start the bot.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.telegram.token.trim().is_empty() {
            anyhow::bail!("Telegram bot token not configured. Set \"telegram.token\" or TELEGRAM_BOT_TOKEN");
        }
        if self.providers.grok.api_key.trim().is_empty() {
            anyhow::bail!("AI API key not configured. Set \"providers.grok.api_key\" or AI_API_KEY");
        }
        if !self.chat.joke_window.is_valid() {
            anyhow::bail!(
                "Invalid chat.joke_window: min={} max={} (need 0 < min <= max)",
                self.chat.joke_window.min,
                self.chat.joke_window.max
            );
        }
        if self.chat.context_max_entries == 0 {
            anyhow::bail!("chat.context_max_entries must be at least 1");
        }
        Ok(())
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");
        Self::create_config_at(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your Telegram bot token and AI API key");
        println!("   2. Run 'botica info' to check the AI service");
        println!("   3. Run 'botica run' to start the bot");
        println!();
        println!("🔧 Configuration options:");
        println!("   - chat.joke_window: messages between automatic jokes in groups");
        println!("   - admin: administrative HTTP endpoint (health, stats, clear context)");
        println!("   - env overrides: TELEGRAM_BOT_TOKEN, TELEGRAM_BOT_USERNAME, AI_API_KEY, AI_API_URL, AI_MODEL");
        println!();
        Ok(())
    }

    pub fn create_config_at(config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(config_path, CONFIG_TEMPLATE)?;
        Ok(())
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "telegram": {
    "token": "your-telegram-bot-token-here",
    "username": "your_bot_username",
    "allow_from": []
  },
  "providers": {
    "grok": {
      "api_key": "your-ai-api-key-here",
      "base_url": "https://api.x.ai/v1",
      "model": "grok-beta",
      "max_tokens": 1000,
      "temperature": 0.7,
      "timeout_secs": 60,
      "retry_delays_ms": []
    }
  },
  "chat": {
    "context_max_entries": 10,
    "context_max_chars": 1000,
    "joke_window": { "min": 3, "max": 4 }
  },
  "admin": {
    "enabled": true,
    "host": "127.0.0.1",
    "port": 8080
  }
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn template() -> Config {
        serde_json::from_str(CONFIG_TEMPLATE).unwrap_or_else(|e| panic!("bad template: {e}"))
    }

    #[test]
    fn template_parses_with_expected_defaults() {
        let config = template();
        assert_eq!(config.providers.grok.model, "grok-beta");
        assert_eq!(config.chat, ChatConfig::default());
        assert_eq!(config.admin.port, 8080);
        assert!(config.providers.grok.retry_delays().is_empty());
    }

    #[test]
    fn minimal_config_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "providers": { "grok": { "api_key": "k" } } }"#)
                .unwrap_or_else(|e| panic!("parse failed: {e}"));

        assert_eq!(config.providers.grok.base_url, "https://api.x.ai/v1");
        assert_eq!(config.providers.grok.timeout(), Duration::from_secs(60));
        assert!(config.telegram.allow_from.is_empty());
        assert!(config.admin.enabled);
        assert_eq!(config.chat.joke_window.min, 3);
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = template();
        let env: HashMap<&str, &str> = [
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("AI_API_KEY", "xai-secret"),
            ("AI_MODEL", ""),
        ]
        .into_iter()
        .collect();

        config.apply_overrides(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.telegram.token, "123:abc");
        assert_eq!(config.providers.grok.api_key, "xai-secret");
        // empty values are ignored
        assert_eq!(config.providers.grok.model, "grok-beta");
    }

    #[test]
    fn validate_requires_credentials() {
        let mut config = template();
        config.telegram.token = String::new();
        assert!(config.validate().is_err());

        config.telegram.token = "123:abc".to_string();
        assert!(config.validate().is_ok());

        config.chat.joke_window.min = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn create_then_load_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let path = dir.path().join("config.json");

        assert!(Config::load_from(&path).is_err());
        assert!(Config::create_config_at(&path).is_ok());
        assert!(Config::create_config_at(&path).is_err());

        let config = Config::load_from(&path).unwrap_or_else(|e| panic!("load: {e}"));
        assert_eq!(config.telegram.username, "your_bot_username");
    }
}
