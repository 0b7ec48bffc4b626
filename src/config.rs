use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::reply::ReplyFormat;

pub const TOKEN_ENV: &str = "BOT_TOKEN";
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub reply: ReplyConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReplyConfig {
    #[serde(default)]
    pub format: ReplyFormat,
}

impl Config {
    /// Config file to read: the explicit path if given, otherwise `default`
    /// when it exists. Running without a file is fine as long as the token
    /// comes from the environment.
    pub fn resolve_path(explicit: Option<PathBuf>, default: &Path) -> Option<PathBuf> {
        explicit.or_else(|| default.exists().then(|| default.to_path_buf()))
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_file(path)?,
            None => Self::default(),
        };

        config.with_env_token(std::env::var(TOKEN_ENV).ok())
    }

    /// Read and parse a config file without applying the environment
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Apply the token from the environment, which wins over the file, and
    /// reject a config that ends up without one.
    pub fn with_env_token(mut self, env_token: Option<String>) -> Result<Self> {
        if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
            self.telegram.bot_token = token;
        }

        if self.telegram.bot_token.trim().is_empty() {
            anyhow::bail!("{} environment variable is required", TOKEN_ENV);
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            [telegram]
            bot_token = "123:abc"

            [reply]
            format = "html"
            "#,
        )
        .unwrap();

        assert_eq!(config.telegram.bot_token, "123:abc");
        assert_eq!(config.reply.format, ReplyFormat::Html);
    }

    #[test]
    fn test_empty_config_defaults_to_plain() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.reply.format, ReplyFormat::Plain);
        assert!(config.telegram.bot_token.is_empty());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Config::parse("[reply]\nformat = \"markdown\"").is_err());
    }

    #[test]
    fn test_env_token_overrides_file() {
        let config = Config::parse("[telegram]\nbot_token = \"from-file\"")
            .unwrap()
            .with_env_token(Some("from-env".to_string()))
            .unwrap();
        assert_eq!(config.telegram.bot_token, "from-env");
    }

    #[test]
    fn test_file_token_used_without_env() {
        let config = Config::parse("[telegram]\nbot_token = \"from-file\"")
            .unwrap()
            .with_env_token(None)
            .unwrap();
        assert_eq!(config.telegram.bot_token, "from-file");
    }

    #[test]
    fn test_missing_token_is_an_error() {
        let err = Config::default().with_env_token(None).unwrap_err();
        assert!(err.to_string().contains("BOT_TOKEN"));

        assert!(Config::default()
            .with_env_token(Some("   ".to_string()))
            .is_err());
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("idbot-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_default_file_is_skipped() {
        let default = temp_path("absent.toml");
        assert_eq!(Config::resolve_path(None, &default), None);
    }

    #[test]
    fn test_existing_default_file_is_used() {
        let default = temp_path("present.toml");
        std::fs::write(&default, "[reply]\nformat = \"html\"").unwrap();

        let resolved = Config::resolve_path(None, &default);
        assert_eq!(resolved.as_deref(), Some(default.as_path()));

        let config = Config::load_file(&default).unwrap();
        assert_eq!(config.reply.format, ReplyFormat::Html);

        std::fs::remove_file(&default).unwrap();
    }

    #[test]
    fn test_explicit_path_wins_over_default() {
        let default = temp_path("default.toml");
        std::fs::write(&default, "").unwrap();

        let explicit = temp_path("explicit.toml");
        assert_eq!(
            Config::resolve_path(Some(explicit.clone()), &default),
            Some(explicit)
        );

        std::fs::remove_file(&default).unwrap();
    }

    #[test]
    fn test_unreadable_explicit_file_is_an_error() {
        assert!(Config::load_file(&temp_path("missing.toml")).is_err());
    }
}
