use crate::i18n::Language;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,

    // Page rendering
    pub content_base_url: String,
    pub default_language: Language,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{}'", raw))?,
            Err(_) => 8080,
        };

        Ok(Self {
            port,
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            public_dir: std::env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public")),

            content_base_url: std::env::var("CONTENT_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            default_language: std::env::var("DEFAULT_LANGUAGE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(Language::new)
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "PORT",
        "DATA_DIR",
        "PUBLIC_DIR",
        "CONTENT_BASE_URL",
        "DEFAULT_LANGUAGE",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.content_base_url, "http://localhost:8080");
        assert!(config.default_language.is_canonical());
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        std::env::set_var("PORT", "3000");
        std::env::set_var("DATA_DIR", "/var/lib/site");
        std::env::set_var("DEFAULT_LANGUAGE", "Español");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.port, 3000);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/site"));
        assert_eq!(config.default_language.name(), "Español");
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_an_error() {
        clear_env();
        std::env::set_var("PORT", "eighty");

        let err = Config::from_env().unwrap_err();
        clear_env();

        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    #[serial]
    fn test_blank_language_uses_default() {
        clear_env();
        std::env::set_var("DEFAULT_LANGUAGE", "  ");

        let config = Config::from_env().unwrap();
        clear_env();

        assert!(config.default_language.is_canonical());
    }
}
