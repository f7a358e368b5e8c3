use adventure_core::ExtractionPolicy;
use serde::Deserialize;
use std::env;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub model: ModelConfig,
    #[serde(default)]
    pub extraction: ExtractionPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    pub name: String,
    pub base_url: String,
    pub api_key: Option<String>,
    /// Unset means the HTTP client default (no timeout)
    pub timeout_seconds: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        Self::build(
            "config",
            &run_mode,
            config::Environment::with_prefix("ADVENTURE")
                .separator("__")
                .try_parsing(true),
            env::var(API_KEY_VAR).ok(),
        )
    }

    fn build(
        dir: &str,
        run_mode: &str,
        environment: config::Environment,
        fallback_api_key: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("model.name", DEFAULT_MODEL)?
            .set_default("model.base_url", DEFAULT_BASE_URL)?
            // Every file layer is optional, defaults above cover a bare checkout
            .add_source(config::File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            // Eg. `ADVENTURE__SERVER__PORT=5001`
            .add_source(environment)
            .build()?;

        let mut cfg: Config = s.try_deserialize()?;

        if cfg.model.api_key.as_deref().map_or(true, str::is_empty) {
            cfg.model.api_key = fallback_api_key;
        }

        match cfg.model.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(cfg),
            _ => Err(config::ConfigError::Message(format!(
                "{} environment variable not set",
                API_KEY_VAR
            ))),
        }
    }
}
