use serde::{Deserialize, Serialize};

use crate::json::Coercion;

/// Main configuration structure loaded from vecsim.toml and environment variables
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub functions: FunctionsConfig,
    pub batch: BatchConfig,
    pub logging: LoggingConfig,
}

/// Per-function evaluation behavior
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FunctionsConfig {
    /// Element coercion applied when extracting vectors
    pub coercion: Coercion,
}

/// Row batch execution
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BatchConfig {
    pub parallel: bool,
    /// Batches smaller than this are evaluated on the calling thread
    pub min_parallel_rows: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_rows: 256,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "json_vecsim=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses VECSIM_CONFIG environment variable or defaults to "vecsim.toml"
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(env_path) = std::env::var("VECSIM_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
        }

        let config_path =
            std::env::var("VECSIM_CONFIG").unwrap_or_else(|_| "vecsim.toml".to_string());

        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(content) => Self::from_toml_str(&content)?,
            Err(_) => {
                tracing::warn!("Config file {} not found, using defaults", config_path);
                Self::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Env-first overrides; unparsable values are logged and ignored
    pub fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var("VECSIM_COERCION") {
            match raw.parse::<Coercion>() {
                Ok(c) => {
                    self.functions.coercion = c;
                    tracing::debug!("VECSIM_COERCION env override applied");
                }
                Err(e) => tracing::warn!("Ignoring VECSIM_COERCION: {}", e),
            }
        }
        if let Ok(raw) = std::env::var("VECSIM_PARALLEL") {
            match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => self.batch.parallel = true,
                "0" | "false" | "no" => self.batch.parallel = false,
                other => tracing::warn!("Ignoring VECSIM_PARALLEL='{}'", other),
            }
        }
        if let Ok(raw) = std::env::var("VECSIM_MIN_PARALLEL_ROWS") {
            match raw.trim().parse::<usize>() {
                Ok(n) => self.batch.min_parallel_rows = n,
                Err(_) => tracing::warn!("Ignoring VECSIM_MIN_PARALLEL_ROWS='{}'", raw),
            }
        }
        if let Ok(filter) = std::env::var("RUST_LOG") {
            self.logging.filter = filter;
        }
    }
}
