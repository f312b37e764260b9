use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cpq: CpqConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size: usize,
    pub timeout_seconds: u64,
}

/// Connection settings for the CPQ platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpqConfig {
    pub api_base_url: String,
    pub token_url: String,
    pub audience: String,
    pub auth_domain: String,
    pub client_name: String,
    pub manufacturer_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub language: String,
    pub timeout_seconds: u64,
    pub max_concurrent_fetches: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub delimiter: char,
    pub filename_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let defaults = Config::try_from(&AppConfig::default())?;

        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("CPQ_CONSOLE").separator("__"));

        config.build()?.try_deserialize()
    }
}

impl CpqConfig {
    pub fn has_credentials(&self) -> bool {
        !self.manufacturer_id.is_empty() && !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                max_request_size: 4 * 1024 * 1024, // 4MB
                timeout_seconds: 120,
            },
            cpq: CpqConfig {
                api_base_url: "https://connect.hivecpq.com/api/v1".to_string(),
                token_url: "https://ebusinesscloud.eu.auth0.com/oauth/token".to_string(),
                audience: "https://ebusinesscloud.eu.auth0.com/api/v2/".to_string(),
                auth_domain: "https://ebusinesscloud.eu.auth0.com".to_string(),
                client_name: "API USER".to_string(),
                manufacturer_id: String::new(),
                client_id: String::new(),
                client_secret: String::new(),
                language: "en".to_string(),
                timeout_seconds: 30,
                max_concurrent_fetches: 4,
            },
            export: ExportConfig {
                delimiter: ',',
                filename_prefix: "bom".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
                file_path: None,
            },
        }
    }
}
