//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! development defaults.

use std::env;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// QR encoder endpoint; receives the card link as its `data` parameter
    pub qr_encoder_url: String,

    /// QR image edge length in pixels (square)
    pub qr_size: u32,

    /// Public base URL embedded in card links
    pub card_base_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            port: env::var("STAMPCARD_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STAMPCARD_PORT".to_string()))?,

            database_path: env::var("STAMPCARD_DB")
                .unwrap_or_else(|_| "./stampcard.db".to_string()),

            qr_encoder_url: env::var("STAMPCARD_QR_ENCODER")
                .unwrap_or_else(|_| "https://api.qrserver.com/v1/create-qr-code/".to_string()),

            qr_size: env::var("STAMPCARD_QR_SIZE")
                .unwrap_or_else(|_| "200".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STAMPCARD_QR_SIZE".to_string()))?,

            card_base_url: env::var("STAMPCARD_CARD_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 5] = [
        "STAMPCARD_PORT",
        "STAMPCARD_DB",
        "STAMPCARD_QR_ENCODER",
        "STAMPCARD_QR_SIZE",
        "STAMPCARD_CARD_BASE_URL",
    ];

    #[test]
    fn test_defaults_load_without_env() {
        // Clear the variables so an operator's shell cannot skew the test.
        for var in VARS {
            env::remove_var(var);
        }

        let config = ServerConfig::load().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, "./stampcard.db");
        assert_eq!(config.qr_size, 200);
        assert!(config.qr_encoder_url.starts_with("https://"));
    }
}
