use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on
    pub bind_address: String,
    /// sqlx-compatible SQLite URL, e.g. `sqlite://oath-speaker.db?mode=rwc`
    pub database_url: String,
    /// Maximum upload size in bytes
    pub max_upload_size: u64,
    /// Comma-separated explicit CORS origin allowlist. When unset, the
    /// server mirrors any origin and allows credentials — development only.
    pub cors_allowed_origins: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://oath-speaker.db?mode=rwc".to_string());

        let max_upload_size = std::env::var("MAX_UPLOAD_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(50 * 1024 * 1024); // 50MB

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let config = Config {
            bind_address,
            database_url,
            max_upload_size,
            cors_allowed_origins,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.is_empty() {
            return Err(ConfigError::ValidationError(
                "BIND_ADDRESS cannot be empty".to_string(),
            ));
        }

        if self.database_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "DATABASE_URL cannot be empty".to_string(),
            ));
        }

        if self.max_upload_size == 0 {
            return Err(ConfigError::ValidationError(
                "MAX_UPLOAD_SIZE must be greater than 0".to_string(),
            ));
        }

        if self.cors_allowed_origins.is_none() {
            tracing::warn!(
                "CORS_ALLOWED_ORIGINS is unset — running with the permissive \
                 development CORS policy. Set an explicit origin list in production."
            );
        }

        Ok(())
    }
}
