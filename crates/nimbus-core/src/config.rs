//! Configuration module
//!
//! Environment-driven configuration for the HTTP server and the
//! Cloudinary provider client. Values are read once at startup.

use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FOLDER: &str = "media";
const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 50;
const DEFAULT_LIST_MAX_RESULTS: usize = 100;
const DEFAULT_API_BASE_URL: &str = "https://api.cloudinary.com";

/// Credentials and endpoint for the Cloudinary REST API.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Base URL without the `/v1_1/{cloud_name}` suffix. Overridable so
    /// tests can point the client at a local server.
    pub api_base_url: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Provider folder that uploads land in and listings read from.
    pub folder: String,
    pub max_upload_size_bytes: usize,
    /// Page size cap for folder listings.
    pub list_max_results: usize,
    pub cloudinary: CloudinaryConfig,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// `.env` for local development.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid port number"))?;

        let folder =
            env::var("CLOUDINARY_FOLDER").unwrap_or_else(|_| DEFAULT_FOLDER.to_string());

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_MB);

        let list_max_results = env::var("LIST_MAX_RESULTS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_LIST_MAX_RESULTS);

        let cloudinary = CloudinaryConfig {
            cloud_name: env::var("CLOUDINARY_CLOUD_NAME")
                .map_err(|_| anyhow::anyhow!("CLOUDINARY_CLOUD_NAME must be set"))?,
            api_key: env::var("CLOUDINARY_API_KEY")
                .map_err(|_| anyhow::anyhow!("CLOUDINARY_API_KEY must be set"))?,
            api_secret: env::var("CLOUDINARY_API_SECRET")
                .map_err(|_| anyhow::anyhow!("CLOUDINARY_API_SECRET must be set"))?,
            api_base_url: env::var("CLOUDINARY_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
        };

        let config = Config {
            server_port,
            cors_origins,
            environment,
            folder,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            list_max_results,
            cloudinary,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that would otherwise surface as confusing runtime
    /// failures.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit allowed origins."
            ));
        }

        if self.cors_origins.is_empty() {
            return Err(anyhow::anyhow!("CORS_ORIGINS must not be empty"));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than zero"));
        }

        if self.list_max_results == 0 {
            return Err(anyhow::anyhow!("LIST_MAX_RESULTS must be greater than zero"));
        }

        if self.folder.trim().is_empty() {
            return Err(anyhow::anyhow!("CLOUDINARY_FOLDER must not be blank"));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: 3000,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            folder: "media".to_string(),
            max_upload_size_bytes: 50 * 1024 * 1024,
            list_max_results: 100,
            cloudinary: CloudinaryConfig {
                cloud_name: "demo".to_string(),
                api_key: "key".to_string(),
                api_secret: "secret".to_string(),
                api_base_url: DEFAULT_API_BASE_URL.to_string(),
            },
        }
    }

    #[test]
    fn test_wildcard_cors_allowed_in_development() {
        let config = test_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let mut config = test_config();
        config.environment = "production".to_string();
        assert!(config.validate().is_err());

        config.cors_origins = vec!["https://app.example.com".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production_variants() {
        let mut config = test_config();
        for env in ["production", "PRODUCTION", "prod", "Prod"] {
            config.environment = env.to_string();
            assert!(config.is_production(), "{env} should count as production");
        }
        for env in ["development", "staging", "test"] {
            config.environment = env.to_string();
            assert!(!config.is_production(), "{env} should not count as production");
        }
    }

    #[test]
    fn test_zero_limits_rejected() {
        let mut config = test_config();
        config.max_upload_size_bytes = 0;
        assert!(config.validate().is_err());

        let mut config = test_config();
        config.list_max_results = 0;
        assert!(config.validate().is_err());

        let mut config = test_config();
        config.folder = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
