use anyhow::{anyhow, Result};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Placeholder secret of `Config::default()`; never accepted by `Config::load`
const DEFAULT_JWT_SECRET: &str = "secret";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: MongoDbConfig,
    pub cors: CorsConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MongoDbConfig {
    pub uri: String,
    pub database: String,
    pub connection_timeout_ms: u64,
    pub max_pool_size: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub supports_credentials: bool,
}

/// Settings for verifying the bearer tokens issued by the user service
#[derive(Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Allowed clock skew when checking `exp`, in seconds
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

fn default_leeway() -> u64 {
    60
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                log_level: "info".to_string(),
            },
            database: MongoDbConfig {
                uri: "mongodb://localhost:27017".to_string(),
                database: "pool_registry".to_string(),
                connection_timeout_ms: 5000,
                max_pool_size: Some(10),
            },
            cors: CorsConfig {
                allowed_origins: vec!["http://localhost:8080".to_string()],
                allowed_methods: vec![
                    "GET".to_string(),
                    "POST".to_string(),
                    "PUT".to_string(),
                ],
                allowed_headers: vec![
                    "Authorization".to_string(),
                    "Accept".to_string(),
                    "Content-Type".to_string(),
                ],
                supports_credentials: true,
            },
            auth: AuthConfig {
                jwt_secret: DEFAULT_JWT_SECRET.to_string(),
                leeway_secs: default_leeway(),
            },
        }
    }
}

impl MongoDbConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.uri.is_empty() {
            return Err(anyhow!("MongoDB URI not configured"));
        }

        if self.database.is_empty() {
            return Err(anyhow!("MongoDB database name not configured"));
        }

        Ok(())
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(anyhow!("JWT secret not configured"));
        }

        if self.jwt_secret == DEFAULT_JWT_SECRET {
            return Err(anyhow!(
                "JWT secret is the built-in placeholder, set [auth].jwt_secret or JWT_SECRET"
            ));
        }

        Ok(())
    }
}

impl Config {
    /// Load from `path`, falling back to environment variables and defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Loading config from {}", path.as_ref().display());
        let config = match Self::load_from_file(&path) {
            Ok(config) => {
                info!("Config loaded from file");
                config
            }
            Err(e) => {
                error!("Failed to load config from file: {}", e);
                info!("Falling back to environment variables or defaults");
                Self::from_env()
            }
        };

        config.database.validate()?;
        config.auth.validate()?;

        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn from_env() -> Self {
        let mut config = Config::default();

        // Override with environment variables if present
        if let Ok(host) = std::env::var("SERVER_HOST") {
            config.server.host = host;
        }

        if let Ok(port) = std::env::var("SERVER_PORT") {
            if let Ok(port_num) = port.parse::<u16>() {
                config.server.port = port_num;
            }
        }

        if let Ok(log_level) = std::env::var("RUST_LOG") {
            config.server.log_level = log_level;
        }

        if let Ok(uri) = std::env::var("MONGODB_URI") {
            config.database.uri = uri;
        }

        if let Ok(db_name) = std::env::var("MONGODB_DATABASE") {
            config.database.database = db_name;
        }

        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            config.cors.allowed_origins =
                origins.split(',').map(|s| s.trim().to_string()).collect();
        }

        if let Ok(secret) = std::env::var("JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.uri, "mongodb://localhost:27017");
        assert_eq!(config.database.database, "pool_registry");
        assert!(config.database.validate().is_ok());
    }

    #[test]
    fn test_config_from_env() {
        std::env::set_var("SERVER_PORT", "9090");
        std::env::set_var("JWT_SECRET", "from-env");

        let config = Config::from_env();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.auth.jwt_secret, "from-env");

        // Clean up
        std::env::remove_var("SERVER_PORT");
        std::env::remove_var("JWT_SECRET");
    }

    #[test]
    fn test_config_from_toml() {
        let toml_string = r#"
            [server]
            host = "0.0.0.0"
            port = 8000
            log_level = "debug"

            [database]
            uri = "mongodb://db:27017"
            database = "pools"
            connection_timeout_ms = 1000

            [cors]
            allowed_origins = ["https://app.example.com"]
            allowed_methods = ["GET"]
            allowed_headers = ["Authorization"]
            supports_credentials = false

            [auth]
            jwt_secret = "s3cr3t"
        "#;

        let config: Config = toml::from_str(toml_string).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.max_pool_size, None);
        assert_eq!(config.auth.leeway_secs, 60);
    }

    #[test]
    fn test_validate_rejects_empty_uri() {
        let mut config = Config::default();
        config.database.uri = String::new();
        assert!(config.database.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_placeholder_secret() {
        let config = Config::default();
        assert!(config.auth.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let mut config = Config::default();
        config.auth.jwt_secret = "  ".to_string();
        assert!(config.auth.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_configured_secret() {
        let mut config = Config::default();
        config.auth.jwt_secret = "s3cr3t".to_string();
        assert!(config.auth.validate().is_ok());
    }

    #[test]
    fn test_load_from_file_with_placeholder_secret_is_rejected() {
        let path = std::env::temp_dir().join(format!(
            "pool-registry-placeholder-{}.toml",
            std::process::id()
        ));
        let mut config = Config::default();
        config.auth.jwt_secret = DEFAULT_JWT_SECRET.to_string();
        fs::write(&path, toml::to_string(&config).unwrap()).unwrap();

        let result = Config::load(&path);
        fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config::default();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("jwt_secret: \"secret\""));
        assert!(rendered.contains("<redacted>"));
    }
}
