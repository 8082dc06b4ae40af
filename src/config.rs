// src/config.rs
use crate::application::usecase::scan_usecase::DEFAULT_CACHE_TTL_SECS;
use crate::domain::errors::{AppError, AppResult};
use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Scanner service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Candle provider configuration
    pub provider: ProviderConfig,

    /// Metric cache configuration
    pub cache: CacheConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host (e.g., "0.0.0.0")
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Whole-scan timeout in seconds, 0 disables it
    pub scan_timeout_secs: u64,
}

/// Candle provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API base URL (e.g., "https://finnhub.io/api/v1")
    pub base_url: String,

    /// API token, sent as a query parameter
    pub api_key: Option<String>,
}

/// Metric cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Freshness window of cached metric records
    pub ttl_secs: u64,

    /// Redis server shared by scanner instances; in-process store when unset
    #[serde(default)]
    pub redis_url: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "warn", "error")
    pub level: String,

    /// Log to file
    pub to_file: bool,

    /// Log file path
    pub file_path: Option<String>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))
    }

    pub fn scan_timeout(&self) -> Option<Duration> {
        match self.scan_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Config {
    /// Load from the JSON file named by `CONFIG_FILE`, else from the environment
    pub fn load() -> AppResult<Self> {
        dotenv().ok();

        match env::var("CONFIG_FILE").ok().filter(|p| !p.is_empty()) {
            Some(path) => {
                log::debug!("Loading configuration from {}", path);
                Self::from_file(path)
            }
            None => Self::from_env(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let defaults = Config::default();

        let server_config = ServerConfig {
            host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server.port),
            scan_timeout_secs: env::var("SCAN_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server.scan_timeout_secs),
        };

        let provider_config = ProviderConfig {
            base_url: env::var("CANDLE_API_URL").unwrap_or(defaults.provider.base_url),
            api_key: env::var("CANDLE_API_KEY").ok().filter(|k| !k.is_empty()),
        };

        let cache_config = CacheConfig {
            ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl| *ttl > 0)
                .unwrap_or(defaults.cache.ttl_secs),
            redis_url: env::var("REDIS_URL").ok().filter(|u| !u.is_empty()),
        };

        let logging_config = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or(defaults.logging.level),
            to_file: env::var("LOG_TO_FILE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            file_path: env::var("LOG_FILE_PATH").ok(),
        };

        Ok(Config {
            server: server_config,
            provider: provider_config,
            cache: cache_config,
            logging: logging_config,
        })
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;

        if config.cache.ttl_secs == 0 {
            return Err(AppError::Config("cache.ttl_secs must be positive".to_string()));
        }

        Ok(config)
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> AppResult<()> {
        let mut builder = env_logger::Builder::new();

        builder.filter_level(parse_level(&self.logging.level));

        // Configure output
        if self.logging.to_file {
            if let Some(file_path) = &self.logging.file_path {
                let file = File::create(file_path)
                    .map_err(|e| AppError::Config(format!("Failed to create log file: {}", e)))?;

                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
        }

        builder
            .try_init()
            .map_err(|e| AppError::Config(format!("Failed to initialize logger: {}", e)))?;

        Ok(())
    }
}

fn parse_level(level: &str) -> log::LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        "off" => log::LevelFilter::Off,
        _ => log::LevelFilter::Info,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                scan_timeout_secs: 0,
            },
            provider: ProviderConfig {
                base_url: "https://finnhub.io/api/v1".to_string(),
                api_key: None,
            },
            cache: CacheConfig {
                ttl_secs: DEFAULT_CACHE_TTL_SECS,
                redis_url: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                to_file: false,
                file_path: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();

        assert_eq!(config.cache.ttl_secs, 3600);
        assert_eq!(config.server.socket_addr().unwrap().port(), 8000);
        assert!(config.server.scan_timeout().is_none());
    }

    #[test]
    fn scan_timeout_from_seconds() {
        let mut config = Config::default();
        config.server.scan_timeout_secs = 30;
        assert_eq!(config.server.scan_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn bad_host_is_a_config_error() {
        let mut config = Config::default();
        config.server.host = "not a host".to_string();
        assert!(matches!(config.server.socket_addr(), Err(AppError::Config(_))));
    }

    fn temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "vwap_scanner_{}_{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_json_file() {
        let path = temp_config(
            "full",
            r#"{
                "server": {"host": "127.0.0.1", "port": 9000, "scan_timeout_secs": 20},
                "provider": {"base_url": "http://localhost:8080", "api_key": "secret"},
                "cache": {"ttl_secs": 600, "redis_url": "redis://redis:6379/0"},
                "logging": {"level": "debug", "to_file": false, "file_path": null}
            }"#,
        );
        let loaded = Config::from_file(&path);
        std::fs::remove_file(&path).ok();
        let config = loaded.unwrap();

        assert_eq!(config.server.socket_addr().unwrap().port(), 9000);
        assert_eq!(config.provider.api_key.as_deref(), Some("secret"));
        assert_eq!(config.cache.ttl_secs, 600);
        assert_eq!(config.cache.redis_url.as_deref(), Some("redis://redis:6379/0"));
    }

    #[test]
    fn redis_url_is_optional_in_files() {
        let path = temp_config(
            "no_redis",
            r#"{
                "server": {"host": "0.0.0.0", "port": 8000, "scan_timeout_secs": 0},
                "provider": {"base_url": "https://finnhub.io/api/v1", "api_key": null},
                "cache": {"ttl_secs": 3600},
                "logging": {"level": "info", "to_file": false, "file_path": null}
            }"#,
        );
        let loaded = Config::from_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(loaded.unwrap().cache.redis_url.is_none());
    }

    #[test]
    fn zero_ttl_in_file_is_rejected() {
        let path = temp_config(
            "zero_ttl",
            r#"{
                "server": {"host": "0.0.0.0", "port": 8000, "scan_timeout_secs": 0},
                "provider": {"base_url": "https://finnhub.io/api/v1", "api_key": null},
                "cache": {"ttl_secs": 0},
                "logging": {"level": "info", "to_file": false, "file_path": null}
            }"#,
        );
        let loaded = Config::from_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(loaded, Err(AppError::Config(_))));
    }

    #[test]
    fn missing_or_malformed_file_fails() {
        let missing = std::env::temp_dir().join("vwap_scanner_does_not_exist.json");
        assert!(matches!(Config::from_file(&missing), Err(AppError::Io(_))));

        let path = temp_config("malformed", "{ not json");
        let loaded = Config::from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(loaded, Err(AppError::Serialization(_))));
    }

    #[test]
    fn unknown_level_defaults_to_info() {
        assert_eq!(parse_level("LOUD"), log::LevelFilter::Info);
        assert_eq!(parse_level("Debug"), log::LevelFilter::Debug);
    }
}
