//! Configuration loading and constants.
//!
//! Loads application configuration from an optional TOML file and defines
//! constants for Cache-Control headers, default mount prefixes, logging and
//! default paths. `AppConfig` is the root configuration struct; every section
//! is optional and falls back to built-in defaults.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// The user directory is compiled into the binary and never changes while the
// process runs, so successful user responses may be cached. Health probes and
// error responses must always reach the origin.

/// User list and user detail responses
pub const HTTP_CACHE_USERS_MAX_AGE: u32 = 300;

pub const CACHE_CONTROL_USERS: &str = formatcp!("public, max-age={}", HTTP_CACHE_USERS_MAX_AGE);

/// Health probes and error responses
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

// =============================================================================
// Defaults
// =============================================================================

/// Environment variable holding the version reported by the health endpoint
pub const APP_VERSION_ENV: &str = "APP_VERSION";

/// Version reported when `APP_VERSION` is unset or empty
pub const DEFAULT_APP_VERSION: &str = "1.0.0";

/// Default mount prefix for the health endpoint
pub const DEFAULT_HEALTH_PREFIX: &str = "/health";

/// Default mount prefix for the user endpoints
pub const DEFAULT_USERS_PREFIX: &str = "/api/users";

/// Default listen address
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Seconds to wait for in-flight requests after SIGTERM/SIGINT
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "users_api=debug,tower_http=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Mount prefixes for the route groups
    #[serde(default)]
    pub routes: RoutesConfig,
    /// Application metadata
    #[serde(default)]
    pub app: AppSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    #[serde(default = "HttpServerConfig::default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
    #[serde(default)]
    pub tls: TlsConfig,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_timeout_seconds: Self::default_shutdown_timeout(),
            tls: TlsConfig::default(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    fn default_shutdown_timeout() -> u64 {
        DEFAULT_SHUTDOWN_TIMEOUT_SECS
    }
}

/// TLS mode for the listener
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Plain HTTP, typically behind a reverse proxy
    #[default]
    None,
    /// User-provided PEM certificate and key
    Manual,
}

impl std::fmt::Display for TlsMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TlsMode::None => write!(f, "none"),
            TlsMode::Manual => write!(f, "manual"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsConfig {
    #[serde(default)]
    pub mode: TlsMode,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

/// Mount prefixes for each route group
#[derive(Debug, Clone, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "RoutesConfig::default_health_prefix")]
    pub health_prefix: String,
    #[serde(default = "RoutesConfig::default_users_prefix")]
    pub users_prefix: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            health_prefix: Self::default_health_prefix(),
            users_prefix: Self::default_users_prefix(),
        }
    }
}

impl RoutesConfig {
    fn default_health_prefix() -> String {
        DEFAULT_HEALTH_PREFIX.to_string()
    }

    fn default_users_prefix() -> String {
        DEFAULT_USERS_PREFIX.to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// Version reported when `APP_VERSION` is not set
    #[serde(default = "AppSettings::default_version")]
    pub version: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
        }
    }
}

impl AppSettings {
    fn default_version() -> String {
        DEFAULT_APP_VERSION.to_string()
    }

    /// Resolve the reported version from the process environment.
    pub fn resolve_version(&self) -> String {
        resolve_version(std::env::var(APP_VERSION_ENV).ok().as_deref(), &self.version)
    }
}

/// Pick the version to report: a non-empty override wins, otherwise the fallback.
pub fn resolve_version(env_value: Option<&str>, fallback: &str) -> String {
    match env_value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    /// Load configuration from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_prefix("routes.health_prefix", &self.routes.health_prefix)?;
        validate_prefix("routes.users_prefix", &self.routes.users_prefix)?;

        if self.routes.health_prefix == self.routes.users_prefix {
            return Err(ConfigError::Validation(
                "routes.health_prefix and routes.users_prefix must differ".to_string(),
            ));
        }

        if self.http.tls.mode == TlsMode::Manual
            && (self.http.tls.cert_path.is_none() || self.http.tls.key_path.is_none())
        {
            return Err(ConfigError::Validation(
                "http.tls.mode = \"manual\" requires cert_path and key_path".to_string(),
            ));
        }

        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got \"{}\"",
                other
            ))),
        }
    }
}

// Router nesting rejects the root and trailing slashes
fn validate_prefix(field: &str, prefix: &str) -> Result<(), ConfigError> {
    if !prefix.starts_with('/') || prefix.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "{} must start with '/' and must not end with '/', got \"{}\"",
            field, prefix
        )));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.http.shutdown_timeout_seconds, 30);
        assert_eq!(config.http.tls.mode, TlsMode::None);
        assert_eq!(config.routes.health_prefix, "/health");
        assert_eq!(config.routes.users_prefix, "/api/users");
        assert_eq!(config.app.version, "1.0.0");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_default_impl_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[http]
host = "127.0.0.1"
port = 8080

[routes]
users_prefix = "/v2/users"

[app]
version = "0.9.0"

[logging]
format = "json"
"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.routes.health_prefix, "/health");
        assert_eq!(config.routes.users_prefix, "/v2/users");
        assert_eq!(config.app.version, "0.9.0");
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = AppConfig::from_toml("[http\nport = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_root_prefix() {
        let err = AppConfig::from_toml("[routes]\nhealth_prefix = \"/\"").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_rejects_trailing_slash_and_relative_prefix() {
        assert!(AppConfig::from_toml("[routes]\nusers_prefix = \"/api/users/\"").is_err());
        assert!(AppConfig::from_toml("[routes]\nusers_prefix = \"api/users\"").is_err());
    }

    #[test]
    fn test_rejects_identical_prefixes() {
        let err = AppConfig::from_toml(
            "[routes]\nhealth_prefix = \"/x\"\nusers_prefix = \"/x\"",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_manual_tls_requires_paths() {
        let err = AppConfig::from_toml("[http.tls]\nmode = \"manual\"\ncert_path = \"c.pem\"")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let config = AppConfig::from_toml(
            "[http.tls]\nmode = \"manual\"\ncert_path = \"c.pem\"\nkey_path = \"k.pem\"",
        )
        .unwrap();
        assert_eq!(config.http.tls.mode, TlsMode::Manual);
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let err = AppConfig::from_toml("[logging]\nformat = \"xml\"").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_resolve_version_prefers_env() {
        assert_eq!(resolve_version(Some("2.3.1"), "1.0.0"), "2.3.1");
    }

    #[test]
    fn test_resolve_version_falls_back_when_unset_or_empty() {
        assert_eq!(resolve_version(None, "1.0.0"), "1.0.0");
        assert_eq!(resolve_version(Some(""), "1.0.0"), "1.0.0");
    }

    #[test]
    fn test_cache_control_users() {
        assert_eq!(CACHE_CONTROL_USERS, "public, max-age=300");
    }
}
