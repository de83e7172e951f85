use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the dashboard service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub fallback_admin: Option<FallbackCredential>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            fallback_admin: FallbackCredential::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Statically configured last-resort admin credential.
///
/// Consulted by the credential resolver only after the primary store has
/// failed to produce a match. Absent configuration disables the fallback
/// path entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackCredential {
    pub email: String,
    pub secret: FallbackSecret,
}

/// Secret material for the fallback credential. A pre-computed bcrypt hash
/// is preferred; a plaintext secret is accepted as a degraded mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackSecret {
    Hashed(String),
    Plaintext(String),
}

impl FallbackCredential {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let email = match env::var("ADMIN_EMAIL") {
            Ok(value) if !value.trim().is_empty() => value,
            _ => return Ok(None),
        };

        let hash = env::var("ADMIN_PASSWORD_HASH").ok().filter(|v| !v.is_empty());
        let plain = env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty());

        let secret = match (hash, plain) {
            (Some(hash), _) => FallbackSecret::Hashed(hash),
            (None, Some(plain)) => FallbackSecret::Plaintext(plain),
            (None, None) => return Err(ConfigError::FallbackSecretMissing),
        };

        Ok(Some(Self { email, secret }))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    FallbackSecretMissing,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::FallbackSecretMissing => write!(
                f,
                "ADMIN_EMAIL is set but neither ADMIN_PASSWORD_HASH nor ADMIN_PASSWORD is"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
