use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::triage::ranking::MAX_RECOMMENDATIONS;
use crate::triage::RankingPolicy;

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub triage: TriageConfig,
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

        let catalog_csv = env::var("TRIAGE_CATALOG_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let defaults = RankingPolicy::default();
        let max_recommendations =
            numeric_var("TRIAGE_MAX_RECOMMENDATIONS", defaults.max_results)?;
        if !(1..=MAX_RECOMMENDATIONS).contains(&max_recommendations) {
            return Err(ConfigError::InvalidRecommendationLimit {
                value: max_recommendations,
            });
        }
        let opening_hour = numeric_var("TRIAGE_OPEN_HOUR", defaults.opening_hour)?;
        let closing_hour = numeric_var("TRIAGE_CLOSE_HOUR", defaults.closing_hour)?;
        if opening_hour > closing_hour || closing_hour > 23 {
            return Err(ConfigError::InvalidOpeningWindow {
                opening_hour,
                closing_hour,
            });
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            triage: TriageConfig {
                catalog_csv,
                max_recommendations,
                opening_hour,
                closing_hour,
            },
        })
    }
}

fn numeric_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key }),
        Err(_) => Ok(default),
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Facility catalog source and ranking knobs.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// CSV export to load facilities from; the seeded catalog is used when unset.
    pub catalog_csv: Option<PathBuf>,
    pub max_recommendations: usize,
    pub opening_hour: u32,
    pub closing_hour: u32,
}

impl TriageConfig {
    pub fn ranking_policy(&self) -> RankingPolicy {
        RankingPolicy {
            max_results: self.max_recommendations,
            opening_hour: self.opening_hour,
            closing_hour: self.closing_hour,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str },
    InvalidRecommendationLimit { value: usize },
    InvalidOpeningWindow { opening_hour: u32, closing_hour: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key } => {
                write!(f, "{key} must be a non-negative integer")
            }
            ConfigError::InvalidRecommendationLimit { value } => write!(
                f,
                "TRIAGE_MAX_RECOMMENDATIONS must be between 1 and {MAX_RECOMMENDATIONS}, got {value}"
            ),
            ConfigError::InvalidOpeningWindow {
                opening_hour,
                closing_hour,
            } => write!(
                f,
                "opening window {opening_hour}..={closing_hour} must be ordered and within 0-23"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidRecommendationLimit { .. }
            | ConfigError::InvalidOpeningWindow { .. } => None,
        }
    }
}
