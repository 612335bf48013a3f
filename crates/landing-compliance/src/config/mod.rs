use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::landings::{DeminimisPolicy, RiskConfig, RiskWeights};

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
    pub risk: RiskConfig,
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
        let format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw)
                .ok_or(ConfigError::InvalidLogFormat { value: raw })?,
            Err(_) => LogFormat::default_for(environment),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, format },
            risk: load_risk_config()?,
        })
    }
}

fn load_risk_config() -> Result<RiskConfig, ConfigError> {
    let weights = RiskWeights {
        vessel: weight_var("RISK_VESSEL_WEIGHT", 1.0)?,
        species: weight_var("RISK_SPECIES_WEIGHT", 1.0)?,
        exporter: weight_var("RISK_EXPORTER_WEIGHT", 1.0)?,
        threshold: number_var("RISK_THRESHOLD", 1.0)?,
        species_risk_enabled: bool_var("RISK_SPECIES_TOGGLE", true)?,
    };

    let deminimis_kg = weight_var("DEMINIMIS_KG", DeminimisPolicy::DEFAULT_TOLERANCE_KG)?;

    Ok(RiskConfig {
        weights,
        deminimis: DeminimisPolicy::new(deminimis_kg),
    })
}

fn number_var(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(name) {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidNumber { name, value: raw.clone() })?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(ConfigError::InvalidNumber { name, value: raw })
            }
        }
        Err(_) => Ok(default),
    }
}

fn weight_var(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    let value = number_var(name, default)?;
    if value < 0.0 {
        return Err(ConfigError::NegativeWeight { name, value });
    }
    Ok(value)
}

fn bool_var(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidFlag { name, value: raw }),
        },
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

/// Output shape of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Production ships JSON to the log pipeline; elsewhere logs are read in a terminal.
    fn default_for(environment: AppEnvironment) -> Self {
        match environment {
            AppEnvironment::Production => Self::Json,
            AppEnvironment::Development | AppEnvironment::Test => Self::Compact,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { name: &'static str, value: String },
    NegativeWeight { name: &'static str, value: f64 },
    InvalidFlag { name: &'static str, value: String },
    InvalidLogFormat { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} must be a finite number (found '{value}')")
            }
            ConfigError::NegativeWeight { name, value } => {
                write!(f, "{name} must not be negative (found {value})")
            }
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be true or false (found '{value}')")
            }
            ConfigError::InvalidLogFormat { value } => {
                write!(f, "APP_LOG_FORMAT must be compact or json (found '{value}')")
            }
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
