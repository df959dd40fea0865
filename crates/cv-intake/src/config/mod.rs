use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub intake: IntakeConfig,
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
            intake: IntakeConfig::from_env()?,
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

/// Which record sink strategy the service wires into the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Memory,
    Csv,
}

impl SinkKind {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "demo" => Ok(Self::Memory),
            "csv" => Ok(Self::Csv),
            other => Err(ConfigError::UnknownSink(other.to_string())),
        }
    }
}

pub const DEFAULT_SOURCE_LABEL: &str = "WhatsApp/File Upload";
pub const DEFAULT_TARGET_ID: &str = "demo_spreadsheet_id";
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Pipeline collaborators and row formatting.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub sink: SinkKind,
    pub sink_path: PathBuf,
    pub target_id: String,
    pub source_label: String,
    pub max_file_bytes: u64,
}

impl IntakeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let sink = SinkKind::parse(&env::var("INTAKE_SINK").unwrap_or_else(|_| "memory".into()))?;
        let sink_path = env::var("INTAKE_SINK_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("candidates.csv"));
        let target_id =
            env::var("INTAKE_TARGET_ID").unwrap_or_else(|_| DEFAULT_TARGET_ID.to_string());
        let source_label =
            env::var("INTAKE_SOURCE_LABEL").unwrap_or_else(|_| DEFAULT_SOURCE_LABEL.to_string());
        let max_file_bytes = match env::var("INTAKE_MAX_FILE_BYTES") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|bytes| *bytes > 0)
                .ok_or(ConfigError::InvalidMaxFileSize)?,
            Err(_) => DEFAULT_MAX_FILE_BYTES,
        };

        Ok(Self {
            sink,
            sink_path,
            target_id,
            source_label,
            max_file_bytes,
        })
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            sink: SinkKind::Memory,
            sink_path: PathBuf::from("candidates.csv"),
            target_id: DEFAULT_TARGET_ID.to_string(),
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMaxFileSize,
    UnknownSink(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMaxFileSize => {
                write!(f, "INTAKE_MAX_FILE_BYTES must be a positive integer")
            }
            ConfigError::UnknownSink(value) => {
                write!(f, "INTAKE_SINK must be 'memory' or 'csv', found '{value}'")
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
