use crate::prediction::ScenarioDefaults;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// File name of the model artifact expected next to the installed executable.
pub const MODEL_ARTIFACT_FILE: &str = "accident_severity_model.json";

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
    pub model: ModelConfig,
    pub scenario: ScenarioDefaults,
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

        let artifact_path = match env::var("APP_MODEL_PATH") {
            Ok(raw) if !raw.trim().is_empty() => PathBuf::from(raw.trim()),
            _ => ModelConfig::install_default()?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            model: ModelConfig { artifact_path },
            scenario: load_scenario()?,
        })
    }
}

fn load_scenario() -> Result<ScenarioDefaults, ConfigError> {
    let mut scenario = ScenarioDefaults::default();

    if let Ok(raw) = env::var("APP_SCENARIO_YEAR") {
        scenario.year = raw
            .trim()
            .parse::<i32>()
            .map_err(|_| ConfigError::InvalidScenarioYear(raw.clone()))?;
    }
    if let Ok(raw) = env::var("APP_SCENARIO_MONTH") {
        scenario.month = raw
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|month| (1..=12).contains(month))
            .ok_or_else(|| ConfigError::InvalidScenarioMonth(raw.clone()))?;
    }
    if let Ok(raw) = env::var("APP_SCENARIO_ROAD_TYPE") {
        scenario.road_type = non_blank("APP_SCENARIO_ROAD_TYPE", raw)?;
    }
    if let Ok(raw) = env::var("APP_SCENARIO_ROAD_SURFACE") {
        scenario.road_surface_conditions = non_blank("APP_SCENARIO_ROAD_SURFACE", raw)?;
    }

    Ok(scenario)
}

fn non_blank(variable: &'static str, raw: String) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ConfigError::BlankScenarioValue(variable))
    } else {
        Ok(trimmed.to_string())
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

/// Location of the serialized severity model.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub artifact_path: PathBuf,
}

impl ModelConfig {
    /// Artifact path next to the running executable.
    pub fn install_default() -> Result<PathBuf, ConfigError> {
        let executable = env::current_exe().map_err(ConfigError::InstallLocation)?;
        let install_dir = executable.parent().unwrap_or_else(|| Path::new("."));
        Ok(install_dir.join(MODEL_ARTIFACT_FILE))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InstallLocation(std::io::Error),
    InvalidScenarioYear(String),
    InvalidScenarioMonth(String),
    BlankScenarioValue(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InstallLocation(err) => {
                write!(f, "unable to resolve the executable location: {err}")
            }
            ConfigError::InvalidScenarioYear(raw) => {
                write!(f, "APP_SCENARIO_YEAR must be an integer year, got '{raw}'")
            }
            ConfigError::InvalidScenarioMonth(raw) => {
                write!(f, "APP_SCENARIO_MONTH must be between 1 and 12, got '{raw}'")
            }
            ConfigError::BlankScenarioValue(variable) => write!(f, "{variable} must not be blank"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InstallLocation(err) => Some(err),
            ConfigError::InvalidPort
            | ConfigError::InvalidScenarioYear(_)
            | ConfigError::InvalidScenarioMonth(_)
            | ConfigError::BlankScenarioValue(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::{DEFAULT_ROAD_SURFACE, DEFAULT_ROAD_TYPE};
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_MODEL_PATH");
        env::remove_var("APP_SCENARIO_YEAR");
        env::remove_var("APP_SCENARIO_MONTH");
        env::remove_var("APP_SCENARIO_ROAD_TYPE");
        env::remove_var("APP_SCENARIO_ROAD_SURFACE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(
            config.model.artifact_path.file_name().and_then(|name| name.to_str()),
            Some(MODEL_ARTIFACT_FILE)
        );
        assert_eq!(config.scenario.year, 2024);
        assert_eq!(config.scenario.month, 6);
        assert_eq!(config.scenario.road_type, DEFAULT_ROAD_TYPE);
        assert_eq!(config.scenario.road_surface_conditions, DEFAULT_ROAD_SURFACE);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn model_path_and_scenario_can_be_overridden() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_MODEL_PATH", "/opt/models/severity.json");
        env::set_var("APP_SCENARIO_YEAR", "2019");
        env::set_var("APP_SCENARIO_MONTH", "12");
        env::set_var("APP_SCENARIO_ROAD_SURFACE", "Wet or damp");

        let config = AppConfig::load().expect("config loads");

        assert_eq!(
            config.model.artifact_path,
            PathBuf::from("/opt/models/severity.json")
        );
        assert_eq!(config.scenario.year, 2019);
        assert_eq!(config.scenario.month, 12);
        assert_eq!(config.scenario.road_surface_conditions, "Wet or damp");
        assert_eq!(config.scenario.road_type, DEFAULT_ROAD_TYPE);
        reset_env();
    }

    #[test]
    fn rejects_out_of_range_scenario_month() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_SCENARIO_MONTH", "13");

        let err = AppConfig::load().expect_err("month 13 is rejected");

        assert!(matches!(err, ConfigError::InvalidScenarioMonth(ref raw) if raw == "13"));
        reset_env();
    }

    #[test]
    fn rejects_invalid_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "not-a-port");

        let err = AppConfig::load().expect_err("port is rejected");

        assert!(matches!(err, ConfigError::InvalidPort));
        reset_env();
    }
}
