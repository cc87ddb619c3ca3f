use std::env;
use std::fmt;

use crate::bonus::Department;

/// Distinguishes runtime behavior for different stages of the tool.
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
    pub engine: EngineConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("BONUS_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let fallback_department = match env::var("BONUS_FALLBACK_DEPARTMENT") {
            Ok(raw) => Department::parse(&raw).ok_or(ConfigError::InvalidDepartment(raw))?,
            Err(_) => Department::RestaurantLead,
        };

        let achievement_ceiling = match env::var("BONUS_ACHIEVEMENT_CEILING") {
            Ok(raw) if raw.trim().is_empty() => None,
            Ok(raw) => Some(parse_ceiling(&raw)?),
            Err(_) => None,
        };

        let log_level = env::var("BONUS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            engine: EngineConfig {
                fallback_department,
                achievement_ceiling,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_ceiling(raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(ConfigError::InvalidAchievementCeiling(raw.to_string())),
    }
}

/// Scoring and sanitizing policy.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Department assigned to employees whose stored department is unknown.
    pub fallback_department: Department,
    pub achievement_ceiling: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_department: Department::RestaurantLead,
            achievement_ceiling: None,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidDepartment(String),
    InvalidAchievementCeiling(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDepartment(value) => write!(
                f,
                "BONUS_FALLBACK_DEPARTMENT '{}' must be one of RL, Office, Finanz/Lohnbuchhaltung, AL",
                value
            ),
            ConfigError::InvalidAchievementCeiling(value) => write!(
                f,
                "BONUS_ACHIEVEMENT_CEILING '{}' must be a positive number",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Serializes tests that touch process environment variables.
#[cfg(test)]
pub(crate) fn env_guard() -> &'static std::sync::Mutex<()> {
    use std::sync::{Mutex, OnceLock};

    static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
    GUARD.get_or_init(|| Mutex::new(()))
}
