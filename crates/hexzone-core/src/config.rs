use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(invalid(var, format!("{raw} is not a finite number")))
        }
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got {other:?}"))),
        }
    };

    let env = parse_environment(&or_default("HEXZONE_ENV", "development"))?;
    let log_level = or_default("HEXZONE_LOG_LEVEL", "info");

    let default_cell_size_meters = parse_f64("HEXZONE_DEFAULT_CELL_SIZE_METERS", "450")?;
    if default_cell_size_meters <= 0.0 {
        return Err(invalid(
            "HEXZONE_DEFAULT_CELL_SIZE_METERS",
            "must be greater than zero".to_string(),
        ));
    }

    let default_radius_meters = parse_f64("HEXZONE_DEFAULT_RADIUS_METERS", "3000")?;
    if default_radius_meters < 0.0 {
        return Err(invalid(
            "HEXZONE_DEFAULT_RADIUS_METERS",
            "must not be negative".to_string(),
        ));
    }

    let accept_legacy_axial_ids = parse_bool("HEXZONE_ACCEPT_LEGACY_AXIAL_IDS", "true")?;
    let source_timeout_ms = parse_u64("HEXZONE_SOURCE_TIMEOUT_MS", "2000")?;

    let max_concurrent_resolves = parse_usize("HEXZONE_MAX_CONCURRENT_RESOLVES", "16")?;
    if max_concurrent_resolves == 0 {
        return Err(invalid(
            "HEXZONE_MAX_CONCURRENT_RESOLVES",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        log_level,
        default_cell_size_meters,
        default_radius_meters,
        accept_legacy_axial_ids,
        source_timeout_ms,
        max_concurrent_resolves,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "HEXZONE_ENV".to_string(),
            reason: format!(
                "unrecognized environment {other:?}; expected development, test, or production"
            ),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
