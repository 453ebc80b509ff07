use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_CENTERS_URL: &str =
    "https://n8n.cemedis.app/webhook/daaa2ad8-4e83-475b-a6b6-6cb512380c05";
pub const DEFAULT_CANDIDACY_URL: &str =
    "https://n8n.cemedis.app/webhook/50976d82-8f4f-411b-8bf6-ccfb2977b968";
pub const DEFAULT_CANDIDACY_DAYS_URL: &str =
    "https://n8n.cemedis.app/webhook/824076ed-9c98-4f61-ad26-cbc39dc191c1";
pub const DEFAULT_GEOCODER_BASE_URL: &str = "https://maps.googleapis.com";

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
/// Every variable has a default, so only malformed values fail.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(raw)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("\"{raw}\" is not an http(s) URL"),
            })
        }
    };

    let env = parse_environment(&or_default("FINDER_ENV", "development"))?;
    let log_level = or_default("FINDER_LOG_LEVEL", "info");

    let centers_url = parse_url("FINDER_CENTERS_URL", DEFAULT_CENTERS_URL)?;
    let candidacy_url = parse_url("FINDER_CANDIDACY_URL", DEFAULT_CANDIDACY_URL)?;
    let candidacy_days_url = parse_url("FINDER_CANDIDACY_DAYS_URL", DEFAULT_CANDIDACY_DAYS_URL)?;

    let geocoder_api_key = lookup("FINDER_GEOCODER_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    let geocoder_base_url = parse_url("FINDER_GEOCODER_BASE_URL", DEFAULT_GEOCODER_BASE_URL)?;
    let geocoder_region = or_default("FINDER_GEOCODER_REGION", "fr");

    let request_timeout_secs = parse_u64("FINDER_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "FINDER_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("FINDER_USER_AGENT", "centre-finder/0.1");
    let fetch_max_retries = parse_u32("FINDER_FETCH_MAX_RETRIES", "2")?;
    let retry_backoff_base_secs = parse_u64("FINDER_RETRY_BACKOFF_BASE_SECS", "1")?;

    Ok(AppConfig {
        env,
        log_level,
        centers_url,
        candidacy_url,
        candidacy_days_url,
        geocoder_api_key,
        geocoder_base_url,
        geocoder_region,
        request_timeout_secs,
        user_agent,
        fetch_max_retries,
        retry_backoff_base_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FINDER_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
