//! Configuration validation rules.

use super::schema::Config;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    if config.api.base_url.trim().is_empty() {
        errors.push("api.base_url must not be empty".to_string());
    } else if !config.api.base_url.starts_with("http://")
        && !config.api.base_url.starts_with("https://")
    {
        errors.push("api.base_url must start with http:// or https://".to_string());
    }
    if config.api.timeout_secs == 0 {
        errors.push("api.timeout_secs must be > 0".to_string());
    }

    if config.storage.dir.trim().is_empty() {
        errors.push("storage.dir must not be empty".to_string());
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(format!(
            "logging.level must be one of {} (got '{}')",
            LOG_LEVELS.join(", "),
            config.logging.level
        ));
    }
    if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
        errors.push(format!(
            "logging.format must be one of {} (got '{}')",
            LOG_FORMATS.join(", "),
            config.logging.format
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Config(errors.join("; ")))
    }
}
