use crate::config::types::{Config, InputConfig, OutputConfig, ScraperConfig, UserAgentConfig};
use crate::url::validate_address;
use crate::ConfigError;

const MAX_DELAY_MS: u64 = 60_000;
const MAX_TIMEOUT_SECS: u64 = 120;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_input_config(&config.input)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates fetch and pacing settings
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    validate_address(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if config.delay_ms > MAX_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "delay_ms must be <= {}ms, got {}ms",
            MAX_DELAY_MS, config.delay_ms
        )));
    }

    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user agent name cannot be empty".to_string(),
        ));
    }

    if !config.name.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "user agent name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    if config.version.is_empty() {
        return Err(ConfigError::Validation(
            "user agent version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the input source
fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if let Some(seed) = &config.seed_url {
        validate_address(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed_url '{}': {}", seed, e)))?;
    } else if config.source_dir.is_empty() {
        return Err(ConfigError::Validation(
            "source_dir cannot be empty when no seed_url is given".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.output_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output_dir cannot be empty".to_string(),
        ));
    }

    if config.reports_dir.is_empty() {
        return Err(ConfigError::Validation(
            "reports_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_delay_bounds() {
        let mut config = Config::default();
        config.scraper.delay_ms = 0;
        assert!(validate(&config).is_ok());

        config.scraper.delay_ms = MAX_DELAY_MS + 1;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_max_pages() {
        let mut config = Config::default();
        config.scraper.max_pages = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = Config::default();
        config.scraper.base_url = "ftp://en.wikipedia.org".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_user_agent_name() {
        let mut config = Config::default();
        config.user_agent.name = "Wiki Harvest".to_string();
        assert!(validate(&config).is_err());

        config.user_agent.name = "Wiki-Harvest".to_string();
        assert!(validate(&config).is_ok());

        config.user_agent.name = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_seed_url() {
        let mut config = Config::default();
        config.input.seed_url = Some("not a url".to_string());
        assert!(validate(&config).is_err());

        config.input.seed_url = Some("https://en.wikipedia.org/wiki/Rust".to_string());
        config.input.source_dir = String::new();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_output_dirs() {
        let mut config = Config::default();
        config.output.output_dir = String::new();
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.output.reports_dir = String::new();
        assert!(validate(&config).is_err());
    }
}
