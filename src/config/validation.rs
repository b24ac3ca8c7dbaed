use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Hard ceilings on crawl limits; a profile bootstrap never needs more
const MAX_DEPTH_LIMIT: u32 = 5;
const MAX_PAGES_LIMIT: u32 = 500;
const MAX_REDIRECT_LIMIT: usize = 10;
const MAX_POLITENESS_DELAY_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_depth < 1 || config.max_depth > MAX_DEPTH_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_depth must be between 1 and {}, got {}",
            MAX_DEPTH_LIMIT, config.max_depth
        )));
    }

    if config.max_pages < 1 || config.max_pages > MAX_PAGES_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_pages must be between 1 and {}, got {}",
            MAX_PAGES_LIMIT, config.max_pages
        )));
    }

    if config.politeness_delay_ms > MAX_POLITENESS_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "politeness_delay_ms must be <= {}ms, got {}ms",
            MAX_POLITENESS_DELAY_MS, config.politeness_delay_ms
        )));
    }

    if config.seed_timeout_secs < 1 || config.page_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeouts must be >= 1s, got seed={}s page={}s",
            config.seed_timeout_secs, config.page_timeout_secs
        )));
    }

    if config.seed_max_redirects > MAX_REDIRECT_LIMIT
        || config.page_max_redirects > MAX_REDIRECT_LIMIT
    {
        return Err(ConfigError::Validation(format!(
            "redirect caps must be <= {}, got seed={} page={}",
            MAX_REDIRECT_LIMIT, config.seed_max_redirects, config.page_max_redirects
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
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
    fn test_validate_depth_bounds() {
        let mut config = Config::default();
        config.crawler.max_depth = 0;
        assert!(validate(&config).is_err());

        config.crawler.max_depth = MAX_DEPTH_LIMIT + 1;
        assert!(validate(&config).is_err());

        config.crawler.max_depth = MAX_DEPTH_LIMIT;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_page_budget() {
        let mut config = Config::default();
        config.crawler.max_pages = 0;
        assert!(validate(&config).is_err());

        config.crawler.max_pages = 1;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_timeouts_and_redirects() {
        let mut config = Config::default();
        config.crawler.page_timeout_secs = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.crawler.seed_max_redirects = 11;
        assert!(validate(&config).is_err());

        // Zero redirects is allowed: the fetch simply refuses to follow any
        let mut config = Config::default();
        config.crawler.page_max_redirects = 0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_crawler_name() {
        let mut config = Config::default();
        config.user_agent.crawler_name = "Bad Name!".to_string();
        assert!(validate(&config).is_err());

        config.user_agent.crawler_name = String::new();
        assert!(validate(&config).is_err());

        config.user_agent.crawler_name = "site-seed-2".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_contact_url() {
        let mut config = Config::default();
        config.user_agent.contact_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_database_path() {
        let mut config = Config::default();
        config.output.database_path = "  ".to_string();
        assert!(validate(&config).is_err());
    }
}
