use crate::config::types::{Config, FetchConfig, IndexConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_site_config(&config.sites)?;
    validate_output_config(&config.output)?;
    if let Some(index) = &config.index {
        validate_index_config(index)?;
    }
    Ok(())
}

/// Validates fetch engine configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.max_concurrency < 1 || config.max_concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrency must be between 1 and 100, got {}",
            config.max_concurrency
        )));
    }

    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "user_agents pool cannot be empty".to_string(),
        ));
    }

    if let Some(batch_timeout) = config.batch_timeout_secs {
        if batch_timeout < 1 {
            return Err(ConfigError::Validation(
                "batch_timeout_secs must be >= 1 when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates the site topology
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_base_url("primary-base-url", &config.primary_base_url)?;
    validate_base_url("fallback-base-url", &config.fallback_base_url)?;

    for entry in &config.path_map {
        if !entry.primary.starts_with('/') || !entry.fallback.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "path-map entries must be absolute paths, got '{}' -> '{}'",
                entry.primary, entry.fallback
            )));
        }
    }

    Ok(())
}

/// Validates that a base URL parses and uses an HTTP scheme
fn validate_base_url(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
    }

    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", name, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} must use http or https, got '{}'",
            name, value
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates search index configuration
fn validate_index_config(config: &IndexConfig) -> Result<(), ConfigError> {
    validate_base_url("index base-url", &config.base_url)?;

    if config.index_name.is_empty() {
        return Err(ConfigError::Validation(
            "index-name cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{ListingConfig, OutputConfig, PathMapEntry};

    fn valid_config() -> Config {
        Config {
            fetch: FetchConfig {
                request_delay_ms: 1000,
                jitter_ms: 500,
                max_retries: 5,
                timeout_secs: 30,
                max_concurrency: 4,
                backoff_cap_secs: 60,
                batch_timeout_secs: None,
                user_agents: vec!["TestAgent/1.0".to_string()],
            },
            sites: SiteConfig {
                primary_base_url: "https://primary.example.com".to_string(),
                fallback_base_url: "https://mirror.example.com".to_string(),
                path_map: vec![PathMapEntry {
                    primary: "/judgments/".to_string(),
                    fallback: "/cases/".to_string(),
                }],
            },
            output: OutputConfig {
                directory: "./output".to_string(),
            },
            listing: ListingConfig::default(),
            index: None,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = valid_config();
        config.fetch.max_concurrency = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_user_agent_pool_rejected() {
        let mut config = valid_config();
        config.fetch.user_agents.clear();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = valid_config();
        config.sites.primary_base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut config = valid_config();
        config.sites.fallback_base_url = "ftp://mirror.example.com".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_relative_path_map_entry_rejected() {
        let mut config = valid_config();
        config.sites.path_map[0].primary = "judgments/".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_index_config_validated_when_present() {
        let mut config = valid_config();
        config.index = Some(IndexConfig {
            base_url: "http://localhost:9200".to_string(),
            index_name: String::new(),
        });
        assert!(validate(&config).is_err());
    }
}
