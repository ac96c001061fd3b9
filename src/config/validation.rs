use crate::config::types::{Config, CrawlerConfig, InputConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_input_config(&config.input)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.keyword.trim().is_empty() {
        return Err(ConfigError::Validation(
            "keyword cannot be empty".to_string(),
        ));
    }

    // max_depth >= 0 is always true for u32, so no check needed

    if config.max_workers_per_node < 1 || config.max_workers_per_node > 64 {
        return Err(ConfigError::Validation(format!(
            "max_workers_per_node must be between 1 and 64, got {}",
            config.max_workers_per_node
        )));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 256 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 256, got {}",
            config.max_concurrent_fetches
        )));
    }

    let timeout = config.fetch_timeout_seconds;
    if !timeout.is_finite() || timeout <= 0.0 || timeout > 300.0 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_seconds must be > 0 and <= 300, got {}",
            timeout
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

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if config.seeds_path.is_empty() {
        return Err(ConfigError::Validation(
            "seeds_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    let mut paths = vec![
        ("found_pages_path", &config.found_pages_path),
        ("found_domains_path", &config.found_domains_path),
        ("error_domains_path", &config.error_domains_path),
    ];
    if let Some(path) = &config.not_found_domains_path {
        paths.push(("not_found_domains_path", path));
    }

    for (name, path) in &paths {
        if path.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    // Two tables written to the same file would overwrite each other
    for (i, (name, path)) in paths.iter().enumerate() {
        if let Some((other, _)) = paths[i + 1..].iter().find(|(_, p)| p == path) {
            return Err(ConfigError::Validation(format!(
                "{} and {} point to the same file '{}'",
                name, other, path
            )));
        }
    }

    Ok(())
}
