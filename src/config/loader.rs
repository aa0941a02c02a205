use std::{fs, path::Path};
use crate::config::client::ClientConfig;
use crate::config::settings::{LogFormat, LoggingConfig};
use crate::config::validator;
use crate::error::{Result, SdkError};
use regex::Regex;
use tracing::{debug, error};

/// Load and validate config from YAML file
pub fn file_to_config(path: &Path) -> Result<ClientConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| SdkError::config(format!("cannot read '{}': {}", path.display(), e)))?;

    let expanded = expand_env_vars(&content);
    parse_config(&expanded)
}

pub fn parse_config(content: &str) -> Result<ClientConfig> {
    let mut client_config: ClientConfig = serde_yaml::from_str(content)
        .map_err(|e| {
            error!("parse config error: {}", e);
            SdkError::config(format!("invalid config format: {}", e))
        })?;

    // Apply defaults
    if client_config.logging.is_none() {
        client_config.logging = Some(LoggingConfig{level: "info".to_owned(), format: LogFormat::Compact});
    }
    debug!("validation config ...");
    validator::validate_client_config(&client_config)
        .map_err(|errors| SdkError::config(errors.join("; ")))?;

    Ok(client_config)
}

/// Replace `${VAR}` and `${VAR:default}` with the environment value or the default.
pub fn expand_env_vars(input: &str) -> String {
    let re = match Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}") {
        Ok(re) => re,
        Err(_) => return input.to_owned(),
    };
    re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}
