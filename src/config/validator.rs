//! Client configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Checks server address, session limits, retry delays, logging level and literal secrets

use tracing::{error, info};

use crate::config::client::{ClientConfig, CredentialsConfig, SecretValue};
use crate::config::settings::{LoggingConfig, RetryConfig, SessionConfig};

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_client_config(cfg: &ClientConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.server.trim().is_empty() {
        errors.push("config: 'server' must not be empty".to_string());
    }
    if cfg.server.contains("://") {
        errors.push(format!(
            "config: 'server' '{}' must be a hostname without scheme; set session.scheme instead",
            cfg.server
        ));
    }
    if cfg.port == 0 {
        errors.push("config: 'port' must be in range 1-65535".to_string());
    }

    validate_session(&cfg.session, &mut errors);
    validate_credentials(&cfg.credentials, &mut errors);
    if let Some(logging) = &cfg.logging {
        validate_logging(logging, &mut errors);
    }

    if errors.is_empty() {
        info!("config is valid");
        Ok(())
    } else {
        for e in &errors {
            error!("config validation: {}", e);
        }
        Err(errors)
    }
}

fn validate_session(session: &SessionConfig, errors: &mut Vec<String>) {
    if session.max_concurrency == 0 {
        errors.push("session.max_concurrency must be greater than 0".to_string());
    }
    if session.timeout == Some(0) {
        errors.push("session.timeout must be greater than 0 when set".to_string());
    }
    if session.user_agent.trim().is_empty() {
        errors.push("session.user_agent must not be empty".to_string());
    }
    if let Some(retry) = &session.retry {
        validate_retry("session.retry", retry, errors);
    }
}

fn validate_retry(prefix: &str, retry: &RetryConfig, errors: &mut Vec<String>) {
    if let (Some(base), Some(max)) = (retry.base_delay_ms, retry.max_delay_ms) {
        if max < base {
            errors.push(format!(
                "{}.max_delay_ms ({}) must be >= base_delay_ms ({})",
                prefix, max, base
            ));
        }
    }
}

fn validate_credentials(credentials: &CredentialsConfig, errors: &mut Vec<String>) {
    let fields: [(&str, &SecretValue); 2] = match credentials {
        CredentialsConfig::Basic { username, password } => {
            [("credentials.username", username), ("credentials.password", password)]
        }
        CredentialsConfig::ApiClient { client_id, client_secret } => {
            [("credentials.client_id", client_id), ("credentials.client_secret", client_secret)]
        }
    };
    for (name, secret) in fields {
        match secret {
            SecretValue::Literal { value } if value.is_empty() => {
                errors.push(format!("{} must not be empty", name));
            }
            SecretValue::FromEnv { from_env } if from_env.is_empty() => {
                errors.push(format!("{}.from_env must name a variable", name));
            }
            SecretValue::FromFile { path } if path.is_empty() => {
                errors.push(format!("{}.path must not be empty", name));
            }
            _ => {}
        }
    }
}

fn validate_logging(logging: &LoggingConfig, errors: &mut Vec<String>) {
    let valid = ["trace", "debug", "info", "warn", "error"];
    if !valid.contains(&logging.level.to_lowercase().as_str()) {
        errors.push(format!(
            "logging.level '{}' invalid; allowed: {:?}",
            logging.level, valid
        ));
    }
}
