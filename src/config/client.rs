use serde::Deserialize;
use std::{env, fs};

use crate::auth::basic::BasicAuth;
use crate::auth::oauth2::ApiClientCredentials;
use crate::auth::provider::CredentialsProvider;
use crate::client::api_client::ApiClient;
use crate::config::settings::{LoggingConfig, SessionConfig};
use crate::error::{Result, SdkError};
use crate::utils::constants::DEFAULT_PORT;


/// ================================
/// Full client configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// hostname of the server, no scheme
    pub server: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub session: SessionConfig,
    pub logging: Option<LoggingConfig>,
}

/// ================================
/// Credentials
/// ================================
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialsConfig {
    Basic {
        username: SecretValue,
        password: SecretValue,
    },
    ApiClient {
        client_id: SecretValue,
        client_secret: SecretValue,
    },
}

/// Where a credential value comes from
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum SecretValue {
    Literal {
        value: String,
    },
    FromEnv {
        from_env: String,
    },
    FromFile {
        path: String,
    },
}

impl SecretValue {
    pub fn resolve(&self) -> Result<String> {
        match self {
            SecretValue::Literal { value } => Ok(value.to_owned()),
            SecretValue::FromEnv { from_env } => env::var(from_env)
                .map_err(|err| SdkError::credentials(format!("env '{}': {}", from_env, err))),
            SecretValue::FromFile { path } => fs::read_to_string(path)
                .map(|res| res.trim().to_string())
                .map_err(|err| SdkError::credentials(format!("file '{}': {}", path, err))),
        }
    }
}

impl CredentialsConfig {
    pub fn into_provider(&self) -> Result<CredentialsProvider> {
        let provider = match self {
            CredentialsConfig::Basic { username, password } => {
                CredentialsProvider::basic(BasicAuth::new(username.resolve()?, password.resolve()?))
            }
            CredentialsConfig::ApiClient { client_id, client_secret } => CredentialsProvider::api_client(
                ApiClientCredentials::new(client_id.resolve()?, client_secret.resolve()?),
            ),
        };
        Ok(provider)
    }
}

impl ClientConfig {
    /// Resolve credentials and build a ready client.
    pub fn build_client(&self) -> Result<ApiClient> {
        let provider = self.credentials.into_provider()?;
        ApiClient::new(&self.server, self.port, provider, self.session.clone())
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
