use std::collections::HashMap;
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use serde::Deserialize;
use tracing::debug;

use crate::auth::provider::{check_auth_response, FetchAccessToken};
use crate::auth::token::{AccessToken, TokenKind};
use crate::client::response::ApiResponse;
use crate::client::session::Session;
use crate::error::Result;
use crate::helpers::time::now;
use crate::utils::constants::{AUTH_TIMEOUT_SECS, OAUTH_TOKEN_PATH};

/// API client id and secret for the client-credentials flow.
#[derive(Clone)]
pub struct ApiClientCredentials {
    pub client_id: String,
    client_secret: String,
}

impl std::fmt::Debug for ApiClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClientCredentials").field("client_id", &self.client_id).finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
    expires_in: i64,
    #[serde(default)]
    scope: Option<String>,
}

impl ApiClientCredentials {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self { client_id, client_secret }
    }
}

impl FetchAccessToken for ApiClientCredentials {
    async fn request_access_token(&self, session: &Session, current: &AccessToken) -> Result<AccessToken> {
        debug!("Requesting new access token ({}s remaining)", current.seconds_remaining());
        let mut form = HashMap::new();
        form.insert("client_id", self.client_id.as_str());
        form.insert("client_secret", self.client_secret.as_str());
        form.insert("grant_type", "client_credentials");

        let response = session
            .http
            .post(session.url(OAUTH_TOKEN_PATH))
            .form(&form)
            .timeout(Duration::from_secs(AUTH_TIMEOUT_SECS))
            .send()
            .await?;

        let response = check_auth_response(TokenKind::OAuth, ApiResponse::read(response).await?).await?;
        let data: OAuthTokenResponse = response.json()?;
        let scope = data
            .scope
            .map(|s| s.split_whitespace().map(str::to_owned).collect())
            .unwrap_or_default();

        Ok(AccessToken::new(
            TokenKind::OAuth,
            data.access_token,
            now() + ChronoDuration::seconds(data.expires_in),
        )
        .with_scope(scope))
    }
}
