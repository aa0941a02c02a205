use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::debug;

use crate::auth::provider::{check_auth_response, FetchAccessToken};
use crate::auth::token::{AccessToken, TokenKind};
use crate::client::response::ApiResponse;
use crate::client::session::Session;
use crate::error::Result;
use crate::utils::constants::{AUTH_TIMEOUT_SECS, KEEP_ALIVE_PATH, USER_TOKEN_PATH};

/// Username and password exchanged for a user bearer token.
#[derive(Clone)]
pub struct BasicAuth {
    pub username: String,
    password: String,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth").field("username", &self.username).finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct UserTokenResponse {
    token: String,
    expires: DateTime<Utc>,
}

impl From<UserTokenResponse> for AccessToken {
    fn from(value: UserTokenResponse) -> Self {
        AccessToken::new(TokenKind::User, value.token, value.expires)
    }
}

impl BasicAuth {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

impl FetchAccessToken for BasicAuth {
    async fn request_access_token(&self, session: &Session, current: &AccessToken) -> Result<AccessToken> {
        debug!("Requesting new access token ({}s remaining)", current.seconds_remaining());
        let response = session
            .http
            .post(session.url(USER_TOKEN_PATH))
            .basic_auth(&self.username, Some(&self.password))
            .timeout(Duration::from_secs(AUTH_TIMEOUT_SECS))
            .send()
            .await?;

        let response = check_auth_response(TokenKind::User, ApiResponse::read(response).await?).await?;
        Ok(response.json::<UserTokenResponse>()?.into())
    }
}

/// Renew a live user token without re-authenticating.
pub async fn keep_alive(session: &Session, current: &AccessToken) -> Result<AccessToken> {
    debug!("Refreshing access token with 'keep-alive'");
    let response = session
        .http
        .post(session.url(KEEP_ALIVE_PATH))
        .header(AUTHORIZATION, format!("Bearer {}", current.token))
        .timeout(Duration::from_secs(AUTH_TIMEOUT_SECS))
        .send()
        .await?;

    let response = check_auth_response(TokenKind::User, ApiResponse::read(response).await?).await?;
    Ok(response.json::<UserTokenResponse>()?.into())
}
