pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;

use chrono::Duration;

use crate::auth::basic::BasicAuth;
use crate::auth::oauth2::ApiClientCredentials;
use crate::auth::provider::CredentialsProvider;
use crate::auth::token::{AccessToken, TokenKind};
use crate::client::api_client::ApiClient;
use crate::config::settings::{Scheme, SessionConfig};
use crate::helpers::time::now;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Plain-HTTP session settings for local test servers.
pub fn http_session() -> SessionConfig {
    SessionConfig { scheme: Scheme::Http, timeout: Some(5), ..SessionConfig::default() }
}

pub fn basic_provider() -> CredentialsProvider {
    CredentialsProvider::basic(BasicAuth::new("admin".into(), "secret".into()))
}

pub fn oauth_provider() -> CredentialsProvider {
    CredentialsProvider::api_client(ApiClientCredentials::new("client-id".into(), "client-secret".into()))
}

/// User token that stays valid well past its cache window.
pub fn fresh_user_token(value: &str) -> AccessToken {
    user_token(value, 600)
}

pub fn user_token(value: &str, remaining_secs: i64) -> AccessToken {
    AccessToken::new(TokenKind::User, value.into(), now() + Duration::seconds(remaining_secs))
}

/// Body of a user token or keep-alive response.
pub fn user_token_body(value: &str, expires_in_secs: i64) -> serde_json::Value {
    json!({ "token": value, "expires": (now() + Duration::seconds(expires_in_secs)).to_rfc3339() })
}

pub fn client_for(port: u16, credentials: CredentialsProvider, session: SessionConfig) -> ApiClient {
    ApiClient::new("127.0.0.1", port, credentials, session).expect("client")
}

/// Client with an already valid cached token, so no token endpoint is needed.
pub fn authorized_client(port: u16, session: SessionConfig) -> ApiClient {
    client_for(port, basic_provider().with_cached_token(fresh_user_token("cached-token")), session)
}
