//! Credentials providers and the cached access token they manage.
//!
//! A provider owns exactly one [`AccessToken`] behind an async mutex. Every
//! lookup takes the lock, decides between reuse, keep-alive and a fresh token
//! request, swaps the cached value and releases the lock. Concurrent callers
//! queue on the lock, so a burst of lookups against an expired token produces
//! a single network request and everyone receives its result.

use std::future::Future;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::auth::basic::{keep_alive, BasicAuth};
use crate::auth::oauth2::ApiClientCredentials;
use crate::auth::token::{AccessToken, TokenKind};
use crate::client::response::ApiResponse;
use crate::client::session::Session;
use crate::error::{Result, SdkError};
use crate::helpers::time::now;
use crate::observability::metrics::get_metrics;
use crate::utils::constants::KEEP_ALIVE_FLOOR_SECS;

pub trait FetchAccessToken {
    /// Mint a brand-new token. `current` is only used for diagnostics.
    fn request_access_token(
        &self,
        session: &Session,
        current: &AccessToken,
    ) -> impl Future<Output = Result<AccessToken>> + Send;
}

#[derive(Debug, Clone)]
pub enum CredentialsKind {
    Basic(BasicAuth),
    ApiClient(ApiClientCredentials),
}

impl CredentialsKind {
    pub fn token_kind(&self) -> TokenKind {
        match self {
            CredentialsKind::Basic(_) => TokenKind::User,
            CredentialsKind::ApiClient(_) => TokenKind::OAuth,
        }
    }
}

impl FetchAccessToken for CredentialsKind {
    async fn request_access_token(&self, session: &Session, current: &AccessToken) -> Result<AccessToken> {
        match self {
            CredentialsKind::Basic(s) => s.request_access_token(session, current).await,
            CredentialsKind::ApiClient(s) => s.request_access_token(session, current).await,
        }
    }
}

/// What a lookup does with the cached token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshAction {
    Cached,
    KeepAlive,
    Request,
}

impl RefreshAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshAction::Cached => "cached",
            RefreshAction::KeepAlive => "keep_alive",
            RefreshAction::Request => "request",
        }
    }
}

/// Decide how to serve a lookup for `token` at time `at`.
pub fn refresh_action(token: &AccessToken, at: DateTime<Utc>) -> RefreshAction {
    let ttl = token.kind.cache_ttl_secs();
    let remaining = token.seconds_remaining_at(at);
    let live = token.is_set() && !token.is_expired_at(at);

    if live && remaining >= ttl {
        RefreshAction::Cached
    } else if live && token.kind == TokenKind::User && KEEP_ALIVE_FLOOR_SECS < remaining && remaining < ttl {
        RefreshAction::KeepAlive
    } else {
        RefreshAction::Request
    }
}

#[derive(Debug)]
pub struct CredentialsProvider {
    kind: CredentialsKind,
    session: OnceLock<Session>,
    access_token: Mutex<AccessToken>,
}

impl CredentialsProvider {
    pub fn new(kind: CredentialsKind) -> Self {
        Self {
            kind,
            session: OnceLock::new(),
            access_token: Mutex::new(AccessToken::default()),
        }
    }

    pub fn basic(credentials: BasicAuth) -> Self {
        Self::new(CredentialsKind::Basic(credentials))
    }

    pub fn api_client(credentials: ApiClientCredentials) -> Self {
        Self::new(CredentialsKind::ApiClient(credentials))
    }

    /// Start from a previously obtained token instead of an empty one.
    pub fn with_cached_token(self, token: AccessToken) -> Self {
        Self { access_token: Mutex::new(token), ..self }
    }

    pub fn kind(&self) -> &CredentialsKind {
        &self.kind
    }

    /// Bind the provider to the session it requests tokens through. Only the first call wins.
    pub fn attach_session(&self, session: Session) {
        if self.session.set(session).is_err() {
            warn!("credentials provider already attached to a session; ignoring");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.session.get().is_some()
    }

    /// Current access token, refreshed if needed. Safe for concurrent callers.
    pub async fn get_access_token(&self) -> Result<AccessToken> {
        let mut cached = self.access_token.lock().await;
        self.refresh_locked(&mut cached).await?;
        Ok(cached.clone())
    }

    /// Same as [`get_access_token`](Self::get_access_token) but also holds `outer` for the
    /// whole lookup, serializing it with whatever else the caller guards with that lock.
    pub async fn get_access_token_with(&self, outer: &Mutex<()>) -> Result<AccessToken> {
        let _outer = outer.lock().await;
        self.get_access_token().await
    }

    /// Raw bearer token string.
    pub async fn get_token(&self) -> Result<String> {
        Ok(self.get_access_token().await?.token)
    }

    async fn refresh_locked(&self, cached: &mut AccessToken) -> Result<()> {
        let session = self
            .session
            .get()
            .ok_or_else(|| SdkError::credentials("a client is not attached to this credentials provider"))?;

        let action = refresh_action(cached, now());
        let metrics = get_metrics().await;
        metrics
            .token_requests
            .with_label_values(&[self.kind.token_kind().as_str(), action.as_str()])
            .inc();

        let refreshed = match action {
            RefreshAction::Cached => {
                debug!("Using cached access token ({}s remaining)", cached.seconds_remaining());
                return Ok(());
            }
            RefreshAction::KeepAlive => keep_alive(session, cached).await?,
            RefreshAction::Request => self.kind.request_access_token(session, cached).await?,
        };
        *cached = refreshed;
        Ok(())
    }
}

/// Fail non-2xx token responses, logging the status and (at debug) the body.
pub(crate) async fn check_auth_response(kind: TokenKind, response: ApiResponse) -> Result<ApiResponse> {
    if response.is_success() {
        return Ok(response);
    }
    error!(status = %response.status, url = %response.url, "access token request failed");
    debug!("{}", response.text());
    get_metrics().await.token_request_failures.with_label_values(&[kind.as_str()]).inc();
    response.error_for_status()
}
