use chrono::{DateTime, Duration, Utc};
use std::fmt;

use crate::helpers::time::{epoch, now};
use crate::utils::constants::{
    OAUTH_TOKEN_CACHE_TTL_SECS, TOKEN_EXPIRY_SKEW_SECS, USER_TOKEN_CACHE_TTL_SECS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenKind {
    /// bearer token minted from a username and password
    #[default]
    User,
    /// token minted by the client-credentials flow
    OAuth,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::User => "user",
            TokenKind::OAuth => "oauth",
        }
    }

    /// Minimum remaining lifetime for a cached token to be reused as-is.
    pub fn cache_ttl_secs(&self) -> i64 {
        match self {
            TokenKind::User => USER_TOKEN_CACHE_TTL_SECS,
            TokenKind::OAuth => OAUTH_TOKEN_CACHE_TTL_SECS,
        }
    }
}

/// A bearer token. Replaced wholesale on every refresh, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub kind: TokenKind,
    /// empty means unset
    pub token: String,
    pub expires: DateTime<Utc>,
    /// oauth only
    pub scope: Option<Vec<String>>,
}

impl Default for AccessToken {
    fn default() -> Self {
        Self {
            kind: TokenKind::default(),
            token: String::new(),
            expires: epoch(),
            scope: None,
        }
    }
}

impl AccessToken {
    pub fn new(kind: TokenKind, token: String, expires: DateTime<Utc>) -> Self {
        Self { kind, token, expires, scope: None }
    }

    pub fn with_scope(mut self, scope: Vec<String>) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn is_set(&self) -> bool {
        !self.token.is_empty()
    }

    /// True once the current time is within the grace skew of the expiry.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now())
    }

    pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        at >= self.expires - Duration::seconds(TOKEN_EXPIRY_SKEW_SECS)
    }

    /// Whole seconds until expiry, never negative.
    pub fn seconds_remaining(&self) -> i64 {
        self.seconds_remaining_at(now())
    }

    pub fn seconds_remaining_at(&self, at: DateTime<Utc>) -> i64 {
        (self.expires - at).num_seconds().max(0)
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_token_is_expired() {
        let token = AccessToken::default();
        assert!(!token.is_set());
        assert!(token.is_expired());
        assert_eq!(token.seconds_remaining(), 0);
    }

    #[test]
    fn past_expiry_reports_zero_remaining() {
        let token = AccessToken::new(TokenKind::User, "abc".into(), now() - Duration::seconds(1));
        assert!(token.is_expired());
        assert_eq!(token.seconds_remaining(), 0);
    }

    #[test]
    fn grace_skew_applies_before_expiry() {
        let at = now();
        let token = AccessToken::new(TokenKind::OAuth, "abc".into(), at + Duration::seconds(5));
        assert!(token.is_expired_at(at));
        assert_eq!(token.seconds_remaining_at(at), 5);

        let token = AccessToken::new(TokenKind::OAuth, "abc".into(), at + Duration::seconds(6));
        assert!(!token.is_expired_at(at));
    }

    #[test]
    fn display_is_raw_token() {
        let token = AccessToken::new(TokenKind::User, "raw-value".into(), now());
        assert_eq!(token.to_string(), "raw-value");
    }
}
