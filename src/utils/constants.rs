//! Shared constants and invariants

/// Timeout applied to every auth-related request.
pub const AUTH_TIMEOUT_SECS: u64 = 15;

/// Tokens within this many seconds of expiry are treated as expired.
pub const TOKEN_EXPIRY_SKEW_SECS: i64 = 5;

/// Keep-alive is only attempted above this many remaining seconds.
pub const KEEP_ALIVE_FLOOR_SECS: i64 = 5;

// Cached token reuse thresholds per token kind
pub const USER_TOKEN_CACHE_TTL_SECS: i64 = 60;
pub const OAUTH_TOKEN_CACHE_TTL_SECS: i64 = 3;

pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_MAX_CONCURRENCY: usize = 5;
pub const DEFAULT_PAGE_SIZE: u32 = 100;
/// Upper bound on pages requested after the probe page of one listing.
pub const MAX_LISTING_PAGES: u64 = 100_000;

// Service paths
pub const CLASSIC_API_PREFIX: &str = "JSSResource";
pub const PRO_API_PREFIX: &str = "api";
pub const USER_TOKEN_PATH: &str = "/api/v1/auth/token";
pub const KEEP_ALIVE_PATH: &str = "/api/v1/auth/keep-alive";
pub const OAUTH_TOKEN_PATH: &str = "/api/oauth/token";
