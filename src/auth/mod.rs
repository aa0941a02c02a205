//! Credentials providers and access token lifecycle.

pub mod basic;
pub mod oauth2;
pub mod provider;
pub mod token;
