//! # Device Cloud SDK
//!
//! Client library for a device-management cloud service, covering both the
//! JSON Pro API and the legacy Classic API.
//!
//! Modules:
//! - `auth`: credentials providers and the cached access token
//! - `client`: HTTP session, responses and the `ApiClient` request wrappers
//! - `dispatch`: bounded concurrent fan-out with ordered results
//! - `pro_api`: filter/sort expressions, pagination and endpoint wrappers
//! - `classic_api`: Classic API endpoint wrappers
//! - `config`: YAML client configuration, loading and validation
//! - `models`: typed response models

pub mod auth;
pub mod classic_api;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod helpers;
pub mod models;
pub mod observability;
pub mod pro_api;
pub mod resilience;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::auth::provider::CredentialsProvider;
pub use crate::auth::token::{AccessToken, TokenKind};
pub use crate::client::api_client::ApiClient;
pub use crate::config::client::ClientConfig;
pub use crate::error::{Result, SdkError};
