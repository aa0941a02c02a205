//! Typed response models.
//!
//! Models keep a handful of commonly used fields and collect everything else
//! into a flattened `extra` map, so unknown or newer fields never fail a parse.

pub mod classic;
pub mod pro;

use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;

use crate::client::response::ApiResponse;
use crate::error::Result;

/// A type that can be built from a JSON document returned by the service.
pub trait ApiModel: DeserializeOwned + Send + 'static {
    /// Key the record is wrapped in, e.g. `{"category": {...}}` on the Classic API.
    const ROOT_KEY: Option<&'static str> = None;

    fn parse(value: Value) -> Result<Self> {
        let value = match (Self::ROOT_KEY, value) {
            (Some(key), Value::Object(mut map)) => map.remove(key).ok_or_else(|| {
                serde_json::Error::custom(format!("missing root key '{}'", key))
            })?,
            (_, value) => value,
        };
        Ok(serde_json::from_value(value)?)
    }

    fn from_response(response: &ApiResponse) -> Result<Self> {
        Self::parse(response.json()?)
    }
}

/// Untyped passthrough.
impl ApiModel for Value {}
