//! External catalog integration.
//!
//! The resolver only needs one thing from a catalog: "what set lives at this
//! identifier?". [`SetCatalog`] is that seam; [`RebrickableClient`] is the
//! production implementation.

mod rebrickable;
mod types;

pub use rebrickable::{RebrickableClient, RebrickableConfig, NOT_FOUND_DETAIL};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to a catalog.
///
/// A missing set is not an error; it is reported as [`SetLookup::NotFound`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// A source of LEGO sets addressable by numeric identifier.
#[async_trait]
pub trait SetCatalog: Send + Sync {
    /// Look up the set stored under `id`.
    ///
    /// Returns `Ok(SetLookup::NotFound)` when the catalog has no such set;
    /// `Err` is reserved for transport and protocol failures.
    async fn lookup_set(&self, id: i32) -> Result<SetLookup, CatalogError>;

    /// Short name used in logs and metrics labels.
    fn name(&self) -> &'static str;
}
