//! Rebrickable API client.
//!
//! Rebrickable requires an API key, passed as the `key` query parameter.
//! Set lookups for a missing set come back as `{"detail": "Not found."}`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{LegoSet, SetLookup};
use super::{CatalogError, SetCatalog};

/// Value of the `detail` field Rebrickable sends when a set does not exist.
pub const NOT_FOUND_DETAIL: &str = "Not found.";

const DEFAULT_BASE_URL: &str = "https://rebrickable.com/api/v3";

/// Rebrickable API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebrickableConfig {
    /// Rebrickable API key (required).
    pub api_key: String,
    /// Base URL (default: https://rebrickable.com/api/v3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

impl Default for RebrickableConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Rebrickable API client.
pub struct RebrickableClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RebrickableClient {
    /// Create a new Rebrickable client.
    pub fn new(config: RebrickableConfig) -> Result<Self, CatalogError> {
        if config.api_key.is_empty() {
            return Err(CatalogError::NotConfigured(
                "Rebrickable API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let base_url = config
            .base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    /// URL of the first variant of set `id`.
    fn set_url(&self, id: i32) -> String {
        format!("{}/lego/sets/{}-1/", self.base_url, id)
    }

    /// Get the set stored under `id`.
    pub async fn get_set(&self, id: i32) -> Result<SetLookup, CatalogError> {
        let url = self.set_url(id);

        debug!("Rebrickable get set: id={}", id);

        let response = self
            .client
            .get(&url)
            .query(&[("key", &self.api_key)])
            .send()
            .await?;

        let status = response.status();
        if status == 429 {
            return Err(CatalogError::RateLimitExceeded);
        }

        let body = response.text().await?;
        parse_set_response(status.as_u16(), &body)
    }
}

#[async_trait]
impl SetCatalog for RebrickableClient {
    async fn lookup_set(&self, id: i32) -> Result<SetLookup, CatalogError> {
        self.get_set(id).await
    }

    fn name(&self) -> &'static str {
        "rebrickable"
    }
}

/// Translate a Rebrickable set response into a [`SetLookup`].
///
/// The HTTP status is not trusted on its own: the not-found sentinel is what
/// marks a missing set.
fn parse_set_response(status: u16, body: &str) -> Result<SetLookup, CatalogError> {
    let parsed: RebrickableResponse = serde_json::from_str(body).map_err(|e| {
        CatalogError::ParseError(format!(
            "Failed to parse set response (HTTP {}): {}",
            status, e
        ))
    })?;

    match parsed {
        RebrickableResponse::Set(set) => Ok(SetLookup::Found(set.into())),
        RebrickableResponse::Detail { detail } if detail == NOT_FOUND_DETAIL => {
            Ok(SetLookup::NotFound)
        }
        RebrickableResponse::Detail { detail } if status == 401 || status == 403 => Err(
            CatalogError::NotConfigured(format!("Rebrickable rejected the API key: {}", detail)),
        ),
        RebrickableResponse::Detail { detail } => Err(CatalogError::ApiError {
            status,
            message: detail,
        }),
    }
}

// ============================================================================
// Rebrickable API response types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RebrickableResponse {
    Set(RebrickableSet),
    Detail { detail: String },
}

#[derive(Debug, Deserialize)]
struct RebrickableSet {
    set_num: String,
    name: String,
    year: u32,
    #[serde(default)]
    theme_id: Option<u32>,
    num_parts: u32,
    #[serde(default)]
    set_img_url: Option<String>,
    #[serde(default)]
    set_url: Option<String>,
    #[serde(default)]
    last_modified_dt: Option<DateTime<Utc>>,
}

impl From<RebrickableSet> for LegoSet {
    fn from(r: RebrickableSet) -> Self {
        Self {
            set_num: r.set_num,
            name: r.name,
            year: r.year,
            num_parts: r.num_parts,
            set_img_url: r.set_img_url,
            theme_id: r.theme_id,
            set_url: r.set_url,
            last_modified_dt: r.last_modified_dt,
        }
    }
}
