//! Set lookup handlers.
//!
//! These are the callers of the resolver: `lookup` applies the default-set
//! substitution and produces the headline shown to the user.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use brickfind_core::{LegoSet, Resolution, ResolverError, SetLookup};

use super::handlers::ErrorResponse;
use crate::state::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    #[serde(flatten)]
    pub resolution: Resolution,
    pub headline: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

fn resolver_error(e: ResolverError) -> ApiError {
    let status = match &e {
        ResolverError::Catalog { .. } => StatusCode::BAD_GATEWAY,
        ResolverError::DefaultUnavailable(_) | ResolverError::NotPrimed => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    error_response(status, e.to_string())
}

/// GET /api/v1/sets/lookup?query=<name>
///
/// Resolve a name to a set, falling back to the default set.
pub async fn lookup(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupParams>,
) -> Result<Json<LookupResponse>, ApiError> {
    let resolution = state
        .resolver()
        .resolve_or_default(&params.query)
        .await
        .map_err(resolver_error)?;

    let headline = resolution.headline();
    Ok(Json(LookupResponse {
        resolution,
        headline,
    }))
}

/// GET /api/v1/sets/{id}
///
/// Resolve an identifier directly, narrowing when needed. No default
/// substitution.
pub async fn get_set(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<LegoSet>, ApiError> {
    match state.resolver().resolve_key(id).await {
        Ok(SetLookup::Found(set)) => Ok(Json(set)),
        Ok(SetLookup::NotFound) => Err(error_response(
            StatusCode::NOT_FOUND,
            format!("No set reachable from {}", id),
        )),
        Err(e) => Err(resolver_error(e)),
    }
}

/// GET /api/v1/sets/default
pub async fn get_default_set(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LegoSet>, ApiError> {
    state
        .resolver()
        .default_set()
        .await
        .map(Json)
        .ok_or_else(|| resolver_error(ResolverError::NotPrimed))
}
