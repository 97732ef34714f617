use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use cartscan_core::{MergedProduct, RawProduct};
use cartscan_scraper::merge;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SearchRequest {
    #[serde(default)]
    query: String,
    /// `false` bypasses the merge engine and returns raw per-platform
    /// records. Merged is the default response mode.
    #[serde(default = "default_merge")]
    merge: bool,
}

fn default_merge() -> bool {
    true
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(super) enum SearchResponse {
    Merged(Vec<MergedProduct>),
    Raw(Vec<RawProduct>),
}

pub(super) async fn search_products(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::bad_request("no query provided"));
    }

    tracing::info!(query, merged = request.merge, "search request");

    let raw_products = state.orchestrator.run(query).await.map_err(|e| {
        tracing::error!(error = %e, "scrape pipeline failed");
        ApiError::internal(e.to_string())
    })?;

    let response = if request.merge {
        SearchResponse::Merged(merge(raw_products))
    } else {
        SearchResponse::Raw(raw_products)
    };
    Ok(Json(response))
}
