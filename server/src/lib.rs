use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use kwsearch_core::{build_from_files, normalize, PostingsList, SearchIndex};
use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub kw1: String,
    #[serde(default)]
    pub kw2: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub kw1: String,
    pub kw2: String,
    pub took_s: f64,
    pub matched: bool,
    pub results: Vec<String>,
}

#[derive(Serialize)]
pub struct KeywordResponse<'a> {
    pub keyword: &'a str,
    pub postings: &'a PostingsList,
}

/// Index built once at startup; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<SearchIndex>,
}

pub fn build_app_from_files(docs: &FsPath, noise: &FsPath) -> Result<Router> {
    let index = build_from_files(docs, noise)?;
    Ok(build_app(index))
}

pub fn build_app(index: SearchIndex) -> Router {
    let app_state = AppState { index: Arc::new(index) };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/keyword/:keyword", get(keyword_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let kw1 = normalize(&params.kw1).unwrap_or_default();
    let kw2 = normalize(&params.kw2).unwrap_or_default();
    let found = state.index.top5_search(&kw1, &kw2);
    let elapsed = start.elapsed();
    tracing::debug!(%kw1, %kw2, matched = found.is_some(), "search");
    Json(SearchResponse {
        kw1,
        kw2,
        took_s: elapsed.as_secs_f64(),
        matched: found.is_some(),
        results: found.unwrap_or_default(),
    })
}

pub async fn keyword_handler(State(state): State<AppState>, Path(keyword): Path<String>) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let kw = normalize(&keyword).unwrap_or_default();
    match state.index.postings(&kw) {
        Some(postings) => {
            let body = serde_json::to_value(KeywordResponse { keyword: &kw, postings })
                .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
            Ok(Json(body))
        }
        None => Err((StatusCode::NOT_FOUND, format!("keyword {keyword:?} not indexed"))),
    }
}
