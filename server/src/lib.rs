use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sonnet_core::highlight::mark_line;
use sonnet_core::persist::into_documents;
use sonnet_core::{count_matching, DocId, Document, SearchMode, Searcher, Sonnet, Span};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    /// `and` or `or`; the server default when absent
    #[serde(default)]
    pub mode: Option<String>,
    /// wrap matching words in `<em>` and return the lines
    #[serde(default)]
    pub highlight: bool,
    #[serde(default = "default_matched_only")]
    pub matched_only: bool,
}
fn default_matched_only() -> bool { true }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub mode: String,
    pub took_s: f64,
    pub total_docs: usize,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub title: String,
    pub matches: u32,
    /// positions of the query terms, present for matched sonnets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spans: Option<Vec<Span>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<String>>,
}

/// The searcher is immutable after build, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub searcher: Arc<Searcher>,
    pub default_mode: SearchMode,
}

pub fn build_app(sonnets: Vec<Sonnet>, default_mode: SearchMode) -> Result<Router> {
    let searcher = Searcher::new(into_documents(sonnets))?;
    tracing::info!(docs = searcher.len(), terms = searcher.index().num_terms(), "index built");
    let app_state = AppState { searcher: Arc::new(searcher), default_mode };

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

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/sonnet/:doc_id", get(doc_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let mode = match params.mode.as_deref() {
        Some(m) => m.parse::<SearchMode>().map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
        None => state.default_mode,
    };

    let start = std::time::Instant::now();
    let results = state.searcher.search(&params.q, mode);
    let total_hits = count_matching(&results);
    let hits: Vec<SearchHit> = results
        .iter()
        .filter(|r| r.is_match() || !params.matched_only)
        .map(|r| {
            let spans = state.searcher.spans(r);
            let lines = params.highlight.then(|| {
                r.document
                    .lines
                    .iter()
                    .enumerate()
                    .map(|(n, line)| mark_line(line, n as u32, &spans, "<em>", "</em>"))
                    .collect::<Vec<String>>()
            });
            SearchHit {
                doc_id: r.doc_id(),
                title: r.document.title.clone(),
                matches: r.matches,
                spans: r.is_match().then_some(spans),
                lines,
            }
        })
        .collect();

    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, %mode, total_hits, "search served");
    Ok(Json(SearchResponse {
        query: params.q,
        mode: mode.to_string(),
        took_s: elapsed.as_secs_f64(),
        total_docs: results.len(),
        total_hits,
        results: hits,
    }))
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<DocId>,
) -> Result<Json<Document>, (StatusCode, String)> {
    state
        .searcher
        .document(doc_id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, format!("no sonnet {doc_id}")))
}
