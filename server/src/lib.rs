use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, post}, Json, Router};
use indexer::load_corpus;
use regex::{Regex, RegexBuilder};
use search_core::config::{DEFAULT_TOP_K, MAX_TOP_K};
use search_core::tokenizer::tokenize;
use search_core::{BuildOptions, CorpusSnapshot, DocId, Parallelism, SnapshotHandle};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Corpus file or directory read at startup and on reload
    pub corpus_path: PathBuf,
    pub admin_token: Option<String>,
    /// Comma-separated allowed origins; any origin when unset
    pub cors_allow_origin: Option<String>,
    pub parallelism: Parallelism,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { DEFAULT_TOP_K }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub source_id: Option<u64>,
    pub score: f64,
    pub category: Option<String>,
    pub snippet: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub corpus_path: PathBuf,
    pub snapshot: Arc<SnapshotHandle>,
    pub options: BuildOptions,
    pub admin_token: Option<String>,
    /// Held for a whole reload so rebuilds publish in request order
    pub reload_lock: Arc<Mutex<()>>,
}

pub fn build_app(config: ServerConfig) -> Result<Router> {
    // Build the first snapshot at startup
    let options = BuildOptions::with_parallelism(config.parallelism);
    let docs = load_corpus(&config.corpus_path)?;
    let snapshot = CorpusSnapshot::build_with(docs, &options)?;
    let app_state = AppState {
        corpus_path: config.corpus_path,
        snapshot: Arc::new(SnapshotHandle::new(snapshot)),
        options,
        admin_token: config.admin_token,
        reload_lock: Arc::new(Mutex::new(())),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/index/reload", post(index_reload))
        .with_state(app_state)
        .layer(cors_layer(config.cors_allow_origin.as_deref()))
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

fn cors_layer(allow_origin: Option<&str>) -> CorsLayer {
    let origins: Vec<_> = allow_origin
        .unwrap_or("")
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    // Hold one snapshot for the whole request so a concurrent reload cannot mix corpora
    let snapshot = state.snapshot.current();
    let scored = snapshot.search(&params.q);
    let total_hits = scored.len();
    let k = params.k.clamp(1, MAX_TOP_K);

    let highlight = terms_regex(&tokenize(&params.q));
    let results = scored
        .into_iter()
        .take(k)
        .filter_map(|score| {
            let doc = snapshot.document(score.doc_id)?;
            Some(SearchHit {
                doc_id: score.doc_id,
                source_id: doc.source_id,
                score: score.value,
                category: doc.category.clone(),
                snippet: highlight.as_ref().and_then(|re| snippet(&doc.text, re)),
            })
        })
        .collect();

    Json(SearchResponse { query: params.q, took_s: start.elapsed().as_secs_f64(), total_hits, results })
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<DocId>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let snapshot = state.snapshot.current();
    match snapshot.document(doc_id) {
        Some(doc) => Ok(Json(serde_json::json!({
            "doc_id": doc.id,
            "source_id": doc.source_id,
            "category": doc.category,
            "text": doc.text,
        }))),
        None => Err((StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "not found" })))),
    }
}

/// Case-insensitive alternation of the query terms, longest first.
fn terms_regex(terms: &[String]) -> Option<Regex> {
    let mut terms: Vec<&str> = terms.iter().map(String::as_str).filter(|t| !t.is_empty()).collect();
    if terms.is_empty() {
        return None;
    }
    terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    terms.dedup();
    let pattern = terms.iter().map(|t| regex::escape(t)).collect::<Vec<_>>().join("|");
    RegexBuilder::new(&pattern).case_insensitive(true).build().ok()
}

fn snippet(text: &str, terms: &Regex) -> Option<String> {
    if text.is_empty() { return None; }
    let (start, end) = match terms.find(text) {
        Some(m) => (floor_char_boundary(text, m.start().saturating_sub(100)), floor_char_boundary(text, (m.start() + 200).min(text.len()))),
        None => (0, floor_char_boundary(text, 200.min(text.len()))),
    };
    let window = &text[start..end];
    Some(terms.replace_all(window, "<em>$0</em>").into_owned())
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

// --- Admin endpoints ---
async fn index_reload(State(state): State<AppState>, headers: axum::http::HeaderMap) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let _reload = state.reload_lock.lock().await;
    let handle = Arc::clone(&state.snapshot);
    let path = state.corpus_path.clone();
    let options = state.options;
    // Loading and indexing run off the async workers; the swap happens only once the build is complete
    let rebuilt = tokio::task::spawn_blocking(move || -> Result<usize> {
        let docs = load_corpus(&path)?;
        Ok(handle.rebuild(docs, &options)?.len())
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    match rebuilt {
        Ok(num_docs) => Ok(Json(serde_json::json!({ "documents": num_docs }))),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "reload failed, keeping current snapshot");
            Err((StatusCode::UNPROCESSABLE_ENTITY, format!("{e:#}")))
        }
    }
}

fn authorize(state: &AppState, headers: &axum::http::HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_highlights_terms() {
        let re = terms_regex(&["shuttle".to_string(), "orbit".to_string()]).unwrap();
        let s = snippet("The Shuttle reached orbit.", &re).unwrap();
        assert_eq!(s, "The <em>Shuttle</em> reached <em>orbit</em>.");
    }

    #[test]
    fn snippet_window_respects_char_boundaries() {
        let text = format!("{}needle{}", "é".repeat(80), "ü".repeat(150));
        let re = terms_regex(&["needle".to_string()]).unwrap();
        let s = snippet(&text, &re).unwrap();
        assert!(s.contains("<em>needle</em>"));
    }

    #[test]
    fn no_terms_no_regex() {
        assert!(terms_regex(&[]).is_none());
        assert!(terms_regex(&[String::new()]).is_none());
    }
}
