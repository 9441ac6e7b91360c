use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use wordindex_core::source::{load_corpus, SourceOptions};
use wordindex_core::tokenizer::parse_query_terms;
use wordindex_core::{rank, DocumentMatch, IndexStats, InvertedIndex};

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
    /// Pattern search only: treat `q` as a `*`/`?` wildcard instead of a regex.
    #[serde(default)]
    pub wildcard: bool,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub document: String,
    pub score: u64,
    pub lines: Vec<LineHit>,
}

#[derive(Serialize)]
pub struct LineHit {
    pub line: u32,
    pub occurrences: u32,
}

#[derive(Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: IndexStats,
    pub built_at: String,
}

/// An index together with the time it was built. Replaced whole on rebuild, never mutated.
pub struct Snapshot {
    pub index: InvertedIndex,
    pub built_at: String,
}

#[derive(Clone)]
pub struct AppState {
    pub dir: PathBuf,
    pub options: SourceOptions,
    pub current: Arc<RwLock<Arc<Snapshot>>>,
    pub admin_token: Option<String>,
}

impl AppState {
    /// Load and index `dir`; no query can be served before this returns.
    pub fn load(dir: PathBuf, options: SourceOptions, admin_token: Option<String>) -> Result<Self> {
        let snapshot = load_snapshot(&dir, &options)?;
        Ok(Self { dir, options, current: Arc::new(RwLock::new(Arc::new(snapshot))), admin_token })
    }

    /// The index queries should run against. Holding the returned `Arc` keeps it alive across
    /// a rebuild.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }
}

pub fn build_app(dir: PathBuf, options: SourceOptions) -> Result<Router> {
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let app_state = AppState::load(dir, options, admin_token)?;
    Ok(router(app_state))
}

pub fn router(app_state: AppState) -> Router {
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
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/stats", get(stats_handler))
        .route("/search/exact", get(exact_handler))
        .route("/search/all", get(all_handler))
        .route("/search/pattern", get(pattern_handler))
        .route("/index/rebuild", post(rebuild_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn load_snapshot(dir: &Path, options: &SourceOptions) -> Result<Snapshot> {
    let corpus = load_corpus(dir, options)
        .with_context(|| format!("loading documents from {}", dir.display()))?;
    let index = InvertedIndex::build(corpus);
    tracing::info!(documents = index.num_documents(), terms = index.num_terms(), "index built");
    let built_at = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "".into());
    Ok(Snapshot { index, built_at })
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let snapshot = state.snapshot();
    Json(StatsResponse {
        stats: IndexStats::from_index(&snapshot.index),
        built_at: snapshot.built_at.clone(),
    })
}

pub async fn exact_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = Instant::now();
    let snapshot = state.snapshot();
    match snapshot.index.lookup_exact(&params.q) {
        Some(matches) => Ok(Json(respond(params, start, matches))),
        None => Err((StatusCode::NOT_FOUND, format!("term {:?} is not indexed", params.q))),
    }
}

pub async fn all_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let start = Instant::now();
    let terms = parse_query_terms(&params.q);
    let matches = state.snapshot().index.lookup_all(&terms);
    Json(respond(params, start, matches))
}

pub async fn pattern_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = Instant::now();
    let snapshot = state.snapshot();
    let found = if params.wildcard {
        snapshot.index.lookup_wildcard(&params.q)
    } else {
        snapshot.index.lookup_pattern(&params.q)
    };
    match found {
        Ok(matches) => Ok(Json(respond(params, start, matches))),
        Err(e) => Err((StatusCode::BAD_REQUEST, e.to_string())),
    }
}

fn respond(
    params: SearchParams,
    start: Instant,
    mut matches: Vec<DocumentMatch>,
) -> SearchResponse {
    rank(&mut matches);
    let total_hits = matches.len();
    let k = params.k.max(1).min(100);
    let results = matches
        .into_iter()
        .take(k)
        .map(|m| SearchHit {
            score: m.score(),
            lines: m
                .lines
                .iter()
                .map(|(line, occurrences)| LineHit { line, occurrences })
                .collect(),
            document: m.document,
        })
        .collect();
    SearchResponse { query: params.q, took_s: start.elapsed().as_secs_f64(), total_hits, results }
}

/// Reload the directory and swap in a freshly built index. Queries already running keep their
/// snapshot.
async fn rebuild_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let (dir, options) = (state.dir.clone(), state.options.clone());
    let snapshot = tokio::task::spawn_blocking(move || load_snapshot(&dir, &options))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")))?;
    let body = serde_json::json!({
        "documents": snapshot.index.num_documents(),
        "terms": snapshot.index.num_terms(),
        "built_at": snapshot.built_at,
    });
    *state.current.write() = Arc::new(snapshot);
    Ok(Json(body))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
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
