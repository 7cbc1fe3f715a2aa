//! HTTP server for typw - a tiny front desk for web font lookups (made by FontLab https://www.fontlab.com/)
//!
//! This module serves the search and resolve pipeline over a cozy little web
//! API. Think of it as the reception counter of a type foundry: you describe
//! the font you half-remember, and someone disappears into the back room and
//! returns with its full paperwork.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::task;

use typw_core::catalog::FamilyEntry;
use typw_core::error::FontError;
use typw_core::remote::RemoteSource;
use typw_core::session::FontSession;
use typw_core::stylesheet::ResolvedFontData;

/// A polite request for families that sound like something.
///
/// `query` is matched as a case-insensitive substring; `limit` trims the
/// reply to however many rows your UI has room for (default 15, like a
/// well-behaved dropdown).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub query: String,
    pub limit: Option<usize>,
}

/// The families that answered the search request, catalog order preserved.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub families: Vec<FamilyEntry>,
}

/// A commitment: resolve this name and bring back the full face records.
#[derive(Clone, Debug, Deserialize)]
pub struct ResolveRequest {
    pub family: String,
}

/// Opens the front desk and starts answering font questions.
pub async fn serve<S: RemoteSource + 'static>(
    bind: &str,
    session: Arc<FontSession<S>>,
) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding HTTP server to {bind}"))?;

    axum::serve(listener, router(session))
        .await
        .context("serving HTTP")?;
    Ok(())
}

/// Builds the routing table: a wellness check, a search window, and a
/// resolve window.
pub fn router<S: RemoteSource + 'static>(session: Arc<FontSession<S>>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", post(search_handler::<S>))
        .route("/resolve", post(resolve_handler::<S>))
        .with_state(session)
}

/// Runs a catalog search off the async thread and trims it to the caller's
/// display limit. The core is blocking by design, so the fetch rides on a
/// blocking task.
async fn search_handler<S: RemoteSource + 'static>(
    State(session): State<Arc<FontSession<S>>>,
    Json(req): Json<SearchRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if req.query.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "query must not be blank".to_string(),
        ));
    }

    if matches!(req.limit, Some(0)) {
        return Err((
            StatusCode::BAD_REQUEST,
            "limit must be at least 1 when provided".to_string(),
        ));
    }
    let limit = req.limit.unwrap_or(15);

    let query = req.query.clone();
    let mut families = task::spawn_blocking(move || session.search(&query))
        .await
        .map_err(join_error)?
        .map_err(to_http_error)?;

    families.truncate(limit);
    Ok(Json(SearchResponse { families }))
}

/// The synchronous apply-font path, served over HTTP: resolve the name,
/// fetch the stylesheet, hand back every face it admitted to.
async fn resolve_handler<S: RemoteSource + 'static>(
    State(session): State<Arc<FontSession<S>>>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<ResolvedFontData>, (StatusCode, String)> {
    if req.family.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "family must not be blank".to_string(),
        ));
    }

    let family = req.family.clone();
    let data = task::spawn_blocking(move || session.resolve_and_fetch(&family))
        .await
        .map_err(join_error)?
        .map_err(to_http_error)?;

    Ok(Json(data))
}

/// Maps core errors onto status codes: a missing family is the caller's
/// problem (404), an unreachable upstream is ours to admit (502).
fn to_http_error(err: FontError) -> (StatusCode, String) {
    let status = match &err {
        FontError::NotFound { .. } => StatusCode::NOT_FOUND,
        FontError::Transport { .. } | FontError::Metadata(_) | FontError::ClientSetup(_) => {
            StatusCode::BAD_GATEWAY
        }
    };
    (status, err.to_string())
}

fn join_error(err: task::JoinError) -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("task join error: {err}"),
    )
}
