//! Portal page, client script, sidebar preference and index endpoints
//!
//! The page is rendered server-side from the same shell controller the
//! browser uses, built fresh per request from the files on disk.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::metrics::{record_page_view, record_spec_resolution, set_index_entries};
use crate::error::{AppError, AppResult, FetchError};
use crate::indexer::SpecMetadata;
use crate::shell::{
    render_page, ContentPane, DocsShell, InMemoryPreferences, LocalSite, PreferenceStore,
    SpecSource, SwaggerUiWidget, PORTAL_SCRIPT, SIDEBAR_WIDTH_KEY,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Navigation key to open; the home view when absent
    pub api: Option<String>,
    /// Viewport width of the page the navigation came from
    pub vw: Option<u32>,
    /// `open` when the mobile menu was open at navigation time
    pub menu: Option<String>,
}

/// A finished sidebar drag, as pointer positions
#[derive(Debug, Deserialize)]
pub struct ResizeRequest {
    pub from: i32,
    pub to: i32,
}

#[derive(Debug, Serialize)]
pub struct ResizeResponse {
    pub width: u32,
}

/// Cookie lifetime for the sidebar width: one year
const WIDTH_COOKIE_MAX_AGE: u32 = 31_536_000;

/// Sidebar preferences carried in the request's cookies
fn cookie_preferences(headers: &HeaderMap) -> InMemoryPreferences {
    let width = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SIDEBAR_WIDTH_KEY)
        .map(|(_, value)| value.to_string());

    match width {
        Some(width) => InMemoryPreferences::with_value(SIDEBAR_WIDTH_KEY, width),
        None => InMemoryPreferences::new(),
    }
}

/// Render the portal page, optionally with a spec opened
pub async fn portal_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Html<String> {
    let mut shell = DocsShell::load(
        LocalSite::from_config(&state.config),
        SwaggerUiWidget::default(),
        cookie_preferences(&headers),
    )
    .await;
    set_index_entries(shell.specs().len());

    if let Some(vw) = query.vw {
        shell.sidebar_mut().set_viewport_width(vw);
    }
    if query.menu.as_deref() == Some("open") {
        shell.sidebar_mut().toggle_menu();
    }

    if let Some(api) = query.api.as_deref() {
        debug!(api = %api, "Opening spec");
        shell.select(api).await;
    }

    // `select` always completes, so the pane is never left loading here
    let view = match shell.content() {
        ContentPane::Rendered { .. } => {
            record_spec_resolution("found");
            "spec"
        }
        ContentPane::Error { .. } => {
            record_spec_resolution("missing");
            "error"
        }
        _ => "home",
    };
    record_page_view(view);

    Html(render_page(&shell))
}

/// Serve the client script referenced by the page
pub async fn portal_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        PORTAL_SCRIPT,
    )
}

/// Apply a finished sidebar drag and persist the width in a cookie
///
/// The drag starts from the width in the request's cookie, so the client
/// must not update that cookie before posting.
pub async fn resize_sidebar(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<ResizeRequest>,
) -> impl IntoResponse {
    let mut shell = DocsShell::with_index(
        LocalSite::from_config(&state.config),
        SwaggerUiWidget::default(),
        cookie_preferences(&headers),
        Vec::new(),
    );

    shell.sidebar_mut().begin_drag(request.from);
    let width = shell.sidebar_mut().drag_to(request.to);
    shell.end_resize();
    debug!(from = request.from, to = request.to, width, "Sidebar resized");

    let stored = shell
        .preferences()
        .get(SIDEBAR_WIDTH_KEY)
        .unwrap_or_else(|| width.to_string());
    let cookie = format!(
        "{SIDEBAR_WIDTH_KEY}={stored}; Path=/; Max-Age={WIDTH_COOKIE_MAX_AGE}; SameSite=Lax"
    );

    ([(header::SET_COOKIE, cookie)], Json(ResizeResponse { width }))
}

/// Serve the generated index, read fresh from disk
pub async fn sidebar_data(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<SpecMetadata>>> {
    let specs = LocalSite::from_config(&state.config)
        .fetch_index()
        .await
        .map_err(|e| match e {
            FetchError::NotFound(location) => {
                AppError::NotFound(format!("Index not generated: {location}"))
            }
            other => AppError::Internal(other.into()),
        })?;

    set_index_entries(specs.len());
    Ok(Json(specs))
}
