//! HTTP route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use page_core::markup::escape;
use page_core::{
    registry, ComponentInstance, PageDocument, PageSummary, RenderMode, RenderOptions,
    RenderedPage,
};
use serde::{Deserialize, Serialize};

use crate::validation::{validate_components, validate_page_id, validate_slug};
use crate::{metrics, ApiError, AppState};

/// Body of `PUT /api/pages/{page_id}`.
///
/// Saves are replace-all: `components` becomes the page's full list.
/// Metadata fields left out keep their stored values.
#[derive(Debug, Deserialize)]
pub struct SavePageRequest {
    /// Full ordered component list.
    pub components: Vec<ComponentInstance>,
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New public slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// New publish state.
    #[serde(default)]
    pub published: Option<bool>,
}

/// Query for the render endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct RenderQuery {
    /// `display` (default) or `author`.
    #[serde(default)]
    pub mode: Option<String>,
}

/// One picker group in `GET /api/components`.
#[derive(Debug, Serialize)]
pub struct CategoryGroup {
    /// Category key.
    pub category: page_core::Category,
    /// Human readable label.
    pub label: &'static str,
    /// Definitions in this group.
    pub components: Vec<page_core::registry::DefinitionSummary>,
}

/// Settings the browser editor needs at startup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Trust policy applied to rendered output.
    pub trust: page_core::TrustPolicy,
    /// Undo history length.
    pub history_limit: usize,
    /// Server version.
    pub version: &'static str,
}

/// `GET /api/components` - the component catalog grouped by category.
#[tracing::instrument(name = "list_components")]
pub async fn list_components() -> Json<Vec<CategoryGroup>> {
    let groups = registry()
        .by_category()
        .into_iter()
        .map(|(category, defs)| CategoryGroup {
            category,
            label: category.label(),
            components: defs.iter().map(|d| d.summary()).collect(),
        })
        .collect();
    Json(groups)
}

/// `GET /api/editor-config`.
#[tracing::instrument(name = "editor_config", skip(state))]
pub async fn editor_config(State(state): State<AppState>) -> Json<EditorConfig> {
    Json(EditorConfig {
        trust: state.config.trust,
        history_limit: state.config.history_limit,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /api/pages` - page summaries sorted by id.
#[tracing::instrument(name = "list_pages", skip(state))]
pub async fn list_pages(State(state): State<AppState>) -> Json<Vec<PageSummary>> {
    Json(state.store.list())
}

/// `GET /api/pages/{page_id}`.
#[tracing::instrument(name = "get_page", skip(state))]
pub async fn get_page(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
) -> Result<Json<PageDocument>, ApiError> {
    validate_page_id(&page_id)?;
    state
        .store
        .get(&page_id)
        .map(Json)
        .ok_or(ApiError::NotFound(page_id))
}

/// `PUT /api/pages/{page_id}` - replace a page's components and
/// optionally its metadata. Creates the page if it does not exist.
#[tracing::instrument(
    name = "put_page",
    skip(state, request),
    fields(components = request.components.len())
)]
pub async fn put_page(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
    Json(request): Json<SavePageRequest>,
) -> Result<Json<PageDocument>, ApiError> {
    let result = save_page(&state, page_id, request);
    metrics::record_page_save(if result.is_ok() { "success" } else { "failure" });
    let doc = result?;
    metrics::set_pages_stored(state.store.len());
    Ok(Json(doc))
}

fn save_page(
    state: &AppState,
    page_id: String,
    request: SavePageRequest,
) -> Result<PageDocument, ApiError> {
    validate_page_id(&page_id)?;
    validate_components(&request.components)?;
    if let Some(slug) = request.slug.as_deref() {
        validate_slug(slug)?;
        if let Some(owner) = state.store.get_by_slug(slug) {
            if owner.id != page_id {
                return Err(ApiError::Conflict(format!(
                    "slug '{slug}' is used by page '{}'",
                    owner.id
                )));
            }
        }
    }

    let mut doc = state
        .store
        .get(&page_id)
        .unwrap_or_else(|| PageDocument::new(page_id.clone(), page_id.clone()));
    if let Some(title) = request.title {
        doc.title = title;
    }
    if let Some(slug) = request.slug {
        doc.slug = slug;
    }
    if let Some(published) = request.published {
        doc.published = published;
    }

    // Body order is authoritative; renumber before upsert sorts by `order`.
    let mut components = request.components;
    page_core::component::renumber(&mut components);
    doc.components = components;

    state.store.upsert(doc).map_err(ApiError::from)
}

/// `DELETE /api/pages/{page_id}`.
#[tracing::instrument(name = "delete_page", skip(state))]
pub async fn delete_page(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    validate_page_id(&page_id)?;
    state.store.delete(&page_id)?;
    metrics::set_pages_stored(state.store.len());
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/pages/{page_id}/render?mode=display|author` - HTML fragment.
#[tracing::instrument(name = "render_page", skip(state))]
pub async fn render_page(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
    Query(query): Query<RenderQuery>,
) -> Result<Html<String>, ApiError> {
    validate_page_id(&page_id)?;
    let mode = match query.mode.as_deref() {
        None => RenderMode::Display,
        Some(raw) => raw.parse::<RenderMode>().map_err(ApiError::BadRequest)?,
    };
    let doc = state
        .store
        .get(&page_id)
        .ok_or_else(|| ApiError::NotFound(page_id.clone()))?;

    let rendered = render(&state, &doc, mode);
    Ok(Html(rendered.html()))
}

/// `GET /p/{slug}` - the public view of a published page as a full
/// HTML document. Unpublished pages are indistinguishable from missing ones.
#[tracing::instrument(name = "public_page", skip(state))]
pub async fn public_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, ApiError> {
    validate_slug(&slug)?;
    let doc = state
        .store
        .get_by_slug(&slug)
        .filter(|doc| doc.published)
        .ok_or_else(|| ApiError::NotFound(slug.clone()))?;

    let body = render(&state, &doc, RenderMode::Display).html();
    Ok(Html(html_document(&doc.title, &body)))
}

/// Prometheus scrape endpoint.
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    handle.render()
}

fn render(state: &AppState, doc: &PageDocument, mode: RenderMode) -> RenderedPage {
    let options = RenderOptions::new(mode).with_trust(state.config.trust);
    let rendered = page_core::render_page(&doc.components, &options);
    if !rendered.skipped.is_empty() {
        tracing::warn!(
            page_id = %doc.id,
            skipped = ?rendered.skipped,
            "unknown component types skipped"
        );
    }
    metrics::record_page_render(
        if mode.is_author() { "author" } else { "display" },
        rendered.skipped.len(),
    );
    rendered
}

fn html_document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_document_escapes_title() {
        let html = html_document("<Tom & Jerry>", "<div></div>");
        assert!(html.contains("<title>&lt;Tom &amp; Jerry&gt;</title>"));
        assert!(html.contains("<body>\n<div></div>\n</body>"));
    }

    #[test]
    fn test_save_request_metadata_is_optional() {
        let request: SavePageRequest =
            serde_json::from_str(r#"{"components": []}"#).expect("should parse");
        assert!(request.title.is_none());
        assert!(request.slug.is_none());
        assert!(request.published.is_none());
    }

    #[tokio::test]
    async fn test_list_components_groups_builtins() {
        let Json(groups) = list_components().await;
        assert!(!groups.is_empty());
        let total: usize = groups.iter().map(|g| g.components.len()).sum();
        assert_eq!(total, registry().len());
    }
}
