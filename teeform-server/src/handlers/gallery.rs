use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use teeform_model::GalleryPage;
use tracing::debug;

use teeform_core::{DEFAULT_LIMIT, PageRequest};

use crate::{AppState, errors::AppResult};

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    page: Option<usize>,
    limit: Option<usize>,
}

/// `GET /images?page=<n>&limit=<n>` — one page of the catalog in
/// append order, plus the `hasMore` continuation signal.
///
/// Out-of-range pages are an empty page, not an error; a page or limit
/// of zero is a 400.
pub async fn list_images_handler(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> AppResult<Json<GalleryPage>> {
    let request = PageRequest::new(
        query.page.unwrap_or(1),
        query.limit.unwrap_or(DEFAULT_LIMIT),
    )?;

    debug!(page = request.page(), limit = request.limit(), "gallery page requested");

    let page = state.pagination.list(request).await?;
    Ok(Json(page))
}
