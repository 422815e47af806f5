//! Item endpoints

use crate::{
    error::Result,
    extractors::{ItemId, JsonBody},
    models::ItemRequest,
    AppState,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::info;

pub async fn handle_get_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<impl IntoResponse> {
    info!("GET /item/{}", id);

    let item = state.item_manager.get(id).await?;
    Ok(Json(item))
}

pub async fn handle_create_item(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ItemRequest>,
) -> Result<impl IntoResponse> {
    info!("POST /item - requested by: {}", request.requested_by);

    let item = state.item_manager.create(request).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn handle_update_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
    JsonBody(request): JsonBody<ItemRequest>,
) -> Result<impl IntoResponse> {
    info!("PUT /item/{} - requested by: {}", id, request.requested_by);

    let item = state.item_manager.update(id, request).await?;
    Ok(Json(item))
}

pub async fn handle_patch_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
    JsonBody(request): JsonBody<ItemRequest>,
) -> Result<impl IntoResponse> {
    info!("PATCH /item/{} - requested by: {}", id, request.requested_by);

    let item = state.item_manager.patch(id, request).await?;
    Ok(Json(item))
}
