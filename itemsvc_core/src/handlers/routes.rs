//! Route table

use crate::{
    handlers::{health, items},
    AppState,
};
use axum::{
    routing::{get, post},
    Router,
};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::handle_root))
        .route("/health", get(health::handle_health))
        .route("/item", post(items::handle_create_item))
        .route(
            "/item/:id",
            get(items::handle_get_item)
                .put(items::handle_update_item)
                .patch(items::handle_patch_item),
        )
}
