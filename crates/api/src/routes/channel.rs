use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/channels",
            get(handlers::channel::list_channels).post(handlers::channel::create_channel),
        )
        .route(
            "/api/channels/:id",
            put(handlers::channel::update_channel).delete(handlers::channel::delete_channel),
        )
}
