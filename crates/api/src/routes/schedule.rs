use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/schedules",
            get(handlers::schedule::list_schedules).post(handlers::schedule::create_schedule),
        )
        .route("/api/schedules/copy", post(handlers::copy::copy_schedules))
        .route(
            "/api/schedules/:id",
            put(handlers::schedule::update_schedule).delete(handlers::schedule::delete_schedule),
        )
}
