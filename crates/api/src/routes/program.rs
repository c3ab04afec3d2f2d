use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/programs",
            get(handlers::program::list_programs).post(handlers::program::create_program),
        )
        .route("/api/programs/copy", post(handlers::copy::copy_programs))
        .route(
            "/api/programs/:id",
            put(handlers::program::update_program).delete(handlers::program::delete_program),
        )
}
