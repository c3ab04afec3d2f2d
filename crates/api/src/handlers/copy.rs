//! # Copy Handlers
//!
//! HTTP entry points of the channel copy operations. The work itself lives in
//! [`crate::services`]; these handlers only bind the request to the caller's
//! identity and the shared store.

use axum::{extract::State, Json};
use epg_core::models::copy::{
    CopyProgramsRequest, CopyProgramsResponse, CopySchedulesRequest, CopySchedulesResponse,
};
use std::sync::Arc;

use crate::{
    middleware::{auth::AuthContext, error_handling::AppError},
    ApiState,
};

/// Copies programs into another channel's library
///
/// # Endpoint
///
/// ```text
/// POST /api/programs/copy
/// { "sourceChannelId": "...", "targetChannelId": "...", "programIds": ["..."] }
/// ```
#[axum::debug_handler]
pub async fn copy_programs(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
    Json(payload): Json<CopyProgramsRequest>,
) -> Result<Json<CopyProgramsResponse>, AppError> {
    let response = state.program_copier().copy(&auth, payload).await?;

    Ok(Json(response))
}

/// Copies schedule entries onto another channel and day
///
/// # Endpoint
///
/// ```text
/// POST /api/schedules/copy
/// { "sourceChannelId": "...", "targetChannelId": "...",
///   "scheduleIds": ["..."], "targetDate": "2024-06-10" }
/// ```
#[axum::debug_handler]
pub async fn copy_schedules(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
    Json(payload): Json<CopySchedulesRequest>,
) -> Result<Json<CopySchedulesResponse>, AppError> {
    let response = state.schedule_copier().copy(&auth, payload).await?;

    Ok(Json(response))
}
