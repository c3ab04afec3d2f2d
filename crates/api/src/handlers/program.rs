use axum::{
    extract::{Path, State},
    Json,
};
use epg_core::{
    errors::EpgError,
    models::{
        program::{
            CreateProgramRequest, NewProgram, ProgramChanges, ProgramResponse, ProgramsResponse,
        },
        MessageResponse,
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{auth::AuthContext, error_handling::AppError},
    ApiState,
};

/// Checks that a program is being attached to one of the caller's channels.
async fn ensure_channel(
    state: &ApiState,
    auth: &AuthContext,
    channel_id: Option<Uuid>,
) -> Result<(), AppError> {
    if let Some(channel_id) = channel_id {
        state
            .store
            .get_channel(&auth.user_id, channel_id)
            .await?
            .ok_or_else(|| EpgError::NotFound("Channel not found".to_string()))?;
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn list_programs(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
) -> Result<Json<ProgramsResponse>, AppError> {
    let programs = state.store.list_programs(&auth.user_id).await?;

    Ok(Json(ProgramsResponse { programs }))
}

#[axum::debug_handler]
pub async fn create_program(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
    Json(payload): Json<CreateProgramRequest>,
) -> Result<Json<ProgramResponse>, AppError> {
    let new_program = NewProgram::try_from(payload)?;
    ensure_channel(&state, &auth, new_program.channel_id).await?;

    let program = state.store.create_program(&auth.user_id, new_program).await?;

    Ok(Json(ProgramResponse { program }))
}

#[axum::debug_handler]
pub async fn update_program(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProgramChanges>,
) -> Result<Json<ProgramResponse>, AppError> {
    if payload.duration.is_some_and(|d| d <= 0) {
        return Err(AppError(EpgError::InvalidRequest(
            "Duration must be a positive number of minutes".to_string(),
        )));
    }
    ensure_channel(&state, &auth, payload.channel_id).await?;

    let program = state
        .store
        .update_program(&auth.user_id, id, payload)
        .await?
        .ok_or_else(|| EpgError::NotFound("Program not found".to_string()))?;

    Ok(Json(ProgramResponse { program }))
}

#[axum::debug_handler]
pub async fn delete_program(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.store.delete_program(&auth.user_id, id).await? {
        return Err(AppError(EpgError::NotFound("Program not found".to_string())));
    }

    Ok(Json(MessageResponse::new("Program deleted successfully")))
}
