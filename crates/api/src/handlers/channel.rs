use axum::{
    extract::{Path, State},
    Json,
};
use epg_core::{
    errors::EpgError,
    models::{
        channel::{
            ChannelChanges, ChannelResponse, ChannelsResponse, CreateChannelRequest, NewChannel,
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

#[axum::debug_handler]
pub async fn list_channels(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
) -> Result<Json<ChannelsResponse>, AppError> {
    let channels = state.store.list_channels(&auth.user_id).await?;

    Ok(Json(ChannelsResponse { channels }))
}

#[axum::debug_handler]
pub async fn create_channel(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
    Json(payload): Json<CreateChannelRequest>,
) -> Result<Json<ChannelResponse>, AppError> {
    let new_channel = NewChannel::try_from(payload)?;
    let channel = state.store.create_channel(&auth.user_id, new_channel).await?;

    Ok(Json(ChannelResponse { channel }))
}

#[axum::debug_handler]
pub async fn update_channel(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChannelChanges>,
) -> Result<Json<ChannelResponse>, AppError> {
    let channel = state
        .store
        .update_channel(&auth.user_id, id, payload)
        .await?
        .ok_or_else(|| EpgError::NotFound("Channel not found".to_string()))?;

    Ok(Json(ChannelResponse { channel }))
}

#[axum::debug_handler]
pub async fn delete_channel(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.store.delete_channel(&auth.user_id, id).await? {
        return Err(AppError(EpgError::NotFound("Channel not found".to_string())));
    }

    Ok(Json(MessageResponse::new("Channel deleted successfully")))
}
