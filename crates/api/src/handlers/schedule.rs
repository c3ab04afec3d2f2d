use axum::{
    extract::{Path, State},
    Json,
};
use epg_core::{
    errors::EpgError,
    models::{
        channel::{Channel, ChannelSummary},
        program::{Program, ProgramSummary},
        schedule::{
            CreateScheduleRequest, NewSchedule, Schedule, ScheduleChanges, ScheduleResponse,
            ScheduleView, SchedulesResponse,
        },
        MessageResponse,
    },
};
use std::{collections::HashMap, sync::Arc};
use uuid::Uuid;

use crate::{
    middleware::{auth::AuthContext, error_handling::AppError},
    ApiState,
};

/// Joins schedules with the summaries of their channels and programs.
fn to_views(
    schedules: Vec<Schedule>,
    channels: &[Channel],
    programs: &[Program],
) -> Vec<ScheduleView> {
    let channels: HashMap<Uuid, ChannelSummary> =
        channels.iter().map(|c| (c.id, c.into())).collect();
    let programs: HashMap<Uuid, ProgramSummary> =
        programs.iter().map(|p| (p.id, p.into())).collect();

    schedules
        .into_iter()
        .map(|schedule| ScheduleView {
            channel: channels.get(&schedule.channel_id).cloned(),
            program: programs.get(&schedule.program_id).cloned(),
            schedule,
        })
        .collect()
}

/// Resolves the channel and program a schedule points at, failing when
/// either is not the caller's.
async fn resolve_refs(
    state: &ApiState,
    auth: &AuthContext,
    channel_id: Uuid,
    program_id: Uuid,
) -> Result<(Channel, Program), AppError> {
    let (channel, program) = tokio::try_join!(
        state.store.get_channel(&auth.user_id, channel_id),
        state.store.get_program(&auth.user_id, program_id),
    )?;

    let channel = channel.ok_or_else(|| EpgError::NotFound("Channel not found".to_string()))?;
    let program = program.ok_or_else(|| EpgError::NotFound("Program not found".to_string()))?;
    Ok((channel, program))
}

fn view(schedule: Schedule, channel: &Channel, program: &Program) -> ScheduleView {
    ScheduleView {
        schedule,
        channel: Some(channel.into()),
        program: Some(program.into()),
    }
}

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
) -> Result<Json<SchedulesResponse>, AppError> {
    let (schedules, channels, programs) = tokio::try_join!(
        state.store.list_schedules(&auth.user_id),
        state.store.list_channels(&auth.user_id),
        state.store.list_programs(&auth.user_id),
    )?;

    Ok(Json(SchedulesResponse {
        schedules: to_views(schedules, &channels, &programs),
    }))
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
    Json(payload): Json<CreateScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let new_schedule = NewSchedule::try_from(payload)?;
    let (channel, program) =
        resolve_refs(&state, &auth, new_schedule.channel_id, new_schedule.program_id).await?;

    let schedule = state.store.create_schedule(&auth.user_id, new_schedule).await?;

    Ok(Json(ScheduleResponse {
        schedule: view(schedule, &channel, &program),
    }))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<ScheduleChanges>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let existing = state
        .store
        .get_schedule(&auth.user_id, id)
        .await?
        .ok_or_else(|| EpgError::NotFound("Schedule not found".to_string()))?;

    // Re-point only at channels and programs the caller owns
    let (channel, program) = resolve_refs(
        &state,
        &auth,
        payload.channel_id.unwrap_or(existing.channel_id),
        payload.program_id.unwrap_or(existing.program_id),
    )
    .await?;

    let schedule = state
        .store
        .update_schedule(&auth.user_id, id, payload)
        .await?
        .ok_or_else(|| EpgError::NotFound("Schedule not found".to_string()))?;

    Ok(Json(ScheduleResponse {
        schedule: view(schedule, &channel, &program),
    }))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.store.delete_schedule(&auth.user_id, id).await? {
        return Err(AppError(EpgError::NotFound("Schedule not found".to_string())));
    }

    Ok(Json(MessageResponse::new("Schedule deleted successfully")))
}
