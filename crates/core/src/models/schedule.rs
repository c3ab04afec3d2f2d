use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::EpgError;
use crate::models::{channel::ChannelSummary, program::ProgramSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: Uuid,
    pub user_id: String,
    pub channel_id: Uuid,
    pub program_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_recurring: bool,
    /// Comma-separated weekday tokens, e.g. `"MON,WED,FRI"`.
    pub recurring_days: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A schedule together with the channel and program it points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleView {
    #[serde(flatten)]
    pub schedule: Schedule,
    pub channel: Option<ChannelSummary>,
    pub program: Option<ProgramSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSchedule {
    pub channel_id: Uuid,
    pub program_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_recurring: bool,
    pub recurring_days: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub channel_id: Option<Uuid>,
    pub program_id: Option<Uuid>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_recurring: Option<bool>,
    pub recurring_days: Option<String>,
    pub notes: Option<String>,
}

impl TryFrom<CreateScheduleRequest> for NewSchedule {
    type Error = EpgError;

    fn try_from(request: CreateScheduleRequest) -> Result<Self, Self::Error> {
        match (
            request.channel_id,
            request.program_id,
            request.start_time,
            request.end_time,
        ) {
            (Some(channel_id), Some(program_id), Some(start_time), Some(end_time)) => Ok(Self {
                channel_id,
                program_id,
                start_time,
                end_time,
                is_recurring: request.is_recurring.unwrap_or(false),
                recurring_days: request.recurring_days,
                notes: request.notes,
            }),
            _ => Err(EpgError::InvalidRequest(
                "Channel, program, start time, and end time are required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleChanges {
    pub channel_id: Option<Uuid>,
    pub program_id: Option<Uuid>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_recurring: Option<bool>,
    pub recurring_days: Option<String>,
    pub notes: Option<String>,
}

impl ScheduleChanges {
    pub fn apply(self, schedule: &mut Schedule) {
        if let Some(channel_id) = self.channel_id {
            schedule.channel_id = channel_id;
        }
        if let Some(program_id) = self.program_id {
            schedule.program_id = program_id;
        }
        if let Some(start_time) = self.start_time {
            schedule.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            schedule.end_time = end_time;
        }
        if let Some(is_recurring) = self.is_recurring {
            schedule.is_recurring = is_recurring;
        }
        if self.recurring_days.is_some() {
            schedule.recurring_days = self.recurring_days;
        }
        if self.notes.is_some() {
            schedule.notes = self.notes;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub schedule: ScheduleView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulesResponse {
    pub schedules: Vec<ScheduleView>,
}
