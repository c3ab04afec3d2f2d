use std::sync::Arc;

use chrono_tz::Tz;
use epg_core::{
    copy::{copy_note, parse_target_date, shift_to_date},
    errors::{EpgError, EpgResult},
    models::{
        copy::{CopySchedulesRequest, CopySchedulesResponse},
        non_blank,
        schedule::NewSchedule,
    },
};
use epg_db::EpgStore;
use futures::future::try_join_all;
use tracing::info;

use crate::middleware::auth::AuthContext;
use crate::services::{parse_ids, ChannelPair};

/// Copies schedule entries from one channel onto another channel and day.
///
/// Each copy keeps the time of day and the duration of its source, measured
/// from midnight in the guide timezone, and points at the same program. No
/// overlap check is made against what already airs on the target channel.
pub struct ScheduleCopier {
    store: Arc<dyn EpgStore>,
    timezone: Tz,
}

impl ScheduleCopier {
    pub fn new(store: Arc<dyn EpgStore>, timezone: Tz) -> Self {
        Self { store, timezone }
    }

    /// Runs a schedule copy for the caller.
    ///
    /// # Errors
    ///
    /// * `EpgError::InvalidRequest` - a field is missing, the target date
    ///   cannot be read, or source and target are the same channel
    /// * `EpgError::NotFound` - a channel is not the caller's, or none of the
    ///   schedule ids resolves to one of the caller's schedules on the
    ///   source channel
    /// * `EpgError::Database` - the store failed
    pub async fn copy(
        &self,
        auth: &AuthContext,
        request: CopySchedulesRequest,
    ) -> EpgResult<CopySchedulesResponse> {
        let (Some(source), Some(target), Some(schedule_ids), Some(target_date)) = (
            non_blank(request.source_channel_id),
            non_blank(request.target_channel_id),
            request.schedule_ids,
            non_blank(request.target_date),
        ) else {
            return Err(EpgError::InvalidRequest(
                "Source channel, target channel, schedule IDs, and target date are required"
                    .to_string(),
            ));
        };

        let pair = ChannelPair::new(&source, &target)?;
        let target_day = parse_target_date(&target_date, &self.timezone)?;
        let (source_channel, target_channel) = pair.load(self.store.as_ref(), auth).await?;

        let schedules = self
            .store
            .find_schedules(&auth.user_id, source_channel.id, parse_ids(&schedule_ids))
            .await?;
        if schedules.is_empty() {
            return Err(EpgError::NotFound(
                "No valid schedules found to copy".to_string(),
            ));
        }

        let drafts = schedules
            .iter()
            .map(|schedule| {
                let (start_time, end_time) = shift_to_date(
                    schedule.start_time,
                    schedule.end_time,
                    target_day,
                    &self.timezone,
                )?;

                Ok(NewSchedule {
                    channel_id: target_channel.id,
                    program_id: schedule.program_id,
                    start_time,
                    end_time,
                    is_recurring: schedule.is_recurring,
                    recurring_days: schedule.recurring_days.clone(),
                    notes: Some(copy_note(&source_channel.name, schedule.notes.as_deref())),
                })
            })
            .collect::<EpgResult<Vec<NewSchedule>>>()?;

        let created = try_join_all(
            drafts
                .into_iter()
                .map(|draft| self.store.create_schedule(&auth.user_id, draft)),
        )
        .await?;

        info!(
            user_id = %auth.user_id,
            email = ?auth.email,
            source = %source_channel.id,
            target = %target_channel.id,
            target_day = %target_day,
            copied = created.len(),
            "Copied schedules"
        );

        Ok(CopySchedulesResponse {
            message: "Schedules copied successfully".to_string(),
            copied_count: created.len(),
            schedules: created,
        })
    }
}
