use crate::models::DbSchedule;
use chrono::Utc;
use epg_core::models::schedule::{NewSchedule, ScheduleChanges};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_schedules(pool: &Pool<Postgres>, user_id: &str) -> Result<Vec<DbSchedule>> {
    let schedules = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, user_id, channel_id, program_id, start_time, end_time, is_recurring,
               recurring_days, notes, created_at, updated_at
        FROM schedules
        WHERE user_id = $1
        ORDER BY start_time DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

pub async fn get_schedule(
    pool: &Pool<Postgres>,
    user_id: &str,
    id: Uuid,
) -> Result<Option<DbSchedule>> {
    tracing::debug!("Getting schedule by id: {}", id);

    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, user_id, channel_id, program_id, start_time, end_time, is_recurring,
               recurring_days, notes, created_at, updated_at
        FROM schedules
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(schedule)
}

/// Schedules among `ids` that belong to `user_id` and sit on `channel_id`.
pub async fn get_schedules_by_ids(
    pool: &Pool<Postgres>,
    user_id: &str,
    channel_id: Uuid,
    ids: &[Uuid],
) -> Result<Vec<DbSchedule>> {
    let schedules = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, user_id, channel_id, program_id, start_time, end_time, is_recurring,
               recurring_days, notes, created_at, updated_at
        FROM schedules
        WHERE user_id = $1 AND channel_id = $2 AND id = ANY($3)
        ORDER BY start_time ASC
        "#,
    )
    .bind(user_id)
    .bind(channel_id)
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

pub async fn create_schedule(
    pool: &Pool<Postgres>,
    user_id: &str,
    schedule: &NewSchedule,
) -> Result<DbSchedule> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating schedule: id={}, channel_id={}, program_id={}, start={}",
        id, schedule.channel_id, schedule.program_id, schedule.start_time
    );

    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        INSERT INTO schedules (id, user_id, channel_id, program_id, start_time, end_time,
                               is_recurring, recurring_days, notes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        RETURNING id, user_id, channel_id, program_id, start_time, end_time, is_recurring,
                  recurring_days, notes, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(schedule.channel_id)
    .bind(schedule.program_id)
    .bind(schedule.start_time)
    .bind(schedule.end_time)
    .bind(schedule.is_recurring)
    .bind(&schedule.recurring_days)
    .bind(&schedule.notes)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(schedule)
}

pub async fn update_schedule(
    pool: &Pool<Postgres>,
    user_id: &str,
    id: Uuid,
    changes: &ScheduleChanges,
) -> Result<Option<DbSchedule>> {
    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        UPDATE schedules
        SET channel_id = COALESCE($3, channel_id),
            program_id = COALESCE($4, program_id),
            start_time = COALESCE($5, start_time),
            end_time = COALESCE($6, end_time),
            is_recurring = COALESCE($7, is_recurring),
            recurring_days = COALESCE($8, recurring_days),
            notes = COALESCE($9, notes),
            updated_at = $10
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, channel_id, program_id, start_time, end_time, is_recurring,
                  recurring_days, notes, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(changes.channel_id)
    .bind(changes.program_id)
    .bind(changes.start_time)
    .bind(changes.end_time)
    .bind(changes.is_recurring)
    .bind(&changes.recurring_days)
    .bind(&changes.notes)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(schedule)
}

pub async fn delete_schedule(pool: &Pool<Postgres>, user_id: &str, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM schedules
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
