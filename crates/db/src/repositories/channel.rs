use crate::models::DbChannel;
use chrono::Utc;
use epg_core::models::channel::{ChannelChanges, NewChannel};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_channels(pool: &Pool<Postgres>, user_id: &str) -> Result<Vec<DbChannel>> {
    let channels = sqlx::query_as::<_, DbChannel>(
        r#"
        SELECT id, user_id, name, description, language, category, stream_url,
               is_active, created_at, updated_at
        FROM channels
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(channels)
}

pub async fn get_channel(
    pool: &Pool<Postgres>,
    user_id: &str,
    id: Uuid,
) -> Result<Option<DbChannel>> {
    let channel = sqlx::query_as::<_, DbChannel>(
        r#"
        SELECT id, user_id, name, description, language, category, stream_url,
               is_active, created_at, updated_at
        FROM channels
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(channel)
}

pub async fn create_channel(
    pool: &Pool<Postgres>,
    user_id: &str,
    channel: &NewChannel,
) -> Result<DbChannel> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating channel: id={}, name={}", id, channel.name);

    let channel = sqlx::query_as::<_, DbChannel>(
        r#"
        INSERT INTO channels (id, user_id, name, description, language, category,
                              stream_url, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
        RETURNING id, user_id, name, description, language, category, stream_url,
                  is_active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&channel.name)
    .bind(&channel.description)
    .bind(&channel.language)
    .bind(&channel.category)
    .bind(&channel.stream_url)
    .bind(channel.is_active)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(channel)
}

pub async fn update_channel(
    pool: &Pool<Postgres>,
    user_id: &str,
    id: Uuid,
    changes: &ChannelChanges,
) -> Result<Option<DbChannel>> {
    let channel = sqlx::query_as::<_, DbChannel>(
        r#"
        UPDATE channels
        SET name = COALESCE($3, name),
            description = COALESCE($4, description),
            language = COALESCE($5, language),
            category = COALESCE($6, category),
            stream_url = COALESCE($7, stream_url),
            is_active = COALESCE($8, is_active),
            updated_at = $9
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, name, description, language, category, stream_url,
                  is_active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&changes.name)
    .bind(&changes.description)
    .bind(&changes.language)
    .bind(&changes.category)
    .bind(&changes.stream_url)
    .bind(changes.is_active)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(channel)
}

pub async fn delete_channel(pool: &Pool<Postgres>, user_id: &str, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM channels
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
