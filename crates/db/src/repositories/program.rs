use crate::models::DbProgram;
use chrono::Utc;
use epg_core::models::program::{NewProgram, ProgramChanges};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_programs(pool: &Pool<Postgres>, user_id: &str) -> Result<Vec<DbProgram>> {
    let programs = sqlx::query_as::<_, DbProgram>(
        r#"
        SELECT id, user_id, channel_id, title, description, duration, category, genre,
               rating, image_url, is_active, created_at, updated_at
        FROM programs
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(programs)
}

pub async fn get_program(
    pool: &Pool<Postgres>,
    user_id: &str,
    id: Uuid,
) -> Result<Option<DbProgram>> {
    let program = sqlx::query_as::<_, DbProgram>(
        r#"
        SELECT id, user_id, channel_id, title, description, duration, category, genre,
               rating, image_url, is_active, created_at, updated_at
        FROM programs
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(program)
}

/// Programs among `ids` owned by `user_id`, oldest first. Unknown ids are ignored.
pub async fn get_programs_by_ids(
    pool: &Pool<Postgres>,
    user_id: &str,
    ids: &[Uuid],
) -> Result<Vec<DbProgram>> {
    let programs = sqlx::query_as::<_, DbProgram>(
        r#"
        SELECT id, user_id, channel_id, title, description, duration, category, genre,
               rating, image_url, is_active, created_at, updated_at
        FROM programs
        WHERE user_id = $1 AND id = ANY($2)
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(user_id)
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(programs)
}

pub async fn get_program_titles_by_channel(
    pool: &Pool<Postgres>,
    user_id: &str,
    channel_id: Uuid,
) -> Result<Vec<String>> {
    let titles = sqlx::query_scalar::<_, String>(
        r#"
        SELECT title
        FROM programs
        WHERE user_id = $1 AND channel_id = $2
        "#,
    )
    .bind(user_id)
    .bind(channel_id)
    .fetch_all(pool)
    .await?;

    Ok(titles)
}

pub async fn create_program(
    pool: &Pool<Postgres>,
    user_id: &str,
    program: &NewProgram,
) -> Result<DbProgram> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating program: id={}, title={}, channel_id={:?}",
        id, program.title, program.channel_id
    );

    let program = sqlx::query_as::<_, DbProgram>(
        r#"
        INSERT INTO programs (id, user_id, channel_id, title, description, duration, category,
                              genre, rating, image_url, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
        RETURNING id, user_id, channel_id, title, description, duration, category, genre,
                  rating, image_url, is_active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(program.channel_id)
    .bind(&program.title)
    .bind(&program.description)
    .bind(program.duration)
    .bind(&program.category)
    .bind(&program.genre)
    .bind(&program.rating)
    .bind(&program.image_url)
    .bind(program.is_active)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(program)
}

pub async fn update_program(
    pool: &Pool<Postgres>,
    user_id: &str,
    id: Uuid,
    changes: &ProgramChanges,
) -> Result<Option<DbProgram>> {
    let program = sqlx::query_as::<_, DbProgram>(
        r#"
        UPDATE programs
        SET channel_id = COALESCE($3, channel_id),
            title = COALESCE($4, title),
            description = COALESCE($5, description),
            duration = COALESCE($6, duration),
            category = COALESCE($7, category),
            genre = COALESCE($8, genre),
            rating = COALESCE($9, rating),
            image_url = COALESCE($10, image_url),
            is_active = COALESCE($11, is_active),
            updated_at = $12
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, channel_id, title, description, duration, category, genre,
                  rating, image_url, is_active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(changes.channel_id)
    .bind(&changes.title)
    .bind(&changes.description)
    .bind(changes.duration)
    .bind(&changes.category)
    .bind(&changes.genre)
    .bind(&changes.rating)
    .bind(&changes.image_url)
    .bind(changes.is_active)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(program)
}

pub async fn delete_program(pool: &Pool<Postgres>, user_id: &str, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM programs
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
