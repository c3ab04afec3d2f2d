use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create channels table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS channels (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id VARCHAR(255) NOT NULL,
            name VARCHAR(255) NOT NULL,
            description TEXT NULL,
            language VARCHAR(64) NULL,
            category VARCHAR(128) NULL,
            stream_url TEXT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create programs table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS programs (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id VARCHAR(255) NOT NULL,
            channel_id UUID NULL REFERENCES channels(id) ON DELETE SET NULL,
            title VARCHAR(255) NOT NULL,
            description TEXT NULL,
            duration INTEGER NOT NULL,
            category VARCHAR(128) NULL,
            genre VARCHAR(128) NULL,
            rating VARCHAR(32) NULL,
            image_url TEXT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_duration CHECK (duration > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedules table; end_time > start_time is deliberately not checked
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id VARCHAR(255) NOT NULL,
            channel_id UUID NOT NULL REFERENCES channels(id) ON DELETE CASCADE,
            program_id UUID NOT NULL REFERENCES programs(id) ON DELETE CASCADE,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            is_recurring BOOLEAN NOT NULL DEFAULT FALSE,
            recurring_days VARCHAR(64) NULL,
            notes TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes; a plain string runs through the simple query protocol,
    // which accepts several statements at once
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_channels_user_id ON channels(user_id);
        CREATE INDEX IF NOT EXISTS idx_programs_user_id ON programs(user_id);
        CREATE INDEX IF NOT EXISTS idx_programs_channel_id ON programs(channel_id);
        CREATE INDEX IF NOT EXISTS idx_schedules_user_id ON schedules(user_id);
        CREATE INDEX IF NOT EXISTS idx_schedules_channel_id ON schedules(channel_id);
        CREATE INDEX IF NOT EXISTS idx_schedules_start_time ON schedules(start_time);
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
