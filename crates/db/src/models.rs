use chrono::{DateTime, Utc};
use epg_core::models::{channel::Channel, program::Program, schedule::Schedule};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbChannel {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub category: Option<String>,
    pub stream_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProgram {
    pub id: Uuid,
    pub user_id: String,
    pub channel_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub duration: i32,
    pub category: Option<String>,
    pub genre: Option<String>,
    pub rating: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub id: Uuid,
    pub user_id: String,
    pub channel_id: Uuid,
    pub program_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_recurring: bool,
    pub recurring_days: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbChannel> for Channel {
    fn from(row: DbChannel) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            description: row.description,
            language: row.language,
            category: row.category,
            stream_url: row.stream_url,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbProgram> for Program {
    fn from(row: DbProgram) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            channel_id: row.channel_id,
            title: row.title,
            description: row.description,
            duration: row.duration,
            category: row.category,
            genre: row.genre,
            rating: row.rating,
            image_url: row.image_url,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbSchedule> for Schedule {
    fn from(row: DbSchedule) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            channel_id: row.channel_id,
            program_id: row.program_id,
            start_time: row.start_time,
            end_time: row.end_time,
            is_recurring: row.is_recurring,
            recurring_days: row.recurring_days,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
