use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::EpgError;
use crate::models::non_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: Uuid,
    pub user_id: String,
    /// Channel library the program belongs to, if any.
    pub channel_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    /// Running time in minutes.
    pub duration: i32,
    pub category: Option<String>,
    pub genre: Option<String>,
    pub rating: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSummary {
    pub id: Uuid,
    pub title: String,
    pub duration: i32,
    pub category: Option<String>,
}

impl From<&Program> for ProgramSummary {
    fn from(program: &Program) -> Self {
        Self {
            id: program.id,
            title: program.title.clone(),
            duration: program.duration,
            category: program.category.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProgram {
    pub channel_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub duration: i32,
    pub category: Option<String>,
    pub genre: Option<String>,
    pub rating: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl NewProgram {
    /// Duplicate of `source` under a new title, attached to `channel_id`.
    pub fn copy_of(source: &Program, title: String, channel_id: Uuid) -> Self {
        Self {
            channel_id: Some(channel_id),
            title,
            description: source.description.clone(),
            duration: source.duration,
            category: source.category.clone(),
            genre: source.genre.clone(),
            rating: source.rating.clone(),
            image_url: source.image_url.clone(),
            is_active: source.is_active,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramRequest {
    pub channel_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub category: Option<String>,
    pub genre: Option<String>,
    pub rating: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl TryFrom<CreateProgramRequest> for NewProgram {
    type Error = EpgError;

    fn try_from(request: CreateProgramRequest) -> Result<Self, Self::Error> {
        let missing = || EpgError::InvalidRequest("Title and duration are required".to_string());

        let title = non_blank(request.title).ok_or_else(missing)?;
        let duration = request.duration.filter(|d| *d > 0).ok_or_else(missing)?;

        Ok(Self {
            channel_id: request.channel_id,
            title,
            description: request.description,
            duration,
            category: request.category,
            genre: request.genre,
            rating: request.rating,
            image_url: request.image_url,
            is_active: request.is_active.unwrap_or(true),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramChanges {
    pub channel_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub category: Option<String>,
    pub genre: Option<String>,
    pub rating: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl ProgramChanges {
    pub fn apply(self, program: &mut Program) {
        if self.channel_id.is_some() {
            program.channel_id = self.channel_id;
        }
        if let Some(title) = self.title {
            program.title = title;
        }
        if self.description.is_some() {
            program.description = self.description;
        }
        if let Some(duration) = self.duration {
            program.duration = duration;
        }
        if self.category.is_some() {
            program.category = self.category;
        }
        if self.genre.is_some() {
            program.genre = self.genre;
        }
        if self.rating.is_some() {
            program.rating = self.rating;
        }
        if self.image_url.is_some() {
            program.image_url = self.image_url;
        }
        if let Some(is_active) = self.is_active {
            program.is_active = is_active;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramResponse {
    pub program: Program,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramsResponse {
    pub programs: Vec<Program>,
}
