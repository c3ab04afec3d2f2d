use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::EpgError;
use crate::models::non_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
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

/// Abbreviated channel embedded in schedule listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub id: Uuid,
    pub name: String,
    pub language: Option<String>,
}

impl From<&Channel> for ChannelSummary {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id,
            name: channel.name.clone(),
            language: channel.language.clone(),
        }
    }
}

/// A validated channel ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChannel {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub category: Option<String>,
    pub stream_url: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub category: Option<String>,
    pub stream_url: Option<String>,
    pub is_active: Option<bool>,
}

impl TryFrom<CreateChannelRequest> for NewChannel {
    type Error = EpgError;

    fn try_from(request: CreateChannelRequest) -> Result<Self, Self::Error> {
        let name = non_blank(request.name)
            .ok_or_else(|| EpgError::InvalidRequest("Channel name is required".to_string()))?;

        Ok(Self {
            name,
            description: request.description,
            language: request.language,
            category: request.category,
            stream_url: request.stream_url,
            is_active: request.is_active.unwrap_or(true),
        })
    }
}

/// Partial update of a channel; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub category: Option<String>,
    pub stream_url: Option<String>,
    pub is_active: Option<bool>,
}

impl ChannelChanges {
    /// Applies the changes to an in-memory channel.
    pub fn apply(self, channel: &mut Channel) {
        if let Some(name) = self.name {
            channel.name = name;
        }
        if self.description.is_some() {
            channel.description = self.description;
        }
        if self.language.is_some() {
            channel.language = self.language;
        }
        if self.category.is_some() {
            channel.category = self.category;
        }
        if self.stream_url.is_some() {
            channel.stream_url = self.stream_url;
        }
        if let Some(is_active) = self.is_active {
            channel.is_active = is_active;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelResponse {
    pub channel: Channel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelsResponse {
    pub channels: Vec<Channel>,
}
