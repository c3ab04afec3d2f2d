use serde::{Deserialize, Serialize};

use crate::models::{program::Program, schedule::Schedule};

/// Body of `POST /api/programs/copy`.
///
/// Identifiers are kept as raw strings: ids that do not parse simply never
/// resolve, and are skipped like any other unknown id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyProgramsRequest {
    pub source_channel_id: Option<String>,
    pub target_channel_id: Option<String>,
    pub program_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyProgramsResponse {
    pub message: String,
    pub copied_count: usize,
    pub programs: Vec<Program>,
}

/// Body of `POST /api/schedules/copy`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopySchedulesRequest {
    pub source_channel_id: Option<String>,
    pub target_channel_id: Option<String>,
    pub schedule_ids: Option<Vec<String>>,
    /// RFC 3339 timestamp or plain `YYYY-MM-DD` date.
    pub target_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopySchedulesResponse {
    pub message: String,
    pub copied_count: usize,
    pub schedules: Vec<Schedule>,
}
