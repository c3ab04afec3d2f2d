use serde::{Deserialize, Serialize};

pub mod channel;
pub mod copy;
pub mod program;
pub mod schedule;

/// Body returned by endpoints that only acknowledge an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Treats absent and blank strings alike, the way form posts send them.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
