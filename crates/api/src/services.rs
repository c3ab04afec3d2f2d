//! Channel copy operations.
//!
//! Both copiers follow the same shape: validate the request, check that the
//! caller owns both channels, resolve the requested ids (silently dropping
//! the ones that do not resolve), derive the new rows and create them as one
//! concurrent batch. Nothing is rolled back if a creation fails mid-batch.

/// Duplicates programs into another channel's library
pub mod program_copier;
/// Duplicates schedule entries onto another channel and day
pub mod schedule_copier;

use epg_core::{
    errors::{EpgError, EpgResult},
    models::channel::Channel,
};
use epg_db::EpgStore;
use uuid::Uuid;

use crate::middleware::auth::AuthContext;

/// Source and target channel ids of a copy request, already checked to be
/// present and distinct.
#[derive(Debug)]
pub(crate) struct ChannelPair<'a> {
    pub source: &'a str,
    pub target: &'a str,
}

impl<'a> ChannelPair<'a> {
    /// Rejects a copy from a channel onto itself.
    pub fn new(source: &'a str, target: &'a str) -> EpgResult<Self> {
        let same_id = match (parse_id(source), parse_id(target)) {
            (Some(source), Some(target)) => source == target,
            _ => false,
        };

        if source == target || same_id {
            return Err(EpgError::InvalidRequest(
                "Source and target channels cannot be the same".to_string(),
            ));
        }

        Ok(Self { source, target })
    }

    /// Loads both channels for the caller.
    ///
    /// # Errors
    ///
    /// * `EpgError::NotFound` - either channel is missing, malformed or owned
    ///   by someone else
    /// * `EpgError::Database` - the store failed
    pub async fn load(
        &self,
        store: &dyn EpgStore,
        auth: &AuthContext,
    ) -> EpgResult<(Channel, Channel)> {
        let not_found = || EpgError::NotFound("One or both channels not found".to_string());

        let (Some(source_id), Some(target_id)) = (parse_id(self.source), parse_id(self.target))
        else {
            return Err(not_found());
        };

        let (source, target) = tokio::try_join!(
            store.get_channel(&auth.user_id, source_id),
            store.get_channel(&auth.user_id, target_id),
        )?;

        match (source, target) {
            (Some(source), Some(target)) => Ok((source, target)),
            _ => Err(not_found()),
        }
    }
}

pub(crate) fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

/// Parses the ids that can possibly resolve; the rest are dropped.
pub(crate) fn parse_ids(raw: &[String]) -> Vec<Uuid> {
    raw.iter().filter_map(|id| parse_id(id)).collect()
}
