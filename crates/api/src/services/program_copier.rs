use std::sync::Arc;

use epg_core::{
    copy::TitleRegistry,
    errors::{EpgError, EpgResult},
    models::{
        copy::{CopyProgramsRequest, CopyProgramsResponse},
        non_blank,
        program::NewProgram,
    },
};
use epg_db::EpgStore;
use futures::future::try_join_all;
use tracing::info;

use crate::middleware::auth::AuthContext;
use crate::services::{parse_ids, ChannelPair};

/// Copies programs from one channel into another channel's library.
///
/// A copied program keeps every field of its source except its title, which
/// gets a `" (Copy N)"` suffix when the target channel already has a program
/// of that name (compared case-insensitively).
pub struct ProgramCopier {
    store: Arc<dyn EpgStore>,
}

impl ProgramCopier {
    pub fn new(store: Arc<dyn EpgStore>) -> Self {
        Self { store }
    }

    /// Runs a program copy for the caller.
    ///
    /// # Errors
    ///
    /// * `EpgError::InvalidRequest` - a field is missing, or source and
    ///   target are the same channel
    /// * `EpgError::NotFound` - a channel is not the caller's, or none of the
    ///   program ids resolves to one of the caller's programs
    /// * `EpgError::Database` - the store failed
    pub async fn copy(
        &self,
        auth: &AuthContext,
        request: CopyProgramsRequest,
    ) -> EpgResult<CopyProgramsResponse> {
        let (Some(source), Some(target), Some(program_ids)) = (
            non_blank(request.source_channel_id),
            non_blank(request.target_channel_id),
            request.program_ids,
        ) else {
            return Err(EpgError::InvalidRequest(
                "Source channel, target channel, and program IDs are required".to_string(),
            ));
        };

        let pair = ChannelPair::new(&source, &target)?;
        let (source_channel, target_channel) = pair.load(self.store.as_ref(), auth).await?;

        let programs = self
            .store
            .find_programs(&auth.user_id, parse_ids(&program_ids))
            .await?;
        if programs.is_empty() {
            return Err(EpgError::NotFound(
                "No valid programs found to copy".to_string(),
            ));
        }

        let existing = self
            .store
            .program_titles_in_channel(&auth.user_id, target_channel.id)
            .await?;
        let mut titles = TitleRegistry::new(existing);

        let drafts: Vec<NewProgram> = programs
            .iter()
            .map(|program| {
                let title = titles.claim(&program.title);
                NewProgram::copy_of(program, title, target_channel.id)
            })
            .collect();

        let created = try_join_all(
            drafts
                .into_iter()
                .map(|draft| self.store.create_program(&auth.user_id, draft)),
        )
        .await?;

        info!(
            user_id = %auth.user_id,
            email = ?auth.email,
            source = %source_channel.id,
            target = %target_channel.id,
            requested = program_ids.len(),
            copied = created.len(),
            "Copied programs"
        );

        Ok(CopyProgramsResponse {
            message: "Programs copied successfully".to_string(),
            copied_count: created.len(),
            programs: created,
        })
    }
}
