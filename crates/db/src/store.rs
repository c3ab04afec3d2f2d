//! # Data-Access Interface
//!
//! [`EpgStore`] is the only I/O boundary of the service. Every operation is
//! scoped by the owning user's id: a row owned by someone else behaves
//! exactly like a row that does not exist.
//!
//! The server builds one store per process and hands it to every component
//! as an `Arc<dyn EpgStore>`. [`PgStore`] talks to PostgreSQL through the
//! repository functions; [`crate::MemoryStore`] keeps everything in process
//! for tests and demos.

use async_trait::async_trait;
use epg_core::models::{
    channel::{Channel, ChannelChanges, NewChannel},
    program::{NewProgram, Program, ProgramChanges},
    schedule::{NewSchedule, Schedule, ScheduleChanges},
};
use eyre::Result;
use uuid::Uuid;

use crate::{repositories, DbPool};

#[async_trait]
pub trait EpgStore: Send + Sync {
    /// Checks that the backing storage answers.
    async fn ping(&self) -> Result<()>;

    async fn list_channels(&self, user_id: &str) -> Result<Vec<Channel>>;
    async fn get_channel(&self, user_id: &str, id: Uuid) -> Result<Option<Channel>>;
    async fn create_channel(&self, user_id: &str, channel: NewChannel) -> Result<Channel>;
    /// Returns `None` when the channel does not exist for this user.
    async fn update_channel(
        &self,
        user_id: &str,
        id: Uuid,
        changes: ChannelChanges,
    ) -> Result<Option<Channel>>;
    /// Deletes the channel with its schedules and detaches its programs.
    /// Returns whether a channel was deleted.
    async fn delete_channel(&self, user_id: &str, id: Uuid) -> Result<bool>;

    async fn list_programs(&self, user_id: &str) -> Result<Vec<Program>>;
    async fn get_program(&self, user_id: &str, id: Uuid) -> Result<Option<Program>>;
    /// Programs among `ids` owned by the user, oldest first.
    async fn find_programs(&self, user_id: &str, ids: Vec<Uuid>) -> Result<Vec<Program>>;
    /// Titles of the user's programs attributed to `channel_id`.
    async fn program_titles_in_channel(&self, user_id: &str, channel_id: Uuid)
        -> Result<Vec<String>>;
    async fn create_program(&self, user_id: &str, program: NewProgram) -> Result<Program>;
    async fn update_program(
        &self,
        user_id: &str,
        id: Uuid,
        changes: ProgramChanges,
    ) -> Result<Option<Program>>;
    /// Deletes the program together with the schedules that air it.
    async fn delete_program(&self, user_id: &str, id: Uuid) -> Result<bool>;

    /// Schedules ordered by start time, latest first.
    async fn list_schedules(&self, user_id: &str) -> Result<Vec<Schedule>>;
    async fn get_schedule(&self, user_id: &str, id: Uuid) -> Result<Option<Schedule>>;
    /// Schedules among `ids` owned by the user and placed on `channel_id`.
    async fn find_schedules(
        &self,
        user_id: &str,
        channel_id: Uuid,
        ids: Vec<Uuid>,
    ) -> Result<Vec<Schedule>>;
    async fn create_schedule(&self, user_id: &str, schedule: NewSchedule) -> Result<Schedule>;
    async fn update_schedule(
        &self,
        user_id: &str,
        id: Uuid,
        changes: ScheduleChanges,
    ) -> Result<Option<Schedule>>;
    async fn delete_schedule(&self, user_id: &str, id: Uuid) -> Result<bool>;
}

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl EpgStore for PgStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_channels(&self, user_id: &str) -> Result<Vec<Channel>> {
        let rows = repositories::channel::list_channels(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_channel(&self, user_id: &str, id: Uuid) -> Result<Option<Channel>> {
        let row = repositories::channel::get_channel(&self.pool, user_id, id).await?;
        Ok(row.map(Into::into))
    }

    async fn create_channel(&self, user_id: &str, channel: NewChannel) -> Result<Channel> {
        let row = repositories::channel::create_channel(&self.pool, user_id, &channel).await?;
        Ok(row.into())
    }

    async fn update_channel(
        &self,
        user_id: &str,
        id: Uuid,
        changes: ChannelChanges,
    ) -> Result<Option<Channel>> {
        let row = repositories::channel::update_channel(&self.pool, user_id, id, &changes).await?;
        Ok(row.map(Into::into))
    }

    async fn delete_channel(&self, user_id: &str, id: Uuid) -> Result<bool> {
        repositories::channel::delete_channel(&self.pool, user_id, id).await
    }

    async fn list_programs(&self, user_id: &str) -> Result<Vec<Program>> {
        let rows = repositories::program::list_programs(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_program(&self, user_id: &str, id: Uuid) -> Result<Option<Program>> {
        let row = repositories::program::get_program(&self.pool, user_id, id).await?;
        Ok(row.map(Into::into))
    }

    async fn find_programs(&self, user_id: &str, ids: Vec<Uuid>) -> Result<Vec<Program>> {
        let rows = repositories::program::get_programs_by_ids(&self.pool, user_id, &ids).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn program_titles_in_channel(
        &self,
        user_id: &str,
        channel_id: Uuid,
    ) -> Result<Vec<String>> {
        repositories::program::get_program_titles_by_channel(&self.pool, user_id, channel_id).await
    }

    async fn create_program(&self, user_id: &str, program: NewProgram) -> Result<Program> {
        let row = repositories::program::create_program(&self.pool, user_id, &program).await?;
        Ok(row.into())
    }

    async fn update_program(
        &self,
        user_id: &str,
        id: Uuid,
        changes: ProgramChanges,
    ) -> Result<Option<Program>> {
        let row = repositories::program::update_program(&self.pool, user_id, id, &changes).await?;
        Ok(row.map(Into::into))
    }

    async fn delete_program(&self, user_id: &str, id: Uuid) -> Result<bool> {
        repositories::program::delete_program(&self.pool, user_id, id).await
    }

    async fn list_schedules(&self, user_id: &str) -> Result<Vec<Schedule>> {
        let rows = repositories::schedule::list_schedules(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_schedule(&self, user_id: &str, id: Uuid) -> Result<Option<Schedule>> {
        let row = repositories::schedule::get_schedule(&self.pool, user_id, id).await?;
        Ok(row.map(Into::into))
    }

    async fn find_schedules(
        &self,
        user_id: &str,
        channel_id: Uuid,
        ids: Vec<Uuid>,
    ) -> Result<Vec<Schedule>> {
        let rows =
            repositories::schedule::get_schedules_by_ids(&self.pool, user_id, channel_id, &ids)
                .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_schedule(&self, user_id: &str, schedule: NewSchedule) -> Result<Schedule> {
        let row = repositories::schedule::create_schedule(&self.pool, user_id, &schedule).await?;
        Ok(row.into())
    }

    async fn update_schedule(
        &self,
        user_id: &str,
        id: Uuid,
        changes: ScheduleChanges,
    ) -> Result<Option<Schedule>> {
        let row =
            repositories::schedule::update_schedule(&self.pool, user_id, id, &changes).await?;
        Ok(row.map(Into::into))
    }

    async fn delete_schedule(&self, user_id: &str, id: Uuid) -> Result<bool> {
        repositories::schedule::delete_schedule(&self.pool, user_id, id).await
    }
}
