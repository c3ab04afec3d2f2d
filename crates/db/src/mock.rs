//! mockall double of [`EpgStore`] for tests that need to script failures or
//! assert that a write never happens.

use async_trait::async_trait;
use epg_core::models::{
    channel::{Channel, ChannelChanges, NewChannel},
    program::{NewProgram, Program, ProgramChanges},
    schedule::{NewSchedule, Schedule, ScheduleChanges},
};
use mockall::mock;
use uuid::Uuid;

use crate::store::EpgStore;

mock! {
    pub Store {}

    #[async_trait]
    impl EpgStore for Store {
        async fn ping(&self) -> eyre::Result<()>;

        async fn list_channels(&self, user_id: &str) -> eyre::Result<Vec<Channel>>;
        async fn get_channel(&self, user_id: &str, id: Uuid) -> eyre::Result<Option<Channel>>;
        async fn create_channel(&self, user_id: &str, channel: NewChannel) -> eyre::Result<Channel>;
        async fn update_channel(
            &self,
            user_id: &str,
            id: Uuid,
            changes: ChannelChanges,
        ) -> eyre::Result<Option<Channel>>;
        async fn delete_channel(&self, user_id: &str, id: Uuid) -> eyre::Result<bool>;

        async fn list_programs(&self, user_id: &str) -> eyre::Result<Vec<Program>>;
        async fn get_program(&self, user_id: &str, id: Uuid) -> eyre::Result<Option<Program>>;
        async fn find_programs(&self, user_id: &str, ids: Vec<Uuid>) -> eyre::Result<Vec<Program>>;
        async fn program_titles_in_channel(
            &self,
            user_id: &str,
            channel_id: Uuid,
        ) -> eyre::Result<Vec<String>>;
        async fn create_program(&self, user_id: &str, program: NewProgram) -> eyre::Result<Program>;
        async fn update_program(
            &self,
            user_id: &str,
            id: Uuid,
            changes: ProgramChanges,
        ) -> eyre::Result<Option<Program>>;
        async fn delete_program(&self, user_id: &str, id: Uuid) -> eyre::Result<bool>;

        async fn list_schedules(&self, user_id: &str) -> eyre::Result<Vec<Schedule>>;
        async fn get_schedule(&self, user_id: &str, id: Uuid) -> eyre::Result<Option<Schedule>>;
        async fn find_schedules(
            &self,
            user_id: &str,
            channel_id: Uuid,
            ids: Vec<Uuid>,
        ) -> eyre::Result<Vec<Schedule>>;
        async fn create_schedule(
            &self,
            user_id: &str,
            schedule: NewSchedule,
        ) -> eyre::Result<Schedule>;
        async fn update_schedule(
            &self,
            user_id: &str,
            id: Uuid,
            changes: ScheduleChanges,
        ) -> eyre::Result<Option<Schedule>>;
        async fn delete_schedule(&self, user_id: &str, id: Uuid) -> eyre::Result<bool>;
    }
}
