//! In-process [`EpgStore`] backed by vectors behind a `RwLock`.
//!
//! Rows are kept in insertion order, which doubles as creation order. The
//! delete rules mirror the foreign keys of the PostgreSQL schema.

use async_trait::async_trait;
use chrono::Utc;
use epg_core::models::{
    channel::{Channel, ChannelChanges, NewChannel},
    program::{NewProgram, Program, ProgramChanges},
    schedule::{NewSchedule, Schedule, ScheduleChanges},
};
use eyre::Result;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::EpgStore;

#[derive(Debug, Default)]
struct Tables {
    channels: Vec<Channel>,
    programs: Vec<Program>,
    schedules: Vec<Schedule>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EpgStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_channels(&self, user_id: &str) -> Result<Vec<Channel>> {
        let tables = self.tables.read().await;
        let mut channels: Vec<Channel> = tables
            .channels
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        channels.reverse();
        Ok(channels)
    }

    async fn get_channel(&self, user_id: &str, id: Uuid) -> Result<Option<Channel>> {
        let tables = self.tables.read().await;
        Ok(tables
            .channels
            .iter()
            .find(|c| c.id == id && c.user_id == user_id)
            .cloned())
    }

    async fn create_channel(&self, user_id: &str, channel: NewChannel) -> Result<Channel> {
        let now = Utc::now();
        let channel = Channel {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            name: channel.name,
            description: channel.description,
            language: channel.language,
            category: channel.category,
            stream_url: channel.stream_url,
            is_active: channel.is_active,
            created_at: now,
            updated_at: now,
        };

        self.tables.write().await.channels.push(channel.clone());
        Ok(channel)
    }

    async fn update_channel(
        &self,
        user_id: &str,
        id: Uuid,
        changes: ChannelChanges,
    ) -> Result<Option<Channel>> {
        let mut tables = self.tables.write().await;
        let Some(channel) = tables
            .channels
            .iter_mut()
            .find(|c| c.id == id && c.user_id == user_id)
        else {
            return Ok(None);
        };

        changes.apply(channel);
        channel.updated_at = Utc::now();
        Ok(Some(channel.clone()))
    }

    async fn delete_channel(&self, user_id: &str, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.channels.len();
        tables
            .channels
            .retain(|c| !(c.id == id && c.user_id == user_id));
        if tables.channels.len() == before {
            return Ok(false);
        }

        tables.schedules.retain(|s| s.channel_id != id);
        for program in tables.programs.iter_mut() {
            if program.channel_id == Some(id) {
                program.channel_id = None;
            }
        }
        Ok(true)
    }

    async fn list_programs(&self, user_id: &str) -> Result<Vec<Program>> {
        let tables = self.tables.read().await;
        let mut programs: Vec<Program> = tables
            .programs
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        programs.reverse();
        Ok(programs)
    }

    async fn get_program(&self, user_id: &str, id: Uuid) -> Result<Option<Program>> {
        let tables = self.tables.read().await;
        Ok(tables
            .programs
            .iter()
            .find(|p| p.id == id && p.user_id == user_id)
            .cloned())
    }

    async fn find_programs(&self, user_id: &str, ids: Vec<Uuid>) -> Result<Vec<Program>> {
        let tables = self.tables.read().await;
        Ok(tables
            .programs
            .iter()
            .filter(|p| p.user_id == user_id && ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn program_titles_in_channel(
        &self,
        user_id: &str,
        channel_id: Uuid,
    ) -> Result<Vec<String>> {
        let tables = self.tables.read().await;
        Ok(tables
            .programs
            .iter()
            .filter(|p| p.user_id == user_id && p.channel_id == Some(channel_id))
            .map(|p| p.title.clone())
            .collect())
    }

    async fn create_program(&self, user_id: &str, program: NewProgram) -> Result<Program> {
        let now = Utc::now();
        let program = Program {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            channel_id: program.channel_id,
            title: program.title,
            description: program.description,
            duration: program.duration,
            category: program.category,
            genre: program.genre,
            rating: program.rating,
            image_url: program.image_url,
            is_active: program.is_active,
            created_at: now,
            updated_at: now,
        };

        self.tables.write().await.programs.push(program.clone());
        Ok(program)
    }

    async fn update_program(
        &self,
        user_id: &str,
        id: Uuid,
        changes: ProgramChanges,
    ) -> Result<Option<Program>> {
        let mut tables = self.tables.write().await;
        let Some(program) = tables
            .programs
            .iter_mut()
            .find(|p| p.id == id && p.user_id == user_id)
        else {
            return Ok(None);
        };

        changes.apply(program);
        program.updated_at = Utc::now();
        Ok(Some(program.clone()))
    }

    async fn delete_program(&self, user_id: &str, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.programs.len();
        tables
            .programs
            .retain(|p| !(p.id == id && p.user_id == user_id));
        if tables.programs.len() == before {
            return Ok(false);
        }

        tables.schedules.retain(|s| s.program_id != id);
        Ok(true)
    }

    async fn list_schedules(&self, user_id: &str) -> Result<Vec<Schedule>> {
        let tables = self.tables.read().await;
        let mut schedules: Vec<Schedule> = tables
            .schedules
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        schedules.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(schedules)
    }

    async fn get_schedule(&self, user_id: &str, id: Uuid) -> Result<Option<Schedule>> {
        let tables = self.tables.read().await;
        Ok(tables
            .schedules
            .iter()
            .find(|s| s.id == id && s.user_id == user_id)
            .cloned())
    }

    async fn find_schedules(
        &self,
        user_id: &str,
        channel_id: Uuid,
        ids: Vec<Uuid>,
    ) -> Result<Vec<Schedule>> {
        let tables = self.tables.read().await;
        let mut schedules: Vec<Schedule> = tables
            .schedules
            .iter()
            .filter(|s| s.user_id == user_id && s.channel_id == channel_id && ids.contains(&s.id))
            .cloned()
            .collect();
        schedules.sort_by_key(|s| s.start_time);
        Ok(schedules)
    }

    async fn create_schedule(&self, user_id: &str, schedule: NewSchedule) -> Result<Schedule> {
        let now = Utc::now();
        let schedule = Schedule {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            channel_id: schedule.channel_id,
            program_id: schedule.program_id,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            is_recurring: schedule.is_recurring,
            recurring_days: schedule.recurring_days,
            notes: schedule.notes,
            created_at: now,
            updated_at: now,
        };

        self.tables.write().await.schedules.push(schedule.clone());
        Ok(schedule)
    }

    async fn update_schedule(
        &self,
        user_id: &str,
        id: Uuid,
        changes: ScheduleChanges,
    ) -> Result<Option<Schedule>> {
        let mut tables = self.tables.write().await;
        let Some(schedule) = tables
            .schedules
            .iter_mut()
            .find(|s| s.id == id && s.user_id == user_id)
        else {
            return Ok(None);
        };

        changes.apply(schedule);
        schedule.updated_at = Utc::now();
        Ok(Some(schedule.clone()))
    }

    async fn delete_schedule(&self, user_id: &str, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.schedules.len();
        tables
            .schedules
            .retain(|s| !(s.id == id && s.user_id == user_id));
        Ok(tables.schedules.len() != before)
    }
}
