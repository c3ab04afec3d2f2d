pub mod channel;
pub mod health;
pub mod program;
pub mod schedule;
