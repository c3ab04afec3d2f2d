pub mod channel;
pub mod program;
pub mod schedule;
