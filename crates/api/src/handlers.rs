/// Channel management
pub mod channel;
/// Program and schedule copy endpoints
pub mod copy;
/// Program management
pub mod program;
/// Schedule management
pub mod schedule;
