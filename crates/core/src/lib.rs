//! # EPG Core
//!
//! Domain types shared by the storage and HTTP layers of the EPG manager:
//! channels, programs, schedules, the request/response shapes of the JSON
//! API, the domain error type, and the date and title arithmetic behind the
//! channel copy operations.

pub mod copy;
pub mod errors;
pub mod models;
