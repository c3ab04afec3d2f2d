/// Identity extraction from upstream-resolved request headers
pub mod auth;
/// Mapping of domain errors onto HTTP responses
pub mod error_handling;
