//! # Authentication Context
//!
//! Login and token verification happen upstream of this service. By the time
//! a request arrives here the caller's identity has been resolved into the
//! `user-id` header (plus `user-email` when known). [`AuthContext`] turns
//! those headers into an explicit value that handlers pass down to every
//! component call.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use epg_core::errors::EpgError;

use crate::middleware::error_handling::AppError;

/// Header carrying the resolved user id.
pub const USER_ID_HEADER: &str = "user-id";
/// Header carrying the resolved user's e-mail address.
pub const USER_EMAIL_HEADER: &str = "user-email";

/// Identity of the caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: String,
    pub email: Option<String>,
}

impl AuthContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
        }
    }

    /// Reads the identity headers.
    ///
    /// # Errors
    ///
    /// * `EpgError::Unauthorized` - the user id header is missing, blank or
    ///   not valid UTF-8
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, EpgError> {
        let user_id = headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| EpgError::Unauthorized("Unauthorized".to_string()))?;

        let email = headers
            .get(USER_EMAIL_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(Self {
            user_id: user_id.to_string(),
            email,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers)?)
    }
}
