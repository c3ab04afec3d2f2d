use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
};
use epg_api::middleware::{
    auth::{AuthContext, USER_EMAIL_HEADER, USER_ID_HEADER},
    error_handling::AppError,
};
use epg_core::errors::EpgError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use crate::test_utils::{user, user_header, TestContext, ALICE};

#[rstest]
#[case(EpgError::InvalidRequest("Bad input".to_string()), StatusCode::BAD_REQUEST)]
#[case(EpgError::NotFound("Channel not found".to_string()), StatusCode::NOT_FOUND)]
#[case(EpgError::Unauthorized("Unauthorized".to_string()), StatusCode::UNAUTHORIZED)]
#[case(EpgError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(EpgError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: EpgError, #[case] status: StatusCode) {
    let response = AppError(error).into_response();

    assert_eq!(response.status(), status);
}

#[test]
fn test_auth_context_from_headers() {
    let mut headers = HeaderMap::new();
    headers.insert(USER_ID_HEADER, HeaderValue::from_static("user-42"));
    headers.insert(USER_EMAIL_HEADER, HeaderValue::from_static("ops@example.test"));

    let auth = AuthContext::from_headers(&headers).unwrap();

    assert_eq!(auth.user_id, "user-42");
    assert_eq!(auth.email.as_deref(), Some("ops@example.test"));
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("   "))]
fn test_auth_context_rejects_missing_identity(#[case] user_id: Option<&'static str>) {
    let mut headers = HeaderMap::new();
    if let Some(user_id) = user_id {
        headers.insert(USER_ID_HEADER, HeaderValue::from_static(user_id));
    }

    let result = AuthContext::from_headers(&headers);

    assert!(matches!(result, Err(EpgError::Unauthorized(_))));
}

#[tokio::test]
async fn test_requests_without_identity_are_unauthorized() {
    let ctx = TestContext::new();

    for path in ["/api/channels", "/api/programs", "/api/schedules"] {
        let response = ctx.server.get(path).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_json(&json!({ "error": "Unauthorized" }));
    }

    ctx.server
        .get("/api/channels")
        .add_header(user_header(), user(ALICE))
        .await
        .assert_status_ok();
}
