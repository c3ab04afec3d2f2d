use std::sync::Arc;

use chrono::Utc;
use chrono_tz::Tz;
use epg_api::{
    middleware::auth::AuthContext,
    services::{program_copier::ProgramCopier, schedule_copier::ScheduleCopier},
};
use epg_core::{
    errors::EpgError,
    models::{
        channel::Channel,
        copy::{CopyProgramsRequest, CopySchedulesRequest},
        program::Program,
    },
};
use epg_db::mock::MockStore;
use fake::{faker::company::en::CompanyName, Fake};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use uuid::Uuid;

fn channel(user_id: &str) -> Channel {
    let now = Utc::now();
    Channel {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        name: CompanyName().fake(),
        description: None,
        language: None,
        category: None,
        stream_url: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn program(user_id: &str, channel_id: Uuid, title: &str) -> Program {
    let now = Utc::now();
    Program {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        channel_id: Some(channel_id),
        title: title.to_string(),
        description: None,
        duration: 60,
        category: None,
        genre: None,
        rating: None,
        image_url: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Expects both channel lookups to succeed.
fn expect_channels(store: &mut MockStore, source: &Channel, target: &Channel) {
    let (source, target) = (source.clone(), target.clone());
    store
        .expect_get_channel()
        .returning(move |_, id| {
            Ok([&source, &target]
                .into_iter()
                .find(|c| c.id == id)
                .cloned())
        });
}

#[tokio::test]
async fn test_program_copy_uses_target_titles() {
    let auth = AuthContext::new("alice");
    let source = channel("alice");
    let target = channel("alice");
    let original = program("alice", source.id, "Quiz");

    let mut store = MockStore::new();
    expect_channels(&mut store, &source, &target);
    let found = original.clone();
    store
        .expect_find_programs()
        .with(eq("alice"), eq(vec![original.id]))
        .times(1)
        .returning(move |_, _| Ok(vec![found.clone()]));
    store
        .expect_program_titles_in_channel()
        .with(eq("alice"), eq(target.id))
        .times(1)
        .returning(|_, _| Ok(vec!["QUIZ".to_string(), "Quiz (Copy 1)".to_string()]));
    let target_id = target.id;
    store
        .expect_create_program()
        .withf(move |user_id, draft| {
            user_id == "alice"
                && draft.title == "Quiz (Copy 2)"
                && draft.channel_id == Some(target_id)
        })
        .times(1)
        .returning(|user_id, draft| {
            let mut created = program(user_id, Uuid::nil(), &draft.title);
            created.channel_id = draft.channel_id;
            Ok(created)
        });

    let copier = ProgramCopier::new(Arc::new(store));
    let response = copier
        .copy(
            &auth,
            CopyProgramsRequest {
                source_channel_id: Some(source.id.to_string()),
                target_channel_id: Some(target.id.to_string()),
                program_ids: Some(vec![original.id.to_string()]),
            },
        )
        .await
        .unwrap();

    assert_eq!(response.copied_count, 1);
    assert_eq!(response.programs[0].title, "Quiz (Copy 2)");
}

#[tokio::test]
async fn test_program_copy_never_writes_when_a_channel_is_missing() {
    let auth = AuthContext::new("alice");

    let mut store = MockStore::new();
    store.expect_get_channel().returning(|_, _| Ok(None));
    store.expect_find_programs().times(0);
    store.expect_create_program().times(0);

    let copier = ProgramCopier::new(Arc::new(store));
    let result = copier
        .copy(
            &auth,
            CopyProgramsRequest {
                source_channel_id: Some(Uuid::new_v4().to_string()),
                target_channel_id: Some(Uuid::new_v4().to_string()),
                program_ids: Some(vec![Uuid::new_v4().to_string()]),
            },
        )
        .await;

    match result {
        Err(EpgError::NotFound(message)) => assert_eq!(message, "One or both channels not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_same_channel_is_rejected_before_any_lookup() {
    let auth = AuthContext::new("alice");
    let id = Uuid::new_v4();

    let mut store = MockStore::new();
    store.expect_get_channel().times(0);

    let copier = ProgramCopier::new(Arc::new(store));
    let result = copier
        .copy(
            &auth,
            CopyProgramsRequest {
                source_channel_id: Some(id.to_string()),
                // Same id, different spelling
                target_channel_id: Some(id.to_string().to_uppercase()),
                program_ids: Some(vec![]),
            },
        )
        .await;

    assert!(matches!(result, Err(EpgError::InvalidRequest(_))));
}

#[test_log::test(tokio::test)]
async fn test_schedule_copy_surfaces_store_failures() {
    let auth = AuthContext::new("alice");
    let source = channel("alice");
    let target = channel("alice");

    let mut store = MockStore::new();
    expect_channels(&mut store, &source, &target);
    store
        .expect_find_schedules()
        .returning(|_, _, _| Err(eyre::eyre!("connection reset")));
    store.expect_create_schedule().times(0);

    let copier = ScheduleCopier::new(Arc::new(store), Tz::UTC);
    let result = copier
        .copy(
            &auth,
            CopySchedulesRequest {
                source_channel_id: Some(source.id.to_string()),
                target_channel_id: Some(target.id.to_string()),
                schedule_ids: Some(vec![Uuid::new_v4().to_string()]),
                target_date: Some("2024-06-10".to_string()),
            },
        )
        .await;

    let error = result.unwrap_err();
    assert!(error.is_unexpected());
    assert!(matches!(error, EpgError::Database(_)));
}

#[tokio::test]
async fn test_store_failure_reaches_client_as_generic_error() {
    let mut store = MockStore::new();
    store
        .expect_list_channels()
        .returning(|_| Err(eyre::eyre!("password authentication failed for user postgres")));
    let server = crate::test_utils::server_for(Arc::new(store), Tz::UTC);

    let response = server
        .get("/api/channels")
        .add_header(crate::test_utils::user_header(), crate::test_utils::user("alice"))
        .await;

    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&serde_json::json!({ "error": "Internal server error" }));
}
