use axum::http::{HeaderName, HeaderValue, StatusCode};
use epg_api::middleware::auth::USER_EMAIL_HEADER;
use chrono_tz::Tz;
use epg_core::models::copy::{CopyProgramsResponse, CopySchedulesResponse};
use epg_db::EpgStore;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{at, user, user_header, TestContext, ALICE, BOB};

#[tokio::test]
async fn test_copy_programs_suffixes_colliding_titles() {
    let ctx = TestContext::new();
    let source = ctx.channel(ALICE, "Source").await;
    let target = ctx.channel(ALICE, "Target").await;
    ctx.program(ALICE, "News", Some(target.id)).await;
    let news = ctx.program(ALICE, "News", Some(source.id)).await;
    let lower_news = ctx.program(ALICE, "news", Some(source.id)).await;
    let weather = ctx.program(ALICE, "Weather", Some(source.id)).await;

    let response = ctx
        .server
        .post("/api/programs/copy")
        .add_header(user_header(), user(ALICE))
        .json(&json!({
            "sourceChannelId": source.id,
            "targetChannelId": target.id,
            "programIds": [news.id, lower_news.id, weather.id],
        }))
        .await;

    response.assert_status_ok();
    let body: CopyProgramsResponse = response.json();
    assert_eq!(body.message, "Programs copied successfully");
    assert_eq!(body.copied_count, 3);

    let titles: Vec<&str> = body.programs.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["News (Copy 1)", "news (Copy 2)", "Weather"]);

    for copy in &body.programs {
        assert_eq!(copy.channel_id, Some(target.id));
        assert_eq!(copy.user_id, ALICE);
        assert_eq!(copy.duration, 30);
        assert_eq!(copy.rating.as_deref(), Some("PG"));
        assert!(![news.id, lower_news.id, weather.id].contains(&copy.id));
    }

    // Sources are untouched
    let news_after = ctx.store.get_program(ALICE, news.id).await.unwrap().unwrap();
    assert_eq!(news_after, news);
}

#[tokio::test]
async fn test_copy_programs_twice_creates_new_copies() {
    let ctx = TestContext::new();
    let source = ctx.channel(ALICE, "Source").await;
    let target = ctx.channel(ALICE, "Target").await;
    let weather = ctx.program(ALICE, "Weather", Some(source.id)).await;

    let request = json!({
        "sourceChannelId": source.id,
        "targetChannelId": target.id,
        "programIds": [weather.id],
    });

    let first: CopyProgramsResponse = ctx
        .server
        .post("/api/programs/copy")
        .add_header(user_header(), user(ALICE))
        .json(&request)
        .await
        .json();
    let second: CopyProgramsResponse = ctx
        .server
        .post("/api/programs/copy")
        .add_header(user_header(), user(ALICE))
        .json(&request)
        .await
        .json();

    assert_eq!(first.programs[0].title, "Weather");
    assert_eq!(second.programs[0].title, "Weather (Copy 1)");
    assert_eq!(ctx.store.list_programs(ALICE).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_copy_programs_skips_unknown_and_foreign_ids() {
    let ctx = TestContext::new();
    let source = ctx.channel(ALICE, "Source").await;
    let target = ctx.channel(ALICE, "Target").await;
    let mine = ctx.program(ALICE, "Mine", Some(source.id)).await;
    let theirs = ctx.program(BOB, "Theirs", None).await;

    let response = ctx
        .server
        .post("/api/programs/copy")
        .add_header(user_header(), user(ALICE))
        .json(&json!({
            "sourceChannelId": source.id,
            "targetChannelId": target.id,
            "programIds": [mine.id, theirs.id, Uuid::new_v4(), "not-a-uuid"],
        }))
        .await;

    response.assert_status_ok();
    let body: CopyProgramsResponse = response.json();
    assert_eq!(body.copied_count, 1);
    assert_eq!(body.programs[0].title, "Mine");
}

#[tokio::test]
async fn test_copy_programs_with_nothing_resolvable_is_not_found() {
    let ctx = TestContext::new();
    let source = ctx.channel(ALICE, "Source").await;
    let target = ctx.channel(ALICE, "Target").await;

    let response = ctx
        .server
        .post("/api/programs/copy")
        .add_header(user_header(), user(ALICE))
        .json(&json!({
            "sourceChannelId": source.id,
            "targetChannelId": target.id,
            "programIds": [],
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "No valid programs found to copy" }));
}

#[tokio::test]
async fn test_copy_programs_onto_same_channel_is_rejected() {
    let ctx = TestContext::new();
    let source = ctx.channel(ALICE, "Source").await;
    let program = ctx.program(ALICE, "News", Some(source.id)).await;

    let response = ctx
        .server
        .post("/api/programs/copy")
        .add_header(user_header(), user(ALICE))
        .json(&json!({
            "sourceChannelId": source.id,
            "targetChannelId": source.id,
            "programIds": [program.id],
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Source and target channels cannot be the same" }));
}

#[tokio::test]
async fn test_copy_programs_requires_every_field() {
    let ctx = TestContext::new();
    let source = ctx.channel(ALICE, "Source").await;

    let response = ctx
        .server
        .post("/api/programs/copy")
        .add_header(user_header(), user(ALICE))
        .json(&json!({ "sourceChannelId": source.id }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "error": "Source channel, target channel, and program IDs are required"
    }));
}

#[tokio::test]
async fn test_copy_programs_into_foreign_channel_is_not_found() {
    let ctx = TestContext::new();
    let source = ctx.channel(ALICE, "Source").await;
    let foreign = ctx.channel(BOB, "Elsewhere").await;
    let program = ctx.program(ALICE, "News", Some(source.id)).await;

    let response = ctx
        .server
        .post("/api/programs/copy")
        .add_header(user_header(), user(ALICE))
        .json(&json!({
            "sourceChannelId": source.id,
            "targetChannelId": foreign.id,
            "programIds": [program.id],
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "One or both channels not found" }));
    assert!(ctx
        .store
        .program_titles_in_channel(BOB, foreign.id)
        .await
        .unwrap()
        .is_empty());
}

#[test_log::test(tokio::test)]
async fn test_copy_schedules_moves_slots_to_target_day() {
    let ctx = TestContext::new();
    let source = ctx.channel(ALICE, "Morning One").await;
    let target = ctx.channel(ALICE, "Morning Two").await;
    let program = ctx.program(ALICE, "News", Some(source.id)).await;
    let slot = ctx
        .schedule(
            ALICE,
            source.id,
            program.id,
            "2024-03-01T14:30:00Z",
            "2024-03-01T15:00:00Z",
        )
        .await;

    let response = ctx
        .server
        .post("/api/schedules/copy")
        .add_header(user_header(), user(ALICE))
        .add_header(
            HeaderName::from_static(USER_EMAIL_HEADER),
            HeaderValue::from_static("alice@example.test"),
        )
        .json(&json!({
            "sourceChannelId": source.id,
            "targetChannelId": target.id,
            "scheduleIds": [slot.id],
            "targetDate": "2024-06-10",
        }))
        .await;

    response.assert_status_ok();
    let body: CopySchedulesResponse = response.json();
    assert_eq!(body.message, "Schedules copied successfully");
    assert_eq!(body.copied_count, 1);

    let copy = &body.schedules[0];
    assert_eq!(copy.channel_id, target.id);
    assert_eq!(copy.program_id, program.id);
    assert_eq!(copy.start_time, at("2024-06-10T14:30:00Z"));
    assert_eq!(copy.end_time, at("2024-06-10T15:00:00Z"));
    assert_eq!(copy.notes.as_deref(), Some("Copied from Morning One"));
    assert_ne!(copy.id, slot.id);
}

#[tokio::test]
async fn test_copy_schedules_keeps_notes_and_recurrence() {
    let ctx = TestContext::new();
    let source = ctx.channel(ALICE, "Source").await;
    let target = ctx.channel(ALICE, "Target").await;
    let program = ctx.program(ALICE, "News", None).await;

    let created = ctx
        .server
        .post("/api/schedules")
        .add_header(user_header(), user(ALICE))
        .json(&json!({
            "channelId": source.id,
            "programId": program.id,
            "startTime": "2024-03-01T22:00:00Z",
            "endTime": "2024-03-02T01:00:00Z",
            "isRecurring": true,
            "recurringDays": "mon,wed",
            "notes": "Late show",
        }))
        .await;
    created.assert_status_ok();
    let created: Value = created.json();
    let schedule_id = created["schedule"]["id"].clone();

    let body: CopySchedulesResponse = ctx
        .server
        .post("/api/schedules/copy")
        .add_header(user_header(), user(ALICE))
        .json(&json!({
            "sourceChannelId": source.id,
            "targetChannelId": target.id,
            "scheduleIds": [schedule_id],
            "targetDate": "2024-06-10T08:00:00Z",
        }))
        .await
        .json();

    let copy = &body.schedules[0];
    assert_eq!(copy.start_time, at("2024-06-10T22:00:00Z"));
    assert_eq!(copy.end_time, at("2024-06-11T01:00:00Z"));
    assert!(copy.is_recurring);
    assert_eq!(copy.recurring_days.as_deref(), Some("mon,wed"));
    assert_eq!(copy.notes.as_deref(), Some("Copied from Source: Late show"));
}

#[tokio::test]
async fn test_copy_schedules_uses_guide_timezone_days() {
    let ctx = TestContext::with_timezone(Tz::Europe__Berlin);
    let source = ctx.channel(ALICE, "Source").await;
    let target = ctx.channel(ALICE, "Target").await;
    let program = ctx.program(ALICE, "News", None).await;
    // 00:30 in Berlin on 2024-03-02, still March 1st in UTC
    let slot = ctx
        .schedule(
            ALICE,
            source.id,
            program.id,
            "2024-03-01T23:30:00Z",
            "2024-03-02T00:00:00Z",
        )
        .await;

    let body: CopySchedulesResponse = ctx
        .server
        .post("/api/schedules/copy")
        .add_header(user_header(), user(ALICE))
        .json(&json!({
            "sourceChannelId": source.id,
            "targetChannelId": target.id,
            "scheduleIds": [slot.id],
            "targetDate": "2024-01-15",
        }))
        .await
        .json();

    assert_eq!(body.schedules[0].start_time, at("2024-01-14T23:30:00Z"));
    assert_eq!(body.schedules[0].end_time, at("2024-01-15T00:00:00Z"));
}

#[tokio::test]
async fn test_copy_schedules_ignores_slots_of_other_channels() {
    let ctx = TestContext::new();
    let source = ctx.channel(ALICE, "Source").await;
    let target = ctx.channel(ALICE, "Target").await;
    let other = ctx.channel(ALICE, "Other").await;
    let program = ctx.program(ALICE, "News", None).await;
    let on_source = ctx
        .schedule(
            ALICE,
            source.id,
            program.id,
            "2024-03-01T10:00:00Z",
            "2024-03-01T10:30:00Z",
        )
        .await;
    let on_other = ctx
        .schedule(
            ALICE,
            other.id,
            program.id,
            "2024-03-01T11:00:00Z",
            "2024-03-01T11:30:00Z",
        )
        .await;

    let body: CopySchedulesResponse = ctx
        .server
        .post("/api/schedules/copy")
        .add_header(user_header(), user(ALICE))
        .json(&json!({
            "sourceChannelId": source.id,
            "targetChannelId": target.id,
            "scheduleIds": [on_source.id, on_other.id],
            "targetDate": "2024-03-05",
        }))
        .await
        .json();

    assert_eq!(body.copied_count, 1);
    assert_eq!(body.schedules[0].start_time, at("2024-03-05T10:00:00Z"));
}

#[tokio::test]
async fn test_copy_schedules_without_matches_is_not_found() {
    let ctx = TestContext::new();
    let source = ctx.channel(ALICE, "Source").await;
    let target = ctx.channel(ALICE, "Target").await;

    let response = ctx
        .server
        .post("/api/schedules/copy")
        .add_header(user_header(), user(ALICE))
        .json(&json!({
            "sourceChannelId": source.id,
            "targetChannelId": target.id,
            "scheduleIds": [Uuid::new_v4()],
            "targetDate": "2024-03-05",
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "No valid schedules found to copy" }));
}

#[tokio::test]
async fn test_copy_schedules_rejects_bad_requests() {
    let ctx = TestContext::new();
    let source = ctx.channel(ALICE, "Source").await;
    let target = ctx.channel(ALICE, "Target").await;

    let missing_date = ctx
        .server
        .post("/api/schedules/copy")
        .add_header(user_header(), user(ALICE))
        .json(&json!({
            "sourceChannelId": source.id,
            "targetChannelId": target.id,
            "scheduleIds": [],
        }))
        .await;
    missing_date.assert_status(StatusCode::BAD_REQUEST);
    missing_date.assert_json(&json!({
        "error": "Source channel, target channel, schedule IDs, and target date are required"
    }));

    let garbage_date = ctx
        .server
        .post("/api/schedules/copy")
        .add_header(user_header(), user(ALICE))
        .json(&json!({
            "sourceChannelId": source.id,
            "targetChannelId": target.id,
            "scheduleIds": [],
            "targetDate": "next tuesday",
        }))
        .await;
    garbage_date.assert_status(StatusCode::BAD_REQUEST);
    garbage_date.assert_json(&json!({ "error": "Invalid target date: next tuesday" }));

    let same_channel = ctx
        .server
        .post("/api/schedules/copy")
        .add_header(user_header(), user(ALICE))
        .json(&json!({
            "sourceChannelId": source.id,
            "targetChannelId": source.id,
            "scheduleIds": [],
            "targetDate": "2024-03-05",
        }))
        .await;
    same_channel.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_copy_schedules_to_unrepresentable_day_is_rejected() {
    let ctx = TestContext::new();
    let source = ctx.channel(ALICE, "Source").await;
    let target = ctx.channel(ALICE, "Target").await;
    let program = ctx.program(ALICE, "News", None).await;
    let slot = ctx
        .schedule(
            ALICE,
            source.id,
            program.id,
            "2024-03-01T23:30:00Z",
            "2024-03-02T00:30:00Z",
        )
        .await;

    let response = ctx
        .server
        .post("/api/schedules/copy")
        .add_header(user_header(), user(ALICE))
        .json(&json!({
            "sourceChannelId": source.id,
            "targetChannelId": target.id,
            "scheduleIds": [slot.id],
            "targetDate": "+262142-12-31",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Invalid target date: +262142-12-31" }));
    assert!(ctx
        .store
        .list_schedules(ALICE)
        .await
        .unwrap()
        .iter()
        .all(|s| s.channel_id == source.id));
}

#[tokio::test]
async fn test_copy_requires_identity() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/schedules/copy")
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({ "error": "Unauthorized" }));
}
