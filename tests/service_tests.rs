/// Entity service tests
///
/// CRUD, id allocation and search over the seeded collections
/// Run with: cargo test --test service_tests
use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use support_console::core::FixedClock;
use support_console::models::{
    AppPatch, AppStatus, LogLevel, NewAiLog, NewApp, NewUser, StatusFilter, UserPatch, UserStatus,
};
use support_console::{Console, ConsoleConfig, ConsoleError, EntityKind, EntityService};
use tokio_test::{assert_err, assert_ok};

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap()))
}

fn console() -> Console {
    Console::open(ConsoleConfig::instant().clock(clock())).unwrap()
}

fn empty_console() -> Console {
    Console::open(ConsoleConfig::instant().clock(clock()).empty_store()).unwrap()
}

#[tokio::test]
async fn test_get_all_in_store_order() {
    let console = console();
    let users = console.users().get_all().await;
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    assert_eq!(console.apps().get_all().await.len(), 6);
    assert_eq!(console.ai_logs().get_all().await.len(), 10);
}

#[tokio::test]
async fn test_create_then_get_returns_defaults() {
    let console = console();
    let created = console
        .users()
        .create(NewUser::new("Quinn Harper", "quinn@example.com"))
        .await;

    assert_eq!(created.id, 9);
    let fetched = assert_ok!(console.users().get_by_id(created.id).await);
    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Quinn Harper");
    assert_eq!(fetched.status, UserStatus::Pending);
    assert_eq!(fetched.registration_date, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    assert_eq!(fetched.last_activity, Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap());
}

#[tokio::test]
async fn test_app_and_log_defaults() {
    let console = console();

    let app = console.apps().create(NewApp::new("Reply Drafts", 77)).await;
    assert_eq!(app.id, 7);
    assert_eq!(app.status, AppStatus::Development);
    assert_eq!(app.total_users, 0);

    let log = console
        .ai_logs()
        .create(NewAiLog {
            user: "quinn@example.com".into(),
            app: "Reply Drafts".into(),
            event_type: "Model Inference".into(),
            log_level: LogLevel::Info,
            message: "first draft served".into(),
        })
        .await;
    assert_eq!(log.id, 11);
    assert_eq!(log.timestamp, Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap());
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let console = console();
    let removed = assert_ok!(console.users().delete(3).await);
    assert_eq!(removed.id, 3);

    let err = assert_err!(console.users().get_by_id(3).await);
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "User not found");

    // a second delete has nothing left to remove
    assert_err!(console.users().delete(3).await);
}

#[tokio::test]
async fn test_missing_ids_fail_for_every_keyed_operation() {
    let console = console();
    let expected = ConsoleError::not_found(EntityKind::App, 99);

    assert_eq!(console.apps().get_by_id(99).await, Err(expected.clone()));
    assert_eq!(console.apps().update(99, AppPatch::default()).await, Err(expected.clone()));
    assert_eq!(console.apps().delete(99).await, Err(expected));
}

#[tokio::test]
async fn test_ids_are_max_plus_one() {
    let console = console();
    assert_ok!(console.users().delete(4).await);
    // a gap in the middle is not refilled
    let next = console.users().create(NewUser::new("A", "a@example.com")).await;
    assert_eq!(next.id, 9);

    // removing the maximum frees its id
    assert_ok!(console.users().delete(9).await);
    let again = console.users().create(NewUser::new("B", "b@example.com")).await;
    assert_eq!(again.id, 9);
}

#[tokio::test]
async fn test_empty_collection_starts_at_one() {
    let console = empty_console();
    assert!(console.users().get_all().await.is_empty());
    let first = console.users().create(NewUser::new("First", "first@example.com")).await;
    assert_eq!(first.id, 1);
    let app = console.apps().create(NewApp::new("First App", 50)).await;
    assert_eq!(app.id, 1);
}

#[tokio::test]
async fn test_update_changes_only_named_field() {
    let console = console();
    let before = assert_ok!(console.users().get_by_id(2).await);

    let patch = UserPatch {
        status: Some(UserStatus::Inactive),
        ..UserPatch::default()
    };
    let after = assert_ok!(console.users().update(2, patch).await);

    assert_eq!(after.status, UserStatus::Inactive);
    assert_eq!(after.name, before.name);
    assert_eq!(after.email, before.email);
    assert_eq!(after.registration_date, before.registration_date);
    assert_eq!(after.last_activity, before.last_activity);
    assert_eq!(assert_ok!(console.users().get_by_id(2).await), after);
}

#[tokio::test]
async fn test_returned_records_are_copies() {
    let console = console();
    let mut users = console.users().get_all().await;
    users[0].name = "Mutated".into();
    users.clear();

    let fresh = assert_ok!(console.users().get_by_id(1).await);
    assert_eq!(fresh.name, "Sarah Johnson");
    assert_eq!(console.users().get_all().await.len(), 8);
}

#[tokio::test]
async fn test_raw_ids_are_coerced() {
    let console = console();
    assert_eq!(assert_ok!(console.users().get_by_raw_id("5").await).id, 5);
    assert_eq!(assert_ok!(console.users().get_by_raw_id(" 5abc").await).id, 5);

    let err = assert_err!(console.users().get_by_raw_id("abc").await);
    assert_eq!(err, ConsoleError::not_found(EntityKind::User, "abc"));
}

#[tokio::test]
async fn test_blank_search_returns_everything_in_order() {
    let console = console();
    let all = console.users().get_all().await;
    assert_eq!(console.users().search("", StatusFilter::All).await, all);
    assert_eq!(console.users().search("   ", StatusFilter::All).await, all);
}

#[tokio::test]
async fn test_search_by_exact_email() {
    let console = empty_console();
    console.users().create(NewUser::new("Busy Bee", "busy@example.com")).await;
    console.users().create(NewUser::new("Idle Ida", "idle@example.com")).await;

    let found = console.users().search("busy@example.com", StatusFilter::All).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].email, "busy@example.com");
}

#[tokio::test]
async fn test_search_term_and_status_combine() {
    let console = console();

    // case-insensitive name match
    let chen = console.users().search("CHEN", StatusFilter::All).await;
    assert_eq!(chen.iter().map(|u| u.id).collect::<Vec<_>>(), vec![2]);

    // id substring match
    let sevens = console.users().search("7", StatusFilter::All).await;
    assert!(sevens.iter().any(|u| u.id == 7));

    let active = StatusFilter::Only(UserStatus::Active);
    let example_active = console.users().search("example.com", active).await;
    assert_eq!(example_active.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2, 4]);

    let none = console.users().search("chen", StatusFilter::Only(UserStatus::New)).await;
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let console = empty_console();
    let mut handles = vec![];

    for i in 0..10 {
        let users = Arc::clone(console.users());
        handles.push(tokio::spawn(async move {
            users
                .create(NewUser::new(format!("user{i}"), format!("user{i}@example.com")))
                .await
                .id
        }));
    }

    let mut ids = vec![];
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());
}
