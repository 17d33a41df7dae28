//! Integration tests for activities and registration.

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use sqlx::PgPool;

use sakap_db::models::activity::{CreateActivity, RegistrationOutcome};
use sakap_db::repositories::{ActivityRepo, UserRepo};

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    UserRepo::create(
        pool,
        username,
        &format!("{username}@example.com"),
        "$argon2id$fake-hash",
        "farmer",
        None,
    )
    .await
    .unwrap()
    .id
}

fn new_activity(title: &str, capacity: Option<i32>) -> CreateActivity {
    CreateActivity {
        title: title.to_string(),
        description: None,
        venue: Some("Municipal Hall".to_string()),
        starts_at: Utc::now() + Duration::days(7),
        ends_at: None,
        capacity,
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn register_and_unregister(pool: PgPool) {
    let user_id = seed_user(&pool, "attendee").await;
    let activity = ActivityRepo::create(&pool, &new_activity("Rice Seminar", None), None)
        .await
        .unwrap();

    let outcome = ActivityRepo::register(&pool, activity.id, user_id)
        .await
        .unwrap()
        .unwrap();
    assert_matches!(outcome, RegistrationOutcome::Registered(_));

    let registrations = ActivityRepo::list_registrations(&pool, activity.id)
        .await
        .unwrap();
    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0].user_id, user_id);

    assert!(ActivityRepo::unregister(&pool, activity.id, user_id)
        .await
        .unwrap());
    assert!(!ActivityRepo::unregister(&pool, activity.id, user_id)
        .await
        .unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_registration_is_absorbed(pool: PgPool) {
    let user_id = seed_user(&pool, "eager").await;
    let activity = ActivityRepo::create(&pool, &new_activity("Composting 101", None), None)
        .await
        .unwrap();

    let first = ActivityRepo::register(&pool, activity.id, user_id)
        .await
        .unwrap()
        .unwrap();
    assert_matches!(first, RegistrationOutcome::Registered(_));

    let second = ActivityRepo::register(&pool, activity.id, user_id)
        .await
        .unwrap()
        .unwrap();
    assert_matches!(second, RegistrationOutcome::AlreadyRegistered);

    let registrations = ActivityRepo::list_registrations(&pool, activity.id)
        .await
        .unwrap();
    assert_eq!(registrations.len(), 1, "duplicate must not add a second row");
}

#[sqlx::test(migrations = "../../migrations")]
async fn capacity_is_enforced(pool: PgPool) {
    let u1 = seed_user(&pool, "first").await;
    let u2 = seed_user(&pool, "second").await;
    let activity = ActivityRepo::create(&pool, &new_activity("Limited Demo", Some(1)), None)
        .await
        .unwrap();

    let first = ActivityRepo::register(&pool, activity.id, u1)
        .await
        .unwrap()
        .unwrap();
    assert_matches!(first, RegistrationOutcome::Registered(_));

    let second = ActivityRepo::register(&pool, activity.id, u2)
        .await
        .unwrap()
        .unwrap();
    assert_matches!(second, RegistrationOutcome::Full);

    // A freed slot can be taken again.
    assert!(ActivityRepo::unregister(&pool, activity.id, u1)
        .await
        .unwrap());
    let retry = ActivityRepo::register(&pool, activity.id, u2)
        .await
        .unwrap()
        .unwrap();
    assert_matches!(retry, RegistrationOutcome::Registered(_));
}

#[sqlx::test(migrations = "../../migrations")]
async fn concurrent_registrations_never_oversell(pool: PgPool) {
    let u1 = seed_user(&pool, "racer-one").await;
    let u2 = seed_user(&pool, "racer-two").await;
    let activity = ActivityRepo::create(&pool, &new_activity("One Slot Only", Some(1)), None)
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        ActivityRepo::register(&pool, activity.id, u1),
        ActivityRepo::register(&pool, activity.id, u2),
    );
    let a = a.unwrap().unwrap();
    let b = b.unwrap().unwrap();

    let registered = [&a, &b]
        .iter()
        .filter(|o| matches!(o, RegistrationOutcome::Registered(_)))
        .count();
    assert_eq!(registered, 1, "exactly one racer may take the last slot");

    let registrations = ActivityRepo::list_registrations(&pool, activity.id)
        .await
        .unwrap();
    assert_eq!(registrations.len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn register_for_missing_activity_returns_none(pool: PgPool) {
    let user_id = seed_user(&pool, "lost").await;
    let result = ActivityRepo::register(&pool, 5555, user_id).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_includes_registration_counts(pool: PgPool) {
    let u1 = seed_user(&pool, "counted-one").await;
    let u2 = seed_user(&pool, "counted-two").await;
    let activity = ActivityRepo::create(&pool, &new_activity("Counted", None), None)
        .await
        .unwrap();
    ActivityRepo::create(&pool, &new_activity("Empty", None), None)
        .await
        .unwrap();

    ActivityRepo::register(&pool, activity.id, u1).await.unwrap();
    ActivityRepo::register(&pool, activity.id, u2).await.unwrap();

    let listed = ActivityRepo::list(&pool).await.unwrap();
    assert_eq!(listed.len(), 2);
    let counted = listed.iter().find(|a| a.id == activity.id).unwrap();
    assert_eq!(counted.registration_count, 2);
    let empty = listed.iter().find(|a| a.id != activity.id).unwrap();
    assert_eq!(empty.registration_count, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn deleting_activity_cascades_to_registrations(pool: PgPool) {
    let user_id = seed_user(&pool, "cascaded").await;
    let activity = ActivityRepo::create(&pool, &new_activity("Doomed", None), None)
        .await
        .unwrap();
    ActivityRepo::register(&pool, activity.id, user_id)
        .await
        .unwrap();

    assert!(ActivityRepo::delete(&pool, activity.id).await.unwrap());

    let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM activity_registrations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}
