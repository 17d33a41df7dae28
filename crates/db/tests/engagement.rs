//! Integration tests for the engagement repository: atomic view/download
//! counters and the like toggle.
//!
//! Exercises the concurrency properties against a real database:
//! - N concurrent views land as exactly +N (no lost updates)
//! - toggling is deterministic under sequential calls
//! - same-user concurrent toggles never double-like
//! - the denormalized counter always equals COUNT(*) of like rows
//! - operations on one content item never affect another
//! - nonexistent content ids mutate nothing

use sqlx::PgPool;

use sakap_db::models::content::CreateContent;
use sakap_db::repositories::{ContentRepo, EngagementRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

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
    .expect("user insert should succeed")
    .id
}

async fn seed_content(pool: &PgPool, title: &str) -> i64 {
    let input = CreateContent {
        title: title.to_string(),
        description: None,
        content_kind: "pdf".to_string(),
        file_path: format!("/library/{title}.pdf"),
    };
    ContentRepo::create(pool, &input, None)
        .await
        .expect("content insert should succeed")
        .id
}

/// Assert the denormalized counter equals the derived COUNT(*).
async fn assert_counter_consistent(pool: &PgPool, content_id: i64) {
    let item = ContentRepo::find_by_id(pool, content_id)
        .await
        .unwrap()
        .expect("content should exist");
    let derived = EngagementRepo::derived_like_count(pool, content_id)
        .await
        .unwrap();
    assert_eq!(
        item.like_count, derived,
        "like_count column must equal COUNT(*) of like rows"
    );
}

// ---------------------------------------------------------------------------
// View / download counters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn concurrent_views_all_land(pool: PgPool) {
    let content_id = seed_content(&pool, "concurrent-views").await;

    const N: usize = 20;
    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..N {
        let pool = pool.clone();
        tasks.spawn(async move { EngagementRepo::record_view(&pool, content_id).await });
    }
    while let Some(result) = tasks.join_next().await {
        let count = result.unwrap().unwrap();
        assert!(count.is_some(), "content exists, view must return a count");
    }

    let item = ContentRepo::find_by_id(&pool, content_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.view_count, N as i64, "every concurrent view must land");
    assert_eq!(item.download_count, 0);
    assert_eq!(item.like_count, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn download_counter_increments(pool: PgPool) {
    let content_id = seed_content(&pool, "downloads").await;

    for expected in 1..=3_i64 {
        let count = EngagementRepo::record_download(&pool, content_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(count, expected);
    }

    // Views are untouched by downloads.
    let item = ContentRepo::find_by_id(&pool, content_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.view_count, 0);
    assert_eq!(item.download_count, 3);
}

#[sqlx::test(migrations = "../../migrations")]
async fn view_on_missing_content_returns_none(pool: PgPool) {
    assert!(EngagementRepo::record_view(&pool, 9999)
        .await
        .unwrap()
        .is_none());
    assert!(EngagementRepo::record_download(&pool, 9999)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Like toggle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn toggle_like_then_unlike(pool: PgPool) {
    let user_id = seed_user(&pool, "toggler").await;
    let content_id = seed_content(&pool, "toggle-me").await;

    let outcome = EngagementRepo::toggle_like(&pool, content_id, user_id)
        .await
        .unwrap()
        .unwrap();
    assert!(outcome.liked_by_user);
    assert_eq!(outcome.like_count, 1);
    assert!(EngagementRepo::has_user_liked(&pool, content_id, user_id)
        .await
        .unwrap());
    assert_counter_consistent(&pool, content_id).await;

    let outcome = EngagementRepo::toggle_like(&pool, content_id, user_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!outcome.liked_by_user);
    assert_eq!(outcome.like_count, 0);
    assert!(!EngagementRepo::has_user_liked(&pool, content_id, user_id)
        .await
        .unwrap());
    assert_counter_consistent(&pool, content_id).await;
}

#[sqlx::test(migrations = "../../migrations")]
async fn even_toggle_count_restores_original_state(pool: PgPool) {
    let user_id = seed_user(&pool, "even-toggler").await;
    let content_id = seed_content(&pool, "even-toggles").await;

    for _ in 0..6 {
        EngagementRepo::toggle_like(&pool, content_id, user_id)
            .await
            .unwrap()
            .unwrap();
    }

    let item = ContentRepo::find_by_id(&pool, content_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.like_count, 0, "even number of toggles must cancel out");
    assert!(!EngagementRepo::has_user_liked(&pool, content_id, user_id)
        .await
        .unwrap());

    // One more flips to liked.
    let outcome = EngagementRepo::toggle_like(&pool, content_id, user_id)
        .await
        .unwrap()
        .unwrap();
    assert!(outcome.liked_by_user);
    assert_eq!(outcome.like_count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn two_users_like_the_same_content(pool: PgPool) {
    let u1 = seed_user(&pool, "liker-one").await;
    let u2 = seed_user(&pool, "liker-two").await;
    let content_id = seed_content(&pool, "popular").await;

    let (a, b) = tokio::join!(
        EngagementRepo::toggle_like(&pool, content_id, u1),
        EngagementRepo::toggle_like(&pool, content_id, u2),
    );
    assert!(a.unwrap().unwrap().liked_by_user);
    assert!(b.unwrap().unwrap().liked_by_user);

    let item = ContentRepo::find_by_id(&pool, content_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.like_count, 2, "both users' likes must land");
    assert_counter_consistent(&pool, content_id).await;
}

#[sqlx::test(migrations = "../../migrations")]
async fn same_user_concurrent_toggles_never_double_like(pool: PgPool) {
    let user_id = seed_user(&pool, "racer").await;
    let content_id = seed_content(&pool, "raced").await;

    // Repeatedly fire a racing pair from an unliked state. Depending on
    // interleaving the pair lands as like+unlike (0) or as a resolved
    // duplicate like (1) -- never as 2, and the counter always matches the
    // membership table.
    for round in 0..10 {
        let (a, b) = tokio::join!(
            EngagementRepo::toggle_like(&pool, content_id, user_id),
            EngagementRepo::toggle_like(&pool, content_id, user_id),
        );
        a.unwrap().unwrap();
        b.unwrap().unwrap();

        let item = ContentRepo::find_by_id(&pool, content_id)
            .await
            .unwrap()
            .unwrap();
        assert!(
            item.like_count <= 1,
            "round {round}: one user can hold at most one like, got {}",
            item.like_count
        );
        assert_counter_consistent(&pool, content_id).await;

        // Reset to unliked for the next round.
        if item.like_count == 1 {
            EngagementRepo::toggle_like(&pool, content_id, user_id)
                .await
                .unwrap()
                .unwrap();
        }
        assert_counter_consistent(&pool, content_id).await;
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn likes_on_different_content_are_independent(pool: PgPool) {
    let user_id = seed_user(&pool, "independent").await;
    let a = seed_content(&pool, "content-a").await;
    let b = seed_content(&pool, "content-b").await;

    // Mutate both items at the same time; neither operation may block on
    // or bleed into the other item's state.
    let (like_a, view_a, view_b) = tokio::join!(
        EngagementRepo::toggle_like(&pool, a, user_id),
        EngagementRepo::record_view(&pool, a),
        EngagementRepo::record_view(&pool, b),
    );
    assert!(like_a.unwrap().unwrap().liked_by_user);
    assert_eq!(view_a.unwrap().unwrap(), 1);
    assert_eq!(view_b.unwrap().unwrap(), 1);

    let item_a = ContentRepo::find_by_id(&pool, a).await.unwrap().unwrap();
    assert_eq!(item_a.like_count, 1);
    assert_eq!(item_a.view_count, 1);

    let item_b = ContentRepo::find_by_id(&pool, b).await.unwrap().unwrap();
    assert_eq!(item_b.like_count, 0);
    assert_eq!(item_b.view_count, 1);
    assert!(!EngagementRepo::has_user_liked(&pool, b, user_id)
        .await
        .unwrap());
    assert_counter_consistent(&pool, a).await;
    assert_counter_consistent(&pool, b).await;
}

#[sqlx::test(migrations = "../../migrations")]
async fn toggle_on_missing_content_mutates_nothing(pool: PgPool) {
    let user_id = seed_user(&pool, "ghost-liker").await;

    let outcome = EngagementRepo::toggle_like(&pool, 424242, user_id)
        .await
        .unwrap();
    assert!(outcome.is_none(), "missing content must report not-found");

    let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM content_likes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0, "no like rows may exist after a failed toggle");
}

#[sqlx::test(migrations = "../../migrations")]
async fn deleting_content_cascades_to_likes(pool: PgPool) {
    let user_id = seed_user(&pool, "cascade").await;
    let content_id = seed_content(&pool, "doomed").await;

    EngagementRepo::toggle_like(&pool, content_id, user_id)
        .await
        .unwrap()
        .unwrap();
    assert!(ContentRepo::delete(&pool, content_id).await.unwrap());

    let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM content_likes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0, "like rows must be deleted with their content");
}
