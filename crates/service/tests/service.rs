//! End-to-end service tests over the in-memory store.
//!
//! Exercises the full raffle lifecycle and the data-integrity guarantees:
//! shortcode uniqueness, at-most-once registration, draw-pool correctness,
//! empty-pool and authorization failures.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::{collections::BTreeSet, sync::Arc};

use parking_lot::Mutex;
use raffle_service::{RaffleError, RaffleService, ShortcodeGenerator};
use raffle_store::MemoryStore;
use raffle_types::RaffleConfig;

fn admins(emails: &[&str]) -> BTreeSet<String> {
    emails.iter().map(|email| email.to_string()).collect()
}

fn service() -> RaffleService<MemoryStore> {
    service_over(MemoryStore::new())
}

fn service_over(store: MemoryStore) -> RaffleService<MemoryStore> {
    RaffleService::new(Arc::new(store), RaffleConfig::default())
}

/// Generator that always returns the same candidate, to force collisions.
struct FixedShortcode(&'static str);

impl ShortcodeGenerator for FixedShortcode {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

/// Generator that replays a scripted list of candidates.
struct SequenceShortcode(Mutex<Vec<&'static str>>);

impl SequenceShortcode {
    fn new(codes: &[&'static str]) -> Self {
        Self(Mutex::new(codes.to_vec()))
    }
}

impl ShortcodeGenerator for SequenceShortcode {
    fn generate(&self) -> String {
        self.0.lock().remove(0).to_string()
    }
}

/// The lifecycle scenario: create, register twice, reject the duplicate,
/// draw as admin, reject the outsider's draw.
#[tokio::test]
async fn test_full_raffle_lifecycle() {
    let service = service();
    let shortcode =
        service.create_raffle("Spring Draw", "desc", admins(&["a@x.com"])).await.unwrap();

    service.register_for_raffle(&shortcode, "b@x.com").await.unwrap();
    service.register_for_raffle(&shortcode, "c@x.com").await.unwrap();

    let err = service.register_for_raffle(&shortcode, "b@x.com").await.unwrap_err();
    assert!(matches!(err, RaffleError::AlreadyRegistered { .. }), "got: {err}");

    let result = service.draw_winner(&shortcode, "a@x.com").await.unwrap();
    let mut pool = result.entries.clone();
    pool.sort();
    assert_eq!(pool, vec!["b@x.com".to_string(), "c@x.com".to_string()]);
    assert!(result.entries.contains(&result.winner), "winner must come from the pool");

    let err = service.draw_winner(&shortcode, "z@z.com").await.unwrap_err();
    assert!(matches!(err, RaffleError::NotAuthorized { .. }), "got: {err}");

    // The persisted winner matches the draw result.
    let view = service.get_raffle(&shortcode, None).await.unwrap();
    assert_eq!(view.winner, Some(result.winner));
}

/// Concurrent creations that generate the same candidate resolve to exactly
/// one winner; all losers observe a collision.
#[tokio::test]
async fn test_concurrent_creations_with_same_candidate() {
    let config = RaffleConfig::builder().create_attempts(1).build().unwrap();
    let service = Arc::new(RaffleService::with_generator(
        Arc::new(MemoryStore::new()),
        Arc::new(FixedShortcode("same1234")),
        config,
    ));

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service.create_raffle("Race", "", admins(&["a@x.com"])).await
            })
        })
        .collect();

    let mut successes = 0;
    let mut collisions = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(shortcode) => {
                assert_eq!(shortcode, "same1234");
                successes += 1;
            },
            Err(RaffleError::ShortcodeCollision { .. }) => collisions += 1,
            Err(err) => panic!("unexpected error: {err}"),
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(collisions, 3);
}

/// A collision consumes one attempt; the next candidate goes through.
#[tokio::test]
async fn test_create_retries_on_collision() {
    let generator = Arc::new(SequenceShortcode::new(&["aaaa1111", "aaaa1111", "bbbb2222"]));
    let service = RaffleService::with_generator(
        Arc::new(MemoryStore::new()),
        generator,
        RaffleConfig::default(),
    );

    let first = service.create_raffle("First", "", admins(&["a@x.com"])).await.unwrap();
    assert_eq!(first, "aaaa1111");

    // Second creation hits the taken candidate once, then succeeds.
    let second = service.create_raffle("Second", "", admins(&["a@x.com"])).await.unwrap();
    assert_eq!(second, "bbbb2222");
}

/// Once the attempt budget is spent the collision propagates to the caller.
#[tokio::test]
async fn test_create_gives_up_after_attempt_budget() {
    let config = RaffleConfig::builder().create_attempts(2).build().unwrap();
    let service = RaffleService::with_generator(
        Arc::new(MemoryStore::new()),
        Arc::new(FixedShortcode("stuck123")),
        config,
    );

    service.create_raffle("First", "", admins(&["a@x.com"])).await.unwrap();
    let err = service.create_raffle("Second", "", admins(&["a@x.com"])).await.unwrap_err();
    assert!(matches!(err, RaffleError::ShortcodeCollision { .. }), "got: {err}");
}

#[tokio::test]
async fn test_create_rejects_empty_admins() {
    let err = service().create_raffle("Spring Draw", "", BTreeSet::new()).await.unwrap_err();
    assert!(matches!(err, RaffleError::InvalidArgument { .. }), "got: {err}");
}

#[tokio::test]
async fn test_create_rejects_malformed_admin_email() {
    let err =
        service().create_raffle("Spring Draw", "", admins(&["not-an-email"])).await.unwrap_err();
    assert!(matches!(err, RaffleError::InvalidArgument { .. }), "got: {err}");
}

#[tokio::test]
async fn test_register_for_missing_raffle() {
    let err = service().register_for_raffle("ghost123", "a@x.com").await.unwrap_err();
    assert!(matches!(err, RaffleError::RaffleNotFound { .. }), "got: {err}");
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let service = service();
    let shortcode = service.create_raffle("Draw", "", admins(&["a@x.com"])).await.unwrap();
    let err = service.register_for_raffle(&shortcode, "no-at-sign").await.unwrap_err();
    assert!(matches!(err, RaffleError::InvalidArgument { .. }), "got: {err}");
}

/// Draw-pool correctness with the store forced into many small pages: the
/// pool equals every successful registration, and the winner comes from it.
#[tokio::test]
async fn test_draw_pool_is_exactly_the_registered_set() {
    let service = service_over(MemoryStore::with_page_size(4));
    let shortcode = service.create_raffle("Big Draw", "", admins(&["a@x.com"])).await.unwrap();

    let registered: Vec<String> = (0..25).map(|i| format!("user{i:02}@x.com")).collect();
    for email in &registered {
        service.register_for_raffle(&shortcode, email).await.unwrap();
    }
    // Failed duplicates must not enter the pool.
    let _ = service.register_for_raffle(&shortcode, "user00@x.com").await.unwrap_err();

    let result = service.draw_winner(&shortcode, "a@x.com").await.unwrap();
    let mut pool = result.entries.clone();
    pool.sort();
    assert_eq!(pool, registered);
    assert!(result.entries.contains(&result.winner));
}

/// Empty pool: the draw fails and no winner is persisted.
#[tokio::test]
async fn test_draw_with_no_entries() {
    let service = service();
    let shortcode = service.create_raffle("Lonely", "", admins(&["a@x.com"])).await.unwrap();

    let err = service.draw_winner(&shortcode, "a@x.com").await.unwrap_err();
    assert!(matches!(err, RaffleError::NoEntries { .. }), "got: {err}");

    let view = service.get_raffle(&shortcode, None).await.unwrap();
    assert!(view.winner.is_none(), "failed draw must not set a winner");
}

/// Authorization is checked before the pool, so an outsider is rejected no
/// matter what the entry table holds.
#[tokio::test]
async fn test_draw_requires_admin_regardless_of_pool() {
    let service = service();
    let shortcode = service.create_raffle("Guarded", "", admins(&["a@x.com"])).await.unwrap();

    let err = service.draw_winner(&shortcode, "z@z.com").await.unwrap_err();
    assert!(matches!(err, RaffleError::NotAuthorized { .. }), "got: {err}");

    service.register_for_raffle(&shortcode, "b@x.com").await.unwrap();
    let err = service.draw_winner(&shortcode, "z@z.com").await.unwrap_err();
    assert!(matches!(err, RaffleError::NotAuthorized { .. }), "got: {err}");

    // An empty requester email is rejected too, even if the admin set were
    // corrupted to contain one.
    let err = service.draw_winner(&shortcode, "").await.unwrap_err();
    assert!(matches!(err, RaffleError::NotAuthorized { .. }), "got: {err}");
}

#[tokio::test]
async fn test_draw_on_missing_raffle() {
    let err = service().draw_winner("ghost123", "a@x.com").await.unwrap_err();
    assert!(matches!(err, RaffleError::RaffleNotFound { .. }), "got: {err}");
}

/// Re-drawing is permitted and overwrites the previous winner. Pinned so a
/// future draw-once guard is a deliberate change.
#[tokio::test]
async fn test_redraw_overwrites_winner() {
    let service = service();
    let shortcode = service.create_raffle("Again", "", admins(&["a@x.com"])).await.unwrap();
    service.register_for_raffle(&shortcode, "b@x.com").await.unwrap();

    let first = service.draw_winner(&shortcode, "a@x.com").await.unwrap();
    assert_eq!(first.winner, "b@x.com");

    service.register_for_raffle(&shortcode, "c@x.com").await.unwrap();
    let second = service.draw_winner(&shortcode, "a@x.com").await.unwrap();
    assert_eq!(second.entries.len(), 2);
    assert!(second.entries.contains(&second.winner));

    let view = service.get_raffle(&shortcode, None).await.unwrap();
    assert_eq!(view.winner, Some(second.winner));
}

#[tokio::test]
async fn test_view_flags_for_admin_viewer() {
    let service = service();
    let shortcode = service.create_raffle("Viewed", "", admins(&["a@x.com"])).await.unwrap();

    let view = service.get_raffle(&shortcode, Some("a@x.com")).await.unwrap();
    assert!(view.admin);
    assert!(!view.is_registered, "admins are not registered until they enter");
}

#[tokio::test]
async fn test_view_flags_for_registered_viewer() {
    let service = service();
    let shortcode = service.create_raffle("Viewed", "", admins(&["a@x.com"])).await.unwrap();
    service.register_for_raffle(&shortcode, "b@x.com").await.unwrap();

    let view = service.get_raffle(&shortcode, Some("b@x.com")).await.unwrap();
    assert!(!view.admin);
    assert!(view.is_registered);
}

#[tokio::test]
async fn test_view_flags_for_anonymous_viewer() {
    let service = service();
    let shortcode = service.create_raffle("Viewed", "", admins(&["a@x.com"])).await.unwrap();

    for viewer in [None, Some("")] {
        let view = service.get_raffle(&shortcode, viewer).await.unwrap();
        assert!(!view.admin);
        assert!(!view.is_registered);
    }
}

#[tokio::test]
async fn test_view_of_missing_raffle() {
    let err = service().get_raffle("ghost123", Some("a@x.com")).await.unwrap_err();
    assert!(matches!(err, RaffleError::RaffleNotFound { .. }), "got: {err}");
}

#[tokio::test]
async fn test_list_raffles_newest_first_with_limit() {
    let service = service();
    for name in ["first", "second", "third"] {
        service.create_raffle(name, "", admins(&["a@x.com"])).await.unwrap();
    }

    let all = service.list_raffles(None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].name, "third");
    assert!(all.iter().all(|view| !view.admin && !view.is_registered));

    let limited = service.list_raffles(Some(2)).await.unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].name, "third");
    assert_eq!(limited[1].name, "second");
}
