//! PostgreSQL repository tests. Require `DATABASE_URL`:
//!
//! ```bash
//! cargo test --test repository_link -- --ignored
//! ```

use chrono::{Duration, Utc};
use linkgate::domain::entities::{NewShortLink, SafetyVerdict};
use linkgate::domain::repositories::LinkRepository;
use linkgate::error::AppError;
use linkgate::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, destination: &str) -> NewShortLink {
    NewShortLink {
        code: code.to_string(),
        destination: destination.to_string(),
        created_at: Utc::now(),
        expires_at: None,
        max_clicks: None,
        password_hash: None,
        safety_verdict: SafetyVerdict::new(0, 1),
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_insert_and_find(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let created = repo
        .insert(NewShortLink {
            max_clicks: Some(5),
            password_hash: Some("$argon2id$hash".to_string()),
            ..new_link("Ab12Cd", "https://example.com")
        })
        .await
        .unwrap();

    assert_eq!(created.click_count, 0);
    assert_eq!(created.safety_verdict, Some(SafetyVerdict::new(0, 1)));

    let found = repo.find_by_code("Ab12Cd").await.unwrap().unwrap();
    assert_eq!(found.destination, "https://example.com");
    assert_eq!(found.max_clicks, Some(5));
    assert!(found.has_password());

    assert!(repo.exists("Ab12Cd").await.unwrap());
    assert!(!repo.exists("Zz99Zz").await.unwrap());
    assert!(repo.find_by_code("Zz99Zz").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_insert_duplicate_code_conflicts(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("Dup001", "https://example.com/a"))
        .await
        .unwrap();
    let result = repo.insert(new_link("Dup001", "https://example.com/b")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_increment_respects_quota(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.insert(NewShortLink {
        max_clicks: Some(2),
        ..new_link("Quota1", "https://example.com")
    })
    .await
    .unwrap();

    assert!(repo.increment_clicks("Quota1").await.unwrap());
    assert!(repo.increment_clicks("Quota1").await.unwrap());
    assert!(!repo.increment_clicks("Quota1").await.unwrap());
    assert!(!repo.increment_clicks("Nope00").await.unwrap());

    let link = repo.find_by_code("Quota1").await.unwrap().unwrap();
    assert_eq!(link.click_count, 2);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_concurrent_increments(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    repo.insert(NewShortLink {
        max_clicks: Some(10),
        ..new_link("Race01", "https://example.com")
    })
    .await
    .unwrap();

    let handles: Vec<_> = (0..25)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_clicks("Race01").await.unwrap() })
        })
        .collect();

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            admitted += 1;
        }
    }

    assert_eq!(admitted, 10);
    let link = repo.find_by_code("Race01").await.unwrap().unwrap();
    assert_eq!(link.click_count, 10);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_find_by_destination_and_delete_stale_codes(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let now = Utc::now();

    repo.insert(NewShortLink {
        created_at: now - Duration::days(2),
        expires_at: Some(now - Duration::days(1)),
        ..new_link("Var001", "https://example.com/shared")
    })
    .await
    .unwrap();
    repo.insert(new_link("Var002", "https://example.com/shared"))
        .await
        .unwrap();
    repo.insert(NewShortLink {
        max_clicks: Some(1),
        ..new_link("Var003", "https://example.com/shared")
    })
    .await
    .unwrap();
    assert!(repo.increment_clicks("Var003").await.unwrap());
    repo.insert(new_link("Other1", "https://example.com/other"))
        .await
        .unwrap();

    let links = repo
        .find_by_destination("https://example.com/shared")
        .await
        .unwrap();
    assert_eq!(links.len(), 3);

    // Var002 is live and must survive even though it is listed.
    let removed = repo
        .delete_stale_codes(
            &[
                "Var001".to_string(),
                "Var002".to_string(),
                "Var003".to_string(),
            ],
            Utc::now(),
        )
        .await
        .unwrap();
    assert_eq!(removed, 2);

    let links = repo
        .find_by_destination("https://example.com/shared")
        .await
        .unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].code, "Var002");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_delete_and_delete_stale(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let now = Utc::now();

    repo.insert(new_link("Keep01", "https://example.com"))
        .await
        .unwrap();
    repo.insert(NewShortLink {
        created_at: now - Duration::days(2),
        expires_at: Some(now - Duration::days(1)),
        ..new_link("Old001", "https://example.com")
    })
    .await
    .unwrap();
    repo.insert(NewShortLink {
        max_clicks: Some(1),
        ..new_link("Full01", "https://example.com")
    })
    .await
    .unwrap();
    assert!(repo.increment_clicks("Full01").await.unwrap());

    assert_eq!(repo.delete_stale(now).await.unwrap(), 2);
    assert_eq!(repo.delete_stale(now).await.unwrap(), 0);

    assert!(repo.delete("Keep01").await.unwrap());
    assert!(!repo.delete("Keep01").await.unwrap());
    repo.ping().await.unwrap();
}
