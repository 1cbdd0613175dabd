// Database-backed tests for the connection ledger and discovery feed
//
// `#[sqlx::test]` provisions an isolated database per test (from
// DATABASE_URL) and applies ./migrations before handing over the pool.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use vibrai_backend::models::ConnectionStatus;
use vibrai_backend::services::{PostgresClient, PostgresError};

/// Insert a minimal user, `account_age_mins` minutes old
async fn seed_user(pool: &PgPool, id: &str, account_age_mins: i64) {
    sqlx::query("INSERT INTO users (id, name, age, created_at) VALUES ($1, $2, 27, $3)")
        .bind(id)
        .bind(format!("User {}", id))
        .bind(Utc::now() - Duration::minutes(account_age_mins))
        .execute(pool)
        .await
        .unwrap();
}

async fn seed_edge(pool: &PgPool, liker: &str, liked: &str, status: ConnectionStatus) {
    sqlx::query("INSERT INTO connections (liker_id, liked_id, status) VALUES ($1, $2, $3)")
        .bind(liker)
        .bind(liked)
        .bind(status)
        .execute(pool)
        .await
        .unwrap();
}

async fn edge_status(pool: &PgPool, liker: &str, liked: &str) -> Option<ConnectionStatus> {
    sqlx::query_scalar("SELECT status FROM connections WHERE liker_id = $1 AND liked_id = $2")
        .bind(liker)
        .bind(liked)
        .fetch_optional(pool)
        .await
        .unwrap()
}

async fn edge_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM connections")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test]
async fn test_like_then_reciprocal_like_reports_match(pool: PgPool) {
    seed_user(&pool, "ana", 10).await;
    seed_user(&pool, "luis", 20).await;
    let client = PostgresClient::from_pool(pool.clone());

    let first = client.record_like("ana", "luis").await.unwrap();
    assert!(!first, "first like must not report a match");

    let second = client.record_like("luis", "ana").await.unwrap();
    assert!(second, "reciprocal like must report a match");

    // Both directed edges end up matched
    assert_eq!(
        edge_status(&pool, "ana", "luis").await,
        Some(ConnectionStatus::Matched)
    );
    assert_eq!(
        edge_status(&pool, "luis", "ana").await,
        Some(ConnectionStatus::Matched)
    );
}

#[sqlx::test]
async fn test_self_like_fails_without_writing(pool: PgPool) {
    seed_user(&pool, "ana", 10).await;
    let client = PostgresClient::from_pool(pool.clone());

    let result = client.record_like("ana", "ana").await;
    assert!(matches!(result, Err(PostgresError::InvalidInput(_))));
    assert_eq!(edge_count(&pool).await, 0);
}

#[sqlx::test]
async fn test_repeated_like_is_idempotent(pool: PgPool) {
    seed_user(&pool, "ana", 10).await;
    seed_user(&pool, "luis", 20).await;
    let client = PostgresClient::from_pool(pool.clone());

    assert!(!client.record_like("ana", "luis").await.unwrap());
    // Repeating the like must not error or duplicate the edge
    assert!(!client.record_like("ana", "luis").await.unwrap());

    assert_eq!(edge_count(&pool).await, 1);
    assert_eq!(
        edge_status(&pool, "ana", "luis").await,
        Some(ConnectionStatus::Liked)
    );
}

#[sqlx::test]
async fn test_like_after_match_stays_matched(pool: PgPool) {
    seed_user(&pool, "ana", 10).await;
    seed_user(&pool, "luis", 20).await;
    let client = PostgresClient::from_pool(pool.clone());

    client.record_like("ana", "luis").await.unwrap();
    client.record_like("luis", "ana").await.unwrap();

    // A like on an already-matched pair reports the match again
    assert!(client.record_like("ana", "luis").await.unwrap());
    assert_eq!(
        edge_status(&pool, "luis", "ana").await,
        Some(ConnectionStatus::Matched)
    );
}

#[sqlx::test]
async fn test_like_after_pass_does_not_match(pool: PgPool) {
    seed_user(&pool, "ana", 10).await;
    seed_user(&pool, "luis", 20).await;
    seed_edge(&pool, "ana", "luis", ConnectionStatus::Passed).await;
    let client = PostgresClient::from_pool(pool.clone());

    assert!(!client.record_like("luis", "ana").await.unwrap());
    assert_eq!(
        edge_status(&pool, "luis", "ana").await,
        Some(ConnectionStatus::Liked)
    );
}

#[sqlx::test]
async fn test_connections_empty_until_reciprocal(pool: PgPool) {
    seed_user(&pool, "ana", 10).await;
    seed_user(&pool, "luis", 20).await;
    let client = PostgresClient::from_pool(pool.clone());

    client.record_like("ana", "luis").await.unwrap();
    assert!(client.get_connections("ana").await.unwrap().is_empty());
    assert!(client.get_connections("luis").await.unwrap().is_empty());

    client.record_like("luis", "ana").await.unwrap();

    let ana_connections = client.get_connections("ana").await.unwrap();
    assert_eq!(ana_connections.len(), 1);
    assert_eq!(ana_connections[0].id, "luis");

    let luis_connections = client.get_connections("luis").await.unwrap();
    assert_eq!(luis_connections.len(), 1);
    assert_eq!(luis_connections[0].id, "ana");
}

#[sqlx::test]
async fn test_discovery_excludes_self_and_every_edge_status(pool: PgPool) {
    seed_user(&pool, "ana", 10).await;
    seed_user(&pool, "luis", 20).await;
    seed_user(&pool, "eva", 30).await;
    seed_user(&pool, "mar", 40).await;
    seed_user(&pool, "leo", 50).await;

    seed_edge(&pool, "ana", "luis", ConnectionStatus::Liked).await;
    seed_edge(&pool, "ana", "eva", ConnectionStatus::Passed).await;
    seed_edge(&pool, "ana", "mar", ConnectionStatus::Blocked).await;

    let client = PostgresClient::from_pool(pool.clone());
    let feed = client.get_discovery_profiles("ana", 20).await.unwrap();

    let ids: Vec<&str> = feed.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["leo"]);
}

#[sqlx::test]
async fn test_discovery_orders_newest_first_and_caps(pool: PgPool) {
    seed_user(&pool, "ana", 10).await;
    seed_user(&pool, "oldest", 300).await;
    seed_user(&pool, "middle", 200).await;
    seed_user(&pool, "newest", 100).await;

    let client = PostgresClient::from_pool(pool.clone());
    let feed = client.get_discovery_profiles("ana", 2).await.unwrap();

    let ids: Vec<&str> = feed.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["newest", "middle"]);
}

#[sqlx::test]
async fn test_discovery_with_no_prior_edges_returns_everyone_else(pool: PgPool) {
    seed_user(&pool, "current_user", 10).await;
    seed_user(&pool, "match1", 20).await;
    seed_user(&pool, "match2", 30).await;

    let client = PostgresClient::from_pool(pool.clone());
    let feed = client.get_discovery_profiles("current_user", 20).await.unwrap();

    let mut ids: Vec<&str> = feed.iter().map(|u| u.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["match1", "match2"]);
}
