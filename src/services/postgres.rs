use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Duration;
use thiserror::Error;

use crate::core::ledger::{resolve_like, LikeOutcome};
use crate::models::{Achievement, ConnectionStatus, MarketplaceListing, User};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// PostgreSQL client for profiles and the connection ledger
///
/// Owns every query the service runs: profile reads, the discovery feed,
/// and the like/match ledger. Each request borrows a pooled connection for
/// its duration and releases it unconditionally when the future completes.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
        idle_timeout_secs: u64,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool, assuming migrations have already run
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            acquire_timeout_secs.unwrap_or(5),
            idle_timeout_secs.unwrap_or(600),
        )
        .await
    }

    /// Fetch a single user by id
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, PostgresError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Check whether a user id exists
    pub async fn user_exists(&self, user_id: &str) -> Result<bool, PostgresError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Fetch the achievements owned by a user
    pub async fn get_achievements(&self, user_id: &str) -> Result<Vec<Achievement>, PostgresError> {
        let achievements = sqlx::query_as::<_, Achievement>(
            "SELECT * FROM achievements WHERE user_id = $1 ORDER BY date_added DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(achievements)
    }

    /// Fetch the marketplace listings owned by a user
    pub async fn get_marketplace_listings(
        &self,
        user_id: &str,
    ) -> Result<Vec<MarketplaceListing>, PostgresError> {
        let listings = sqlx::query_as::<_, MarketplaceListing>(
            "SELECT * FROM marketplace_listings WHERE user_id = $1 ORDER BY date_added DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(listings)
    }

    /// Record a like from one user toward another
    ///
    /// Returns true when the like completes a mutual match. The reverse-edge
    /// check and the edge writes run inside one transaction, with the reverse
    /// row locked `FOR UPDATE`. Two fresh reciprocal likes can still race past
    /// each other (neither row exists yet to lock), so the pending path
    /// re-checks the reverse edge after commit and promotes both edges when a
    /// concurrent reciprocal like landed. Match detection is therefore
    /// at-least-once under concurrency.
    ///
    /// Repeating a like that is already `liked` or `matched` is idempotent.
    pub async fn record_like(
        &self,
        liker_id: &str,
        liked_id: &str,
    ) -> Result<bool, PostgresError> {
        if liker_id == liked_id {
            return Err(PostgresError::InvalidInput(
                "a user cannot like themselves".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let reverse_status: Option<ConnectionStatus> = sqlx::query_scalar(
            "SELECT status FROM connections WHERE liker_id = $1 AND liked_id = $2 FOR UPDATE",
        )
        .bind(liked_id)
        .bind(liker_id)
        .fetch_optional(&mut *tx)
        .await?;

        match resolve_like(reverse_status) {
            LikeOutcome::Matched => {
                // Resolve both edges so the match is discoverable from
                // either direction.
                sqlx::query(
                    "UPDATE connections SET status = 'matched', updated_at = NOW() \
                     WHERE liker_id = $1 AND liked_id = $2",
                )
                .bind(liked_id)
                .bind(liker_id)
                .execute(&mut *tx)
                .await?;

                upsert_edge(&mut tx, liker_id, liked_id, ConnectionStatus::Matched).await?;
                tx.commit().await?;

                tracing::info!("Match confirmed between {} and {}", liker_id, liked_id);
                Ok(true)
            }
            LikeOutcome::Pending => {
                upsert_edge(&mut tx, liker_id, liked_id, ConnectionStatus::Liked).await?;
                tx.commit().await?;

                // Post-commit re-check for a reciprocal like that raced past
                // the locked read above.
                let reverse_now: Option<ConnectionStatus> = sqlx::query_scalar(
                    "SELECT status FROM connections WHERE liker_id = $1 AND liked_id = $2",
                )
                .bind(liked_id)
                .bind(liker_id)
                .fetch_optional(&self.pool)
                .await?;

                if resolve_like(reverse_now).is_match() {
                    sqlx::query(
                        "UPDATE connections SET status = 'matched', updated_at = NOW() \
                         WHERE (liker_id = $1 AND liked_id = $2) \
                            OR (liker_id = $2 AND liked_id = $1)",
                    )
                    .bind(liker_id)
                    .bind(liked_id)
                    .execute(&self.pool)
                    .await?;

                    tracing::info!(
                        "Match recovered after concurrent reciprocal like: {} and {}",
                        liker_id,
                        liked_id
                    );
                    return Ok(true);
                }

                tracing::debug!("Recorded pending like: {} -> {}", liker_id, liked_id);
                Ok(false)
            }
        }
    }

    /// Fetch all users mutually matched with the given user
    ///
    /// Matches are materialized on both directed edges, but the lookup still
    /// checks both directions so a half-promoted pair remains discoverable.
    pub async fn get_connections(&self, user_id: &str) -> Result<Vec<User>, PostgresError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT DISTINCT u.* FROM users u \
             JOIN connections c \
               ON (c.liker_id = $1 AND c.liked_id = u.id) \
               OR (c.liked_id = $1 AND c.liker_id = u.id) \
             WHERE c.status = 'matched'",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Fetch discovery feed candidates for a user
    ///
    /// Excludes the user themselves and every user they already have an
    /// outgoing edge toward, regardless of status: liked, matched, passed
    /// and blocked all remove a candidate from future discovery. Newest
    /// profiles come first, capped at `limit`.
    ///
    /// Gender-preference and location filtering are not applied here even
    /// though the fields exist on the user record; the product decision on
    /// preference filtering is still open.
    pub async fn get_discovery_profiles(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<User>, PostgresError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users \
             WHERE id <> $1 \
               AND NOT EXISTS ( \
                   SELECT 1 FROM connections c \
                   WHERE c.liker_id = $1 AND c.liked_id = users.id \
               ) \
             ORDER BY created_at DESC \
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!("Discovery feed for {}: {} candidates", user_id, users.len());

        Ok(users)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Insert or update a directed edge inside an open transaction
async fn upsert_edge(
    tx: &mut Transaction<'_, Postgres>,
    liker_id: &str,
    liked_id: &str,
    status: ConnectionStatus,
) -> Result<(), PostgresError> {
    sqlx::query(
        "INSERT INTO connections (liker_id, liked_id, status) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (liker_id, liked_id) \
         DO UPDATE SET status = EXCLUDED.status, updated_at = NOW()",
    )
    .bind(liker_id)
    .bind(liked_id)
    .bind(status)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
