//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, SafetyVerdict, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "code, destination, created_at, expires_at, max_clicks, click_count, \
     password_hash, safety_malicious, safety_suspicious";

/// PostgreSQL repository for link storage and retrieval.
///
/// Code uniqueness comes from the primary key; click counting is a single
/// guarded `UPDATE`, so neither relies on a prior read.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    code: String,
    destination: String,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    max_clicks: Option<i64>,
    click_count: i64,
    password_hash: Option<String>,
    safety_malicious: Option<i32>,
    safety_suspicious: Option<i32>,
}

impl From<LinkRow> for ShortLink {
    fn from(row: LinkRow) -> Self {
        let safety_verdict = match (row.safety_malicious, row.safety_suspicious) {
            (None, None) => None,
            (malicious, suspicious) => Some(SafetyVerdict::new(
                malicious.unwrap_or(0).max(0) as u32,
                suspicious.unwrap_or(0).max(0) as u32,
            )),
        };

        ShortLink {
            code: row.code,
            destination: row.destination,
            created_at: row.created_at,
            expires_at: row.expires_at,
            max_clicks: row.max_clicks,
            click_count: row.click_count,
            password_hash: row.password_hash,
            safety_verdict,
        }
    }
}

fn to_db_count(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let sql = format!(
            r#"
            INSERT INTO links
                (code, destination, created_at, expires_at, max_clicks,
                 password_hash, safety_malicious, safety_suspicious)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {LINK_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(&new_link.code)
            .bind(&new_link.destination)
            .bind(new_link.created_at)
            .bind(new_link.expires_at)
            .bind(new_link.max_clicks)
            .bind(&new_link.password_hash)
            .bind(to_db_count(new_link.safety_verdict.malicious))
            .bind(to_db_count(new_link.safety_verdict.suspicious))
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE code = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM links WHERE code = $1)")
                .bind(code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn find_by_destination(&self, destination: &str) -> Result<Vec<ShortLink>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE destination = $1 ORDER BY created_at, code"
        );

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(destination)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(ShortLink::from).collect())
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET click_count = click_count + 1
            WHERE code = $1
              AND (max_clicks IS NULL OR click_count < max_clicks)
            "#,
        )
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_stale_codes(
        &self,
        codes: &[String],
        now: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        if codes.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            DELETE FROM links
            WHERE code = ANY($1)
              AND ((expires_at IS NOT NULL AND expires_at < $2)
                OR (max_clicks IS NOT NULL AND click_count >= max_clicks))
            "#,
        )
        .bind(codes)
        .bind(now)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_stale(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM links
            WHERE (expires_at IS NOT NULL AND expires_at < $1)
               OR (max_clicks IS NOT NULL AND click_count >= max_clicks)
            "#,
        )
        .bind(now)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
