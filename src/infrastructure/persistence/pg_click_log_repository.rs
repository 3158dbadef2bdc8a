//! PostgreSQL implementation of click log repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ClickLog, NewClickLog};
use crate::domain::repositories::ClickLogRepository;
use crate::error::AppError;

/// PostgreSQL repository for distinct-visitor click logs.
///
/// Deduplication is enforced by the `click_logs_link_ip_key` unique constraint
/// together with `ON CONFLICT DO NOTHING`.
pub struct PgClickLogRepository {
    pool: Arc<PgPool>,
}

impl PgClickLogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ClickLogRow {
    id: i64,
    short_link_id: i64,
    ip_address: String,
    user_agent: Option<String>,
    clicked_at: DateTime<Utc>,
}

#[async_trait]
impl ClickLogRepository for PgClickLogRepository {
    async fn record_if_absent(&self, new_log: NewClickLog) -> Result<bool, AppError> {
        let link_id = new_log.short_link_id;

        let result = sqlx::query(
            r#"
            INSERT INTO click_logs (short_link_id, ip_address, user_agent, clicked_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (short_link_id, ip_address) DO NOTHING
            "#,
        )
        .bind(new_log.short_link_id)
        .bind(new_log.ip_address)
        .bind(new_log.user_agent)
        .bind(new_log.clicked_at)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| {
            let missing_link = e
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation());
            if missing_link {
                AppError::bad_request(
                    "Short link does not exist",
                    json!({ "short_link_id": link_id }),
                )
            } else {
                AppError::from(e)
            }
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn count_for_link(&self, short_link_id: i64) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM click_logs WHERE short_link_id = $1")
                .bind(short_link_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn list_for_link(
        &self,
        short_link_id: i64,
        limit: i64,
    ) -> Result<Vec<ClickLog>, AppError> {
        let rows = sqlx::query_as::<_, ClickLogRow>(
            r#"
            SELECT id, short_link_id, ip_address, user_agent, clicked_at
            FROM click_logs
            WHERE short_link_id = $1
            ORDER BY clicked_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(short_link_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ClickLog {
                id: r.id,
                short_link_id: r.short_link_id,
                ip_address: r.ip_address,
                user_agent: r.user_agent,
                clicked_at: r.clicked_at,
            })
            .collect())
    }
}
