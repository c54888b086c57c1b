use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::session::models::SessionHistoryEntry;
use crate::domain::session::models::SessionId;
use crate::domain::session::ports::SessionRepository;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionHistoryRow {
    session_id: i64,
    sport_type: String,
    title: String,
    date: Option<NaiveDate>,
    time_start: Option<NaiveTime>,
    time_end: Option<NaiveTime>,
    status: String,
    is_host: bool,
    joined_at: DateTime<Utc>,
}

impl From<SessionHistoryRow> for SessionHistoryEntry {
    fn from(row: SessionHistoryRow) -> Self {
        Self {
            session_id: SessionId(row.session_id),
            sport_type: row.sport_type,
            title: row.title,
            date: row.date,
            time_start: row.time_start,
            time_end: row.time_end,
            status: row.status,
            is_host: row.is_host,
            joined_at: row.joined_at,
        }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn count_by_user(&self, user_id: &UserId) -> Result<i64, UserError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM session_players WHERE user_id = $1")
            .bind(user_id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))
    }

    async fn find_history_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SessionHistoryEntry>, UserError> {
        let rows = sqlx::query_as::<_, SessionHistoryRow>(
            r#"
            SELECT s.id AS session_id, s.sport_type, s.title, s.date, s.time_start,
                   s.time_end, s.status, sp.is_host, sp.joined_at
            FROM session_players sp
            JOIN sessions s ON s.id = sp.session_id
            WHERE sp.user_id = $1
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(SessionHistoryEntry::from).collect())
    }
}
