use async_trait::async_trait;

use crate::domain::session::models::SessionHistoryEntry;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Read access to session participation records.
#[async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// Count every session the user has joined.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn count_by_user(&self, user_id: &UserId) -> Result<i64, UserError>;

    /// Sessions the user has joined, with their participation details.
    ///
    /// No ordering is guaranteed.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_history_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SessionHistoryEntry>, UserError>;
}
