use async_trait::async_trait;

use crate::domain::profile::models::UpdateProfileCommand;
use crate::domain::profile::models::UserProfile;
use crate::domain::profile::models::UserStats;
use crate::domain::session::models::SessionHistoryEntry;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for profile reads, updates and participation history.
#[async_trait]
pub trait ProfileServicePort: Send + Sync + 'static {
    /// Full profile of a user, including statistics.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_full_profile(&self, id: &UserId) -> Result<UserProfile, UserError>;

    /// Profile as other users may see it. Callers must not expose the email.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_public_profile(&self, id: &UserId) -> Result<User, UserError>;

    /// Statistics for a user; a user with no bookings gets zeroes.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn calculate_stats(&self, id: &UserId) -> Result<UserStats, UserError>;

    /// Apply a partial update and return the refreshed profile.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<UserProfile, UserError>;

    /// Sessions the user joined, most recent date first and undated last.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn session_history(&self, id: &UserId) -> Result<Vec<SessionHistoryEntry>, UserError>;
}
