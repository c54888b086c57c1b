use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::profile::models::UpdateProfileCommand;
use crate::domain::profile::models::UserProfile;
use crate::domain::profile::models::UserStats;
use crate::domain::profile::ports::ProfileServicePort;
use crate::domain::session::models::sort_most_recent_first;
use crate::domain::session::models::SessionHistoryEntry;
use crate::domain::session::ports::SessionRepository;
use crate::domain::user::models::avatar_initials;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Domain service for profile and history operations.
pub struct ProfileService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    users: Arc<UR>,
    sessions: Arc<SR>,
}

impl<UR, SR> ProfileService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    pub fn new(users: Arc<UR>, sessions: Arc<SR>) -> Self {
        Self { users, sessions }
    }

    async fn require_user(&self, id: &UserId) -> Result<User, UserError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<UR, SR> ProfileServicePort for ProfileService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    async fn get_full_profile(&self, id: &UserId) -> Result<UserProfile, UserError> {
        tracing::info!(user_id = %id, "Fetching full profile");

        let user = self.require_user(id).await?;
        let stats = self.calculate_stats(id).await?;

        Ok(UserProfile { user, stats })
    }

    async fn get_public_profile(&self, id: &UserId) -> Result<User, UserError> {
        tracing::info!(user_id = %id, "Fetching public profile");
        self.require_user(id).await
    }

    async fn calculate_stats(&self, id: &UserId) -> Result<UserStats, UserError> {
        tracing::debug!(user_id = %id, "Calculating stats");

        let total_bookings = self.sessions.count_by_user(id).await?;
        Ok(UserStats::from_bookings(total_bookings))
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<UserProfile, UserError> {
        tracing::info!(user_id = %id, "Updating profile");

        let mut user = self.require_user(id).await?;

        if let Some(full_name) = command.full_name {
            user.avatar_initials = avatar_initials(full_name.as_str());
            user.full_name = full_name;
        }

        if let Some(avatar_url) = command.avatar_url {
            user.avatar_url = Some(avatar_url);
        }

        if let Some(skill_level) = command.skill_level {
            user.skill_level = skill_level;
        }

        if let Some(bio) = command.bio {
            user.bio = Some(bio);
        }

        user.updated_at = Utc::now();

        let user = self.users.update(user).await?;
        let stats = self.calculate_stats(id).await?;

        Ok(UserProfile { user, stats })
    }

    async fn session_history(&self, id: &UserId) -> Result<Vec<SessionHistoryEntry>, UserError> {
        tracing::debug!(user_id = %id, "Fetching session history");

        let mut entries = self.sessions.find_history_by_user(id).await?;
        sort_most_recent_first(&mut entries);

        Ok(entries)
    }
}
