use crate::domain::user::models::FullName;
use crate::domain::user::models::SkillLevel;
use crate::domain::user::models::User;

/// Aggregated activity figures shown on a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub total_bookings: i64,
    /// Always 0.0 until player ratings exist
    pub avg_rating: f64,
    /// Always 0 until friendships exist
    pub friends_count: i64,
}

impl UserStats {
    pub fn from_bookings(total_bookings: i64) -> Self {
        Self {
            total_bookings,
            avg_rating: 0.0,
            friends_count: 0,
        }
    }
}

/// A user together with their statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user: User,
    pub stats: UserStats,
}

/// Partial profile update; `None` leaves a field untouched.
#[derive(Debug, Default)]
pub struct UpdateProfileCommand {
    pub full_name: Option<FullName>,
    pub avatar_url: Option<String>,
    pub skill_level: Option<SkillLevel>,
    pub bio: Option<String>,
}
