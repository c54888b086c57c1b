//! Serializable views of domain types for the HTTP layer.
//!
//! None of these carry the password hash; the public view also drops the email.
use auth::TokenPair;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::profile::models::UserProfile;
use crate::domain::profile::models::UserStats;
use crate::domain::session::models::SessionHistoryEntry;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::User;

/// User as its owner sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub avatar_initials: String,
    pub skill_level: String,
    pub games_played: i32,
    pub bio: Option<String>,
    pub member_since: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
            full_name: user.full_name.as_str().to_string(),
            avatar_url: user.avatar_url.clone(),
            avatar_initials: user.avatar_initials.clone(),
            skill_level: user.skill_level.as_str().to_string(),
            games_played: user.games_played,
            bio: user.bio.clone(),
            member_since: user.member_since,
        }
    }
}

/// User as anyone else sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfileData {
    pub id: i64,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub avatar_initials: String,
    pub skill_level: String,
    pub games_played: i32,
    pub bio: Option<String>,
    pub member_since: DateTime<Utc>,
}

impl From<&User> for PublicProfileData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            full_name: user.full_name.as_str().to_string(),
            avatar_url: user.avatar_url.clone(),
            avatar_initials: user.avatar_initials.clone(),
            skill_level: user.skill_level.as_str().to_string(),
            games_played: user.games_played,
            bio: user.bio.clone(),
            member_since: user.member_since,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    pub total_bookings: i64,
    pub avg_rating: f64,
    pub friends_count: i64,
}

impl From<&UserStats> for StatsData {
    fn from(stats: &UserStats) -> Self {
        Self {
            total_bookings: stats.total_bookings,
            avg_rating: stats.avg_rating,
            friends_count: stats.friends_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    #[serde(flatten)]
    pub user: UserData,
    pub stats: StatsData,
}

impl From<&UserProfile> for ProfileData {
    fn from(profile: &UserProfile) -> Self {
        Self {
            user: (&profile.user).into(),
            stats: (&profile.stats).into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHistoryData {
    pub session_id: i64,
    pub sport_type: String,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub time_start: Option<NaiveTime>,
    pub time_end: Option<NaiveTime>,
    pub status: String,
    pub is_host: bool,
    pub joined_at: DateTime<Utc>,
}

impl From<&SessionHistoryEntry> for SessionHistoryData {
    fn from(entry: &SessionHistoryEntry) -> Self {
        Self {
            session_id: entry.session_id.0,
            sport_type: entry.sport_type.clone(),
            title: entry.title.clone(),
            date: entry.date,
            time_start: entry.time_start,
            time_end: entry.time_end,
            status: entry.status.clone(),
            is_host: entry.is_host,
            joined_at: entry.joined_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseData {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in milliseconds
    pub expires_in: i64,
    pub user: UserData,
}

impl From<&AuthSession> for AuthResponseData {
    fn from(session: &AuthSession) -> Self {
        let TokenPair {
            access_token,
            refresh_token,
            expires_in,
        } = session.tokens.clone();

        Self {
            access_token,
            refresh_token,
            expires_in,
            user: (&session.user).into(),
        }
    }
}
