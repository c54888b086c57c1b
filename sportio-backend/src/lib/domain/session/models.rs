use std::cmp::Ordering;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::Utc;

/// Session unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub i64);

/// One session a user took part in, joined with their participation row.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionHistoryEntry {
    pub session_id: SessionId,
    pub sport_type: String,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub time_start: Option<NaiveTime>,
    pub time_end: Option<NaiveTime>,
    pub status: String,
    pub is_host: bool,
    pub joined_at: DateTime<Utc>,
}

/// Most recent session date first, undated sessions last.
pub fn sort_most_recent_first(entries: &mut [SessionHistoryEntry]) {
    entries.sort_by(|a, b| match (a.date, b.date) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => b.cmp(&a),
    });
}
