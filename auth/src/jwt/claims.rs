use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Kind of token carried in the `tokenType` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Access => f.write_str("access"),
            TokenType::Refresh => f.write_str("refresh"),
        }
    }
}

/// Identity a token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub user_id: i64,
    pub email: String,
    pub full_name: String,
}

/// Claims embedded in every issued token.
///
/// `sub` carries the email, `iat`/`exp` are Unix timestamps in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: String,
    pub user_id: i64,
    pub email: String,
    pub full_name: String,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject, valid from `issued_at` for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - User the token identifies
    /// * `token_type` - Access or refresh
    /// * `issued_at` - Issue instant
    /// * `ttl` - Lifetime; `exp = issued_at + ttl`
    pub fn new(
        subject: &TokenSubject,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: subject.email.clone(),
            user_id: subject.user_id,
            email: subject.email.clone(),
            full_name: subject.full_name.clone(),
            token_type,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> TokenSubject {
        TokenSubject {
            user_id: 42,
            email: "alex@sportio.com".to_string(),
            full_name: "Alex Smith".to_string(),
        }
    }

    #[test]
    fn test_new_sets_window() {
        let now = Utc::now();
        let claims = Claims::new(&subject(), TokenType::Access, now, Duration::hours(24));

        assert_eq!(claims.sub, "alex@sportio.com");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_serialized_field_names() {
        let claims = Claims::new(
            &subject(),
            TokenType::Refresh,
            Utc::now(),
            Duration::days(7),
        );
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["userId"], 42);
        assert_eq!(value["fullName"], "Alex Smith");
        assert_eq!(value["tokenType"], "refresh");
        assert!(value["iat"].is_i64());
        assert!(value["exp"].is_i64());
    }
}
