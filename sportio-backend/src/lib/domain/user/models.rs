use std::fmt;
use std::str::FromStr;

use auth::TokenPair;
use auth::TokenSubject;
use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::FullNameError;
use crate::user::errors::SkillLevelError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// `password_hash` never leaves the domain; HTTP views are built field by field.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub full_name: FullName,
    pub avatar_url: Option<String>,
    pub avatar_initials: String,
    pub skill_level: SkillLevel,
    pub games_played: i32,
    pub bio: Option<String>,
    pub member_since: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Identity embedded in issued tokens.
    pub fn token_subject(&self) -> TokenSubject {
        TokenSubject {
            user_id: self.id.0,
            email: self.email.as_str().to_string(),
            full_name: self.full_name.as_str().to_string(),
        }
    }
}

/// A user that has not been persisted yet; storage assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
    pub full_name: FullName,
    pub avatar_initials: String,
    pub skill_level: SkillLevel,
    pub games_played: i32,
    pub member_since: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewUser {
    /// Build a fresh account with registration defaults.
    pub fn register(email: EmailAddress, password_hash: String, full_name: FullName) -> Self {
        let now = Utc::now();
        Self {
            avatar_initials: avatar_initials(full_name.as_str()),
            email,
            password_hash,
            full_name,
            skill_level: SkillLevel::Beginner,
            games_played: 0,
            member_since: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the storage-assigned id.
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            password_hash: self.password_hash,
            full_name: self.full_name,
            avatar_url: None,
            avatar_initials: self.avatar_initials,
            skill_level: self.skill_level,
            games_played: self.games_played,
            bio: None,
            member_since: self.member_since,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(UserId(id)),
            _ => Err(UserIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Normalized email address.
///
/// Trimmed and lowercased on construction, then checked against RFC 5322.
/// Two addresses differing only in case or surrounding whitespace compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalize and validate an email address.
    ///
    /// # Errors
    /// * `Empty` - Blank input
    /// * `InvalidFormat` - Normalized value does not conform to RFC 5322
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailError> {
        let normalized = email.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(EmailError::Empty);
        }

        email_address::EmailAddress::from_str(&normalized)
            .map(|_| EmailAddress(normalized))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Trimmed display name, 2 to 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `Empty` - Blank input
    /// * `TooShort` / `TooLong` - Trimmed length out of range
    pub fn new(full_name: impl AsRef<str>) -> Result<Self, FullNameError> {
        let trimmed = full_name.as_ref().trim();
        let length = trimmed.chars().count();

        if length == 0 {
            Err(FullNameError::Empty)
        } else if length < Self::MIN_LENGTH {
            Err(FullNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(FullNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Self-declared playing level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    AllLevels,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::AllLevels => "All levels",
        }
    }
}

impl FromStr for SkillLevel {
    type Err = SkillLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beginner" => Ok(SkillLevel::Beginner),
            "Intermediate" => Ok(SkillLevel::Intermediate),
            "Advanced" => Ok(SkillLevel::Advanced),
            "All levels" => Ok(SkillLevel::AllLevels),
            other => Err(SkillLevelError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width of the `users.avatar_initials` column.
pub const MAX_AVATAR_INITIALS: usize = 4;

/// Derive avatar initials from a full name.
///
/// One word yields its first two characters, several words yield the first
/// character of the first and last word. Always uppercased, then cut to
/// `MAX_AVATAR_INITIALS` since uppercasing can expand a character (`ß` -> `SS`).
pub fn avatar_initials(full_name: &str) -> String {
    let parts: Vec<&str> = full_name.split_whitespace().collect();

    let initials: String = match parts.as_slice() {
        [] => return String::new(),
        [single] => single.chars().take(2).collect(),
        [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
    };

    initials
        .to_uppercase()
        .chars()
        .take(MAX_AVATAR_INITIALS)
        .collect()
}

/// Validated registration input.
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: String,
    pub confirm_password: String,
    pub full_name: FullName,
}

/// Validated login input.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

/// Result of a successful registration or login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_two_words() {
        assert_eq!(avatar_initials("John Doe"), "JD");
    }

    #[test]
    fn test_initials_single_word() {
        assert_eq!(avatar_initials("Madonna"), "MA");
        assert_eq!(avatar_initials("x"), "X");
    }

    #[test]
    fn test_initials_blank() {
        assert_eq!(avatar_initials(""), "");
        assert_eq!(avatar_initials("   "), "");
    }

    #[test]
    fn test_initials_fit_column_when_uppercasing_expands() {
        let ligatures = FullName::new("\u{FB03}\u{FB03}").expect("two characters is a valid name");
        let initials = avatar_initials(ligatures.as_str());
        assert_eq!(initials, "FFIF");
        assert!(initials.chars().count() <= MAX_AVATAR_INITIALS);

        let initials = avatar_initials("\u{FB03}lan \u{DF}mith");
        assert_eq!(initials, "FFIS");
        assert!(initials.chars().count() <= MAX_AVATAR_INITIALS);
    }

    #[test]
    fn test_initials_uses_first_and_last_word() {
        assert_eq!(avatar_initials("  mary   ann  smith "), "MS");
    }

    #[test]
    fn test_email_normalized() {
        let email = EmailAddress::new("  John.Doe@Sportio.COM ").unwrap();
        assert_eq!(email.as_str(), "john.doe@sportio.com");
        assert_eq!(email, EmailAddress::new("john.doe@sportio.com").unwrap());
    }

    #[test]
    fn test_email_rejects_invalid() {
        assert_eq!(EmailAddress::new("   "), Err(EmailError::Empty));
        assert!(matches!(
            EmailAddress::new("invalidemail"),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_full_name_trimmed_and_bounded() {
        assert_eq!(FullName::new("  John Doe ").unwrap().as_str(), "John Doe");
        assert_eq!(FullName::new(" "), Err(FullNameError::Empty));
        assert!(matches!(
            FullName::new("J"),
            Err(FullNameError::TooShort { .. })
        ));
        assert!(matches!(
            FullName::new("a".repeat(256)),
            Err(FullNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_skill_level_round_trip() {
        for level in [
            SkillLevel::Beginner,
            SkillLevel::Intermediate,
            SkillLevel::Advanced,
            SkillLevel::AllLevels,
        ] {
            assert_eq!(level.as_str().parse::<SkillLevel>().unwrap(), level);
        }
        assert!("Expert".parse::<SkillLevel>().is_err());
    }

    #[test]
    fn test_user_id_parsing() {
        assert_eq!(UserId::from_string("42").unwrap(), UserId(42));
        assert!(UserId::from_string("abc").is_err());
        assert!(UserId::from_string("0").is_err());
    }

    #[test]
    fn test_register_defaults() {
        let user = NewUser::register(
            EmailAddress::new("john@sportio.com").unwrap(),
            "$argon2id$hash".to_string(),
            FullName::new("John Doe").unwrap(),
        );
        assert_eq!(user.avatar_initials, "JD");
        assert_eq!(user.skill_level, SkillLevel::Beginner);
        assert_eq!(user.games_played, 0);
        assert_eq!(user.member_since, user.created_at);
        assert_eq!(user.created_at, user.updated_at);
    }
}
