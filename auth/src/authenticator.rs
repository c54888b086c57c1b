use std::sync::OnceLock;

use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenSubject;
use crate::jwt::TokenType;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Lifetimes of the two token kinds issued per authentication event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::hours(24),
            refresh: Duration::days(7),
        }
    }
}

const UNKNOWN_ACCOUNT_PASSWORD: &str = "unknown-account-placeholder";

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds the signing key and token lifetimes, both fixed for the life of the
/// process.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    lifetimes: TokenLifetimes,
    /// Hash verified for accounts that do not exist, built with the current hasher.
    dummy_hash: OnceLock<String>,
}

/// Tokens handed out after a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    /// Issued alongside the access token; nothing redeems it yet.
    pub refresh_token: String,
    /// Access token lifetime in milliseconds
    pub expires_in: i64,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with the default password hasher.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `lifetimes` - Access and refresh token TTLs
    pub fn new(jwt_secret: &[u8], lifetimes: TokenLifetimes) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            lifetimes,
            dummy_hash: OnceLock::new(),
        }
    }

    /// Replace the password hasher, e.g. to apply a configured cost.
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self.dummy_hash = OnceLock::new();
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is malformed
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity to embed in the tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &TokenSubject,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.verify_password(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_tokens(subject)?)
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Runs one verification against a placeholder hash so the caller takes as
    /// long as it would for a wrong password on a real account.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        let dummy_hash = self.dummy_hash.get_or_init(|| {
            self.password_hasher
                .hash(UNKNOWN_ACCOUNT_PASSWORD)
                .unwrap_or_default()
        });
        let _ = self.verify_password(password, dummy_hash);

        AuthenticationError::InvalidCredentials
    }

    /// Issue an access/refresh token pair without password verification.
    ///
    /// Used right after registration, where the password was just set.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_tokens(&self, subject: &TokenSubject) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.issue_token(subject, TokenType::Access)?,
            refresh_token: self.issue_token(subject, TokenType::Refresh)?,
            expires_in: self.lifetimes.access.num_milliseconds(),
        })
    }

    /// Sign a single token of the given kind with its configured lifetime.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(
        &self,
        subject: &TokenSubject,
        token_type: TokenType,
    ) -> Result<String, JwtError> {
        let ttl = match token_type {
            TokenType::Access => self.lifetimes.access,
            TokenType::Refresh => self.lifetimes.refresh,
        };
        self.issue_token_with_ttl(subject, token_type, ttl)
    }

    /// Sign a token valid for `ttl` from now.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token_with_ttl(
        &self,
        subject: &TokenSubject,
        token_type: TokenType,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(subject, token_type, Utc::now(), ttl);
        self.jwt_handler.encode(&claims)
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, structure or expiry check failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
