//! Authentication utilities library
//!
//! Provides the credential and token primitives the backend is built on:
//! - Password hashing (Argon2id, configurable cost)
//! - JWT access/refresh token issuance and validation (HS256)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenLifetimes, TokenSubject, TokenType};
//!
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     TokenLifetimes::default(),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let subject = TokenSubject {
//!     user_id: 1,
//!     email: "alice@example.com".to_string(),
//!     full_name: "Alice Doe".to_string(),
//! };
//! let tokens = auth.authenticate("password123", &hash, &subject).unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&tokens.access_token).unwrap();
//! assert_eq!(claims.token_type, TokenType::Access);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenLifetimes;
pub use authenticator::TokenPair;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenSubject;
pub use jwt::TokenType;
pub use password::PasswordCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
