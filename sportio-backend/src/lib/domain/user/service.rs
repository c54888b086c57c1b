use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service for registration and login.
///
/// Argon2 work runs on the blocking pool so request tasks keep making progress.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hasher and token issuer
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, UserError> {
        tracing::info!(email = %command.email, "Attempting to register user");

        if command.password != command.confirm_password {
            tracing::warn!(email = %command.email, "Password mismatch during registration");
            return Err(UserError::PasswordMismatch);
        }

        // Advisory only: the unique constraint decides concurrent registrations.
        if self.repository.exists_by_email(&command.email).await? {
            tracing::warn!(email = %command.email, "Email already exists");
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.hash_password(command.password).await?;
        let new_user = NewUser::register(command.email, password_hash, command.full_name);

        let user = self.repository.create(new_user).await?;
        let tokens = self.authenticator.issue_tokens(&user.token_subject())?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(AuthSession { user, tokens })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError> {
        tracing::info!(email = %command.email, "Attempting login");

        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            tracing::warn!(email = %command.email, "User not found for email");
            let authenticator = Arc::clone(&self.authenticator);
            let password = command.password;
            let rejected = tokio::task::spawn_blocking(move || {
                authenticator.reject_unknown_account(&password)
            })
            .await
            .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?;
            return Err(UserError::from(rejected));
        };

        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash.clone();
        let subject = user.token_subject();
        let password = command.password;

        let tokens = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &subject)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?
        .map_err(|e| {
            if matches!(e, auth::AuthenticationError::InvalidCredentials) {
                tracing::warn!(email = %command.email, "Invalid password for email");
            }
            UserError::from(e)
        })?;

        Ok(AuthSession { user, tokens })
    }
}
