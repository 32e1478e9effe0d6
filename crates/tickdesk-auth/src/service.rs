//! Authentication service — login and per-request authentication.

use chrono::Utc;
use tickdesk_core::error::{TickdeskError, TickdeskResult};
use tickdesk_core::models::user::User;
use tickdesk_core::repository::UserRepository;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed JWT access token.
    pub token: String,
    /// The authenticated user, with `last_login` freshly stamped.
    pub user: User,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Authentication service.
///
/// Generic over the user repository so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    users: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(users: U, config: AuthConfig) -> Self {
        Self { users, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Authenticate a user with email + password and issue a token.
    ///
    /// An unknown email and a wrong password produce the same error so
    /// callers cannot probe which addresses have accounts.
    pub async fn login(&self, input: LoginInput) -> TickdeskResult<LoginOutput> {
        // 1. Look up the user by email.
        let user = match self.users.get_by_email(&input.email).await {
            Ok(u) => u,
            Err(TickdeskError::NotFound { .. }) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        // 2. Verify the password.
        let valid = password::verify_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )
        .map_err(|e| TickdeskError::Crypto(e.to_string()))?;

        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        // 3. Stamp the login and issue the token.
        let now = Utc::now();
        self.users.record_login(user.id, now).await?;

        let token = token::issue_access_token(user.id, &self.config)?;

        tracing::info!(user_id = %user.id, role = %user.role, "login succeeded");

        Ok(LoginOutput {
            token,
            user: User {
                last_login: Some(now),
                ..user
            },
            expires_in: self.config.access_token_lifetime_secs,
        })
    }

    /// Resolve a bearer token to its user.
    ///
    /// Verifies signature, expiry and issuer, then loads the referenced
    /// user from the store — the token proves identity, the store
    /// supplies the current role. Fails if the user no longer exists.
    pub async fn authenticate(&self, bearer_token: &str) -> TickdeskResult<User> {
        let claims = token::validate_access_token(bearer_token, &self.config)?;

        let user_id = Uuid::parse_str(&claims.0.sub)
            .map_err(|_| AuthError::TokenInvalid("malformed subject claim".into()))?;

        match self.users.get_by_id(user_id).await {
            Ok(user) => Ok(user),
            Err(TickdeskError::NotFound { .. }) => {
                Err(AuthError::TokenInvalid("user no longer exists".into()).into())
            }
            Err(e) => Err(e),
        }
    }
}
