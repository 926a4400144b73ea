//! Authentication service.
//!
//! Password login, email verification, password reset, and Google OAuth
//! account linking.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use farmhaat_core::{Email, OAuthProvider, UserId};

use crate::db::RepositoryError;
use crate::db::tokens::TokenRepository;
use crate::db::users::UserRepository;
use crate::models::user::User;
use crate::services::google::GoogleProfile;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Email verification tokens stay valid for a day.
const VERIFICATION_TOKEN_TTL_HOURS: i64 = 24;

/// Password reset tokens stay valid for an hour.
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: TokenRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens: TokenRepository::new(pool),
        }
    }

    // =========================================================================
    // Password Authentication
    // =========================================================================

    /// Register a new user with email and password.
    ///
    /// Returns the user and a fresh email verification token for the caller
    /// to deliver.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register_with_password(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<(User, String), AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create_with_password(&email, name, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        let token = self.issue_verification_token(user.id).await?;

        Ok((user, token))
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    // =========================================================================
    // Email Verification
    // =========================================================================

    /// Issue a fresh email verification token for a user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the insert fails.
    pub async fn issue_verification_token(&self, user_id: UserId) -> Result<String, AuthError> {
        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + Duration::hours(VERIFICATION_TOKEN_TTL_HOURS);
        self.tokens
            .create_email_verification(user_id, &token, expires_at)
            .await?;
        Ok(token)
    }

    /// Consume a verification token and mark the user's email verified.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token is unknown or expired.
    pub async fn verify_email(&self, token: &str) -> Result<UserId, AuthError> {
        let user_id = self
            .tokens
            .consume_email_verification(token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        self.users.verify_email(user_id).await?;

        Ok(user_id)
    }

    // =========================================================================
    // Password Reset
    // =========================================================================

    /// Start a password reset for an email.
    ///
    /// Returns `None` for unknown emails so the caller can respond
    /// identically either way.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the token insert fails.
    pub async fn request_password_reset(
        &self,
        email: &str,
    ) -> Result<Option<(User, String)>, AuthError> {
        let email = Email::parse(email)?;

        let Some(user) = self.users.get_by_email(&email).await? else {
            return Ok(None);
        };

        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);
        self.tokens
            .create_password_reset(user.id, &token, expires_at)
            .await?;

        Ok(Some((user, token)))
    }

    /// Consume a reset token and set a new password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token is unknown or expired.
    /// Returns `AuthError::WeakPassword` if the new password is too weak.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        validate_password(new_password)?;

        let user_id = self
            .tokens
            .consume_password_reset(token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let password_hash = hash_password(new_password)?;
        self.users.set_password_hash(user_id, &password_hash).await?;

        Ok(())
    }

    // =========================================================================
    // Google OAuth
    // =========================================================================

    /// Log in (or register) via a verified Google profile.
    ///
    /// Resolution order:
    /// 1. An existing account link for this provider identity wins.
    /// 2. Otherwise, a user with the same email gets the identity linked.
    /// 3. Otherwise, a new user is created (pre-verified) and linked.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if any database operation fails.
    pub async fn login_with_google(&self, profile: &GoogleProfile) -> Result<User, AuthError> {
        let provider = OAuthProvider::Google;

        if let Some(account) = self.users.find_account(provider, &profile.sub).await? {
            return self
                .users
                .get_by_id(account.user_id)
                .await?
                .ok_or(AuthError::UserNotFound);
        }

        let email = Email::parse(&profile.email)?;

        let user = match self.users.get_by_email(&email).await? {
            Some(existing) => existing,
            None => {
                self.users
                    .create_from_oauth(&email, &profile.name)
                    .await?
            }
        };

        // A concurrent callback may have linked the identity already; the
        // unique constraint turns that race into a Conflict we can ignore.
        match self.users.link_account(user.id, provider, &profile.sub).await {
            Ok(_) | Err(RepositoryError::Conflict(_)) => {}
            Err(other) => return Err(other.into()),
        }

        Ok(user)
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub async fn get_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(verify_password("wrong password", &hash).is_err());
    }

    #[test]
    fn rejects_short_password() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn accepts_minimum_length_password() {
        assert!(validate_password("12345678").is_ok());
    }
}
