//! User and OAuth account repository.
//!
//! Queries are runtime-checked (`query_as` + `FromRow`); column lists match
//! the model structs exactly.

use sqlx::PgPool;

use farmhaat_core::{Email, OAuthProvider, UserId, UserRole};

use super::{RepositoryError, conflict_on_unique};
use crate::models::user::{Account, User};

const USER_COLUMNS: &str = "id, email, name, role, email_verified, created_at, updated_at";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Create a new user with email, name, and password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    pub async fn create_with_password(
        &self,
        email: &Email,
        name: &str,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, name, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .bind(UserRole::Customer)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "email already exists"))?;

        Ok(user)
    }

    /// Create a new user from an OAuth profile (no password).
    ///
    /// OAuth providers verify email ownership, so the user starts verified.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    pub async fn create_from_oauth(
        &self,
        email: &Email,
        name: &str,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, name, role, email_verified)
             VALUES ($1, $2, $3, TRUE)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(name)
        .bind(UserRole::Customer)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "email already exists"))?;

        Ok(user)
    }

    /// Get a user's password hash by email.
    ///
    /// Returns `None` if the user doesn't exist or has no password set
    /// (OAuth-only account).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithHash>(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.and_then(UserWithHash::credentials))
    }

    /// Replace a user's password hash (password reset).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn set_password_hash(
        &self,
        user_id: UserId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $1, updated_at = now() WHERE id = $2",
        )
        .bind(password_hash)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Mark a user's email as verified.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn verify_email(&self, user_id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET email_verified = TRUE, updated_at = now() WHERE id = $1",
        )
        .bind(user_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Find an OAuth account link by provider identity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_account(
        &self,
        provider: OAuthProvider,
        provider_account_id: &str,
    ) -> Result<Option<Account>, RepositoryError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, user_id, provider, provider_account_id, created_at
             FROM accounts
             WHERE provider = $1 AND provider_account_id = $2",
        )
        .bind(provider)
        .bind(provider_account_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    /// Link an OAuth account to an existing user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the provider identity is
    /// already linked.
    pub async fn link_account(
        &self,
        user_id: UserId,
        provider: OAuthProvider,
        provider_account_id: &str,
    ) -> Result<Account, RepositoryError> {
        let account = sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (user_id, provider, provider_account_id)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, provider, provider_account_id, created_at",
        )
        .bind(user_id)
        .bind(provider)
        .bind(provider_account_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "account already linked"))?;

        Ok(account)
    }
}

/// Internal row for the password lookup join.
#[derive(sqlx::FromRow)]
struct UserWithHash {
    id: UserId,
    email: Email,
    name: String,
    role: UserRole,
    email_verified: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    password_hash: Option<String>,
}

impl UserWithHash {
    fn user(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            email_verified: self.email_verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Split into the user and their hash; `None` for OAuth-only accounts.
    fn credentials(self) -> Option<(User, String)> {
        let hash = self.password_hash.clone()?;
        Some((self.user(), hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(password_hash: Option<&str>) -> UserWithHash {
        let now = chrono::Utc::now();
        UserWithHash {
            id: UserId::new(7),
            email: Email::parse("customer@farmhaat.test").expect("valid email"),
            name: "Test Customer".to_string(),
            role: UserRole::Customer,
            email_verified: true,
            created_at: now,
            updated_at: now,
            password_hash: password_hash.map(String::from),
        }
    }

    #[test]
    fn credentials_pairs_user_with_hash() {
        let (user, hash) = row(Some("$argon2id$stub")).credentials().expect("has hash");
        assert_eq!(hash, "$argon2id$stub");
        assert_eq!(user.email.as_str(), "customer@farmhaat.test");
    }

    #[test]
    fn credentials_none_for_oauth_only_account() {
        assert!(row(None).credentials().is_none());
    }
}
