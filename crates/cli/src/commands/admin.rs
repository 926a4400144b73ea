//! Admin account provisioning.

use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
use argon2::Argon2;

use farmhaat_core::{Email, UserRole};

use super::{CliError, connect};

const MIN_PASSWORD_LENGTH: usize = 8;

/// Create an admin user. If the email already exists, the account is
/// promoted to admin and its password replaced.
pub async fn run(email: &str, name: &str, password: &str) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidInput("name is required".to_string()));
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CliError::InvalidInput(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| CliError::PasswordHash)?
        .to_string();

    let pool = connect().await?;

    sqlx::query(
        "INSERT INTO users (email, name, password_hash, role, email_verified)
         VALUES ($1, $2, $3, $4, TRUE)
         ON CONFLICT (email) DO UPDATE
         SET name = EXCLUDED.name,
             password_hash = EXCLUDED.password_hash,
             role = EXCLUDED.role,
             email_verified = TRUE,
             updated_at = now()",
    )
    .bind(&email)
    .bind(name)
    .bind(&hash)
    .bind(UserRole::Admin)
    .execute(&pool)
    .await?;

    println!("Admin account ready: {email}");

    Ok(())
}
