//! Integration tests for FarmHaat.
//!
//! Tests talk HTTP to running servers and are `#[ignore]`d by default.
//!
//! # Running
//!
//! ```bash
//! # Migrate and start both servers
//! cargo run -p farmhaat-cli -- migrate
//! cargo run -p farmhaat-storefront &
//! cargo run -p farmhaat-admin &
//!
//! # Then run the ignored tests
//! cargo test -p farmhaat-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! - `STOREFRONT_TEST_URL` (default `http://localhost:3000`)
//! - `ADMIN_TEST_URL` (default `http://localhost:3001`)
//! - `ADMIN_TEST_EMAIL` / `ADMIN_TEST_PASSWORD` - credentials for an admin
//!   account provisioned via `farmhaat-cli create-admin`

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the storefront API.
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_TEST_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin API.
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_TEST_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// A cookie-keeping client; sessions ride on cookies.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Register a fresh customer and return the logged-in client and email.
///
/// Registration logs the user in, so the returned client carries a valid
/// session cookie.
///
/// # Panics
///
/// Panics if the storefront rejects the registration.
pub async fn register_customer() -> (Client, String) {
    let client = client();
    let email = format!("it-{}@farmhaat.test", uuid::Uuid::new_v4());

    let resp = client
        .post(format!("{}/api/auth/register", storefront_base_url()))
        .json(&json!({
            "email": email,
            "name": "Integration Test",
            "password": "correct horse battery staple",
        }))
        .send()
        .await
        .expect("Failed to register");

    assert_eq!(resp.status(), 201, "registration failed");

    (client, email)
}

/// Log in to the admin API with env-provided credentials.
///
/// Returns `None` when `ADMIN_TEST_EMAIL` is unset, so tests can skip.
///
/// # Panics
///
/// Panics if the credentials are set but rejected.
pub async fn admin_login() -> Option<Client> {
    let email = std::env::var("ADMIN_TEST_EMAIL").ok()?;
    let password = std::env::var("ADMIN_TEST_PASSWORD").ok()?;

    let client = client();
    let resp = client
        .post(format!("{}/api/auth/login", admin_base_url()))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to log in as admin");

    assert_eq!(resp.status(), 200, "admin login failed");

    Some(client)
}

/// Parse a response body as JSON.
///
/// # Panics
///
/// Panics if the body is not valid JSON.
pub async fn body_json(resp: reqwest::Response) -> Value {
    resp.json().await.expect("Failed to parse JSON body")
}
