//! Google OAuth client (authorization-code flow).

use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::GoogleOAuthConfig;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Errors from the OAuth exchange.
#[derive(Debug, Error)]
pub enum GoogleOAuthError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error response.
    #[error("OAuth error: {status} - {message}")]
    Provider { status: u16, message: String },
}

/// The subset of the OpenID Connect userinfo response we use.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    /// Stable subject identifier for the Google account.
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Google OAuth client.
#[derive(Clone)]
pub struct GoogleOAuthClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: secrecy::SecretString,
    redirect_uri: String,
}

impl GoogleOAuthClient {
    /// Create a client; the redirect URI is derived from the public base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &GoogleOAuthConfig, base_url: &str) -> Result<Self, GoogleOAuthError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: format!(
                "{}/api/auth/oauth/google/callback",
                base_url.trim_end_matches('/')
            ),
        })
    }

    /// Build the consent-screen URL for a given anti-CSRF state token.
    ///
    /// # Panics
    ///
    /// Never panics; the base URL is a compile-time constant.
    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub fn authorize_url(&self, state: &str) -> String {
        let mut url = Url::parse(AUTH_URL).expect("static URL is valid");
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", "openid email profile")
            .append_pair("state", state);
        url.into()
    }

    /// Exchange an authorization code for the user's profile.
    ///
    /// # Errors
    ///
    /// Returns `GoogleOAuthError::Provider` on a non-2xx response from
    /// either the token or userinfo endpoint.
    pub async fn exchange_code(&self, code: &str) -> Result<GoogleProfile, GoogleOAuthError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let response = self.client.post(TOKEN_URL).form(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GoogleOAuthError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response.json().await?;

        let response = self
            .client
            .get(USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GoogleOAuthError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<GoogleProfile>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn authorize_url_carries_state_and_redirect() {
        let client = GoogleOAuthClient::new(
            &GoogleOAuthConfig {
                client_id: "client-123".to_string(),
                client_secret: SecretString::from("s3cr3t"),
            },
            "https://shop.example.com/",
        )
        .unwrap();

        let url = client.authorize_url("state-abc");
        assert!(url.starts_with(AUTH_URL));
        assert!(url.contains("state=state-abc"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("shop.example.com%2Fapi%2Fauth%2Foauth%2Fgoogle%2Fcallback"));
    }

    #[test]
    fn redirect_uri_matches_mounted_callback_route() {
        let client = GoogleOAuthClient::new(
            &GoogleOAuthConfig {
                client_id: "client-123".to_string(),
                client_secret: SecretString::from("s3cr3t"),
            },
            "https://shop.example.com",
        )
        .unwrap();

        // Must stay in sync with the router: /api/auth nests the oauth
        // callback under /oauth/google/callback.
        assert_eq!(
            client.redirect_uri,
            "https://shop.example.com/api/auth/oauth/google/callback"
        );
    }
}
