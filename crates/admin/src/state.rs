//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use crate::ai::{AiClient, AiError};
use crate::config::AdminConfig;
use crate::razorpay::{RazorpayClient, RazorpayError};
use crate::services::images::{ImageError, ImageService};

/// Errors that can occur while building application state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("razorpay client: {0}")]
    Razorpay(#[from] RazorpayError),
    #[error("ai client: {0}")]
    Ai(#[from] AiError),
    #[error("image service: {0}")]
    Image(#[from] ImageError),
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    razorpay: RazorpayClient,
    ai: AiClient,
    images: ImageService,
}

impl AppState {
    /// Build the state, constructing all outbound clients.
    ///
    /// # Errors
    ///
    /// Returns `StateError` if any client fails to build.
    pub fn new(config: AdminConfig, pool: PgPool) -> Result<Self, StateError> {
        let razorpay = RazorpayClient::new(&config.razorpay)?;
        let ai = AiClient::new(&config.anthropic)?;
        let images = ImageService::new(&config.cloudinary, &config.pexels)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                razorpay,
                ai,
                images,
            }),
        })
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// The database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// The payment gateway client.
    #[must_use]
    pub fn razorpay(&self) -> &RazorpayClient {
        &self.inner.razorpay
    }

    /// The AI content helper client.
    #[must_use]
    pub fn ai(&self) -> &AiClient {
        &self.inner.ai
    }

    /// The image upload/search service.
    #[must_use]
    pub fn images(&self) -> &ImageService {
        &self.inner.images
    }
}
