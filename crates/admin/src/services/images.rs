//! Product image services: Cloudinary uploads and Pexels stock search.
//!
//! Uploads go through a Cloudinary unsigned upload preset, which scopes
//! what the admin backend can do (folder, transformations, size limits)
//! without holding the account's API secret.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::config::{CloudinaryConfig, PexelsConfig};

const PEXELS_SEARCH_URL: &str = "https://api.pexels.com/v1/search";
const PEXELS_PER_PAGE: u32 = 12;

/// Errors from the image services.
#[derive(Debug, Error)]
pub enum ImageError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// An uploaded image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedImage {
    pub secure_url: String,
    pub public_id: String,
    pub width: u32,
    pub height: u32,
}

/// A stock photo search hit.
#[derive(Debug, Clone, Serialize)]
pub struct StockPhoto {
    pub url: String,
    pub thumbnail_url: String,
    pub photographer: String,
    pub alt: String,
}

#[derive(Debug, Deserialize)]
struct PexelsResponse {
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    photographer: String,
    #[serde(default)]
    alt: String,
    src: PexelsSrc,
}

#[derive(Debug, Deserialize)]
struct PexelsSrc {
    large: String,
    medium: String,
}

/// Client for image upload and search.
#[derive(Clone)]
pub struct ImageService {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
    pexels_api_key: SecretString,
}

impl ImageService {
    /// Create a new image service from config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(
        cloudinary: &CloudinaryConfig,
        pexels: &PexelsConfig,
    ) -> Result<Self, ImageError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            upload_url: format!(
                "https://api.cloudinary.com/v1_1/{}/image/upload",
                cloudinary.cloud_name
            ),
            upload_preset: cloudinary.upload_preset.clone(),
            pexels_api_key: pexels.api_key.clone(),
        })
    }

    /// Upload an image and return its CDN URL.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::Api` on a non-2xx response.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedImage, ImageError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ImageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<UploadedImage>().await?)
    }

    /// Search stock photos by query.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::Api` on a non-2xx response.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<StockPhoto>, ImageError> {
        let response = self
            .client
            .get(PEXELS_SEARCH_URL)
            .header("Authorization", self.pexels_api_key.expose_secret())
            .query(&[("query", query), ("per_page", &PEXELS_PER_PAGE.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ImageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.json::<PexelsResponse>().await?;

        Ok(body
            .photos
            .into_iter()
            .map(|p| StockPhoto {
                url: p.src.large,
                thumbnail_url: p.src.medium,
                photographer: p.photographer,
                alt: p.alt,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pexels_response_parse() {
        let json = r#"{
            "photos": [{
                "photographer": "A. Farmer",
                "alt": "Wheat field at sunset",
                "src": {
                    "large": "https://images.pexels.com/photo/wheat-large.jpg",
                    "medium": "https://images.pexels.com/photo/wheat-medium.jpg"
                }
            }]
        }"#;

        let parsed: PexelsResponse = serde_json::from_str(json).expect("parse");
        assert_eq!(parsed.photos.len(), 1);
        assert_eq!(parsed.photos[0].photographer, "A. Farmer");
    }

    #[test]
    fn test_uploaded_image_parse() {
        let json = r#"{
            "secure_url": "https://res.cloudinary.com/demo/image/upload/v1/products/x.jpg",
            "public_id": "products/x",
            "width": 1200,
            "height": 800,
            "format": "jpg"
        }"#;

        let image: UploadedImage = serde_json::from_str(json).expect("parse");
        assert!(image.secure_url.starts_with("https://res.cloudinary.com/"));
    }
}
