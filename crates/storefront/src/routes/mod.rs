//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (DB ping)
//!
//! # Catalog
//! GET  /api/products                - Product listing (q, category, sort, page)
//! GET  /api/products/recent         - Recently viewed (auth)
//! GET  /api/products/{id}           - Product detail with units and reviews
//! GET  /api/products/{id}/reviews   - Reviews for a product
//!
//! # Cart (auth)
//! GET    /api/cart                  - Current cart with totals
//! POST   /api/cart                  - Add item (accumulates quantity)
//! PATCH  /api/cart/{id}             - Set quantity
//! DELETE /api/cart/{id}             - Remove item
//!
//! # Favorites (auth)
//! GET    /api/favorites
//! POST   /api/favorites
//! DELETE /api/favorites/{product_id}
//!
//! # Checkout & payments
//! POST /api/checkout                - Create gateway order from the cart (auth)
//! POST /api/checkout/verify         - Verify signature, persist the order (auth)
//! POST /api/webhooks/payments       - Gateway webhook (HMAC-authenticated)
//!
//! # Orders (auth)
//! GET  /api/orders
//! GET  /api/orders/{id}
//!
//! # Reviews & ratings (auth, delivery-gated)
//! POST /api/reviews
//! POST /api/ratings
//!
//! # Auth
//! POST /api/auth/register
//! POST /api/auth/login
//! POST /api/auth/logout
//! GET  /api/auth/me
//! POST /api/auth/verify-email
//! POST /api/auth/password-reset/request
//! POST /api/auth/password-reset/confirm
//! GET  /api/auth/oauth/google
//! GET  /api/auth/oauth/google/callback
//!
//! # Intake (public)
//! POST /api/newsletter
//! POST /api/contact
//! POST /api/seller-applications
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod favorites;
pub mod intake;
pub mod oauth;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod webhooks;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/recent", get(products::recent))
        .route("/{id}", get(products::show))
        .route("/{id}/reviews", get(products::reviews))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).post(cart::add))
        .route("/{id}", patch(cart::update).delete(cart::remove))
}

/// Create the favorites routes router.
pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::index).post(favorites::add))
        .route("/{product_id}", delete(favorites::remove))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/verify-email", post(auth::verify_email))
        .route("/password-reset/request", post(auth::request_password_reset))
        .route("/password-reset/confirm", post(auth::confirm_password_reset))
        .route("/oauth/google", get(oauth::google_redirect))
        .route("/oauth/google/callback", get(oauth::google_callback))
}

/// Create all routes for the storefront API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/favorites", favorite_routes())
        .route("/api/checkout", post(checkout::create))
        .route("/api/checkout/verify", post(checkout::verify))
        .route("/api/webhooks/payments", post(webhooks::payments))
        .route("/api/orders", get(orders::index))
        .route("/api/orders/{id}", get(orders::show))
        .route("/api/reviews", post(reviews::create_review))
        .route("/api/ratings", post(reviews::submit_rating))
        .nest("/api/auth", auth_routes())
        .route("/api/newsletter", post(intake::newsletter))
        .route("/api/contact", post(intake::contact))
        .route("/api/seller-applications", post(intake::seller_application))
}
