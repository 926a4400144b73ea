//! Admin API route handlers.
//!
//! # Route table
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | POST | `/api/auth/login` | `auth::login` |
//! | POST | `/api/auth/logout` | `auth::logout` |
//! | GET | `/api/auth/me` | `auth::me` |
//! | GET | `/api/dashboard` | `dashboard::show` |
//! | GET | `/api/orders` | `orders::index` |
//! | GET | `/api/orders/{id}` | `orders::show` |
//! | POST | `/api/orders/{id}/approve` | `orders::approve` |
//! | POST | `/api/orders/{id}/reject` | `orders::reject` |
//! | POST | `/api/orders/{id}/deliver` | `orders::deliver` |
//! | GET | `/api/products` | `products::index` |
//! | POST | `/api/products` | `products::create` |
//! | PATCH | `/api/products/{id}` | `products::update` |
//! | DELETE | `/api/products/{id}` | `products::remove` |
//! | GET | `/api/products/{id}/units` | `products::list_units` |
//! | POST | `/api/products/{id}/units` | `products::create_unit` |
//! | PATCH | `/api/products/{id}/units/{unit_id}` | `products::update_unit` |
//! | DELETE | `/api/products/{id}/units/{unit_id}` | `products::remove_unit` |
//! | GET | `/api/contact-submissions` | `intake::contact_submissions` |
//! | GET | `/api/newsletter-subscribers` | `intake::newsletter_subscribers` |
//! | GET | `/api/seller-applications` | `intake::seller_applications` |
//! | PATCH | `/api/seller-applications/{id}` | `intake::update_seller_application` |
//! | POST | `/api/ai/description` | `ai::description` |
//! | POST | `/api/ai/units` | `ai::units` |
//! | POST | `/api/images/upload` | `images::upload` |
//! | GET | `/api/images/search` | `images::search` |
//!
//! Everything except login requires an admin session.

pub mod ai;
pub mod auth;
pub mod dashboard;
pub mod images;
pub mod intake;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Build the admin API router.
pub fn routes() -> Router<AppState> {
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me));

    let order_routes = Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/approve", post(orders::approve))
        .route("/{id}/reject", post(orders::reject))
        .route("/{id}/deliver", post(orders::deliver));

    let product_routes = Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            patch(products::update).delete(products::remove),
        )
        .route(
            "/{id}/units",
            get(products::list_units).post(products::create_unit),
        )
        .route(
            "/{id}/units/{unit_id}",
            patch(products::update_unit).delete(products::remove_unit),
        );

    let ai_routes = Router::new()
        .route("/description", post(ai::description))
        .route("/units", post(ai::units));

    let image_routes = Router::new()
        .route("/upload", post(images::upload))
        .route("/search", get(images::search));

    Router::new()
        .nest("/api/auth", auth_routes)
        .route("/api/dashboard", get(dashboard::show))
        .nest("/api/orders", order_routes)
        .nest("/api/products", product_routes)
        .route("/api/contact-submissions", get(intake::contact_submissions))
        .route(
            "/api/newsletter-subscribers",
            get(intake::newsletter_subscribers),
        )
        .route("/api/seller-applications", get(intake::seller_applications))
        .route(
            "/api/seller-applications/{id}",
            patch(intake::update_seller_application),
        )
        .nest("/api/ai", ai_routes)
        .nest("/api/images", image_routes)
}
