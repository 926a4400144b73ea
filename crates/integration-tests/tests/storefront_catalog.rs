//! Catalog browsing tests against a running storefront.
//!
//! Run with: cargo test -p farmhaat-integration-tests -- --ignored

use farmhaat_integration_tests::{body_json, client, storefront_base_url};
use reqwest::StatusCode;

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health() {
    let resp = client()
        .get(format!("{}/health", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_product_list_shape() {
    let resp = client()
        .get(format!("{}/api/products", storefront_base_url()))
        .send()
        .await
        .expect("Failed to list products");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;

    assert!(body.get("products").is_some_and(|p| p.is_array()));
    assert!(body.get("total").is_some_and(serde_json::Value::is_i64));

    // Every product carries its units
    if let Some(first) = body["products"].as_array().and_then(|p| p.first()) {
        assert!(first.get("units").is_some_and(|u| u.is_array()));
    }
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_product_list_rejects_bad_sort() {
    let resp = client()
        .get(format!(
            "{}/api/products?sort=cheapest",
            storefront_base_url()
        ))
        .send()
        .await
        .expect("Failed to list products");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_missing_product_is_404() {
    let resp = client()
        .get(format!("{}/api/products/99999999", storefront_base_url()))
        .send()
        .await
        .expect("Failed to fetch product");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert!(body.get("error").is_some());
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_recent_products_requires_auth() {
    let resp = client()
        .get(format!("{}/api/products/recent", storefront_base_url()))
        .send()
        .await
        .expect("Failed to fetch recent products");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
