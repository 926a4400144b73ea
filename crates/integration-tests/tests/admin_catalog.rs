//! Admin catalog management tests against a running admin server.

use farmhaat_integration_tests::{admin_base_url, admin_login, body_json};
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
#[ignore = "Requires running admin server and admin credentials"]
async fn test_product_and_unit_crud() {
    let Some(session) = admin_login().await else {
        return; // no admin credentials configured
    };
    let base_url = admin_base_url();

    // Create
    let name = format!("Integration Millet {}", Uuid::new_v4());
    let resp = session
        .post(format!("{base_url}/api/products"))
        .json(&json!({
            "name": name,
            "description": "Created by an integration test.",
            "category": "grains",
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    let product_id = created["product"]["id"].clone();

    // Patch keeps omitted fields
    let resp = session
        .patch(format!("{base_url}/api/products/{product_id}"))
        .json(&json!({ "category": "millets" }))
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["product"]["category"], json!("millets"));
    assert_eq!(updated["product"]["name"], json!(name));

    // Unit create with bad prices is rejected
    let resp = session
        .post(format!("{base_url}/api/products/{product_id}/units"))
        .json(&json!({ "label": "1 kg bag", "price": "100.00", "discounted_price": "120.00" }))
        .send()
        .await
        .expect("Failed to create unit");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Valid unit
    let resp = session
        .post(format!("{base_url}/api/products/{product_id}/units"))
        .json(&json!({
            "label": "1 kg bag",
            "price": "100.00",
            "discounted_price": "90.00",
            "stock": 10,
        }))
        .send()
        .await
        .expect("Failed to create unit");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let unit = body_json(resp).await;
    let unit_id = unit["unit"]["id"].clone();

    // Delete unit, then product
    let resp = session
        .delete(format!(
            "{base_url}/api/products/{product_id}/units/{unit_id}"
        ))
        .send()
        .await
        .expect("Failed to delete unit");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = session
        .delete(format!("{base_url}/api/products/{product_id}"))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Gone now
    let resp = session
        .delete(format!("{base_url}/api/products/{product_id}"))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running admin server and admin credentials"]
async fn test_dashboard_shape() {
    let Some(session) = admin_login().await else {
        return;
    };

    let resp = session
        .get(format!("{}/api/dashboard", admin_base_url()))
        .send()
        .await
        .expect("Failed to fetch dashboard");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert!(body.get("user_count").is_some());
    assert!(body.get("product_count").is_some());
    assert!(body.get("orders_by_status").is_some());
    assert!(body.get("captured_revenue").is_some());
    assert!(body.get("recent_orders").is_some_and(|o| o.is_array()));
}

#[tokio::test]
#[ignore = "Requires running admin server and admin credentials"]
async fn test_seller_application_status_validation() {
    let Some(session) = admin_login().await else {
        return;
    };

    let resp = session
        .patch(format!(
            "{}/api/seller-applications/99999999",
            admin_base_url()
        ))
        .json(&json!({ "status": "maybe" }))
        .send()
        .await
        .expect("Failed to patch application");

    // Bad status is rejected before the lookup
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
