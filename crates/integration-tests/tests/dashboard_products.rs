//! Integration tests for product catalog management.

#![allow(clippy::unwrap_used)]

use matjari_integration_tests::{TestApp, assert_redirect};
use reqwest::StatusCode;

async fn subscribed() -> TestApp {
    let app = TestApp::spawn().await;
    app.login_subscribed("owner@shop.sa", "monthly").await;
    app
}

fn product_form<'a>(name: &'a str, price: &'a str, stock: &'a str) -> [(&'static str, &'a str); 5] {
    [
        ("name", name),
        ("price", price),
        ("category", "ملابس"),
        ("stock", stock),
        ("image_url", "https://images.pexels.com/photos/996329/pexels-photo-996329.jpeg"),
    ]
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_seeded_catalog_is_listed() {
    let app = subscribed().await;
    let body = app.page("/products").await;

    for name in ["قميص أبيض", "حذاء رياضي", "ساعة ذكية", "سماعات لاسلكية"] {
        assert!(body.contains(name), "{name}");
    }
    assert!(body.contains("120 ريال"));
}

#[tokio::test]
async fn test_filter_by_category() {
    let app = subscribed().await;
    let body = app.page("/products?q=إلك").await;

    assert!(body.contains("ساعة ذكية"));
    assert!(body.contains("سماعات لاسلكية"));
    assert!(!body.contains("قميص أبيض"));
    assert!(!body.contains("حذاء رياضي"));
}

#[tokio::test]
async fn test_filter_without_match_shows_empty_state() {
    let app = subscribed().await;
    let body = app.page("/products?q=nothing-here").await;
    assert!(body.contains("لا توجد منتجات"));
}

#[tokio::test]
async fn test_filter_is_matched_as_typed() {
    let app = subscribed().await;

    // No seeded name or category contains "أبيض " with the trailing space
    let body = app.page("/products?q=%D8%A3%D8%A8%D9%8A%D8%B6%20").await;
    assert!(!body.contains("قميص أبيض"));
    assert!(body.contains("لا توجد منتجات"));

    let body = app.page("/products?q=%20%20").await;
    assert!(body.contains("لا توجد منتجات"));
    assert!(!body.contains("ساعة ذكية"));
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_product() {
    let app = subscribed().await;
    assert!(app.page("/products/new").await.contains("إضافة منتج جديد"));

    let resp = app
        .post_form("/products", &product_form("قميص قطني", "89.90", "40"))
        .await;
    assert_redirect(&resp, "/products");

    let body = app.page("/products").await;
    assert!(body.contains("قميص قطني"));
    assert!(body.contains("89.9 ريال"));
}

#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let app = subscribed().await;

    let resp = app
        .post_form("/products", &product_form("", "10", "1"))
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.text().await.unwrap().contains("يرجى ملء جميع الحقول"));

    let resp = app
        .post_form("/products", &product_form("قلم", "-3", "1"))
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = resp.text().await.unwrap();
    assert!(body.contains("يرجى إدخال سعر صحيح"));
    assert!(body.contains("قلم"), "entered values are kept");

    let resp = app
        .post_form("/products", &product_form("قلم", "3", "1.5"))
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.text().await.unwrap().contains("يرجى إدخال كمية مخزون صحيحة"));

    assert!(!app.page("/products").await.contains("قلم"));
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_edit_and_update_product() {
    let app = subscribed().await;

    let body = app.page("/products/2/edit").await;
    assert!(body.contains("تعديل منتج"));
    assert!(body.contains(r#"value="حذاء رياضي""#));
    assert!(body.contains(r#"value="250""#));

    let resp = app
        .post_form("/products/2", &product_form("حذاء جري", "275", "12"))
        .await;
    assert_redirect(&resp, "/products");

    let body = app.page("/products").await;
    assert!(body.contains("حذاء جري"));
    assert!(body.contains("275 ريال"));
    assert!(!body.contains("حذاء رياضي"));
}

#[tokio::test]
async fn test_edit_unknown_product_is_not_found() {
    let app = subscribed().await;
    let resp = app.get("/products/missing/edit").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_unknown_product_is_noop() {
    let app = subscribed().await;
    let resp = app
        .post_form("/products/missing", &product_form("شبح", "1", "1"))
        .await;
    assert_redirect(&resp, "/products");
    assert!(!app.page("/products").await.contains("شبح"));
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_twice() {
    let app = subscribed().await;

    let body = app.page("/products/3/delete").await;
    assert!(body.contains("هل أنت متأكد من حذف هذا المنتج؟"));
    assert!(body.contains("ساعة ذكية"));

    let resp = app.post_form("/products/3/delete", &[]).await;
    assert_redirect(&resp, "/products");
    assert!(!app.page("/products").await.contains("ساعة ذكية"));

    let resp = app.post_form("/products/3/delete", &[]).await;
    assert_redirect(&resp, "/products");
    let body = app.page("/products").await;
    assert!(body.contains("سماعات لاسلكية"));

    let resp = app.get("/products/3/delete").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Catalog lifetime
// ============================================================================

#[tokio::test]
async fn test_catalog_resets_after_logout() {
    let app = subscribed().await;
    app.post_form("/products/1/delete", &[]).await;
    assert!(!app.page("/products").await.contains("قميص أبيض"));

    app.post_form("/logout", &[]).await;
    app.login_subscribed("owner@shop.sa", "monthly").await;

    assert!(app.page("/products").await.contains("قميص أبيض"));
}

#[tokio::test]
async fn test_catalogs_are_per_visitor() {
    let app = subscribed().await;
    app.post_form("/products/1/delete", &[]).await;

    let other = app.other_visitor();
    other.login_subscribed("other@shop.sa", "weekly").await;
    assert!(other.page("/products").await.contains("قميص أبيض"));
}

// ============================================================================
// Response headers
// ============================================================================

#[tokio::test]
async fn test_security_and_request_id_headers() {
    let app = subscribed().await;
    let resp = app.get("/products").await;

    let headers = resp.headers();
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    let csp = headers.get("content-security-policy").unwrap().to_str().unwrap();
    assert!(csp.contains("img-src 'self' https:"));
}

#[tokio::test]
async fn test_upstream_request_id_is_echoed() {
    let app = TestApp::spawn().await;
    let resp = app
        .client
        .get(format!("{}/health", app.base_url))
        .header("x-request-id", "req-42")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-42");
}

#[tokio::test]
async fn test_oversized_request_id_is_replaced() {
    let app = TestApp::spawn().await;
    let oversized = "x".repeat(65);
    let resp = app
        .client
        .get(format!("{}/health", app.base_url))
        .header("x-request-id", &oversized)
        .send()
        .await
        .unwrap();

    let echoed = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_ne!(echoed, oversized);
    assert_eq!(echoed.len(), 36);
}

#[tokio::test]
async fn test_static_stylesheet_is_served() {
    let app = TestApp::spawn().await;
    let resp = app.get("/static/app.css").await;
    assert_eq!(resp.status(), StatusCode::OK);
}
