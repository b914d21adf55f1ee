//! The widget driven through its HTTP surface.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use menu_cart_integration_tests::{
    TestContext, body_json, body_string, diner_menu, find_patch, get, post_event,
};
use serde_json::json;

const ADD_CONTROL_1: &str = r#".cart-btn[data-id="1"]"#;

#[tokio::test]
async fn test_health_and_request_id() {
    let ctx = TestContext::new();
    let app = ctx.app(diner_menu());

    let resp = get(&app, "/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(resp.headers()["x-frame-options"], "DENY");
    assert_eq!(body_string(resp).await, "ok");
}

#[tokio::test]
async fn test_page_renders_menu_filters_and_empty_cart() {
    let ctx = TestContext::new();
    let app = ctx.app(diner_menu());

    let resp = get(&app, "/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;

    assert!(html.contains("buttermilk pancakes"));
    assert!(html.contains("$20.99"));
    assert_eq!(html.matches("Add to Cart").count(), 4);
    let all = html.find(r#"data-id="all""#).unwrap();
    let breakfast = html.find(r#"data-id="breakfast""#).unwrap();
    let shakes = html.find(r#"data-id="shakes""#).unwrap();
    assert!(all < breakfast && breakfast < shakes);
    assert!(html.contains(r#"<span class="cart-item-no">0</span>"#));
    assert!(html.contains(r#"<span class="cart-total">0.00</span>"#));
    assert!(html.contains("Do you deliver?"));
}

#[tokio::test]
async fn test_add_increment_decrement_clear() {
    let ctx = TestContext::new();
    let app = ctx.app(diner_menu());

    // add
    let resp = post_event(&app, "/menu/events", &json!({"type": "add", "id": "1"})).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let patches = body_json(resp).await;
    let button = find_patch(&patches, "set_button", ADD_CONTROL_1).unwrap();
    assert_eq!(button["label"], "In Cart");
    assert_eq!(button["disabled"], true);
    let appended = find_patch(&patches, "append", ".cart-content").unwrap();
    assert!(appended["html"].as_str().unwrap().contains("buttermilk pancakes"));
    assert_eq!(find_patch(&patches, "set_text", ".cart-total").unwrap()["text"], "15.99");
    assert_eq!(find_patch(&patches, "set_class", ".cart").unwrap()["enabled"], true);

    // increment
    let resp = post_event(&app, "/cart/events", &json!({"type": "increment", "id": "1"})).await;
    let patches = body_json(resp).await;
    let amount = find_patch(&patches, "set_text", r#".cart-item[data-id="1"] .amount"#).unwrap();
    assert_eq!(amount["text"], "2");
    assert_eq!(find_patch(&patches, "set_text", ".cart-item-no").unwrap()["text"], "2");
    assert_eq!(find_patch(&patches, "set_text", ".cart-total").unwrap()["text"], "31.98");

    // decrement twice removes the line and re-enables the control
    post_event(&app, "/cart/events", &json!({"type": "decrement", "id": "1"})).await;
    let resp = post_event(&app, "/cart/events", &json!({"type": "decrement", "id": "1"})).await;
    let patches = body_json(resp).await;
    assert!(find_patch(&patches, "remove", r#".cart-item[data-id="1"]"#).is_some());
    let button = find_patch(&patches, "set_button", ADD_CONTROL_1).unwrap();
    assert_eq!(button["label"], "Add to Cart");
    assert_eq!(button["disabled"], false);
    assert_eq!(find_patch(&patches, "set_text", ".cart-total").unwrap()["text"], "0.00");

    // clear
    post_event(&app, "/menu/events", &json!({"type": "add", "id": "2"})).await;
    post_event(&app, "/menu/events", &json!({"type": "add", "id": "3"})).await;
    let resp = post_event(&app, "/cart/events", &json!({"type": "clear"})).await;
    let patches = body_json(resp).await;
    assert!(find_patch(&patches, "set_button", r#".cart-btn[data-id="2"]"#).is_some());
    assert!(find_patch(&patches, "set_button", r#".cart-btn[data-id="3"]"#).is_some());
    assert_eq!(find_patch(&patches, "set_html", ".cart-content").unwrap()["html"], "");
    assert_eq!(find_patch(&patches, "set_class", ".cart").unwrap()["enabled"], false);

    let html = body_string(get(&app, "/").await).await;
    assert!(html.contains(r#"<span class="cart-item-no">0</span>"#));
    assert!(!html.contains("In Cart"));
}

#[tokio::test]
async fn test_invariant_violations_are_rejected() {
    let ctx = TestContext::new();
    let app = ctx.app(diner_menu());

    post_event(&app, "/menu/events", &json!({"type": "add", "id": "1"})).await;
    let resp = post_event(&app, "/menu/events", &json!({"type": "add", "id": "1"})).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = post_event(&app, "/cart/events", &json!({"type": "increment", "id": "2"})).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = post_event(&app, "/menu/events", &json!({"type": "add", "id": "99"})).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = post_event(&app, "/faq/events", &json!({"type": "toggle", "index": 7})).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = post_event(&app, "/cart/events", &json!({"type": "explode"})).await;
    assert!(resp.status().is_client_error());

    // The cart still holds exactly one pancake.
    let html = body_string(get(&app, "/").await).await;
    assert!(html.contains(r#"<span class="cart-item-no">1</span>"#));
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let ctx = TestContext::new();
    {
        let app = ctx.app(diner_menu());
        post_event(&app, "/menu/events", &json!({"type": "add", "id": "4"})).await;
        post_event(&app, "/cart/events", &json!({"type": "increment", "id": "4"})).await;
    }

    let app = ctx.app(diner_menu());
    let html = body_string(get(&app, "/").await).await;
    assert!(html.contains(r#"class="cart-item" data-id="4""#));
    assert!(html.contains(r#"<span class="amount">2</span>"#));
    assert!(html.contains(r#"<span class="cart-total">41.98</span>"#));
    assert_eq!(html.matches("In Cart").count(), 1);
}

#[tokio::test]
async fn test_filter_rerenders_menu() {
    let ctx = TestContext::new();
    let app = ctx.app(diner_menu());

    let resp =
        post_event(&app, "/menu/events", &json!({"type": "filter", "category": "shakes"})).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let patches = body_json(resp).await;
    let menu = find_patch(&patches, "set_html", ".menu-container").unwrap();
    let html = menu["html"].as_str().unwrap();
    assert!(html.contains("godzilla milkshake"));
    assert!(!html.contains("buttermilk pancakes"));
    assert_eq!(
        find_patch(&patches, "set_class", r#".menu-btn[data-id="shakes"]"#).unwrap()["enabled"],
        true
    );

    let resp =
        post_event(&app, "/menu/events", &json!({"type": "filter", "category": "all"})).await;
    let patches = body_json(resp).await;
    let menu = find_patch(&patches, "set_html", ".menu-container").unwrap();
    assert_eq!(menu["html"].as_str().unwrap().matches("Add to Cart").count(), 4);
}

#[tokio::test]
async fn test_open_close_and_faq_toggle() {
    let ctx = TestContext::new();
    let app = ctx.app(diner_menu());

    let resp = post_event(&app, "/cart/events", &json!({"type": "open"})).await;
    let patches = body_json(resp).await;
    assert_eq!(find_patch(&patches, "set_class", ".cart-overlay").unwrap()["enabled"], true);
    let resp = post_event(&app, "/cart/events", &json!({"type": "close"})).await;
    let patches = body_json(resp).await;
    assert_eq!(find_patch(&patches, "set_class", ".cart-overlay").unwrap()["enabled"], false);

    let resp = post_event(&app, "/faq/events", &json!({"type": "toggle", "index": 1})).await;
    let patches = body_json(resp).await;
    let expanded = find_patch(&patches, "set_class", r#".question[data-index="1"]"#).unwrap();
    assert_eq!(expanded["class"], "show-text");
    assert_eq!(expanded["enabled"], true);
}

#[tokio::test]
async fn test_page_without_catalog() {
    let ctx = TestContext::new();
    let app = ctx.app_without_catalog();

    let html = body_string(get(&app, "/").await).await;
    assert!(html.contains("The menu is unavailable right now."));
    assert!(!html.contains("Add to Cart"));

    let resp = post_event(&app, "/menu/events", &json!({"type": "add", "id": "1"})).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_menu_images_are_served() {
    let ctx = TestContext::new();
    let app = ctx.app(diner_menu());

    let html = body_string(get(&app, "/").await).await;
    assert!(html.contains(r#"src="/static/images/item-1.svg""#));

    let resp = get(&app, "/static/images/item-1.svg").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "image/svg+xml");
}

#[tokio::test]
async fn test_static_script_is_served() {
    let ctx = TestContext::new();
    let app = ctx.app(diner_menu());
    let resp = get(&app, "/static/widget.js").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("applyPatches"));
}
