//! Batch creation and the order-item report

mod common;

use std::time::Duration;

use common::TestApp;
use http::StatusCode;
use serde_json::{Value, json};

fn lines(food_id: &str, prices: &[f64]) -> Vec<Value> {
    prices
        .iter()
        .zip(["S", "M", "L"].iter().cycle())
        .map(|(price, qty)| json!({"food_id": food_id, "quantity": qty, "unit_price": price}))
        .collect()
}

#[tokio::test]
async fn batch_creates_one_order_and_all_items() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let (food_id, table_id) = app.seed_catalog(&token, 9.5).await;

    let (status, result) = app
        .call(
            "POST",
            "/orderItems",
            Some(&token),
            Some(json!({
                "table_id": table_id,
                "order_items": lines(&food_id, &[5.005, 5.004, -5.005]),
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{result}");

    let order_id = result["order_id"].as_str().unwrap();
    let inserted = result["inserted_ids"].as_array().unwrap();
    assert_eq!(inserted.len(), 3);

    let (_, orders) = app.call("GET", "/orders", Some(&token), None).await;
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["order_id"], order_id);
    assert_eq!(orders[0]["table_id"], table_id.as_str());

    let expected = [5.01, 5.0, -5.01];
    for (id, price) in inserted.iter().zip(expected) {
        let id = id.as_str().unwrap();
        let (status, item) = app
            .call("GET", &format!("/orderItems/{id}"), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(item["order_id"], order_id);
        assert_eq!(item["food_id"], food_id.as_str());
        assert_eq!(item["unit_price"].as_f64().unwrap(), price);
    }
}

#[tokio::test]
async fn invalid_line_writes_nothing() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let (food_id, table_id) = app.seed_catalog(&token, 9.5).await;

    let mut items = lines(&food_id, &[1.0, 2.0]);
    items.push(json!({"food_id": food_id, "quantity": "XL", "unit_price": 3.0}));

    let (status, body) = app
        .call(
            "POST",
            "/orderItems",
            Some(&token),
            Some(json!({"table_id": table_id, "order_items": items})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("order_items[2]"));

    let (_, orders) = app.call("GET", "/orders", Some(&token), None).await;
    assert!(orders.as_array().unwrap().is_empty());
    let (_, items) = app.call("GET", "/orderItems", Some(&token), None).await;
    assert!(items.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn empty_batch_rejected() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let (status, _) = app
        .call(
            "POST",
            "/orderItems",
            Some(&token),
            Some(json!({"table_id": null, "order_items": []})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn report_groups_by_order_and_table() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let (food_id, table_id) = app.seed_catalog(&token, 9.5).await;

    let (_, result) = app
        .call(
            "POST",
            "/orderItems",
            Some(&token),
            Some(json!({
                "table_id": table_id,
                "order_items": lines(&food_id, &[1.0, 2.0, 3.0]),
            })),
        )
        .await;
    let order_id = result["order_id"].as_str().unwrap();

    let (status, reports) = app
        .call("GET", &format!("/orderItems-order/{order_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{reports}");
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 1);

    let report = &reports[0];
    assert_eq!(report["order_id"], order_id);
    assert_eq!(report["table_id"], table_id.as_str());
    assert_eq!(report["table_number"], 7);
    assert_eq!(report["total_count"], 3);
    // Amount is the food's price per line, not unit_price
    assert_eq!(report["total_amount"].as_f64().unwrap(), 28.5);

    let line = &report["order_items"][0];
    assert_eq!(line["food_name"], "Pho");
    assert_eq!(line["price"].as_f64().unwrap(), 9.5);
    assert_eq!(line["amount"].as_f64().unwrap(), 9.5);
}

#[tokio::test]
async fn report_keeps_lines_with_missing_food() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let (food_id, table_id) = app.seed_catalog(&token, 4.0).await;

    let mut items = lines(&food_id, &[1.0]);
    items.push(json!({"food_id": "no-such-food", "quantity": "M", "unit_price": 2.0}));

    let (_, result) = app
        .call(
            "POST",
            "/orderItems",
            Some(&token),
            Some(json!({"table_id": table_id, "order_items": items})),
        )
        .await;
    let order_id = result["order_id"].as_str().unwrap();

    let (_, reports) = app
        .call("GET", &format!("/orderItems-order/{order_id}"), Some(&token), None)
        .await;
    let report = &reports[0];
    assert_eq!(report["total_count"], 2);
    assert_eq!(report["total_amount"].as_f64().unwrap(), 4.0);

    let lines = report["order_items"].as_array().unwrap();
    let missing = lines
        .iter()
        .find(|l| l["food_id"] == "no-such-food")
        .unwrap();
    assert!(missing["food_name"].is_null());
    assert!(missing["food_image"].is_null());
    assert!(missing["amount"].is_null());
}

#[tokio::test]
async fn report_for_unknown_order_is_empty() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let (status, reports) = app
        .call("GET", "/orderItems-order/does-not-exist", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(reports.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn order_item_patch() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let (food_id, table_id) = app.seed_catalog(&token, 4.0).await;
    let (_, result) = app
        .call(
            "POST",
            "/orderItems",
            Some(&token),
            Some(json!({"table_id": table_id, "order_items": lines(&food_id, &[1.0])})),
        )
        .await;
    let item_id = result["inserted_ids"][0].as_str().unwrap();

    let (status, item) = app
        .call(
            "PATCH",
            &format!("/orderItems/{item_id}"),
            Some(&token),
            Some(json!({"quantity": "L", "unit_price": 2.675})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{item}");
    assert_eq!(item["quantity"], "L");
    assert_eq!(item["unit_price"].as_f64().unwrap(), 2.68);
    assert_eq!(item["food_id"], food_id.as_str());

    let (status, _) = app
        .call(
            "PATCH",
            &format!("/orderItems/{item_id}"),
            Some(&token),
            Some(json!({"quantity": "XXL"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call(
            "PATCH",
            "/orderItems/unknown",
            Some(&token),
            Some(json!({"quantity": "S"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failed_batch_insert_removes_the_order() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let (food_id, table_id) = app.seed_catalog(&token, 4.0).await;
    app.exec(r#"DEFINE FIELD food_id ON TABLE order_item TYPE string ASSERT $value != "sold-out""#)
        .await;

    let mut items = lines(&food_id, &[1.0, 2.0]);
    items.push(json!({"food_id": "sold-out", "quantity": "S", "unit_price": 3.0}));

    let (status, body) = app
        .call(
            "POST",
            "/orderItems",
            Some(&token),
            Some(json!({"table_id": table_id, "order_items": items})),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database error");

    let (_, orders) = app.call("GET", "/orders", Some(&token), None).await;
    assert!(orders.as_array().unwrap().is_empty(), "{orders}");
    let (_, stored) = app.call("GET", "/orderItems", Some(&token), None).await;
    assert!(stored.as_array().unwrap().is_empty(), "{stored}");
}

#[tokio::test]
async fn expired_window_fails_report_with_500() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let (food_id, table_id) = app.seed_catalog(&token, 4.0).await;
    let (_, result) = app
        .call(
            "POST",
            "/orderItems",
            Some(&token),
            Some(json!({"table_id": table_id, "order_items": lines(&food_id, &[1.0])})),
        )
        .await;
    let order_id = result["order_id"].as_str().unwrap();

    let expired = app.with_window(Duration::ZERO);
    let (status, body) = expired
        .call("GET", &format!("/orderItems-order/{order_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Request timed out");

    // the stored data is untouched; a normal window still works
    let (status, reports) = app
        .call("GET", &format!("/orderItems-order/{order_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reports[0]["total_count"], 1);
}

#[tokio::test]
async fn expired_window_writes_no_batch() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let (food_id, table_id) = app.seed_catalog(&token, 4.0).await;

    let expired = app.with_window(Duration::ZERO);
    let (status, body) = expired
        .call(
            "POST",
            "/orderItems",
            Some(&token),
            Some(json!({"table_id": table_id, "order_items": lines(&food_id, &[1.0])})),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Request timed out");

    let (_, stored) = app.call("GET", "/orderItems", Some(&token), None).await;
    assert!(stored.as_array().unwrap().is_empty());
}
