use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use souq::db;
use souq::infrastructure::AppState;
use souq::server::build_router;
use tower::util::ServiceExt; // for `oneshot`

const BUYER: &str = "buyer-1";

async fn setup_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    build_router(AppState::new(db), &[])
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let req = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn close(value: &Value, expected: f64) -> bool {
    value
        .as_f64()
        .map(|v| (v - expected).abs() < 1e-9)
        .unwrap_or(false)
}

/// Supplier with one product priced 100 (1-10) / 80 (11+), shipping 20 to
/// Riyadh and negotiable to Jeddah. Returns (supplier_id, product_id).
async fn setup_catalog(app: &Router) -> (String, String) {
    let (_, body) = send(
        app,
        "POST",
        "/api/suppliers",
        Some(json!({ "name": "Gulf Supplies" })),
    )
    .await;
    let supplier_id = body["supplier"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        app,
        "POST",
        "/api/products",
        Some(json!({
            "supplierId": supplier_id,
            "productName": { "en": "Safety Helmet", "ar": "خوذة سلامة" },
            "description": { "en": "Hard hat", "ar": "خوذة صلبة" },
            "category": "Safety",
            "subCategory": "Helmets",
            "sizes": ["M", "L"],
            "colors": ["Yellow"],
            "mainImageUrl": "https://example.com/helmet.jpg",
            "mainLocation": "Riyadh",
            "priceRanges": [
                {
                    "minQty": "1", "maxQty": "10", "price": 100,
                    "locations": [
                        { "location": "Riyadh", "locationPrice": 20 },
                        { "location": "Jeddah", "locationPrice": "Unlimited" }
                    ]
                },
                { "minQty": "11", "maxQty": "Unlimited", "price": 80 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let product_id = body["data"]["product"]["id"].as_str().unwrap().to_string();

    (supplier_id, product_id)
}

async fn add_item(app: &Router, payload: Value) -> (StatusCode, Value) {
    send(app, "POST", &format!("/api/cart/{}/items", BUYER), Some(payload)).await
}

#[tokio::test]
async fn test_identical_configuration_merges_and_reprices() {
    let app = setup_app().await;
    let (_, product_id) = setup_catalog(&app).await;

    let item = json!({ "product_id": product_id, "quantity": 5, "color": "Yellow", "size": "M" });
    let (status, body) = add_item(&app, item).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert!(close(&body["data"]["item"]["price"], 100.0));
    assert_eq!(body["data"]["item"]["delivery_location"], "Riyadh");

    let item = json!({ "product_id": product_id, "quantity": 6, "color": "Yellow", "size": "M" });
    let (status, body) = add_item(&app, item).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["item"]["quantity"], 11);
    assert!(close(&body["data"]["item"]["price"], 80.0));

    let (status, cart) = send(&app, "GET", &format!("/api/cart/{}", BUYER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["itemCount"], 1);

    let totals = &cart["suppliers"][0]["totals"];
    assert!(close(&totals["subtotal"], 880.0));
    assert!(close(&totals["shipping"], 20.0));
    assert!(close(&totals["vat"], 135.0));
    assert!(close(&totals["total"], 1035.0));
    assert_eq!(cart["suppliers"][0]["payable"], true);
    assert_eq!(cart["suppliers"][0]["formatted"]["total"], "SAR 1,035.00");
    assert!(close(&cart["grandTotal"]["total"], 1035.0));
}

#[tokio::test]
async fn test_coupon_preview() {
    let app = setup_app().await;
    let (_, product_id) = setup_catalog(&app).await;
    add_item(
        &app,
        json!({ "product_id": product_id, "quantity": 1, "color": "Yellow", "size": "L" }),
    )
    .await;

    // 100 + 20 shipping + 18 VAT - 10
    let (status, cart) = send(
        &app,
        "GET",
        &format!("/api/cart/{}?coupon=discount10", BUYER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["couponCode"], "DISCOUNT10");
    assert!(close(&cart["suppliers"][0]["totals"]["discount"], 10.0));
    assert!(close(&cart["suppliers"][0]["totals"]["total"], 128.0));

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/cart/{}?coupon=BOGUS", BUYER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cart_rejects_unoffered_options() {
    let app = setup_app().await;
    let (_, product_id) = setup_catalog(&app).await;

    let (status, _) = add_item(
        &app,
        json!({ "product_id": product_id, "quantity": 1, "color": "Purple", "size": "M" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = add_item(
        &app,
        json!({ "product_id": product_id, "quantity": 1, "color": "Yellow" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = add_item(
        &app,
        json!({ "product_id": product_id, "quantity": 0, "color": "Yellow", "size": "M" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = add_item(&app, json!({ "product_id": "missing", "quantity": 1 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_quantity_moves_tier() {
    let app = setup_app().await;
    let (_, product_id) = setup_catalog(&app).await;
    let (_, body) = add_item(
        &app,
        json!({ "product_id": product_id, "quantity": 2, "color": "Yellow", "size": "M" }),
    )
    .await;
    let item_id = body["data"]["item"]["id"].as_i64().unwrap();
    let uri = format!("/api/cart/{}/items/{}", BUYER, item_id);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "quantity": 20 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(close(&body["data"]["item"]["price"], 80.0));

    let (status, _) = send(&app, "PUT", &uri, Some(json!({ "quantity": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // other buyers cannot touch the item
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/cart/someone-else/items/{}", item_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checkout_refuses_negotiable_items() {
    let app = setup_app().await;
    let (supplier_id, product_id) = setup_catalog(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/cart/{}/checkout", BUYER),
        Some(json!({ "supplier_id": supplier_id })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = add_item(
        &app,
        json!({
            "product_id": product_id,
            "quantity": 1,
            "color": "Yellow",
            "size": "M",
            "delivery_location": "Jeddah"
        }),
    )
    .await;
    assert_eq!(body["data"]["item"]["shipping_negotiable"], true);

    let (_, cart) = send(&app, "GET", &format!("/api/cart/{}", BUYER), None).await;
    assert_eq!(cart["suppliers"][0]["payable"], false);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/cart/{}/checkout", BUYER),
        Some(json!({ "supplier_id": supplier_id })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Pricing Negotiable - Contact Supplier");
}

#[tokio::test]
async fn test_checkout_and_payment_lifecycle() {
    let app = setup_app().await;
    let (supplier_id, product_id) = setup_catalog(&app).await;
    add_item(
        &app,
        json!({ "product_id": product_id, "quantity": 11, "color": "Yellow", "size": "M" }),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/cart/{}/checkout", BUYER),
        Some(json!({ "supplier_id": supplier_id, "coupon": "save20" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let order = &body["order"];
    assert_eq!(order["payment_status"], "pending");
    assert_eq!(order["coupon_code"], "SAVE20");
    assert!(close(&order["total"], 1015.0));
    assert_eq!(order["items"][0]["quantity"], 11);
    let bill = order["bill_number"].as_str().unwrap().to_string();
    assert_eq!(bill.len(), 18);

    // checked out items leave the cart
    let (_, cart) = send(&app, "GET", &format!("/api/cart/{}", BUYER), None).await;
    assert_eq!(cart["itemCount"], 0);

    let (_, listed) = send(&app, "GET", &format!("/api/orders?buyer_id={}", BUYER), None).await;
    assert_eq!(listed["count"], 1);

    let payment_uri = format!("/api/orders/{}/payment", bill);
    let (status, body) = send(
        &app,
        "POST",
        &payment_uri,
        Some(json!({ "status": "paid", "sadad_number": "SADAD-77" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["payment_status"], "paid");
    assert_eq!(body["order"]["sadad_number"], "SADAD-77");

    // repeated notification is accepted
    let (status, _) = send(&app, "POST", &payment_uri, Some(json!({ "status": "paid" }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "POST", &payment_uri, Some(json!({ "status": "failed" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = send(&app, "GET", &format!("/api/orders/{}", bill), None).await;
    assert_eq!(body["order"]["payment_status"], "paid");
    assert_eq!(body["order"]["sadad_number"], "SADAD-77");
}

#[tokio::test]
async fn test_unknown_bill_number() {
    let app = setup_app().await;

    let (status, _) = send(&app, "GET", "/api/orders/0000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        "/api/orders/0000/payment",
        Some(json!({ "status": "paid" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_cart() {
    let app = setup_app().await;
    let (_, product_id) = setup_catalog(&app).await;
    add_item(
        &app,
        json!({ "product_id": product_id, "quantity": 1, "color": "Yellow", "size": "M" }),
    )
    .await;
    add_item(
        &app,
        json!({ "product_id": product_id, "quantity": 1, "color": "Yellow", "size": "L" }),
    )
    .await;

    let (status, body) = send(&app, "DELETE", &format!("/api/cart/{}", BUYER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], 2);
}

async fn create_supplier(app: &Router, name: &str) -> String {
    let (status, body) = send(app, "POST", "/api/suppliers", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["supplier"]["id"].as_str().unwrap().to_string()
}

/// Product without sizes or colors, delivered from Riyadh.
async fn create_plain_product(app: &Router, supplier_id: &str, price_ranges: Value) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/products",
        Some(json!({
            "supplierId": supplier_id,
            "productName": { "en": "Work Gloves", "ar": "قفازات عمل" },
            "description": { "en": "Leather gloves", "ar": "قفازات جلدية" },
            "category": "Safety",
            "subCategory": "Gloves",
            "mainImageUrl": "https://example.com/gloves.jpg",
            "mainLocation": "Riyadh",
            "priceRanges": price_ranges
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["product"]["id"].as_str().unwrap().to_string()
}

fn group<'a>(cart: &'a Value, supplier_id: &str) -> &'a Value {
    cart["suppliers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|g| g["supplierId"] == supplier_id)
        .unwrap()
}

#[tokio::test]
async fn test_unlimited_shipping_is_shown_as_negotiable() {
    let app = setup_app().await;
    let (_, product_id) = setup_catalog(&app).await;
    add_item(
        &app,
        json!({
            "product_id": product_id,
            "quantity": 1,
            "color": "Yellow",
            "size": "M",
            "delivery_location": "Jeddah"
        }),
    )
    .await;

    let (status, cart) = send(&app, "GET", &format!("/api/cart/{}", BUYER), None).await;
    assert_eq!(status, StatusCode::OK);

    let formatted = &cart["suppliers"][0]["formatted"];
    assert_eq!(formatted["shipping"], "Pricing Negotiable - Contact Supplier");
    assert_eq!(formatted["total"], "Contact Supplier");
    assert_eq!(formatted["subtotal"], "SAR 100.00");
    assert_eq!(cart["suppliers"][0]["totals"]["negotiable_shipping"], 1);
    assert_eq!(
        cart["grandTotalFormatted"]["shipping"],
        "Pricing Negotiable - Contact Supplier"
    );
    assert_eq!(cart["grandTotalFormatted"]["total"], "Contact Supplier");
}

#[tokio::test]
async fn test_mixed_priced_and_negotiable_cart_has_no_total() {
    let app = setup_app().await;
    let (supplier_id, helmet_id) = setup_catalog(&app).await;
    let gloves_id = create_plain_product(
        &app,
        &supplier_id,
        json!([
            {
                "minQty": "1", "maxQty": "Unlimited", "price": "",
                "locations": [{ "location": "Riyadh", "locationPrice": 10 }]
            }
        ]),
    )
    .await;

    add_item(
        &app,
        json!({ "product_id": helmet_id, "quantity": 1, "color": "Yellow", "size": "M" }),
    )
    .await;
    let (status, body) = add_item(&app, json!({ "product_id": gloves_id, "quantity": 3 })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["lineTotalLabel"], "Pricing Negotiable - Contact Supplier");

    let (_, cart) = send(&app, "GET", &format!("/api/cart/{}", BUYER), None).await;
    let group = &cart["suppliers"][0];
    assert!(group["totals"]["total"].as_f64().unwrap() > 0.0);
    assert_eq!(group["totals"]["negotiable_lines"], 1);
    assert_eq!(group["formatted"]["total"], "Contact Supplier");
    assert_eq!(group["payable"], false);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/cart/{}/checkout", BUYER),
        Some(json!({ "supplier_id": supplier_id })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_cart_is_grouped_per_supplier_with_coupon_per_group() {
    let app = setup_app().await;
    let (helmet_supplier, helmet_id) = setup_catalog(&app).await;
    let gloves_supplier = create_supplier(&app, "Riyadh Gloves").await;
    let gloves_id = create_plain_product(
        &app,
        &gloves_supplier,
        json!([
            {
                "minQty": "1", "maxQty": "Unlimited", "price": 50,
                "locations": [{ "location": "Riyadh", "locationPrice": 10 }]
            }
        ]),
    )
    .await;

    add_item(
        &app,
        json!({ "product_id": helmet_id, "quantity": 1, "color": "Yellow", "size": "M" }),
    )
    .await;
    add_item(&app, json!({ "product_id": gloves_id, "quantity": 2 })).await;

    let (status, cart) = send(
        &app,
        "GET",
        &format!("/api/cart/{}?coupon=DISCOUNT10", BUYER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["itemCount"], 2);
    assert_eq!(cart["suppliers"].as_array().unwrap().len(), 2);

    // 100 + 20 + 18 VAT - 10
    let helmets = group(&cart, &helmet_supplier);
    assert!(close(&helmets["totals"]["total"], 128.0));
    assert_eq!(helmets["items"].as_array().unwrap().len(), 1);

    // 100 + 10 + 16.5 VAT - 10
    let gloves = group(&cart, &gloves_supplier);
    assert!(close(&gloves["totals"]["total"], 116.5));
    assert!(close(&gloves["totals"]["discount"], 10.0));

    assert!(close(&cart["grandTotal"]["discount"], 20.0));
    assert!(close(&cart["grandTotal"]["total"], 244.5));
    assert_eq!(cart["grandTotalFormatted"]["total"], "SAR 244.50");

    // checking out one supplier leaves the other group in the cart
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/cart/{}/checkout", BUYER),
        Some(json!({ "supplier_id": gloves_supplier })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, cart) = send(&app, "GET", &format!("/api/cart/{}", BUYER), None).await;
    assert_eq!(cart["suppliers"].as_array().unwrap().len(), 1);
    assert_eq!(cart["suppliers"][0]["supplierId"], helmet_supplier.as_str());
}
