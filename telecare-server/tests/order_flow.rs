//! End-to-end order flow tests
//!
//! Drives the real router (with a throwaway on-disk database) through the
//! create / conflict / status-transition / listing flows.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use telecare_server::{Config, ServerState, build_app};

async fn test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config).await;
    (build_app().with_state(state), dir)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

async fn seed_patient(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/patients",
        Some(json!({"name": "Ana Silva", "email": "ana@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("patient id").to_string()
}

async fn seed_pharmacy(app: &Router, name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/pharmacies",
        Some(json!({"name": name, "address": "Rua Central 12", "phone": null})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("pharmacy id").to_string()
}

async fn seed_prescription(app: &Router, patient_id: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/prescriptions",
        Some(json!({
            "patientId": patient_id,
            "doctorName": "Dr. Reis",
            "notes": "after meals",
            "medicines": [
                {"name": "Amoxicillin", "quantity": 14, "morning": true, "afternoon": false, "night": true},
                {"name": "Ibuprofen", "quantity": 6, "morning": false, "afternoon": true, "night": false}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("prescription id").to_string()
}

fn order_body(patient: &str, pharmacy: &str, prescription: &str) -> Value {
    json!({
        "patientId": patient,
        "pharmacyId": pharmacy,
        "prescriptionId": prescription,
    })
}

#[tokio::test]
async fn health_check_reports_ok() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn placing_an_order_copies_the_prescription_snapshot() {
    let (app, _dir) = test_app().await;
    let patient = seed_patient(&app).await;
    let pharmacy = seed_pharmacy(&app, "Farmacia Luz").await;
    let prescription = seed_prescription(&app, &patient).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(order_body(&patient, &pharmacy, &prescription)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["patientId"], patient.as_str());
    assert_eq!(body["pharmacyId"], pharmacy.as_str());
    let medicines = body["medicines"].as_array().expect("medicines");
    assert_eq!(medicines.len(), 2);
    assert_eq!(medicines[0]["name"], "Amoxicillin");
    assert_eq!(medicines[0]["quantity"], 14);
    assert_eq!(medicines[0]["morning"], true);
}

#[tokio::test]
async fn duplicate_create_returns_the_existing_order() {
    let (app, _dir) = test_app().await;
    let patient = seed_patient(&app).await;
    let pharmacy = seed_pharmacy(&app, "Farmacia Luz").await;
    let prescription = seed_prescription(&app, &patient).await;
    let body = order_body(&patient, &pharmacy, &prescription);

    let (status, first) = send(&app, "POST", "/api/orders", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let first_id = first["id"].as_str().expect("order id").to_string();

    // Same triple again: conflict carrying the original order, no new record
    let (status, conflict) = send(&app, "POST", "/api/orders", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict["code"], "E0004");
    assert_eq!(conflict["data"]["id"], first_id.as_str());

    let (status, listed) = send(
        &app,
        "GET",
        &format!("/api/orders?patientId={patient}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().expect("orders").len(), 1);
}

#[tokio::test]
async fn terminal_statuses_do_not_block_recreation() {
    let (app, _dir) = test_app().await;
    let patient = seed_patient(&app).await;
    let pharmacy = seed_pharmacy(&app, "Farmacia Luz").await;
    let prescription = seed_prescription(&app, &patient).await;
    let body = order_body(&patient, &pharmacy, &prescription);

    let (_, first) = send(&app, "POST", "/api/orders", Some(body.clone())).await;
    let first_id = first["id"].as_str().expect("order id").to_string();

    let (status, _) = send(&app, "POST", "/api/orders", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/orders/{first_id}/status"),
        Some(json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "completed");

    // The completed order no longer blocks the triple
    let (status, second) = send(&app, "POST", "/api/orders", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["status"], "pending");
    assert_ne!(second["id"].as_str().expect("order id"), first_id.as_str());
}

#[tokio::test]
async fn rejected_orders_do_not_block_recreation() {
    let (app, _dir) = test_app().await;
    let patient = seed_patient(&app).await;
    let pharmacy = seed_pharmacy(&app, "Farmacia Sol").await;
    let prescription = seed_prescription(&app, &patient).await;
    let body = order_body(&patient, &pharmacy, &prescription);

    let (_, first) = send(&app, "POST", "/api/orders", Some(body.clone())).await;
    let first_id = first["id"].as_str().expect("order id");

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/orders/{first_id}/status"),
        Some(json!({"status": "rejected"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "POST", "/api/orders", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn update_status_validates_the_enum() {
    let (app, _dir) = test_app().await;
    let patient = seed_patient(&app).await;
    let pharmacy = seed_pharmacy(&app, "Farmacia Luz").await;
    let prescription = seed_prescription(&app, &patient).await;

    let (_, created) = send(
        &app,
        "POST",
        "/api/orders",
        Some(order_body(&patient, &pharmacy, &prescription)),
    )
    .await;
    let id = created["id"].as_str().expect("order id");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/orders/{id}/status"),
        Some(json!({"status": "shipped"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");

    // Legacy value from old clients normalizes to completed
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/orders/{id}/status"),
        Some(json!({"status": "delivered"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
}

#[tokio::test]
async fn update_status_on_unknown_order_is_not_found() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(
        &app,
        "PUT",
        "/api/orders/6e30f6b0-43c5-4f51-9a3e-2f9a290a2d6b/status",
        Some(json!({"status": "confirmed"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
}

#[tokio::test]
async fn listing_requires_a_patient_id() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(&app, "GET", "/api/orders", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn listing_is_newest_first_with_references_attached() {
    let (app, _dir) = test_app().await;
    let patient = seed_patient(&app).await;
    let first_pharmacy = seed_pharmacy(&app, "Farmacia Luz").await;
    let second_pharmacy = seed_pharmacy(&app, "Farmacia Sol").await;
    let prescription = seed_prescription(&app, &patient).await;

    send(
        &app,
        "POST",
        "/api/orders",
        Some(order_body(&patient, &first_pharmacy, &prescription)),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/orders",
        Some(order_body(&patient, &second_pharmacy, &prescription)),
    )
    .await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/orders?patientId={patient}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let orders = body.as_array().expect("orders");
    assert_eq!(orders.len(), 2);
    // Most recently created first
    assert_eq!(orders[0]["pharmacyId"], second_pharmacy.as_str());
    assert_eq!(orders[1]["pharmacyId"], first_pharmacy.as_str());
    // Display references are attached
    assert_eq!(orders[0]["pharmacy"]["name"], "Farmacia Sol");
    assert_eq!(orders[0]["patient"]["name"], "Ana Silva");
    assert_eq!(orders[0]["prescription"]["doctorName"], "Dr. Reis");
}

#[tokio::test]
async fn latest_per_pharmacy_returns_one_order_per_pharmacy() {
    let (app, _dir) = test_app().await;
    let patient = seed_patient(&app).await;
    let first_pharmacy = seed_pharmacy(&app, "Farmacia Luz").await;
    let second_pharmacy = seed_pharmacy(&app, "Farmacia Sol").await;
    let prescription = seed_prescription(&app, &patient).await;

    // First pharmacy: an old completed order, then a fresh one
    let (_, old) = send(
        &app,
        "POST",
        "/api/orders",
        Some(order_body(&patient, &first_pharmacy, &prescription)),
    )
    .await;
    let old_id = old["id"].as_str().expect("order id");
    send(
        &app,
        "PUT",
        &format!("/api/orders/{old_id}/status"),
        Some(json!({"status": "completed"})),
    )
    .await;
    let (_, fresh) = send(
        &app,
        "POST",
        "/api/orders",
        Some(order_body(&patient, &first_pharmacy, &prescription)),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/orders",
        Some(order_body(&patient, &second_pharmacy, &prescription)),
    )
    .await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/orders/latest?patientId={patient}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let latest = body.as_array().expect("orders");
    assert_eq!(latest.len(), 2);

    let for_first = latest
        .iter()
        .find(|o| o["pharmacyId"] == first_pharmacy.as_str())
        .expect("first pharmacy entry");
    assert_eq!(for_first["id"], fresh["id"]);
    assert_eq!(for_first["status"], "pending");
}

#[tokio::test]
async fn malformed_references_are_rejected() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "patientId": "not-an-id",
            "pharmacyId": "also-bad",
            "prescriptionId": "nope",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn unknown_references_are_not_found() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "patientId": "6e30f6b0-43c5-4f51-9a3e-2f9a290a2d6b",
            "pharmacyId": "6e30f6b0-43c5-4f51-9a3e-2f9a290a2d6c",
            "prescriptionId": "6e30f6b0-43c5-4f51-9a3e-2f9a290a2d6d",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
}

#[tokio::test]
async fn pharmacy_queues_split_by_status() {
    let (app, _dir) = test_app().await;
    let patient = seed_patient(&app).await;
    let pharmacy = seed_pharmacy(&app, "Farmacia Luz").await;
    let first_rx = seed_prescription(&app, &patient).await;
    let second_rx = seed_prescription(&app, &patient).await;

    let (_, first) = send(
        &app,
        "POST",
        "/api/orders",
        Some(order_body(&patient, &pharmacy, &first_rx)),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/orders",
        Some(order_body(&patient, &pharmacy, &second_rx)),
    )
    .await;

    let first_id = first["id"].as_str().expect("order id");
    send(
        &app,
        "PUT",
        &format!("/api/orders/{first_id}/status"),
        Some(json!({"status": "confirmed"})),
    )
    .await;

    let (status, pending) = send(
        &app,
        "GET",
        &format!("/api/orders/pharmacy/{pharmacy}/pending"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let pending = pending.as_array().expect("pending");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["prescriptionId"], second_rx.as_str());

    let (status, confirmed) = send(
        &app,
        "GET",
        &format!("/api/orders/pharmacy/{pharmacy}/confirmed"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let confirmed = confirmed.as_array().expect("confirmed");
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0]["id"], first_id);
}

#[tokio::test]
async fn prescription_listing_is_scoped_to_a_patient() {
    let (app, _dir) = test_app().await;
    let patient = seed_patient(&app).await;
    seed_prescription(&app, &patient).await;
    seed_prescription(&app, &patient).await;

    let (status, _) = send(&app, "GET", "/api/prescriptions", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/prescriptions?patientId={patient}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().expect("prescriptions");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["medicines"].as_array().expect("medicines").len(), 2);
}

#[tokio::test]
async fn order_detail_fetch_attaches_references() {
    let (app, _dir) = test_app().await;
    let patient = seed_patient(&app).await;
    let pharmacy = seed_pharmacy(&app, "Farmacia Luz").await;
    let prescription = seed_prescription(&app, &patient).await;

    let (_, created) = send(
        &app,
        "POST",
        "/api/orders",
        Some(order_body(&patient, &pharmacy, &prescription)),
    )
    .await;
    let id = created["id"].as_str().expect("order id");

    let (status, body) = send(&app, "GET", &format!("/api/orders/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["pharmacy"]["name"], "Farmacia Luz");
    assert_eq!(body["medicines"].as_array().expect("medicines").len(), 2);
}
