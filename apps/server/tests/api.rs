//! End-to-end API tests against an in-memory record store.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use stampcard_db::{Database, DbConfig};
use stampcard_server::config::ServerConfig;
use stampcard_server::qr::QrService;
use stampcard_server::{app, AppState};

fn test_config() -> ServerConfig {
    ServerConfig {
        port: 0,
        database_path: ":memory:".to_string(),
        qr_encoder_url: "https://api.qrserver.com/v1/create-qr-code/".to_string(),
        qr_size: 200,
        card_base_url: "http://localhost:8080".to_string(),
    }
}

async fn test_app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let qr = QrService::from_config(&test_config()).unwrap();
    app(AppState::new(db, qr))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn enroll(app: &Router, name: &str, mobile: &str) -> Value {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/customers",
            json!({ "name": name, "mobile": mobile }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn full_loyalty_cycle() {
    let app = test_app().await;

    let customer = enroll(&app, "Ayesha Khan", "03001234567").await;
    assert_eq!(customer["memberCode"], "MSC0001");
    assert_eq!(customer["stamps"], 0);
    assert_eq!(customer["rank"]["tier"], "Bronze");

    let id = customer["id"].as_i64().unwrap();
    let stamps_uri = format!("/api/customers/{id}/stamps");
    let redeem_uri = format!("/api/customers/{id}/redeem");

    // Redeem below a full wheel is rejected and changes nothing.
    let response = app
        .clone()
        .oneshot(post_json(&redeem_uri, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Grant up to the ceiling and once past it.
    let mut last = Value::Null;
    for _ in 0..6 {
        let response = app
            .clone()
            .oneshot(post_json(&stamps_uri, json!({ "adjustment": "grant" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        last = body_json(response).await;
    }
    // Wheel capped at 5, lifetime kept counting.
    assert_eq!(last["stamps"], 5);
    assert_eq!(last["lifetimeStamps"], 6);
    assert_eq!(last["rewardUnlocked"], true);

    // Redeem resets the wheel and counts the reward.
    let response = app
        .clone()
        .oneshot(post_json(&redeem_uri, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let redeemed = body_json(response).await;
    assert_eq!(redeemed["stamps"], 0);
    assert_eq!(redeemed["lifetimeStamps"], 6);
    assert_eq!(redeemed["redeems"], 1);
}

#[tokio::test]
async fn card_login_and_qr_link() {
    let app = test_app().await;
    enroll(&app, "Ayesha Khan", "03001234567").await;

    // Lower-case member code works.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/card/login",
            json!({ "credential": "msc0001" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let card = body_json(response).await;
    assert_eq!(card["memberCode"], "MSC0001");
    assert_eq!(card["cardUrl"], "http://localhost:8080/api/card/MSC0001");
    assert!(card["qrImageUrl"]
        .as_str()
        .unwrap()
        .contains("size=200x200"));

    // Mobile works too, and resolves the same card.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/card/login",
            json!({ "credential": "03001234567" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The QR landing route renders the same view.
    let response = app.clone().oneshot(get("/api/card/MSC0001")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Unknown credential is a generic not-found.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/card/login",
            json!({ "credential": "MSC9999" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn card_login_store_outage_is_not_a_miss() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let qr = QrService::from_config(&test_config()).unwrap();
    let app = app(AppState::new(db.clone(), qr));

    // With the pool closed every lookup fails; the card must report the
    // outage, not pretend the customer does not exist.
    db.close().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/card/login",
            json!({ "credential": "MSC0001" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["code"], "STORE_UNAVAILABLE");
    assert_eq!(body["message"], "Operation did not succeed");

    let response = app.clone().oneshot(get("/api/card/MSC0001")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn vault_and_export() {
    let app = test_app().await;
    let kept = enroll(&app, "Ayesha Khan", "03001234567").await;
    let archived = enroll(&app, "Bilal Ahmed", "03119876543").await;
    let archived_id = archived["id"].as_i64().unwrap();

    // Archive the second customer.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/customers/{archived_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Active listing has one, vault has the other.
    let active = body_json(app.clone().oneshot(get("/api/customers")).await.unwrap()).await;
    assert_eq!(active.as_array().unwrap().len(), 1);
    assert_eq!(active[0]["id"], kept["id"]);

    let vault = body_json(
        app.clone()
            .oneshot(get("/api/customers/vault"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(vault.as_array().unwrap().len(), 1);
    assert_eq!(vault[0]["archived"], true);

    // Export carries both, quoted, with a dated filename.
    let response = app
        .clone()
        .oneshot(get("/api/customers/export.csv"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get("Content-Disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"customers-"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(csv.starts_with("Id,Name,Mobile,Member Code"));
    assert!(csv.contains("\"Ayesha Khan\""));
    assert!(csv.contains("\"Archived\""));

    // Purge removes the archived record entirely.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/customers/{archived_id}/purge"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let vault = body_json(
        app.clone()
            .oneshot(get("/api/customers/vault"))
            .await
            .unwrap(),
    )
    .await;
    assert!(vault.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn admin_credential_flows() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/admins/register",
            json!({
                "username": "front.desk",
                "email": "desk@example.com",
                "password": "opensesame",
                "securityQuestion": "First pet?",
                "securityAnswer": "biscuit"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let admin = body_json(response).await;
    assert_eq!(admin["username"], "front.desk");
    // Hashes never appear in responses.
    assert!(admin.get("passwordHash").is_none());

    // Wrong password and unknown username produce the identical error body.
    let wrong_password = app
        .clone()
        .oneshot(post_json(
            "/api/admins/login",
            json!({ "username": "front.desk", "password": "nope" }),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_user = app
        .clone()
        .oneshot(post_json(
            "/api/admins/login",
            json!({ "username": "nobody", "password": "opensesame" }),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(wrong_password).await,
        body_json(wrong_user).await
    );

    // Correct login.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/admins/login",
            json!({ "username": "front.desk", "password": "opensesame" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Recovery requires the matching answer.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/admins/recover",
            json!({
                "username": "front.desk",
                "securityAnswer": "goldfish",
                "newPassword": "newpassword"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/admins/recover",
            json!({
                "username": "front.desk",
                "securityAnswer": "biscuit",
                "newPassword": "newpassword"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Old password is out, new one is in.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/admins/login",
            json!({ "username": "front.desk", "password": "opensesame" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/admins/login",
            json!({ "username": "front.desk", "password": "newpassword" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
