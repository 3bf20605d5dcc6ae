//! Integration tests for the admin auth flow.

use reqwest::StatusCode;
use serde_json::Value;

use volga_integration_tests::{client, login_as_admin, spawn_server};

#[tokio::test]
async fn test_login_with_correct_credentials() {
    let server = spawn_server().await;
    let client = client();

    let resp = client
        .post(format!("{}/login", server.base_url))
        .json(&serde_json::json!({"username": "admin", "password": "volga123"}))
        .send()
        .await
        .expect("Failed to send login request");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read body");
    assert_eq!(body.get("success"), Some(&Value::Bool(true)));

    // The session now reports admin
    let resp = client
        .get(format!("{}/check-admin", server.base_url))
        .send()
        .await
        .expect("Failed to check admin");
    let body: Value = resp.json().await.expect("Failed to read body");
    assert_eq!(body.get("isAdmin"), Some(&Value::Bool(true)));
}

#[tokio::test]
async fn test_login_with_wrong_credentials() {
    let server = spawn_server().await;
    let client = client();

    let resp = client
        .post(format!("{}/login", server.base_url))
        .json(&serde_json::json!({"username": "admin", "password": "guess"}))
        .send()
        .await
        .expect("Failed to send login request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to read body");
    assert_eq!(body.get("success"), Some(&Value::Bool(false)));

    let resp = client
        .get(format!("{}/check-admin", server.base_url))
        .send()
        .await
        .expect("Failed to check admin");
    let body: Value = resp.json().await.expect("Failed to read body");
    assert_eq!(body.get("isAdmin"), Some(&Value::Bool(false)));
}

#[tokio::test]
async fn test_check_admin_defaults_to_false() {
    let server = spawn_server().await;
    let client = client();

    let resp = client
        .get(format!("{}/check-admin", server.base_url))
        .send()
        .await
        .expect("Failed to check admin");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read body");
    assert_eq!(body.get("isAdmin"), Some(&Value::Bool(false)));
}

#[tokio::test]
async fn test_logout_destroys_session() {
    let server = spawn_server().await;
    let client = client();
    login_as_admin(&client, &server.base_url).await;

    let resp = client
        .get(format!("{}/logout", server.base_url))
        .send()
        .await
        .expect("Failed to log out");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/check-admin", server.base_url))
        .send()
        .await
        .expect("Failed to check admin");
    let body: Value = resp.json().await.expect("Failed to read body");
    assert_eq!(body.get("isAdmin"), Some(&Value::Bool(false)));
}

#[tokio::test]
async fn test_mutations_forbidden_without_login() {
    let server = spawn_server().await;
    let client = client();

    let form = reqwest::multipart::Form::new()
        .text("name", "Chair")
        .text("desc", "Oak chair")
        .text("price", "1500")
        .text("category", "furniture")
        .text("status", "available");
    let resp = client
        .post(format!("{}/add-product", server.base_url))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send add-product");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = client
        .post(format!("{}/delete-product", server.base_url))
        .json(&serde_json::json!({"id": uuid::Uuid::new_v4().to_string()}))
        .send()
        .await
        .expect("Failed to send delete-product");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_mutations_forbidden_after_logout() {
    let server = spawn_server().await;
    let client = client();
    login_as_admin(&client, &server.base_url).await;

    client
        .get(format!("{}/logout", server.base_url))
        .send()
        .await
        .expect("Failed to log out");

    let resp = client
        .post(format!("{}/delete-product", server.base_url))
        .json(&serde_json::json!({"id": uuid::Uuid::new_v4().to_string()}))
        .send()
        .await
        .expect("Failed to send delete-product");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
