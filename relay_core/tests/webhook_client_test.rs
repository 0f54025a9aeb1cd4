//! Tests for the real webhook client against a mockito server.

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
};
use chrono::Utc;
use mockito::{Matcher, Server};
use relay_core::{
    config::NotificationConfig, create_app, AppConfig, AppState, DeliveryError, NotificationMessage,
    Submission, WebhookClient, WebhookSink,
};
use serde_json::json;
use std::{
    net::TcpListener,
    time::{Duration, Instant},
};
use tower::ServiceExt;

fn message() -> NotificationMessage {
    let submission = Submission {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        contact: "ada@example.com".to_string(),
        address: "1 Main St".to_string(),
        message: "Hello".to_string(),
    };
    NotificationMessage::from_submission(&submission, &NotificationConfig::default(), Utc::now())
}

#[test]
fn test_posts_json_payload() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/hook")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "content": "📩 **New Contact Form Submission**",
            "embeds": [{
                "title": "Contact Form Details",
                "color": 3718648,
                "fields": [
                    {"name": "First Name", "value": "Ada", "inline": true},
                    {"name": "Last Name", "value": "Lovelace", "inline": true},
                    {"name": "Email / Phone", "value": "ada@example.com", "inline": false},
                    {"name": "Address", "value": "1 Main St", "inline": false},
                    {"name": "Message", "value": "Hello", "inline": false}
                ]
            }]
        })))
        .with_status(204)
        .create();

    let client = WebhookClient::new(format!("{}/hook", server.url()), Duration::from_secs(5));
    let receipt = client.send(&message()).unwrap();

    mock.assert();
    assert_eq!(receipt.status, 204);
    assert!(receipt.body.is_empty());
}

#[test]
fn test_error_status_is_rejection_with_body() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/hook")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Cannot send an empty message", "code": 50006}"#)
        .expect(1)
        .create();

    let client = WebhookClient::new(format!("{}/hook", server.url()), Duration::from_secs(5));
    let err = client.send(&message()).unwrap_err();

    mock.assert();
    match err {
        DeliveryError::Rejected { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("Cannot send an empty message"));
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[test]
fn test_unreachable_destination_is_transport_error() {
    let client = WebhookClient::new("http://127.0.0.1:1/hook", Duration::from_secs(2));
    let err = client.send(&message()).unwrap_err();

    assert!(matches!(err, DeliveryError::Transport(_)));
}

#[test]
fn test_silent_destination_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    // Accept the connection and hold it open without ever answering.
    std::thread::spawn(move || {
        let (_stream, _) = listener.accept().unwrap();
        std::thread::sleep(Duration::from_secs(10));
    });

    let client = WebhookClient::new(format!("http://{}/hook", addr), Duration::from_secs(1));
    let start = Instant::now();
    let err = client.send(&message()).unwrap_err();

    assert!(matches!(err, DeliveryError::Transport(_)), "got {:?}", err);
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_async_delivery_uses_blocking_pool() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/hook")
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let client = WebhookClient::new(format!("{}/hook", server.url()), Duration::from_secs(5));
    let receipt = client.deliver(&message()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.body, "ok");
}

#[tokio::test]
async fn test_end_to_end_submission() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/api/webhooks/1/token")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "embeds": [{"fields": [{"name": "First Name", "value": "Ada"}]}]
        })))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let mut config = AppConfig::default();
    config.webhook.url = Some(format!("{}/api/webhooks/1/token", server.url()));
    let app = create_app(AppState::from_config(&config));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "firstName": " Ada ",
                "lastName": "Lovelace",
                "contact": "ada@example.com",
                "address": "1 Main St",
                "message": "Hello"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"success": true}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_end_to_end_rejection() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/hook")
        .with_status(404)
        .with_body(r#"{"message": "Unknown Webhook", "code": 10015}"#)
        .expect(1)
        .create_async()
        .await;

    let mut config = AppConfig::default();
    config.webhook.url = Some(format!("{}/hook", server.url()));
    let app = create_app(AppState::from_config(&config));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "contact": "ada@example.com",
                "address": "1 Main St",
                "message": "Hello"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Failed to send message");
    assert!(body.get("success").is_none());
    mock.assert_async().await;
}
