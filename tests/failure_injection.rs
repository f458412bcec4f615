//! Failure injection tests for the relay.

use std::time::Duration;

use endpoint_relay::Payload;
use httpmock::prelude::*;

mod common;

#[tokio::test]
async fn not_found_is_suppressed_to_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("no such endpoint");
        })
        .await;

    let (relay, messages) = common::relay_with_policy(0, 5);
    let response = relay
        .get(&server.url("/missing"), &Payload::new(), false)
        .await
        .unwrap();

    assert!(response.is_empty());
    assert_eq!(response.body(), "{}");
    assert!(messages
        .lock()
        .unwrap()
        .iter()
        .any(|m| m.contains("unsuccessful HTTP request") && m.contains("404")));
}

#[tokio::test]
async fn redirect_is_not_followed() {
    let server = MockServer::start_async().await;
    let target = server
        .mock_async(|when, then| {
            when.method(GET).path("/moved-here");
            then.status(200).body("should never be fetched");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/moved");
            then.status(301)
                .header("location", server.url("/moved-here"));
        })
        .await;

    let (relay, _) = common::relay_with_policy(0, 5);
    let response = relay
        .get(&server.url("/moved"), &Payload::new(), false)
        .await
        .unwrap();

    assert!(response.is_empty());
    target.assert_hits_async(0).await;
}

#[tokio::test]
async fn connection_refused_returns_empty() {
    // Nothing listens on port 1.
    let (relay, messages) = common::relay_with_policy(0, 5);
    let response = relay
        .get("http://127.0.0.1:1/usage", &Payload::new(), false)
        .await
        .unwrap();

    assert!(response.is_empty());
    assert_eq!(response.body(), "{}");
    assert!(messages
        .lock()
        .unwrap()
        .iter()
        .any(|m| m.contains("Connection refused")));
}

#[tokio::test]
async fn timeout_is_retried_then_gives_up() {
    let server = MockServer::start_async().await;
    let slow = server
        .mock_async(|when, then| {
            when.method(GET).path("/slow");
            then.status(200)
                .body("too late")
                .delay(Duration::from_secs(5));
        })
        .await;

    let (relay, messages) = common::relay_with_policy(1, 1);
    let response = relay
        .get(&server.url("/slow"), &Payload::new(), false)
        .await
        .unwrap();

    assert!(response.is_empty());
    slow.assert_hits_async(2).await;

    let messages = messages.lock().unwrap();
    assert!(messages.iter().any(|m| m.contains("timed out 1 time(s) - retrying")));
    assert!(messages
        .iter()
        .any(|m| m.contains("returning an empty response")));
}
