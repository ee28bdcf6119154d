// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Billing webhook tests.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::request;

const KEY: &str = "ApiKey test_polka_key";

#[tokio::test]
async fn test_upgrade_event_promotes_user() {
    let (app, state, _dir) = common::create_test_app().await;
    let user = state.user_service.create("a@x.com", "pw1").await.unwrap();
    assert!(!user.is_privileged);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/webhooks",
            Some(KEY),
            Some(json!({"event": "user.upgraded", "data": {"user_id": user.id}})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let login = app
        .clone()
        .oneshot(request(
            "POST",
            "/login",
            None,
            Some(json!({"email": "a@x.com", "password": "pw1"})),
        ))
        .await
        .unwrap();
    assert_eq!(common::json_body(login).await["is_chirpy_red"], true);

    // Upgrading again is harmless
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/webhooks",
            Some(KEY),
            Some(json!({"event": "user.upgraded", "data": {"user_id": user.id}})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_wrong_or_missing_key_rejected() {
    let (app, state, _dir) = common::create_test_app().await;
    let user = state.user_service.create("a@x.com", "pw1").await.unwrap();
    let event = json!({"event": "user.upgraded", "data": {"user_id": user.id}});

    for auth in [None, Some("ApiKey wrong"), Some("Bearer test_polka_key")] {
        let response = app
            .clone()
            .oneshot(request("POST", "/webhooks", auth, Some(event.clone())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "auth = {:?}", auth);
    }

    let doc = state.store.load().await.unwrap();
    assert!(!doc.users[&user.id].is_privileged);
}

#[tokio::test]
async fn test_other_events_acknowledged() {
    let (app, state, _dir) = common::create_test_app().await;
    let user = state.user_service.create("a@x.com", "pw1").await.unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/webhooks",
            Some(KEY),
            Some(json!({"event": "user.payment_failed", "data": {"user_id": user.id}})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let doc = state.store.load().await.unwrap();
    assert!(!doc.users[&user.id].is_privileged);
}

#[tokio::test]
async fn test_upgrade_unknown_user() {
    let (app, _state, _dir) = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/webhooks",
            Some(KEY),
            Some(json!({"event": "user.upgraded", "data": {"user_id": 42}})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upgrade_without_data() {
    let (app, _state, _dir) = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/webhooks",
            Some(KEY),
            Some(json!({"event": "user.upgraded"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_key_checked_before_body() {
    let (app, _state, _dir) = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(request("POST", "/webhooks", None, Some(json!({"nope": 1}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(request("POST", "/webhooks", Some(KEY), Some(json!({"nope": 1}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(common::json_body(response).await["error"].is_string());
}
