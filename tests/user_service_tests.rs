// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User service tests: registration, login, updates and upgrades.

use chirpy::error::AppError;
use futures_util::future::join_all;

mod common;

#[tokio::test]
async fn test_create_hashes_password() {
    let (state, _dir) = common::test_state().await;

    let user = state.user_service.create("a@x.com", "pw1").await.unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.email, "a@x.com");
    assert!(!user.is_privileged);
    assert_ne!(user.password_hash, "pw1");
    assert!(bcrypt::verify("pw1", &user.password_hash).unwrap());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let (state, _dir) = common::test_state().await;

    state.user_service.create("a@x.com", "pw1").await.unwrap();
    let result = state.user_service.create("a@x.com", "other").await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(state.store.load().await.unwrap().users.len(), 1);
}

#[tokio::test]
async fn test_empty_password_rejected() {
    let (state, _dir) = common::test_state().await;

    let result = state.user_service.create("a@x.com", "").await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_authenticate() {
    let (state, _dir) = common::test_state().await;
    state.user_service.create("a@x.com", "pw1").await.unwrap();

    let user = state
        .user_service
        .authenticate("a@x.com", "pw1")
        .await
        .unwrap();
    assert_eq!(user.id, 1);

    assert!(matches!(
        state.user_service.authenticate("a@x.com", "wrong").await,
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        state.user_service.authenticate("b@x.com", "pw1").await,
        Err(AppError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn test_update_by_token_targets_token_subject() {
    let (state, _dir) = common::test_state().await;
    state.user_service.create("a@x.com", "pw1").await.unwrap();
    let bob = state.user_service.create("b@x.com", "pw2").await.unwrap();

    let token = state.token_service.issue_session_token(bob.id, 0).unwrap();
    let updated = state
        .user_service
        .update_by_token(&token, "bob@x.com", "new-pw")
        .await
        .unwrap();

    assert_eq!(updated.id, bob.id);
    assert_eq!(updated.email, "bob@x.com");

    // Old credentials no longer work, new ones do, and user 1 is untouched
    assert!(state
        .user_service
        .authenticate("b@x.com", "pw2")
        .await
        .is_err());
    assert!(state
        .user_service
        .authenticate("bob@x.com", "new-pw")
        .await
        .is_ok());
    assert!(state
        .user_service
        .authenticate("a@x.com", "pw1")
        .await
        .is_ok());
}

#[tokio::test]
async fn test_update_by_token_keeps_privilege() {
    let (state, _dir) = common::test_state().await;
    let user = state.user_service.create("a@x.com", "pw1").await.unwrap();
    state.user_service.promote_to_privileged(user.id).await.unwrap();

    let token = state.token_service.issue_session_token(user.id, 0).unwrap();
    let updated = state
        .user_service
        .update_by_token(&token, "a@x.com", "pw2")
        .await
        .unwrap();

    assert!(updated.is_privileged);
}

#[tokio::test]
async fn test_update_by_token_rejects_bad_token() {
    let (state, _dir) = common::test_state().await;
    state.user_service.create("a@x.com", "pw1").await.unwrap();

    let result = state
        .user_service
        .update_by_token("garbage", "a@x.com", "pw2")
        .await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn test_update_by_token_for_unknown_user() {
    let (state, _dir) = common::test_state().await;

    let token = state.token_service.issue_session_token(7, 0).unwrap();
    let result = state
        .user_service
        .update_by_token(&token, "ghost@x.com", "pw")
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(state.store.load().await.unwrap().users.is_empty());
}

#[tokio::test]
async fn test_promote_to_privileged() {
    let (state, _dir) = common::test_state().await;
    let user = state.user_service.create("a@x.com", "pw1").await.unwrap();

    state.user_service.promote_to_privileged(user.id).await.unwrap();
    assert!(state.store.load().await.unwrap().users[&user.id].is_privileged);

    assert!(matches!(
        state.user_service.promote_to_privileged(42).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_concurrent_signups_with_same_email() {
    let (state, _dir) = common::test_state().await;

    let attempts = (0..8).map(|i| {
        let users = state.user_service.clone();
        async move { users.create("same@x.com", &format!("pw{}", i)).await }
    });
    let results = join_all(attempts).await;

    let created = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(AppError::Conflict(_))))
        .count();
    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);

    let doc = state.store.load().await.unwrap();
    assert_eq!(doc.users.len(), 1);
}
