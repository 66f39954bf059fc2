use axum::http::StatusCode;
use roster_core::api::routes::v1 as api_v1;
use serde_json::{Value, json};

#[path = "support/mod.rs"]
mod support;

use support::{bearer, build_test_app, login, register_user, seed_admin, user_path};

#[tokio::test]
async fn register_creates_account_and_hides_password_hash() {
    let app = build_test_app();

    let body = register_user(&app.server, "alice", "pw123").await;

    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["is_admin"], false);
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = build_test_app();
    register_user(&app.server, "alice", "pw123").await;

    let response = app
        .server
        .post(api_v1::auth::REGISTER)
        .json(&json!({
            "username": "alice",
            "password": "other",
            "first_name": "Alice",
            "last_name": "Again",
            "email": "alice2@example.com",
            "phone": "555-0101"
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = build_test_app();
    register_user(&app.server, "alice", "pw123").await;

    let wrong_password = app
        .server
        .post(api_v1::auth::LOGIN)
        .json(&json!({"username": "alice", "password": "wrong"}))
        .await;
    wrong_password.assert_status(StatusCode::UNAUTHORIZED);

    let unknown_user = app
        .server
        .post(api_v1::auth::LOGIN)
        .json(&json!({"username": "mallory", "password": "wrong"}))
        .await;
    unknown_user.assert_status(StatusCode::UNAUTHORIZED);

    // Identical bodies: no signal distinguishing the two failure causes.
    let first: Value = wrong_password.json();
    let second: Value = unknown_user.json();
    assert_eq!(first, second);
}

#[tokio::test]
async fn listing_requires_authentication_and_omits_usernames() {
    let app = build_test_app();
    register_user(&app.server, "bob", "pw123").await;
    register_user(&app.server, "alice", "pw123").await;

    let anonymous = app.server.get(api_v1::users::COLLECTION).await;
    anonymous.assert_status(StatusCode::UNAUTHORIZED);

    let token = login(&app.server, "alice", "pw123").await;
    let response = app
        .server
        .get(api_v1::users::COLLECTION)
        .add_header("Authorization", bearer(&token))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let users = body["data"].as_array().expect("users array");
    assert_eq!(users.len(), 2);

    // Ordered by username ascending: alice before bob.
    assert_eq!(users[0]["email"], "alice@example.com");
    assert_eq!(users[1]["email"], "bob@example.com");

    // The list projection carries profile fields only.
    for user in users {
        assert!(user.get("username").is_none());
        assert!(user.get("password_hash").is_none());
    }
}

#[tokio::test]
async fn get_user_returns_record_or_not_found() {
    let app = build_test_app();
    register_user(&app.server, "alice", "pw123").await;
    let token = login(&app.server, "alice", "pw123").await;

    let found = app
        .server
        .get(&user_path("alice"))
        .add_header("Authorization", bearer(&token))
        .await;
    found.assert_status_ok();
    let body: Value = found.json();
    assert_eq!(body["data"]["username"], "alice");

    let missing = app
        .server
        .get(&user_path("ghost"))
        .add_header("Authorization", bearer(&token))
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn users_may_update_themselves_but_not_others() {
    let app = build_test_app();
    register_user(&app.server, "alice", "pw123").await;
    register_user(&app.server, "bob", "pw123").await;
    let token = login(&app.server, "alice", "pw123").await;

    let own = app
        .server
        .patch(&user_path("alice"))
        .add_header("Authorization", bearer(&token))
        .json(&json!({"email": "new@example.com"}))
        .await;
    own.assert_status_ok();
    let body: Value = own.json();
    assert_eq!(body["data"]["email"], "new@example.com");

    let other = app
        .server
        .patch(&user_path("bob"))
        .add_header("Authorization", bearer(&token))
        .json(&json!({"email": "hijack@example.com"}))
        .await;
    other.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn updates_outside_the_whitelist_are_rejected() {
    let app = build_test_app();
    register_user(&app.server, "alice", "pw123").await;
    let token = login(&app.server, "alice", "pw123").await;

    for payload in [
        json!({"is_admin": true}),
        json!({"username": "superalice"}),
        json!({"password_hash": "gotcha"}),
        json!({"email": "ok@example.com", "is_admin": true}),
    ] {
        let response = app
            .server
            .patch(&user_path("alice"))
            .add_header("Authorization", bearer(&token))
            .json(&payload)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    // An empty change set is a bad request too: nothing to update.
    let empty = app
        .server
        .patch(&user_path("alice"))
        .add_header("Authorization", bearer(&token))
        .json(&json!({}))
        .await;
    empty.assert_status(StatusCode::BAD_REQUEST);

    // None of the rejected payloads touched the record.
    let current = app
        .server
        .get(&user_path("alice"))
        .add_header("Authorization", bearer(&token))
        .await;
    let body: Value = current.json();
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["is_admin"], false);
    assert_eq!(body["data"]["username"], "alice");
}

#[tokio::test]
async fn admins_may_update_and_delete_any_user() {
    let app = build_test_app();
    register_user(&app.server, "alice", "pw123").await;
    seed_admin(&app, "root", "adminpw").await;
    let admin_token = login(&app.server, "root", "adminpw").await;

    let update = app
        .server
        .patch(&user_path("alice"))
        .add_header("Authorization", bearer(&admin_token))
        .json(&json!({"phone": "555-0123"}))
        .await;
    update.assert_status_ok();

    let delete = app
        .server
        .delete(&user_path("alice"))
        .add_header("Authorization", bearer(&admin_token))
        .await;
    delete.assert_status(StatusCode::NO_CONTENT);

    let gone = app
        .server
        .get(&user_path("alice"))
        .add_header("Authorization", bearer(&admin_token))
        .await;
    gone.assert_status(StatusCode::NOT_FOUND);

    let missing = app
        .server
        .delete(&user_path("ghost"))
        .add_header("Authorization", bearer(&admin_token))
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_admins_may_not_delete_even_themselves() {
    let app = build_test_app();
    register_user(&app.server, "alice", "pw123").await;
    let token = login(&app.server, "alice", "pw123").await;

    let own = app
        .server
        .delete(&user_path("alice"))
        .add_header("Authorization", bearer(&token))
        .await;
    own.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn account_lifecycle_end_to_end() {
    let app = build_test_app();
    seed_admin(&app, "root", "adminpw").await;

    let registered = register_user(&app.server, "alice", "pw123").await;
    assert_eq!(registered["data"]["first_name"], "Test");

    let alice_token = login(&app.server, "alice", "pw123").await;

    let update = app
        .server
        .patch(&user_path("alice"))
        .add_header("Authorization", bearer(&alice_token))
        .json(&json!({"email": "new@example.com"}))
        .await;
    update.assert_status_ok();

    let escalation = app
        .server
        .patch(&user_path("alice"))
        .add_header("Authorization", bearer(&alice_token))
        .json(&json!({"is_admin": true}))
        .await;
    escalation.assert_status(StatusCode::BAD_REQUEST);

    let self_delete = app
        .server
        .delete(&user_path("alice"))
        .add_header("Authorization", bearer(&alice_token))
        .await;
    self_delete.assert_status(StatusCode::FORBIDDEN);

    let admin_token = login(&app.server, "root", "adminpw").await;
    let delete = app
        .server
        .delete(&user_path("alice"))
        .add_header("Authorization", bearer(&admin_token))
        .await;
    delete.assert_status(StatusCode::NO_CONTENT);

    let gone = app
        .server
        .get(&user_path("alice"))
        .add_header("Authorization", bearer(&admin_token))
        .await;
    gone.assert_status(StatusCode::NOT_FOUND);
}
