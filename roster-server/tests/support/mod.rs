use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{Value, json};

use roster_core::UserDirectory;
use roster_core::api::routes::{utils as route_utils, v1 as api_v1};
use roster_core::credentials::{CredentialManager, WorkFactor};
use roster_core::store::{InMemoryUserStore, UserStore};
use roster_core::user::UserRecord;
use roster_server::infra::{app_state::AppState, config::Config};
use roster_server::users::auth::TokenService;

/// Signing key shared by the app under test and tokens forged in tests.
pub const TOKEN_KEY: &str = "test-token-key";

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryUserStore>,
    pub credentials: CredentialManager,
}

pub fn test_credentials() -> CredentialManager {
    // Minimal cost to keep the suite fast.
    CredentialManager::new(WorkFactor {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .expect("valid work factor")
}

fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        database_url: None,
        cors_allowed_origins: vec!["*".to_string()],
        auth_token_key: TOKEN_KEY.to_string(),
        auth_token_ttl_secs: 900,
        password_work_factor: WorkFactor {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
    }
}

/// Build the full application router over an in-memory store.
pub fn build_test_app() -> TestApp {
    let credentials = test_credentials();
    let store = Arc::new(InMemoryUserStore::new());
    let store_port: Arc<dyn UserStore> = store.clone();

    let directory = UserDirectory::new(store_port, credentials.clone());
    let tokens = TokenService::new(TOKEN_KEY, 900);
    let state = AppState::new(
        Arc::new(directory),
        Arc::new(tokens),
        Arc::new(test_config()),
    );

    let server = TestServer::new(roster_server::create_app(state)).expect("test server builds");

    TestApp {
        server,
        store,
        credentials,
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Path to a single user's resource.
pub fn user_path(username: &str) -> String {
    route_utils::replace_param(api_v1::users::ITEM, "{username}", username)
}

pub async fn register_user(server: &TestServer, username: &str, password: &str) -> Value {
    let response = server
        .post(api_v1::auth::REGISTER)
        .json(&json!({
            "username": username,
            "password": password,
            "first_name": "Test",
            "last_name": "User",
            "email": format!("{username}@example.com"),
            "phone": "555-0100"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post(api_v1::auth::LOGIN)
        .json(&json!({
            "username": username,
            "password": password
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    body["data"]["token"]
        .as_str()
        .expect("login returns a token")
        .to_string()
}

/// Insert an admin account directly through the store port; registration
/// never grants the admin flag.
pub async fn seed_admin(app: &TestApp, username: &str, password: &str) {
    let record = UserRecord {
        username: username.to_string(),
        password_hash: app.credentials.hash(password).expect("hashing succeeds"),
        first_name: "Admin".to_string(),
        last_name: "User".to_string(),
        email: format!("{username}@example.com"),
        phone: "555-0199".to_string(),
        is_admin: true,
    };

    app.store
        .insert_user(&record)
        .await
        .expect("admin seed succeeds");
}
