//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::Arc;
use walletsync::api::ApiClient;
use walletsync::config::ApiConfig;
use walletsync::domain::{AccessToken, User};
use walletsync::persist::MemoryStorage;
use walletsync::slices::auth::AuthIntent;
use walletsync::store::Store;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Base URL where nothing listens: every request fails at the transport.
pub fn unreachable_base_url() -> String {
    format!("http://127.0.0.1:{}/api", free_port())
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 1,
    }
}

/// Store backed by in-memory snapshots.
pub fn memory_store(base_url: &str) -> (Store, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let api = ApiClient::new(&api_config(base_url)).expect("client");
    (Store::new(api, storage.clone()), storage)
}

pub fn user_json(id: i64, name: &str) -> Value {
    json!({ "id": id, "name": name, "email": format!("{}@b.com", name.to_lowercase()) })
}

pub fn transaction_json(id: i64, title: &str, amount: &str, kind: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "amount": amount,
        "type": kind,
        "category_id": 1,
        "created_at": "2024-05-01 12:00:00",
        "user_id": 1,
        "currency_id": null
    })
}

pub fn user(id: i64) -> User {
    serde_json::from_value(user_json(id, "A")).expect("user fixture")
}

/// Put a session in place without talking to the backend.
pub fn log_in(store: &Store, id: i64, token: &str) {
    store.dispatch(AuthIntent::SetSession {
        user: user(id),
        access_token: AccessToken::new(token),
    });
}
