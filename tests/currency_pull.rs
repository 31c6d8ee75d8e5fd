//! Currency slice effects, single-flight and shutdown.

mod common;

use common::mock_backend::{MockBackend, MockResponse};
use common::{memory_store, unreachable_base_url};
use serde_json::json;
use std::time::Duration;
use walletsync::domain::Currency;
use walletsync::phase::ErrorCode;
use walletsync::selectors;
use walletsync::slices::currency::CurrencyIntent;

fn currency(id: i64, code: &str) -> Currency {
    Currency {
        id,
        code: code.into(),
        name: code.into(),
        symbol: "¤".into(),
    }
}

fn currencies_body(codes: &[(i64, &str)]) -> serde_json::Value {
    let list: Vec<_> = codes
        .iter()
        .map(|(id, code)| json!({ "id": id, "code": code, "name": code, "symbol": "¤" }))
        .collect();
    json!({ "currencies": list })
}

#[tokio::test]
async fn pull_replaces_list_and_persists() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(currencies_body(&[(1, "USD"), (2, "EUR")])))
        .await;
    let (store, storage) = memory_store(&backend.base_url());

    store.dispatch(CurrencyIntent::Pull);
    let phase = store.settle(selectors::currency_phase).await;

    assert_eq!(phase.tag(), Some("success"));
    let state = store.state();
    assert_eq!(state.currency.currencies, vec![currency(1, "USD"), currency(2, "EUR")]);
    assert!(storage.snapshot("currencies").unwrap().contains("EUR"));
    assert_eq!(backend.captured_requests().await[0].method, "GET");
}

#[tokio::test]
async fn network_failure_leaves_list_unchanged() {
    let (store, _) = memory_store(&unreachable_base_url());
    store.dispatch(CurrencyIntent::SetCurrencies(vec![currency(1, "USD")]));

    store.dispatch(CurrencyIntent::Pull);
    let phase = store.settle(selectors::currency_phase).await;

    assert_eq!(phase.tag(), Some("error"));
    assert_eq!(phase.error(), Some(&ErrorCode::Api));
    assert_eq!(store.state().currency.currencies, vec![currency(1, "USD")]);
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(json!({ "currencies": "nope" })))
        .await;
    let (store, _) = memory_store(&backend.base_url());

    store.dispatch(CurrencyIntent::Pull);
    let phase = store.settle(selectors::currency_phase).await;

    assert_eq!(phase.error(), Some(&ErrorCode::InvalidResponse));
    assert!(store.state().currency.currencies.is_empty());
}

#[tokio::test]
async fn newer_pull_supersedes_older_one() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(currencies_body(&[(1, "USD")])).with_delay(300))
        .await;
    backend
        .enqueue_response(MockResponse::json(currencies_body(&[(2, "EUR")])))
        .await;
    let (store, _) = memory_store(&backend.base_url());

    store.dispatch(CurrencyIntent::Pull);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(backend.captured_requests().await.len(), 1);

    store.dispatch(CurrencyIntent::Pull);
    let phase = store.settle(selectors::currency_phase).await;
    assert_eq!(phase.tag(), Some("success"));
    assert_eq!(store.take_currency_terminal(), Some(phase));

    // Past the slow response: the cancelled handler must not write.
    tokio::time::sleep(Duration::from_millis(400)).await;
    let state = store.state();
    assert_eq!(state.currency.currencies, vec![currency(2, "EUR")]);
    assert!(state.currency.phase.is_idle());
    assert_eq!(store.in_flight(), 0);
}

#[tokio::test]
async fn shutdown_cancels_in_flight_pull() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(currencies_body(&[(1, "USD")])).with_delay(300))
        .await;
    let (store, _) = memory_store(&backend.base_url());

    store.dispatch(CurrencyIntent::Pull);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(store.in_flight(), 1);
    store.shutdown();

    tokio::time::sleep(Duration::from_millis(400)).await;
    let state = store.state();
    assert!(state.currency.currencies.is_empty());
    assert_eq!(state.currency.phase.tag(), Some("loading"));
    assert_eq!(store.in_flight(), 0);
}
