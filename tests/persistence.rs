//! Slice snapshots survive reopening the store on the same state directory.

mod common;

use common::{log_in, transaction_json, unreachable_base_url};
use std::path::Path;
use tempfile::TempDir;
use walletsync::config::Config;
use walletsync::domain::{Theme, Transaction};
use walletsync::phase::{ErrorCode, Phase};
use walletsync::slices::auth::AuthIntent;
use walletsync::slices::currency::{CurrencyIntent, CurrencyVerb};
use walletsync::slices::transaction::{TransactionIntent, TransactionVerb};
use walletsync::store::Store;

fn config_for(dir: &Path) -> Config {
    let mut config = Config::default();
    config.api.base_url = unreachable_base_url();
    config.storage.state_dir = Some(dir.to_path_buf());
    config
}

fn transaction(id: i64) -> Transaction {
    serde_json::from_value(transaction_json(id, "Rent", "500.00", "expense")).unwrap()
}

#[test]
fn session_and_data_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path());

    {
        let store = Store::open(&config).unwrap();
        log_in(&store, 1, "persisted-token");
        store.dispatch(AuthIntent::SetTheme(Theme::Light));
        store.dispatch(TransactionIntent::SetTransactions(vec![transaction(3), transaction(2)]));
    }

    for file in ["auth.json", "userTransactions.json"] {
        assert!(dir.path().join(file).exists(), "{} missing", file);
    }

    let store = Store::open(&config).unwrap();
    let state = store.state();
    assert_eq!(state.auth.user.as_ref().map(|u| u.id), Some(1));
    assert_eq!(
        state.auth.access_token.as_ref().map(|t| t.expose()),
        Some("persisted-token")
    );
    assert_eq!(state.auth.theme, Theme::Light);
    assert_eq!(state.transactions.transactions, vec![transaction(3), transaction(2)]);
    assert!(store.api().has_token());
}

#[test]
fn pending_phase_is_settled_on_restore() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path());

    {
        let store = Store::open(&config).unwrap();
        store.dispatch(TransactionIntent::SetPhase(Phase::Pending(TransactionVerb::Add)));
        store.dispatch(CurrencyIntent::SetPhase(Phase::Failed(
            CurrencyVerb::Pull,
            ErrorCode::Api,
        )));
    }

    let state = Store::open(&config).unwrap().state();
    assert!(state.transactions.phase.is_idle());
    assert_eq!(
        state.currency.phase,
        Phase::Failed(CurrencyVerb::Pull, ErrorCode::Api)
    );
}

#[test]
fn corrupt_snapshot_starts_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("auth.json"), "{ not json").unwrap();

    let store = Store::open(&config_for(dir.path())).unwrap();
    let state = store.state();
    assert!(state.auth.user.is_none());
    assert_eq!(state.auth.lang, "en");
    assert!(!store.api().has_token());
}

#[test]
fn logout_is_persisted() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path());

    {
        let store = Store::open(&config).unwrap();
        log_in(&store, 1, "tok");
        store.dispatch(TransactionIntent::SetTransactions(vec![transaction(1)]));
        store.dispatch(AuthIntent::Logout);
    }

    let state = Store::open(&config).unwrap().state();
    assert!(state.auth.access_token.is_none());
    assert!(state.transactions.transactions.is_empty());
}
