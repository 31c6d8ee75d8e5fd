mod common;

use common::{transaction_json, user};
use walletsync::domain::{AccessToken, Theme, Transaction};
use walletsync::mvi::Reducer;
use walletsync::phase::{ErrorCode, Phase};
use walletsync::slices::auth::{AuthIntent, AuthReducer, AuthState, AuthVerb};
use walletsync::slices::currency::{CurrencyIntent, CurrencyReducer, CurrencyState, CurrencyVerb};
use walletsync::slices::transaction::{
    TransactionIntent, TransactionReducer, TransactionState, TransactionVerb,
};

fn transaction(id: i64, title: &str) -> Transaction {
    serde_json::from_value(transaction_json(id, title, "1.00", "income")).unwrap()
}

fn with_transactions(ids: &[i64]) -> TransactionState {
    TransactionState {
        transactions: ids.iter().map(|id| transaction(*id, "t")).collect(),
        phase: Phase::Idle,
    }
}

#[test]
fn reset_after_terminal_reads_idle() {
    let failed = CurrencyReducer::reduce(
        CurrencyState::default(),
        CurrencyIntent::SetPhase(Phase::Failed(CurrencyVerb::Pull, ErrorCode::Api)),
    );
    assert!(failed.phase.is_terminal());

    let reset = CurrencyReducer::reduce(failed, CurrencyIntent::ResetPhase);
    assert!(reset.phase.is_idle());
    assert_eq!(reset.phase.error(), None);
}

#[test]
fn domain_intent_only_marks_pending() {
    let before = with_transactions(&[1, 2]);
    let after = TransactionReducer::reduce(before.clone(), TransactionIntent::Delete { id: 1 });
    assert_eq!(after.transactions, before.transactions);
    assert_eq!(after.phase, Phase::Pending(TransactionVerb::Delete));
    assert_eq!(after.phase.tag(), Some("deleting"));
}

#[test]
fn upsert_unknown_id_prepends() {
    let state = TransactionReducer::reduce(
        with_transactions(&[1, 2]),
        TransactionIntent::Upsert(transaction(3, "new")),
    );
    let ids: Vec<_> = state.transactions.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[test]
fn upsert_known_id_replaces_in_place() {
    let state = TransactionReducer::reduce(
        with_transactions(&[1, 2, 3]),
        TransactionIntent::Upsert(transaction(2, "edited")),
    );
    let ids: Vec<_> = state.transactions.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(state.get(2).unwrap().title, "edited");
}

#[test]
fn remove_absent_id_is_noop() {
    let before = with_transactions(&[1, 2]);
    let after = TransactionReducer::reduce(before.clone(), TransactionIntent::Remove { id: 42 });
    assert_eq!(after, before);
}

#[test]
fn logout_keeps_preferences() {
    let state = AuthState {
        user: Some(user(1)),
        access_token: Some(AccessToken::new("tok")),
        theme: Theme::Light,
        lang: "de".into(),
        phase: Phase::Succeeded(AuthVerb::Login),
        ..AuthState::default()
    };
    let state = AuthReducer::reduce(state, AuthIntent::Logout);
    assert!(!state.is_logged_in());
    assert!(state.phase.is_idle());
    assert_eq!(state.theme, Theme::Light);
    assert_eq!(state.lang, "de");
}

#[test]
fn set_session_does_not_touch_phase() {
    let state = AuthReducer::reduce(
        AuthState::default(),
        AuthIntent::login("a@b.com", "pw"),
    );
    let state = AuthReducer::reduce(
        state,
        AuthIntent::SetSession {
            user: user(1),
            access_token: AccessToken::new("t"),
        },
    );
    assert!(state.is_logged_in());
    assert_eq!(state.phase, Phase::Pending(AuthVerb::Login));
}

#[test]
fn verb_tags_match_view_labels() {
    let cases = [
        (Phase::Pending(TransactionVerb::Add), "adding"),
        (Phase::Succeeded(TransactionVerb::Add), "adding-success"),
        (Phase::Pending(TransactionVerb::Update), "updating"),
        (
            Phase::Failed(TransactionVerb::Update, ErrorCode::Api),
            "updating-error",
        ),
        (Phase::Succeeded(TransactionVerb::Delete), "deleted-success"),
        (Phase::Succeeded(TransactionVerb::Pull), "success"),
    ];
    for (phase, tag) in cases {
        assert_eq!(phase.tag(), Some(tag));
    }
    assert_eq!(
        Phase::Succeeded(AuthVerb::UpdateCurrency).tag(),
        Some("currency-updating-success")
    );
}
