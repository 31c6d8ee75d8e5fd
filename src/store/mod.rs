//! Application-state container.
//!
//! A `Store` owns the three slices behind one lock. Every dispatch reduces
//! the intent under that lock, then, once it is released, writes the
//! snapshot of each slice that changed and publishes the new state to
//! subscribers. Batches are numbered while the lock is held so a slow writer
//! never overwrites a newer snapshot or publishes an older state. Domain
//! intents are then handed to the effect runners.

mod app;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::effects::{CancelToken, Effects};
use crate::mvi::SliceState;
use crate::persist::{encode_slice, restore_slice, FileStorage, SnapshotStorage};
use crate::phase::{Phase, Verb};
use crate::slices::auth::{AuthIntent, AuthState, AuthVerb};
use crate::slices::currency::{CurrencyIntent, CurrencyState, CurrencyVerb};
use crate::slices::transaction::{TransactionIntent, TransactionState, TransactionVerb};

use app::Changed;
pub use app::{AppIntent, AppState};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to open state directory '{path}': {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Cloneable handle to the shared application state.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<AppState>,
    updates: watch::Sender<AppState>,
    storage: Arc<dyn SnapshotStorage>,
    /// Serializes writers.
    written: Mutex<WriteLog>,
    next_seq: AtomicU64,
    api: ApiClient,
    effects: Effects,
}

/// Result of one reduced batch, numbered in reduction order.
struct SnapshotBatch {
    seq: u64,
    state: AppState,
    /// Encoded snapshots of the slices the batch changed.
    snapshots: Vec<(&'static str, String)>,
}

/// Sequence numbers of the last snapshot saved per key and of the last
/// published state.
#[derive(Default)]
struct WriteLog {
    saved: HashMap<&'static str, u64>,
    published: u64,
}

impl Store {
    /// Build a store from configuration: backend client plus file snapshots
    /// under the configured state directory.
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        let api = ApiClient::new(&config.api)?;
        let dir = config.storage.resolved_dir();
        let storage = FileStorage::open(&dir).map_err(|source| StoreError::Storage {
            path: dir.clone(),
            source,
        })?;
        info!(dir = %dir.display(), base_url = %api.base_url(), "Store opened");
        Ok(Self::new(api, Arc::new(storage)))
    }

    /// Restore every slice from `storage` and re-attach a persisted token.
    pub fn new(api: ApiClient, storage: Arc<dyn SnapshotStorage>) -> Self {
        let state = AppState {
            auth: restore_slice(storage.as_ref()),
            currency: restore_slice(storage.as_ref()),
            transactions: restore_slice(storage.as_ref()),
        };
        api.set_token(state.auth.access_token.clone());
        debug!(
            logged_in = state.auth.is_logged_in(),
            currencies = state.currency.currencies.len(),
            transactions = state.transactions.transactions.len(),
            "Slices restored"
        );

        let (updates, _) = watch::channel(state.clone());
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                updates,
                storage,
                written: Mutex::new(WriteLog::default()),
                next_seq: AtomicU64::new(1),
                api,
                effects: Effects::default(),
            }),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.inner.state.lock().clone()
    }

    /// Project the current state without cloning all of it.
    pub fn select<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        f(&*self.inner.state.lock())
    }

    /// Receive every published state.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.inner.updates.subscribe()
    }

    /// Reduce `intent` and, for domain intents, start its effect.
    ///
    /// Domain intents must be dispatched from within a tokio runtime.
    pub fn dispatch(&self, intent: impl Into<AppIntent>) {
        let intent = intent.into();
        debug!(intent = ?intent, "Dispatch");
        self.inner.effects.supersede(&intent);
        self.apply([intent.clone()]);
        self.inner.effects.run(self, intent);
    }

    /// Reduce a batch of intents under one lock acquisition.
    pub(crate) fn apply(&self, intents: impl IntoIterator<Item = AppIntent>) {
        let mut state = self.inner.state.lock();
        let batch = self.apply_locked(&mut state, intents);
        drop(state);
        self.write(batch);
    }

    /// Like [`apply`](Self::apply), but nothing is reduced once `token` is
    /// cancelled. The check happens under the state lock, so a handler
    /// cancelled by a newer dispatch or a logout cannot write after it.
    pub(crate) fn apply_unless_cancelled(
        &self,
        token: &CancelToken,
        intents: impl IntoIterator<Item = AppIntent>,
    ) {
        let mut state = self.inner.state.lock();
        if token.is_cancelled() {
            return;
        }
        let batch = self.apply_locked(&mut state, intents);
        drop(state);
        self.write(batch);
    }

    /// Reduce and encode the snapshots to write once the lock is released.
    fn apply_locked(
        &self,
        state: &mut AppState,
        intents: impl IntoIterator<Item = AppIntent>,
    ) -> Option<SnapshotBatch> {
        let token_before = state.auth.access_token.clone();
        let mut changed = Changed::default();
        for intent in intents {
            state.apply(intent, &mut changed);
        }
        if changed.session_ended {
            self.inner.effects.end_session();
        }
        if !changed.any() {
            return None;
        }

        if state.auth.access_token != token_before {
            self.inner.api.set_token(state.auth.access_token.clone());
        }

        let mut snapshots = Vec::with_capacity(3);
        let encoded = [
            changed.auth.then(|| (AuthState::KEY, encode_slice(&state.auth))),
            changed
                .currency
                .then(|| (CurrencyState::KEY, encode_slice(&state.currency))),
            changed
                .transactions
                .then(|| (TransactionState::KEY, encode_slice(&state.transactions))),
        ];
        for (key, result) in encoded.into_iter().flatten() {
            match result {
                Ok(snapshot) => snapshots.push((key, snapshot)),
                Err(error) => warn!(error = %error, "Failed to persist snapshot"),
            }
        }
        Some(SnapshotBatch {
            seq: self.inner.next_seq.fetch_add(1, Ordering::Relaxed),
            state: state.clone(),
            snapshots,
        })
    }

    /// Save and publish a batch outside the state lock. Whatever a newer
    /// batch already saved or published is left alone.
    fn write(&self, batch: Option<SnapshotBatch>) {
        let Some(batch) = batch else {
            return;
        };
        let mut log = self.inner.written.lock();
        for (key, snapshot) in batch.snapshots {
            if log.saved.get(key).is_some_and(|&seq| seq > batch.seq) {
                debug!(key, seq = batch.seq, "Skipping stale snapshot");
                continue;
            }
            match self.inner.storage.save(key, &snapshot) {
                Ok(()) => {
                    log.saved.insert(key, batch.seq);
                }
                Err(error) => warn!(error = %error, "Failed to persist snapshot"),
            }
        }
        if batch.seq > log.published {
            log.published = batch.seq;
            self.inner.updates.send_replace(batch.state);
        }
    }

    /// Wait until the phase picked by `select` is terminal and return it.
    ///
    /// The phase is left in place; the caller acknowledges it.
    pub async fn settle<V, F>(&self, select: F) -> Phase<V>
    where
        V: Verb,
        F: Fn(&AppState) -> &Phase<V>,
    {
        let mut updates = self.subscribe();
        let settled = updates
            .wait_for(|state| select(state).is_terminal())
            .await
            .map(|state| select(&*state).clone());
        match settled {
            Ok(phase) => phase,
            Err(_) => select(&self.state()).clone(),
        }
    }

    /// If the selected phase is terminal, return it and apply `reset` in
    /// the same critical section, so the terminal value is observed once.
    pub fn take_terminal<V, F>(&self, select: F, reset: impl Into<AppIntent>) -> Option<Phase<V>>
    where
        V: Verb,
        F: Fn(&AppState) -> &Phase<V>,
    {
        let mut state = self.inner.state.lock();
        let phase = select(&*state);
        if !phase.is_terminal() {
            return None;
        }
        let phase = phase.clone();
        let batch = self.apply_locked(&mut state, [reset.into()]);
        drop(state);
        self.write(batch);
        Some(phase)
    }

    pub fn take_auth_terminal(&self) -> Option<Phase<AuthVerb>> {
        self.take_terminal(|state| &state.auth.phase, AuthIntent::ResetPhase)
    }

    pub fn take_currency_terminal(&self) -> Option<Phase<CurrencyVerb>> {
        self.take_terminal(|state| &state.currency.phase, CurrencyIntent::ResetPhase)
    }

    pub fn take_transaction_terminal(&self) -> Option<Phase<TransactionVerb>> {
        self.take_terminal(|state| &state.transactions.phase, TransactionIntent::ResetPhase)
    }

    pub fn acknowledge_auth(&self) {
        self.dispatch(AuthIntent::ResetPhase);
    }

    pub fn acknowledge_currency(&self) {
        self.dispatch(CurrencyIntent::ResetPhase);
    }

    pub fn acknowledge_transactions(&self) {
        self.dispatch(TransactionIntent::ResetPhase);
    }

    /// Number of effect handlers currently running.
    pub fn in_flight(&self) -> usize {
        self.inner.effects.in_flight()
    }

    /// Cancel every in-flight effect handler.
    pub fn shutdown(&self) {
        let live = self.in_flight();
        self.inner.effects.cancel_all();
        info!(cancelled = live, "Store shut down");
    }
}
