//! Effect runners: the asynchronous half of each slice.
//!
//! A domain intent is reduced to `Pending(verb)` by the store, then handed to
//! the runner of its slice. The runner performs exactly one backend call and
//! reports back through result intents, finishing with a terminal phase.
//! At most one handler per verb is live; a newer intent of the same verb
//! cancels the older handler, which then dispatches nothing further.

mod auth;
mod cancel;
mod currency;
mod tasks;
mod transaction;

use std::future::Future;
use std::hash::Hash;

use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::domain::UserId;
use crate::phase::{Phase, Verb};
use crate::store::{AppIntent, Store};

pub use cancel::CancelToken;
pub use tasks::TaskMap;

use auth::AuthEffects;
use currency::CurrencyEffects;
use transaction::TransactionEffects;

/// Runners of all three slices.
#[derive(Default)]
pub(crate) struct Effects {
    auth: AuthEffects,
    currency: CurrencyEffects,
    transaction: TransactionEffects,
}

impl Effects {
    /// Start the handler for `intent` if it is a domain intent.
    pub fn run(&self, store: &Store, intent: AppIntent) {
        match intent {
            AppIntent::Auth(intent) => self.auth.run(store, intent),
            AppIntent::Currency(intent) => self.currency.run(store, intent),
            AppIntent::Transaction(intent) => self.transaction.run(store, intent),
        }
    }

    /// Cancel the live handler that `intent` is about to replace, so the
    /// older handler cannot write once the new intent has been reduced.
    pub fn supersede(&self, intent: &AppIntent) {
        match intent {
            AppIntent::Auth(intent) => {
                if let Some(verb) = intent.verb() {
                    self.auth.tasks.cancel(verb);
                }
            }
            AppIntent::Currency(intent) => {
                if let Some(verb) = intent.verb() {
                    self.currency.tasks.cancel(verb);
                }
            }
            AppIntent::Transaction(intent) => {
                if let Some(verb) = intent.verb() {
                    self.transaction.tasks.cancel(verb);
                }
            }
        }
    }

    /// Cancel every handler that acts for the logged-in user. Currency
    /// pulls are not user-scoped and keep running.
    pub fn end_session(&self) {
        self.auth.tasks.cancel_all();
        self.transaction.tasks.cancel_all();
    }

    /// Number of live handlers across all slices.
    pub fn in_flight(&self) -> usize {
        self.auth.tasks.len() + self.currency.tasks.len() + self.transaction.tasks.len()
    }

    pub fn cancel_all(&self) {
        self.auth.tasks.cancel_all();
        self.currency.tasks.cancel_all();
        self.transaction.tasks.cancel_all();
    }
}

/// What a running handler can touch: the store and its own cancel token.
#[derive(Clone)]
pub(crate) struct EffectContext {
    store: Store,
    token: CancelToken,
}

impl EffectContext {
    fn api(&self) -> &ApiClient {
        self.store.api()
    }

    /// Id of the logged-in user.
    fn user_id(&self) -> Result<UserId, ApiError> {
        self.store
            .select(|state| state.auth.user.as_ref().map(|user| user.id))
            .ok_or(ApiError::NotAuthenticated)
    }

    /// Apply a batch of result intents atomically. A cancelled handler
    /// emits nothing; the token is checked under the store lock.
    fn emit<I: Into<AppIntent>>(&self, intents: impl IntoIterator<Item = I>) {
        self.store
            .apply_unless_cancelled(&self.token, intents.into_iter().map(Into::into));
    }
}

/// Start `call` as the single live handler for `verb` in `tasks`.
///
/// The handler first marks the slice `Pending(verb)`, then awaits `call`.
/// Its data intents are applied together with `Succeeded(verb)`; an error
/// becomes `Failed(verb, code)`.
fn spawn_effect<V, I, F, Fut>(
    tasks: &TaskMap<V>,
    store: &Store,
    slice: &'static str,
    verb: V,
    set_phase: fn(Phase<V>) -> I,
    call: F,
) where
    V: Verb + Hash,
    I: Into<AppIntent> + Send + 'static,
    F: FnOnce(EffectContext) -> Fut,
    Fut: Future<Output = Result<Vec<I>, ApiError>> + Send + 'static,
{
    let store = store.clone();
    tasks.spawn(verb, move |token| {
        let ctx = EffectContext { store, token };
        let call = call(ctx.clone());
        async move {
            debug!(slice = slice, verb = ?verb, "Effect started");
            ctx.emit([set_phase(Phase::Pending(verb))]);

            match call.await {
                Ok(mut intents) => {
                    debug!(slice = slice, verb = ?verb, "Effect succeeded");
                    intents.push(set_phase(Phase::Succeeded(verb)));
                    ctx.emit(intents);
                }
                Err(error) => {
                    warn!(
                        slice = slice,
                        verb = ?verb,
                        error_type = error.error_type(),
                        error = %error,
                        "Effect failed"
                    );
                    ctx.emit([set_phase(Phase::Failed(verb, error.code()))]);
                }
            }
        }
    });
}
