use tracing::info;

use crate::api::ApiError;
use crate::slices::currency::{CurrencyIntent, CurrencyVerb};
use crate::store::Store;

use super::{spawn_effect, EffectContext, TaskMap};

#[derive(Default)]
pub(super) struct CurrencyEffects {
    pub(super) tasks: TaskMap<CurrencyVerb>,
}

impl CurrencyEffects {
    pub fn run(&self, store: &Store, intent: CurrencyIntent) {
        if let CurrencyIntent::Pull = intent {
            spawn_effect(
                &self.tasks,
                store,
                "currency",
                CurrencyVerb::Pull,
                CurrencyIntent::SetPhase,
                pull,
            );
        }
    }
}

async fn pull(ctx: EffectContext) -> Result<Vec<CurrencyIntent>, ApiError> {
    let currencies = ctx.api().currencies().await?;
    info!(count = currencies.len(), "Currencies pulled");
    Ok(vec![CurrencyIntent::SetCurrencies(currencies)])
}
