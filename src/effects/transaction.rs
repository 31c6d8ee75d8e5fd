use tracing::info;

use crate::api::ApiError;
use crate::domain::{NewTransaction, TransactionId, TransactionUpdate};
use crate::slices::transaction::{TransactionIntent, TransactionVerb};
use crate::store::Store;

use super::{spawn_effect, EffectContext, TaskMap};

const SLICE: &str = "transaction";

#[derive(Default)]
pub(super) struct TransactionEffects {
    pub(super) tasks: TaskMap<TransactionVerb>,
}

impl TransactionEffects {
    pub fn run(&self, store: &Store, intent: TransactionIntent) {
        let set_phase = TransactionIntent::SetPhase;
        match intent {
            TransactionIntent::Pull => {
                spawn_effect(&self.tasks, store, SLICE, TransactionVerb::Pull, set_phase, pull)
            }
            TransactionIntent::Add(new) => {
                spawn_effect(&self.tasks, store, SLICE, TransactionVerb::Add, set_phase, |ctx| {
                    add(ctx, new)
                })
            }
            TransactionIntent::Update(update) => spawn_effect(
                &self.tasks,
                store,
                SLICE,
                TransactionVerb::Update,
                set_phase,
                |ctx| update_one(ctx, update),
            ),
            TransactionIntent::Delete { id } => spawn_effect(
                &self.tasks,
                store,
                SLICE,
                TransactionVerb::Delete,
                set_phase,
                move |ctx| delete(ctx, id),
            ),
            TransactionIntent::SetTransactions(_)
            | TransactionIntent::Upsert(_)
            | TransactionIntent::Remove { .. }
            | TransactionIntent::Clear
            | TransactionIntent::SetPhase(_)
            | TransactionIntent::ResetPhase => {}
        }
    }
}

async fn pull(ctx: EffectContext) -> Result<Vec<TransactionIntent>, ApiError> {
    let user_id = ctx.user_id()?;
    let transactions = ctx.api().transactions(user_id).await?;
    info!(user_id, count = transactions.len(), "Transactions pulled");
    Ok(vec![TransactionIntent::SetTransactions(transactions)])
}

async fn add(
    ctx: EffectContext,
    new: NewTransaction,
) -> Result<Vec<TransactionIntent>, ApiError> {
    let user_id = ctx.user_id()?;
    let created = ctx.api().create_transaction(user_id, &new).await?;
    info!(user_id, id = created.id, "Transaction added");
    Ok(vec![TransactionIntent::Upsert(created)])
}

async fn update_one(
    ctx: EffectContext,
    update: TransactionUpdate,
) -> Result<Vec<TransactionIntent>, ApiError> {
    ctx.user_id()?;
    let updated = ctx.api().update_transaction(&update).await?;
    info!(id = updated.id, "Transaction updated");
    Ok(vec![TransactionIntent::Upsert(updated)])
}

async fn delete(
    ctx: EffectContext,
    id: TransactionId,
) -> Result<Vec<TransactionIntent>, ApiError> {
    ctx.user_id()?;
    ctx.api().delete_transaction(id).await?;
    info!(id, "Transaction deleted");
    Ok(vec![TransactionIntent::Remove { id }])
}
