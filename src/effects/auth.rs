use tracing::info;

use crate::api::{ApiError, Session};
use crate::domain::CurrencyId;
use crate::secret::SecureString;
use crate::slices::auth::{AuthIntent, AuthVerb};
use crate::store::Store;

use super::{spawn_effect, EffectContext, TaskMap};

const SLICE: &str = "auth";

#[derive(Default)]
pub(super) struct AuthEffects {
    pub(super) tasks: TaskMap<AuthVerb>,
}

impl AuthEffects {
    pub fn run(&self, store: &Store, intent: AuthIntent) {
        let set_phase = AuthIntent::SetPhase;
        match intent {
            AuthIntent::Login { email, password } => {
                spawn_effect(&self.tasks, store, SLICE, AuthVerb::Login, set_phase, |ctx| {
                    login(ctx, email, password)
                })
            }
            AuthIntent::Register {
                name,
                email,
                password,
            } => spawn_effect(&self.tasks, store, SLICE, AuthVerb::Register, set_phase, |ctx| {
                register(ctx, name, email, password)
            }),
            AuthIntent::UpdateUser { name, email } => spawn_effect(
                &self.tasks,
                store,
                SLICE,
                AuthVerb::UpdateUser,
                set_phase,
                |ctx| update_user(ctx, name, email),
            ),
            AuthIntent::UpdatePassword { new_password } => spawn_effect(
                &self.tasks,
                store,
                SLICE,
                AuthVerb::UpdatePassword,
                set_phase,
                |ctx| update_password(ctx, new_password),
            ),
            AuthIntent::SetCurrency { currency_id } => spawn_effect(
                &self.tasks,
                store,
                SLICE,
                AuthVerb::UpdateCurrency,
                set_phase,
                move |ctx| update_currency(ctx, currency_id),
            ),
            AuthIntent::DeleteUser => spawn_effect(
                &self.tasks,
                store,
                SLICE,
                AuthVerb::DeleteUser,
                set_phase,
                delete_user,
            ),
            AuthIntent::Logout
            | AuthIntent::SetSession { .. }
            | AuthIntent::SetUser(_)
            | AuthIntent::SetPhase(_)
            | AuthIntent::ResetPhase
            | AuthIntent::SetTheme(_)
            | AuthIntent::SetLang(_)
            | AuthIntent::SetLocale(_) => {}
        }
    }
}

fn session_intents(session: Session) -> Vec<AuthIntent> {
    info!(user_id = session.user.id, "Session established");
    vec![AuthIntent::SetSession {
        user: session.user,
        access_token: session.access_token,
    }]
}

async fn login(
    ctx: EffectContext,
    email: String,
    password: SecureString,
) -> Result<Vec<AuthIntent>, ApiError> {
    let session = ctx.api().login(&email, password.expose()).await?;
    Ok(session_intents(session))
}

async fn register(
    ctx: EffectContext,
    name: String,
    email: String,
    password: SecureString,
) -> Result<Vec<AuthIntent>, ApiError> {
    let session = ctx
        .api()
        .register(&name, &email, password.expose())
        .await?;
    Ok(session_intents(session))
}

async fn update_user(
    ctx: EffectContext,
    name: String,
    email: String,
) -> Result<Vec<AuthIntent>, ApiError> {
    let user_id = ctx.user_id()?;
    let user = ctx.api().update_user_info(user_id, &name, &email).await?;
    Ok(vec![AuthIntent::SetUser(user)])
}

async fn update_password(
    ctx: EffectContext,
    new_password: SecureString,
) -> Result<Vec<AuthIntent>, ApiError> {
    let user_id = ctx.user_id()?;
    let user = ctx
        .api()
        .update_password(user_id, new_password.expose())
        .await?;
    Ok(vec![AuthIntent::SetUser(user)])
}

async fn update_currency(
    ctx: EffectContext,
    currency_id: CurrencyId,
) -> Result<Vec<AuthIntent>, ApiError> {
    let user_id = ctx.user_id()?;
    let mut user = ctx.api().update_currency(user_id, currency_id).await?;
    // Older backends answer with a user record lacking the new foreign key.
    user.currency_id.get_or_insert(currency_id);
    info!(user_id, currency_id, "Currency updated");
    Ok(vec![AuthIntent::SetUser(user)])
}

async fn delete_user(ctx: EffectContext) -> Result<Vec<AuthIntent>, ApiError> {
    let user_id = ctx.user_id()?;
    ctx.api().delete_user(user_id).await?;
    info!(user_id, "Account deleted");
    Ok(vec![AuthIntent::Logout])
}
