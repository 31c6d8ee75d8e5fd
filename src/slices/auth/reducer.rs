use crate::mvi::Reducer;
use crate::phase::Phase;

use super::intent::AuthIntent;
use super::state::{AuthState, AuthVerb};

pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;
    type Intent = AuthIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AuthIntent::Login { .. } => pending(state, AuthVerb::Login),
            AuthIntent::Register { .. } => pending(state, AuthVerb::Register),
            AuthIntent::UpdateUser { .. } => pending(state, AuthVerb::UpdateUser),
            AuthIntent::UpdatePassword { .. } => pending(state, AuthVerb::UpdatePassword),
            AuthIntent::SetCurrency { .. } => pending(state, AuthVerb::UpdateCurrency),
            AuthIntent::DeleteUser => pending(state, AuthVerb::DeleteUser),

            AuthIntent::Logout => AuthState {
                user: None,
                access_token: None,
                phase: Phase::Idle,
                ..state
            },

            AuthIntent::SetSession { user, access_token } => AuthState {
                user: Some(user),
                access_token: Some(access_token),
                ..state
            },
            AuthIntent::SetUser(user) => AuthState {
                user: Some(user),
                ..state
            },

            AuthIntent::SetPhase(phase) => AuthState { phase, ..state },
            AuthIntent::ResetPhase => AuthState {
                phase: Phase::Idle,
                ..state
            },

            AuthIntent::SetTheme(theme) => AuthState { theme, ..state },
            AuthIntent::SetLang(lang) => AuthState { lang, ..state },
            AuthIntent::SetLocale(locale) => AuthState {
                locale: Some(locale),
                ..state
            },
        }
    }
}

fn pending(state: AuthState, verb: AuthVerb) -> AuthState {
    AuthState {
        phase: Phase::Pending(verb),
        ..state
    }
}
