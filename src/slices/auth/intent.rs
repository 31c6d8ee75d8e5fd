use crate::domain::{AccessToken, CurrencyId, Theme, User, UserLocale};
use crate::mvi::Intent;
use crate::phase::Phase;
use crate::secret::SecureString;

use super::state::AuthVerb;

#[derive(Debug, Clone)]
pub enum AuthIntent {
    // Domain intents: handled by the auth effect runner.
    Login {
        email: String,
        password: SecureString,
    },
    Register {
        name: String,
        email: String,
        password: SecureString,
    },
    UpdateUser {
        name: String,
        email: String,
    },
    UpdatePassword {
        new_password: SecureString,
    },
    /// Change the user's preferred currency on the backend.
    SetCurrency {
        currency_id: CurrencyId,
    },
    DeleteUser,

    /// Drop the session. Preferences (theme, language, locale) survive.
    Logout,

    // Effect results.
    SetSession {
        user: User,
        access_token: AccessToken,
    },
    SetUser(User),

    SetPhase(Phase<AuthVerb>),
    /// View acknowledged the terminal phase.
    ResetPhase,

    // Local preferences, no I/O.
    SetTheme(Theme),
    SetLang(String),
    SetLocale(UserLocale),
}

impl AuthIntent {
    /// Convenience constructor that wraps the password.
    pub fn login(email: impl Into<String>, password: impl Into<SecureString>) -> Self {
        AuthIntent::Login {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Backend operation this intent starts, if it is a domain intent.
    pub fn verb(&self) -> Option<AuthVerb> {
        match self {
            AuthIntent::Login { .. } => Some(AuthVerb::Login),
            AuthIntent::Register { .. } => Some(AuthVerb::Register),
            AuthIntent::UpdateUser { .. } => Some(AuthVerb::UpdateUser),
            AuthIntent::UpdatePassword { .. } => Some(AuthVerb::UpdatePassword),
            AuthIntent::SetCurrency { .. } => Some(AuthVerb::UpdateCurrency),
            AuthIntent::DeleteUser => Some(AuthVerb::DeleteUser),
            _ => None,
        }
    }
}

impl Intent for AuthIntent {}
