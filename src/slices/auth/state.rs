use serde::{Deserialize, Serialize};

use crate::domain::{AccessToken, Theme, User, UserLocale};
use crate::mvi::SliceState;
use crate::phase::{Phase, Verb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthVerb {
    Login,
    Register,
    UpdateUser,
    UpdatePassword,
    UpdateCurrency,
    DeleteUser,
}

impl Verb for AuthVerb {
    fn pending_tag(self) -> &'static str {
        match self {
            AuthVerb::Login | AuthVerb::Register => "loading",
            AuthVerb::UpdateUser => "user-updating",
            AuthVerb::UpdatePassword => "user-updating-password",
            AuthVerb::UpdateCurrency => "currency-updating",
            AuthVerb::DeleteUser => "user-deleting",
        }
    }

    fn success_tag(self) -> &'static str {
        match self {
            AuthVerb::Login | AuthVerb::Register => "success",
            AuthVerb::UpdateUser => "user-updating-success",
            AuthVerb::UpdatePassword => "user-updating-password-success",
            AuthVerb::UpdateCurrency => "currency-updating-success",
            AuthVerb::DeleteUser => "user-deleting-success",
        }
    }

    fn error_tag(self) -> &'static str {
        match self {
            AuthVerb::Login | AuthVerb::Register => "error",
            AuthVerb::UpdateUser => "user-updating-error",
            AuthVerb::UpdatePassword => "user-updating-password-error",
            AuthVerb::UpdateCurrency => "currency-updating-error",
            AuthVerb::DeleteUser => "user-deleting-error",
        }
    }
}

fn default_lang() -> String {
    "en".to_string()
}

/// Session, profile and local preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default, rename = "accessToken")]
    pub access_token: Option<AccessToken>,
    #[serde(default, rename = "userLocale")]
    pub locale: Option<UserLocale>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default)]
    pub phase: Phase<AuthVerb>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            access_token: None,
            locale: None,
            theme: Theme::default(),
            lang: default_lang(),
            phase: Phase::Idle,
        }
    }
}

impl SliceState for AuthState {
    const KEY: &'static str = "auth";

    fn restored(mut self) -> Self {
        self.phase = self.phase.settle_pending();
        self
    }
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some() && self.access_token.is_some()
    }
}
