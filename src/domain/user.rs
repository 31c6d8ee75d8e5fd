use std::fmt;

use serde::{Deserialize, Serialize};

use super::currency::CurrencyId;
use super::wire;

pub type UserId = i64;

/// Account profile as returned by `/login`, `/register` and the
/// user-update endpoints.
///
/// The preferred currency is kept as a reference into the currency list;
/// resolve it with [`crate::selectors::selected_currency`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_type_title: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub is_active: Option<String>,
    #[serde(default)]
    pub profile_pic: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_id")]
    pub currency_id: Option<CurrencyId>,
}

impl User {
    /// Name if set, otherwise email, otherwise `#id`.
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.email.as_deref())
            .map(String::from)
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}

/// Device locale reported by the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserLocale {
    pub country_code: Option<String>,
    pub language_code: Option<String>,
    pub language_tag: Option<String>,
    #[serde(default)]
    pub is_rtl: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

/// Bearer token issued at login.
///
/// Serialized verbatim into the auth snapshot, but never exposed via
/// Debug or Display.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the raw token. Only the HTTP client should need this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken(••••••••)")
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "••••••••")
    }
}
