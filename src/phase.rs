//! Lifecycle phase of the most recent async operation against a slice.
//!
//! A phase is both a status flag (is something loading?) and a one-shot
//! completion signal: a terminal phase stays in place until the view
//! acknowledges it by resetting the slice to [`Phase::Idle`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operation a phase refers to. Each slice has its own closed verb set.
///
/// The tag methods return the stable string labels screens and logs use to
/// tell e.g. "delete succeeded" apart from "update succeeded".
pub trait Verb: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    fn pending_tag(self) -> &'static str;
    fn success_tag(self) -> &'static str;
    fn error_tag(self) -> &'static str;
}

/// Error code carried by a failed phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorCode {
    /// No response was received (network failure, timeout, bad status
    /// without a server-provided code).
    Api,
    /// A response arrived but did not have the expected shape.
    InvalidResponse,
    /// The operation needs a logged-in user and there is none.
    NotAuthenticated,
    /// Code provided verbatim by the server.
    Server(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::Api => "api_error",
            ErrorCode::InvalidResponse => "invalid_response",
            ErrorCode::NotAuthenticated => "not_authenticated",
            ErrorCode::Server(code) => code,
        }
    }
}

impl From<String> for ErrorCode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "api_error" => ErrorCode::Api,
            "invalid_response" => ErrorCode::InvalidResponse,
            "not_authenticated" => ErrorCode::NotAuthenticated,
            _ => ErrorCode::Server(value),
        }
    }
}

impl From<ErrorCode> for String {
    fn from(value: ErrorCode) -> Self {
        match value {
            ErrorCode::Server(code) => code,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase<V> {
    /// Nothing outstanding, last terminal phase acknowledged.
    #[default]
    Idle,
    /// An intent was submitted and its effect has not resolved yet.
    Pending(V),
    /// The effect resolved successfully.
    Succeeded(V),
    /// The effect resolved with an error.
    Failed(V, ErrorCode),
}

impl<V: Verb> Phase<V> {
    pub fn verb(&self) -> Option<V> {
        match self {
            Phase::Idle => None,
            Phase::Pending(verb) | Phase::Succeeded(verb) | Phase::Failed(verb, _) => Some(*verb),
        }
    }

    pub fn error(&self) -> Option<&ErrorCode> {
        match self {
            Phase::Failed(_, code) => Some(code),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Phase::Pending(_))
    }

    /// Succeeded or failed: the view must acknowledge it.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Succeeded(_) | Phase::Failed(..))
    }

    /// True when the phase is exactly `Succeeded(verb)`.
    pub fn succeeded(&self, verb: V) -> bool {
        matches!(self, Phase::Succeeded(v) if *v == verb)
    }

    /// String label of the phase, `None` when idle.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Phase::Idle => None,
            Phase::Pending(verb) => Some(verb.pending_tag()),
            Phase::Succeeded(verb) => Some(verb.success_tag()),
            Phase::Failed(verb, _) => Some(verb.error_tag()),
        }
    }

    /// Drop a pending phase; used when restoring a snapshot.
    pub fn settle_pending(self) -> Self {
        match self {
            Phase::Pending(_) => Phase::Idle,
            other => other,
        }
    }
}

impl<V: Verb> fmt::Display for Phase<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.tag(), self.error()) {
            (None, _) => f.write_str("idle"),
            (Some(tag), Some(code)) => write!(f, "{} ({})", tag, code),
            (Some(tag), None) => f.write_str(tag),
        }
    }
}
