//! Client-side state synchronization for a personal-finance backend.
//!
//! Three slices (auth, currency, transactions) follow one cycle: an intent
//! is reduced to a pending phase, an effect performs one backend call,
//! result intents reconcile the data and set a terminal phase, the slice
//! snapshot is persisted, and the view acknowledges the phase.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod effects;
pub mod logging;
pub mod mvi;
pub mod persist;
pub mod phase;
pub mod secret;
pub mod selectors;
pub mod slices;
pub mod store;
