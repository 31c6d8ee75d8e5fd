//! The three state slices: auth, currency and transactions.
//!
//! Each slice follows the same layout: `intent.rs` lists what can be
//! dispatched, `state.rs` holds the persisted record and its verb set,
//! `reducer.rs` is the pure transition function.

pub mod auth;
pub mod currency;
pub mod transaction;
