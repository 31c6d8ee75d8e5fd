//! REST client for the finance backend.
//!
//! Every call performs exactly one HTTP request and classifies the outcome
//! into success, transport failure, or application error. Nothing here
//! retries.

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::Session;
