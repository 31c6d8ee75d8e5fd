//! Model-View-Intent primitives shared by every state slice.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ SliceState ──→ View
//!    ↑          │                         │
//!    │          └──→ Effect runner ──┐    │
//!    └───────────────────────────────┴────┘
//! ```
//!
//! - **SliceState**: snapshot of one independently persisted partition
//! - **Intent**: user action or effect result
//! - **Reducer**: pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::SliceState;
