//! Base trait for intents dispatched to a slice.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (log in, add a transaction)
/// - Effect results (session received, list fetched)
/// - Phase acknowledgements issued by the view
pub trait Intent: Send + 'static {}
