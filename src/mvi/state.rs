//! Base trait for slice state.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Marker trait for slice state objects.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Comparable (PartialEq decides whether a snapshot must be written)
/// - Serializable (restored wholesale at startup)
pub trait SliceState:
    Clone + PartialEq + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Key under which the slice snapshot is persisted.
    const KEY: &'static str;

    /// Normalise a snapshot read back from disk.
    ///
    /// No effect handler survives a restart, so pending phases are dropped.
    fn restored(self) -> Self {
        self
    }
}
