use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use super::cancel::CancelToken;

struct TaskEntry {
    id: u64,
    token: CancelToken,
}

/// Single-flight task registry keyed by effect kind.
///
/// Spawning a task for a kind that already has one in flight cancels the
/// older task first; a cancelled task never runs past its next await point.
pub struct TaskMap<K> {
    tasks: Arc<Mutex<HashMap<K, TaskEntry>>>,
    next_id: AtomicU64,
}

impl<K> Default for TaskMap<K> {
    fn default() -> Self {
        Self {
            tasks: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }
}

impl<K> TaskMap<K>
where
    K: Copy + Eq + Hash + Debug + Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `make(token)` as the only live task for `kind`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F, Fut>(&self, kind: K, make: F)
    where
        F: FnOnce(CancelToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let token = CancelToken::new();
        let fut = make(token.clone());

        let mut tasks = self.tasks.lock();
        if let Some(previous) = tasks.insert(
            kind,
            TaskEntry {
                id,
                token: token.clone(),
            },
        ) {
            debug!(kind = ?kind, superseded = previous.id, task = id, "Superseding in-flight effect");
            previous.token.cancel();
        }

        let registry = Arc::clone(&self.tasks);
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(kind = ?kind, task = id, "Effect cancelled");
                }
                _ = fut => {}
            }
            let mut tasks = registry.lock();
            if tasks.get(&kind).is_some_and(|entry| entry.id == id) {
                tasks.remove(&kind);
            }
        });
    }

    pub fn in_flight(&self, kind: K) -> bool {
        self.tasks.lock().contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cancel the live task of `kind`, if any. Returns whether one was live.
    pub fn cancel(&self, kind: K) -> bool {
        match self.tasks.lock().remove(&kind) {
            Some(entry) => {
                debug!(kind = ?kind, task = entry.id, "Cancelling in-flight effect");
                entry.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel every live task.
    pub fn cancel_all(&self) {
        for (_, entry) in self.tasks.lock().drain() {
            entry.token.cancel();
        }
    }
}
