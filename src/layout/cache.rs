use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, OnceLock},
};

/// Laid-out artifacts of one group, one `Vec` per line.
pub type GroupPens<A> = Arc<Vec<Vec<A>>>;

type Slot<A> = Arc<OnceLock<GroupPens<A>>>;

/// Render cache keyed by `(track, group index)`.
///
/// Entries never expire on their own: callers must [`invalidate`](PenCache::invalidate) or
/// [`clear`](PenCache::clear) when clip content or style changes. Each key is rendered at
/// most once between invalidations, even under concurrent callers; different keys render
/// in parallel.
pub struct PenCache<A> {
    slots: Mutex<HashMap<(usize, usize), Slot<A>>>,
}

impl<A> Default for PenCache<A> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<A> std::fmt::Debug for PenCache<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PenCache").field("len", &self.len()).finish()
    }
}

impl<A> PenCache<A> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<(usize, usize), Slot<A>>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, track: usize, index: usize) -> Option<GroupPens<A>> {
        let slot = self.lock().get(&(track, index)).cloned()?;
        slot.get().cloned()
    }

    /// Return the cached pens for `(track, index)`, rendering them with `render` on a miss.
    pub fn get_or_render<F>(&self, track: usize, index: usize, render: F) -> GroupPens<A>
    where
        F: FnOnce() -> Vec<Vec<A>>,
    {
        let slot = self.lock().entry((track, index)).or_default().clone();
        slot.get_or_init(|| {
            tracing::debug!(track, index, "pen cache miss");
            Arc::new(render())
        })
        .clone()
    }

    /// Drop one entry. Returns `true` if it was present.
    pub fn invalidate(&self, track: usize, index: usize) -> bool {
        self.lock().remove(&(track, index)).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of populated entries.
    pub fn len(&self) -> usize {
        self.lock().values().filter(|s| s.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/cache.rs"]
mod tests;
