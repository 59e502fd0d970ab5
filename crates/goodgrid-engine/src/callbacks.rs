use std::collections::BTreeMap;

/// Callbacks bucketed by integer priority, with a cached flat execution order.
///
/// Registration is rare and happens at setup; execution happens per frame, per
/// node, per element. `add` only marks the cache dirty; `rebuild_if_needed`
/// concatenates the buckets in ascending priority (insertion order within a
/// bucket) and is a no-op while clean. There is no removal.
///
/// Invariant: `flat()` matches the buckets only after `rebuild_if_needed()`.
/// Callers rebuild before iterating.
#[derive(Debug, Clone)]
pub struct PriorityCallbackList<F> {
    by_priority: BTreeMap<i32, Vec<F>>,
    flat: Vec<F>,
    dirty: bool,
}

impl<F> Default for PriorityCallbackList<F> {
    fn default() -> Self {
        Self {
            by_priority: BTreeMap::new(),
            flat: Vec::new(),
            dirty: false,
        }
    }
}

impl<F: Clone> PriorityCallbackList<F> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `callback` to the bucket for `priority`.
    #[inline]
    pub fn add(&mut self, callback: F, priority: i32) {
        self.by_priority.entry(priority).or_default().push(callback);
        self.dirty = true;
    }

    pub fn rebuild_if_needed(&mut self) {
        if !self.dirty {
            return;
        }
        self.flat.clear();
        for bucket in self.by_priority.values() {
            self.flat.extend(bucket.iter().cloned());
        }
        self.dirty = false;
    }

    /// Cached execution order, low to high priority.
    #[inline]
    pub fn flat(&self) -> &[F] {
        &self.flat
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_priority.is_empty()
    }

    /// Total number of registered callbacks.
    pub fn len(&self) -> usize {
        self.by_priority.values().map(Vec::len).sum()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
