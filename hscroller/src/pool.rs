use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A shared store of detached item surfaces.
///
/// Cloning the pool clones the handle, not the storage: every clone reclaims into and acquires
/// from the same queue. Hand one pool to several [`crate::HorizontalList`]s to let a surface
/// evicted by one list be reused by another. Tests usually create one pool per case.
///
/// Reuse exists to skip reconstruction cost only. [`RecyclingPool::acquire`] makes no promise
/// about which surface it returns, and a reused surface carries whatever content it showed last.
pub struct RecyclingPool<S> {
    inner: Arc<Mutex<VecDeque<S>>>,
}

impl<S> RecyclingPool<S> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    // The queue has no invariant spanning elements, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, VecDeque<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a detached surface to the pool.
    pub fn reclaim(&self, surface: S) {
        self.lock().push_back(surface);
    }

    /// Removes and returns one pooled surface, or `None` when the pool is empty.
    pub fn acquire(&self) -> Option<S> {
        self.lock().pop_front()
    }

    /// Drops every pooled surface.
    ///
    /// This affects all lists sharing the pool but never touches surfaces that are currently
    /// materialized.
    pub fn clear(&self) {
        let mut queue = self.lock();
        hdebug!(dropped = queue.len(), "RecyclingPool::clear");
        queue.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns `true` when both handles point at the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S> Clone for RecyclingPool<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> Default for RecyclingPool<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for RecyclingPool<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecyclingPool")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

