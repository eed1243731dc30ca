use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::{Measured, Viewport};

/// The host's item factory: an ordered sequence of `count()` items.
///
/// Contract:
/// - `count()` may only change together with a [`DataSetObserver::notify_changed`] or
///   [`DataSetObserver::notify_invalidated`] on every subscribed observer. A count that shrinks
///   below the materialized range without a notification is a caller bug.
/// - `materialize(index, reusable, ..)` must return a surface showing item `index`. When
///   `reusable` is `Some`, it is a surface previously returned by this (or another adapter sharing
///   the same pool) and should be rebound instead of constructing a new one.
pub trait ItemAdapter {
    /// The host's rendering handle (a view, widget id, texture, ...).
    type Surface;
    /// The data backing one item.
    type Content;

    fn count(&self) -> usize;

    fn item_at(&self, index: usize) -> Option<Self::Content>;

    fn item_id(&self, index: usize) -> u64;

    /// Binds item `index` into a surface and measures it against `container`.
    fn materialize(
        &mut self,
        index: usize,
        reusable: Option<Self::Surface>,
        container: Viewport,
    ) -> Measured<Self::Surface>;

    fn subscribe(&mut self, observer: DataSetObserver);

    fn unsubscribe(&mut self, observer: &DataSetObserver);
}

/// Schedules an asynchronous layout pass on the host's render loop.
///
/// The engine calls this whenever it has pending fling motion, a pending structural rebuild or
/// new scroll input. The host responds by calling [`crate::HorizontalList::layout_pass`] later;
/// it must not call back synchronously from inside `request_layout_pass`.
pub trait LayoutScheduler: Send + Sync {
    fn request_layout_pass(&self);
}

impl<F: Fn() + Send + Sync> LayoutScheduler for F {
    fn request_layout_pass(&self) {
        self()
    }
}

const CHANGED: u8 = 1;
const INVALIDATED: u8 = 2;

/// A structural change waiting for the next layout pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PendingChange {
    /// Data mutated; rebuild at the committed offset.
    Changed,
    /// Data is gone; reset to offset 0.
    Invalidated,
}

struct ObserverShared {
    pending: AtomicU8,
    scheduler: Arc<dyn LayoutScheduler>,
}

/// The subscription a list hands to its adapter.
///
/// Notifications never touch list state directly: they record a flag that the next layout pass
/// consumes, and request that pass. This makes it safe for an adapter to notify from anywhere,
/// including from inside `materialize`.
#[derive(Clone)]
pub struct DataSetObserver {
    shared: Arc<ObserverShared>,
}

impl DataSetObserver {
    pub(crate) fn new(scheduler: Arc<dyn LayoutScheduler>) -> Self {
        Self {
            shared: Arc::new(ObserverShared {
                pending: AtomicU8::new(0),
                scheduler,
            }),
        }
    }

    /// Data mutated and indexes may have shifted. The scroll position is preserved.
    pub fn notify_changed(&self) {
        self.shared.pending.fetch_or(CHANGED, Ordering::AcqRel);
        self.shared.scheduler.request_layout_pass();
    }

    /// Data is no longer available. The scroll position returns to 0.
    pub fn notify_invalidated(&self) {
        self.shared.pending.fetch_or(INVALIDATED, Ordering::AcqRel);
        self.shared.scheduler.request_layout_pass();
    }

    /// Returns `true` when both handles belong to the same list.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    pub(crate) fn has_pending(&self) -> bool {
        self.shared.pending.load(Ordering::Acquire) != 0
    }

    /// Consumes the pending flags. Invalidation wins over a plain change.
    pub(crate) fn take_pending(&self) -> Option<PendingChange> {
        let bits = self.shared.pending.swap(0, Ordering::AcqRel);
        if bits & INVALIDATED != 0 {
            Some(PendingChange::Invalidated)
        } else if bits & CHANGED != 0 {
            Some(PendingChange::Changed)
        } else {
            None
        }
    }

    pub(crate) fn mark_changed(&self) {
        self.shared.pending.fetch_or(CHANGED, Ordering::AcqRel);
    }

    pub(crate) fn clear_pending(&self) {
        self.shared.pending.store(0, Ordering::Release);
    }
}

impl PartialEq for DataSetObserver {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for DataSetObserver {}

impl fmt::Debug for DataSetObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSetObserver")
            .field("pending", &self.shared.pending.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// A registry of observers that adapters can embed to implement `subscribe`/`unsubscribe`.
#[derive(Clone, Debug, Default)]
pub struct DataSetObservable {
    observers: Vec<DataSetObserver>,
}

impl DataSetObservable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer. Registering the same observer twice is a no-op.
    pub fn register(&mut self, observer: DataSetObserver) {
        if self.observers.iter().any(|o| o.ptr_eq(&observer)) {
            return;
        }
        self.observers.push(observer);
    }

    pub fn unregister(&mut self, observer: &DataSetObserver) {
        self.observers.retain(|o| !o.ptr_eq(observer));
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn notify_changed(&self) {
        for observer in &self.observers {
            observer.notify_changed();
        }
    }

    pub fn notify_invalidated(&self) {
        for observer in &self.observers {
            observer.notify_invalidated();
        }
    }
}
