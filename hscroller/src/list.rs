use std::fmt;
use std::sync::Arc;

use crate::adapter::PendingChange;
use crate::fill::FillEngine;
use crate::pool::RecyclingPool;
use crate::scroll::ScrollController;
use crate::window::WindowState;
use crate::{
    DataSetObserver, FrameState, ItemAdapter, LayoutScheduler, ListOptions, ScrollPhase,
    ScrollSnapshot, Viewport, WindowSnapshot,
};

/// A horizontally scrolling list that materializes only the items in view.
///
/// This type is UI-agnostic:
/// - Items are built by the host's [`ItemAdapter`]; the list only stores their surfaces.
/// - Scroll input arrives through `begin_drag`/`drag_by`/`end_drag`/`fling` (or through the
///   `hscroller-gesture` controller, which derives them from pointer events).
/// - Nothing moves until the host calls [`HorizontalList::layout_pass`], which it should do
///   whenever the [`LayoutScheduler`] asks for one.
///
/// All mutation goes through `&mut self`. Hosts that deliver input and layout on different
/// threads wrap the list in a `Mutex`; the recycling pool is already safe to share.
pub struct HorizontalList<A: ItemAdapter> {
    adapter: Option<A>,
    observer: DataSetObserver,
    scheduler: Arc<dyn LayoutScheduler>,
    pool: RecyclingPool<A::Surface>,
    window: WindowState<A::Surface>,
    scroll: ScrollController,
    viewport: Viewport,
}

impl<A: ItemAdapter> HorizontalList<A> {
    pub fn new(
        options: ListOptions,
        pool: RecyclingPool<A::Surface>,
        scheduler: Arc<dyn LayoutScheduler>,
    ) -> Self {
        hdebug!(
            scroll_enabled = options.scroll_enabled,
            fling_enabled = options.fling_enabled,
            "HorizontalList::new"
        );
        Self {
            adapter: None,
            observer: DataSetObserver::new(Arc::clone(&scheduler)),
            scheduler,
            pool,
            window: WindowState::new(),
            scroll: ScrollController::new(options),
            viewport: Viewport::default(),
        }
    }

    pub fn with_adapter(mut self, adapter: A) -> Self {
        self.set_adapter(adapter);
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.set_viewport(viewport);
        self
    }

    pub fn options(&self) -> &ListOptions {
        self.scroll.options()
    }

    pub fn set_options(&mut self, options: ListOptions) {
        self.scroll.set_options(options);
    }

    pub fn set_scroll_enabled(&mut self, scroll_enabled: bool) {
        self.scroll.set_scroll_enabled(scroll_enabled);
    }

    pub fn set_fling_enabled(&mut self, fling_enabled: bool) {
        self.scroll.set_fling_enabled(fling_enabled);
    }

    pub fn adapter(&self) -> Option<&A> {
        self.adapter.as_ref()
    }

    /// Mutable access to the adapter.
    ///
    /// Structural edits made through this must still be announced via the observer, exactly as
    /// if they came from elsewhere.
    pub fn adapter_mut(&mut self) -> Option<&mut A> {
        self.adapter.as_mut()
    }

    /// Installs a new adapter and resets the list. Returns the previous adapter, unsubscribed.
    pub fn set_adapter(&mut self, mut adapter: A) -> Option<A> {
        let previous = self.detach_adapter();
        hdebug!(count = adapter.count(), "set_adapter");
        adapter.subscribe(self.observer.clone());
        self.adapter = Some(adapter);
        self.reset();
        previous
    }

    /// Removes the adapter, reclaims every item and resets the scroll position.
    pub fn take_adapter(&mut self) -> Option<A> {
        let previous = self.detach_adapter();
        self.reset();
        previous
    }

    fn detach_adapter(&mut self) -> Option<A> {
        let mut previous = self.adapter.take()?;
        previous.unsubscribe(&self.observer);
        Some(previous)
    }

    /// The handle this list subscribes to its adapter.
    pub fn observer(&self) -> &DataSetObserver {
        &self.observer
    }

    pub fn pool(&self) -> &RecyclingPool<A::Surface> {
        &self.pool
    }

    /// Empties the recycling pool, for every list sharing it.
    pub fn clear_recycling_pool(&self) {
        self.pool.clear();
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resizes the viewport. A size change rebuilds the window on the next pass so the maximum
    /// offset is recomputed against the new width.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        hdebug!(width = viewport.width, height = viewport.height, "set_viewport");
        self.viewport = viewport;
        self.observer.mark_changed();
        self.request_layout_pass();
    }

    pub fn window(&self) -> &WindowState<A::Surface> {
        &self.window
    }

    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    pub fn scroll_offset(&self) -> i64 {
        self.scroll.current_offset()
    }

    pub fn max_offset(&self) -> Option<i64> {
        self.scroll.max_offset()
    }

    pub fn phase(&self) -> ScrollPhase {
        self.scroll.phase()
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_scrolling()
    }

    pub fn item_id(&self, index: usize) -> Option<u64> {
        let adapter = self.adapter.as_ref()?;
        (index < adapter.count()).then(|| adapter.item_id(index))
    }

    pub fn window_snapshot(&self) -> WindowSnapshot {
        self.window.snapshot()
    }

    pub fn scroll_snapshot(&self) -> ScrollSnapshot {
        self.scroll.snapshot()
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            window: self.window_snapshot(),
            scroll: self.scroll_snapshot(),
        }
    }

    /// Seeds the scroll position from a snapshot. The window follows on the next pass.
    pub fn restore_scroll(&mut self, snapshot: ScrollSnapshot) {
        self.scroll_to(snapshot.offset);
    }

    /// Jumps to `offset` on the next pass, cancelling any fling.
    pub fn scroll_to(&mut self, offset: i64) {
        self.scroll.scroll_to(offset);
        self.request_layout_pass();
    }

    /// Starts a drag, cancelling any fling. Returns `false` when scrolling is disabled.
    pub fn begin_drag(&mut self) -> bool {
        self.scroll.begin_drag()
    }

    /// Moves content by `delta` pixels (positive = content moves left).
    pub fn drag_by(&mut self, delta: i64) -> bool {
        if !self.scroll.drag_by(delta) {
            return false;
        }
        self.request_layout_pass();
        true
    }

    pub fn end_drag(&mut self) {
        self.scroll.end_drag();
    }

    /// Launches a fling with the pointer's release velocity in px/s.
    pub fn fling(&mut self, velocity_x: f32, now_ms: u64) -> bool {
        if !self.scroll.fling(velocity_x, now_ms) {
            return false;
        }
        self.request_layout_pass();
        true
    }

    pub fn cancel_fling(&mut self) {
        self.scroll.cancel_fling();
    }

    /// Stops any motion, reclaims every item and returns to offset 0.
    pub fn reset(&mut self) {
        hdebug!(materialized = self.window.len(), "reset");
        self.scroll.reset();
        self.window.reclaim_all(&self.pool);
        self.observer.clear_pending();
        self.request_layout_pass();
    }

    pub fn request_layout_pass(&self) {
        self.scheduler.request_layout_pass();
    }

    /// Runs one layout pass at host time `now_ms`.
    ///
    /// Applies pending data changes, advances any fling, clamps the offset, and trims/fills/
    /// repositions the window. Returns `true` when another pass is needed (a fling is still
    /// moving or a change arrived during this pass); in that case a pass has also been requested
    /// from the scheduler.
    pub fn layout_pass(&mut self, now_ms: u64) -> bool {
        let Self {
            adapter,
            observer,
            scheduler,
            pool,
            window,
            scroll,
            viewport,
        } = self;
        let Some(adapter) = adapter.as_mut() else {
            return false;
        };

        match observer.take_pending() {
            Some(PendingChange::Invalidated) => {
                hdebug!("data invalidated, resetting");
                scroll.reset();
                window.reclaim_all(pool);
            }
            Some(PendingChange::Changed) => {
                hdebug!(
                    offset = scroll.current_offset(),
                    "data changed, rebuilding window"
                );
                scroll.rebase_for_rebuild();
                window.reclaim_all(pool);
            }
            None => {}
        }

        let count = adapter.count();
        if window.right_index > count {
            hwarn!(
                count,
                right_index = window.right_index,
                "adapter count shrank without a change notification"
            );
            debug_assert!(
                window.right_index <= count,
                "adapter count shrank without a change notification (count={count}, right_index={})",
                window.right_index
            );
            scroll.rebase_for_rebuild();
            window.reclaim_all(pool);
        }

        let target = scroll.resolve_target(now_ms);
        fill_to(adapter, pool, window, scroll, *viewport, target);
        if let Some(target) = scroll.reclamp() {
            fill_to(adapter, pool, window, scroll, *viewport, target);
        }

        let more = scroll.is_flinging() || observer.has_pending();
        if more {
            scheduler.request_layout_pass();
        }
        more
    }
}

fn fill_to<A: ItemAdapter>(
    adapter: &mut A,
    pool: &RecyclingPool<A::Surface>,
    window: &mut WindowState<A::Surface>,
    scroll: &mut ScrollController,
    viewport: Viewport,
    target: i64,
) {
    let current = scroll.current_offset();
    let report = FillEngine::new(adapter, pool, viewport).run(window, current - target, current);
    if let Some(max_offset) = report.max_offset {
        scroll.tighten_max_offset(max_offset);
    }
    scroll.commit(target);
}

impl<A: ItemAdapter> fmt::Debug for HorizontalList<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HorizontalList")
            .field("has_adapter", &self.adapter.is_some())
            .field("viewport", &self.viewport)
            .field("window", &self.window.snapshot())
            .field("scroll", &self.scroll)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}
