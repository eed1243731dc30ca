use crate::pool::RecyclingPool;
use crate::window::{Item, WindowState};
use crate::{ItemAdapter, Viewport};

/// What one fill pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Set when the last item was materialized during this pass.
    pub max_offset: Option<i64>,
    /// Items requested from the adapter.
    pub materialized: usize,
    /// Of those, how many were handed a pooled surface.
    pub reused: usize,
    /// Items detached and returned to the pool.
    pub reclaimed: usize,
}

/// Grows and shrinks a [`WindowState`] as the viewport moves over the content.
///
/// One [`FillEngine::run`] is a fill pass: trim the items that left the viewport, fill the gaps
/// that opened on either side, then lay everything out shifted by `dx`. After a pass every item
/// intersecting `[0, viewport.width]` is materialized and every item fully outside is not.
pub struct FillEngine<'a, A: ItemAdapter> {
    adapter: &'a mut A,
    pool: &'a RecyclingPool<A::Surface>,
    viewport: Viewport,
}

impl<'a, A: ItemAdapter> FillEngine<'a, A> {
    pub fn new(
        adapter: &'a mut A,
        pool: &'a RecyclingPool<A::Surface>,
        viewport: Viewport,
    ) -> Self {
        Self {
            adapter,
            pool,
            viewport,
        }
    }

    /// Runs one pass.
    ///
    /// `dx` is how far content moves on screen (`current_offset - target_offset`); stored item
    /// positions are still those of the previous pass. `current_offset` is the offset those
    /// positions were laid out at, used to turn the last item's edge into a maximum offset.
    pub fn run(
        &mut self,
        window: &mut WindowState<A::Surface>,
        dx: i64,
        current_offset: i64,
    ) -> FillReport {
        let mut report = FillReport::default();
        self.trim(window, dx, &mut report);
        self.fill_right(window, dx, current_offset, &mut report);
        self.fill_left(window, dx, &mut report);
        window.reposition(dx);
        htrace!(
            dx,
            left_index = window.left_index,
            right_index = window.right_index,
            display_offset = window.display_offset,
            materialized = report.materialized,
            reclaimed = report.reclaimed,
            "fill pass"
        );
        report
    }

    fn trim(&mut self, window: &mut WindowState<A::Surface>, dx: i64, report: &mut FillReport) {
        let width = self.viewport.width as i64;

        while window.items.front().is_some_and(|item| item.right() + dx <= 0) {
            let Some(item) = window.items.pop_front() else {
                break;
            };
            window.display_offset += item.width as i64;
            window.left_index += 1;
            self.pool.reclaim(item.surface);
            report.reclaimed += 1;
        }

        while window.items.back().is_some_and(|item| item.left + dx >= width) {
            let Some(item) = window.items.pop_back() else {
                break;
            };
            window.right_index -= 1;
            self.pool.reclaim(item.surface);
            report.reclaimed += 1;
        }
    }

    fn fill_right(
        &mut self,
        window: &mut WindowState<A::Surface>,
        dx: i64,
        current_offset: i64,
        report: &mut FillReport,
    ) {
        let width = self.viewport.width as i64;
        let count = self.adapter.count();
        let mut edge = window.right_edge();

        while edge + dx < width && window.right_index < count {
            let index = window.right_index;
            let item = self.materialize(index, edge, report);
            edge = item.right();

            if index + 1 == count {
                let max_offset = (edge + current_offset - width).max(0);
                hdebug!(index, max_offset, "last item measured");
                report.max_offset = Some(max_offset);
            }
            window.right_index += 1;

            // Skipped over by a jump: measured for its width, then recycled before the next build.
            if window.items.is_empty() && edge + dx <= 0 {
                window.display_offset = edge;
                window.left_index += 1;
                self.pool.reclaim(item.surface);
                report.reclaimed += 1;
            } else {
                window.items.push_back(item);
            }
        }
    }

    fn fill_left(&mut self, window: &mut WindowState<A::Surface>, dx: i64, report: &mut FillReport) {
        let width = self.viewport.width as i64;
        let mut edge = window.left_edge();

        while edge + dx > 0 && window.left_index >= 0 {
            let index = window.left_index as usize;
            let mut item = self.materialize(index, edge, report);
            let item_width = item.width as i64;
            edge -= item_width;
            item.left = edge;
            window.display_offset -= item_width;
            window.left_index -= 1;

            // Mirror of the skip in `fill_right` for jumps toward the start.
            if window.items.is_empty() && item.left + dx >= width {
                window.right_index -= 1;
                self.pool.reclaim(item.surface);
                report.reclaimed += 1;
            } else {
                window.items.push_front(item);
            }
        }
    }

    fn materialize(&mut self, index: usize, left: i64, report: &mut FillReport) -> Item<A::Surface> {
        let reusable = self.pool.acquire();
        if reusable.is_some() {
            report.reused += 1;
        }
        report.materialized += 1;
        let measured = self.adapter.materialize(index, reusable, self.viewport);
        Item {
            surface: measured.surface,
            width: measured.width,
            height: measured.height,
            left,
        }
    }
}
