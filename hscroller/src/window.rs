use std::collections::VecDeque;
use std::ops::Range;

use crate::pool::RecyclingPool;
use crate::state::WindowSnapshot;

/// A materialized item: the adapter's surface plus its measured size and laid-out position.
///
/// `left` is relative to the viewport's left edge and may be negative for the partially visible
/// item at the left edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item<S> {
    pub surface: S,
    pub width: u32,
    pub height: u32,
    pub left: i64,
}

impl<S> Item<S> {
    pub fn right(&self) -> i64 {
        self.left + self.width as i64
    }

    /// Tests a viewport-relative point against `[left, right) x [0, height)`.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (x, y) = (x as f64, y as f64);
        x >= self.left as f64 && x < self.right() as f64 && y >= 0.0 && y < self.height as f64
    }
}

/// The contiguous run of materialized items.
///
/// Items cover the adapter indexes `left_index + 1 ..= right_index - 1`, ordered left to right.
/// `display_offset` is where the first item starts; each following item starts where its
/// predecessor ends. When the window is empty, `display_offset` is where the next item would be
/// placed.
#[derive(Clone, Debug)]
pub struct WindowState<S> {
    pub(crate) left_index: isize,
    pub(crate) right_index: usize,
    pub(crate) display_offset: i64,
    pub(crate) items: VecDeque<Item<S>>,
}

impl<S> WindowState<S> {
    pub fn new() -> Self {
        Self {
            left_index: -1,
            right_index: 0,
            display_offset: 0,
            items: VecDeque::new(),
        }
    }

    /// Index of the item left of the first materialized item, `-1` if there is none.
    pub fn left_index(&self) -> isize {
        self.left_index
    }

    /// Index of the next item to materialize on the right.
    pub fn right_index(&self) -> usize {
        self.right_index
    }

    pub fn display_offset(&self) -> i64 {
        self.display_offset
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adapter indexes of the materialized items.
    pub fn index_range(&self) -> Range<usize> {
        let start = (self.left_index + 1) as usize;
        start..start + self.items.len()
    }

    /// Maps a materialized position (0 = leftmost) to its adapter index.
    pub fn index_at(&self, position: usize) -> usize {
        (self.left_index + 1) as usize + position
    }

    /// Returns the materialized item for an adapter index, if it is in the window.
    pub fn get(&self, index: usize) -> Option<&Item<S>> {
        let start = (self.left_index + 1) as usize;
        self.items.get(index.checked_sub(start)?)
    }

    pub fn first(&self) -> Option<&Item<S>> {
        self.items.front()
    }

    pub fn last(&self) -> Option<&Item<S>> {
        self.items.back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &Item<S>)> + '_ {
        let start = (self.left_index + 1) as usize;
        self.items
            .iter()
            .enumerate()
            .map(move |(position, item)| (start + position, item))
    }

    /// Calls `f` for every materialized item whose bounds contain the point.
    ///
    /// Every item is tested; with overlapping bounds more than one item can match.
    pub fn for_each_hit(&self, x: f32, y: f32, mut f: impl FnMut(usize, &Item<S>)) {
        for (index, item) in self.iter() {
            if item.contains(x, y) {
                f(index, item);
            }
        }
    }

    pub fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot {
            left_index: self.left_index,
            right_index: self.right_index,
            display_offset: self.display_offset,
            len: self.items.len(),
        }
    }

    /// Left edge of the first item, or where one would go in an empty window.
    pub(crate) fn left_edge(&self) -> i64 {
        self.items
            .front()
            .map_or(self.display_offset, |item| item.left)
    }

    /// Right edge of the last item, or where one would go in an empty window.
    pub(crate) fn right_edge(&self) -> i64 {
        self.items
            .back()
            .map_or(self.display_offset, |item| item.right())
    }

    /// Lays items out left to right from `display_offset + dx`.
    pub(crate) fn reposition(&mut self, dx: i64) {
        self.display_offset += dx;
        let mut left = self.display_offset;
        for item in self.items.iter_mut() {
            item.left = left;
            left += item.width as i64;
        }
    }

    /// Moves every surface into `pool` and returns to the initial empty state.
    pub(crate) fn reclaim_all(&mut self, pool: &RecyclingPool<S>) {
        while let Some(item) = self.items.pop_back() {
            pool.reclaim(item.surface);
        }
        self.left_index = -1;
        self.right_index = 0;
        self.display_offset = 0;
    }
}

impl<S> Default for WindowState<S> {
    fn default() -> Self {
        Self::new()
    }
}
