use std::fmt;
use std::mem;
use std::sync::Arc;

use hscroller::{HorizontalList, Item, ItemAdapter};

use crate::{Gesture, GestureOptions, GestureTranslator, PointerEvent};

/// Called with the item, its adapter index and its stable id.
pub type ItemCallback<S> = Arc<dyn Fn(&Item<S>, usize, u64) + Send + Sync>;

/// Drives a [`HorizontalList`] from raw pointer events.
///
/// This type does not hold any UI objects. Hosts drive it by calling:
/// - `on_pointer_event` for every pointer sample over the list
/// - `tick(now_ms)` each frame, or whenever the list's scheduler asked for a layout pass
///
/// Drags and flings move the list; taps and long presses are hit-tested against the
/// materialized items and reported through the item callbacks. Disabling scrolling on the list
/// blocks drags and flings but not taps.
pub struct ListController<A: ItemAdapter> {
    list: HorizontalList<A>,
    translator: GestureTranslator,
    pending: Vec<Gesture>,
    on_item_click: Option<ItemCallback<A::Surface>>,
    on_item_long_click: Option<ItemCallback<A::Surface>>,
    on_item_selected: Option<ItemCallback<A::Surface>>,
}

impl<A: ItemAdapter> ListController<A> {
    pub fn new(list: HorizontalList<A>, options: GestureOptions) -> Self {
        Self {
            list,
            translator: GestureTranslator::new(options),
            pending: Vec::new(),
            on_item_click: None,
            on_item_long_click: None,
            on_item_selected: None,
        }
    }

    pub fn with_on_item_click(
        mut self,
        f: impl Fn(&Item<A::Surface>, usize, u64) + Send + Sync + 'static,
    ) -> Self {
        self.on_item_click = Some(Arc::new(f));
        self
    }

    pub fn with_on_item_long_click(
        mut self,
        f: impl Fn(&Item<A::Surface>, usize, u64) + Send + Sync + 'static,
    ) -> Self {
        self.on_item_long_click = Some(Arc::new(f));
        self
    }

    pub fn with_on_item_selected(
        mut self,
        f: impl Fn(&Item<A::Surface>, usize, u64) + Send + Sync + 'static,
    ) -> Self {
        self.on_item_selected = Some(Arc::new(f));
        self
    }

    pub fn set_on_item_click(&mut self, f: Option<ItemCallback<A::Surface>>) {
        self.on_item_click = f;
    }

    pub fn set_on_item_long_click(&mut self, f: Option<ItemCallback<A::Surface>>) {
        self.on_item_long_click = f;
    }

    pub fn set_on_item_selected(&mut self, f: Option<ItemCallback<A::Surface>>) {
        self.on_item_selected = f;
    }

    pub fn list(&self) -> &HorizontalList<A> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut HorizontalList<A> {
        &mut self.list
    }

    pub fn into_list(self) -> HorizontalList<A> {
        self.list
    }

    pub fn translator(&self) -> &GestureTranslator {
        &self.translator
    }

    pub fn gesture_options(&self) -> &GestureOptions {
        self.translator.options()
    }

    pub fn set_gesture_options(&mut self, options: GestureOptions) {
        self.translator.set_options(options);
    }

    pub fn is_scrolling(&self) -> bool {
        self.list.is_scrolling()
    }

    /// Feeds one pointer sample and applies the gestures it completes.
    pub fn on_pointer_event(&mut self, event: PointerEvent) {
        let pending = &mut self.pending;
        self.translator
            .on_pointer_event(event, |gesture| pending.push(gesture));
        self.dispatch_pending(event.time_ms);
    }

    /// Fires due long presses, then runs a layout pass. Returns `true` while more passes are
    /// needed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let pending = &mut self.pending;
        self.translator.poll(now_ms, |gesture| pending.push(gesture));
        self.dispatch_pending(now_ms);
        self.list.layout_pass(now_ms)
    }

    fn dispatch_pending(&mut self, now_ms: u64) {
        let mut gestures = mem::take(&mut self.pending);
        for gesture in gestures.drain(..) {
            self.dispatch(gesture, now_ms);
        }
        self.pending = gestures;
    }

    fn dispatch(&mut self, gesture: Gesture, now_ms: u64) {
        gtrace!(?gesture, "dispatch");
        match gesture {
            Gesture::Down => self.list.cancel_fling(),
            Gesture::DragStart => {
                self.list.begin_drag();
            }
            Gesture::Drag { delta } => {
                self.list.drag_by(delta);
            }
            Gesture::DragEnd => self.list.end_drag(),
            Gesture::Fling { velocity } => {
                self.list.fling(velocity, now_ms);
            }
            Gesture::Tap { x, y } => {
                self.fire_hits(x, y, &[&self.on_item_click, &self.on_item_selected]);
            }
            Gesture::LongPress { x, y } => {
                self.fire_hits(x, y, &[&self.on_item_long_click]);
            }
        }
    }

    /// Runs `callbacks` in order for every materialized item under the point.
    fn fire_hits(&self, x: f32, y: f32, callbacks: &[&Option<ItemCallback<A::Surface>>]) {
        let Some(adapter) = self.list.adapter() else {
            return;
        };
        self.list.window().for_each_hit(x, y, |index, item| {
            let id = adapter.item_id(index);
            gdebug!(index, id, "item hit");
            for callback in callbacks.iter().copied().flatten() {
                callback(item, index, id);
            }
        });
    }
}

impl<A: ItemAdapter> fmt::Debug for ListController<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListController")
            .field("list", &self.list)
            .field("translator", &self.translator)
            .field("on_item_click", &self.on_item_click.is_some())
            .field("on_item_long_click", &self.on_item_long_click.is_some())
            .field("on_item_selected", &self.on_item_selected.is_some())
            .finish_non_exhaustive()
    }
}
