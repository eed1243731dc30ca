use std::sync::Arc;

use hscroller::{
    DataSetObservable, DataSetObserver, HorizontalList, ItemAdapter, ListOptions, Measured,
    RecyclingPool, Viewport,
};
use hscroller_gesture::{GestureOptions, ListController, PointerEvent};

struct Tiles {
    count: usize,
    observers: DataSetObservable,
}

impl ItemAdapter for Tiles {
    type Surface = usize;
    type Content = usize;

    fn count(&self) -> usize {
        self.count
    }

    fn item_at(&self, index: usize) -> Option<usize> {
        (index < self.count).then_some(index)
    }

    fn item_id(&self, index: usize) -> u64 {
        10_000 + index as u64
    }

    fn materialize(
        &mut self,
        index: usize,
        _reusable: Option<usize>,
        container: Viewport,
    ) -> Measured<usize> {
        Measured::new(index, 90, container.height)
    }

    fn subscribe(&mut self, observer: DataSetObserver) {
        self.observers.register(observer);
    }

    fn unsubscribe(&mut self, observer: &DataSetObserver) {
        self.observers.unregister(observer);
    }
}

fn main() {
    // Example: feed a swipe and a tap through the controller, as a host's input handler would.
    //
    // A host would:
    // - forward every pointer event over the list to on_pointer_event
    // - call tick(now_ms) each frame while it returns true (or when the scheduler fires)
    // - render the list's window after each tick
    let list = HorizontalList::new(ListOptions::default(), RecyclingPool::new(), Arc::new(|| {}))
        .with_viewport(Viewport::new(360, 90))
        .with_adapter(Tiles {
            count: 1_000,
            observers: DataSetObservable::new(),
        });
    let mut c = ListController::new(list, GestureOptions::default())
        .with_on_item_click(|_, index, id| println!("clicked index={index} id={id}"));
    c.tick(0);

    let mut now_ms = 0u64;
    c.on_pointer_event(PointerEvent::down(300.0, 40.0, now_ms));
    for step in 1..=6 {
        now_ms += 10;
        c.on_pointer_event(PointerEvent::moved(300.0 - 40.0 * step as f32, 40.0, now_ms));
    }
    c.on_pointer_event(PointerEvent::up(60.0, 40.0, now_ms));

    while c.tick(now_ms) {
        if now_ms % 160 == 0 {
            println!(
                "t={now_ms} offset={} visible={:?}",
                c.list().scroll_offset(),
                c.list().window().index_range()
            );
        }
        now_ms += 16;
    }
    println!("settled: offset={}", c.list().scroll_offset());

    c.on_pointer_event(PointerEvent::down(100.0, 40.0, now_ms + 100));
    c.on_pointer_event(PointerEvent::up(100.0, 40.0, now_ms + 160));
}
