// Example: a list of variable-width labels, scrolled by a drag and then a fling.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use hscroller::{
    DataSetObservable, DataSetObserver, HorizontalList, ItemAdapter, ListOptions, Measured,
    RecyclingPool, Viewport,
};

struct Labels {
    words: Vec<String>,
    built: usize,
    observers: DataSetObservable,
}

impl ItemAdapter for Labels {
    type Surface = String;
    type Content = String;

    fn count(&self) -> usize {
        self.words.len()
    }

    fn item_at(&self, index: usize) -> Option<String> {
        self.words.get(index).cloned()
    }

    fn item_id(&self, index: usize) -> u64 {
        index as u64
    }

    fn materialize(
        &mut self,
        index: usize,
        reusable: Option<String>,
        container: Viewport,
    ) -> Measured<String> {
        let mut label = reusable.unwrap_or_else(|| {
            self.built += 1;
            String::new()
        });
        label.clear();
        label.push_str(&self.words[index]);
        let width = 12 + 8 * label.len() as u32;
        Measured::new(label, width, container.height)
    }

    fn subscribe(&mut self, observer: DataSetObserver) {
        self.observers.register(observer);
    }

    fn unsubscribe(&mut self, observer: &DataSetObserver) {
        self.observers.unregister(observer);
    }
}

fn main() {
    let words = (0..500).map(|i| format!("item-{}", i * 7)).collect();
    let dirty = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&dirty);
    let mut list = HorizontalList::new(
        ListOptions::default(),
        RecyclingPool::new(),
        Arc::new(move || flag.store(true, Ordering::Relaxed)),
    )
    .with_viewport(Viewport::new(320, 48))
    .with_adapter(Labels {
        words,
        built: 0,
        observers: DataSetObservable::new(),
    });

    list.layout_pass(0);
    println!("initial window={:?}", list.window_snapshot());

    list.begin_drag();
    list.drag_by(400);
    list.end_drag();
    list.layout_pass(16);
    println!(
        "after drag: offset={} range={:?}",
        list.scroll_offset(),
        list.window().index_range()
    );

    list.fling(-3_000.0, 16);
    let mut now_ms = 16u64;
    while dirty.swap(false, Ordering::Relaxed) {
        now_ms += 16;
        list.layout_pass(now_ms);
    }
    println!(
        "fling settled at t={now_ms}: offset={} range={:?} built={} pooled={}",
        list.scroll_offset(),
        list.window().index_range(),
        list.adapter().map_or(0, |a| a.built),
        list.pool().len()
    );
}
