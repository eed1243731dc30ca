use crate::*;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
struct FakeSurface {
    serial: usize,
    bound: usize,
}

/// An adapter whose items have fixed widths and whose surfaces remember what they show.
#[derive(Debug, Default)]
struct FakeAdapter {
    widths: Vec<u32>,
    height: u32,
    created: usize,
    calls: Vec<usize>,
    notify_changed_on: Option<usize>,
    observers: DataSetObservable,
}

impl FakeAdapter {
    fn new(widths: Vec<u32>) -> Self {
        Self {
            widths,
            height: 40,
            ..Self::default()
        }
    }

    fn uniform(count: usize, width: u32) -> Self {
        Self::new(vec![width; count])
    }

    fn left_of(&self, index: usize) -> i64 {
        self.widths[..index].iter().map(|&w| w as i64).sum()
    }
}

impl ItemAdapter for FakeAdapter {
    type Surface = FakeSurface;
    type Content = u32;

    fn count(&self) -> usize {
        self.widths.len()
    }

    fn item_at(&self, index: usize) -> Option<u32> {
        self.widths.get(index).copied()
    }

    fn item_id(&self, index: usize) -> u64 {
        1000 + index as u64
    }

    fn materialize(
        &mut self,
        index: usize,
        reusable: Option<FakeSurface>,
        _container: Viewport,
    ) -> Measured<FakeSurface> {
        self.calls.push(index);
        if self.notify_changed_on == Some(index) {
            self.notify_changed_on = None;
            self.observers.notify_changed();
        }
        let mut surface = match reusable {
            Some(surface) => surface,
            None => {
                self.created += 1;
                FakeSurface {
                    serial: self.created,
                    bound: index,
                }
            }
        };
        surface.bound = index;
        Measured::new(surface, self.widths[index], self.height)
    }

    fn subscribe(&mut self, observer: DataSetObserver) {
        self.observers.register(observer);
    }

    fn unsubscribe(&mut self, observer: &DataSetObserver) {
        self.observers.unregister(observer);
    }
}

fn counting_scheduler() -> (Arc<dyn LayoutScheduler>, Arc<AtomicUsize>) {
    let requests = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&requests);
    let scheduler: Arc<dyn LayoutScheduler> = Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (scheduler, requests)
}

fn list_with_pool(
    adapter: FakeAdapter,
    viewport_width: u32,
    options: ListOptions,
    pool: RecyclingPool<FakeSurface>,
) -> HorizontalList<FakeAdapter> {
    let (scheduler, _) = counting_scheduler();
    HorizontalList::new(options, pool, scheduler)
        .with_viewport(Viewport::new(viewport_width, 40))
        .with_adapter(adapter)
}

fn list(adapter: FakeAdapter, viewport_width: u32) -> HorizontalList<FakeAdapter> {
    list_with_pool(
        adapter,
        viewport_width,
        ListOptions::default(),
        RecyclingPool::new(),
    )
}

fn five_by_hundred() -> HorizontalList<FakeAdapter> {
    let mut l = list(FakeAdapter::uniform(5, 100), 250);
    l.layout_pass(0);
    l
}

fn indices(l: &HorizontalList<FakeAdapter>) -> Vec<usize> {
    l.window().iter().map(|(i, _)| i).collect()
}

fn lefts(l: &HorizontalList<FakeAdapter>) -> Vec<i64> {
    l.window().iter().map(|(_, item)| item.left).collect()
}

fn drag_to(l: &mut HorizontalList<FakeAdapter>, offset: i64, now_ms: u64) {
    assert!(l.begin_drag());
    let delta = offset - l.scroll().target_offset();
    assert!(l.drag_by(delta));
    l.end_drag();
    l.layout_pass(now_ms);
}

/// Checks every structural invariant of a settled window.
fn assert_window_consistent(l: &HorizontalList<FakeAdapter>) {
    let adapter = l.adapter().expect("adapter");
    let window = l.window();
    let width = l.viewport().width as i64;
    let offset = l.scroll_offset();
    let count = adapter.count();

    let range = window.index_range();
    assert_eq!(range.start as isize, window.left_index() + 1);
    assert_eq!(range.end, window.right_index());
    assert!(window.right_index() <= count);

    let mut expected_left = window.display_offset();
    for (index, item) in window.iter() {
        assert_eq!(item.surface.bound, index, "surface shows the wrong item");
        assert_eq!(item.left, expected_left, "items must abut");
        assert_eq!(item.left, adapter.left_of(index) - offset, "item drifted from offset");
        assert!(item.right() > 0 && item.left < width, "item {index} is off screen");
        expected_left = item.right();
    }

    if count > 0 && width > 0 {
        let first = window.first().expect("non-empty window");
        let last = window.last().expect("non-empty window");
        assert!(window.left_index() < 0 || first.left <= 0, "gap at left edge");
        assert!(window.right_index() == count || last.right() >= width, "gap at right edge");
    }
}

fn assert_conserved(l: &HorizontalList<FakeAdapter>) {
    let created = l.adapter().expect("adapter").created;
    assert_eq!(created, l.window().len() + l.pool().len());
}

#[test]
fn initial_pass_materializes_visible_items_and_edge_item() {
    let l = five_by_hundred();
    assert_eq!(indices(&l), vec![0, 1, 2]);
    assert_eq!(l.window().left_index(), -1);
    assert_eq!(l.window().right_index(), 3);
    assert_eq!(lefts(&l), vec![0, 100, 200]);
    assert_eq!(l.max_offset(), None);
    assert_window_consistent(&l);
}

#[test]
fn drag_slides_window() {
    let mut l = five_by_hundred();
    drag_to(&mut l, 150, 16);
    assert_eq!(l.scroll_offset(), 150);
    assert_eq!(indices(&l), vec![1, 2, 3]);
    assert_eq!(l.window().display_offset(), -50);
    assert_eq!(lefts(&l), vec![-50, 50, 150]);
    assert_window_consistent(&l);
    assert_conserved(&l);
}

#[test]
fn overshoot_clamps_to_discovered_max_in_one_pass() {
    let mut l = five_by_hundred();
    drag_to(&mut l, 1000, 16);
    assert_eq!(l.max_offset(), Some(250));
    assert_eq!(l.scroll_offset(), 250);
    assert_eq!(indices(&l), vec![2, 3, 4]);
    assert_eq!(lefts(&l), vec![-50, 50, 150]);
    assert_window_consistent(&l);
    assert_conserved(&l);
}

#[test]
fn first_pass_far_past_the_end_still_clamps() {
    let mut l = list(FakeAdapter::uniform(5, 100), 250);
    l.scroll_to(1000);
    l.layout_pass(0);
    assert_eq!(l.scroll_offset(), 250);
    assert_eq!(indices(&l), vec![2, 3, 4]);
    assert_window_consistent(&l);
}

#[test]
fn dragging_before_start_clamps_to_zero() {
    let mut l = five_by_hundred();
    drag_to(&mut l, -40, 16);
    assert_eq!(l.scroll_offset(), 0);
    assert_eq!(indices(&l), vec![0, 1, 2]);
}

#[test]
fn content_narrower_than_viewport_has_zero_max() {
    let mut l = list(FakeAdapter::uniform(2, 100), 250);
    l.layout_pass(0);
    assert_eq!(l.max_offset(), Some(0));
    drag_to(&mut l, 30, 16);
    assert_eq!(l.scroll_offset(), 0);
    assert_eq!(indices(&l), vec![0, 1]);
}

#[test]
fn empty_adapter_materializes_nothing() {
    let mut l = list(FakeAdapter::uniform(0, 100), 250);
    l.layout_pass(0);
    assert!(l.window().is_empty());
    drag_to(&mut l, 80, 16);
    assert!(l.window().is_empty());
    assert_eq!(l.adapter().unwrap().calls, Vec::<usize>::new());
}

#[test]
fn zero_delta_passes_are_idempotent() {
    let mut l = five_by_hundred();
    drag_to(&mut l, 120, 16);
    let before = (l.frame_state(), lefts(&l));
    let calls = l.adapter().unwrap().calls.len();

    l.layout_pass(32);
    l.layout_pass(48);
    assert_eq!((l.frame_state(), lefts(&l)), before);
    assert_eq!(l.adapter().unwrap().calls.len(), calls);
}

#[test]
fn scrolling_reuses_pooled_surfaces() {
    let mut l = list(FakeAdapter::uniform(200, 100), 250);
    l.layout_pass(0);
    for step in 1..=150 {
        drag_to(&mut l, step * 60, step as u64 * 16);
        assert_conserved(&l);
    }
    let adapter = l.adapter().unwrap();
    // At most four 100px items intersect a 250px viewport.
    assert!(adapter.created <= 5, "created {} surfaces", adapter.created);
    assert_window_consistent(&l);
}

#[test]
fn pool_is_shared_between_lists() {
    let pool = RecyclingPool::new();
    let mut a = list_with_pool(
        FakeAdapter::uniform(10, 100),
        250,
        ListOptions::default(),
        pool.clone(),
    );
    a.layout_pass(0);
    // Four items straddle the viewport at 60, three at 600.
    drag_to(&mut a, 60, 16);
    drag_to(&mut a, 600, 32);
    assert_eq!(a.adapter().unwrap().created, 4);
    let pooled = pool.len();
    assert_eq!(pooled, 1);

    let mut b = list_with_pool(
        FakeAdapter::uniform(10, 100),
        250,
        ListOptions::default(),
        pool.clone(),
    );
    b.layout_pass(0);
    assert_eq!(b.adapter().unwrap().created, 3 - pooled.min(3));
    assert_window_consistent(&b);

    b.clear_recycling_pool();
    assert!(a.pool().is_empty());
}

#[test]
fn change_notification_is_deferred_to_the_next_pass() {
    let (scheduler, requests) = counting_scheduler();
    let mut l = HorizontalList::new(ListOptions::default(), RecyclingPool::new(), scheduler)
        .with_viewport(Viewport::new(250, 40))
        .with_adapter(FakeAdapter::uniform(5, 100));
    l.layout_pass(0);
    drag_to(&mut l, 150, 16);

    let before = requests.load(Ordering::SeqCst);
    l.adapter_mut().unwrap().calls.clear();
    l.adapter().unwrap().observers.notify_changed();

    assert_eq!(requests.load(Ordering::SeqCst), before + 1);
    assert_eq!(indices(&l), vec![1, 2, 3], "window must not change inside the notification");

    l.layout_pass(32);
    assert_eq!(l.scroll_offset(), 150);
    assert_eq!(indices(&l), vec![1, 2, 3]);
    assert_eq!(lefts(&l), vec![-50, 50, 150]);
    let calls = &l.adapter().unwrap().calls;
    for index in [1, 2, 3] {
        assert!(calls.contains(&index), "item {index} was not re-requested");
    }
    assert_window_consistent(&l);
    assert_conserved(&l);
}

#[test]
fn change_notification_picks_up_new_widths() {
    let mut l = five_by_hundred();
    drag_to(&mut l, 150, 16);
    l.adapter_mut().unwrap().widths = vec![50; 10];
    l.adapter().unwrap().observers.notify_changed();
    l.layout_pass(32);
    assert_eq!(l.scroll_offset(), 150);
    assert_eq!(indices(&l), vec![3, 4, 5, 6, 7]);
    assert_window_consistent(&l);

    drag_to(&mut l, 1000, 48);
    assert_eq!(l.max_offset(), Some(250));
    assert_eq!(l.scroll_offset(), 250);
}

#[test]
fn invalidation_resets_offset_and_empties_window() {
    let mut l = five_by_hundred();
    drag_to(&mut l, 150, 16);
    l.adapter_mut().unwrap().widths.clear();
    l.adapter().unwrap().observers.notify_invalidated();
    l.layout_pass(32);
    assert_eq!(l.scroll_offset(), 0);
    assert!(l.window().is_empty());
    assert_eq!(l.max_offset(), None);
    assert_conserved(&l);
}

#[test]
fn invalidation_wins_over_change() {
    let mut l = five_by_hundred();
    drag_to(&mut l, 150, 16);
    let observers = &l.adapter().unwrap().observers;
    observers.notify_changed();
    observers.notify_invalidated();
    l.layout_pass(32);
    assert_eq!(l.scroll_offset(), 0);
    assert_eq!(indices(&l), vec![0, 1, 2]);
    assert_window_consistent(&l);
}

#[test]
fn notification_during_fill_requests_another_pass() {
    let mut adapter = FakeAdapter::uniform(10, 100);
    adapter.notify_changed_on = Some(2);
    let mut l = list(adapter, 250);
    assert!(l.layout_pass(0));
    assert_eq!(indices(&l), vec![0, 1, 2]);

    assert!(!l.layout_pass(16));
    assert_eq!(indices(&l), vec![0, 1, 2]);
    assert_window_consistent(&l);
    assert_conserved(&l);
}

#[test]
fn viewport_resize_recomputes_max() {
    let mut l = five_by_hundred();
    drag_to(&mut l, 1000, 16);
    assert_eq!(l.max_offset(), Some(250));

    l.set_viewport(Viewport::new(400, 40));
    l.layout_pass(32);
    assert_eq!(l.max_offset(), Some(100));
    assert_eq!(l.scroll_offset(), 100);
    assert_eq!(indices(&l), vec![1, 2, 3, 4]);
    assert_window_consistent(&l);
}

#[test]
fn set_adapter_resets_and_moves_subscription() {
    let mut l = five_by_hundred();
    drag_to(&mut l, 150, 16);
    let previous = l
        .set_adapter(FakeAdapter::uniform(3, 120))
        .expect("previous adapter");
    assert!(previous.observers.is_empty());
    assert_eq!(l.adapter().unwrap().observers.len(), 1);
    assert_eq!(l.scroll_offset(), 0);
    assert!(l.window().is_empty());
    assert_eq!(l.pool().len(), 3);

    l.layout_pass(32);
    assert_eq!(indices(&l), vec![0, 1, 2]);
    assert_eq!(l.adapter().unwrap().created, 0, "pooled surfaces should be reused");

    let taken = l.take_adapter().expect("adapter");
    assert!(taken.observers.is_empty());
    assert!(!l.layout_pass(48));
}

#[test]
fn fling_decelerates_and_settles() {
    let mut l = list(FakeAdapter::uniform(100, 100), 250);
    l.layout_pass(0);
    assert!(l.begin_drag());
    assert!(l.fling(-2000.0, 0));
    assert_eq!(l.phase(), ScrollPhase::Flinging);
    let expected = l.scroll().fling_trajectory().unwrap().final_offset();

    l.layout_pass(0);
    let mut now = 16;
    let mut last = 0;
    let mut last_step = i64::MAX;
    while l.layout_pass(now) {
        let step = l.scroll_offset() - last;
        assert!(step >= 0, "fling reversed");
        assert!(step <= last_step.saturating_add(1), "fling accelerated");
        last_step = step;
        last = l.scroll_offset();
        assert_window_consistent(&l);
        now += 16;
        assert!(now < 10_000, "fling never settled");
    }
    assert_eq!(l.phase(), ScrollPhase::Idle);
    assert!(!l.is_scrolling());
    assert_eq!(l.scroll_offset(), expected);
    assert!(expected > 400);
}

#[test]
fn fling_ends_early_at_bound() {
    let mut l = five_by_hundred();
    assert!(l.begin_drag());
    assert!(l.fling(-5000.0, 0));
    let duration = l.scroll().fling_trajectory().unwrap().duration_ms;

    let mut now = 0;
    while l.layout_pass(now) {
        now += 16;
    }
    assert!(now < duration, "fling should stop at the bound");
    assert_eq!(l.scroll_offset(), 250);
    assert_eq!(l.phase(), ScrollPhase::Idle);
    assert_eq!(indices(&l), vec![2, 3, 4]);
}

#[test]
fn fling_toward_start_stops_at_zero() {
    let mut l = list(FakeAdapter::uniform(100, 100), 250);
    l.layout_pass(0);
    drag_to(&mut l, 300, 16);
    assert!(l.fling(4000.0, 16));
    let mut now = 16;
    while l.layout_pass(now) {
        now += 16;
    }
    assert_eq!(l.scroll_offset(), 0);
    assert_window_consistent(&l);
}

#[test]
fn drag_cancels_fling() {
    let mut l = list(FakeAdapter::uniform(100, 100), 250);
    l.layout_pass(0);
    assert!(l.fling(-3000.0, 0));
    l.layout_pass(16);
    let offset = l.scroll_offset();

    assert!(l.begin_drag());
    assert_eq!(l.phase(), ScrollPhase::Dragging);
    assert!(!l.scroll().is_flinging());
    assert!(!l.layout_pass(32));
    assert_eq!(l.scroll_offset(), offset);
}

#[test]
fn fling_disabled_keeps_drag_working() {
    let options = ListOptions::default().with_fling_enabled(false);
    let mut l = list_with_pool(
        FakeAdapter::uniform(10, 100),
        250,
        options,
        RecyclingPool::new(),
    );
    l.layout_pass(0);
    assert!(l.begin_drag());
    assert!(l.drag_by(120));
    assert!(!l.fling(-3000.0, 0));
    assert_eq!(l.phase(), ScrollPhase::Idle);
    assert!(!l.layout_pass(16));
    assert_eq!(l.scroll_offset(), 120);
}

#[test]
fn scroll_disabled_rejects_drags() {
    let mut l = five_by_hundred();
    l.set_scroll_enabled(false);
    assert!(!l.begin_drag());
    assert!(!l.drag_by(100));
    assert!(!l.fling(-3000.0, 0));
    l.layout_pass(16);
    assert_eq!(l.scroll_offset(), 0);
    assert_eq!(l.phase(), ScrollPhase::Idle);
}

#[test]
fn disabling_fling_stops_active_fling() {
    let mut l = list(FakeAdapter::uniform(100, 100), 250);
    l.layout_pass(0);
    assert!(l.fling(-3000.0, 0));
    l.set_fling_enabled(false);
    assert!(!l.scroll().is_flinging());
    assert!(!l.is_scrolling());
}

#[test]
fn tiny_fling_does_not_start() {
    let mut l = five_by_hundred();
    assert!(l.begin_drag());
    assert!(!l.fling(-5.0, 0));
    assert_eq!(l.phase(), ScrollPhase::Idle);
}

#[test]
fn hit_test_maps_point_to_adapter_index() {
    let mut l = five_by_hundred();
    drag_to(&mut l, 150, 16);

    let mut hits = Vec::new();
    l.window().for_each_hit(60.0, 10.0, |index, _| hits.push(index));
    assert_eq!(hits, vec![2]);

    hits.clear();
    l.window().for_each_hit(-10.0, 10.0, |index, _| hits.push(index));
    assert_eq!(hits, vec![1]);

    hits.clear();
    l.window().for_each_hit(60.0, 45.0, |index, _| hits.push(index));
    assert!(hits.is_empty());

    assert_eq!(l.window().index_at(0), 1);
    assert_eq!(l.window().get(3).map(|item| item.left), Some(150));
    assert_eq!(l.item_id(3), Some(1003));
    assert_eq!(l.item_id(5), None);
}

#[test]
fn restore_scroll_rebuilds_at_saved_offset() {
    let mut l = five_by_hundred();
    drag_to(&mut l, 150, 16);
    let saved = l.scroll_snapshot();

    let mut restored = list(FakeAdapter::uniform(5, 100), 250);
    restored.restore_scroll(saved);
    restored.layout_pass(0);
    assert_eq!(restored.scroll_offset(), 150);
    assert_eq!(indices(&restored), vec![1, 2, 3]);
    assert_eq!(restored.window_snapshot(), l.window_snapshot());
}

#[test]
fn observable_ignores_duplicate_registration() {
    let (scheduler, requests) = counting_scheduler();
    let l: HorizontalList<FakeAdapter> =
        HorizontalList::new(ListOptions::default(), RecyclingPool::new(), scheduler);
    let mut observable = DataSetObservable::new();
    observable.register(l.observer().clone());
    observable.register(l.observer().clone());
    assert_eq!(observable.len(), 1);

    observable.notify_changed();
    assert_eq!(requests.load(Ordering::SeqCst), 1);
    observable.unregister(l.observer());
    assert!(observable.is_empty());
}

#[test]
fn fling_trajectory_rests_where_velocity_fades() {
    let t = FlingTrajectory::new(100, 1000.0, 50, 4.2, 20.0);
    assert_eq!(t.sample(50), 100);
    assert!(t.duration_ms > 900 && t.duration_ms < 950);
    assert!(t.is_finished(50 + t.duration_ms));
    assert_eq!(t.sample(50 + t.duration_ms + 500), t.final_offset());
    // v0 / k * (1 - stop / v0)
    let travelled: f64 = 1000.0 / 4.2 * (1.0 - 20.0 / 1000.0);
    assert!((t.final_offset() - 100 - travelled.round() as i64).abs() <= 1);
    assert_eq!(t.velocity_at(50 + t.duration_ms), 0.0);
    assert!(t.velocity_at(60) < 1000.0);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "adapter count shrank without a change notification")]
fn silent_count_shrink_is_a_precondition_violation() {
    let mut l = five_by_hundred();
    l.adapter_mut().unwrap().widths.truncate(1);
    l.layout_pass(16);
}

#[test]
fn acquire_on_empty_pool_returns_none() {
    let pool = RecyclingPool::<u32>::new();
    assert!(pool.is_empty());
    assert_eq!(pool.acquire(), None);
}

#[test]
fn pool_clones_share_storage() {
    let a = RecyclingPool::new();
    let b = a.clone();
    a.reclaim(7u32);
    assert!(a.ptr_eq(&b));
    assert_eq!(b.len(), 1);
    assert_eq!(b.acquire(), Some(7));
    assert!(a.is_empty());
}

#[test]
fn separate_pools_are_isolated() {
    let a = RecyclingPool::new();
    let b = RecyclingPool::new();
    a.reclaim(1u32);
    assert!(!a.ptr_eq(&b));
    assert_eq!(b.acquire(), None);
}

#[test]
fn pool_clear_drops_everything() {
    let pool = RecyclingPool::new();
    for i in 0..4u32 {
        pool.reclaim(i);
    }
    pool.clear();
    assert_eq!(pool.len(), 0);
    assert_eq!(pool.acquire(), None);
}

#[test]
fn pool_is_shared_across_threads() {
    let pool = RecyclingPool::<u32>::new();
    let workers: Vec<_> = (0..4u32)
        .map(|worker| {
            let pool = pool.clone();
            std::thread::spawn(move || {
                for i in 0..250 {
                    pool.reclaim(worker * 1000 + i);
                    if i % 5 == 0 {
                        let surface = pool.acquire().expect("just reclaimed");
                        pool.reclaim(surface);
                    }
                }
            })
        })
        .collect();
    for i in 0..250 {
        pool.reclaim(9000 + i);
    }
    for worker in workers {
        worker.join().expect("worker panicked");
    }

    assert_eq!(pool.len(), 1250);
    let mut drained: Vec<u32> = std::iter::from_fn(|| pool.acquire()).collect();
    drained.sort_unstable();
    let mut expected: Vec<u32> = (0..5u32)
        .flat_map(|w| {
            let base = if w == 4 { 9000 } else { w * 1000 };
            base..base + 250
        })
        .collect();
    expected.sort_unstable();
    assert_eq!(drained, expected);
}

#[test]
fn long_jump_reuses_one_surface_for_skipped_items() {
    let mut l = list(FakeAdapter::uniform(2000, 100), 250);
    l.layout_pass(0);
    l.scroll_to(100_000);
    l.layout_pass(16);
    assert_eq!(indices(&l), vec![1000, 1001, 1002]);
    assert!(l.adapter().unwrap().created <= 5, "created {}", l.adapter().unwrap().created);
    assert_window_consistent(&l);
    assert_conserved(&l);

    l.scroll_to(300);
    l.layout_pass(32);
    assert_eq!(indices(&l), vec![3, 4, 5]);
    assert!(l.adapter().unwrap().created <= 5, "created {}", l.adapter().unwrap().created);
    assert_window_consistent(&l);
    assert_conserved(&l);
}

#[test]
fn deep_rebuild_does_not_grow_pool() {
    let mut l = list(FakeAdapter::uniform(2000, 100), 250);
    l.layout_pass(0);
    drag_to(&mut l, 100_000, 16);
    assert!(l.adapter().unwrap().created <= 5);

    l.adapter().unwrap().observers.notify_changed();
    l.layout_pass(32);
    assert_eq!(l.scroll_offset(), 100_000);
    assert_eq!(indices(&l), vec![1000, 1001, 1002]);
    assert!(l.adapter().unwrap().created <= 5, "created {}", l.adapter().unwrap().created);
    assert!(l.pool().len() <= 2);
    assert_window_consistent(&l);
    assert_conserved(&l);
}

#[derive(Clone, Debug)]
enum Op {
    Drag(i64),
    Fling(f32),
    Changed,
    Pass,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-400i64..400).prop_map(Op::Drag),
        1 => (-4000.0f32..4000.0).prop_map(Op::Fling),
        1 => Just(Op::Changed),
        2 => Just(Op::Pass),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn window_stays_contiguous_conserved_and_clamped(
        widths in prop::collection::vec(1u32..200, 0..40),
        viewport_width in 1u32..400,
        ops in prop::collection::vec(arb_op(), 1..40),
    ) {
        let total: i64 = widths.iter().map(|&w| w as i64).sum();
        let mut l = list(FakeAdapter::new(widths), viewport_width);
        let mut now = 0u64;
        l.layout_pass(now);

        for op in ops {
            now += 16;
            match op {
                Op::Drag(delta) => {
                    l.begin_drag();
                    l.drag_by(delta);
                    l.end_drag();
                }
                Op::Fling(velocity) => {
                    l.fling(velocity, now);
                }
                Op::Changed => l.adapter().unwrap().observers.notify_changed(),
                Op::Pass => {}
            }
            l.layout_pass(now);

            assert_window_consistent(&l);
            assert_conserved(&l);
            prop_assert!(l.scroll_offset() >= 0);
            if let Some(max) = l.max_offset() {
                prop_assert_eq!(max, (total - viewport_width as i64).max(0));
                prop_assert!(l.scroll_offset() <= max);
            }
        }

        // Settle any fling, then check that re-layout is a fixed point.
        while l.layout_pass(now) {
            now += 16;
        }
        let settled = (l.frame_state(), lefts(&l));
        l.layout_pass(now + 16);
        prop_assert_eq!((l.frame_state(), lefts(&l)), settled);
    }
}
