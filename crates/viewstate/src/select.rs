use crate::view::{ViewState2D, ViewState3D};

/// Value snapshot of the store's two records, the input to every selector.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct StoreSnapshot {
    pub view_2d: ViewState2D,
    pub view_3d: ViewState3D,
}

/// Identifies a registered watcher.
pub type SubscriptionId = u64;

/// A selector is a plain `fn` projecting the snapshot into a value. Plain fn
/// items are referentially stable across store updates, so two subscriptions
/// to the same selector are observably identical.
pub type Selector<T> = fn(&StoreSnapshot) -> T;

pub fn view_state_2d(s: &StoreSnapshot) -> ViewState2D {
    s.view_2d
}

pub fn view_state_3d(s: &StoreSnapshot) -> ViewState3D {
    s.view_3d
}

pub fn longitude_2d(s: &StoreSnapshot) -> f64 {
    s.view_2d.longitude
}

pub fn latitude_2d(s: &StoreSnapshot) -> f64 {
    s.view_2d.latitude
}

pub fn zoom(s: &StoreSnapshot) -> f64 {
    s.view_2d.zoom
}

pub fn pitch_2d(s: &StoreSnapshot) -> f64 {
    s.view_2d.pitch
}

pub fn bearing(s: &StoreSnapshot) -> f64 {
    s.view_2d.bearing
}

pub fn longitude_3d(s: &StoreSnapshot) -> f64 {
    s.view_3d.longitude
}

pub fn latitude_3d(s: &StoreSnapshot) -> f64 {
    s.view_3d.latitude
}

pub fn height(s: &StoreSnapshot) -> f64 {
    s.view_3d.height
}

pub fn heading(s: &StoreSnapshot) -> Option<f64> {
    s.view_3d.heading
}

pub fn pitch_3d(s: &StoreSnapshot) -> Option<f64> {
    s.view_3d.pitch
}

trait Watcher {
    fn notify(&mut self, snapshot: &StoreSnapshot);
}

/// One subscription: a selector, the last value it produced, and the callback
/// to run when the projected value changes.
struct Slot<T: PartialEq + Clone> {
    select: Selector<T>,
    last: T,
    callback: Box<dyn FnMut(&T)>,
}

impl<T: PartialEq + Clone> Watcher for Slot<T> {
    fn notify(&mut self, snapshot: &StoreSnapshot) {
        let next = (self.select)(snapshot);
        if next != self.last {
            self.last = next.clone();
            (self.callback)(&next);
        }
    }
}

/// Registry of watchers keyed by monotonically assigned ids.
///
/// Slice scoping is implicit: a watcher whose selector projects an unchanged
/// value is not called back, so a 3D-only watcher never fires on a 2D update.
#[derive(Default)]
pub struct WatcherRegistry {
    next_id: SubscriptionId,
    slots: Vec<(SubscriptionId, Box<dyn Watcher>)>,
}

impl WatcherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registers a watcher. The callback is not invoked at registration time;
    /// the current projection is cached as the baseline for change detection.
    pub fn register<T, F>(
        &mut self,
        snapshot: &StoreSnapshot,
        select: Selector<T>,
        callback: F,
    ) -> SubscriptionId
    where
        T: PartialEq + Clone + 'static,
        F: FnMut(&T) + 'static,
    {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        let slot = Slot {
            select,
            last: select(snapshot),
            callback: Box::new(callback),
        };
        self.slots.push((id, Box::new(slot)));
        id
    }

    /// Removes a watcher. Returns `true` if it existed.
    pub fn unregister(&mut self, id: SubscriptionId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(slot_id, _)| *slot_id != id);
        self.slots.len() != before
    }

    /// Runs change detection for every watcher, in registration order.
    pub fn notify_all(&mut self, snapshot: &StoreSnapshot) {
        for (_id, watcher) in &mut self.slots {
            watcher.notify(snapshot);
        }
    }
}
