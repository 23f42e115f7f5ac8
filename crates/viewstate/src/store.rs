use serde_json::Value;
use storage::KeyValueStore;
use telemetry::{Fields, LogHandle};

use crate::persist::{self, PersistedViewState};
use crate::select::{Selector, StoreSnapshot, SubscriptionId, WatcherRegistry};
use crate::view::{ViewState2D, ViewState3D};

/// Source tag on every record this store emits.
const LOG_SOURCE: &str = "view-state-store";

struct StorageBinding {
    store: Box<dyn KeyValueStore>,
    key: String,
}

/// Single owner of the 2D and 3D view-state records.
///
/// Mutation goes through exactly three operations; each replaces its record
/// wholesale. The store is single-writer by construction (`&mut self`
/// setters), so there is no internal locking. Construction is explicit —
/// whoever composes the application owns the store and hands out access.
pub struct ViewStateStore {
    view_2d: ViewState2D,
    view_3d: ViewState3D,
    watchers: WatcherRegistry,
    storage: Option<StorageBinding>,
    log: LogHandle,
}

impl ViewStateStore {
    /// A store with default state and no persistence.
    pub fn new(log: LogHandle) -> Self {
        Self {
            view_2d: ViewState2D::default(),
            view_3d: ViewState3D::default(),
            watchers: WatcherRegistry::new(),
            storage: None,
            log,
        }
    }

    /// A store backed by `storage` under `key`.
    ///
    /// The persisted slice is restored once, here; absent or malformed
    /// payloads fall back to defaults without surfacing an error.
    pub fn with_storage(
        storage: Box<dyn KeyValueStore>,
        key: impl Into<String>,
        log: LogHandle,
    ) -> Self {
        let key = key.into();
        let restored = persist::load(storage.as_ref(), &key);
        Self {
            view_2d: restored.view_state_2d,
            view_3d: restored.view_state_3d,
            watchers: WatcherRegistry::new(),
            storage: Some(StorageBinding { store: storage, key }),
            log,
        }
    }

    pub fn view_state_2d(&self) -> ViewState2D {
        self.view_2d
    }

    pub fn view_state_3d(&self) -> ViewState3D {
        self.view_3d
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            view_2d: self.view_2d,
            view_3d: self.view_3d,
        }
    }

    /// Replaces the 2D record wholesale. No field validation.
    pub fn set_view_state_2d(&mut self, next: ViewState2D) {
        // The new state is visible to readers before the log record is even
        // queued; log and persist failures never roll the state back.
        self.view_2d = next;
        self.log.debug(
            LOG_SOURCE,
            "2d view state replaced",
            state_field("viewState2D", &next),
        );
        self.persist();
        self.notify();
    }

    /// Replaces the 3D record wholesale. No field validation.
    pub fn set_view_state_3d(&mut self, next: ViewState3D) {
        self.view_3d = next;
        self.log.debug(
            LOG_SOURCE,
            "3d view state replaced",
            state_field("viewState3D", &next),
        );
        self.persist();
        self.notify();
    }

    /// Restores both records to their defaults. Idempotent.
    pub fn reset(&mut self) {
        self.view_2d = ViewState2D::default();
        self.view_3d = ViewState3D::default();

        let mut fields = state_field("viewState2D", &self.view_2d);
        fields.extend(state_field("viewState3D", &self.view_3d));
        self.log.info(LOG_SOURCE, "view state reset", fields);

        self.persist();
        self.notify();
    }

    /// Subscribes `callback` to changes of `select`'s projection.
    ///
    /// The callback runs only when the projected value changes by equality;
    /// it does not run at subscription time.
    pub fn watch<T, F>(&mut self, select: Selector<T>, callback: F) -> SubscriptionId
    where
        T: PartialEq + Clone + 'static,
        F: FnMut(&T) + 'static,
    {
        let snapshot = self.snapshot();
        self.watchers.register(&snapshot, select, callback)
    }

    /// Drops a subscription. Returns `true` if it existed.
    pub fn unwatch(&mut self, id: SubscriptionId) -> bool {
        self.watchers.unregister(id)
    }

    /// Best-effort write of the persisted slice. The in-memory state is the
    /// source of truth; a failed write only means the stored copy lags.
    fn persist(&mut self) {
        let Some(binding) = &mut self.storage else {
            return;
        };
        let slice = PersistedViewState {
            view_state_2d: self.view_2d,
            view_state_3d: self.view_3d,
        };
        let _ = persist::save(binding.store.as_mut(), &binding.key, &slice);
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        self.watchers.notify_all(&snapshot);
    }
}

fn state_field<T: serde::Serialize>(key: &str, state: &T) -> Fields {
    let mut fields = Fields::new();
    fields.insert(
        key.to_string(),
        serde_json::to_value(state).unwrap_or(Value::Null),
    );
    fields
}
