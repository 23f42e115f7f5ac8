use serde::{Deserialize, Serialize};
use storage::{KeyValueStore, StorageError, get_json, set_json};

use crate::view::{ViewState2D, ViewState3D};

/// Storage identifier the store persists under unless the caller injects
/// another one.
pub const DEFAULT_STORAGE_KEY: &str = "map-view-state";

/// The persisted slice: the two state records and nothing else.
///
/// There is no version field. A payload whose sub-records were renamed or
/// restructured decodes as defaults, never as a parse error.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedViewState {
    #[serde(rename = "viewState2D")]
    pub view_state_2d: ViewState2D,
    #[serde(rename = "viewState3D")]
    pub view_state_3d: ViewState3D,
}

/// Reads the persisted slice under `key`.
///
/// Absent, blank, and unreadable payloads all load as defaults; storage
/// failures are treated the same way. Callers never see an error.
pub fn load(store: &dyn KeyValueStore, key: &str) -> PersistedViewState {
    match get_json::<PersistedViewState>(store, key) {
        Ok(Some(state)) => state,
        Ok(None) | Err(_) => PersistedViewState::default(),
    }
}

/// Writes the persisted slice under `key`.
pub fn save(
    store: &mut dyn KeyValueStore,
    key: &str,
    state: &PersistedViewState,
) -> Result<(), StorageError> {
    set_json(store, key, state)
}
