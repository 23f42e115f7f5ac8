pub mod persist;
pub mod select;
pub mod store;
pub mod sync;
pub mod view;

pub use persist::{DEFAULT_STORAGE_KEY, PersistedViewState};
pub use select::{StoreSnapshot, SubscriptionId};
pub use store::*;
pub use sync::*;
pub use view::*;
