pub mod extract;
pub mod record;
pub mod render;
pub mod store;

pub use extract::SessionStats;
pub use record::*;
pub use store::{MemoryStore, SavedSummary, StoreError};

#[cfg(any(test, feature = "testing"))]
pub mod testing;
