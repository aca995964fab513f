//! State management module.
//!
//! - `store` - the configuration store, single source of truth for the design
//! - `observer` - topic-filtered change notification
//! - `session` - the store plus persistence and panel flags, owned by the
//!   logic thread
//! - `traits` - snapshot creation

pub mod observer;
pub mod session;
pub mod store;
pub mod traits;

// Re-exports for convenient access
pub use observer::{Change, ChangeSet, ObserverId, Topics};
pub use session::Session;
pub use store::{ConfigStore, ConfigurationState};
pub use traits::Snapshot;
