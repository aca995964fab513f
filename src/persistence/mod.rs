//! Local key-value persistence for the design.
//!
//! `storage` holds the key-value backends (the desktop counterpart of a
//! browser's local storage), `bridge` mirrors the store into them.

pub mod bridge;
pub mod storage;

pub use bridge::{ACTIVE_INDEX_KEY, COLOR_KEY, DECALS_KEY, PersistenceBridge};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
