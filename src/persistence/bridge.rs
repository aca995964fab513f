//! Mirrors the configuration store into key-value storage.
//!
//! Three independent entries are kept: the raw color string, the decal list
//! as a JSON array and the active index as a decimal string. Writes are
//! unconditional and not transactional across keys; anything unreadable at
//! startup falls back to the defaults.

use super::storage::KeyValueStorage;
use crate::models::{Decal, GarmentColor};
use crate::state::observer::{Change, ObserverId, Topics};
use crate::state::store::{ConfigStore, ConfigurationState};
use std::cell::RefCell;
use std::rc::Rc;

pub const COLOR_KEY: &str = "tshirtColor";
pub const DECALS_KEY: &str = "tshirtDecals";
pub const ACTIVE_INDEX_KEY: &str = "activeDecalIndex";

pub type SharedStorage = Rc<RefCell<Box<dyn KeyValueStorage>>>;

#[derive(Clone)]
pub struct PersistenceBridge {
    storage: SharedStorage,
}

impl PersistenceBridge {
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self {
            storage: Rc::new(RefCell::new(storage)),
        }
    }

    pub fn storage(&self) -> SharedStorage {
        Rc::clone(&self.storage)
    }

    /// Reads the persisted design.
    ///
    /// A decal list that fails to parse invalidates the whole record and the
    /// defaults are returned instead.
    pub fn load(&self) -> ConfigurationState {
        let storage = self.storage.borrow();
        let mut state = ConfigurationState::default();

        if let Some(raw) = storage.get(DECALS_KEY) {
            match serde_json::from_str::<Vec<Decal>>(&raw) {
                Ok(decals) => state.decals = decals,
                Err(e) => {
                    log::warn!("STORAGE: Discarding unreadable decal list: {}", e);
                    return ConfigurationState::default();
                }
            }
        }

        if let Some(color) = storage.get(COLOR_KEY)
            && !color.is_empty()
        {
            state.garment_color = GarmentColor::new(color);
        }

        if let Some(raw) = storage.get(ACTIVE_INDEX_KEY) {
            state.active_decal_index = raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("STORAGE: Ignoring invalid active index {:?}", raw);
                0
            });
        }

        state
    }

    /// Loads the persisted design into `store`. Returns whether any decals
    /// were restored.
    pub fn hydrate(&self, store: &mut ConfigStore) -> bool {
        let state = self.load();
        let restored = !state.decals.is_empty();
        log::info!(
            "STORAGE: Hydrated color {} with {} decal(s)",
            state.garment_color,
            state.decals.len()
        );
        store.hydrate(state);
        restored
    }

    /// Writes all three entries in one storage update.
    pub fn persist(&self, state: &ConfigurationState) {
        let decals = match serde_json::to_string(&state.decals) {
            Ok(json) => json,
            Err(e) => {
                log::error!("STORAGE: Failed to encode decals: {}", e);
                return;
            }
        };

        let index = state.active_decal_index.to_string();
        let writes = [
            (COLOR_KEY, state.garment_color.as_str()),
            (DECALS_KEY, decals.as_str()),
            (ACTIVE_INDEX_KEY, index.as_str()),
        ];
        if let Err(e) = self.storage.borrow_mut().set_many(&writes) {
            log::error!("STORAGE: Failed to write design: {}", e);
        }
    }

    /// Removes all three entries.
    pub fn clear(&self) {
        let keys = [COLOR_KEY, DECALS_KEY, ACTIVE_INDEX_KEY];
        if let Err(e) = self.storage.borrow_mut().remove_many(&keys) {
            log::error!("STORAGE: Failed to clear design: {}", e);
        }
    }

    /// Subscribes a mirror that persists after every store change.
    ///
    /// Resets are skipped: the entries were just removed and stay removed.
    pub fn attach(&self, store: &mut ConfigStore) -> ObserverId {
        let bridge = self.clone();
        store.subscribe(
            Topics::ALL,
            Box::new(move |changes, state| {
                if changes.contains(&Change::Reset) {
                    return;
                }
                bridge.persist(state);
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Axis, DecalProperty, Placement};
    use crate::persistence::{MemoryStorage, StorageError};
    use crate::state::traits::Snapshot;

    const TEX_A: &str = "data:image/png;base64,AAAA";
    const TEX_B: &str = "data:image/jpeg;base64,BBBB";

    fn bridge() -> PersistenceBridge {
        PersistenceBridge::new(Box::new(MemoryStorage::default()))
    }

    fn get(bridge: &PersistenceBridge, key: &str) -> Option<String> {
        bridge.storage().borrow().get(key)
    }

    #[test]
    fn test_round_trip() {
        let bridge = bridge();
        let mut store = ConfigStore::new(Placement::default());
        bridge.attach(&mut store);

        store.set_color("#336699");
        store.add_decal(TEX_A);
        store.add_decal(TEX_B);
        store.update_decal_axis(DecalProperty::Rotation, Axis::Z, 1.25);
        store.set_active_index(0);
        let expected = store.state().clone();

        let mut fresh = ConfigStore::new(Placement::default());
        assert!(bridge.hydrate(&mut fresh));
        assert_eq!(fresh.state(), &expected);
    }

    #[test]
    fn test_round_trip_keeps_every_generated_id() {
        for _ in 0..200 {
            let bridge = bridge();
            let mut store = ConfigStore::new(Placement::default());
            bridge.attach(&mut store);
            for _ in 0..5 {
                store.add_decal(TEX_A);
            }
            let expected = store.state().clone();

            let mut fresh = ConfigStore::new(Placement::default());
            bridge.hydrate(&mut fresh);
            assert_eq!(fresh.state(), &expected);
        }
    }

    /// Counts single and batched writes reaching the backend.
    #[derive(Default)]
    struct CountingStorage {
        inner: MemoryStorage,
        writes: Rc<RefCell<(usize, usize)>>,
    }

    impl KeyValueStorage for CountingStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.writes.borrow_mut().0 += 1;
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.writes.borrow_mut().0 += 1;
            self.inner.remove(key)
        }

        fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
            self.writes.borrow_mut().1 += 1;
            self.inner.set_many(entries)
        }

        fn remove_many(&mut self, keys: &[&str]) -> Result<(), StorageError> {
            self.writes.borrow_mut().1 += 1;
            self.inner.remove_many(keys)
        }
    }

    #[test]
    fn test_one_storage_write_per_change() {
        let storage = CountingStorage::default();
        let writes = Rc::clone(&storage.writes);
        let bridge = PersistenceBridge::new(Box::new(storage));
        let mut store = ConfigStore::new(Placement::default());
        bridge.attach(&mut store);

        store.add_decal(TEX_A);
        store.update_decal_axis(DecalProperty::Position, Axis::X, 0.2);
        store.update_decal_axis(DecalProperty::Position, Axis::X, 0.3);
        assert_eq!(*writes.borrow(), (0, 3));

        store.reset_all(&bridge);
        assert_eq!(*writes.borrow(), (0, 4));
    }

    #[test]
    fn test_writes_on_every_change() {
        let bridge = bridge();
        let mut store = ConfigStore::new(Placement::default());
        bridge.attach(&mut store);

        store.set_color("#010203");
        assert_eq!(get(&bridge, COLOR_KEY).as_deref(), Some("#010203"));
        assert_eq!(get(&bridge, DECALS_KEY).as_deref(), Some("[]"));
        assert_eq!(get(&bridge, ACTIVE_INDEX_KEY).as_deref(), Some("0"));

        store.add_decal(TEX_A);
        store.add_decal(TEX_B);
        assert_eq!(get(&bridge, ACTIVE_INDEX_KEY).as_deref(), Some("1"));
    }

    #[test]
    fn test_decal_record_layout() {
        let bridge = bridge();
        let mut store = ConfigStore::new(Placement::default());
        bridge.attach(&mut store);
        store.add_decal(TEX_A);

        let raw = get(&bridge, DECALS_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let record = &value[0];
        assert!(record["id"].is_number());
        assert_eq!(record["texture"], TEX_A);
        assert_eq!(record["scale"].as_array().map(|a| a.len()), Some(3));
        assert!(record.get("position").is_some());
        assert!(record.get("rotation").is_some());
    }

    #[test]
    fn test_malformed_decals_fall_back_to_defaults() {
        let bridge = bridge();
        {
            let storage = bridge.storage();
            let mut storage = storage.borrow_mut();
            storage.set(COLOR_KEY, "#ff0000").unwrap();
            storage.set(DECALS_KEY, "[{\"id\": oops").unwrap();
            storage.set(ACTIVE_INDEX_KEY, "3").unwrap();
        }

        let mut store = ConfigStore::new(Placement::default());
        assert!(!bridge.hydrate(&mut store));
        assert_eq!(store.state(), &ConfigurationState::default());
    }

    #[test]
    fn test_invalid_index_and_empty_color() {
        let bridge = bridge();
        {
            let storage = bridge.storage();
            let mut storage = storage.borrow_mut();
            storage.set(COLOR_KEY, "").unwrap();
            storage.set(ACTIVE_INDEX_KEY, "seven").unwrap();
        }

        let state = bridge.load();
        assert_eq!(state.garment_color.as_str(), "#ffffff");
        assert_eq!(state.active_decal_index, 0);
    }

    #[test]
    fn test_out_of_range_index_is_clamped() {
        let bridge = bridge();
        let mut store = ConfigStore::new(Placement::default());
        bridge.attach(&mut store);
        store.add_decal(TEX_A);
        store.add_decal(TEX_B);
        bridge
            .storage()
            .borrow_mut()
            .set(ACTIVE_INDEX_KEY, "12")
            .unwrap();

        let mut fresh = ConfigStore::new(Placement::default());
        bridge.hydrate(&mut fresh);
        assert_eq!(fresh.state().active_decal_index, 1);
    }

    #[test]
    fn test_reset_removes_entries() {
        let bridge = bridge();
        let mut store = ConfigStore::new(Placement::default());
        bridge.attach(&mut store);
        store.set_color("#000000");
        store.add_decal(TEX_A);

        store.reset_all(&bridge);
        assert_eq!(get(&bridge, COLOR_KEY), None);
        assert_eq!(get(&bridge, DECALS_KEY), None);
        assert_eq!(get(&bridge, ACTIVE_INDEX_KEY), None);

        let mut fresh = ConfigStore::new(Placement::default());
        bridge.hydrate(&mut fresh);
        assert_eq!(fresh.create_snapshot().garment_color.as_str(), "#ffffff");
        assert_eq!(fresh.state(), &ConfigurationState::default());
    }
}
