//! The configuration store: single source of truth for the garment design.
//!
//! The store is an explicit value owned by the logic thread's session and
//! handed by reference to whoever needs it. Every operation is total: bad
//! input degrades to "nothing changed" rather than an error.

use crate::models::{Axis, Decal, DecalId, DecalProperty, GarmentColor, Placement};
use crate::persistence::PersistenceBridge;
use crate::shared::snapshot::ConfigSnapshot;
use crate::state::observer::{Change, ChangeSet, ObserverFn, ObserverId, ObserverRegistry, Topics};
use crate::state::traits::Snapshot;
use std::sync::Arc;

/// Mutable design state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationState {
    pub garment_color: GarmentColor,
    /// Insertion order is navigation order and draw order.
    pub decals: Vec<Decal>,
    /// Valid index into `decals` whenever it is non-empty, 0 otherwise.
    pub active_decal_index: usize,
}

impl ConfigurationState {
    pub fn active_decal(&self) -> Option<&Decal> {
        self.decals.get(self.active_decal_index)
    }

    pub fn position_of(&self, id: DecalId) -> Option<usize> {
        self.decals.iter().position(|d| d.id == id)
    }

    /// Restores the index invariant after the decal list changed.
    fn clamp_active_index(&mut self) {
        if self.decals.is_empty() {
            self.active_decal_index = 0;
        } else if self.active_decal_index >= self.decals.len() {
            self.active_decal_index = self.decals.len() - 1;
        }
    }
}

pub struct ConfigStore {
    state: ConfigurationState,
    placement: Placement,
    observers: ObserverRegistry,
    revision: u64,
}

impl ConfigStore {
    pub fn new(placement: Placement) -> Self {
        Self {
            state: ConfigurationState::default(),
            placement,
            observers: ObserverRegistry::default(),
            revision: 0,
        }
    }

    pub fn state(&self) -> &ConfigurationState {
        &self.state
    }

    pub fn active_decal(&self) -> Option<&Decal> {
        self.state.active_decal()
    }

    /// Bumped once per operation that changed something.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, topics: Topics, callback: ObserverFn) -> ObserverId {
        self.observers.subscribe(topics, callback)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn set_color(&mut self, value: impl Into<String>) {
        let color = GarmentColor::new(value);
        if color == self.state.garment_color {
            return;
        }
        self.state.garment_color = color;
        self.commit(vec![Change::Color]);
    }

    /// Appends a decal with the default placement and makes it active.
    pub fn add_decal(&mut self, texture: impl Into<Arc<str>>) -> DecalId {
        let mut id = DecalId::generate();
        while self.state.position_of(id).is_some() {
            id = DecalId::generate();
        }

        let decal = Decal::new(id, texture.into(), &self.placement);
        self.state.decals.push(decal);
        self.state.active_decal_index = self.state.decals.len() - 1;
        self.commit(vec![Change::DecalAdded(id)]);
        id
    }

    /// Removes every decal with `id`; unknown ids are ignored.
    pub fn remove_decal(&mut self, id: DecalId) {
        let before = self.state.decals.len();
        self.state.decals.retain(|d| d.id != id);
        if self.state.decals.len() == before {
            return;
        }
        self.state.clamp_active_index();

        let mut changes = vec![Change::DecalRemoved(id)];
        if self.state.decals.is_empty() {
            changes.push(Change::DecalsCleared);
        }
        self.commit(changes);
    }

    pub fn remove_active_decal(&mut self) {
        if let Some(id) = self.active_decal().map(|d| d.id) {
            self.remove_decal(id);
        }
    }

    /// Sets one component of the active decal's vector.
    pub fn update_decal_axis(&mut self, property: DecalProperty, axis: Axis, value: f32) {
        let index = self.state.active_decal_index;
        let Some(decal) = self.state.decals.get_mut(index) else {
            return;
        };

        let slot = &mut decal.vector_mut(property)[axis.index()];
        if *slot == value {
            return;
        }
        *slot = value;

        let id = decal.id;
        self.commit(vec![Change::DecalUpdated { id, property, axis }]);
    }

    /// Text-input flavour of [`Self::update_decal_axis`]; unparseable input
    /// and out-of-range axes are ignored.
    pub fn update_decal_axis_str(&mut self, property: DecalProperty, axis: usize, value: &str) {
        let Some(axis) = Axis::from_index(axis) else {
            return;
        };
        match value.trim().parse::<f32>() {
            Ok(v) if v.is_finite() => self.update_decal_axis(property, axis, v),
            _ => log::debug!("STORE: Ignoring non-numeric {} value {:?}", property, value),
        }
    }

    /// Moves the active index, clamped to the decal list.
    pub fn set_active_index(&mut self, index: usize) {
        let clamped = index.min(self.state.decals.len().saturating_sub(1));
        let from = self.state.active_decal_index;
        if clamped == from {
            return;
        }
        self.state.active_decal_index = clamped;
        self.commit(vec![Change::ActiveIndex { from, to: clamped }]);
    }

    pub fn select_previous(&mut self) {
        self.set_active_index(self.state.active_decal_index.saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        self.set_active_index(self.state.active_decal_index + 1);
    }

    /// Clears persisted entries, then returns every field to its default.
    pub fn reset_all(&mut self, bridge: &PersistenceBridge) {
        bridge.clear();
        self.state = ConfigurationState::default();
        self.commit(vec![Change::Reset]);
    }

    /// Replaces the whole state with one read from storage.
    pub fn hydrate(&mut self, mut state: ConfigurationState) {
        state.clamp_active_index();
        self.state = state;
        self.commit(vec![Change::Hydrated]);
    }

    fn commit(&mut self, changes: Vec<Change>) {
        let mut set = ChangeSet::new();
        for change in changes {
            log::debug!("STORE: {:?}", change);
            set.push(change);
        }
        self.revision += 1;
        self.observers.notify(&set, &self.state);
    }
}

impl Snapshot for ConfigStore {
    type Output = ConfigSnapshot;

    fn create_snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            garment_color: self.state.garment_color.clone(),
            garment_texture: None,
            decals: self.state.decals.iter().cloned().collect(),
            active_decal_index: self.state.active_decal_index,
            revision: self.revision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TEX: &str = "data:image/png;base64,iVBORw0KGgo=";

    fn store() -> ConfigStore {
        ConfigStore::new(Placement::default())
    }

    #[test]
    fn test_defaults() {
        let store = store();
        assert_eq!(store.state().garment_color.as_str(), "#ffffff");
        assert!(store.state().decals.is_empty());
        assert_eq!(store.state().active_decal_index, 0);
        assert!(store.active_decal().is_none());
    }

    #[test]
    fn test_add_tracks_count_and_active_index() {
        let mut store = store();
        for n in 1..=4 {
            let id = store.add_decal(TEX);
            assert_eq!(store.state().decals.len(), n);
            assert_eq!(store.state().active_decal_index, n - 1);
            assert_eq!(store.active_decal().map(|d| d.id), Some(id));
        }
    }

    #[test]
    fn test_add_after_navigating_back_selects_new_decal() {
        let mut store = store();
        store.add_decal(TEX);
        store.add_decal(TEX);
        store.set_active_index(0);
        store.add_decal(TEX);
        assert_eq!(store.state().active_decal_index, 2);
    }

    #[test]
    fn test_new_decal_gets_default_placement() {
        let mut store = store();
        store.add_decal(TEX);
        let decal = store.active_decal().unwrap();
        assert_eq!(decal.position, [0.0, 0.1, 0.1]);
        assert_eq!(decal.rotation, [0.0, 0.0, 0.0]);
        assert_eq!(decal.scale, [0.15, 0.15, 0.15]);
        assert_eq!(&*decal.texture, TEX);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = store();
        let a = store.add_decal(TEX);
        store.add_decal(TEX);
        store.add_decal(TEX);

        store.remove_decal(a);
        let once = store.state().clone();
        let revision = store.revision();

        store.remove_decal(a);
        assert_eq!(store.state(), &once);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_remove_drops_duplicate_ids_at_once() {
        let mut store = store();
        store.add_decal(TEX);
        let mut state = store.state().clone();
        let twin = state.decals[0].clone();
        state.decals.push(twin.clone());
        store.add_decal(TEX);
        state.decals.push(store.state().decals[1].clone());
        store.hydrate(state);
        assert_eq!(store.state().decals.len(), 3);

        store.remove_decal(twin.id);
        assert_eq!(store.state().decals.len(), 1);
        let once = store.state().clone();
        store.remove_decal(twin.id);
        assert_eq!(store.state(), &once);
    }

    #[test]
    fn test_unsubscribed_observer_is_silent() {
        let mut store = store();
        let hits = Rc::new(RefCell::new(0));
        let counter = hits.clone();
        let id = store.subscribe(
            Topics::ALL,
            Box::new(move |_, _| *counter.borrow_mut() += 1),
        );

        store.set_color("#101010");
        assert_eq!(*hits.borrow(), 1);

        assert!(store.unsubscribe(id));
        store.set_color("#202020");
        store.add_decal(TEX);
        assert_eq!(*hits.borrow(), 1);
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn test_remove_last_remaining_resets_index() {
        let mut store = store();
        let id = store.add_decal(TEX);
        store.remove_decal(id);
        assert!(store.state().decals.is_empty());
        assert_eq!(store.state().active_decal_index, 0);
    }

    #[test]
    fn test_remove_clamps_active_index() {
        let mut store = store();
        store.add_decal(TEX);
        store.add_decal(TEX);
        let last = store.add_decal(TEX);
        assert_eq!(store.state().active_decal_index, 2);

        store.remove_decal(last);
        assert_eq!(store.state().active_decal_index, 1);
    }

    #[test]
    fn test_remove_before_active_keeps_index() {
        let mut store = store();
        let first = store.add_decal(TEX);
        store.add_decal(TEX);
        let third = store.add_decal(TEX);
        store.set_active_index(1);

        store.remove_decal(first);
        assert_eq!(store.state().active_decal_index, 1);
        assert_eq!(store.active_decal().map(|d| d.id), Some(third));
    }

    #[test]
    fn test_update_axis_touches_single_component() {
        let mut store = store();
        let other = store.add_decal(TEX);
        store.add_decal(TEX);
        let before = store.state().clone();

        store.update_decal_axis_str(DecalProperty::Scale, 1, "0.5");

        let after = store.state();
        assert_eq!(after.decals[1].scale, [0.15, 0.5, 0.15]);
        assert_eq!(after.decals[1].position, before.decals[1].position);
        assert_eq!(after.decals[1].rotation, before.decals[1].rotation);
        assert_eq!(after.decals[0], before.decals[0]);
        assert_eq!(after.decals[0].id, other);
    }

    #[test]
    fn test_update_axis_without_decals_is_noop() {
        let mut store = store();
        store.update_decal_axis(DecalProperty::Position, Axis::X, 0.3);
        assert_eq!(store.revision(), 0);
        assert!(store.state().decals.is_empty());
    }

    #[test]
    fn test_update_axis_rejects_garbage() {
        let mut store = store();
        store.add_decal(TEX);
        let revision = store.revision();
        store.update_decal_axis_str(DecalProperty::Rotation, 0, "abc");
        store.update_decal_axis_str(DecalProperty::Rotation, 7, "1.0");
        store.update_decal_axis_str(DecalProperty::Rotation, 0, "NaN");
        assert_eq!(store.revision(), revision);
        assert_eq!(store.active_decal().unwrap().rotation, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_set_active_index_clamps() {
        let mut store = store();
        store.set_active_index(5);
        assert_eq!(store.state().active_decal_index, 0);

        store.add_decal(TEX);
        store.add_decal(TEX);
        store.set_active_index(42);
        assert_eq!(store.state().active_decal_index, 1);

        store.select_previous();
        store.select_previous();
        assert_eq!(store.state().active_decal_index, 0);
        store.select_next();
        store.select_next();
        assert_eq!(store.state().active_decal_index, 1);
    }

    #[test]
    fn test_set_color_accepts_anything() {
        let mut store = store();
        store.set_color("#123abc");
        assert_eq!(store.state().garment_color.as_str(), "#123abc");
        store.set_color("not a color");
        assert_eq!(store.state().garment_color.as_str(), "not a color");
    }

    #[test]
    fn test_reset_all_restores_defaults() {
        let bridge = PersistenceBridge::new(Box::new(MemoryStorage::default()));
        let mut store = store();
        store.set_color("#000000");
        store.add_decal(TEX);
        store.add_decal(TEX);

        store.reset_all(&bridge);
        assert_eq!(store.state(), &ConfigurationState::default());
    }

    #[test]
    fn test_hydrate_clamps_index() {
        let mut store = store();
        let mut source = ConfigStore::new(Placement::default());
        source.add_decal(TEX);
        let mut state = source.state().clone();
        state.active_decal_index = 9;

        store.hydrate(state);
        assert_eq!(store.state().active_decal_index, 0);
        assert_eq!(store.state().decals.len(), 1);
    }

    #[test]
    fn test_observers_only_see_their_topics() {
        let mut store = store();
        let color_hits = Rc::new(RefCell::new(0));
        let index_hits = Rc::new(RefCell::new(Vec::new()));

        let hits = color_hits.clone();
        store.subscribe(
            Topics::COLOR,
            Box::new(move |_, _| *hits.borrow_mut() += 1),
        );
        let seen = index_hits.clone();
        store.subscribe(
            Topics::ACTIVE_INDEX,
            Box::new(move |_, state| seen.borrow_mut().push(state.active_decal_index)),
        );

        store.set_color("#ff0000");
        store.set_color("#ff0000");
        assert_eq!(*color_hits.borrow(), 1);
        assert!(index_hits.borrow().is_empty());

        store.add_decal(TEX);
        store.add_decal(TEX);
        store.update_decal_axis(DecalProperty::Position, Axis::Z, 0.4);
        store.select_previous();
        assert_eq!(*color_hits.borrow(), 1);
        assert_eq!(*index_hits.borrow(), vec![0, 1, 0]);
    }

    #[test]
    fn test_remove_last_reports_cleared() {
        let mut store = store();
        let cleared = Rc::new(RefCell::new(false));
        let flag = cleared.clone();
        store.subscribe(
            Topics::DECALS,
            Box::new(move |changes, _| {
                if changes.contains(&Change::DecalsCleared) {
                    *flag.borrow_mut() = true;
                }
            }),
        );

        let a = store.add_decal(TEX);
        let b = store.add_decal(TEX);
        store.remove_decal(a);
        assert!(!*cleared.borrow());
        store.remove_decal(b);
        assert!(*cleared.borrow());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = store();
        store.add_decal(TEX);
        let snapshot = store.create_snapshot();
        store.update_decal_axis(DecalProperty::Scale, Axis::X, 0.9);

        assert_eq!(snapshot.decals[0].scale, [0.15, 0.15, 0.15]);
        assert_eq!(snapshot.garment_texture, None);
        assert!(snapshot.revision < store.revision());
    }
}
