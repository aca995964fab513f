//! Logic-thread session: the store, its persistence and panel flags.

use crate::decode::{DecodeOutcome, DecodeRequest};
use crate::input::events::ConfigAction;
use crate::models::ConfiguratorConfig;
use crate::persistence::{KeyValueStorage, PersistenceBridge};
use crate::shared::snapshot::RenderState;
use crate::state::observer::{Change, Topics};
use crate::state::store::ConfigStore;
use crate::state::traits::Snapshot;
use crossbeam_channel::Sender;
use std::cell::Cell;
use std::rc::Rc;

/// Owns the configuration store for the lifetime of the window.
pub struct Session {
    store: ConfigStore,
    bridge: PersistenceBridge,
    /// Decal controls panel visibility. Presentation state, but driven by
    /// store changes: adding opens it, clearing the list closes it.
    controls_visible: Rc<Cell<bool>>,
    decode_tx: Sender<DecodeRequest>,
    pending_decodes: usize,
    last_published: Option<RenderState>,
}

impl Session {
    /// Builds the store, attaches persistence and hydrates from storage.
    pub fn new(
        config: &ConfiguratorConfig,
        storage: Box<dyn KeyValueStorage>,
        decode_tx: Sender<DecodeRequest>,
    ) -> Self {
        log::info!("LOGIC: Initializing session");
        let mut store = ConfigStore::new(config.placement);
        let bridge = PersistenceBridge::new(storage);
        let controls_visible = Rc::new(Cell::new(false));

        let visible = Rc::clone(&controls_visible);
        store.subscribe(
            Topics::DECALS,
            Box::new(move |changes, state| {
                for change in changes.iter() {
                    match change {
                        Change::DecalAdded(_) => visible.set(true),
                        Change::DecalsCleared | Change::Reset => visible.set(false),
                        Change::Hydrated => visible.set(!state.decals.is_empty()),
                        _ => {}
                    }
                }
            }),
        );

        bridge.hydrate(&mut store);
        bridge.attach(&mut store);

        Self {
            store,
            bridge,
            controls_visible,
            decode_tx,
            pending_decodes: 0,
            last_published: None,
        }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible.get()
    }

    pub fn pending_decodes(&self) -> usize {
        self.pending_decodes
    }

    pub fn handle_action(&mut self, action: ConfigAction) {
        log::debug!("LOGIC: {:?}", action);
        match action {
            ConfigAction::SetColor(value) => self.store.set_color(value),
            ConfigAction::AddDecalFromFile(path) => {
                log::info!("LOGIC: Decoding {:?}", path);
                match self.decode_tx.send(DecodeRequest { path }) {
                    Ok(()) => self.pending_decodes += 1,
                    Err(e) => log::error!("LOGIC: Decode thread unavailable: {}", e),
                }
            }
            ConfigAction::RemoveDecal(id) => self.store.remove_decal(id),
            ConfigAction::RemoveActiveDecal => self.store.remove_active_decal(),
            ConfigAction::UpdateDecalAxis {
                property,
                axis,
                value,
            } => self.store.update_decal_axis(property, axis, value),
            ConfigAction::SetActiveIndex(index) => self.store.set_active_index(index),
            ConfigAction::SelectPrevious => self.store.select_previous(),
            ConfigAction::SelectNext => self.store.select_next(),
            ConfigAction::ShowControls => {
                if !self.store.state().decals.is_empty() {
                    self.controls_visible.set(true);
                }
            }
            ConfigAction::HideControls => self.controls_visible.set(false),
            ConfigAction::ResetAll => {
                log::info!("LOGIC: Resetting design");
                self.store.reset_all(&self.bridge);
            }
        }
    }

    /// Commits a finished decode. Failures leave the design untouched.
    pub fn handle_decode(&mut self, outcome: DecodeOutcome) {
        self.pending_decodes = self.pending_decodes.saturating_sub(1);
        match outcome {
            DecodeOutcome::Decoded { path, data_url } => {
                let id = self.store.add_decal(data_url);
                log::info!("LOGIC: Added decal {} from {:?}", id, path);
            }
            DecodeOutcome::Failed { path, error } => {
                log::warn!("LOGIC: Dropping upload {:?}: {}", path, error);
            }
        }
    }

    /// Returns a snapshot when something visible changed since the last call.
    pub fn take_render_state(&mut self) -> Option<RenderState> {
        let state = self.create_snapshot();
        if self.last_published.as_ref() == Some(&state) {
            return None;
        }
        self.last_published = Some(state.clone());
        Some(state)
    }

    pub fn shutdown(&mut self) {
        log::info!(
            "LOGIC: Shutting down with {} decal(s), {} decode(s) in flight",
            self.store.state().decals.len(),
            self.pending_decodes
        );
    }
}

impl Snapshot for Session {
    type Output = RenderState;

    fn create_snapshot(&self) -> RenderState {
        RenderState {
            config: self.store.create_snapshot(),
            controls_visible: self.controls_visible.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodeError;
    use crate::models::{Axis, DecalProperty};
    use crate::persistence::{COLOR_KEY, DECALS_KEY, MemoryStorage};
    use crossbeam_channel::{Receiver, unbounded};
    use std::path::PathBuf;

    const TEX: &str = "data:image/png;base64,AAAA";

    fn session_with(storage: MemoryStorage) -> (Session, Receiver<DecodeRequest>) {
        let (tx, rx) = unbounded();
        let session = Session::new(&ConfiguratorConfig::default(), Box::new(storage), tx);
        (session, rx)
    }

    fn decoded(session: &mut Session) {
        session.handle_decode(DecodeOutcome::Decoded {
            path: PathBuf::from("a.png"),
            data_url: TEX.to_string(),
        });
    }

    #[test]
    fn test_file_pick_requests_decode() {
        let (mut session, rx) = session_with(MemoryStorage::default());
        session.handle_action(ConfigAction::AddDecalFromFile(PathBuf::from("logo.png")));
        assert_eq!(rx.try_recv().unwrap().path, PathBuf::from("logo.png"));
        assert_eq!(session.pending_decodes(), 1);
        assert!(session.store().state().decals.is_empty());
    }

    #[test]
    fn test_decode_success_adds_and_opens_controls() {
        let (mut session, _rx) = session_with(MemoryStorage::default());
        assert!(!session.controls_visible());
        decoded(&mut session);
        assert_eq!(session.store().state().decals.len(), 1);
        assert!(session.controls_visible());
    }

    #[test]
    fn test_decode_failure_changes_nothing() {
        let (mut session, _rx) = session_with(MemoryStorage::default());
        let before = session.store().revision();
        session.handle_decode(DecodeOutcome::Failed {
            path: PathBuf::from("broken.png"),
            error: DecodeError::MalformedDataUrl,
        });
        assert_eq!(session.store().revision(), before);
        assert!(!session.controls_visible());
    }

    #[test]
    fn test_removing_last_decal_hides_controls() {
        let (mut session, _rx) = session_with(MemoryStorage::default());
        decoded(&mut session);
        decoded(&mut session);
        session.handle_action(ConfigAction::RemoveActiveDecal);
        assert!(session.controls_visible());
        session.handle_action(ConfigAction::RemoveActiveDecal);
        assert!(!session.controls_visible());
        assert_eq!(session.store().state().active_decal_index, 0);
    }

    #[test]
    fn test_show_controls_needs_decals() {
        let (mut session, _rx) = session_with(MemoryStorage::default());
        session.handle_action(ConfigAction::ShowControls);
        assert!(!session.controls_visible());

        decoded(&mut session);
        session.handle_action(ConfigAction::HideControls);
        assert!(!session.controls_visible());
        session.handle_action(ConfigAction::ShowControls);
        assert!(session.controls_visible());
    }

    #[test]
    fn test_hydrated_decals_start_with_controls_open() {
        let mut storage = MemoryStorage::default();
        storage.set(COLOR_KEY, "#222222").unwrap();
        storage
            .set(
                DECALS_KEY,
                r#"[{"id":1.5,"texture":"data:image/png;base64,AAAA","position":[0,0,0],"rotation":[0,0,0],"scale":[0.2,0.2,0.2]}]"#,
            )
            .unwrap();

        let (session, _rx) = session_with(storage);
        assert!(session.controls_visible());
        assert_eq!(session.store().state().garment_color.as_str(), "#222222");
        assert_eq!(session.store().state().decals[0].scale, [0.2, 0.2, 0.2]);
    }

    #[test]
    fn test_render_state_published_only_on_change() {
        let (mut session, _rx) = session_with(MemoryStorage::default());
        assert!(session.take_render_state().is_some());
        assert!(session.take_render_state().is_none());

        session.handle_action(ConfigAction::UpdateDecalAxis {
            property: DecalProperty::Scale,
            axis: Axis::Y,
            value: 0.5,
        });
        assert!(session.take_render_state().is_none());

        decoded(&mut session);
        session.handle_action(ConfigAction::UpdateDecalAxis {
            property: DecalProperty::Scale,
            axis: Axis::Y,
            value: 0.5,
        });
        let state = session.take_render_state().unwrap();
        assert_eq!(state.config.decals[0].scale, [0.15, 0.5, 0.15]);
        assert!(state.controls_visible);
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let (mut session, _rx) = session_with(MemoryStorage::default());
        session.handle_action(ConfigAction::SetColor("#abcdef".into()));
        decoded(&mut session);
        session.handle_action(ConfigAction::ResetAll);

        let state = session.create_snapshot();
        assert_eq!(state.config.garment_color.as_str(), "#ffffff");
        assert!(state.config.decals.is_empty());
        assert!(!state.controls_visible);
    }
}
