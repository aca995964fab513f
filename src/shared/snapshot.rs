//! Render snapshots for inter-thread communication.
//!
//! Snapshots are immutable captures of the design sent from the logic thread
//! to the render thread. The renderer never writes back into them.

use crate::models::{Decal, GarmentColor};
use std::sync::Arc;

/// Point-in-time view of the configuration store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigSnapshot {
    pub garment_color: GarmentColor,
    /// Garment texture payload. Nothing sets it yet; the preview accepts it
    /// so a printed fabric can be added without touching the boundary.
    pub garment_texture: Option<Arc<str>>,
    pub decals: Arc<[Decal]>,
    pub active_decal_index: usize,
    /// Store revision this snapshot was taken at.
    pub revision: u64,
}

impl ConfigSnapshot {
    pub fn active_decal(&self) -> Option<&Decal> {
        self.decals.get(self.active_decal_index)
    }

    pub fn is_first_active(&self) -> bool {
        self.active_decal_index == 0
    }

    pub fn is_last_active(&self) -> bool {
        self.active_decal_index + 1 >= self.decals.len()
    }
}

/// Everything the render thread needs for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderState {
    pub config: ConfigSnapshot,
    /// Whether the decal controls panel is open.
    pub controls_visible: bool,
}
