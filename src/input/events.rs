use crate::models::{Axis, DecalId, DecalProperty};
use std::path::PathBuf;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Debug, Clone, Copy)]
pub struct RawInputEvent {
    pub keycode: KeyCode,
    pub state: ElementState,
}

impl RawInputEvent {
    pub fn from_winit(event: &WindowEvent) -> Option<Self> {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(keycode),
                    state,
                    repeat: false,
                    ..
                },
            ..
        } = event
        {
            Some(Self {
                keycode: *keycode,
                state: *state,
            })
        } else {
            None
        }
    }
}

/// A user request against the configuration, routed to the logic thread.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    // Garment
    SetColor(String),

    // Decal list
    /// A file was picked; decode it and add the result.
    AddDecalFromFile(PathBuf),
    RemoveDecal(DecalId),
    RemoveActiveDecal,
    UpdateDecalAxis {
        property: DecalProperty,
        axis: Axis,
        value: f32,
    },

    // Navigation
    SetActiveIndex(usize),
    SelectPrevious,
    SelectNext,

    // Panels
    ShowControls,
    HideControls,

    ResetAll,
}
