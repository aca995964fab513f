//! egui views for the configurator window.

pub mod decal_controls;
pub mod design_panel;
pub mod layout;
pub mod navbar;
pub mod preview;
pub mod widgets;

pub use layout::LayoutMode;

/// Presentation state that lives only on the render thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanelUiState {
    /// Compact layout only: whether the design panel is unfolded.
    pub menu_open: bool,
}
