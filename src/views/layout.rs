//! Responsive layout selection.

/// Wide windows get side panels; narrow ones a collapsible menu and a
/// bottom-docked controls sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Wide,
    Compact,
}

impl LayoutMode {
    pub fn from_width(logical_width: f32, breakpoint: f32) -> Self {
        if logical_width < breakpoint {
            LayoutMode::Compact
        } else {
            LayoutMode::Wide
        }
    }

    /// Garment size relative to the preview area.
    pub fn model_scale(self) -> f32 {
        match self {
            LayoutMode::Wide => 2.0,
            LayoutMode::Compact => 1.8,
        }
    }
}
