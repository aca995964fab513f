//! Small egui helpers shared by the panels.

use crate::models::{Axis, DecalProperty};
use egui::{Color32, RichText, Ui};

/// Section header
pub fn section_header(ui: &mut Ui, title: &str) {
    ui.add_space(8.0);
    ui.label(
        RichText::new(title.to_uppercase())
            .small()
            .strong()
            .color(Color32::DARK_GRAY),
    );
    ui.add_space(4.0);
}

/// Hint text
pub fn hint(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).small().color(Color32::GRAY));
}

/// One slider row for a single axis. Returns the new value when the user
/// moved the slider.
pub fn axis_slider(ui: &mut Ui, property: DecalProperty, axis: Axis, current: f32) -> Option<f32> {
    let range = property.slider_range();
    let mut value = current;
    let response = ui
        .horizontal(|ui| {
            ui.label(RichText::new(axis.label()).small().color(Color32::GRAY));
            ui.add(
                egui::Slider::new(&mut value, range.min..=range.max)
                    .step_by(range.step as f64)
                    .fixed_decimals(2),
            )
        })
        .inner;

    response.changed().then_some(value)
}

/// Solid black call-to-action button.
pub fn primary_button(ui: &mut Ui, text: &str) -> egui::Response {
    ui.add_sized(
        [ui.available_width(), 36.0],
        egui::Button::new(RichText::new(text).strong().color(Color32::WHITE))
            .fill(Color32::BLACK)
            .corner_radius(8.0),
    )
}
