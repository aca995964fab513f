//! Decal controls: navigation between decals and per-axis transform sliders.

use crate::input::events::ConfigAction;
use crate::models::{Axis, DecalProperty};
use crate::shared::snapshot::ConfigSnapshot;
use crate::views::LayoutMode;
use crate::views::widgets::{axis_slider, section_header};
use egui::{Color32, RichText, Ui};

const PANEL_WIDTH: f32 = 320.0;

/// Draws the controls panel, or the button that reopens it. Nothing is drawn
/// while the design has no decals.
pub fn render_decal_controls(
    ctx: &egui::Context,
    layout: LayoutMode,
    snapshot: &ConfigSnapshot,
    visible: bool,
) -> Vec<ConfigAction> {
    let mut actions = Vec::new();
    if snapshot.decals.is_empty() {
        return actions;
    }

    if !visible {
        render_show_button(ctx, layout, &mut actions);
        return actions;
    }

    match layout {
        LayoutMode::Wide => {
            egui::Window::new("Decal Controls")
                .title_bar(false)
                .resizable(false)
                .collapsible(false)
                .default_width(PANEL_WIDTH)
                .anchor(egui::Align2::RIGHT_TOP, [-16.0, 64.0])
                .show(ctx, |ui| {
                    controls_body(ui, snapshot, &mut actions);
                });
        }
        LayoutMode::Compact => {
            egui::TopBottomPanel::bottom("decal_controls")
                .resizable(false)
                .max_height(360.0)
                .frame(
                    egui::Frame::default()
                        .fill(Color32::WHITE)
                        .inner_margin(egui::Margin::same(16)),
                )
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        controls_body(ui, snapshot, &mut actions);
                    });
                });
        }
    }

    actions
}

fn render_show_button(ctx: &egui::Context, layout: LayoutMode, actions: &mut Vec<ConfigAction>) {
    let (anchor, offset, label) = match layout {
        LayoutMode::Wide => (egui::Align2::RIGHT_TOP, [-16.0, 64.0], "Show Controls"),
        LayoutMode::Compact => (egui::Align2::CENTER_BOTTOM, [0.0, -16.0], "▲"),
    };

    egui::Area::new(egui::Id::new("show_controls"))
        .anchor(anchor, offset)
        .show(ctx, |ui| {
            if ui.button(RichText::new(label).strong()).clicked() {
                actions.push(ConfigAction::ShowControls);
            }
        });
}

fn controls_body(ui: &mut Ui, snapshot: &ConfigSnapshot, actions: &mut Vec<ConfigAction>) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Decal Controls").strong().size(16.0));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("×").clicked() {
                actions.push(ConfigAction::HideControls);
            }
        });
    });
    ui.separator();

    navigation_row(ui, snapshot, actions);

    for property in DecalProperty::ALL {
        section_header(ui, property.label());
        let current = snapshot
            .active_decal()
            .map(|d| *d.vector(property))
            .unwrap_or([property.fallback(); 3]);

        for axis in Axis::ALL {
            if let Some(value) = axis_slider(ui, property, axis, current[axis.index()]) {
                actions.push(ConfigAction::UpdateDecalAxis {
                    property,
                    axis,
                    value,
                });
            }
        }
    }
}

fn navigation_row(ui: &mut Ui, snapshot: &ConfigSnapshot, actions: &mut Vec<ConfigAction>) {
    let total = snapshot.decals.len();

    ui.horizontal(|ui| {
        if ui
            .add_enabled(!snapshot.is_first_active(), egui::Button::new("◀"))
            .clicked()
        {
            actions.push(ConfigAction::SelectPrevious);
        }

        ui.label(format!("{} / {}", snapshot.active_decal_index + 1, total));

        if ui
            .add_enabled(!snapshot.is_last_active(), egui::Button::new("▶"))
            .clicked()
        {
            actions.push(ConfigAction::SelectNext);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(active) = snapshot.active_decal()
                && ui
                    .button(RichText::new("🗑").color(Color32::from_rgb(220, 38, 38)))
                    .on_hover_text("Delete this decal")
                    .clicked()
            {
                actions.push(ConfigAction::RemoveDecal(active.id));
            }
        });
    });
}
