//! Main panel: garment color, decal upload and reset.

use crate::decode::IMAGE_EXTENSIONS;
use crate::input::events::ConfigAction;
use crate::models::GarmentColor;
use crate::shared::snapshot::ConfigSnapshot;
use crate::views::widgets::{hint, primary_button, section_header};
use crate::views::{LayoutMode, PanelUiState};
use egui::{Color32, RichText, Ui};

const PANEL_WIDTH: f32 = 288.0;

pub fn render_design_panel(
    ctx: &egui::Context,
    layout: LayoutMode,
    panel: &mut PanelUiState,
    snapshot: &ConfigSnapshot,
) -> Vec<ConfigAction> {
    let mut actions = Vec::new();

    match layout {
        LayoutMode::Wide => {
            egui::Window::new("Design")
                .title_bar(false)
                .resizable(false)
                .collapsible(false)
                .default_width(PANEL_WIDTH)
                .anchor(egui::Align2::LEFT_TOP, [16.0, 64.0])
                .show(ctx, |ui| {
                    panel_body(ui, snapshot, &mut actions);
                });
        }
        LayoutMode::Compact => {
            egui::Area::new(egui::Id::new("menu_toggle"))
                .anchor(egui::Align2::RIGHT_TOP, [-12.0, 12.0])
                .show(ctx, |ui| {
                    let icon = if panel.menu_open { "✕" } else { "☰" };
                    if ui.button(RichText::new(icon).size(18.0)).clicked() {
                        panel.menu_open = !panel.menu_open;
                    }
                });

            if panel.menu_open {
                egui::TopBottomPanel::top("design_menu")
                    .frame(
                        egui::Frame::default()
                            .fill(Color32::WHITE)
                            .inner_margin(egui::Margin::same(16)),
                    )
                    .show(ctx, |ui| {
                        panel_body(ui, snapshot, &mut actions);
                    });

                // Leaving the menu open after a reset or a file pick hides
                // the garment on small screens.
                if actions
                    .iter()
                    .any(|a| matches!(a, ConfigAction::ResetAll | ConfigAction::AddDecalFromFile(_)))
                {
                    panel.menu_open = false;
                }
            }
        }
    }

    actions
}

fn panel_body(ui: &mut Ui, snapshot: &ConfigSnapshot, actions: &mut Vec<ConfigAction>) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Customize").strong().size(18.0));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Reset All").clicked() {
                actions.push(ConfigAction::ResetAll);
            }
        });
    });

    section_header(ui, "Garment Color");
    let mut rgb = snapshot.garment_color.to_rgb_or_white();
    ui.horizontal(|ui| {
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            actions.push(ConfigAction::SetColor(
                GarmentColor::from_rgb(rgb).to_string(),
            ));
        }
        ui.label(RichText::new(snapshot.garment_color.as_str()).monospace());
    });

    section_header(ui, "Decals");
    if primary_button(ui, "Add Decal").clicked()
        && let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
    {
        actions.push(ConfigAction::AddDecalFromFile(path));
    }
    hint(ui, "PNG, JPG, GIF, WEBP or BMP");

    let count = snapshot.decals.len();
    if count > 0 {
        ui.add_space(6.0);
        let noun = if count == 1 { "decal" } else { "decals" };
        ui.label(
            RichText::new(format!("✓ {count} {noun} saved"))
                .small()
                .color(Color32::from_rgb(22, 163, 74)),
        );
    }
}
