pub const APP_TITLE: &str = "3D Tshirt Configurator";

pub fn render_navbar(ctx: &egui::Context) {
    egui::TopBottomPanel::top("navbar")
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_white_alpha(242))
                .inner_margin(egui::Margin::symmetric(24, 12)),
        )
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(APP_TITLE)
                        .strong()
                        .size(20.0)
                        .color(egui::Color32::BLACK),
                );
            });
        });
}
