//! Garment preview boundary.
//!
//! The preview receives a read-only frame description and paints it; it has
//! no way to call back into the store. `FlatGarmentPreview` is the shipped
//! implementation: a front view of the shirt with decals laid over it.

use crate::models::Decal;
use crate::render::textures::DecalTextures;
use egui::{Color32, Pos2, Rect, Shape, Stroke, Vec2, vec2};

/// Everything a preview needs to paint one frame.
pub struct PreviewFrame<'a> {
    pub garment_color: [u8; 3],
    /// Fabric texture payload, unused by the flat preview.
    pub garment_texture: Option<&'a str>,
    pub decals: &'a [Decal],
    pub active_index: usize,
    pub inactive_opacity: f32,
    /// Garment size multiplier chosen by the layout.
    pub model_scale: f32,
}

impl PreviewFrame<'_> {
    /// The active decal is drawn fully opaque, the others faded.
    pub fn decal_opacity(&self, index: usize) -> f32 {
        if index == self.active_index {
            1.0
        } else {
            self.inactive_opacity
        }
    }
}

pub trait GarmentPreview {
    fn paint(&mut self, ui: &mut egui::Ui, frame: &PreviewFrame<'_>, textures: &DecalTextures);
}

/// Screen placement of one decal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecalQuad {
    pub rect: Rect,
    /// Clockwise rotation in radians.
    pub angle: f32,
}

/// Width of the garment in mesh units.
const MESH_SPAN: f32 = 0.6;

/// Side of the square the garment is drawn in.
fn garment_extent(area: Rect, model_scale: f32) -> f32 {
    area.width().min(area.height()) * 0.4 * model_scale
}

/// Projects a decal onto the front view of the garment.
///
/// Positions are in mesh units with +Y up. Tilt around X and Y foreshortens
/// the quad; decals pushed behind the garment (negative Z) are not visible
/// from the front and yield `None`.
pub fn decal_quad(area: Rect, model_scale: f32, decal: &Decal) -> Option<DecalQuad> {
    let [x, y, z] = decal.position;
    if z < 0.0 {
        return None;
    }

    let pixels_per_unit = garment_extent(area, model_scale) / MESH_SPAN;
    let center = area.center() + vec2(x, -y) * pixels_per_unit;

    let [rx, ry, rz] = decal.rotation;
    let size = vec2(
        decal.scale[0] * pixels_per_unit * ry.cos().abs(),
        decal.scale[1] * pixels_per_unit * rx.cos().abs(),
    );

    Some(DecalQuad {
        rect: Rect::from_center_size(center, size),
        angle: -rz,
    })
}

#[derive(Default)]
pub struct FlatGarmentPreview;

impl FlatGarmentPreview {
    pub fn new() -> Self {
        Self
    }

    fn paint_garment(&self, painter: &egui::Painter, area: Rect, frame: &PreviewFrame<'_>) {
        let extent = garment_extent(area, frame.model_scale);
        let center = area.center();
        let at = |x: f32, y: f32| -> Pos2 { center + vec2(x, y) * extent };

        let [r, g, b] = frame.garment_color;
        let fill = Color32::from_rgb(r, g, b);
        let outline = Stroke::new(
            1.5,
            Color32::from_rgb(
                (r as f32 * 0.75) as u8,
                (g as f32 * 0.75) as u8,
                (b as f32 * 0.75) as u8,
            ),
        );

        // Convex pieces: torso and both sleeves.
        let torso = vec![
            at(-0.25, -0.44),
            at(0.25, -0.44),
            at(0.28, -0.18),
            at(0.28, 0.5),
            at(-0.28, 0.5),
            at(-0.28, -0.18),
        ];
        let right_sleeve = vec![
            at(0.25, -0.44),
            at(0.5, -0.26),
            at(0.4, -0.1),
            at(0.28, -0.18),
        ];
        let left_sleeve = vec![
            at(-0.25, -0.44),
            at(-0.28, -0.18),
            at(-0.4, -0.1),
            at(-0.5, -0.26),
        ];

        for piece in [left_sleeve, right_sleeve, torso] {
            painter.add(Shape::convex_polygon(piece, fill, outline));
        }

        // Neck opening.
        painter.circle(at(0.0, -0.44), 0.09 * extent, Color32::WHITE, outline);
    }

    fn paint_decals(
        &self,
        ui: &egui::Ui,
        area: Rect,
        frame: &PreviewFrame<'_>,
        textures: &DecalTextures,
    ) {
        // List order is draw order: later decals cover earlier ones.
        for (index, decal) in frame.decals.iter().enumerate() {
            let Some(quad) = decal_quad(area, frame.model_scale, decal) else {
                continue;
            };
            let opacity = frame.decal_opacity(index);

            match textures.get(decal.id) {
                Some(texture) => {
                    egui::Image::new((texture.id(), quad.rect.size()))
                        .rotate(quad.angle, Vec2::splat(0.5))
                        .tint(Color32::WHITE.gamma_multiply(opacity))
                        .paint_at(ui, quad.rect);
                }
                None => {
                    ui.painter().rect_stroke(
                        quad.rect,
                        2.0,
                        Stroke::new(1.0, Color32::GRAY.gamma_multiply(opacity)),
                        egui::StrokeKind::Inside,
                    );
                }
            }
        }
    }
}

impl GarmentPreview for FlatGarmentPreview {
    fn paint(&mut self, ui: &mut egui::Ui, frame: &PreviewFrame<'_>, textures: &DecalTextures) {
        let area = ui.max_rect();
        let painter = ui.painter_at(area);
        self.paint_garment(&painter, area, frame);
        self.paint_decals(ui, area, frame, textures);
    }
}
