//! GPU textures for decal payloads, keyed by decal id.

use crate::decode::rgba_from_data_url;
use crate::models::{Decal, DecalId};
use std::collections::HashMap;

/// Decal id → uploaded texture. `None` marks a payload that failed to decode,
/// so it is not retried every frame.
#[derive(Default)]
pub struct DecalTextures {
    handles: HashMap<u64, Option<egui::TextureHandle>>,
}

impl DecalTextures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads textures for new decals and frees those of removed ones.
    pub fn sync(&mut self, ctx: &egui::Context, decals: &[Decal]) {
        self.handles
            .retain(|key, _| decals.iter().any(|d| d.id.key() == *key));

        for decal in decals {
            self.handles
                .entry(decal.id.key())
                .or_insert_with(|| load_texture(ctx, decal));
        }
    }

    pub fn get(&self, id: DecalId) -> Option<&egui::TextureHandle> {
        self.handles.get(&id.key()).and_then(|h| h.as_ref())
    }
}

fn load_texture(ctx: &egui::Context, decal: &Decal) -> Option<egui::TextureHandle> {
    let rgba = match rgba_from_data_url(&decal.texture) {
        Ok(rgba) => rgba,
        Err(e) => {
            log::warn!("RENDER: Decal {} has an unusable texture: {}", decal.id, e);
            return None;
        }
    };

    let size = [rgba.width() as usize, rgba.height() as usize];
    let image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    Some(ctx.load_texture(
        format!("decal-{}", decal.id),
        image,
        egui::TextureOptions::LINEAR,
    ))
}
