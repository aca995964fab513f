//! High-level rendering pipeline orchestrating egui + wgpu output.

use crate::input::events::ConfigAction;
use crate::models::ConfiguratorConfig;
use crate::render::context::{RenderContext, RenderInitError};
use crate::render::textures::DecalTextures;
use crate::render::ui::UiOverlay;
use crate::shared::snapshot::RenderState;
use crate::views::decal_controls::render_decal_controls;
use crate::views::design_panel::render_design_panel;
use crate::views::navbar::render_navbar;
use crate::views::preview::{FlatGarmentPreview, GarmentPreview, PreviewFrame};
use crate::views::{LayoutMode, PanelUiState};
use std::sync::Arc;
use winit::event::WindowEvent;
use winit::window::Window;

const CLEAR_COLOR: wgpu::Color = wgpu::Color::WHITE;

pub struct Renderer {
    pub ctx: RenderContext,
    ui: UiOverlay,
    current_state: RenderState,
    textures: DecalTextures,
    preview: Box<dyn GarmentPreview>,
    panel: PanelUiState,
    inactive_opacity: f32,
    compact_breakpoint: f32,
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        config: &ConfiguratorConfig,
    ) -> Result<Self, RenderInitError> {
        let ctx = RenderContext::new(window.clone()).await?;
        let ui = UiOverlay::new(window, &ctx.device, ctx.config.format);

        Ok(Self {
            ctx,
            ui,
            current_state: RenderState::default(),
            textures: DecalTextures::new(),
            preview: Box::new(FlatGarmentPreview::new()),
            panel: PanelUiState::default(),
            inactive_opacity: config.inactive_decal_opacity,
            compact_breakpoint: config.compact_breakpoint,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.ui.handle_input(window, event)
    }

    pub fn update_state(&mut self, new_state: RenderState) {
        if !Arc::ptr_eq(&new_state.config.decals, &self.current_state.config.decals) {
            self.textures.sync(&self.ui.ctx, &new_state.config.decals);
        }
        self.current_state = new_state;
    }

    pub fn render(&mut self, window: &Window) -> Result<Vec<ConfigAction>, wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut actions = Vec::new();

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        // 1. Background
        {
            let _clear = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }

        // 2. UI Layer
        self.ui.begin_frame(window);
        let ctx_egui = self.ui.ctx.clone();
        let layout = LayoutMode::from_width(self.ctx.logical_width(), self.compact_breakpoint);
        let state = &self.current_state;

        render_navbar(&ctx_egui);
        actions.extend(render_design_panel(
            &ctx_egui,
            layout,
            &mut self.panel,
            &state.config,
        ));
        actions.extend(render_decal_controls(
            &ctx_egui,
            layout,
            &state.config,
            state.controls_visible,
        ));

        let garment_color = state.config.garment_color.to_rgb_or_white();
        let frame = PreviewFrame {
            garment_color,
            garment_texture: state.config.garment_texture.as_deref(),
            decals: &state.config.decals,
            active_index: state.config.active_decal_index,
            inactive_opacity: self.inactive_opacity,
            model_scale: layout.model_scale(),
        };
        let preview = &mut self.preview;
        let textures = &self.textures;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(&ctx_egui, |ui| {
                preview.paint(ui, &frame, textures);
            });

        self.ui.end_frame_and_draw(&self.ctx, &mut encoder, &view);
        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(actions)
    }
}
