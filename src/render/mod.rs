//! Aggregates the rendering submodules (window, GPU context, egui overlay).

pub mod app;
pub mod context;
pub mod renderer;
pub mod textures;
pub mod ui;
