//! Plain data types shared by the store, persistence and views.

pub mod color;
pub mod decal;
pub mod settings;

pub use color::GarmentColor;
pub use decal::{Axis, Decal, DecalId, DecalProperty, Placement};
pub use settings::ConfiguratorConfig;
