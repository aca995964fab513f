//! Decal records and the per-axis vocabulary used to edit them.
//!
//! A decal is an image placed on the garment with its own position,
//! rotation and scale. The texture payload is a data URL and never changes
//! once the decal exists; only the three transform vectors are edited.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique decal identifier.
///
/// Serialized as a bare JSON number: epoch milliseconds plus a random
/// fraction, which keeps saved designs readable by older sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecalId(pub f64);

impl DecalId {
    /// Builds a fresh id from the wall clock and a random fraction.
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0);
        Self(millis + rand::random::<f64>())
    }

    /// Bit pattern, usable as a hash key.
    pub fn key(&self) -> u64 {
        self.0.to_bits()
    }
}

impl std::fmt::Display for DecalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One image placed on the garment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decal {
    pub id: DecalId,
    /// Encoded image payload (`data:<mime>;base64,...`).
    pub texture: Arc<str>,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl Decal {
    pub fn new(id: DecalId, texture: Arc<str>, placement: &Placement) -> Self {
        Self {
            id,
            texture,
            position: placement.position,
            rotation: placement.rotation,
            scale: placement.scale,
        }
    }

    pub fn vector(&self, property: DecalProperty) -> &[f32; 3] {
        match property {
            DecalProperty::Position => &self.position,
            DecalProperty::Rotation => &self.rotation,
            DecalProperty::Scale => &self.scale,
        }
    }

    pub fn vector_mut(&mut self, property: DecalProperty) -> &mut [f32; 3] {
        match property {
            DecalProperty::Position => &mut self.position,
            DecalProperty::Rotation => &mut self.rotation,
            DecalProperty::Scale => &mut self.scale,
        }
    }
}

/// Transform applied to a freshly added decal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: [0.0, 0.1, 0.1],
            rotation: [0.0, 0.0, 0.0],
            scale: [0.15, 0.15, 0.15],
        }
    }
}

/// Which transform vector of a decal is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecalProperty {
    Position,
    Rotation,
    Scale,
}

impl DecalProperty {
    pub const ALL: [DecalProperty; 3] = [
        DecalProperty::Position,
        DecalProperty::Rotation,
        DecalProperty::Scale,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DecalProperty::Position => "Position",
            DecalProperty::Rotation => "Rotation",
            DecalProperty::Scale => "Scale",
        }
    }

    /// Slider bounds shown for this property.
    pub fn slider_range(&self) -> SliderRange {
        match self {
            DecalProperty::Position => SliderRange::new(-1.0, 1.0),
            DecalProperty::Rotation => SliderRange::new(-PI, PI),
            DecalProperty::Scale => SliderRange::new(0.05, 1.0),
        }
    }

    /// Value displayed when there is no active decal.
    pub fn fallback(&self) -> f32 {
        match self {
            DecalProperty::Scale => 0.15,
            _ => 0.0,
        }
    }
}

impl std::fmt::Display for DecalProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Component of a 3-vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderRange {
    const fn new(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            step: 0.01,
        }
    }
}
