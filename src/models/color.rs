//! Garment color value.

use serde::{Deserialize, Serialize};

pub const DEFAULT_GARMENT_COLOR: &str = "#ffffff";

/// Color string as entered by the picker (`#rrggbb`).
///
/// Any string is accepted; parsing only happens when the preview needs
/// actual channel values, and unparseable input renders as white.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GarmentColor(String);

impl GarmentColor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Formats picker output as a lowercase hex string.
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        Self(format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]))
    }

    /// Parses `#rgb` or `#rrggbb`.
    pub fn to_rgb(&self) -> Option<[u8; 3]> {
        let hex = self.0.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let mut out = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    out[i] = v * 17;
                }
                Some(out)
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some([r, g, b])
            }
            _ => None,
        }
    }

    pub fn to_rgb_or_white(&self) -> [u8; 3] {
        self.to_rgb().unwrap_or([255, 255, 255])
    }
}

impl Default for GarmentColor {
    fn default() -> Self {
        Self(DEFAULT_GARMENT_COLOR.to_string())
    }
}

impl std::fmt::Display for GarmentColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
