//! Font and color metadata.

use serde::{Deserialize, Serialize};

/// Font metadata from the per-document font table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    /// Font identifier referenced by characters
    pub id: u32,
    /// Base font name (e.g., "Times-Bold")
    #[serde(default)]
    pub name: String,
    /// Font family, if known
    #[serde(default)]
    pub family: Option<String>,
    /// Whether the font is bold
    #[serde(default)]
    pub bold: bool,
    /// Whether the font is italic
    #[serde(default)]
    pub italic: bool,
    /// Whether the font is a Type 3 font
    #[serde(default)]
    pub type3: bool,
}

impl Font {
    /// Create a font, deriving bold/italic flags from the font name.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        let name = name.into();
        let lower = name.to_lowercase();
        let bold = lower.contains("bold") || lower.contains("black") || lower.contains("heavy");
        let italic = lower.contains("italic") || lower.contains("oblique");
        Self {
            id,
            name,
            family: None,
            bold,
            italic,
            type3: false,
        }
    }
}

/// A color from the per-document color table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Color identifier referenced by characters and shapes
    pub id: u32,
    /// RGB components
    pub rgb: [u8; 3],
}

impl Color {
    /// Create a new color.
    pub fn new(id: u32, rgb: [u8; 3]) -> Self {
        Self { id, rgb }
    }

    /// Hex representation (e.g., "#FF0000").
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.rgb[0], self.rgb[1], self.rgb[2])
    }
}

/// A font face: a font combined with a size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontFace {
    /// Font identifier
    pub font_id: u32,
    /// Font size in points
    pub size: f32,
}

impl FontFace {
    /// Create a new font face.
    pub fn new(font_id: u32, size: f32) -> Self {
        Self { font_id, size }
    }

    /// Discrete key of the face with the size rounded to `precision` digits.
    pub fn key(&self, precision: u32) -> FaceKey {
        FaceKey {
            font_id: self.font_id,
            size: crate::stats::round_key(self.size, precision),
        }
    }

    /// Whether two faces are equal after rounding the sizes.
    pub fn same_as(&self, other: &FontFace, precision: u32) -> bool {
        self.key(precision) == other.key(precision)
    }
}

/// Hashable, ordered form of a [`FontFace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceKey {
    /// Font identifier
    pub font_id: u32,
    /// Font size scaled by 10^precision
    pub size: i64,
}
