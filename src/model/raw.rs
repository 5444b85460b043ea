//! Input model: primitives as produced by an external decoder.
//!
//! A primitive dump is a JSON document such as
//!
//! ```json
//! {
//!   "fonts": [{ "id": 1, "name": "Times-Roman" }],
//!   "colors": [{ "id": 0, "rgb": [0, 0, 0] }],
//!   "pages": [{
//!     "number": 1, "width": 612.0, "height": 792.0,
//!     "characters": [{
//!       "text": "A", "font_id": 1, "font_size": 10.0,
//!       "rect": { "min_x": 72.0, "min_y": 700.0, "max_x": 79.0, "max_y": 707.0 }
//!     }]
//!   }]
//! }
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Character, Color, Figure, Font, Shape};
use crate::error::Result;

/// A whole document of undecorated primitives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Font table
    #[serde(default)]
    pub fonts: Vec<Font>,
    /// Color table
    #[serde(default)]
    pub colors: Vec<Color>,
    /// Pages
    #[serde(default)]
    pub pages: Vec<RawPage>,
}

impl RawDocument {
    /// Parse a primitive dump from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a primitive dump from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// The document with every color id resolved to the first table entry
    /// of the same RGB value, so that color statistics count values rather
    /// than ids.
    pub fn with_merged_colors(&self) -> Cow<'_, RawDocument> {
        let mut first_id: HashMap<[u8; 3], u32> = HashMap::new();
        let remap: HashMap<u32, u32> = self
            .colors
            .iter()
            .filter_map(|color| {
                let first = *first_id.entry(color.rgb).or_insert(color.id);
                (first != color.id).then_some((color.id, first))
            })
            .collect();
        if remap.is_empty() {
            return Cow::Borrowed(self);
        }

        log::debug!("Merging {} duplicate colors", remap.len());
        let resolve = |id: &mut u32| {
            if let Some(first) = remap.get(id) {
                *id = *first;
            }
        };
        let mut merged = self.clone();
        merged.colors.retain(|color| !remap.contains_key(&color.id));
        for page in &mut merged.pages {
            page.characters.iter_mut().for_each(|c| resolve(&mut c.color_id));
            page.shapes.iter_mut().for_each(|s| resolve(&mut s.color_id));
        }
        Cow::Owned(merged)
    }
}

/// Primitives of one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page width in points
    #[serde(default)]
    pub width: f32,
    /// Page height in points
    #[serde(default)]
    pub height: f32,
    /// Characters in extraction order
    #[serde(default)]
    pub characters: Vec<Character>,
    /// Vector shapes
    #[serde(default)]
    pub shapes: Vec<Shape>,
    /// Figures
    #[serde(default)]
    pub figures: Vec<Figure>,
}

impl RawPage {
    /// Create an empty page.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            ..Default::default()
        }
    }

    /// Characters to segment: whitespace-only glyphs are skipped, and when
    /// the input carries no order numbers the input position is used.
    pub fn text_characters(&self) -> Vec<Character> {
        let ordered = self.characters.iter().any(|c| c.order != 0);
        self.characters
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(i, c)| {
                let mut c = c.clone();
                if !ordered {
                    c.order = i as u32;
                }
                c
            })
            .collect()
    }
}
