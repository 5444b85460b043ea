//! Font and color statistics.

use super::{key_value, mode_of, Frequencies, StatisticsConfig};
use crate::model::{Character, FontFace};

/// Most common typographic attributes of a set of characters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextStatistic {
    /// Most common (font, size) combination
    pub most_common_face: Option<FontFace>,
    /// Most common rounded font size
    pub most_common_font_size: f32,
    /// Most common color id
    pub most_common_color: Option<u32>,
    /// Smallest rounded font size
    pub smallest_font_size: f32,
    /// Largest rounded font size
    pub largest_font_size: f32,
    /// Number of characters
    pub samples: usize,
}

impl TextStatistic {
    /// Compute the statistic over characters.
    pub fn compute<'a>(
        characters: impl IntoIterator<Item = &'a Character>,
        config: &StatisticsConfig,
    ) -> Self {
        let mut sizes = Frequencies::new(config.precision);
        let mut faces = Vec::new();
        let mut colors = Vec::new();

        for ch in characters {
            sizes.add(ch.font_size);
            faces.push(ch.face().key(config.precision));
            colors.push(ch.color_id);
        }

        if faces.is_empty() {
            return Self::default();
        }

        let most_common_face = mode_of(faces.iter().copied())
            .map(|key| FontFace::new(key.font_id, key_value(key.size, config.precision)));

        Self {
            most_common_face,
            most_common_font_size: sizes.most_common().unwrap_or(0.0),
            most_common_color: mode_of(colors),
            smallest_font_size: sizes.min().unwrap_or(0.0),
            largest_font_size: sizes.max().unwrap_or(0.0),
            samples: faces.len(),
        }
    }

    /// Whether the statistic was computed from no characters.
    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }
}
