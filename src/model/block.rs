//! Text blocks.

use std::sync::{Arc, OnceLock};

use super::text::join_lines;
use super::{FontFace, Rect, Role, TextLine, TextOptions};
use crate::area::{Area, AreaConfig, HasRect};

/// A block of text lines with a write-once role and secondary role.
#[derive(Debug)]
pub struct TextBlock {
    area: Area,
    role: OnceLock<Role>,
    secondary_role: OnceLock<Role>,
}

impl TextBlock {
    /// Build a block from lines in reading order.
    ///
    /// The area holds the lines, their words and their characters.
    pub fn new(lines: Vec<Arc<TextLine>>, config: &AreaConfig) -> Self {
        let mut area = Area::new(*config);
        let words: Vec<_> = lines.iter().flat_map(|l| l.words().iter().cloned()).collect();
        let characters: Vec<_> = lines
            .iter()
            .flat_map(|l| l.characters().iter().cloned())
            .collect();
        area.extend(lines);
        area.extend(words);
        area.extend(characters);
        Self {
            area,
            role: OnceLock::new(),
            secondary_role: OnceLock::new(),
        }
    }

    /// Area holding the lines, words and characters of the block.
    pub fn area(&self) -> &Area {
        &self.area
    }

    /// Lines in reading order.
    pub fn lines(&self) -> &[Arc<TextLine>] {
        self.area.lines()
    }

    /// Primary role, if assigned.
    pub fn role(&self) -> Option<Role> {
        self.role.get().copied()
    }

    /// Secondary role, if assigned.
    pub fn secondary_role(&self) -> Option<Role> {
        self.secondary_role.get().copied()
    }

    /// Assign the primary role. Returns `false` if it was already set.
    pub fn set_role(&self, role: Role) -> bool {
        self.role.set(role).is_ok()
    }

    /// Assign the secondary role. Returns `false` if it was already set.
    pub fn set_secondary_role(&self, role: Role) -> bool {
        self.secondary_role.set(role).is_ok()
    }

    /// Whether a primary role was assigned.
    pub fn has_role(&self) -> bool {
        self.role.get().is_some()
    }

    /// Most common font face of the block.
    pub fn font_face(&self) -> Option<FontFace> {
        self.area.text_statistic().most_common_face
    }

    /// Most common font size of the block.
    pub fn font_size(&self) -> f32 {
        self.area.text_statistic().most_common_font_size
    }

    /// Text of the block, one line per row.
    pub fn text(&self, options: &TextOptions) -> String {
        self.lines()
            .iter()
            .map(|l| l.text(options))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Running text of the block with hyphenated line ends merged.
    pub fn running_text(&self, options: &TextOptions) -> String {
        join_lines(self.lines(), options)
    }
}

impl HasRect for TextBlock {
    fn rect(&self) -> Rect {
        self.area.rect().unwrap_or_default()
    }
}
