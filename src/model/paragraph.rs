//! Paragraphs assembled from the lines of one text block.

use std::sync::Arc;

use super::text::join_lines;
use super::{FontFace, Rect, Role, TextBlock, TextLine, TextOptions};
use crate::area::{Area, AreaConfig, HasRect};

/// A paragraph: consecutive lines of one block.
///
/// Roles belong to the source block; a paragraph exposes them through its
/// shared handle.
#[derive(Debug, Clone)]
pub struct Paragraph {
    area: Area,
    block: Arc<TextBlock>,
    context: String,
}

impl Paragraph {
    /// Create a paragraph from lines in reading order.
    pub fn new(
        lines: Vec<Arc<TextLine>>,
        block: Arc<TextBlock>,
        context: impl Into<String>,
        config: &AreaConfig,
    ) -> Self {
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
            block,
            context: context.into(),
        }
    }

    /// Area holding the lines, words and characters of the paragraph.
    pub fn area(&self) -> &Area {
        &self.area
    }

    /// Lines in reading order.
    pub fn lines(&self) -> &[Arc<TextLine>] {
        self.area.lines()
    }

    /// The block the paragraph was assembled from.
    pub fn block(&self) -> &Arc<TextBlock> {
        &self.block
    }

    /// Free-text context tag (e.g., "page 1 block 3").
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Primary role of the source block.
    pub fn role(&self) -> Option<Role> {
        self.block.role()
    }

    /// Secondary role of the source block.
    pub fn secondary_role(&self) -> Option<Role> {
        self.block.secondary_role()
    }

    /// Most common font face.
    pub fn font_face(&self) -> Option<FontFace> {
        self.area.text_statistic().most_common_face
    }

    /// Most common font size.
    pub fn font_size(&self) -> f32 {
        self.area.text_statistic().most_common_font_size
    }

    /// Most common color id.
    pub fn color(&self) -> Option<u32> {
        self.area.text_statistic().most_common_color
    }

    /// Running text with hyphenated line ends merged.
    pub fn text(&self, options: &TextOptions) -> String {
        join_lines(self.lines(), options)
    }
}

impl HasRect for Paragraph {
    fn rect(&self) -> Rect {
        self.area.rect().unwrap_or_default()
    }
}
