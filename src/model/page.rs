//! Page-level types.

use std::sync::Arc;

use super::{Character, Figure, Paragraph, Shape, TextBlock, TextLine, TextOptions};
use crate::area::{Area, AreaConfig};

/// A single page of the document.
#[derive(Debug, Clone)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    area: Area,
    graphics: Vec<Area>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32, width: f32, height: f32, config: &AreaConfig) -> Self {
        Self {
            number,
            width,
            height,
            area: Area::new(*config),
            graphics: Vec::new(),
        }
    }

    /// Area holding the primitives and everything built on them.
    pub fn area(&self) -> &Area {
        &self.area
    }

    pub(crate) fn area_mut(&mut self) -> &mut Area {
        &mut self.area
    }

    /// Groups of figures and shapes found on pages without text.
    pub fn graphics(&self) -> &[Area] {
        &self.graphics
    }

    pub(crate) fn add_graphic(&mut self, group: Area) {
        self.graphics.push(group);
    }

    /// Characters in extraction order.
    pub fn characters(&self) -> &[Arc<Character>] {
        self.area.characters()
    }

    /// Figures on the page.
    pub fn figures(&self) -> &[Arc<Figure>] {
        self.area.figures()
    }

    /// Shapes on the page.
    pub fn shapes(&self) -> &[Arc<Shape>] {
        self.area.shapes()
    }

    /// Text blocks in reading order.
    pub fn blocks(&self) -> &[Arc<TextBlock>] {
        self.area.blocks()
    }

    /// Text lines in reading order.
    pub fn lines(&self) -> &[Arc<TextLine>] {
        self.area.lines()
    }

    /// Paragraphs in reading order.
    pub fn paragraphs(&self) -> &[Arc<Paragraph>] {
        self.area.paragraphs()
    }

    /// Check if the page holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks().is_empty()
    }

    /// Plain text of the page, paragraphs separated by blank lines.
    pub fn plain_text(&self, options: &TextOptions) -> String {
        self.paragraphs()
            .iter()
            .map(|p| p.text(options))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
