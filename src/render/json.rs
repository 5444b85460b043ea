//! JSON rendering of labeled documents.

use std::sync::Arc;

use serde::Serialize;

use crate::area::{Area, HasRect};
use crate::error::{Error, Result};
use crate::model::{Color, Document, Font, Page, Paragraph, Rect, Role, TextBlock};

use super::RenderOptions;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    page_count: u32,
    fonts: &'a [Font],
    colors: &'a [Color],
    pages: Vec<JsonPage>,
}

#[derive(Serialize)]
struct JsonPage {
    number: u32,
    width: f32,
    height: f32,
    blocks: Vec<JsonBlock>,
    graphics: Vec<JsonGraphic>,
}

#[derive(Serialize)]
struct JsonBlock {
    rect: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    secondary_role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    font_id: Option<u32>,
    font_size: f32,
    paragraphs: Vec<JsonParagraph>,
}

#[derive(Serialize)]
struct JsonParagraph {
    context: String,
    rect: Rect,
    lines: Vec<String>,
    text: String,
}

#[derive(Serialize)]
struct JsonGraphic {
    rect: Rect,
    figures: usize,
    shapes: usize,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, options: &RenderOptions, format: JsonFormat) -> Result<String> {
    options.page_selection.check(doc.page_count())?;
    let view = JsonDocument {
        page_count: doc.page_count(),
        fonts: &doc.fonts,
        colors: &doc.colors,
        pages: doc
            .pages
            .iter()
            .filter(|page| options.page_selection.includes(page.number))
            .map(|page| json_page(page, options))
            .collect(),
    };

    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&view),
        JsonFormat::Compact => serde_json::to_string(&view),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

fn json_page(page: &Page, options: &RenderOptions) -> JsonPage {
    JsonPage {
        number: page.number,
        width: page.width,
        height: page.height,
        blocks: page
            .blocks()
            .iter()
            .map(|block| json_block(block, page.paragraphs(), options))
            .collect(),
        graphics: page.graphics().iter().map(json_graphic).collect(),
    }
}

fn json_block(
    block: &Arc<TextBlock>,
    paragraphs: &[Arc<Paragraph>],
    options: &RenderOptions,
) -> JsonBlock {
    let face = block.font_face();
    JsonBlock {
        rect: block.rect(),
        role: block.role(),
        secondary_role: block.secondary_role(),
        font_id: face.map(|f| f.font_id),
        font_size: block.font_size(),
        paragraphs: paragraphs
            .iter()
            .filter(|p| Arc::ptr_eq(p.block(), block))
            .map(|p| JsonParagraph {
                context: p.context().to_string(),
                rect: p.rect(),
                lines: p.lines().iter().map(|l| l.text(&options.text)).collect(),
                text: p.text(&options.text),
            })
            .collect(),
    }
}

fn json_graphic(area: &Area) -> JsonGraphic {
    JsonGraphic {
        rect: area.rect().unwrap_or_default(),
        figures: area.figures().len(),
        shapes: area.shapes().len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalyzeOptions, Analyzer};
    use crate::model::{Character, Figure, RawDocument, RawPage};

    fn document() -> Document {
        let mut text = RawPage::new(1, 612.0, 792.0);
        for (i, c) in "Abstract".chars().enumerate() {
            let rect = Rect::from_size(72.0 + 5.0 * i as f32, 700.0, 5.0, 7.0);
            text.characters.push(Character::new(c.to_string(), rect, 1, 10.0));
        }
        let mut image = RawPage::new(2, 612.0, 792.0);
        image.figures.push(Figure::new(Rect::new(100.0, 100.0, 300.0, 300.0)));

        let raw = RawDocument {
            pages: vec![text, image],
            fonts: vec![Font::new(1, "Times-Roman")],
            ..Default::default()
        };
        Analyzer::new(AnalyzeOptions::new()).unwrap().analyze(&raw).unwrap()
    }

    #[test]
    fn test_to_json_pretty() {
        let doc = document();
        let json = to_json(&doc, &RenderOptions::default(), JsonFormat::Pretty).unwrap();
        assert!(json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["page_count"], 2);
        assert_eq!(value["fonts"][0]["name"], "Times-Roman");
        let block = &value["pages"][0]["blocks"][0];
        assert!(block["role"].is_string());
        assert_eq!(block["paragraphs"][0]["text"], "Abstract");
        assert_eq!(block["paragraphs"][0]["context"], "page 1 block 1");
        assert_eq!(value["pages"][1]["graphics"][0]["figures"], 1);
    }

    #[test]
    fn test_to_json_compact() {
        let doc = document();
        let options = RenderOptions::new().with_page_range(2..=2);
        let json = to_json(&doc, &options, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pages"].as_array().map(|p| p.len()), Some(1));
    }
}
