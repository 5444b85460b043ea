//! Plain text rendering of labeled documents.

use crate::error::Result;
use crate::model::{Document, Paragraph};

use super::RenderOptions;

/// Convert a document to plain text, one paragraph per blank-line separated
/// chunk.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    options.page_selection.check(doc.page_count())?;
    let chunks: Vec<String> = doc
        .pages
        .iter()
        .filter(|page| options.page_selection.includes(page.number))
        .flat_map(|page| page.paragraphs().iter())
        .filter_map(|paragraph| render_paragraph(paragraph, options))
        .collect();

    Ok(chunks.join("\n\n").trim().to_string())
}

fn render_paragraph(paragraph: &Paragraph, options: &RenderOptions) -> Option<String> {
    let text = paragraph.text(&options.text);
    if text.is_empty() {
        return None;
    }
    if !options.show_roles {
        return Some(text);
    }
    let label = match (paragraph.role(), paragraph.secondary_role()) {
        (Some(role), Some(secondary)) => format!("[{}/{}]", role, secondary),
        (Some(role), None) => format!("[{}]", role),
        (None, _) => "[?]".to_string(),
    };
    Some(format!("{} {}", label, text))
}
