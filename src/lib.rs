//! # pdflayout
//!
//! Layout segmentation and semantic role classification for PDF page
//! primitives.
//!
//! The input is a dump of positioned characters, vector shapes and figures
//! per page ([`RawDocument`]). Pages are cut recursively into text blocks,
//! lines and words, lines are grouped into paragraphs and every block is
//! labeled with a semantic [`Role`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdflayout::{analyze_file, render};
//!
//! fn main() -> pdflayout::Result<()> {
//!     let doc = analyze_file("primitives.json")?;
//!
//!     let options = render::RenderOptions::default().with_roles(true);
//!     println!("{}", render::to_text(&doc, &options)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Recursive XY cutting**: page, block and line rules over a spatial index
//! - **Cached statistics**: most common glyph sizes, fonts and line pitches
//! - **Paragraph assembly**: indentation, font and pitch breaks
//! - **Role classification**: ordered, configurable modules
//! - **Parallel processing**: Uses Rayon for multi-page documents

pub mod analyzer;
pub mod area;
pub mod classify;
pub mod error;
pub mod model;
pub mod render;
pub mod segment;
pub mod stats;

// Re-export commonly used types
pub use analyzer::{AnalyzeOptions, Analyzer};
pub use area::{Area, AreaConfig, Element, ElementKind, HasRect, IndexKind, SpatialPredicate};
pub use classify::{ClassifierConfig, ClassifierPipeline, RoleModule};
pub use error::{Error, Result};
pub use model::{
    Character, Color, Document, Figure, Font, FontFace, Page, Paragraph, RawDocument, RawPage,
    Rect, Role, Shape, TextBlock, TextLine, TextOptions, Word,
};
pub use render::{JsonFormat, RenderOptions};
pub use segment::{ParagraphOptions, SegmentOptions};
pub use stats::StatisticsConfig;

use std::path::Path;

/// Analyze a primitive dump with default options.
///
/// # Example
///
/// ```no_run
/// use pdflayout::{analyze, RawDocument};
///
/// let raw = RawDocument::from_path("primitives.json").unwrap();
/// let doc = analyze(&raw).unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn analyze(raw: &RawDocument) -> Result<Document> {
    analyze_with_options(raw, AnalyzeOptions::default())
}

/// Analyze a primitive dump with custom options.
///
/// # Example
///
/// ```no_run
/// use pdflayout::{analyze_with_options, AnalyzeOptions, RawDocument};
///
/// let raw = RawDocument::from_path("primitives.json").unwrap();
/// let options = AnalyzeOptions::new().sequential();
/// let doc = analyze_with_options(&raw, options).unwrap();
/// ```
pub fn analyze_with_options(raw: &RawDocument, options: AnalyzeOptions) -> Result<Document> {
    Analyzer::new(options)?.analyze(raw)
}

/// Read a primitive dump from a JSON file and analyze it with default options.
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    Analyzer::new(AnalyzeOptions::default())?.analyze_file(path)
}

/// Extract the plain text of a primitive dump file, one paragraph per line.
///
/// # Example
///
/// ```no_run
/// let text = pdflayout::extract_text("primitives.json").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = analyze_file(path)?;
    render::to_text(&doc, &RenderOptions::default())
}

/// Convert a primitive dump file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = analyze_file(path)?;
    render::to_json(&doc, &RenderOptions::default(), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_analyze_file_missing() {
        let result = analyze_file("/nonexistent/primitives.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_analyze_file_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let result = analyze_file(file.path());
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_extract_text_from_file() {
        let json = r#"{
            "fonts": [{ "id": 1, "name": "Times-Roman" }],
            "pages": [{
                "number": 1, "width": 612, "height": 792,
                "characters": [
                    {
                        "text": "H", "font_id": 1, "font_size": 10,
                        "rect": { "min_x": 72, "min_y": 700, "max_x": 77, "max_y": 707 }
                    },
                    {
                        "text": "i", "font_id": 1, "font_size": 10,
                        "rect": { "min_x": 77, "min_y": 700, "max_x": 80, "max_y": 707 }
                    }
                ]
            }]
        }"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        assert_eq!(extract_text(file.path()).unwrap(), "Hi");
    }
}
