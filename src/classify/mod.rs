//! Semantic role classification of text blocks.
//!
//! The [`ClassifierPipeline`] runs an explicit, ordered list of
//! [`RoleModule`]s. Each module labels only blocks that have no role yet, so
//! earlier modules take precedence and running the pipeline twice changes
//! nothing.

mod body;
mod caption;
mod config;
mod footnote;
mod heading;
mod margins;
mod normalize;
mod pipeline;
mod sections;
mod table;
mod title;

pub use body::{BodyTextModule, FallbackModule};
pub use caption::CaptionModule;
pub use config::{ClassifierConfig, DEFAULT_FIGURE_CAPTION, DEFAULT_TABLE_CAPTION};
pub use footnote::FootnoteModule;
pub use heading::HeadingFontModule;
pub use margins::PageMarginModule;
pub use normalize::{normalize_heading, normalize_margin_text};
pub use pipeline::{ClassifierPipeline, RoleModule};
pub use sections::{SectionEvent, SectionModule, SectionState};
pub use table::TableModule;
pub use title::TitleModule;

use crate::model::{TextBlock, TextOptions};

/// Running text of a block as matched against vocabularies and patterns.
fn block_text(block: &TextBlock) -> String {
    block.running_text(&TextOptions::default())
}
