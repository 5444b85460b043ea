//! Document model types.
//!
//! Primitives (characters, figures, shapes) come from an external decoder
//! through [`RawDocument`]; segmentation builds words, lines, blocks and
//! paragraphs on top of them, and classification labels the blocks.

mod block;
mod document;
mod font;
mod geometry;
mod graphics;
mod page;
mod paragraph;
mod raw;
mod role;
mod text;

pub use block::TextBlock;
pub use document::{Document, DocumentStatistics};
pub use font::{Color, FaceKey, Font, FontFace};
pub use geometry::{Line, Point, Rect};
pub use graphics::{Figure, Shape};
pub use page::Page;
pub use paragraph::Paragraph;
pub use raw::{RawDocument, RawPage};
pub use role::Role;
pub use text::{Character, Script, TextLine, TextOptions, Word};
