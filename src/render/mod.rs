//! Rendering of labeled documents to plain text and JSON.

mod json;
mod options;
mod text;

pub use json::{to_json, JsonFormat};
pub use options::{PageSelection, RenderOptions};
pub use text::to_text;
