//! Figure and table captions.

use regex::Regex;

use super::{block_text, RoleModule};
use crate::model::{Document, Role};

/// Labels blocks starting like "Figure 3" or "Table II" as CAPTION, with
/// FIGURE or TABLE as secondary role.
#[derive(Debug, Clone)]
pub struct CaptionModule {
    figure: Regex,
    table: Regex,
}

impl CaptionModule {
    /// Create the module from compiled caption patterns.
    pub fn new(figure: Regex, table: Regex) -> Self {
        Self { figure, table }
    }
}

impl RoleModule for CaptionModule {
    fn name(&self) -> &'static str {
        "caption"
    }

    fn run(&self, document: &Document) {
        for (_, block) in document.blocks() {
            if block.has_role() {
                continue;
            }
            let text = block_text(block);
            let kind = if self.figure.is_match(&text) {
                Role::Figure
            } else if self.table.is_match(&text) {
                Role::Table
            } else {
                continue;
            };
            block.set_role(Role::Caption);
            block.set_secondary_role(kind);
        }
    }
}
