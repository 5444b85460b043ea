//! Footnotes.

use super::RoleModule;
use crate::model::{Document, Role, TextBlock};

/// Labels blocks that start with a raised mark in a face other than the
/// block's own as FOOTNOTE.
#[derive(Debug, Clone, Copy)]
pub struct FootnoteModule {
    raise_tolerance: f32,
}

impl FootnoteModule {
    /// Create the module; the mark must sit more than `raise_tolerance` above
    /// the first baseline.
    pub fn new(raise_tolerance: f32) -> Self {
        Self { raise_tolerance }
    }

    fn is_footnote(&self, block: &TextBlock, precision: u32) -> bool {
        let Some(line) = block.lines().first() else {
            return false;
        };
        let Some(mark) = line.characters().first() else {
            return false;
        };
        let raised = mark.rect.min_y > line.baseline().y() + self.raise_tolerance;
        let distinct = block
            .font_face()
            .is_some_and(|face| !face.same_as(&mark.face(), precision));
        raised && distinct
    }
}

impl RoleModule for FootnoteModule {
    fn name(&self) -> &'static str {
        "footnote"
    }

    fn run(&self, document: &Document) {
        let precision = document.statistics_config().precision;
        for (_, block) in document.blocks() {
            if !block.has_role() && self.is_footnote(block, precision) {
                block.set_role(Role::Footnote);
            }
        }
    }
}
