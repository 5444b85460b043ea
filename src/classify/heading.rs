//! Section headings recognized by their font face.

use std::collections::{BTreeMap, BTreeSet};

use super::config::ClassifierConfig;
use super::normalize::normalize_heading;
use super::{block_text, RoleModule};
use crate::model::{Document, Role};
use crate::stats::mode_of;

/// Finds the heading face from blocks whose text is a known heading and
/// whose font is larger than the body text, then labels every unassigned
/// block set in that face as HEADING.
///
/// Headings that open a known section also get the section's role as
/// secondary role.
#[derive(Debug, Clone)]
pub struct HeadingFontModule {
    headings: BTreeSet<String>,
    sections: BTreeMap<String, Role>,
    size_margin: f32,
}

impl HeadingFontModule {
    /// Create the module from the configured vocabularies.
    pub fn new(config: &ClassifierConfig) -> Self {
        let sections: BTreeMap<String, Role> = config
            .sections
            .iter()
            .map(|(text, role)| (normalize_heading(text), *role))
            .collect();
        let headings = config
            .headings
            .iter()
            .map(|text| normalize_heading(text))
            .chain(sections.keys().cloned())
            .collect();
        Self {
            headings,
            sections,
            size_margin: config.heading_size_margin,
        }
    }
}

impl RoleModule for HeadingFontModule {
    fn name(&self) -> &'static str {
        "heading-font"
    }

    fn run(&self, document: &Document) {
        let statistics = document.statistics();
        let precision = document.statistics_config().precision;
        let body_size = statistics.text.most_common_font_size;

        let faces = document
            .blocks()
            .filter(|(_, b)| b.font_size() > body_size + self.size_margin)
            .filter(|(_, b)| self.headings.contains(&normalize_heading(&block_text(b))))
            .flat_map(|(_, b)| b.area().characters().iter().map(move |c| c.face().key(precision)))
            .collect::<Vec<_>>();
        let Some(heading_face) = mode_of(faces) else {
            log::debug!("Heading: no known heading above font size {}", body_size);
            return;
        };

        for (_, block) in document.blocks() {
            if block.has_role() {
                continue;
            }
            if block.font_face().map(|f| f.key(precision)) != Some(heading_face) {
                continue;
            }
            block.set_role(Role::Heading);
            if let Some(role) = self.sections.get(&normalize_heading(&block_text(block))) {
                block.set_secondary_role(*role);
            }
        }
    }
}
