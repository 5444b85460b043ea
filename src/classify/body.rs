//! Body text and the catch-all fallback.

use super::RoleModule;
use crate::model::{Document, Role};

/// Labels unassigned blocks set in the document's most common face as
/// BODY_TEXT.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyTextModule;

impl RoleModule for BodyTextModule {
    fn name(&self) -> &'static str {
        "body-text"
    }

    fn run(&self, document: &Document) {
        let Some(body_face) = document.statistics().text.most_common_face else {
            return;
        };
        let precision = document.statistics_config().precision;
        for (_, block) in document.blocks() {
            if block.has_role() {
                continue;
            }
            if block.font_face().is_some_and(|f| f.same_as(&body_face, precision)) {
                block.set_role(Role::BodyText);
            }
        }
    }
}

/// Labels every remaining block as OTHER.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackModule;

impl RoleModule for FallbackModule {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn run(&self, document: &Document) {
        for (_, block) in document.blocks() {
            block.set_role(Role::Other);
        }
    }
}
