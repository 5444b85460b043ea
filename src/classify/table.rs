//! Tables framed by vector shapes.

use super::RoleModule;
use crate::area::{HasRect, SpatialPredicate};
use crate::model::{Document, Role, Shape};

/// Labels blocks overlapped by a page shape that extends beyond the block as
/// TABLE.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableModule;

impl RoleModule for TableModule {
    fn name(&self) -> &'static str {
        "table"
    }

    fn run(&self, document: &Document) {
        for (page, block) in document.blocks() {
            if block.has_role() {
                continue;
            }
            let rect = block.rect();
            let framed = page
                .area()
                .query::<Shape>(SpatialPredicate::OverlappedBy, &rect)
                .iter()
                .any(|shape| !rect.contains(&shape.rect));
            if framed {
                block.set_role(Role::Table);
            }
        }
    }
}
