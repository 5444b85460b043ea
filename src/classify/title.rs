//! Document title.

use super::RoleModule;
use crate::model::{Document, Role};

/// Labels the unassigned block with the largest font size on the first page
/// as TITLE, unless the document already has a title.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleModule;

impl RoleModule for TitleModule {
    fn name(&self) -> &'static str {
        "title"
    }

    fn run(&self, document: &Document) {
        if document.blocks().any(|(_, b)| b.role() == Some(Role::Title)) {
            return;
        }
        let Some(first) = document.pages.first() else {
            return;
        };

        let mut best: Option<(f32, usize)> = None;
        for (i, block) in first.blocks().iter().enumerate() {
            if block.has_role() {
                continue;
            }
            let size = block.font_size();
            if best.map_or(true, |(s, _)| size > s) {
                best = Some((size, i));
            }
        }

        if let Some((size, i)) = best {
            log::debug!("Title: block {} with font size {}", i + 1, size);
            first.blocks()[i].set_role(Role::Title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::fixtures::{block, document, page};

    #[test]
    fn test_largest_block_on_first_page() {
        let doc = document(vec![
            page(
                1,
                vec![
                    block(&[("Some header", 72.0, 760.0, 1, 8.0)]),
                    block(&[("A Study of Layout", 72.0, 700.0, 2, 18.0)]),
                    block(&[("body text here", 72.0, 600.0, 1, 10.0)]),
                ],
                Vec::new(),
            ),
            page(2, vec![block(&[("Huge", 72.0, 700.0, 2, 30.0)])], Vec::new()),
        ]);
        TitleModule.run(&doc);
        assert_eq!(doc.pages[0].blocks()[1].role(), Some(Role::Title));
        assert_eq!(doc.pages[1].blocks()[0].role(), None);

        // Running again does not pick a second title.
        TitleModule.run(&doc);
        let titles = doc.blocks().filter(|(_, b)| b.role() == Some(Role::Title)).count();
        assert_eq!(titles, 1);
    }

    #[test]
    fn test_assigned_blocks_are_skipped() {
        let doc = document(vec![page(
            1,
            vec![
                block(&[("Banner", 72.0, 760.0, 1, 24.0)]),
                block(&[("Real Title", 72.0, 700.0, 2, 16.0)]),
            ],
            Vec::new(),
        )]);
        doc.pages[0].blocks()[0].set_role(Role::PageHeader);
        TitleModule.run(&doc);
        assert_eq!(doc.pages[0].blocks()[1].role(), Some(Role::Title));
    }
}
