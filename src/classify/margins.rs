//! Running page headers and footers.

use std::collections::HashMap;
use std::sync::Arc;

use super::normalize::normalize_margin_text;
use super::{block_text, RoleModule};
use crate::area::HasRect;
use crate::model::{Document, Page, Role, TextBlock};

/// Labels the topmost and bottommost block of a page as PAGE_HEADER /
/// PAGE_FOOTER when its text, ignoring digits, repeats on more than half of
/// the pages.
#[derive(Debug, Clone, Copy)]
pub struct PageMarginModule {
    min_pages: usize,
}

impl PageMarginModule {
    /// Create the module; documents with fewer than `min_pages` pages are skipped.
    pub fn new(min_pages: usize) -> Self {
        Self {
            min_pages: min_pages.max(1),
        }
    }
}

type Margins<'a> = (Option<&'a Arc<TextBlock>>, Option<&'a Arc<TextBlock>>);

fn margins(page: &Page) -> Margins<'_> {
    let blocks = page.blocks();
    if blocks.len() < 2 {
        return (None, None);
    }
    let top = blocks
        .iter()
        .max_by(|a, b| a.rect().max_y.total_cmp(&b.rect().max_y));
    let bottom = blocks
        .iter()
        .min_by(|a, b| a.rect().min_y.total_cmp(&b.rect().min_y));
    (top, bottom)
}

impl RoleModule for PageMarginModule {
    fn name(&self) -> &'static str {
        "page-header-footer"
    }

    fn run(&self, document: &Document) {
        let pages = document.pages.len();
        if pages < self.min_pages {
            return;
        }

        let per_page: Vec<Margins<'_>> = document.pages.iter().map(margins).collect();
        let mut headers: HashMap<String, usize> = HashMap::new();
        let mut footers: HashMap<String, usize> = HashMap::new();
        for (top, bottom) in &per_page {
            if let Some(top) = top {
                *headers.entry(normalize_margin_text(&block_text(top))).or_default() += 1;
            }
            if let Some(bottom) = bottom {
                *footers.entry(normalize_margin_text(&block_text(bottom))).or_default() += 1;
            }
        }

        let repeated = |counts: &HashMap<String, usize>, block: &TextBlock| {
            let key = normalize_margin_text(&block_text(block));
            counts.get(&key).is_some_and(|n| n * 2 > pages)
        };
        for (top, bottom) in per_page {
            if let Some(top) = top {
                if repeated(&headers, top.as_ref()) {
                    top.set_role(Role::PageHeader);
                }
            }
            if let Some(bottom) = bottom {
                if repeated(&footers, bottom.as_ref()) {
                    bottom.set_role(Role::PageFooter);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::fixtures::{block, document, page};

    fn journal_page(number: u32, body: &str) -> Page {
        let footer = format!("Page {}", number);
        page(
            number,
            vec![
                block(&[("Journal of Layout 12", 72.0, 760.0, 1, 8.0)]),
                block(&[(body, 72.0, 400.0, 1, 10.0)]),
                block(&[(footer.as_str(), 300.0, 40.0, 1, 8.0)]),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_repeated_margins() {
        let doc = document(vec![
            journal_page(1, "first body"),
            journal_page(2, "second body"),
            journal_page(3, "third body"),
        ]);
        PageMarginModule::new(2).run(&doc);
        for p in &doc.pages {
            assert_eq!(p.blocks()[0].role(), Some(Role::PageHeader));
            assert_eq!(p.blocks()[1].role(), None);
            assert_eq!(p.blocks()[2].role(), Some(Role::PageFooter));
        }
    }

    #[test]
    fn test_single_page_is_skipped() {
        let doc = document(vec![journal_page(1, "body")]);
        PageMarginModule::new(2).run(&doc);
        assert!(doc.blocks().all(|(_, b)| b.role().is_none()));
    }

    #[test]
    fn test_distinct_margins_are_not_labeled() {
        let a = page(
            1,
            vec![
                block(&[("Alpha", 72.0, 760.0, 1, 8.0)]),
                block(&[("body", 72.0, 400.0, 1, 10.0)]),
            ],
            Vec::new(),
        );
        let b = page(
            2,
            vec![
                block(&[("Omega", 72.0, 760.0, 1, 8.0)]),
                block(&[("body", 72.0, 400.0, 1, 10.0)]),
            ],
            Vec::new(),
        );
        let doc = document(vec![a, b]);
        PageMarginModule::new(2).run(&doc);
        assert_eq!(doc.pages[0].blocks()[0].role(), None);
        // The bottom blocks repeat ("body") and are labeled as footers.
        assert_eq!(doc.pages[0].blocks()[1].role(), Some(Role::PageFooter));
    }
}
