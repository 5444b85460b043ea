//! Rendering options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::model::TextOptions;

/// Options for rendering a labeled document.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Script and punctuation inclusion of rendered text
    pub text: TextOptions,

    /// Prefix every paragraph with its block's role
    pub show_roles: bool,

    /// Page selection
    pub page_selection: PageSelection,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text options.
    pub fn with_text_options(mut self, text: TextOptions) -> Self {
        self.text = text;
        self
    }

    /// Enable or disable role prefixes.
    pub fn with_roles(mut self, show: bool) -> Self {
        self.show_roles = show;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Set specific page range.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.page_selection = PageSelection::Range(range);
        self
    }
}

/// Page selection for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Render all pages
    #[default]
    All,
    /// Render a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Render specific pages (1-indexed, sorted)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.binary_search(&page).is_ok(),
        }
    }

    /// Highest page number the selection names, if bounded.
    pub fn last_page(&self) -> Option<u32> {
        match self {
            PageSelection::All => None,
            PageSelection::Range(range) => Some(*range.end()),
            PageSelection::Pages(pages) => pages.last().copied(),
        }
    }

    /// Fail with [`Error::PageOutOfRange`] when the selection names a page
    /// past `page_count`.
    pub fn check(&self, page_count: u32) -> Result<()> {
        match self.last_page() {
            Some(last) if last > page_count => Err(Error::PageOutOfRange(last, page_count)),
            _ => Ok(()),
        }
    }

    /// Parse a selection such as "all", "2-5" or "1,3,7-9".
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        let mut ranges = s.split(',').map(parse_range).collect::<Result<Vec<_>>>()?;
        if let [range] = ranges.as_slice() {
            return Ok(PageSelection::Range(range.clone()));
        }
        let mut pages: Vec<u32> = ranges.drain(..).flatten().collect();
        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

fn parse_range(part: &str) -> Result<RangeInclusive<u32>> {
    let number = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|_| Error::InvalidConfig(format!("invalid page number '{}'", s.trim())))
    };
    match part.split_once('-') {
        Some((start, end)) => {
            let (start, end) = (number(start)?, number(end)?);
            if start > end {
                return Err(Error::InvalidConfig(format!("empty page range '{}'", part.trim())));
            }
            Ok(start..=end)
        }
        None => {
            let page = number(part)?;
            Ok(page..=page)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_bounds() {
        assert!(PageSelection::All.check(0).is_ok());
        assert!(PageSelection::Range(1..=3).check(3).is_ok());
        assert!(matches!(
            PageSelection::Pages(vec![1, 7]).check(5),
            Err(Error::PageOutOfRange(7, 5))
        ));
    }

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_roles(true)
            .with_text_options(TextOptions::default().without_scripts())
            .with_page_range(2..=3);

        assert!(options.show_roles);
        assert!(!options.text.include_scripts);
        assert!(!options.page_selection.includes(1));
        assert!(options.page_selection.includes(3));
    }

    #[test]
    fn test_page_selection_parse() {
        assert_eq!(PageSelection::parse("all").unwrap(), PageSelection::All);
        assert_eq!(PageSelection::parse(" ").unwrap(), PageSelection::All);
        assert_eq!(PageSelection::parse("1-10").unwrap(), PageSelection::Range(1..=10));
        assert_eq!(PageSelection::parse("4").unwrap(), PageSelection::Range(4..=4));

        let mixed = PageSelection::parse("10,1,3,5-7,3").unwrap();
        assert_eq!(mixed, PageSelection::Pages(vec![1, 3, 5, 6, 7, 10]));
        assert!(mixed.includes(6));
        assert!(!mixed.includes(8));
    }

    #[test]
    fn test_page_selection_errors() {
        assert!(PageSelection::parse("x").is_err());
        assert!(PageSelection::parse("5-2").is_err());
        assert!(PageSelection::parse("1,,2").is_err());
    }
}
