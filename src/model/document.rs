//! Document-level types.

use std::sync::Arc;

use super::{Color, Font, Page, Paragraph, TextBlock, TextOptions};
use crate::area::HasRect;
use crate::stats::{DimensionStatistic, StatisticsConfig, TextLineStatistic, TextStatistic};

/// Statistics over all pages of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DocumentStatistics {
    /// Character dimensions
    pub dimension: DimensionStatistic,
    /// Fonts, sizes and colors
    pub text: TextStatistic,
    /// Line pitches
    pub text_line: TextLineStatistic,
}

impl DocumentStatistics {
    /// Compute the statistics over the characters and lines of `pages`.
    pub fn compute(pages: &[Page], config: &StatisticsConfig) -> Self {
        let characters = || pages.iter().flat_map(|p| p.characters().iter().map(|c| c.as_ref()));
        Self {
            dimension: DimensionStatistic::compute(characters().map(|c| &c.rect), config),
            text: TextStatistic::compute(characters(), config),
            text_line: TextLineStatistic::compute(
                pages
                    .iter()
                    .flat_map(|p| p.lines().iter().map(|l| (l.rect(), l.baseline().y()))),
                config,
            ),
        }
    }
}

/// A segmented and labeled document.
#[derive(Debug, Clone)]
pub struct Document {
    /// Pages in the document
    pub pages: Vec<Page>,

    /// Font table
    pub fonts: Vec<Font>,

    /// Color table
    pub colors: Vec<Color>,

    statistics: DocumentStatistics,
    config: StatisticsConfig,
}

impl Document {
    /// Create a document and compute its statistics.
    pub fn new(
        pages: Vec<Page>,
        fonts: Vec<Font>,
        colors: Vec<Color>,
        config: &StatisticsConfig,
    ) -> Self {
        let statistics = DocumentStatistics::compute(&pages, config);
        Self::from_parts(pages, fonts, colors, statistics, config)
    }

    /// Assemble a document around statistics computed beforehand.
    pub(crate) fn from_parts(
        pages: Vec<Page>,
        fonts: Vec<Font>,
        colors: Vec<Color>,
        statistics: DocumentStatistics,
        config: &StatisticsConfig,
    ) -> Self {
        Self {
            pages,
            fonts,
            colors,
            statistics,
            config: *config,
        }
    }

    /// Document-wide statistics.
    pub fn statistics(&self) -> &DocumentStatistics {
        &self.statistics
    }

    /// Statistics parameters the document was built with.
    pub fn statistics_config(&self) -> &StatisticsConfig {
        &self.config
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Look up a font by id.
    pub fn font(&self, id: u32) -> Option<&Font> {
        self.fonts.iter().find(|f| f.id == id)
    }

    /// Look up a color by id.
    pub fn color(&self, id: u32) -> Option<&Color> {
        self.colors.iter().find(|c| c.id == id)
    }

    /// All text blocks in document order, with their page.
    pub fn blocks(&self) -> impl Iterator<Item = (&Page, &Arc<TextBlock>)> {
        self.pages
            .iter()
            .flat_map(|page| page.blocks().iter().map(move |block| (page, block)))
    }

    /// All paragraphs in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Arc<Paragraph>> {
        self.pages.iter().flat_map(|page| page.paragraphs().iter())
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self, options: &TextOptions) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text(options))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
