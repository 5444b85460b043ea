//! Layout segmentation.
//!
//! A page is cut into text blocks (or, without text, into groups of
//! figures and shapes), blocks into lines and lines into words by the
//! [`Cutter`] driven by one [`CutRule`] per level. Lines of each block are
//! then grouped into paragraphs by the [`ParagraphAssembler`].

mod cutter;
mod options;
mod paragraphs;
mod rules;

pub use cutter::{CutRule, Cutter, Lane, LaneSpec, SweepDirection};
pub use options::{ParagraphOptions, SegmentOptions, DEFAULT_REFERENCE_ANCHOR};
pub use paragraphs::{ParagraphAssembler, ParagraphBreak};
pub use rules::{BlockRule, GraphicsPageRule, LineRule, PageRule};

pub use crate::area::Axis;

use std::sync::Arc;

use crate::area::{Area, AreaConfig};
use crate::error::Result;
use crate::model::{Page, RawPage, TextBlock, TextLine};
use crate::stats::DimensionStatistic;

/// Builds the block/line/word tree of single pages.
#[derive(Debug, Clone)]
pub struct Segmenter {
    options: SegmentOptions,
    config: AreaConfig,
    cutter: Cutter,
    graphics_rule: GraphicsPageRule,
    block_rule: BlockRule,
    line_rule: LineRule,
}

impl Segmenter {
    /// Create a segmenter, validating the options.
    pub fn new(options: SegmentOptions, config: AreaConfig) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            cutter: Cutter::new(options.lane_step)?,
            graphics_rule: GraphicsPageRule::new(options.graphics_lane_size)?,
            block_rule: BlockRule::new(options.block_lane_size)?,
            line_rule: LineRule::new(options.word_lane_factor, options.word_gap_fallback_factor)?,
            options,
            config,
        })
    }

    /// Area configuration used for every area the segmenter creates.
    pub fn area_config(&self) -> &AreaConfig {
        &self.config
    }

    /// Segment one page.
    ///
    /// `dimension` holds the document-wide character dimensions that size the
    /// lanes between blocks.
    pub fn segment_page(&self, raw: &RawPage, dimension: &DimensionStatistic) -> Result<Page> {
        let mut page = Page::new(raw.number, raw.width, raw.height, &self.config);
        let mut work = Area::new(self.config);

        for ch in raw.text_characters() {
            let ch = Arc::new(ch);
            if page.area_mut().insert(Arc::clone(&ch)) {
                work.insert(ch);
            }
        }
        for figure in &raw.figures {
            let figure = Arc::new(*figure);
            if page.area_mut().insert(Arc::clone(&figure)) {
                work.insert(figure);
            }
        }
        for shape in &raw.shapes {
            let shape = Arc::new(*shape);
            if page.area_mut().insert(Arc::clone(&shape)) {
                work.insert(shape);
            }
        }

        if work.is_empty() {
            return Ok(page);
        }

        if work.characters().is_empty() {
            let groups = self.cutter.cut(work, &self.graphics_rule);
            log::debug!("Page {}: {} graphic groups", page.number, groups.len());
            for group in groups {
                page.add_graphic(group);
            }
            return Ok(page);
        }

        let page_rule = PageRule::new(dimension, &self.options)?;
        let regions = self.cutter.cut(work, &page_rule);
        let mut blocks = Vec::new();
        for region in regions {
            if region.characters().is_empty() {
                page.add_graphic(region);
            } else {
                blocks.push(Arc::new(self.build_block(&region)));
            }
        }

        log::debug!(
            "Page {}: {} blocks, {} graphic groups",
            page.number,
            blocks.len(),
            page.graphics().len()
        );

        let area = page.area_mut();
        for block in blocks {
            let lines: Vec<_> = block.lines().to_vec();
            area.insert(block);
            for line in lines {
                let words: Vec<_> = line.words().to_vec();
                area.insert(line);
                area.extend(words);
            }
        }
        Ok(page)
    }

    /// Build a text block from the characters of a page region.
    pub fn build_block(&self, region: &Area) -> TextBlock {
        let mut text = Area::new(self.config);
        text.extend(region.characters().iter().cloned());

        let lines: Vec<Arc<TextLine>> = self
            .cutter
            .cut(text, &self.block_rule)
            .into_iter()
            .map(|line_area| {
                let groups = self
                    .cutter
                    .cut(line_area, &self.line_rule)
                    .into_iter()
                    .map(|word| word.characters().to_vec())
                    .collect();
                Arc::new(TextLine::new(groups, &self.config))
            })
            .collect();

        TextBlock::new(lines, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Character, Figure, Rect, Shape, TextOptions};

    fn raw_page(rows: &[(&str, f32, f32)]) -> RawPage {
        let mut page = RawPage::new(1, 612.0, 792.0);
        for (text, x, y) in rows {
            let mut cx = *x;
            for c in text.chars() {
                page.characters.push(Character::new(
                    c.to_string(),
                    Rect::from_size(cx, *y, 5.0, 7.0),
                    1,
                    10.0,
                ));
                cx += 5.0;
            }
        }
        page
    }

    fn dimension() -> DimensionStatistic {
        DimensionStatistic {
            most_common_width: 5.0,
            most_common_height: 7.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_segment_two_columns() {
        let raw = raw_page(&[
            ("left one", 50.0, 700.0),
            ("left two", 50.0, 688.0),
            ("right one", 300.0, 700.0),
            ("right two", 300.0, 688.0),
        ]);
        let segmenter = Segmenter::new(SegmentOptions::default(), AreaConfig::default()).unwrap();
        let page = segmenter.segment_page(&raw, &dimension()).unwrap();

        assert_eq!(page.blocks().len(), 2);
        assert_eq!(page.lines().len(), 4);
        assert_eq!(page.area().words().len(), 8);
        let options = TextOptions::default();
        assert_eq!(page.blocks()[0].text(&options), "left one\nleft two");
        assert_eq!(page.blocks()[1].text(&options), "right one\nright two");
        // Spaces are skipped, the rest is on the page.
        assert_eq!(page.characters().len(), 30);
    }

    #[test]
    fn test_graphics_only_page() {
        let mut raw = RawPage::new(2, 612.0, 792.0);
        raw.figures.push(Figure::new(Rect::new(50.0, 500.0, 300.0, 700.0)));
        raw.shapes.push(Shape::new(Rect::new(50.0, 100.0, 300.0, 101.0), 0));
        let segmenter = Segmenter::new(SegmentOptions::default(), AreaConfig::default()).unwrap();
        let page = segmenter.segment_page(&raw, &DimensionStatistic::default()).unwrap();
        assert!(page.blocks().is_empty());
        assert_eq!(page.graphics().len(), 2);
    }

    #[test]
    fn test_empty_page() {
        let segmenter = Segmenter::new(SegmentOptions::default(), AreaConfig::default()).unwrap();
        let page = segmenter
            .segment_page(&RawPage::new(3, 612.0, 792.0), &DimensionStatistic::default())
            .unwrap();
        assert!(page.is_empty());
        assert!(page.graphics().is_empty());
    }

    #[test]
    fn test_invalid_options_fail_fast() {
        let options = SegmentOptions::default().with_block_lane_size(-1.0);
        assert!(Segmenter::new(options, AreaConfig::default()).is_err());
    }
}
