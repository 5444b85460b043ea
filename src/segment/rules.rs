//! Cut rules for each segmentation level.

use crate::area::{Area, Axis, SpatialPredicate};
use crate::error::{check_non_negative, Result};
use crate::model::{Character, Figure, Rect, Shape};
use crate::stats::{DimensionStatistic, Frequencies};

use super::cutter::{CutRule, LaneSpec, SweepDirection};
use super::options::SegmentOptions;

/// Gaps must exceed a neighbouring gap by more than this to count as word gaps.
const WORD_GAP_CONTRAST: f32 = 1.0;

fn overlaps_graphics(area: &Area, lane: &Rect) -> bool {
    area.any::<Figure>(SpatialPredicate::OverlappedBy, lane)
        || area.any::<Shape>(SpatialPredicate::OverlappedBy, lane)
}

/// Page to text blocks: lanes free of characters, figures and shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRule {
    min_width: f32,
    min_height: f32,
}

impl PageRule {
    /// Create the rule from the document's character dimensions.
    pub fn new(dimension: &DimensionStatistic, options: &SegmentOptions) -> Result<Self> {
        check_non_negative("page_lane_width_factor", options.page_lane_width_factor)?;
        check_non_negative("page_lane_height_factor", options.page_lane_height_factor)?;
        Ok(Self {
            min_width: options.page_lane_width_factor * dimension.most_common_width,
            min_height: options.page_lane_height_factor * dimension.most_common_height,
        })
    }

    /// Minimum width of a vertical lane.
    pub fn min_width(&self) -> f32 {
        self.min_width
    }

    /// Minimum height of a horizontal lane.
    pub fn min_height(&self) -> f32 {
        self.min_height
    }
}

impl CutRule for PageRule {
    fn name(&self) -> &'static str {
        "page"
    }

    fn vertical_lane(&self, _area: &Area) -> Option<LaneSpec> {
        Some(LaneSpec::new(self.min_width, SweepDirection::LeftToRight))
    }

    fn horizontal_lane(&self, _area: &Area) -> Option<LaneSpec> {
        Some(LaneSpec::new(self.min_height, SweepDirection::TopToBottom))
    }

    fn is_valid_lane(&self, area: &Area, lane: &Rect, _axis: Axis) -> bool {
        !area.any::<Character>(SpatialPredicate::OverlappedBy, lane)
            && !overlaps_graphics(area, lane)
    }
}

/// Text-less page to groups of figures and shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphicsPageRule {
    size: f32,
}

impl GraphicsPageRule {
    /// Create the rule with a fixed lane size.
    pub fn new(size: f32) -> Result<Self> {
        check_non_negative("graphics_lane_size", size)?;
        Ok(Self { size })
    }
}

impl CutRule for GraphicsPageRule {
    fn name(&self) -> &'static str {
        "graphics"
    }

    fn vertical_lane(&self, _area: &Area) -> Option<LaneSpec> {
        Some(LaneSpec::new(self.size, SweepDirection::LeftToRight))
    }

    fn horizontal_lane(&self, _area: &Area) -> Option<LaneSpec> {
        Some(LaneSpec::new(self.size, SweepDirection::TopToBottom))
    }

    fn is_valid_lane(&self, area: &Area, lane: &Rect, _axis: Axis) -> bool {
        !overlaps_graphics(area, lane)
    }
}

/// Text block to lines: horizontal lanes only.
///
/// A lane may cross ascenders and descenders as long as every crossed
/// character has a neighbour in its row that is neither and stays clear of
/// the lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockRule {
    size: f32,
}

impl BlockRule {
    /// Create the rule with the given probe and minimum lane size.
    pub fn new(size: f32) -> Result<Self> {
        check_non_negative("block_lane_size", size)?;
        Ok(Self { size })
    }
}

impl CutRule for BlockRule {
    fn name(&self) -> &'static str {
        "block"
    }

    fn vertical_lane(&self, _area: &Area) -> Option<LaneSpec> {
        None
    }

    fn horizontal_lane(&self, _area: &Area) -> Option<LaneSpec> {
        Some(LaneSpec::new(self.size, SweepDirection::TopToBottom))
    }

    fn is_valid_lane(&self, area: &Area, lane: &Rect, _axis: Axis) -> bool {
        let crossed = area.query::<Character>(SpatialPredicate::OverlappedBy, lane);
        crossed.iter().all(|ch| {
            (ch.is_ascender() || ch.is_descender()) && row_has_anchor(area, ch, lane)
        })
    }
}

/// Whether the row of `ch` holds a plain character clear of `lane`.
fn row_has_anchor(area: &Area, ch: &Character, lane: &Rect) -> bool {
    let Some(bounds) = area.rect() else {
        return false;
    };
    let row = Rect::new(bounds.min_x, ch.rect.min_y, bounds.max_x, ch.rect.max_y);
    area.query::<Character>(SpatialPredicate::OverlappedBy, &row)
        .iter()
        .any(|other| {
            !other.is_ascender()
                && !other.is_descender()
                && (other.rect.max_y < lane.min_y || other.rect.min_y > lane.max_y)
        })
}

/// Text line to words: vertical lanes free of characters, at least a
/// fraction of the estimated word gap wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineRule {
    factor: f32,
    fallback_factor: f32,
}

impl LineRule {
    /// Create the rule from the word lane factor and the fallback gap factor.
    pub fn new(factor: f32, fallback_factor: f32) -> Result<Self> {
        check_non_negative("word_lane_factor", factor)?;
        check_non_negative("word_gap_fallback_factor", fallback_factor)?;
        Ok(Self {
            factor,
            fallback_factor,
        })
    }

    /// Estimate the whitespace width between words of a line.
    ///
    /// The estimate is the most common gap between neighbouring characters
    /// among the gaps that are wider than an adjacent gap by more than one
    /// unit. Lines without such contrast fall back to a fraction of their
    /// most common font size.
    pub fn word_gap(&self, area: &Area) -> f32 {
        let mut rects: Vec<Rect> = area.characters().iter().map(|c| c.rect).collect();
        rects.sort_by(|a, b| a.min_x.total_cmp(&b.min_x));
        let gaps: Vec<f32> = rects
            .windows(2)
            .map(|w| (w[1].min_x - w[0].max_x).max(0.0))
            .collect();

        let mut candidates = Frequencies::new(area.config().statistics.precision);
        for (i, gap) in gaps.iter().enumerate() {
            let wider_than_prev = i > 0 && *gap > gaps[i - 1] + WORD_GAP_CONTRAST;
            let wider_than_next = i + 1 < gaps.len() && *gap > gaps[i + 1] + WORD_GAP_CONTRAST;
            if wider_than_prev || wider_than_next {
                candidates.add(*gap);
            }
        }

        candidates
            .most_common()
            .unwrap_or_else(|| self.fallback_factor * area.text_statistic().most_common_font_size)
    }
}

impl CutRule for LineRule {
    fn name(&self) -> &'static str {
        "line"
    }

    fn vertical_lane(&self, area: &Area) -> Option<LaneSpec> {
        let width = self.factor * self.word_gap(area);
        Some(LaneSpec::new(width, SweepDirection::LeftToRight))
    }

    fn horizontal_lane(&self, _area: &Area) -> Option<LaneSpec> {
        None
    }

    fn is_valid_lane(&self, area: &Area, lane: &Rect, _axis: Axis) -> bool {
        !area.any::<Character>(SpatialPredicate::OverlappedBy, lane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Cutter;

    fn glyph(text: &str, x: f32, y: f32, w: f32, h: f32) -> Character {
        Character::new(text, Rect::from_size(x, y, w, h), 1, 10.0)
    }

    /// Characters of a line of text starting at `x`, 5 units per glyph.
    fn text_row(area: &mut Area, text: &str, x: f32, y: f32) {
        for (i, c) in text.chars().enumerate() {
            if c != ' ' {
                area.insert(glyph(&c.to_string(), x + 5.0 * i as f32, y, 5.0, 7.0));
            }
        }
    }

    #[test]
    fn test_page_rule_dimensions() {
        let dimension = DimensionStatistic {
            most_common_width: 5.0,
            most_common_height: 7.0,
            ..Default::default()
        };
        let rule = PageRule::new(&dimension, &SegmentOptions::default()).unwrap();
        assert_eq!(rule.min_width(), 10.0);
        assert_eq!(rule.min_height(), 7.0);

        let bad = SegmentOptions::default().with_page_lane_factors(-1.0, 1.0);
        assert!(PageRule::new(&dimension, &bad).is_err());
    }

    #[test]
    fn test_page_rule_respects_shapes() {
        let mut area = Area::default();
        area.insert(glyph("a", 0.0, 0.0, 5.0, 7.0));
        area.insert(glyph("b", 100.0, 0.0, 5.0, 7.0));
        let lane = Rect::new(20.0, 0.0, 40.0, 7.0);
        let dimension = DimensionStatistic::default();
        let rule = PageRule::new(&dimension, &SegmentOptions::default()).unwrap();
        assert!(rule.is_valid_lane(&area, &lane, Axis::Vertical));

        area.insert(Shape::new(Rect::new(0.0, 3.0, 105.0, 4.0), 0));
        assert!(!rule.is_valid_lane(&area, &lane, Axis::Vertical));
    }

    #[test]
    fn test_block_rule_crosses_ascenders() {
        // "ah" with a tall h: a lane through the top of h alone is valid.
        let mut area = Area::default();
        area.insert(glyph("a", 0.0, 0.0, 5.0, 5.0));
        area.insert(glyph("h", 5.0, 0.0, 5.0, 7.0));
        let rule = BlockRule::new(0.5).unwrap();
        assert!(rule.is_valid_lane(&area, &Rect::new(0.0, 6.0, 10.0, 6.5), Axis::Horizontal));
        // Through the x-height both characters are crossed.
        assert!(!rule.is_valid_lane(&area, &Rect::new(0.0, 3.0, 10.0, 3.5), Axis::Horizontal));
    }

    #[test]
    fn test_block_rule_needs_anchor() {
        // Only ascenders in the row: nothing anchors it.
        let mut area = Area::default();
        area.insert(glyph("h", 0.0, 0.0, 5.0, 7.0));
        area.insert(glyph("l", 5.0, 0.0, 5.0, 7.0));
        let rule = BlockRule::new(0.5).unwrap();
        assert!(!rule.is_valid_lane(&area, &Rect::new(0.0, 6.0, 10.0, 6.5), Axis::Horizontal));
    }

    #[test]
    fn test_block_rule_splits_lines() {
        let mut area = Area::default();
        text_row(&mut area, "one line", 0.0, 20.0);
        text_row(&mut area, "two line", 0.0, 8.0);
        let lines = Cutter::default().cut(area, &BlockRule::new(0.5).unwrap());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].rect().map(|r| r.min_y), Some(20.0));
        assert_eq!(lines[1].rect().map(|r| r.min_y), Some(8.0));
    }

    #[test]
    fn test_line_rule_word_gap() {
        let mut area = Area::default();
        text_row(&mut area, "ab cd ef", 0.0, 0.0);
        let rule = LineRule::new(0.5, 0.25).unwrap();
        assert_eq!(rule.word_gap(&area), 5.0);

        let words = Cutter::default().cut(area, &rule);
        assert_eq!(words.len(), 3);
        assert!(words.iter().all(|w| w.characters().len() == 2));
    }

    #[test]
    fn test_line_rule_fallback_gap() {
        let mut area = Area::default();
        text_row(&mut area, "word", 0.0, 0.0);
        let rule = LineRule::new(0.5, 0.25).unwrap();
        assert_eq!(rule.word_gap(&area), 2.5);
        assert_eq!(Cutter::default().cut(area, &rule).len(), 1);
    }

    #[test]
    fn test_graphics_rule_groups_figures() {
        let mut area = Area::default();
        area.insert(Figure::new(Rect::new(0.0, 0.0, 100.0, 100.0)));
        area.insert(Figure::new(Rect::new(102.0, 0.0, 200.0, 100.0)));
        area.insert(Figure::new(Rect::new(0.0, 300.0, 200.0, 400.0)));
        let groups = Cutter::default().cut(area, &GraphicsPageRule::new(5.0).unwrap());
        // The 2-unit gap is too narrow; the 200-unit gap separates.
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].figures().len(), 1);
        assert_eq!(groups[1].figures().len(), 2);
    }
}
