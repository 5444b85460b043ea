//! Paragraph assembly from the lines of a text block.
//!
//! Lines are visited in reading order. A line continues the current
//! paragraph unless one of the break rules fires: horizontal misalignment,
//! a short line in a justified block, indentation, consecutive reference
//! anchors, a change of font size or line height, an unusually wide line
//! pitch, or a one-line heading embedded at the top of the block.

use std::sync::Arc;

use regex::Regex;

use crate::area::{AreaConfig, HasRect, SpatialPredicate};
use crate::error::{Error, Result};
use crate::model::{
    DocumentStatistics, Figure, FontFace, Page, Paragraph, Rect, Shape, TextBlock, TextLine,
    TextOptions,
};
use crate::stats::{Frequencies, TextLineStatistic};

use super::options::ParagraphOptions;

/// Why a line starts a new paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphBreak {
    /// The line does not overlap the paragraph horizontally
    Misaligned,
    /// The previous line ends short of the justified right margin
    ShortLine,
    /// The line is indented relative to the paragraph
    Indented,
    /// Both lines start with a reference anchor
    ReferenceAnchor,
    /// The font size changes
    FontSize,
    /// The line height changes
    LineHeight,
    /// The line pitch is wider than usual
    LinePitch,
    /// The previous line is a heading embedded in the block
    EmbeddedHeading,
}

/// Page-level values the break rules compare against.
#[derive(Debug, Clone, Copy)]
struct PageContext {
    char_width: f32,
    line_pitch: Option<f32>,
    baseline_pitch: Option<f32>,
    face: Option<FontFace>,
    precision: u32,
}

/// Groups the lines of each block into paragraphs.
#[derive(Debug, Clone)]
pub struct ParagraphAssembler {
    options: ParagraphOptions,
    anchor: Regex,
    config: AreaConfig,
}

impl ParagraphAssembler {
    /// Create an assembler, compiling the reference anchor pattern.
    pub fn new(options: ParagraphOptions, config: AreaConfig) -> Result<Self> {
        options.validate()?;
        let anchor =
            Regex::new(&options.reference_anchor_pattern).map_err(|source| Error::InvalidPattern {
                name: "reference_anchor_pattern".to_string(),
                source,
            })?;
        Ok(Self {
            options,
            anchor,
            config,
        })
    }

    /// Assemble the paragraphs of every block of `page` and insert them into
    /// the page area.
    pub fn assemble_page(&self, page: &mut Page, statistics: &DocumentStatistics) {
        let context = page_context(page, statistics);

        let mut paragraphs = Vec::new();
        for (index, block) in page.blocks().iter().enumerate() {
            let tag = format!("page {} block {}", page.number, index + 1);
            for lines in self.group_lines(page, block, &context) {
                let paragraph = Paragraph::new(lines, Arc::clone(block), tag.clone(), &self.config);
                paragraphs.push(paragraph);
            }
        }

        log::debug!(
            "Page {}: {} paragraphs from {} blocks",
            page.number,
            paragraphs.len(),
            page.blocks().len()
        );
        page.area_mut().extend(paragraphs);
    }

    fn group_lines(
        &self,
        page: &Page,
        block: &TextBlock,
        context: &PageContext,
    ) -> Vec<Vec<Arc<TextLine>>> {
        let margin = self.justified_margin(block, context);
        let mut groups: Vec<Vec<Arc<TextLine>>> = Vec::new();
        let mut current: Vec<Arc<TextLine>> = Vec::new();

        for line in block.lines() {
            if let Some(reason) = self.break_before(page, &current, line, margin, context) {
                log::debug!(
                    "Page {}: paragraph break before {:?} ({:?})",
                    page.number,
                    line.text(&TextOptions::default()),
                    reason
                );
                groups.push(std::mem::take(&mut current));
            }
            current.push(Arc::clone(line));
        }
        if !current.is_empty() {
            groups.push(current);
        }
        groups
    }

    /// The common right edge of the block if more than half of its lines end there.
    fn justified_margin(&self, block: &TextBlock, context: &PageContext) -> Option<f32> {
        let margin = block.area().position_statistic().most_common_max_x?;
        let tolerance = self.options.right_margin_tolerance * context.char_width;
        let lines = block.lines();
        let flush = lines
            .iter()
            .filter(|l| (l.rect().max_x - margin).abs() <= tolerance)
            .count();
        (flush * 2 > lines.len()).then_some(margin)
    }

    /// Decide whether `line` starts a new paragraph after `current`.
    fn break_before(
        &self,
        page: &Page,
        current: &[Arc<TextLine>],
        line: &TextLine,
        margin: Option<f32>,
        context: &PageContext,
    ) -> Option<ParagraphBreak> {
        let prev = current.last()?;
        let prev_rect = prev.rect();
        let rect = line.rect();

        if share_graphic(page, &prev_rect, &rect) {
            return None;
        }

        let bounds = current.iter().map(|l| l.rect()).reduce(|a, b| a.union(&b))?;
        if !rect.overlaps_horizontally(&bounds) {
            return Some(ParagraphBreak::Misaligned);
        }

        let char_width = context.char_width;
        if let Some(margin) = margin {
            if margin - prev_rect.max_x > self.options.right_margin_tolerance * char_width {
                return Some(ParagraphBreak::ShortLine);
            }
        }

        let indent = self.options.indent_tolerance * char_width;
        if current.len() == 1 {
            if rect.min_x - prev_rect.min_x > indent {
                return Some(ParagraphBreak::Indented);
            }
        } else {
            let continuation = Frequencies::from_values(
                current[1..].iter().map(|l| l.rect().min_x),
                context.precision,
            )
            .most_common();
            if let Some(left) = continuation {
                if (rect.min_x - left).abs() > indent {
                    return Some(ParagraphBreak::Indented);
                }
            }
        }

        let options = TextOptions::default();
        let anchored = |l: &TextLine| self.anchor.is_match(&l.text(&options));
        if anchored(prev) && anchored(line) {
            return Some(ParagraphBreak::ReferenceAnchor);
        }

        if (prev.font_size() - line.font_size()).abs() > self.options.font_size_tolerance {
            return Some(ParagraphBreak::FontSize);
        }

        let (h0, h1) = (prev_rect.height(), rect.height());
        if (h0 - h1).abs() > h0.min(h1) {
            return Some(ParagraphBreak::LineHeight);
        }

        if self.wide_pitch(current, prev, line, context) {
            return Some(ParagraphBreak::LinePitch);
        }

        if current.len() == 1 && self.embedded_heading(prev, line, context) {
            return Some(ParagraphBreak::EmbeddedHeading);
        }

        None
    }

    fn wide_pitch(
        &self,
        current: &[Arc<TextLine>],
        prev: &TextLine,
        line: &TextLine,
        context: &PageContext,
    ) -> bool {
        let tolerance = self.options.pitch_tolerance;
        let exceeds = |value: f32, reference: Option<f32>| {
            reference.is_some_and(|r| value > r + tolerance)
        };

        let pitch = prev.rect().min_y - line.rect().min_y;
        let baseline_pitch = prev.baseline().y() - line.baseline().y();
        let page_wide = exceeds(pitch, context.line_pitch)
            && exceeds(baseline_pitch, context.baseline_pitch);
        if !page_wide {
            return false;
        }
        if current.len() < 2 {
            return true;
        }

        let own = TextLineStatistic::compute(
            current.iter().map(|l| (l.rect(), l.baseline().y())),
            &self.config.statistics,
        );
        exceeds(pitch, own.line_pitch()) && exceeds(baseline_pitch, own.baseline_pitch())
    }

    fn embedded_heading(&self, prev: &TextLine, line: &TextLine, context: &PageContext) -> bool {
        let precision = context.precision;
        let same = |a: Option<FontFace>, b: Option<FontFace>| match (a, b) {
            (Some(a), Some(b)) => a.same_as(&b, precision),
            _ => false,
        };
        let prev_face = prev.font_face();
        let tail_face = line.last_word().and_then(|w| w.font_face());

        !same(prev_face, context.face)
            && !same(prev_face, tail_face)
            && line.rect().max_x > prev.rect().max_x + self.options.heading_extension_tolerance
    }
}

fn page_context(page: &Page, statistics: &DocumentStatistics) -> PageContext {
    let page_lines = page.area().text_line_statistic();
    PageContext {
        char_width: statistics.dimension.most_common_width,
        line_pitch: page_lines.line_pitch(),
        baseline_pitch: page_lines.baseline_pitch(),
        face: page.area().text_statistic().most_common_face,
        precision: page.area().config().statistics.precision,
    }
}

/// Whether both rectangles overlap one common figure or shape of the page.
fn share_graphic(page: &Page, a: &Rect, b: &Rect) -> bool {
    let area = page.area();
    area.query::<Figure>(SpatialPredicate::OverlappedBy, a)
        .iter()
        .any(|f| f.rect.overlaps(b))
        || area
            .query::<Shape>(SpatialPredicate::OverlappedBy, a)
            .iter()
            .any(|s| s.rect.overlaps(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Character;
    use crate::stats::StatisticsConfig;

    /// A text line with glyphs 5 units wide, 7 high, at `x`/`y`.
    fn line(text: &str, x: f32, y: f32, font: u32, size: f32) -> Arc<TextLine> {
        tall_line(text, x, y, font, size, 7.0)
    }

    fn tall_line(text: &str, x: f32, y: f32, font: u32, size: f32, height: f32) -> Arc<TextLine> {
        let mut groups = Vec::new();
        let mut word = Vec::new();
        for (i, c) in text.chars().enumerate() {
            if c == ' ' {
                groups.push(std::mem::take(&mut word));
                continue;
            }
            let rect = Rect::from_size(x + 5.0 * i as f32, y, 5.0, height);
            word.push(Arc::new(Character::new(c.to_string(), rect, font, size)));
        }
        groups.push(word);
        Arc::new(TextLine::new(groups, &AreaConfig::default()))
    }

    fn page_with(lines: Vec<Arc<TextLine>>) -> Page {
        page_with_figures(lines, &[])
    }

    fn page_with_figures(lines: Vec<Arc<TextLine>>, figures: &[Rect]) -> Page {
        let config = AreaConfig::default();
        let mut page = Page::new(1, 612.0, 792.0, &config);
        let block = Arc::new(TextBlock::new(lines.clone(), &config));
        {
            let area = page.area_mut();
            for l in &lines {
                area.extend(l.characters().iter().cloned());
            }
            area.insert(Arc::clone(&block));
            area.extend(lines);
            area.extend(figures.iter().map(|rect| Figure::new(*rect)));
        }
        page
    }

    /// The break reason of every line that starts a new paragraph.
    fn breaks(page: &Page) -> Vec<ParagraphBreak> {
        let stats =
            DocumentStatistics::compute(std::slice::from_ref(page), &StatisticsConfig::default());
        let assembler =
            ParagraphAssembler::new(ParagraphOptions::default(), AreaConfig::default()).unwrap();
        let context = page_context(page, &stats);
        let block = &page.blocks()[0];
        let margin = assembler.justified_margin(block, &context);

        let mut reasons = Vec::new();
        let mut current: Vec<Arc<TextLine>> = Vec::new();
        for line in block.lines() {
            if let Some(reason) = assembler.break_before(page, &current, line, margin, &context) {
                reasons.push(reason);
                current.clear();
            }
            current.push(Arc::clone(line));
        }
        reasons
    }

    fn assemble(lines: Vec<Arc<TextLine>>) -> Vec<String> {
        let mut page = page_with(lines);
        let stats = DocumentStatistics::compute(
            std::slice::from_ref(&page),
            &StatisticsConfig::default(),
        );
        let assembler =
            ParagraphAssembler::new(ParagraphOptions::default(), AreaConfig::default()).unwrap();
        assembler.assemble_page(&mut page, &stats);
        page.paragraphs()
            .iter()
            .map(|p| p.text(&TextOptions::default()))
            .collect()
    }

    #[test]
    fn test_indentation_starts_paragraph() {
        let paragraphs = assemble(vec![
            line("  first para", 0.0, 100.0, 1, 10.0),
            line("goes on here", 0.0, 88.0, 1, 10.0),
            line("and ends", 0.0, 76.0, 1, 10.0),
            line("  second one", 0.0, 64.0, 1, 10.0),
            line("ends as well", 0.0, 52.0, 1, 10.0),
        ]);
        assert_eq!(
            paragraphs,
            vec![
                "first para goes on here and ends".to_string(),
                "second one ends as well".to_string()
            ]
        );
    }

    #[test]
    fn test_indented_second_line() {
        let lines = vec![
            line("aaaa bbbb", 0.0, 100.0, 1, 10.0),
            line("cccc dddd", 20.0, 88.0, 1, 10.0),
        ];
        assert_eq!(breaks(&page_with(lines.clone())), vec![ParagraphBreak::Indented]);
        assert_eq!(assemble(lines), vec!["aaaa bbbb", "cccc dddd"]);
    }

    #[test]
    fn test_misaligned_line_starts_paragraph() {
        let page = page_with(vec![
            line("aaaa bbbb", 0.0, 100.0, 1, 10.0),
            line("cccc dddd", 100.0, 88.0, 1, 10.0),
        ]);
        assert_eq!(breaks(&page), vec![ParagraphBreak::Misaligned]);
    }

    #[test]
    fn test_short_line_ends_justified_paragraph() {
        let page = page_with(vec![
            line("aaaaaaaaaa", 0.0, 100.0, 1, 10.0),
            line("bbbbbbbbbb", 0.0, 88.0, 1, 10.0),
            line("cccc", 0.0, 76.0, 1, 10.0),
            line("dddddddddd", 0.0, 64.0, 1, 10.0),
            line("eeeeeeeeee", 0.0, 52.0, 1, 10.0),
        ]);
        assert_eq!(breaks(&page), vec![ParagraphBreak::ShortLine]);
    }

    #[test]
    fn test_line_height_change_starts_paragraph() {
        let page = page_with(vec![
            line("aaaa bbbb", 0.0, 100.0, 1, 10.0),
            tall_line("cccc dddd", 0.0, 80.0, 1, 10.0, 16.0),
        ]);
        assert_eq!(breaks(&page), vec![ParagraphBreak::LineHeight]);
    }

    #[test]
    fn test_embedded_heading_starts_paragraph() {
        let lines = vec![
            line("Results", 0.0, 100.0, 2, 10.0),
            line("the body text here", 0.0, 88.0, 1, 10.0),
        ];
        assert_eq!(breaks(&page_with(lines.clone())), vec![ParagraphBreak::EmbeddedHeading]);
        assert_eq!(assemble(lines), vec!["Results", "the body text here"]);
    }

    #[test]
    fn test_lines_sharing_a_figure_stay_together() {
        let lines = vec![
            line("aaaa bbbb", 0.0, 100.0, 1, 12.0),
            line("cccc dddd", 0.0, 88.0, 1, 10.0),
        ];
        assert_eq!(breaks(&page_with(lines.clone())), vec![ParagraphBreak::FontSize]);

        let figure = Rect::new(0.0, 80.0, 50.0, 110.0);
        assert!(breaks(&page_with_figures(lines, &[figure])).is_empty());
    }

    #[test]
    fn test_uniform_lines_stay_together() {
        let paragraphs = assemble(vec![
            line("aaaa bbbb", 0.0, 100.0, 1, 10.0),
            line("cccc dddd", 0.0, 88.0, 1, 10.0),
            line("eeee ffff", 0.0, 76.0, 1, 10.0),
        ]);
        assert_eq!(paragraphs.len(), 1);
    }

    #[test]
    fn test_font_size_change_starts_paragraph() {
        let paragraphs = assemble(vec![
            line("aaaa bbbb", 0.0, 100.0, 1, 12.0),
            line("cccc dddd", 0.0, 88.0, 1, 10.0),
            line("eeee ffff", 0.0, 76.0, 1, 10.0),
        ]);
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0], "aaaa bbbb");
    }

    #[test]
    fn test_wide_pitch_starts_paragraph() {
        let paragraphs = assemble(vec![
            line("aaaa bbbb", 0.0, 200.0, 1, 10.0),
            line("cccc dddd", 0.0, 188.0, 1, 10.0),
            line("eeee ffff", 0.0, 176.0, 1, 10.0),
            line("gggg hhhh", 0.0, 150.0, 1, 10.0),
            line("iiii jjjj", 0.0, 138.0, 1, 10.0),
        ]);
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[1], "gggg hhhh iiii jjjj");
    }

    #[test]
    fn test_reference_anchors_split_entries() {
        let paragraphs = assemble(vec![
            line("[1] Alpha", 0.0, 100.0, 1, 10.0),
            line("[2] Beta", 0.0, 88.0, 1, 10.0),
            line("[3] Gamma", 0.0, 76.0, 1, 10.0),
        ]);
        assert_eq!(paragraphs.len(), 3);
    }

    #[test]
    fn test_context_tag() {
        let mut page = page_with(vec![line("abc", 0.0, 100.0, 1, 10.0)]);
        let stats =
            DocumentStatistics::compute(std::slice::from_ref(&page), &StatisticsConfig::default());
        ParagraphAssembler::new(ParagraphOptions::default(), AreaConfig::default())
            .unwrap()
            .assemble_page(&mut page, &stats);
        assert_eq!(page.paragraphs()[0].context(), "page 1 block 1");
        assert!(Arc::ptr_eq(page.paragraphs()[0].block(), &page.blocks()[0]));
    }

    #[test]
    fn test_invalid_anchor_pattern() {
        let options = ParagraphOptions::default().with_reference_anchor("([");
        let err = ParagraphAssembler::new(options, AreaConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }
}
