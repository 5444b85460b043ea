//! Segmentation and paragraph assembly options.

use serde::{Deserialize, Serialize};

use crate::area::IndexKind;
use crate::error::{check_non_negative, Error, Result};

/// Default pattern of a bibliography entry anchor such as `[12] `.
pub const DEFAULT_REFERENCE_ANCHOR: &str = r"^\s*\[\d+\]\s";

/// Options for the recursive partitioner and its rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentOptions {
    /// Distance between probe positions while sweeping
    pub lane_step: f32,

    /// Minimum page lane width as a multiple of the most common character width
    pub page_lane_width_factor: f32,

    /// Minimum page lane height as a multiple of the most common character height
    pub page_lane_height_factor: f32,

    /// Minimum lane size between figure and shape groups on text-less pages
    pub graphics_lane_size: f32,

    /// Probe and minimum size of lanes between lines
    pub block_lane_size: f32,

    /// Minimum word lane width as a multiple of the estimated word gap
    pub word_lane_factor: f32,

    /// Word gap estimate, as a multiple of the font size, when no gap stands out
    pub word_gap_fallback_factor: f32,

    /// Spatial index implementation for all areas
    pub index: IndexKind,
}

impl SegmentOptions {
    /// Create new segmentation options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sweep step.
    pub fn with_lane_step(mut self, step: f32) -> Self {
        self.lane_step = step;
        self
    }

    /// Set the page lane factors (width, height).
    pub fn with_page_lane_factors(mut self, width: f32, height: f32) -> Self {
        self.page_lane_width_factor = width;
        self.page_lane_height_factor = height;
        self
    }

    /// Set the minimum lane size on text-less pages.
    pub fn with_graphics_lane_size(mut self, size: f32) -> Self {
        self.graphics_lane_size = size;
        self
    }

    /// Set the lane size between lines.
    pub fn with_block_lane_size(mut self, size: f32) -> Self {
        self.block_lane_size = size;
        self
    }

    /// Set the word lane factor.
    pub fn with_word_lane_factor(mut self, factor: f32) -> Self {
        self.word_lane_factor = factor;
        self
    }

    /// Set the spatial index implementation.
    pub fn with_index(mut self, index: IndexKind) -> Self {
        self.index = index;
        self
    }

    /// Check that every factor is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.lane_step.is_finite() && self.lane_step > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "lane_step must be a finite positive number, got {}",
                self.lane_step
            )));
        }
        check_non_negative("page_lane_width_factor", self.page_lane_width_factor)?;
        check_non_negative("page_lane_height_factor", self.page_lane_height_factor)?;
        check_non_negative("graphics_lane_size", self.graphics_lane_size)?;
        check_non_negative("block_lane_size", self.block_lane_size)?;
        check_non_negative("word_lane_factor", self.word_lane_factor)?;
        check_non_negative("word_gap_fallback_factor", self.word_gap_fallback_factor)?;
        Ok(())
    }
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            lane_step: 0.5,
            page_lane_width_factor: 2.0,
            page_lane_height_factor: 1.0,
            graphics_lane_size: 5.0,
            block_lane_size: 0.5,
            word_lane_factor: 0.5,
            word_gap_fallback_factor: 0.25,
            index: IndexKind::default(),
        }
    }
}

/// Tolerances of the paragraph assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphOptions {
    /// Right-margin shortfall, in character widths, that ends a justified paragraph
    pub right_margin_tolerance: f32,

    /// Left-edge difference, in character widths, that counts as indentation
    pub indent_tolerance: f32,

    /// Font size difference in points that separates paragraphs
    pub font_size_tolerance: f32,

    /// Excess over the usual line pitch that separates paragraphs
    pub pitch_tolerance: f32,

    /// How far a line must extend past a one-line heading above it
    pub heading_extension_tolerance: f32,

    /// Pattern matching the anchor of a bibliography entry
    pub reference_anchor_pattern: String,
}

impl ParagraphOptions {
    /// Create new paragraph options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the right-margin tolerance.
    pub fn with_right_margin_tolerance(mut self, tolerance: f32) -> Self {
        self.right_margin_tolerance = tolerance;
        self
    }

    /// Set the indentation tolerance.
    pub fn with_indent_tolerance(mut self, tolerance: f32) -> Self {
        self.indent_tolerance = tolerance;
        self
    }

    /// Set the font size tolerance.
    pub fn with_font_size_tolerance(mut self, tolerance: f32) -> Self {
        self.font_size_tolerance = tolerance;
        self
    }

    /// Set the pitch tolerance.
    pub fn with_pitch_tolerance(mut self, tolerance: f32) -> Self {
        self.pitch_tolerance = tolerance;
        self
    }

    /// Set the reference anchor pattern.
    pub fn with_reference_anchor(mut self, pattern: impl Into<String>) -> Self {
        self.reference_anchor_pattern = pattern.into();
        self
    }

    /// Check that every tolerance is usable.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("right_margin_tolerance", self.right_margin_tolerance)?;
        check_non_negative("indent_tolerance", self.indent_tolerance)?;
        check_non_negative("font_size_tolerance", self.font_size_tolerance)?;
        check_non_negative("pitch_tolerance", self.pitch_tolerance)?;
        check_non_negative("heading_extension_tolerance", self.heading_extension_tolerance)?;
        Ok(())
    }
}

impl Default for ParagraphOptions {
    fn default() -> Self {
        Self {
            right_margin_tolerance: 2.0,
            indent_tolerance: 1.0,
            font_size_tolerance: 0.5,
            pitch_tolerance: 1.0,
            heading_extension_tolerance: 1.0,
            reference_anchor_pattern: DEFAULT_REFERENCE_ANCHOR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_options_builder() {
        let options = SegmentOptions::new()
            .with_lane_step(0.25)
            .with_page_lane_factors(3.0, 1.5)
            .with_index(IndexKind::Scan);
        assert_eq!(options.lane_step, 0.25);
        assert_eq!(options.page_lane_width_factor, 3.0);
        assert_eq!(options.page_lane_height_factor, 1.5);
        assert_eq!(options.index, IndexKind::Scan);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_invalid_segment_options() {
        assert!(SegmentOptions::new().with_lane_step(0.0).validate().is_err());
        assert!(SegmentOptions::new()
            .with_word_lane_factor(-0.5)
            .validate()
            .is_err());
        assert!(SegmentOptions::new()
            .with_graphics_lane_size(f32::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_paragraph_options_defaults() {
        let options = ParagraphOptions::default();
        assert_eq!(options.right_margin_tolerance, 2.0);
        assert_eq!(options.font_size_tolerance, 0.5);
        assert_eq!(options.reference_anchor_pattern, DEFAULT_REFERENCE_ANCHOR);
        assert!(options.validate().is_ok());
        assert!(options.with_pitch_tolerance(-1.0).validate().is_err());
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: SegmentOptions = serde_json::from_str(r#"{ "lane_step": 1.0 }"#).unwrap();
        assert_eq!(options.lane_step, 1.0);
        assert_eq!(options.word_lane_factor, 0.5);
    }
}
