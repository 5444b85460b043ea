//! End-to-end layout analysis of a primitive dump.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::area::AreaConfig;
use crate::classify::{ClassifierConfig, ClassifierPipeline};
use crate::error::Result;
use crate::model::{Document, DocumentStatistics, Page, RawDocument};
use crate::segment::{ParagraphAssembler, ParagraphOptions, SegmentOptions, Segmenter};
use crate::stats::{DimensionStatistic, StatisticsConfig};

/// Options for [`Analyzer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeOptions {
    /// Rounding and support of every statistic
    pub statistics: StatisticsConfig,

    /// Lane sizes of the page, block and line cuts
    pub segmentation: SegmentOptions,

    /// Paragraph break tolerances
    pub paragraphs: ParagraphOptions,

    /// Role vocabularies and patterns
    pub classification: ClassifierConfig,

    /// Segment pages in parallel
    pub parallel: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            statistics: StatisticsConfig::default(),
            segmentation: SegmentOptions::default(),
            paragraphs: ParagraphOptions::default(),
            classification: ClassifierConfig::default(),
            parallel: true,
        }
    }
}

impl AnalyzeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read options from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read options from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Set the statistics parameters.
    pub fn with_statistics(mut self, statistics: StatisticsConfig) -> Self {
        self.statistics = statistics;
        self
    }

    /// Set the segmentation options.
    pub fn with_segmentation(mut self, segmentation: SegmentOptions) -> Self {
        self.segmentation = segmentation;
        self
    }

    /// Set the paragraph options.
    pub fn with_paragraphs(mut self, paragraphs: ParagraphOptions) -> Self {
        self.paragraphs = paragraphs;
        self
    }

    /// Set the classifier configuration.
    pub fn with_classification(mut self, classification: ClassifierConfig) -> Self {
        self.classification = classification;
        self
    }

    /// Process pages sequentially.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    fn area_config(&self) -> AreaConfig {
        AreaConfig::default()
            .with_statistics(self.statistics)
            .with_index(self.segmentation.index)
    }
}

/// Turns a [`RawDocument`] into a segmented and labeled [`Document`].
///
/// Every option is validated and every pattern compiled at construction, so
/// one analyzer can process many documents.
#[derive(Debug)]
pub struct Analyzer {
    options: AnalyzeOptions,
    segmenter: Segmenter,
    assembler: ParagraphAssembler,
    pipeline: ClassifierPipeline,
}

impl Analyzer {
    /// Create an analyzer.
    pub fn new(options: AnalyzeOptions) -> Result<Self> {
        let config = options.area_config();
        Ok(Self {
            segmenter: Segmenter::new(options.segmentation, config)?,
            assembler: ParagraphAssembler::new(options.paragraphs.clone(), config)?,
            pipeline: ClassifierPipeline::new(&options.classification)?,
            options,
        })
    }

    /// The options in use.
    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    /// The classifier pipeline in use.
    pub fn pipeline(&self) -> &ClassifierPipeline {
        &self.pipeline
    }

    /// Segment, assemble and classify `raw`.
    pub fn analyze(&self, raw: &RawDocument) -> Result<Document> {
        let raw = raw.with_merged_colors();
        let statistics = &self.options.statistics;
        // Only glyphs an area would accept may size the page lanes.
        let characters: Vec<_> = raw
            .pages
            .iter()
            .flat_map(|p| p.text_characters())
            .filter(|c| c.rect.is_well_formed())
            .collect();
        let dimension = DimensionStatistic::compute(characters.iter().map(|c| &c.rect), statistics);
        log::debug!(
            "Document: {} pages, {} characters, most common glyph {}x{}",
            raw.pages.len(),
            dimension.samples,
            dimension.most_common_width,
            dimension.most_common_height
        );

        let mut pages: Vec<Page> = if self.options.parallel {
            raw.pages
                .par_iter()
                .map(|page| self.segmenter.segment_page(page, &dimension))
                .collect::<Result<_>>()?
        } else {
            raw.pages
                .iter()
                .map(|page| self.segmenter.segment_page(page, &dimension))
                .collect::<Result<_>>()?
        };

        let document_statistics = DocumentStatistics::compute(&pages, statistics);
        if self.options.parallel {
            pages
                .par_iter_mut()
                .for_each(|page| self.assembler.assemble_page(page, &document_statistics));
        } else {
            for page in &mut pages {
                self.assembler.assemble_page(page, &document_statistics);
            }
        }

        let document = Document::from_parts(
            pages,
            raw.fonts.clone(),
            raw.colors.clone(),
            document_statistics,
            statistics,
        );
        self.pipeline.run(&document);
        Ok(document)
    }

    /// Read a primitive dump from a JSON file and analyze it.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let raw = RawDocument::from_path(path)?;
        self.analyze(&raw)
    }
}
