//! Classifier vocabularies, patterns and tolerances.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, Result};
use crate::model::Role;

/// Default figure caption pattern (e.g., "Figure 3:", "Fig. IV").
pub const DEFAULT_FIGURE_CAPTION: &str = r"^\s*(?i:fig(?:ure)?\.?|abbildung)\s*(?:\d+|[IVXLC]+)\b";

/// Default table caption pattern (e.g., "Table 2.", "Tab. III").
pub const DEFAULT_TABLE_CAPTION: &str = r"^\s*(?i:tab(?:le)?\.?|tabelle)\s*(?:\d+|[IVXLC]+)\b";

/// Configuration of the role classifier pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Known section heading texts, in any case or numbering
    pub headings: BTreeSet<String>,

    /// Heading texts that open a section, with the section's role
    pub sections: BTreeMap<String, Role>,

    /// Pattern of figure captions
    pub figure_caption_pattern: String,

    /// Pattern of table captions
    pub table_caption_pattern: String,

    /// Known headings must be larger than the most common font size by more than this
    pub heading_size_margin: f32,

    /// Rise of a footnote mark above the baseline
    pub footnote_raise_tolerance: f32,

    /// Minimum number of pages before running headers and footers are detected
    pub min_pages_for_margins: usize,

    /// Label unclassified blocks as OTHER
    pub fallback: bool,
}

impl ClassifierConfig {
    /// Create a configuration with the default vocabularies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a known heading.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.headings.insert(heading.into());
        self
    }

    /// Add a heading that opens a section with `role`.
    pub fn with_section(mut self, heading: impl Into<String>, role: Role) -> Self {
        self.sections.insert(heading.into(), role);
        self
    }

    /// Enable or disable the OTHER fallback.
    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// Set the minimum page count for header/footer detection.
    pub fn with_min_pages_for_margins(mut self, pages: usize) -> Self {
        self.min_pages_for_margins = pages;
        self
    }

    /// Check the tolerances.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("heading_size_margin", self.heading_size_margin)?;
        check_non_negative("footnote_raise_tolerance", self.footnote_raise_tolerance)?;
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let headings = [
            "introduction",
            "background",
            "related work",
            "method",
            "methods",
            "methodology",
            "approach",
            "experiments",
            "evaluation",
            "results",
            "discussion",
            "conclusion",
            "conclusions",
            "future work",
            "summary",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let sections = [
            ("abstract", Role::Abstract),
            ("keywords", Role::Keywords),
            ("key words", Role::Keywords),
            ("index terms", Role::Keywords),
            ("categories and subject descriptors", Role::Categories),
            ("ccs concepts", Role::Categories),
            ("general terms", Role::GeneralTerms),
            ("acknowledgments", Role::Acknowledgments),
            ("acknowledgements", Role::Acknowledgments),
            ("acknowledgment", Role::Acknowledgments),
            ("acknowledgement", Role::Acknowledgments),
            ("appendix", Role::Appendix),
            ("appendices", Role::Appendix),
            ("references", Role::Reference),
            ("bibliography", Role::Reference),
            ("literature", Role::Reference),
        ]
        .into_iter()
        .map(|(text, role)| (text.to_string(), role))
        .collect();

        Self {
            headings,
            sections,
            figure_caption_pattern: DEFAULT_FIGURE_CAPTION.to_string(),
            table_caption_pattern: DEFAULT_TABLE_CAPTION.to_string(),
            heading_size_margin: 1.0,
            footnote_raise_tolerance: 1.0,
            min_pages_for_margins: 2,
            fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let config = ClassifierConfig::default();
        assert!(config.headings.contains("introduction"));
        assert_eq!(config.sections.get("references"), Some(&Role::Reference));
        assert_eq!(config.sections.get("abstract"), Some(&Role::Abstract));
        assert!(config.fallback);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "sections": { "zusammenfassung": "abstract" },
            "fallback": false
        }"#;
        let config: ClassifierConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.sections.len(), 1);
        assert_eq!(config.sections.get("zusammenfassung"), Some(&Role::Abstract));
        assert!(!config.fallback);
        // Fields not in the file keep their defaults.
        assert_eq!(config.figure_caption_pattern, DEFAULT_FIGURE_CAPTION);
    }

    #[test]
    fn test_invalid_tolerance() {
        let mut config = ClassifierConfig::default();
        config.footnote_raise_tolerance = -2.0;
        assert!(config.validate().is_err());
    }
}
