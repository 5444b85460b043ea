//! Semantic roles of text blocks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Semantic role of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Document title
    Title,
    /// Section heading
    Heading,
    /// Abstract section
    Abstract,
    /// Keywords section
    Keywords,
    /// ACM-style categories section
    Categories,
    /// ACM-style general terms section
    GeneralTerms,
    /// Running body text
    BodyText,
    /// Figure or table caption
    Caption,
    /// Figure (used as secondary role of captions)
    Figure,
    /// Table
    Table,
    /// Footnote
    Footnote,
    /// Bibliography entry
    Reference,
    /// Acknowledgments section
    Acknowledgments,
    /// Appendix section
    Appendix,
    /// Running page header
    PageHeader,
    /// Running page footer
    PageFooter,
    /// Anything else
    Other,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 17] = [
        Role::Title,
        Role::Heading,
        Role::Abstract,
        Role::Keywords,
        Role::Categories,
        Role::GeneralTerms,
        Role::BodyText,
        Role::Caption,
        Role::Figure,
        Role::Table,
        Role::Footnote,
        Role::Reference,
        Role::Acknowledgments,
        Role::Appendix,
        Role::PageHeader,
        Role::PageFooter,
        Role::Other,
    ];

    /// Upper-case label of the role (e.g., "BODY_TEXT").
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Title => "TITLE",
            Role::Heading => "HEADING",
            Role::Abstract => "ABSTRACT",
            Role::Keywords => "KEYWORDS",
            Role::Categories => "CATEGORIES",
            Role::GeneralTerms => "GENERAL_TERMS",
            Role::BodyText => "BODY_TEXT",
            Role::Caption => "CAPTION",
            Role::Figure => "FIGURE",
            Role::Table => "TABLE",
            Role::Footnote => "FOOTNOTE",
            Role::Reference => "REFERENCE",
            Role::Acknowledgments => "ACKNOWLEDGMENTS",
            Role::Appendix => "APPENDIX",
            Role::PageHeader => "PAGE_HEADER",
            Role::PageFooter => "PAGE_FOOTER",
            Role::Other => "OTHER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == label)
            .ok_or_else(|| format!("unknown role: {}", s))
    }
}
