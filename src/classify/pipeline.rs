//! The ordered list of role modules.

use regex::Regex;

use super::body::{BodyTextModule, FallbackModule};
use super::caption::CaptionModule;
use super::config::ClassifierConfig;
use super::footnote::FootnoteModule;
use super::heading::HeadingFontModule;
use super::margins::PageMarginModule;
use super::sections::SectionModule;
use super::table::TableModule;
use super::title::TitleModule;
use crate::error::{Error, Result};
use crate::model::{Document, Role};

/// One step of the classifier pipeline.
///
/// Modules only assign roles to blocks that have none; roles are write-once.
pub trait RoleModule: Send + Sync {
    /// Short module name (e.g., "title").
    fn name(&self) -> &'static str;

    /// Assign roles over the whole document.
    fn run(&self, document: &Document);
}

/// Runs role modules over a document in a fixed order.
pub struct ClassifierPipeline {
    modules: Vec<Box<dyn RoleModule>>,
}

impl std::fmt::Debug for ClassifierPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierPipeline")
            .field("modules", &self.module_names())
            .finish()
    }
}

impl ClassifierPipeline {
    /// Build the default pipeline from `config`.
    ///
    /// Patterns are compiled here; an invalid one fails construction.
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        config.validate()?;
        let figure = compile("figure_caption_pattern", &config.figure_caption_pattern)?;
        let table = compile("table_caption_pattern", &config.table_caption_pattern)?;

        let mut modules: Vec<Box<dyn RoleModule>> = vec![
            Box::new(PageMarginModule::new(config.min_pages_for_margins)),
            Box::new(TitleModule),
            Box::new(HeadingFontModule::new(config)),
            Box::new(CaptionModule::new(figure, table)),
            Box::new(FootnoteModule::new(config.footnote_raise_tolerance)),
            Box::new(TableModule),
            Box::new(SectionModule::new("abstract", Role::Abstract)),
            Box::new(SectionModule::new("acknowledgments", Role::Acknowledgments)),
            Box::new(SectionModule::new("appendix", Role::Appendix)),
            Box::new(SectionModule::new("keywords", Role::Keywords)),
            Box::new(SectionModule::new("references", Role::Reference)),
            Box::new(SectionModule::new("categories", Role::Categories)),
            Box::new(SectionModule::new("general-terms", Role::GeneralTerms)),
            Box::new(BodyTextModule),
        ];
        if config.fallback {
            modules.push(Box::new(FallbackModule));
        }
        Ok(Self { modules })
    }

    /// Build a pipeline from an explicit module list.
    pub fn with_modules(modules: Vec<Box<dyn RoleModule>>) -> Self {
        Self { modules }
    }

    /// Names of the modules in execution order.
    pub fn module_names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    /// Run every module in order.
    pub fn run(&self, document: &Document) {
        for module in &self.modules {
            let before = assigned(document);
            module.run(document);
            log::debug!(
                "Classifier {}: {} blocks labeled",
                module.name(),
                assigned(document) - before
            );
        }
    }
}

fn assigned(document: &Document) -> usize {
    document.blocks().filter(|(_, b)| b.has_role()).count()
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::InvalidPattern {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_module_order() {
        let pipeline = ClassifierPipeline::new(&ClassifierConfig::default()).unwrap();
        assert_eq!(
            pipeline.module_names(),
            vec![
                "page-header-footer",
                "title",
                "heading-font",
                "caption",
                "footnote",
                "table",
                "abstract",
                "acknowledgments",
                "appendix",
                "keywords",
                "references",
                "categories",
                "general-terms",
                "body-text",
                "fallback",
            ]
        );
    }

    #[test]
    fn test_fallback_is_optional() {
        let config = ClassifierConfig::default().with_fallback(false);
        let pipeline = ClassifierPipeline::new(&config).unwrap();
        assert_eq!(pipeline.module_names().last(), Some(&"body-text"));
    }

    #[test]
    fn test_invalid_pattern_fails_construction() {
        let mut config = ClassifierConfig::default();
        config.table_caption_pattern = "(unclosed".to_string();
        match ClassifierPipeline::new(&config) {
            Err(Error::InvalidPattern { name, .. }) => assert_eq!(name, "table_caption_pattern"),
            other => panic!("unexpected result: {:?}", other.map(|p| p.module_names())),
        }
    }
}
