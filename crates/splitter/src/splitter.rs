use std::io::Read;
use std::path::Path;

use serde_yaml::Mapping;

use crate::config::SplitterConfig;
use crate::error::{Result, SplitError};
use crate::frontmatter;
use crate::packer::SectionPacker;
use crate::tokenizer::TokenCounter;
use crate::tree;
use crate::types::{Section, SplitStats};

/// Splits Markdown documents into sections bounded by a token budget.
///
/// One splitter is bound to one tokenizer model; the token cache
/// persists across calls, everything else is rebuilt per document.
pub struct MarkdownSplitter {
    config: SplitterConfig,
    limit: usize,
    counter: TokenCounter,
}

impl MarkdownSplitter {
    /// Create a splitter from a configuration.
    ///
    /// Fails when the configuration is invalid or the tokenizer does
    /// not know the configured model.
    pub fn new(config: SplitterConfig) -> Result<Self> {
        config.validate().map_err(SplitError::invalid_config)?;
        let counter = TokenCounter::new(&config.model)?;
        let limit = config.resolved_limit();
        Ok(Self {
            config,
            limit,
            counter,
        })
    }

    /// Create a splitter with the default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(SplitterConfig::default())
    }

    /// The effective per-section token budget
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &SplitterConfig {
        &self.config
    }

    /// Split a Markdown document supplied as a string
    pub fn split_str(&mut self, md: &str) -> Result<SplitOutput> {
        let (metadata, body) = frontmatter::extract(md)?;

        let mut root = tree::build_tree(body, &mut self.counter);
        let total = root.aggregate_sizes();
        log::debug!("document totals {total} tokens against a limit of {}", self.limit);

        let sections = SectionPacker::new(self.limit, &mut self.counter).pack(&root);
        log::debug!("emitted {} sections", sections.len());

        Ok(SplitOutput { metadata, sections })
    }

    /// Split a Markdown document supplied as a readable stream
    pub fn split_reader(&mut self, mut reader: impl Read) -> Result<SplitOutput> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        self.split_str(&content)
    }

    /// Split a Markdown document supplied as a file path
    pub fn split_file(&mut self, path: impl AsRef<Path>) -> Result<SplitOutput> {
        let content = std::fs::read_to_string(path)?;
        self.split_str(&content)
    }
}

impl std::fmt::Debug for MarkdownSplitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownSplitter")
            .field("model", &self.config.model)
            .field("limit", &self.limit)
            .finish()
    }
}

/// The result of one split operation: the ordered sections plus any
/// front matter found ahead of the body
#[derive(Debug, Clone)]
pub struct SplitOutput {
    /// Parsed front matter, when the document carried a metadata header
    pub metadata: Option<Mapping>,

    /// Emitted sections in original document order
    pub sections: Vec<Section>,
}

impl SplitOutput {
    /// Borrowed section texts, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.text.as_str())
    }

    /// Owned section texts, in order
    #[must_use]
    pub fn into_texts(self) -> Vec<String> {
        self.sections.into_iter().map(|section| section.text).collect()
    }

    /// Render all sections as one string, delimited by
    /// `"\n{separator}\n"`
    #[must_use]
    pub fn join(&self, separator: &str) -> String {
        self.texts()
            .collect::<Vec<_>>()
            .join(&format!("\n{separator}\n"))
    }

    /// Summary statistics over the sections
    #[must_use]
    pub fn stats(&self) -> SplitStats {
        SplitStats::from_sections(&self.sections)
    }
}

/// Split a Markdown string into section texts in one call.
///
/// Convenience wrapper constructing a throwaway [`MarkdownSplitter`]
/// for `model` with an optional explicit `limit`.
pub fn split(md: &str, model: &str, limit: Option<usize>) -> Result<Vec<String>> {
    let config = SplitterConfig {
        model: model.to_string(),
        limit,
        ..Default::default()
    };
    let mut splitter = MarkdownSplitter::new(config)?;
    Ok(splitter.split_str(md)?.into_texts())
}
