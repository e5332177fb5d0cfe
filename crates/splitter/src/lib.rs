//! # mdsplit-splitter
//!
//! Splits Markdown documents into sections that fit a GPT token budget,
//! preferring structural boundaries (headings, blocks, sentences) over
//! arbitrary cuts.
//!
//! ## Pipeline
//!
//! ```text
//! Markdown input (string / file / reader)
//!     │
//!     ├──> Front matter extraction (YAML header stripped, kept aside)
//!     │
//!     ├──> Document tree (top-level blocks nested under headings)
//!     │
//!     ├──> Size aggregation (token totals bottom-up)
//!     │
//!     └──> Greedy packing into token-bounded sections
//!          ├─> whole fragments while they fit
//!          ├─> sentence-level fallback for oversized fragments
//!          └─> blank-line normalization per finished section
//! ```
//!
//! Packing is greedy and single-pass: it never reorders content and
//! never splits a fragment that fits the budget on its own.
//!
//! ## Example
//!
//! ```rust
//! use mdsplit_splitter::{MarkdownSplitter, SplitterConfig};
//!
//! let config = SplitterConfig::default().with_limit(512);
//! let mut splitter = MarkdownSplitter::new(config).unwrap();
//!
//! let output = splitter.split_str("# Notes\n\nSome text.\n").unwrap();
//! for section in &output.sections {
//!     println!("{} tokens: {}", section.tokens, section.text);
//! }
//! ```

mod config;
mod error;
mod frontmatter;
mod packer;
mod splitter;
mod tokenizer;
mod tree;
mod types;

pub use config::{
    model_context_size, SplitterConfig, DEFAULT_MODEL, DEFAULT_SEPARATOR, FALLBACK_CONTEXT_SIZE,
};
pub use error::{Result, SplitError};
pub use splitter::{split, MarkdownSplitter, SplitOutput};
pub use tokenizer::TokenCounter;
pub use types::{Fragment, Node, Section, SectionGroup, SplitStats};
