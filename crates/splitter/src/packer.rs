use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::tokenizer::TokenCounter;
use crate::types::{Fragment, Node, Section, SectionGroup};

static RE_BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static RE_PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").expect("valid regex"));

/// Greedy packer turning the document tree into token-bounded sections.
///
/// The tree is flattened pre-order into one linear stream of fragments,
/// in document order. Fragments at or under the limit are never split
/// across sections; a fragment over the limit is broken at sentence
/// boundaries instead, and a single sentence over the limit becomes its
/// own over-budget section. That is the hard floor of divisibility.
pub struct SectionPacker<'a> {
    limit: usize,
    counter: &'a mut TokenCounter,
    parts: Vec<String>,
    size: usize,
    sections: Vec<Section>,
}

impl<'a> SectionPacker<'a> {
    /// Create a packer for a token limit
    pub fn new(limit: usize, counter: &'a mut TokenCounter) -> Self {
        Self {
            limit,
            counter,
            parts: Vec::new(),
            size: 0,
            sections: Vec::new(),
        }
    }

    /// Pack the whole tree and return the finished sections
    #[must_use]
    pub fn pack(mut self, root: &SectionGroup) -> Vec<Section> {
        self.walk(root);
        self.flush();
        self.sections
    }

    fn walk(&mut self, group: &SectionGroup) {
        for child in &group.children {
            match child {
                Node::Fragment(fragment) => self.absorb(fragment),
                Node::Group(nested) => self.walk(nested),
            }
        }
    }

    /// Add one fragment to the in-progress section, flushing or falling
    /// back to sentence splitting as needed
    fn absorb(&mut self, fragment: &Fragment) {
        if fragment.tokens > self.limit {
            log::debug!(
                "fragment of {} tokens exceeds limit {}, splitting at sentence boundaries",
                fragment.tokens,
                self.limit
            );
            self.absorb_by_sentence(&fragment.markdown);
        } else if self.size + fragment.tokens <= self.limit {
            self.parts.push(format!("{}\n", fragment.markdown));
            self.size += fragment.tokens;
        } else {
            self.flush();
            self.parts.push(format!("{}\n", fragment.markdown));
            self.size = fragment.tokens;
        }
    }

    /// Sentence-level fallback for a fragment that cannot fit whole.
    ///
    /// Paragraph breaks survive as soft `"\n\n"` separators appended to
    /// the in-progress text without entering the token accounting; the
    /// resulting undercount is a known, accepted approximation.
    fn absorb_by_sentence(&mut self, markdown: &str) {
        for paragraph in RE_PARAGRAPH_BREAK.split(markdown) {
            if paragraph.trim().is_empty() {
                continue;
            }

            for raw in paragraph.split_sentence_bounds() {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let sentence = format!("{trimmed} ");
                let tokens = self.counter.count(&sentence);
                if self.size + tokens <= self.limit {
                    self.parts.push(sentence);
                    self.size += tokens;
                } else {
                    self.flush();
                    self.parts.push(sentence);
                    self.size = tokens;
                }
            }

            self.parts.push("\n\n".to_string());
        }
    }

    /// Finish the in-progress section, if it has any content.
    ///
    /// The running token sum is kept as the section size; it is only
    /// recomputed from the text when the sum is zero (a section made of
    /// soft separators alone never gets here).
    fn flush(&mut self) {
        if self.parts.is_empty() {
            return;
        }

        let text = std::mem::take(&mut self.parts).concat();
        let size = self.size;
        self.size = 0;

        if text.trim().is_empty() {
            return;
        }

        let tokens = if size == 0 { self.counter.count(&text) } else { size };
        self.sections
            .push(Section::new(normalize_blank_lines(&text), tokens));
    }
}

/// Collapse runs of three or more newlines down to exactly two
pub(crate) fn normalize_blank_lines(text: &str) -> String {
    RE_BLANK_RUNS.replace_all(text, "\n\n").into_owned()
}
