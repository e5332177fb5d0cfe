use serde::{Deserialize, Serialize};

/// An indivisible unit of rendered Markdown corresponding to one
/// top-level block (paragraph, code block, list, table, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// The block rendered back to Markdown, ending in a single newline
    pub markdown: String,

    /// Token size of `markdown`, computed once at construction
    pub tokens: usize,
}

impl Fragment {
    /// Create a new fragment
    #[must_use]
    pub const fn new(markdown: String, tokens: usize) -> Self {
        Self { markdown, tokens }
    }
}

/// A node of the document tree: either a leaf fragment or a nested
/// heading group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Fragment(Fragment),
    Group(SectionGroup),
}

/// All content nested under a heading of a given level, up to the next
/// heading of equal-or-lower level. The document root is an implicit
/// level-0 group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGroup {
    /// Heading level that opened this group (0 for the root). Only used
    /// while the tree is being built; packing ignores it.
    pub level: usize,

    /// Aggregate token size of all descendants, filled in by
    /// [`SectionGroup::aggregate_sizes`]
    pub tokens: usize,

    /// Child nodes in original document order
    pub children: Vec<Node>,
}

impl SectionGroup {
    /// Create an empty group for a heading level
    #[must_use]
    pub const fn new(level: usize) -> Self {
        Self {
            level,
            tokens: 0,
            children: Vec::new(),
        }
    }

    /// Recompute every group's aggregate token size bottom-up and
    /// return this group's total.
    ///
    /// The packer makes its decisions per fragment, but aggregates must
    /// be correct before packing so the tree can be inspected.
    pub fn aggregate_sizes(&mut self) -> usize {
        let mut total = 0;
        for child in &mut self.children {
            total += match child {
                Node::Fragment(fragment) => fragment.tokens,
                Node::Group(group) => group.aggregate_sizes(),
            };
        }
        self.tokens = total;
        total
    }

    /// Whether the group holds no fragments at any depth
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.iter().all(|child| match child {
            Node::Fragment(_) => false,
            Node::Group(group) => group.is_empty(),
        })
    }
}

/// A final emitted run of document content, at or under the token limit
/// unless a single indivisible unit forced it over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Blank-line-normalized Markdown text
    pub text: String,

    /// Token size; the packer's running sum, not re-verified against
    /// the normalized text
    pub tokens: usize,
}

impl Section {
    /// Create a new section
    #[must_use]
    pub const fn new(text: String, tokens: usize) -> Self {
        Self { text, tokens }
    }
}

/// Summary statistics over a split result
#[derive(Debug, Clone)]
pub struct SplitStats {
    pub total_sections: usize,
    pub total_tokens: usize,
    pub avg_tokens_per_section: usize,
    pub min_tokens: usize,
    pub max_tokens: usize,
}

impl SplitStats {
    /// Compute statistics for a list of sections
    #[must_use]
    pub fn from_sections(sections: &[Section]) -> Self {
        let total_tokens: usize = sections.iter().map(|s| s.tokens).sum();
        Self {
            total_sections: sections.len(),
            total_tokens,
            avg_tokens_per_section: if sections.is_empty() {
                0
            } else {
                total_tokens / sections.len()
            },
            min_tokens: sections.iter().map(|s| s.tokens).min().unwrap_or(0),
            max_tokens: sections.iter().map(|s| s.tokens).max().unwrap_or(0),
        }
    }
}

impl std::fmt::Display for SplitStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sections: {} | Tokens: {} | Avg: {} | Range: {}-{}",
            self.total_sections,
            self.total_tokens,
            self.avg_tokens_per_section,
            self.min_tokens,
            self.max_tokens
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, tokens: usize) -> Node {
        Node::Fragment(Fragment::new(text.to_string(), tokens))
    }

    #[test]
    fn test_aggregate_sizes_flat() {
        let mut root = SectionGroup::new(0);
        root.children.push(frag("a\n", 3));
        root.children.push(frag("b\n", 5));

        assert_eq!(root.aggregate_sizes(), 8);
        assert_eq!(root.tokens, 8);
    }

    #[test]
    fn test_aggregate_sizes_nested() {
        let mut inner = SectionGroup::new(2);
        inner.children.push(frag("deep\n", 7));

        let mut outer = SectionGroup::new(1);
        outer.children.push(frag("shallow\n", 2));
        outer.children.push(Node::Group(inner));

        let mut root = SectionGroup::new(0);
        root.children.push(Node::Group(outer));

        assert_eq!(root.aggregate_sizes(), 9);
        match &root.children[0] {
            Node::Group(group) => {
                assert_eq!(group.tokens, 9);
                match &group.children[1] {
                    Node::Group(inner) => assert_eq!(inner.tokens, 7),
                    Node::Fragment(_) => panic!("expected nested group"),
                }
            }
            Node::Fragment(_) => panic!("expected group"),
        }
    }

    #[test]
    fn test_is_empty() {
        let mut root = SectionGroup::new(0);
        assert!(root.is_empty());

        root.children.push(Node::Group(SectionGroup::new(1)));
        assert!(root.is_empty());

        root.children.push(frag("content\n", 1));
        assert!(!root.is_empty());
    }

    #[test]
    fn test_stats_empty() {
        let stats = SplitStats::from_sections(&[]);
        assert_eq!(stats.total_sections, 0);
        assert_eq!(stats.total_tokens, 0);
        assert_eq!(stats.avg_tokens_per_section, 0);
    }

    #[test]
    fn test_stats_display() {
        let sections = vec![
            Section::new("a".to_string(), 10),
            Section::new("b".to_string(), 30),
        ];
        let stats = SplitStats::from_sections(&sections);
        assert_eq!(stats.total_tokens, 40);
        assert_eq!(stats.avg_tokens_per_section, 20);
        assert_eq!(format!("{stats}"), "Sections: 2 | Tokens: 40 | Avg: 20 | Range: 10-30");
    }
}
