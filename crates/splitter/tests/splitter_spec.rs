//! End-to-end behavior of the section splitter: content preservation,
//! budget compliance, boundary cases, and split stability.

use mdsplit_splitter::{split, MarkdownSplitter, SplitterConfig, TokenCounter};

fn splitter_with_limit(limit: usize) -> MarkdownSplitter {
    MarkdownSplitter::new(SplitterConfig::default().with_limit(limit)).expect("splitter")
}

fn counter() -> TokenCounter {
    TokenCounter::new("gpt-3.5-turbo").expect("tokenizer")
}

/// Strip all whitespace so comparisons ignore joining/normalization
fn squash(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

const SAMPLE: &str = "\
# Guide

An introduction paragraph that explains what the guide covers.

## Setup

Install the toolchain before anything else.

```sh
cargo install mdsplit
```

## Usage

- run the binary
- read the output

Final remarks close the document.
";

#[test]
fn all_blocks_survive_in_order() {
    let mut splitter = splitter_with_limit(16);
    let output = splitter.split_str(SAMPLE).unwrap();

    let joined: String = output.texts().collect();
    let blocks = [
        "An introduction paragraph",
        "Install the toolchain",
        "cargo install mdsplit",
        "run the binary",
        "Final remarks",
    ];

    let mut last = 0;
    for block in blocks {
        let pos = joined.find(block).unwrap_or_else(|| panic!("missing block: {block}"));
        assert!(pos >= last, "block out of order: {block}");
        last = pos;
    }

    // Each block appears exactly once
    for block in blocks {
        assert_eq!(joined.matches(block).count(), 1, "duplicated block: {block}");
    }
}

#[test]
fn heading_text_is_structural_only() {
    let mut splitter = splitter_with_limit(1000);
    let output = splitter.split_str("# Title\n\nHello world.\n").unwrap();

    assert_eq!(output.sections.len(), 1);
    assert!(output.sections[0].text.contains("Hello world."));
    assert!(!output.sections[0].text.contains("Title"));
}

#[test]
fn sections_respect_the_limit() {
    let limit = 24;
    let mut splitter = splitter_with_limit(limit);
    let output = splitter.split_str(SAMPLE).unwrap();

    assert!(output.sections.len() > 1);
    for section in &output.sections {
        assert!(
            section.tokens <= limit,
            "section of {} tokens over limit {limit}: {:?}",
            section.tokens,
            section.text
        );
    }
}

#[test]
fn document_within_budget_yields_one_section() {
    let mut splitter = splitter_with_limit(100_000);
    let output = splitter.split_str(SAMPLE).unwrap();
    assert_eq!(output.sections.len(), 1);
}

#[test]
fn empty_document_yields_zero_sections() {
    let mut splitter = splitter_with_limit(100);
    assert!(splitter.split_str("").unwrap().sections.is_empty());
    assert!(splitter.split_str("\n\n\n").unwrap().sections.is_empty());
}

#[test]
fn consecutive_paragraphs_split_at_paragraph_boundary() {
    let a = "Paragraph one walks through the very first part of the story in detail.";
    let b = "Paragraph two walks through the very second part of the story in detail.";
    let md = format!("{a}\n\n{b}\n");

    let mut meter = counter();
    let size_a = meter.count(&format!("{a}\n"));
    let size_b = meter.count(&format!("{b}\n"));
    let limit = size_a.max(size_b) + 1;
    assert!(size_a + size_b > limit);

    let mut splitter = splitter_with_limit(limit);
    let output = splitter.split_str(&md).unwrap();

    assert_eq!(output.sections.len(), 2);
    assert!(output.sections[0].text.contains("Paragraph one"));
    assert!(output.sections[1].text.contains("Paragraph two"));
    // No mid-paragraph split
    assert!(!output.sections[0].text.contains("Paragraph two"));
    assert!(output.sections[0].text.contains("in detail."));
}

#[test]
fn oversized_paragraph_splits_between_sentences() {
    let s1 = "Sentence number one covers the early ground quite carefully.";
    let s2 = "Sentence number two continues in the very same careful spirit.";
    let s3 = "Sentence number three, by contrast, stretches on far longer than the first \
              two combined ever did, refusing to stop where a polite sentence would.";
    let md = format!("{s1} {s2} {s3}\n");

    let mut meter = counter();
    let limit = meter.count(&format!("{s1} ")) + meter.count(&format!("{s2} "));
    assert!(meter.count(&md) > limit);

    let mut splitter = splitter_with_limit(limit);
    let output = splitter.split_str(&md).unwrap();

    assert_eq!(output.sections.len(), 2);
    assert!(output.sections[0].text.contains("number one"));
    assert!(output.sections[0].text.contains("number two"));
    assert!(output.sections[1].text.starts_with("Sentence number three"));
}

#[test]
fn lower_limits_never_yield_fewer_sections() {
    let counts: Vec<usize> = [8, 16, 32, 64, 1024]
        .iter()
        .map(|&limit| {
            let mut splitter = splitter_with_limit(limit);
            splitter.split_str(SAMPLE).unwrap().sections.len()
        })
        .collect();

    assert!(
        counts.windows(2).all(|w| w[0] >= w[1]),
        "section counts not monotone: {counts:?}"
    );
}

#[test]
fn resplitting_own_output_preserves_content() {
    let mut splitter = splitter_with_limit(20);
    let first = splitter.split_str(SAMPLE).unwrap();

    let rejoined = first.texts().collect::<Vec<_>>().join("\n");
    let second = splitter.split_str(&rejoined).unwrap();

    let first_content: String = first.texts().map(squash).collect();
    let second_content: String = second.texts().map(squash).collect();
    assert_eq!(first_content, second_content);
}

#[test]
fn blank_line_runs_are_normalized_in_output() {
    let mut splitter = splitter_with_limit(10_000);
    let output = splitter.split_str("first\n\nsecond\n\nthird\n").unwrap();

    for section in &output.sections {
        assert!(!section.text.contains("\n\n\n"));
    }
}

#[test]
fn convenience_split_uses_model_default_limit() {
    let texts = split(SAMPLE, "gpt-4", None).unwrap();
    // 8192-token budget swallows the whole sample
    assert_eq!(texts.len(), 1);
}

#[test]
fn front_matter_is_stripped_and_reported() {
    let md = format!("---\ntitle: Guide\ndraft: true\n---\n{SAMPLE}");
    let mut splitter = splitter_with_limit(100_000);
    let output = splitter.split_str(&md).unwrap();

    let meta = output.metadata.as_ref().expect("metadata");
    assert_eq!(meta.get("draft"), Some(&serde_yaml::Value::from(true)));
    assert_eq!(output.sections.len(), 1);
    assert!(!output.sections[0].text.contains("draft:"));
}

#[test]
fn malformed_front_matter_is_fatal() {
    let md = "---\ntitle: [broken\n---\nBody.\n";
    let mut splitter = splitter_with_limit(100);
    assert!(splitter.split_str(md).is_err());
}
