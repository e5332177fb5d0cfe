use pulldown_cmark::{Event, Options, Parser, Tag};

use crate::tokenizer::TokenCounter;
use crate::types::{Fragment, Node, SectionGroup};

/// Build the heading-nested document tree for a front-matter-stripped
/// Markdown body.
///
/// The body is parsed into a flat stream of top-level blocks. Headings
/// act purely as structural dividers: a heading of level `L` closes
/// every open group at depth `>= L` and opens a new group there, and
/// its own text is not emitted as a fragment. Every other block becomes
/// a leaf [`Fragment`], rendered as its source slice with a single
/// trailing newline, sized through `counter`.
pub fn build_tree(body: &str, counter: &mut TokenCounter) -> SectionGroup {
    let mut stack: Vec<SectionGroup> = vec![SectionGroup::new(0)];
    let mut depth: usize = 0;

    for (event, range) in Parser::new_ext(body, parser_options()).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    match tag {
                        Tag::Heading { level, .. } => open_group(&mut stack, level as usize),
                        _ => push_fragment(&mut stack, &body[range], counter),
                    }
                }
                depth += 1;
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            // Thematic breaks have no Start/End pair
            Event::Rule if depth == 0 => push_fragment(&mut stack, &body[range], counter),
            _ => {}
        }
    }

    let root = collapse(stack);
    log::trace!("built document tree: {} top-level nodes", root.children.len());
    root
}

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Start a new group for a heading of `level`.
///
/// The stack holds the root plus one group per open heading level, so a
/// stack depth of `level` means the top is this heading's parent.
fn open_group(stack: &mut Vec<SectionGroup>, level: usize) {
    while stack.len() > level {
        close_top(stack);
    }
    stack.push(SectionGroup::new(level));
}

/// Pop the top group and attach it to its parent
fn close_top(stack: &mut Vec<SectionGroup>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(group) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(Node::Group(group));
        }
    }
}

fn push_fragment(stack: &mut Vec<SectionGroup>, source: &str, counter: &mut TokenCounter) {
    let trimmed = source.trim_end();
    if trimmed.is_empty() {
        return;
    }

    let markdown = format!("{trimmed}\n");
    let tokens = counter.count(&markdown);
    if let Some(top) = stack.last_mut() {
        top.children.push(Node::Fragment(Fragment::new(markdown, tokens)));
    }
}

/// Fold all open groups back into the root
fn collapse(mut stack: Vec<SectionGroup>) -> SectionGroup {
    while stack.len() > 1 {
        close_top(&mut stack);
    }
    stack.pop().unwrap_or_else(|| SectionGroup::new(0))
}
