use serde_yaml::{Mapping, Value};

use crate::error::{Result, SplitError};

const FENCE: &str = "---";

/// Split a leading YAML front matter header off a Markdown document.
///
/// Returns the parsed metadata (if a header is present) and the
/// remaining body. A document that merely starts with `---` but never
/// closes the fence has no front matter; malformed YAML inside a closed
/// fence is a fatal error, as is a YAML document that is not a mapping.
pub fn extract(text: &str) -> Result<(Option<Mapping>, &str)> {
    let Some(after_fence) = opening_fence(text) else {
        return Ok((None, text));
    };

    let Some((raw, body)) = closing_fence(after_fence) else {
        return Ok((None, text));
    };

    if raw.trim().is_empty() {
        return Ok((Some(Mapping::new()), body));
    }

    let value: Value = serde_yaml::from_str(raw)
        .map_err(|e| SplitError::front_matter(format!("invalid YAML header: {e}")))?;

    match value {
        Value::Mapping(mapping) => Ok((Some(mapping), body)),
        Value::Null => Ok((Some(Mapping::new()), body)),
        other => Err(SplitError::front_matter(format!(
            "expected a YAML mapping, got {}",
            yaml_kind(&other)
        ))),
    }
}

/// The text following the opening fence, or `None` when the document
/// does not start with one
fn opening_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(FENCE)?;
    match rest.strip_prefix('\n') {
        Some(rest) => Some(rest),
        None => rest.strip_prefix("\r\n"),
    }
}

/// Split `text` at the first line consisting of the closing fence
fn closing_fence(text: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FENCE {
            return Some((&text[..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
