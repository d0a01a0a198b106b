//! Content records and HTML cleanup.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid space regex"));

const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
];

/// A row from the page content store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub content: String,
}

impl ContentRecord {
    pub fn new(id: i64, name: Option<&str>, content: impl Into<String>) -> Self {
        Self {
            id,
            name: name.map(str::to_string),
            content: content.into(),
        }
    }

    /// Same record with its content passed through [`clean_content`]
    pub fn cleaned(mut self) -> Self {
        self.content = clean_content(&self.content);
        self
    }
}

/// Strip markup and normalize text for use as LLM context.
///
/// Entity decoding and tag stripping repeat until stable, so encoded markup
/// (`&lt;b&gt;`) is removed as well. The result is a fixed point:
/// `clean_content(clean_content(x)) == clean_content(x)`.
pub fn clean_content(content: &str) -> String {
    let mut text = content.to_string();
    loop {
        let next = decode_entities(&TAG_RE.replace_all(&text, ""));
        if next == text {
            break;
        }
        text = next;
    }

    let collapsed = SPACE_RE.replace_all(&text, " ");
    let mut out = String::with_capacity(collapsed.len());
    for c in collapsed.chars() {
        match c {
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{2013}' => out.push('-'),
            '\u{2014}' => out.push_str("--"),
            other => out.push(other),
        }
    }

    out.trim().to_string()
}

/// Single left-to-right pass; decoded output is not rescanned.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match ENTITIES.iter().find(|(entity, _)| tail.starts_with(entity)) {
            Some((entity, replacement)) => {
                out.push_str(replacement);
                rest = &tail[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Drop records whose id was already seen, keeping retrieval order
pub fn dedup_by_id(records: Vec<ContentRecord>) -> Vec<ContentRecord> {
    let mut seen = HashSet::new();
    records.into_iter().filter(|r| seen.insert(r.id)).collect()
}
