//! Cosmetic clean-ups applied to converter output.

use crate::error::Result;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;

lazy_static! {
    static ref INFO_RE: Regex = Regex::new(r"(<info>)").unwrap();
    static ref PROGRAMLISTING_RE: Regex =
        Regex::new(r"(?s)<programlisting[^>]*>.*?</programlisting>").unwrap();

    static ref HEADING_ANCHOR_RE: Regex =
        Regex::new(r"(?m)^(#+\s.*?)\s+\{#[^}]*\}[ \t]*$").unwrap();
    static ref BULLET_RE: Regex = Regex::new(r"(?m)^-   ").unwrap();
    static ref ORDERED_RE: Regex = Regex::new(r"(?m)^(\d+)\.  ").unwrap();
    static ref LIST_ITEM_RE: Regex = Regex::new(r"^\s*(?:- |\d+\. )").unwrap();
    static ref HEADING_SPACING_RE: Regex = Regex::new(r"(?m)^(#+\s.*)\n+").unwrap();
    static ref ANCHOR_RE: Regex = Regex::new(r"\s*\{#[^}]*\}").unwrap();
    static ref FENCE_OPEN_RE: Regex = Regex::new(r"```(\w+)\n").unwrap();
    static ref FENCE_BARE_RE: Regex = Regex::new(r"\n```\n").unwrap();
    static ref BLANK_LINES_RE: Regex = Regex::new(r"\n{3,}").unwrap();
    static ref NOTE_RE: Regex = Regex::new(r"(?s):::: note\n::: title\n:::\n(.*?)::::").unwrap();
    static ref NOTE_ITEM_RE: Regex = Regex::new(r"(?m)^\s*-\s*").unwrap();
}

/// Reads `path`, applies `transform` and writes the result back.
pub fn rewrite_file<P, F>(path: P, transform: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&str) -> String,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    fs::write(path, transform(&content))?;
    Ok(())
}

/// Stamps the DocBook metadata with `date` and tightens code listings.
pub fn postprocess_docbook(content: &str, date: &str) -> String {
    normalize_listing_indent(&add_creation_date(content, date))
}

/// Inserts `<date>` right after every `<info>` tag.
pub fn add_creation_date(content: &str, date: &str) -> String {
    INFO_RE
        .replace_all(content, |caps: &Captures| format!("{}\n    <date>{date}</date>", &caps[1]))
        .into_owned()
}

/// Replaces four-space indentation steps with two spaces inside `<programlisting>`.
pub fn normalize_listing_indent(content: &str) -> String {
    PROGRAMLISTING_RE
        .replace_all(content, |caps: &Captures| caps[0].replace("    ", "  "))
        .into_owned()
}

/// Tidies pandoc's markdown output.
pub fn postprocess_markdown(content: &str) -> String {
    let content = HEADING_ANCHOR_RE.replace_all(content, "${1}");
    let content = BULLET_RE.replace_all(&content, "- ");
    let content = ORDERED_RE.replace_all(&content, "${1}. ");
    let content = collapse_list_spacing(&content);
    let content = HEADING_SPACING_RE.replace_all(&content, "${1}\n");
    let content = ANCHOR_RE.replace_all(&content, "");
    let content = FENCE_OPEN_RE.replace_all(&content, "\n```${1}\n");
    let content = FENCE_BARE_RE.replace_all(&content, "\n\n```\n\n");
    let content = BLANK_LINES_RE.replace_all(&content, "\n\n");
    flatten_notes(&content)
}

/// Drops blank lines between two consecutive list items.
pub fn collapse_list_spacing(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut result: Vec<&str> = Vec::with_capacity(lines.len());
    // Whether the last non-blank line belongs to a list item
    let mut in_list = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() {
            let mut end = i;
            while end < lines.len() && lines[end].trim().is_empty() {
                end += 1;
            }
            let next_is_item = end < lines.len() && LIST_ITEM_RE.is_match(lines[end]);
            if !(in_list && next_is_item) {
                result.extend_from_slice(&lines[i..end]);
            }
            i = end;
            continue;
        }
        in_list = LIST_ITEM_RE.is_match(line) || (in_list && line.starts_with(' '));
        result.push(line);
        i += 1;
    }

    result.join("\n")
}

/// Rewrites pandoc `note` admonitions into a `**Note:**` paragraph.
pub fn flatten_notes(content: &str) -> String {
    NOTE_RE
        .replace_all(content, |caps: &Captures| {
            let body = NOTE_ITEM_RE.replace_all(caps[1].trim(), "- ");
            format!("**Note:**\n{body}")
        })
        .into_owned()
}
