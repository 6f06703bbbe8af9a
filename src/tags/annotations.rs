//! Annotation extraction from documentation comments.
//!
//! Front-end adapters hand raw comment text to [`extract_annotations`] and
//! feed every returned string to [`Tag::parse`](super::Tag::parse). Comment
//! decoration (`///`, `//!`, `/**`, leading `*`) is stripped here so the tag
//! grammar only ever sees the bare `name(args)` surface form.

use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "tags/annotations.pest"]
struct AnnotationParser;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Returns the raw annotation strings found in `comment`, in source order.
///
/// A marker is an `@` at the start of a comment line or after whitespace,
/// followed by a name. A balanced argument group belongs to the marker; an
/// unbalanced one takes the rest of the line.
///
/// # Examples
///
/// ```rust
/// use declmeta::tags::extract_annotations;
/// let comment = "/// A percentage.\n/// @serialize\n/// @validate(0, 100)";
/// assert_eq!(extract_annotations(comment), ["serialize", "validate(0, 100)"]);
/// ```
pub fn extract_annotations(comment: &str) -> Vec<String> {
    comment
        .lines()
        .map(strip_decoration)
        .flat_map(line_annotations)
        .collect()
}

/// The first line of prose in `comment`, skipping annotation lines.
pub fn brief_comment(comment: &str) -> Option<String> {
    comment
        .lines()
        .map(strip_decoration)
        .find(|line| !line.is_empty() && !line.starts_with('@'))
        .map(str::to_string)
}

// ============================================================================
// INTERNAL HELPERS
// ============================================================================

fn strip_decoration(line: &str) -> &str {
    let mut line = line.trim();
    for prefix in ["///<", "//!<", "///", "//!", "//", "/**<", "/**", "/*!", "/*"] {
        if let Some(rest) = line.strip_prefix(prefix) {
            line = rest;
            break;
        }
    }
    let line = line.strip_suffix("*/").unwrap_or(line).trim();
    line.strip_prefix('*').map(str::trim).unwrap_or(line)
}

fn line_annotations(line: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut cursor = 0;

    while let Some(rel) = line[cursor..].find('@') {
        let at = cursor + rel;
        let starts_marker = line[..at]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace);
        if !starts_marker {
            cursor = at + 1;
            continue;
        }

        match AnnotationParser::parse(Rule::annotation, &line[at..]) {
            Ok(mut pairs) => {
                let Some(pair) = pairs.next() else {
                    cursor = at + 1;
                    continue;
                };
                let end = at + pair.as_span().end();
                if line[end..].starts_with('(') {
                    tracing::trace!(line, "unbalanced annotation arguments");
                    found.push(line[at + 1..].trim_end().to_string());
                    break;
                }
                found.push(line[at + 1..end].to_string());
                cursor = end;
            }
            Err(_) => cursor = at + 1,
        }
    }

    found
}
