//! Metadata tags and the tag grammar.
//!
//! A tag is the structured form of an annotation such as `serialize` or
//! `validate(0, 100)`: a name plus an ordered list of literal argument
//! strings. Tags are produced once by [`Tag::parse`] and never mutated
//! afterwards; nodes hold their own copies.
//!
//! The grammar is deliberately forgiving. Parsing never fails, malformed input
//! degrades to a best-effort name and argument split.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub mod annotations;

pub use annotations::{brief_comment, extract_annotations};

// ============================================================================
// TAG
// ============================================================================

/// A parsed metadata annotation.
///
/// Only the name takes part in lookups; arguments are payload.
///
/// # Examples
///
/// ```rust
/// use declmeta::tags::Tag;
/// let tag = Tag::parse("validate(0, 100)");
/// assert_eq!(tag.name(), "validate");
/// assert_eq!(tag.args(), ["0", "100"]);
/// assert_eq!(tag.args_combined(), "0, 100");
/// assert_eq!(tag.full(), "validate(0, 100)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Tag {
    name: String,
    #[serde(default)]
    args: Vec<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Parses the surface form `name` or `name(arg, ...)`.
    ///
    /// Commas inside `"..."` or `'...'` do not split arguments. Every argument
    /// is trimmed, `name()` has no arguments, and an unterminated quote simply
    /// runs to the end of the argument text.
    pub fn parse(input: &str) -> Tag {
        let input = input.trim();

        let Some(open) = input.find('(') else {
            return Tag::new(input, Vec::new());
        };

        let name = input[..open].trim();
        let rest = &input[open + 1..];
        let inner = match rest.rfind(')') {
            Some(close) => &rest[..close],
            None => {
                tracing::trace!(annotation = input, "tag has no closing parenthesis");
                rest
            }
        };

        Tag::new(name, split_args(inner))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Arguments joined with `", "`.
    pub fn args_combined(&self) -> String {
        self.args.join(", ")
    }

    /// `name(args)`, always with parentheses.
    pub fn full(&self) -> String {
        format!("{}({})", self.name, self.args_combined())
    }
}

/// Renders the surface form accepted by [`Tag::parse`].
impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}({})", self.name, self.args_combined())
        }
    }
}

impl FromStr for Tag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Tag::parse(s))
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::parse(value)
    }
}

// ============================================================================
// ARGUMENT SPLITTING
// ============================================================================

/// Splits argument text on commas that sit outside quoted regions.
///
/// A backslash only escapes a following quote or backslash; before anything
/// else, a comma included, it is ordinary text.
fn split_args(inner: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    let mut chars = inner.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\\' => {
                if matches!(chars.peek(), Some((_, '"' | '\'' | '\\'))) {
                    chars.next();
                }
            }
            '"' | '\'' => match quote {
                None => quote = Some(ch),
                Some(open) if open == ch => quote = None,
                Some(_) => {}
            },
            ',' if quote.is_none() => {
                args.push(inner[start..idx].trim().to_string());
                start = idx + 1;
            }
            _ => {}
        }
    }

    let last = inner[start..].trim();
    if !last.is_empty() {
        args.push(last.to_string());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tag: &Tag) -> Vec<&str> {
        tag.args().iter().map(String::as_str).collect()
    }

    #[test]
    fn bare_name_has_no_args() {
        let tag = Tag::parse("  serialize  ");
        assert_eq!(tag.name(), "serialize");
        assert!(tag.args().is_empty());
    }

    #[test]
    fn empty_parens_yield_no_args() {
        let tag = Tag::parse("init()");
        assert_eq!(tag.name(), "init");
        assert!(tag.args().is_empty());

        let spaced = Tag::parse("init(   )");
        assert!(spaced.args().is_empty());
    }

    #[test]
    fn arguments_are_trimmed() {
        let tag = Tag::parse("config( option1,  option2 ,option3 )");
        assert_eq!(args(&tag), ["option1", "option2", "option3"]);
    }

    #[test]
    fn quoted_commas_do_not_split() {
        let tag = Tag::parse(r#"doc("Hello, world", 'a, b', plain)"#);
        assert_eq!(args(&tag), [r#""Hello, world""#, "'a, b'", "plain"]);
    }

    #[test]
    fn escaped_quote_stays_inside_string() {
        let tag = Tag::parse(r#"say("he said \"hi, there\"", next)"#);
        assert_eq!(args(&tag), [r#""he said \"hi, there\"""#, "next"]);
    }

    #[test]
    fn backslash_does_not_escape_a_comma() {
        assert_eq!(args(&Tag::parse(r"f(a\,b)")), [r"a\", "b"]);
    }

    #[test]
    fn escaped_backslash_leaves_the_quote_live() {
        let tag = Tag::parse(r#"path("C:\\", next)"#);
        assert_eq!(args(&tag), [r#""C:\\""#, "next"]);
    }

    #[test]
    fn other_quote_kind_does_not_close_region() {
        let tag = Tag::parse(r#"note("it's, fine", x)"#);
        assert_eq!(args(&tag), [r#""it's, fine""#, "x"]);
    }

    #[test]
    fn unterminated_quote_swallows_trailing_commas() {
        let tag = Tag::parse(r#"broken(a, "b, c)"#);
        assert_eq!(tag.name(), "broken");
        assert_eq!(args(&tag), ["a", r#""b, c"#]);
    }

    #[test]
    fn nested_parens_use_last_closing_paren() {
        let tag = Tag::parse("func(a(b), c)");
        assert_eq!(tag.name(), "func");
        assert_eq!(args(&tag), ["a(b)", "c"]);
    }

    #[test]
    fn missing_closing_paren_keeps_remaining_text() {
        let tag = Tag::parse("range(1, 10");
        assert_eq!(tag.name(), "range");
        assert_eq!(args(&tag), ["1", "10"]);
    }

    #[test]
    fn inner_empty_slots_are_kept() {
        let tag = Tag::parse("slots(a,,b)");
        assert_eq!(args(&tag), ["a", "", "b"]);
    }

    #[test]
    fn empty_final_slot_is_dropped() {
        assert_eq!(args(&Tag::parse("f(a,)")), ["a"]);
        assert_eq!(args(&Tag::parse("slots(a,,b, )")), ["a", "", "b"]);
    }

    #[test]
    fn degenerate_inputs_never_fail() {
        assert_eq!(Tag::parse(""), Tag::default());
        assert_eq!(Tag::parse("(arg)").name(), "");
        assert_eq!(args(&Tag::parse("(arg)")), ["arg"]);
        assert_eq!(Tag::parse("meta::").name(), "meta::");
    }

    #[test]
    fn full_and_display_forms() {
        let tag = Tag::new("export", vec!["public".into(), "versioned".into()]);
        assert_eq!(tag.full(), "export(public, versioned)");
        assert_eq!(tag.to_string(), "export(public, versioned)");

        let bare = Tag::new("readonly", Vec::new());
        assert_eq!(bare.full(), "readonly()");
        assert_eq!(bare.to_string(), "readonly");
        assert_eq!(Tag::default().full(), "()");
    }

    #[test]
    fn surface_form_parses_back() {
        let cases: Vec<(&str, Vec<&str>)> = vec![
            ("reflect", vec![]),
            ("range", vec!["0", "100"]),
            ("desc", vec!["\"a, b\"", "'c'", "d e"]),
            ("serialize::json", vec!["pretty"]),
        ];
        for (name, list) in cases {
            let tag = Tag::new(name, list.iter().map(|s| s.to_string()).collect());
            let parsed: Tag = tag.to_string().parse().unwrap();
            assert_eq!(parsed, tag);
        }
    }

    #[test]
    fn unicode_arguments() {
        let tag = Tag::parse("i18n(héllo, wörld, 日本語)");
        assert_eq!(args(&tag), ["héllo", "wörld", "日本語"]);
    }
}
