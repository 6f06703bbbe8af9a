//! Source positions for declarations.
//!
//! A [`SourceLocation`] names a single point in a file and a [`SourceRange`]
//! spans two of them. Both are plain values handed over by the front-end and
//! copied into nodes verbatim.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ============================================================================
// SOURCE LOCATION
// ============================================================================

/// A point in a source file.
///
/// # Examples
///
/// ```rust
/// use declmeta::source::SourceLocation;
/// let loc = SourceLocation::new("widget.hpp", 12, 5, 210);
/// assert!(loc.is_valid());
/// assert_eq!(loc.to_string(), "widget.hpp:12:5");
/// assert_eq!(loc.to_string_short(), "widget.hpp:12");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32, offset: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            offset,
        }
    }

    /// A location is valid once it names a file and a 1-based line.
    pub fn is_valid(&self) -> bool {
        !self.file.is_empty() && self.line > 0
    }

    pub fn same_file(&self, other: &SourceLocation) -> bool {
        self.file == other.file
    }

    /// Formats as `file:line`, without the column.
    pub fn to_string_short(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

impl PartialOrd for SourceLocation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourceLocation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.file
            .cmp(&other.file)
            .then(self.line.cmp(&other.line))
            .then(self.column.cmp(&other.column))
            .then(self.offset.cmp(&other.offset))
    }
}

// ============================================================================
// SOURCE RANGE
// ============================================================================

/// The extent of a declaration, from `start` to `end` inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRange {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceRange {
    pub fn from_locations(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// A zero-width range sitting on a single location.
    pub fn from_location(loc: SourceLocation) -> Self {
        Self {
            start: loc.clone(),
            end: loc,
        }
    }

    /// Returns the smallest range covering both inputs.
    ///
    /// An invalid side yields the other one unchanged, and ranges from
    /// different files yield `a`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use declmeta::source::{SourceLocation, SourceRange};
    /// let a = SourceRange::from_locations(
    ///     SourceLocation::new("a.hpp", 3, 1, 20),
    ///     SourceLocation::new("a.hpp", 5, 2, 60),
    /// );
    /// let b = SourceRange::from_locations(
    ///     SourceLocation::new("a.hpp", 4, 1, 40),
    ///     SourceLocation::new("a.hpp", 9, 1, 120),
    /// );
    /// let merged = SourceRange::merge(&a, &b);
    /// assert_eq!(merged.start.line, 3);
    /// assert_eq!(merged.end.line, 9);
    /// ```
    pub fn merge(a: &SourceRange, b: &SourceRange) -> SourceRange {
        if !a.is_valid() {
            return b.clone();
        }
        if !b.is_valid() {
            return a.clone();
        }
        if !a.start.same_file(&b.start) {
            return a.clone();
        }

        let start = if a.start < b.start { &a.start } else { &b.start };
        let end = if b.end < a.end { &a.end } else { &b.end };
        SourceRange::from_locations(start.clone(), end.clone())
    }

    pub fn is_valid(&self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Inclusive at both ends; locations in another file are never contained.
    pub fn contains_location(&self, loc: &SourceLocation) -> bool {
        if !self.is_valid() || !loc.is_valid() || !self.start.same_file(loc) {
            return false;
        }
        *loc >= self.start && *loc <= self.end
    }

    pub fn contains_range(&self, other: &SourceRange) -> bool {
        if !self.is_valid() || !other.is_valid() {
            return false;
        }
        self.contains_location(&other.start) && self.contains_location(&other.end)
    }

    /// Ranges that only touch at an endpoint do not overlap.
    pub fn overlaps(&self, other: &SourceRange) -> bool {
        if !self.is_valid() || !other.is_valid() || !self.start.same_file(&other.start) {
            return false;
        }
        self.end > other.start && other.end > self.start
    }

    /// Length in bytes, derived from the offsets.
    pub fn len(&self) -> u32 {
        if !self.is_valid() {
            return 0;
        }
        self.end.offset.saturating_sub(self.start.offset)
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}-{}:{}",
            self.start.file, self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}
