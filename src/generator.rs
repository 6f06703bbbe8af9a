//! Line-oriented output for code generators.
//!
//! A [`Generator`] writes generated source text and collects warnings along
//! the way. When it is finished the warnings are appended as a block of
//! preprocessor directives so they surface the next time the generated file
//! is compiled.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::ast::Node;
use crate::errors::{DeclMetaError, Result};
use crate::source::SourceLocation;

const SEPARATOR: &str =
    "// ============================================================================";

// ============================================================================
// COMPILE WARNINGS
// ============================================================================

/// Warnings rendered as compiler diagnostics for both MSVC and GCC-style
/// toolchains.
///
/// # Examples
///
/// ```rust
/// use declmeta::generator::CompileWarnings;
/// use declmeta::source::SourceLocation;
///
/// let mut warnings = CompileWarnings::default();
/// warnings.push("missing usr", SourceLocation::new("a.hpp", 3, 7, 0));
/// assert!(warnings.build().contains("#warning \"a.hpp:3:7: missing usr\""));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileWarnings {
    warnings: Vec<String>,
}

impl CompileWarnings {
    pub fn push(&mut self, message: &str, location: SourceLocation) -> &mut Self {
        let message = if location.is_valid() {
            format!("{location}: {message}")
        } else {
            message.to_string()
        };
        self.warnings.push(message);
        self
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Renders the directive block, or an empty string when there is nothing
    /// to report.
    pub fn build(&self) -> String {
        if self.warnings.is_empty() {
            return String::new();
        }

        let mut out = String::from("#ifdef _MSC_VER\n");
        for msg in &self.warnings {
            out.push_str(&format!("#pragma message(\"Warning: {msg}\")\n"));
        }
        out.push_str("#else\n");
        for msg in &self.warnings {
            out.push_str(&format!("#warning \"{msg}\"\n"));
        }
        out.push_str("#endif\n");
        out
    }
}

// ============================================================================
// GENERATOR
// ============================================================================

/// Writes generated text line by line.
///
/// Write failures are remembered and reported once by [`Generator::done`],
/// so the builder-style methods can be chained freely.
pub struct Generator<W: Write> {
    out: W,
    warnings: CompileWarnings,
    error: Option<io::Error>,
}

impl Generator<BufWriter<File>> {
    /// Creates (or truncates) `path` and writes to it.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| DeclMetaError::io(path, e))?;
        tracing::debug!(path = %path.display(), "opened generator output");
        Ok(Generator::new(BufWriter::new(file)))
    }
}

impl<W: Write> Generator<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            warnings: CompileWarnings::default(),
            error: None,
        }
    }

    /// Writes `line` followed by a newline.
    pub fn out(&mut self, line: &str) -> &mut Self {
        if self.error.is_none() {
            if let Err(e) = writeln!(self.out, "{line}") {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn separator(&mut self) -> &mut Self {
        self.out(SEPARATOR)
    }

    pub fn named_separator(&mut self, name: &str) -> &mut Self {
        self.separator().out(&format!("// === {name}")).separator()
    }

    pub fn warn(&mut self, message: &str, location: SourceLocation) -> &mut Self {
        tracing::debug!(%location, warning = message, "generator warning");
        self.warnings.push(message, location);
        self
    }

    /// Warns at the location of `node`.
    pub fn warn_node(&mut self, message: &str, node: &Node) -> &mut Self {
        self.warn(message, node.location().clone())
    }

    pub fn warnings(&self) -> &CompileWarnings {
        &self.warnings
    }

    /// Appends the warnings section, if any, and flushes. Returns the
    /// underlying writer.
    pub fn done(mut self) -> Result<W> {
        if !self.warnings.is_empty() {
            let block = self.warnings.build();
            self.named_separator("Warnings").out(block.trim_end());
        }

        if let Some(source) = self.error.take() {
            return Err(DeclMetaError::Generator { source });
        }
        self.out
            .flush()
            .map_err(|source| DeclMetaError::Generator { source })?;
        Ok(self.out)
    }
}
