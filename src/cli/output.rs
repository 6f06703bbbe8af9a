//! Handles all user-facing output for the CLI.
//!
//! Trees are printed either as a colored outline or as a JSON snapshot.
//! Everything is written through `termcolor` so color is dropped when stdout
//! is not a terminal.

use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::ast::Node;

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

/// Prints the tree rooted at `node` to stdout.
pub fn print_tree(node: &Node, json: bool) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color_choice());
    if json {
        let text = serde_json::to_string_pretty(&node.to_snapshot())?;
        writeln!(stdout, "{text}")
    } else {
        write_tree(&mut stdout, node, 0)
    }
}

/// Prints one line per entry in green.
pub fn print_names<'a>(names: impl IntoIterator<Item = &'a str>) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color_choice());
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    for name in names {
        writeln!(stdout, "{name}")?;
    }
    stdout.reset()
}

/// Writes an indented `kind name [tags]` outline.
pub fn write_tree<W: WriteColor>(out: &mut W, node: &Node, depth: usize) -> io::Result<()> {
    write!(out, "{}", "  ".repeat(depth))?;

    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    write!(out, "{}", node.kind())?;
    out.reset()?;

    if !node.name().is_empty() {
        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, " {}", node.name())?;
        out.reset()?;
    }

    if !node.tags().is_empty() {
        let tags: Vec<String> = node.tags().iter().map(|t| t.to_string()).collect();
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(out, " [{}]", tags.join(", "))?;
        out.reset()?;
    }
    writeln!(out)?;

    for child in node.children() {
        write_tree(out, &child, depth + 1)?;
    }
    Ok(())
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn color_choice() -> ColorChoice {
    if io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
