//! The declmeta Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use clap::Parser;
use miette::IntoDiagnostic;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::ast::{Node, NodeRef};
use crate::cli::args::{Command, DeclMetaArgs};
use crate::events::load_events;
use crate::filter::{Filter, FilterConfig};
use crate::generator::Generator;
use crate::merge::merge;

pub mod args;
pub mod output;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "DECLMETA_LOG";

/// The main entry point for the CLI.
pub fn run() -> miette::Result<()> {
    let args = DeclMetaArgs::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Tree { events, json } => handle_tree(&events, json),
        Command::Merge {
            first,
            second,
            json,
        } => handle_merge(&first, &second, json),
        Command::Filter { events, config } => handle_filter(&events, &config),
        Command::Generate {
            events,
            config,
            output,
        } => handle_generate(&events, &config, &output),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .try_init();
}

// ============================================================================
// SUBCOMMAND HANDLERS
// ============================================================================

fn handle_tree(events: &Path, json: bool) -> miette::Result<()> {
    let tree = load_events(events)?;
    output::print_tree(&tree, json).into_diagnostic()
}

fn handle_merge(first: &Path, second: &Path, json: bool) -> miette::Result<()> {
    let a = load_events(first)?;
    let b = load_events(second)?;
    match merge(Some(a), Some(b)) {
        Some(merged) => output::print_tree(&merged, json).into_diagnostic(),
        None => Ok(()),
    }
}

fn handle_filter(events: &Path, config: &Path) -> miette::Result<()> {
    let filter = collect(events, config)?;
    output::print_names(filter.iter().map(|n| label(n))).into_diagnostic()
}

fn handle_generate(events: &Path, config: &Path, output: &Path) -> miette::Result<()> {
    let filter = collect(events, config)?;

    let mut generator = Generator::create(output)?;
    generator
        .out("// Generated by declmeta. Do not edit.")
        .named_separator("Declarations");
    for node in &filter {
        generator.out(&format!("// {} {}", node.kind(), label(node)));
        for tag in node.tags() {
            generator.out(&format!("//   @{}", tag.full()));
        }
        if node.usr().is_empty() {
            generator.warn_node(&format!("declaration '{}' has no USR", label(node)), node);
        }
    }
    generator.done()?;

    tracing::info!(path = %output.display(), declarations = filter.len(), "generated output");
    Ok(())
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

/// Loads a tree and a configuration and offers every descendant to a filter.
fn collect(events: &Path, config: &Path) -> miette::Result<Filter> {
    let tree: NodeRef = load_events(events)?;
    let mut filter = Filter::new(FilterConfig::load(config)?);
    for node in tree.descendants() {
        filter.add(&node);
    }
    tracing::debug!(selected = filter.len(), "filtered declarations");
    Ok(filter)
}

/// Qualified name, falling back to the plain name.
fn label(node: &Node) -> &str {
    if node.qualified_name().is_empty() {
        node.name()
    } else {
        node.qualified_name()
    }
}
