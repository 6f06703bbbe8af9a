//! Defines the command-line arguments and subcommands for the declmeta CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "declmeta",
    version,
    about = "Inspect, merge and filter C/C++ declaration metadata."
)]
pub struct DeclMetaArgs {
    /// Increase log verbosity (-v debug, -vv trace). DECLMETA_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the declaration tree of an event file.
    Tree {
        /// The path to the declaration events JSON file.
        #[arg(required = true)]
        events: PathBuf,
        /// Print the tree as JSON instead of an outline.
        #[arg(long)]
        json: bool,
    },
    /// Merge the trees of two event files, the first winning conflicts.
    Merge {
        #[arg(required = true)]
        first: PathBuf,
        #[arg(required = true)]
        second: PathBuf,
        /// Print the merged tree as JSON instead of an outline.
        #[arg(long)]
        json: bool,
    },
    /// List the qualified names of the type declarations a filter selects.
    Filter {
        #[arg(required = true)]
        events: PathBuf,
        /// Filter configuration (.yaml/.yml or .json).
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Write a listing of the filtered declarations through a generator.
    Generate {
        #[arg(required = true)]
        events: PathBuf,
        /// Filter configuration (.yaml/.yml or .json).
        #[arg(short, long)]
        config: PathBuf,
        /// The file to generate.
        #[arg(short, long)]
        output: PathBuf,
    },
}
