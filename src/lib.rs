//! Metadata model for C/C++ declarations.
//!
//! A front-end reports declarations as events; [`events`] turns them into a
//! [`ast::Node`] tree carrying `@name(args)` [`tags::Tag`]s, [`merge`]
//! combines trees from several compilation units, and [`filter`] selects the
//! type declarations a code generator should emit.

pub use crate::ast::{Access, Declaration, Kind, Node, NodeRef, StorageClass};
pub use crate::errors::{DeclMetaError, Result};
pub use crate::filter::{Filter, FilterConfig, NodeInclusion};
pub use crate::source::{SourceLocation, SourceRange};
pub use crate::tags::Tag;
pub use crate::types::TypeInfo;

pub mod ast;
pub mod cli;
pub mod errors;
pub mod events;
pub mod filter;
pub mod generator;
pub mod merge;
pub mod source;
pub mod tags;
pub mod types;
