//! Adapter from front-end declaration events to a node tree.
//!
//! The front-end that actually parses C/C++ sources is out of process; it
//! emits one [`DeclarationEvent`] per declaration, nested the way the
//! declarations nest in the source. This module turns those events into a
//! tree rooted at a synthetic `translation_unit` node.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::ast::{Declaration, Kind, Node, NodeRef};
use crate::errors::{DeclMetaError, Result};
use crate::tags::{brief_comment, extract_annotations, Tag};

/// One declaration as reported by the front-end.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeclarationEvent {
    pub kind: Kind,
    #[serde(flatten)]
    pub decl: Declaration,
    /// Annotation strings attached explicitly, e.g. through an
    /// `annotate` attribute. Comment annotations are extracted separately.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DeclarationEvent>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventDocument {
    Many(Vec<DeclarationEvent>),
    Unit(Box<DeclarationEvent>),
}

/// Builds a tree under a fresh `translation_unit` root.
pub fn build_tree(events: Vec<DeclarationEvent>) -> NodeRef {
    let root = Node::create(Kind::TranslationUnit);
    for event in events {
        root.add_child(build_node(event));
    }
    tracing::debug!(top_level = root.child_count(), "built declaration tree");
    root
}

/// Reads a JSON event file and builds its tree.
///
/// The file holds either an array of top-level events or a single
/// `translation_unit` event whose children are the top-level events.
pub fn load_events(path: &Path) -> Result<NodeRef> {
    let text = fs::read_to_string(path).map_err(|e| DeclMetaError::io(path, e))?;
    let document: EventDocument =
        serde_json::from_str(&text).map_err(|source| DeclMetaError::Events {
            path: path.to_path_buf(),
            source,
        })?;

    let events = match document {
        EventDocument::Many(events) => events,
        EventDocument::Unit(unit) if unit.kind == Kind::TranslationUnit => unit.children,
        EventDocument::Unit(single) => vec![*single],
    };
    tracing::debug!(path = %path.display(), events = events.len(), "loaded declaration events");
    Ok(build_tree(events))
}

fn build_node(event: DeclarationEvent) -> NodeRef {
    let DeclarationEvent {
        kind,
        mut decl,
        annotations,
        children,
    } = event;

    let tags: Vec<Tag> = annotations
        .iter()
        .map(String::as_str)
        .chain(extract_annotations(&decl.comment).iter().map(String::as_str))
        .map(Tag::parse)
        .collect();

    if decl.brief_comment.is_empty() {
        if let Some(brief) = brief_comment(&decl.comment) {
            decl.brief_comment = brief;
        }
    }

    if !tags.is_empty() {
        tracing::trace!(name = %decl.name, tags = tags.len(), "attached tags");
    }

    let node = Node::builder(kind).declaration(decl).tags(tags).build();
    for child in children {
        node.add_child(build_node(child));
    }
    node
}
