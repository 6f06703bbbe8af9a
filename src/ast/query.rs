//! Read-only queries over a node and its subtree.
//!
//! Child queries only ever look at direct children. Recursive search goes
//! through [`Descendants`], a lazy pre-order walk, so callers that only need
//! the first hit can stop early.

use super::{Kind, Node, NodeRef};
use crate::tags::Tag;

// ============================================================================
// DESCENDANTS ITERATOR
// ============================================================================

/// Depth-first, parent-before-children walk over a subtree, excluding the
/// node it started from.
///
/// Each node's children are captured when the node is yielded, so the walk
/// never holds a lock across calls to `next`.
///
/// # Examples
///
/// ```rust
/// use declmeta::ast::{Kind, Node};
/// let root = Node::create(Kind::TranslationUnit);
/// let ns = Node::builder(Kind::NamespaceDecl).name("geo").build();
/// ns.add_child(Node::builder(Kind::StructDecl).name("Point").build());
/// root.add_child(ns);
/// root.add_child(Node::builder(Kind::FunctionDecl).name("origin").build());
///
/// let names: Vec<String> = root.descendants().map(|n| n.name().to_string()).collect();
/// assert_eq!(names, ["geo", "Point", "origin"]);
/// ```
pub struct Descendants {
    stack: Vec<NodeRef>,
}

impl Descendants {
    fn new(root: &Node) -> Self {
        let mut stack = root.children();
        stack.reverse();
        Self { stack }
    }
}

impl Iterator for Descendants {
    type Item = NodeRef;

    fn next(&mut self) -> Option<NodeRef> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}

// ============================================================================
// NODE QUERIES
// ============================================================================

impl Node {
    // ------------------------------------------------------------------------
    // Predicate traversal
    // ------------------------------------------------------------------------

    pub fn descendants(&self) -> Descendants {
        Descendants::new(self)
    }

    /// First direct child matching `pred`.
    pub fn find_child<P>(&self, mut pred: P) -> Option<NodeRef>
    where
        P: FnMut(&NodeRef) -> bool,
    {
        self.children().into_iter().find(|c| pred(c))
    }

    /// All direct children matching `pred`, in order.
    pub fn find_children<P>(&self, mut pred: P) -> Vec<NodeRef>
    where
        P: FnMut(&NodeRef) -> bool,
    {
        self.children().into_iter().filter(|c| pred(c)).collect()
    }

    /// Every node in the subtree matching `pred`, in pre-order.
    ///
    /// The subtree of a matching node is still searched.
    pub fn find_descendants<P>(&self, mut pred: P) -> Vec<NodeRef>
    where
        P: FnMut(&NodeRef) -> bool,
    {
        self.descendants().filter(|n| pred(n)).collect()
    }

    pub fn children_by_kind(&self, kind: Kind) -> Vec<NodeRef> {
        self.find_children(|c| c.kind() == kind)
    }

    /// First direct child whose simple name equals `name` exactly.
    pub fn find_child_by_name(&self, name: &str) -> Option<NodeRef> {
        self.find_child(|c| c.name() == name)
    }

    // ------------------------------------------------------------------------
    // Own tags
    // ------------------------------------------------------------------------

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags().iter().any(|t| t.name() == name)
    }

    /// True when any of `names` is present. An empty list never matches.
    pub fn has_tags<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|n| self.has_tag(n.as_ref()))
    }

    pub fn find_tag(&self, name: &str) -> Option<Tag> {
        self.tags().iter().find(|t| t.name() == name).cloned()
    }

    /// Own tags whose name is in `names`, in tag order.
    pub fn find_tags<S: AsRef<str>>(&self, names: &[S]) -> Vec<Tag> {
        self.tags()
            .iter()
            .filter(|t| names.iter().any(|n| n.as_ref() == t.name()))
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------------
    // Tag-scoped child queries (direct children only)
    // ------------------------------------------------------------------------

    pub fn children_with_tag(&self, name: &str) -> Vec<NodeRef> {
        self.find_children(|c| c.has_tag(name))
    }

    /// Children carrying any of `names`; always empty for an empty list.
    pub fn children_with_any_tag<S: AsRef<str>>(&self, names: &[S]) -> Vec<NodeRef> {
        self.find_children(|c| c.has_tags(names))
    }

    pub fn children_without_tag(&self, name: &str) -> Vec<NodeRef> {
        self.find_children(|c| !c.has_tag(name))
    }

    /// Children carrying none of `names`; every child for an empty list.
    pub fn children_without_any_tag<S: AsRef<str>>(&self, names: &[S]) -> Vec<NodeRef> {
        self.find_children(|c| !c.has_tags(names))
    }

    pub fn find_child_with_tag(&self, name: &str) -> Option<NodeRef> {
        self.find_child(|c| c.has_tag(name))
    }

    pub fn find_child_with_any_tag<S: AsRef<str>>(&self, names: &[S]) -> Option<NodeRef> {
        self.find_child(|c| c.has_tags(names))
    }

    pub fn find_child_without_tag(&self, name: &str) -> Option<NodeRef> {
        self.find_child(|c| !c.has_tag(name))
    }

    pub fn find_child_without_any_tag<S: AsRef<str>>(&self, names: &[S]) -> Option<NodeRef> {
        self.find_child(|c| !c.has_tags(names))
    }

    // ------------------------------------------------------------------------
    // Ancestor tags
    // ------------------------------------------------------------------------

    /// Tags of every ancestor, nearest ancestor first.
    pub fn ancestor_tags(&self) -> Vec<Tag> {
        self.ancestors()
            .flat_map(|a| a.tags().to_vec())
            .collect()
    }

    /// Own tags followed by [`ancestor_tags`](Self::ancestor_tags).
    pub fn all_tags(&self) -> Vec<Tag> {
        let mut tags = self.tags().to_vec();
        tags.extend(self.ancestor_tags());
        tags
    }

    // ------------------------------------------------------------------------
    // Record and callable views
    // ------------------------------------------------------------------------

    pub fn bases(&self) -> Vec<NodeRef> {
        self.children_by_kind(Kind::BaseSpecifier)
    }

    /// Methods, constructors, destructors and conversion operators.
    pub fn methods(&self) -> Vec<NodeRef> {
        self.find_children(|c| c.kind().is_method())
    }

    pub fn fields(&self) -> Vec<NodeRef> {
        self.children_by_kind(Kind::FieldDecl)
    }

    pub fn parameters(&self) -> Vec<NodeRef> {
        self.children_by_kind(Kind::ParameterDecl)
    }

    pub fn enum_constants(&self) -> Vec<NodeRef> {
        self.children_by_kind(Kind::EnumConstantDecl)
    }
}
