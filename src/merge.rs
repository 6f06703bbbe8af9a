//! Cross-unit merging of declaration trees.
//!
//! Two trees built from different compilation units (a header and its
//! implementation file, say) are combined into a fresh tree that holds at most
//! one node per non-empty Usr. The first tree wins every conflict.

use std::collections::HashSet;

use crate::ast::{Kind, Node, NodeRef};

/// Merges two trees into a new `translation_unit` root.
///
/// When one side is absent the other is returned as-is, without copying.
/// Otherwise every direct child of `a` is deep-copied into the new root,
/// followed by every direct child of `b` whose Usr is empty or does not occur
/// anywhere in `a`. The inputs are left untouched.
///
/// # Examples
///
/// ```rust
/// use declmeta::ast::{Kind, Node};
/// use declmeta::merge::merge;
///
/// let header = Node::create(Kind::TranslationUnit);
/// header.add_child(Node::builder(Kind::FunctionDecl).name("foo").usr("c:@F@foo#").build());
/// let source = Node::create(Kind::TranslationUnit);
/// source.add_child(Node::builder(Kind::FunctionDecl).name("foo").usr("c:@F@foo#").build());
///
/// let merged = merge(Some(header), Some(source)).unwrap();
/// assert_eq!(merged.children().len(), 1);
/// ```
pub fn merge(a: Option<NodeRef>, b: Option<NodeRef>) -> Option<NodeRef> {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        (a, None) => return a,
        (None, b) => return b,
    };

    let known = collect_usrs(&a);
    let merged = Node::create(Kind::TranslationUnit);

    for child in a.children() {
        merged.add_child(child.deep_copy());
    }

    let mut copied = 0usize;
    let mut skipped = 0usize;
    for child in b.children() {
        if child.usr().is_empty() || !known.contains(child.usr()) {
            merged.add_child(child.deep_copy());
            copied += 1;
        } else {
            tracing::trace!(
                usr = child.usr(),
                name = child.name(),
                "dropping duplicate declaration"
            );
            skipped += 1;
        }
    }

    tracing::debug!(
        from_first = a.child_count(),
        from_second = copied,
        duplicates = skipped,
        "merged declaration trees"
    );
    Some(merged)
}

/// Every non-empty Usr in the tree rooted at `root`, the root included.
fn collect_usrs(root: &NodeRef) -> HashSet<String> {
    std::iter::once(root.clone())
        .chain(root.descendants())
        .filter(|n| !n.usr().is_empty())
        .map(|n| n.usr().to_string())
        .collect()
}
