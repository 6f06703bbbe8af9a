//! Declaration tree for parsed C/C++ sources.
//!
//! This module provides the node type every other part of the crate works
//! on. A tree is a strict top-down ownership hierarchy: each [`Node`] owns its
//! children through [`NodeRef`] handles and keeps a weak back-reference to
//! its parent that is only ever used for upward lookups.
//!
//! Nodes cannot be constructed directly. [`Node::builder`] (or the shorthand
//! [`Node::create`]) is the only way to obtain one, so every node carries a
//! kind from the moment it exists.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use crate::source::{SourceLocation, SourceRange};
use crate::tags::Tag;
use crate::types::TypeInfo;

pub mod kind;
pub mod query;

pub use kind::{Kind, ParseKindError};
pub use query::Descendants;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Owning handle to a node.
pub type NodeRef = Arc<Node>;

/// Member access of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    #[default]
    Invalid,
    Public,
    Protected,
    Private,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Invalid => "invalid",
            Access::Public => "public",
            Access::Protected => "protected",
            Access::Private => "private",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage class specifier of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageClass {
    #[default]
    None,
    Extern,
    Static,
    Register,
    Auto,
    ThreadLocal,
}

impl StorageClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageClass::None => "none",
            StorageClass::Extern => "extern",
            StorageClass::Static => "static",
            StorageClass::Register => "register",
            StorageClass::Auto => "auto",
            StorageClass::ThreadLocal => "thread_local",
        }
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the front-end reports about one declaration, minus its kind,
/// tags and tree position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Declaration {
    /// Stable identity across re-parses. Empty means "never deduplicate".
    pub usr: String,
    pub name: String,
    pub qualified_name: String,
    /// May include the signature for callables.
    pub display_name: String,
    pub mangled_name: String,

    pub location: SourceLocation,
    pub extent: SourceRange,

    #[serde(rename = "type")]
    pub ty: TypeInfo,
    pub return_type: TypeInfo,

    pub access: Access,
    pub storage_class: StorageClass,

    pub is_definition: bool,
    pub is_virtual: bool,
    pub is_pure_virtual: bool,
    pub is_override: bool,
    pub is_final: bool,
    pub is_static: bool,
    pub is_const_method: bool,
    pub is_inline: bool,
    pub is_explicit: bool,
    pub is_constexpr: bool,
    pub is_noexcept: bool,
    pub is_deleted: bool,
    pub is_defaulted: bool,
    pub is_anonymous: bool,
    pub is_scoped_enum: bool,
    pub is_template: bool,
    pub is_template_specialization: bool,
    pub is_variadic: bool,
    pub is_bitfield: bool,
    pub is_virtual_base: bool,
    pub has_default_value: bool,

    pub bitfield_width: i32,
    pub enum_value: i64,

    pub default_value: String,
    pub underlying_type: String,
    pub comment: String,
    pub brief_comment: String,
}

/// One parsed declaration in the tree.
pub struct Node {
    kind: Kind,
    decl: Declaration,
    tags: Vec<Tag>,
    parent: RwLock<Weak<Node>>,
    children: RwLock<Vec<NodeRef>>,
}

/// Population stage of a node.
///
/// The adapter that owns front-end integration fills the declaration field by
/// field and then calls [`NodeBuilder::build`] to obtain the handle.
///
/// # Examples
///
/// ```rust
/// use declmeta::ast::{Kind, Node};
/// let person = Node::builder(Kind::StructDecl)
///     .usr("c:@S@Person")
///     .name("Person")
///     .annotation("serialize")
///     .build();
/// assert_eq!(person.kind(), Kind::StructDecl);
/// assert_eq!(person.tags().len(), 1);
/// assert!(person.tags()[0].args().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    kind: Kind,
    decl: Declaration,
    tags: Vec<Tag>,
}

impl NodeBuilder {
    pub fn usr(mut self, usr: impl Into<String>) -> Self {
        self.decl.usr = usr.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.decl.name = name.into();
        self
    }

    pub fn qualified_name(mut self, name: impl Into<String>) -> Self {
        self.decl.qualified_name = name.into();
        self
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.decl.display_name = name.into();
        self
    }

    pub fn ty(mut self, ty: TypeInfo) -> Self {
        self.decl.ty = ty;
        self
    }

    pub fn return_type(mut self, ty: TypeInfo) -> Self {
        self.decl.return_type = ty;
        self
    }

    pub fn location(mut self, location: SourceLocation) -> Self {
        self.decl.location = location;
        self
    }

    pub fn access(mut self, access: Access) -> Self {
        self.decl.access = access;
        self
    }

    /// Replaces the whole declaration payload.
    pub fn declaration(mut self, decl: Declaration) -> Self {
        self.decl = decl;
        self
    }

    /// Direct access for fields without a dedicated setter.
    pub fn declaration_mut(&mut self) -> &mut Declaration {
        &mut self.decl
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags.extend(tags);
        self
    }

    /// Parses a raw annotation string and attaches the resulting tag.
    pub fn annotation(self, raw: &str) -> Self {
        self.tag(Tag::parse(raw))
    }

    pub fn build(self) -> NodeRef {
        Arc::new(Node {
            kind: self.kind,
            decl: self.decl,
            tags: self.tags,
            parent: RwLock::new(Weak::new()),
            children: RwLock::new(Vec::new()),
        })
    }
}

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl Node {
    /// Starts populating a node of the given kind.
    pub fn builder(kind: Kind) -> NodeBuilder {
        NodeBuilder {
            kind,
            decl: Declaration::default(),
            tags: Vec::new(),
        }
    }

    /// Creates an empty, detached node of the given kind.
    pub fn create(kind: Kind) -> NodeRef {
        Node::builder(kind).build()
    }

    // ------------------------------------------------------------------------
    // Identity and attributes
    // ------------------------------------------------------------------------

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn decl(&self) -> &Declaration {
        &self.decl
    }

    pub fn usr(&self) -> &str {
        &self.decl.usr
    }

    pub fn name(&self) -> &str {
        &self.decl.name
    }

    pub fn qualified_name(&self) -> &str {
        &self.decl.qualified_name
    }

    pub fn display_name(&self) -> &str {
        &self.decl.display_name
    }

    pub fn mangled_name(&self) -> &str {
        &self.decl.mangled_name
    }

    pub fn location(&self) -> &SourceLocation {
        &self.decl.location
    }

    pub fn extent(&self) -> &SourceRange {
        &self.decl.extent
    }

    pub fn ty(&self) -> &TypeInfo {
        &self.decl.ty
    }

    pub fn return_type(&self) -> &TypeInfo {
        &self.decl.return_type
    }

    pub fn access(&self) -> Access {
        self.decl.access
    }

    pub fn storage_class(&self) -> StorageClass {
        self.decl.storage_class
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    // ------------------------------------------------------------------------
    // Classification
    // ------------------------------------------------------------------------

    pub fn is_type_declaration(&self) -> bool {
        self.kind.is_type_declaration()
    }

    pub fn is_record_declaration(&self) -> bool {
        self.kind.is_record_declaration()
    }

    pub fn is_callable(&self) -> bool {
        self.kind.is_callable()
    }

    /// Whether this is the defining declaration rather than a forward one.
    pub fn is_definition(&self) -> bool {
        self.decl.is_definition
    }

    // ------------------------------------------------------------------------
    // Tree structure
    // ------------------------------------------------------------------------

    /// The parent, if it is still alive and this node is attached.
    pub fn parent(&self) -> Option<NodeRef> {
        read_lock(&self.parent).upgrade()
    }

    /// A snapshot of the direct children in insertion order.
    pub fn children(&self) -> Vec<NodeRef> {
        read_lock(&self.children).clone()
    }

    pub fn child_count(&self) -> usize {
        read_lock(&self.children).len()
    }

    /// Appends `child` and points its parent link at `self`.
    ///
    /// A child that is still attached elsewhere is detached from its old
    /// parent first. Attaching a node to itself or to one of its own
    /// descendants is refused and leaves both trees untouched.
    pub fn add_child(self: &Arc<Self>, child: NodeRef) {
        if Arc::ptr_eq(self, &child) || self.ancestors().any(|a| Arc::ptr_eq(&a, &child)) {
            tracing::warn!(
                parent = self.name(),
                child = child.name(),
                "refusing to attach a node beneath itself"
            );
            return;
        }

        if let Some(previous) = child.parent() {
            previous.remove_child(&child);
        }

        *write_lock(&child.parent) = Arc::downgrade(self);
        write_lock(&self.children).push(child);
    }

    /// Detaches the first occurrence of `child` (by handle identity).
    ///
    /// Returns the detached handle, or `None` when `child` is not a direct
    /// child of this node.
    pub fn remove_child(&self, child: &NodeRef) -> Option<NodeRef> {
        let removed = {
            let mut children = write_lock(&self.children);
            let position = children.iter().position(|c| Arc::ptr_eq(c, child))?;
            children.remove(position)
        };
        *write_lock(&removed.parent) = Weak::new();
        Some(removed)
    }

    /// Walks parent links from the nearest parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef> {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// Recursively copies this node, its attributes, its tags and its whole
    /// subtree into a fresh detached tree.
    pub fn deep_copy(&self) -> NodeRef {
        let copy = Node::builder(self.kind)
            .declaration(self.decl.clone())
            .tags(self.tags.iter().cloned())
            .build();
        for child in self.children() {
            copy.add_child(child.deep_copy());
        }
        copy
    }

    /// Owned, serializable rendition of this subtree.
    pub fn to_snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            kind: self.kind,
            decl: self.decl.clone(),
            tags: self.tags.clone(),
            children: self.children().iter().map(|c| c.to_snapshot()).collect(),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("usr", &self.decl.usr)
            .field("name", &self.decl.name)
            .field("tags", &self.tags)
            .field("children", &self.child_count())
            .finish()
    }
}

// ============================================================================
// SNAPSHOTS
// ============================================================================

/// Plain-data copy of a subtree, used for JSON output and comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub kind: Kind,
    #[serde(flatten)]
    pub decl: Declaration,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

// ============================================================================
// INTERNAL HELPERS
// ============================================================================

// A panic while a guard is held cannot leave a half-written Vec or Weak
// behind, so poisoned locks are recovered rather than propagated.
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
