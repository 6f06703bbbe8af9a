//! Declarative selection of type declarations.
//!
//! A [`Filter`] is an ordered, Usr-deduplicated collection of type-level
//! declarations (classes, structs, unions, enums, typedefs and type aliases)
//! governed by an immutable [`FilterConfig`]. Generators populate one to
//! decide which declarations to emit.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::ast::{Kind, Node, NodeRef};
use crate::errors::{DeclMetaError, Result};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Whether related nodes are pulled into a filter alongside a match.
///
/// Carried in the configuration but not consulted by
/// [`Filter::matches_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeInclusion {
    #[default]
    Exclude,
    Include,
}

/// Selection criteria for a [`Filter`].
///
/// Empty lists impose no restriction. Loaded from YAML or JSON:
///
/// ```yaml
/// allowed_kinds: [class_decl, struct_decl]
/// grab_tag_names: [reflect]
/// avoid_tag_names: [internal]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Only these kinds are accepted, when non-empty.
    pub allowed_kinds: Vec<Kind>,
    /// A tagged node must carry at least one of these, when non-empty.
    pub grab_tag_names: Vec<String>,
    /// A node carrying any of these is rejected.
    pub avoid_tag_names: Vec<String>,
    pub child_node_inclusion: NodeInclusion,
    pub parent_node_inclusion: NodeInclusion,
}

impl FilterConfig {
    /// Loads a configuration file; `.yml`/`.yaml` is read as YAML, anything
    /// else as JSON.
    pub fn load(path: &Path) -> Result<FilterConfig> {
        let text = fs::read_to_string(path).map_err(|e| DeclMetaError::io(path, e))?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yml") | Some("yaml")
        );

        let config = if is_yaml {
            serde_yaml::from_str(&text).map_err(|e| DeclMetaError::config(path, e.to_string()))?
        } else {
            serde_json::from_str(&text).map_err(|e| DeclMetaError::config(path, e.to_string()))?
        };
        tracing::debug!(path = %path.display(), ?config, "loaded filter configuration");
        Ok(config)
    }
}

// ============================================================================
// FILTER
// ============================================================================

/// Ordered collection of matching type declarations, unique by Usr.
///
/// # Examples
///
/// ```rust
/// use declmeta::ast::{Kind, Node};
/// use declmeta::filter::{Filter, FilterConfig};
///
/// let mut filter = Filter::new(FilterConfig {
///     allowed_kinds: vec![Kind::ClassDecl],
///     ..FilterConfig::default()
/// });
/// let point = Node::builder(Kind::StructDecl).usr("c:@S@Point").build();
/// assert!(!filter.add(&point));
/// assert!(filter.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Filter {
    nodes: Vec<NodeRef>,
    config: FilterConfig,
}

impl Filter {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            nodes: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Adds `node` unless it is invalid for this filter or its Usr is
    /// already held. Returns whether it was added.
    pub fn add(&mut self, node: &NodeRef) -> bool {
        if !self.is_valid_type(node) || self.contains(node) {
            return false;
        }
        self.nodes.push(node.clone());
        true
    }

    /// Removes the held node with the same Usr as `node`.
    pub fn remove(&mut self, node: &Node) -> bool {
        match self.position_of(node.usr()) {
            Some(index) => {
                self.nodes.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.position_of(node.usr()).is_some()
    }

    pub fn clear(&mut self) -> &mut Self {
        self.nodes.clear();
        self
    }

    /// Drops every held node that no longer satisfies the configuration.
    pub fn clean(&mut self) -> &mut Self {
        let config = &self.config;
        self.nodes.retain(|n| Self::check(config, n));
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Held nodes in insertion order.
    pub fn nodes(&self) -> &[NodeRef] {
        &self.nodes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NodeRef> {
        self.nodes.iter()
    }

    /// Only type declarations that match the configuration are valid.
    pub fn is_valid_type(&self, node: &Node) -> bool {
        if !node.is_type_declaration() {
            tracing::trace!(kind = %node.kind(), name = node.name(), "not a type declaration");
            return false;
        }
        self.matches_config(node)
    }

    pub fn matches_config(&self, node: &Node) -> bool {
        Self::check(&self.config, node)
    }

    // ------------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------------

    fn check(config: &FilterConfig, node: &Node) -> bool {
        if !config.allowed_kinds.is_empty() && !config.allowed_kinds.contains(&node.kind()) {
            tracing::trace!(kind = %node.kind(), name = node.name(), "kind not allowed");
            return false;
        }

        if node.tags().is_empty() {
            return config.grab_tag_names.is_empty();
        }

        if let Some(avoided) = config.avoid_tag_names.iter().find(|t| node.has_tag(t)) {
            tracing::trace!(name = node.name(), tag = %avoided, "avoided tag present");
            return false;
        }

        config.grab_tag_names.is_empty() || node.has_tags(&config.grab_tag_names)
    }

    fn position_of(&self, usr: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.usr() == usr)
    }
}

impl<'a> IntoIterator for &'a Filter {
    type Item = &'a NodeRef;
    type IntoIter = std::slice::Iter<'a, NodeRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(kind: Kind, name: &str, tags: &[&str]) -> NodeRef {
        tags.iter()
            .fold(
                Node::builder(kind).name(name).usr(format!("c:@S@{name}")),
                |b, t| b.annotation(t),
            )
            .build()
    }

    fn config(kinds: &[Kind], grab: &[&str], avoid: &[&str]) -> FilterConfig {
        FilterConfig {
            allowed_kinds: kinds.to_vec(),
            grab_tag_names: grab.iter().map(|s| s.to_string()).collect(),
            avoid_tag_names: avoid.iter().map(|s| s.to_string()).collect(),
            ..FilterConfig::default()
        }
    }

    #[test]
    fn default_filter_accepts_every_type_declaration() {
        let mut filter = Filter::default();
        for kind in [
            Kind::ClassDecl,
            Kind::StructDecl,
            Kind::UnionDecl,
            Kind::EnumDecl,
            Kind::TypedefDecl,
            Kind::TypeAliasDecl,
        ] {
            assert!(filter.add(&ty(kind, kind.as_str(), &[])), "{kind} rejected");
        }
        assert_eq!(filter.len(), 6);
    }

    #[test]
    fn non_types_are_rejected() {
        let mut filter = Filter::default();
        assert!(!filter.add(&ty(Kind::FunctionDecl, "run", &[])));
        assert!(!filter.add(&ty(Kind::VariableDecl, "count", &[])));
        assert!(!filter.add(&ty(Kind::NamespaceDecl, "app", &[])));
        assert!(filter.is_empty());
    }

    #[test]
    fn duplicates_by_usr_are_rejected() {
        let mut filter = Filter::default();
        let first = ty(Kind::ClassDecl, "Widget", &[]);
        let same_usr = ty(Kind::ClassDecl, "Widget", &[]);
        assert!(filter.add(&first));
        assert!(filter.contains(&first));
        assert!(!filter.add(&same_usr));
        assert!(!filter.add(&first));
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn allowed_kinds_restrict_membership() {
        let mut filter = Filter::new(config(&[Kind::ClassDecl], &[], &[]));
        assert!(!filter.add(&ty(Kind::StructDecl, "Point", &[])));
        assert!(filter.is_empty());
        assert!(filter.add(&ty(Kind::ClassDecl, "Widget", &[])));
    }

    #[test]
    fn avoid_list_rejects_tagged_nodes() {
        let filter = Filter::new(config(&[], &[], &["internal"]));
        assert!(!filter.matches_config(&ty(Kind::ClassDecl, "A", &["reflect", "internal"])));
        assert!(filter.matches_config(&ty(Kind::ClassDecl, "B", &["reflect"])));
        assert!(filter.matches_config(&ty(Kind::ClassDecl, "C", &[])));
    }

    #[test]
    fn grab_list_requires_a_matching_tag() {
        let filter = Filter::new(config(&[], &["reflect", "serialize"], &[]));
        assert!(filter.matches_config(&ty(Kind::ClassDecl, "A", &["serialize"])));
        assert!(!filter.matches_config(&ty(Kind::ClassDecl, "B", &["other"])));
        assert!(!filter.matches_config(&ty(Kind::ClassDecl, "C", &[])));
    }

    #[test]
    fn avoid_beats_grab() {
        let filter = Filter::new(config(&[], &["reflect"], &["deprecated"]));
        assert!(!filter.matches_config(&ty(Kind::ClassDecl, "A", &["reflect", "deprecated"])));
    }

    #[test]
    fn remove_and_contains_use_usr() {
        let mut filter = Filter::default();
        let widget = ty(Kind::ClassDecl, "Widget", &[]);
        let gadget = ty(Kind::ClassDecl, "Gadget", &[]);
        filter.add(&widget);

        assert!(!filter.contains(&gadget));
        assert!(!filter.remove(&gadget));
        assert!(filter.remove(&ty(Kind::ClassDecl, "Widget", &[])));
        assert!(filter.is_empty());
        assert!(!filter.remove(&widget));
    }

    #[test]
    fn clean_keeps_matching_nodes_in_order() {
        let mut filter = Filter::new(config(&[], &[], &["internal"]));
        filter.add(&ty(Kind::ClassDecl, "A", &[]));
        filter.add(&ty(Kind::ClassDecl, "B", &[]));
        filter.add(&ty(Kind::ClassDecl, "C", &[]));

        filter.config.avoid_tag_names.clear();
        filter.config.allowed_kinds = vec![Kind::StructDecl];
        filter.add(&ty(Kind::StructDecl, "D", &[]));
        filter.config.allowed_kinds = vec![Kind::ClassDecl];

        let names: Vec<&str> = filter.clean().iter().map(|n| n.name()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn clear_and_iteration() {
        let mut filter = Filter::default();
        filter.add(&ty(Kind::EnumDecl, "Color", &[]));
        filter.add(&ty(Kind::UnionDecl, "Value", &[]));

        let names: Vec<&str> = (&filter).into_iter().map(|n| n.name()).collect();
        assert_eq!(names, ["Color", "Value"]);
        assert!(filter.clear().is_empty());
    }

    #[test]
    fn inclusion_modes_do_not_affect_matching() {
        let mut cfg = config(&[], &["reflect"], &[]);
        cfg.child_node_inclusion = NodeInclusion::Include;
        cfg.parent_node_inclusion = NodeInclusion::Include;
        let filter = Filter::new(cfg);
        assert!(!filter.matches_config(&ty(Kind::ClassDecl, "Untagged", &[])));
    }

    #[test]
    fn config_decodes_from_yaml() {
        let cfg: FilterConfig = serde_yaml::from_str(
            "allowed_kinds: [class_decl, enum_decl]\n\
             grab_tag_names: [reflect]\n\
             child_node_inclusion: include\n",
        )
        .unwrap();
        assert_eq!(cfg.allowed_kinds, [Kind::ClassDecl, Kind::EnumDecl]);
        assert_eq!(cfg.grab_tag_names, ["reflect"]);
        assert!(cfg.avoid_tag_names.is_empty());
        assert_eq!(cfg.child_node_inclusion, NodeInclusion::Include);
        assert_eq!(cfg.parent_node_inclusion, NodeInclusion::Exclude);
    }

    #[test]
    fn config_rejects_unknown_kinds() {
        let err = serde_json::from_str::<FilterConfig>(r#"{"allowed_kinds": ["struct"]}"#);
        assert!(err.is_err());
    }
}
