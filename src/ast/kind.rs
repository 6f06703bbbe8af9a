//! The closed set of declaration kinds and their fixed classifications.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Discriminant of a declaration node.
///
/// Classification helpers are static mappings over this enum and cannot be
/// changed per node.
///
/// # Examples
///
/// ```rust
/// use declmeta::ast::Kind;
/// assert!(Kind::StructDecl.is_type_declaration());
/// assert!(Kind::StructDecl.is_record_declaration());
/// assert!(!Kind::EnumDecl.is_record_declaration());
/// assert!(Kind::ConstructorDecl.is_callable());
/// assert_eq!(Kind::StructDecl.as_str(), "struct_decl");
/// assert_eq!("struct_decl".parse::<Kind>(), Ok(Kind::StructDecl));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    #[default]
    Unknown,

    TranslationUnit,

    NamespaceDecl,
    NamespaceAlias,
    UsingDirective,
    UsingDeclaration,

    ClassDecl,
    StructDecl,
    UnionDecl,
    EnumDecl,
    EnumConstantDecl,
    TypedefDecl,
    TypeAliasDecl,

    FieldDecl,
    MethodDecl,
    ConstructorDecl,
    DestructorDecl,
    ConversionDecl,

    FunctionDecl,
    FunctionTemplate,
    ParameterDecl,

    VariableDecl,

    ClassTemplate,
    TemplateTypeParameter,
    TemplateNonTypeParameter,
    TemplateTemplateParameter,

    FriendDecl,
    BaseSpecifier,
    LinkageSpec,
    StaticAssertDecl,
}

impl Kind {
    pub const ALL: [Kind; 30] = [
        Kind::Unknown,
        Kind::TranslationUnit,
        Kind::NamespaceDecl,
        Kind::NamespaceAlias,
        Kind::UsingDirective,
        Kind::UsingDeclaration,
        Kind::ClassDecl,
        Kind::StructDecl,
        Kind::UnionDecl,
        Kind::EnumDecl,
        Kind::EnumConstantDecl,
        Kind::TypedefDecl,
        Kind::TypeAliasDecl,
        Kind::FieldDecl,
        Kind::MethodDecl,
        Kind::ConstructorDecl,
        Kind::DestructorDecl,
        Kind::ConversionDecl,
        Kind::FunctionDecl,
        Kind::FunctionTemplate,
        Kind::ParameterDecl,
        Kind::VariableDecl,
        Kind::ClassTemplate,
        Kind::TemplateTypeParameter,
        Kind::TemplateNonTypeParameter,
        Kind::TemplateTemplateParameter,
        Kind::FriendDecl,
        Kind::BaseSpecifier,
        Kind::LinkageSpec,
        Kind::StaticAssertDecl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Unknown => "unknown",
            Kind::TranslationUnit => "translation_unit",
            Kind::NamespaceDecl => "namespace_decl",
            Kind::NamespaceAlias => "namespace_alias",
            Kind::UsingDirective => "using_directive",
            Kind::UsingDeclaration => "using_declaration",
            Kind::ClassDecl => "class_decl",
            Kind::StructDecl => "struct_decl",
            Kind::UnionDecl => "union_decl",
            Kind::EnumDecl => "enum_decl",
            Kind::EnumConstantDecl => "enum_constant_decl",
            Kind::TypedefDecl => "typedef_decl",
            Kind::TypeAliasDecl => "type_alias_decl",
            Kind::FieldDecl => "field_decl",
            Kind::MethodDecl => "method_decl",
            Kind::ConstructorDecl => "constructor_decl",
            Kind::DestructorDecl => "destructor_decl",
            Kind::ConversionDecl => "conversion_decl",
            Kind::FunctionDecl => "function_decl",
            Kind::FunctionTemplate => "function_template",
            Kind::ParameterDecl => "parameter_decl",
            Kind::VariableDecl => "variable_decl",
            Kind::ClassTemplate => "class_template",
            Kind::TemplateTypeParameter => "template_type_parameter",
            Kind::TemplateNonTypeParameter => "template_non_type_parameter",
            Kind::TemplateTemplateParameter => "template_template_parameter",
            Kind::FriendDecl => "friend_decl",
            Kind::BaseSpecifier => "base_specifier",
            Kind::LinkageSpec => "linkage_spec",
            Kind::StaticAssertDecl => "static_assert_decl",
        }
    }

    /// Classes, structs, unions, enums, typedefs and type aliases.
    pub fn is_type_declaration(&self) -> bool {
        matches!(
            self,
            Kind::ClassDecl
                | Kind::StructDecl
                | Kind::UnionDecl
                | Kind::EnumDecl
                | Kind::TypedefDecl
                | Kind::TypeAliasDecl
        )
    }

    pub fn is_record_declaration(&self) -> bool {
        matches!(self, Kind::ClassDecl | Kind::StructDecl | Kind::UnionDecl)
    }

    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            Kind::FunctionDecl
                | Kind::FunctionTemplate
                | Kind::MethodDecl
                | Kind::ConstructorDecl
                | Kind::DestructorDecl
                | Kind::ConversionDecl
        )
    }

    /// Member functions of a record: methods, constructors, destructors and
    /// conversion operators.
    pub fn is_method(&self) -> bool {
        matches!(
            self,
            Kind::MethodDecl | Kind::ConstructorDecl | Kind::DestructorDecl | Kind::ConversionDecl
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown declaration kind '{0}'")]
pub struct ParseKindError(pub String);

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}
