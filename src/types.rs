//! Type descriptors attached to declarations.
//!
//! [`TypeInfo`] carries the front-end's spelling of a type together with the
//! qualifier and category flags it reported. Classification helpers look at
//! the canonical spelling when one was provided, falling back to the written
//! spelling otherwise.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CONSTANTS
// ============================================================================

const INTEGRAL_SPELLINGS: &[&str] = &[
    "bool",
    "char",
    "signed char",
    "unsigned char",
    "char8_t",
    "char16_t",
    "char32_t",
    "wchar_t",
    "short",
    "short int",
    "signed short",
    "signed short int",
    "unsigned short",
    "unsigned short int",
    "int",
    "signed",
    "signed int",
    "unsigned",
    "unsigned int",
    "long",
    "long int",
    "signed long",
    "signed long int",
    "unsigned long",
    "unsigned long int",
    "long long",
    "long long int",
    "signed long long",
    "signed long long int",
    "unsigned long long",
    "unsigned long long int",
    "int8_t",
    "int16_t",
    "int32_t",
    "int64_t",
    "uint8_t",
    "uint16_t",
    "uint32_t",
    "uint64_t",
    "size_t",
    "ptrdiff_t",
    "intptr_t",
    "uintptr_t",
];

const FLOATING_SPELLINGS: &[&str] = &["float", "double", "long double"];

// `__restrict` goes first so the plain `restrict` pass cannot leave `__` behind.
const QUALIFIER_WORDS: &[&str] = &[
    "__restrict ",
    " __restrict",
    "const ",
    " const",
    "volatile ",
    " volatile",
    "restrict ",
    " restrict",
];

// ============================================================================
// TYPE INFO
// ============================================================================

/// A declaration's type as reported by the front-end.
///
/// Sizes are `-1` when the front-end could not compute them.
///
/// # Examples
///
/// ```rust
/// use declmeta::types::TypeInfo;
/// let mut ty = TypeInfo::new("const unsigned int");
/// ty.canonical = "unsigned int".to_string();
/// ty.is_const = true;
/// assert!(ty.is_integral());
/// assert!(ty.is_unsigned());
/// assert_eq!(ty.unqualified_spelling(), "unsigned int");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeInfo {
    pub spelling: String,
    pub canonical: String,
    pub is_const: bool,
    pub is_volatile: bool,
    pub is_restrict: bool,
    pub is_pointer: bool,
    pub is_reference: bool,
    pub is_lvalue_reference: bool,
    pub is_rvalue_reference: bool,
    pub is_array: bool,
    pub is_function_pointer: bool,
    pub pointee_type: String,
    pub array_element_type: String,
    pub array_size: i64,
    pub size_bytes: i64,
    pub alignment: i64,
}

impl Default for TypeInfo {
    fn default() -> Self {
        Self {
            spelling: String::new(),
            canonical: String::new(),
            is_const: false,
            is_volatile: false,
            is_restrict: false,
            is_pointer: false,
            is_reference: false,
            is_lvalue_reference: false,
            is_rvalue_reference: false,
            is_array: false,
            is_function_pointer: false,
            pointee_type: String::new(),
            array_element_type: String::new(),
            array_size: -1,
            size_bytes: -1,
            alignment: -1,
        }
    }
}

impl TypeInfo {
    pub fn new(spelling: impl Into<String>) -> Self {
        Self {
            spelling: spelling.into(),
            ..Self::default()
        }
    }

    /// The spelling classification runs against.
    fn effective(&self) -> &str {
        if self.canonical.is_empty() {
            &self.spelling
        } else {
            &self.canonical
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.spelling.is_empty()
    }

    pub fn is_void(&self) -> bool {
        self.effective() == "void"
    }

    pub fn is_integral(&self) -> bool {
        INTEGRAL_SPELLINGS.contains(&self.effective())
    }

    pub fn is_floating_point(&self) -> bool {
        FLOATING_SPELLINGS.contains(&self.effective())
    }

    pub fn is_arithmetic(&self) -> bool {
        self.is_integral() || self.is_floating_point()
    }

    pub fn is_signed(&self) -> bool {
        let ty = self.effective();

        if ty.contains("unsigned")
            || ty == "bool"
            || matches!(ty, "char8_t" | "char16_t" | "char32_t")
            || ty.starts_with("uint")
            || matches!(ty, "size_t" | "uintptr_t")
        {
            return false;
        }

        ty.contains("signed")
            || matches!(ty, "int" | "short" | "long" | "long long" | "char")
            || (ty.starts_with("int") && ty.contains("_t"))
            || matches!(ty, "ptrdiff_t" | "intptr_t")
            || FLOATING_SPELLINGS.contains(&ty)
    }

    pub fn is_unsigned(&self) -> bool {
        let ty = self.effective();
        ty.contains("unsigned")
            || matches!(ty, "bool" | "char8_t" | "char16_t" | "char32_t" | "wchar_t")
            || ty.starts_with("uint")
            || matches!(ty, "size_t" | "uintptr_t")
    }

    pub fn is_builtin(&self) -> bool {
        self.is_void() || self.is_arithmetic()
    }

    pub fn has_qualifiers(&self) -> bool {
        self.is_const || self.is_volatile || self.is_restrict
    }

    /// The written spelling with cv/restrict qualifier words removed.
    pub fn unqualified_spelling(&self) -> String {
        let mut result = self.spelling.clone();
        for word in QUALIFIER_WORDS {
            while let Some(pos) = result.find(word) {
                result.replace_range(pos..pos + word.len(), "");
            }
        }
        result.trim().to_string()
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type_info{{spelling=\"{}\"", self.spelling)?;

        if !self.canonical.is_empty() && self.canonical != self.spelling {
            write!(f, ", canonical=\"{}\"", self.canonical)?;
        }
        if self.is_const {
            write!(f, ", const")?;
        }
        if self.is_volatile {
            write!(f, ", volatile")?;
        }
        if self.is_restrict {
            write!(f, ", restrict")?;
        }
        if self.is_pointer {
            write!(f, ", pointer")?;
            if !self.pointee_type.is_empty() {
                write!(f, " to \"{}\"", self.pointee_type)?;
            }
        }
        if self.is_reference {
            let flavor = if self.is_lvalue_reference { "lvalue" } else { "rvalue" };
            write!(f, ", {} reference", flavor)?;
            if !self.pointee_type.is_empty() {
                write!(f, " to \"{}\"", self.pointee_type)?;
            }
        }
        if self.is_array {
            write!(f, ", array")?;
            if self.array_size >= 0 {
                write!(f, "[{}]", self.array_size)?;
            }
            if !self.array_element_type.is_empty() {
                write!(f, " of \"{}\"", self.array_element_type)?;
            }
        }
        if self.is_function_pointer {
            write!(f, ", function_pointer")?;
        }
        if self.size_bytes >= 0 {
            write!(f, ", size={}", self.size_bytes)?;
        }
        if self.alignment >= 0 {
            write!(f, ", align={}", self.alignment)?;
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_invalid_with_unknown_sizes() {
        let ty = TypeInfo::default();
        assert!(!ty.is_valid());
        assert_eq!(ty.array_size, -1);
        assert_eq!(ty.size_bytes, -1);
        assert_eq!(ty.alignment, -1);
    }

    #[test]
    fn canonical_spelling_drives_classification() {
        let mut ty = TypeInfo::new("my_index_t");
        assert!(!ty.is_integral());
        ty.canonical = "unsigned long".to_string();
        assert!(ty.is_integral());
        assert!(ty.is_unsigned());
        assert!(!ty.is_signed());
    }

    #[test]
    fn signedness_of_common_types() {
        for signed in ["int", "long long", "int32_t", "ptrdiff_t", "double", "char"] {
            assert!(TypeInfo::new(signed).is_signed(), "{signed} should be signed");
        }
        for unsigned in ["unsigned int", "uint8_t", "size_t", "bool", "char16_t"] {
            let ty = TypeInfo::new(unsigned);
            assert!(ty.is_unsigned(), "{unsigned} should be unsigned");
            assert!(!ty.is_signed(), "{unsigned} should not be signed");
        }
    }

    #[test]
    fn builtin_categories() {
        assert!(TypeInfo::new("void").is_builtin());
        assert!(TypeInfo::new("long double").is_floating_point());
        assert!(TypeInfo::new("float").is_arithmetic());
        assert!(!TypeInfo::new("std::string").is_builtin());
    }

    #[test]
    fn strips_qualifier_words() {
        assert_eq!(TypeInfo::new("const volatile int").unqualified_spelling(), "int");
        assert_eq!(TypeInfo::new("char *__restrict ").unqualified_spelling(), "char *");
        assert_eq!(TypeInfo::new("std::string const").unqualified_spelling(), "std::string");
    }

    #[test]
    fn display_lists_set_properties() {
        let mut ty = TypeInfo::new("const int *");
        ty.canonical = "const int *".to_string();
        ty.is_pointer = true;
        ty.pointee_type = "const int".to_string();
        ty.size_bytes = 8;
        ty.alignment = 8;
        assert_eq!(
            ty.to_string(),
            "type_info{spelling=\"const int *\", pointer to \"const int\", size=8, align=8}"
        );

        let mut array = TypeInfo::new("float[4]");
        array.is_array = true;
        array.array_size = 4;
        array.array_element_type = "float".to_string();
        assert_eq!(
            array.to_string(),
            "type_info{spelling=\"float[4]\", array[4] of \"float\"}"
        );
    }
}
