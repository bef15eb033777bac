//! Declared-type model for signature parameters.
//!
//! [`TypeExpr`] is the grammar of types a parameter may declare. It is wider
//! than what the classifier accepts: forms such as mappings or arbitrary
//! unions are representable so that they can be rejected with a precise
//! [`ConfigurationError`](crate::ConfigurationError) at compile time.
//!
//! Type expressions render to (and parse from, see [`crate::grammar`]) a
//! compact textual form:
//!
//! ```
//! use sigparse_core::{ScalarType, TypeExpr};
//!
//! let pets = TypeExpr::optional(TypeExpr::sequence(TypeExpr::Scalar(ScalarType::Str)));
//! assert_eq!(pets.to_string(), "Optional[list[str]]");
//! assert_eq!("Optional[list[str]]".parse::<TypeExpr>().unwrap(), pets);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scalar types applied directly as token converters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    /// 64-bit signed integer.
    Int,
    /// 64-bit float.
    Float,
    /// UTF-8 string, passed through unchanged.
    Str,
    /// Filesystem path.
    Path,
}

impl ScalarType {
    /// Grammar keyword for this scalar.
    pub fn keyword(self) -> &'static str {
        match self {
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::Str => "str",
            ScalarType::Path => "path",
        }
    }
}

/// An ordered, finite set of named symbolic constants (an enum).
///
/// # Examples
///
/// ```
/// use sigparse_core::SymbolSet;
///
/// let modes = SymbolSet::new("Mode", ["CREATE", "LIST", "DELETE"]);
/// assert_eq!(modes.name(), "Mode");
/// assert_eq!(modes.symbols(), ["CREATE", "LIST", "DELETE"]);
/// assert!(modes.contains("LIST"));
/// assert!(!modes.contains("list"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolSet {
    name: String,
    symbols: Vec<String>,
}

impl SymbolSet {
    /// Creates a symbol set, keeping the given member order.
    pub fn new<I, S>(name: impl Into<String>, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// Name of the enumeration type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member names in declaration order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Exact-case membership test.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }
}

/// A declared parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeExpr {
    /// `bool`
    Bool,
    /// `int`, `float`, `str`, `path`
    Scalar(ScalarType),
    /// `Name{A, B, C}`
    Symbols(SymbolSet),
    /// `raw`: remaining tokens, uninterpreted.
    Raw,
    /// `None`
    NoneType,
    /// `any`: an untyped parameter.
    Any,
    /// `Optional[T]`
    Optional(Box<TypeExpr>),
    /// `list[T]`
    Sequence(Box<TypeExpr>),
    /// `A | B | ...`
    Union(Vec<TypeExpr>),
    /// `dict[K, V]`
    Mapping(Box<TypeExpr>, Box<TypeExpr>),
    /// `Annotated[T, "doc"]`
    Annotated(Box<TypeExpr>, String),
}

impl TypeExpr {
    /// `Optional[inner]`.
    pub fn optional(inner: TypeExpr) -> Self {
        TypeExpr::Optional(Box::new(inner))
    }

    /// `list[element]`.
    pub fn sequence(element: TypeExpr) -> Self {
        TypeExpr::Sequence(Box::new(element))
    }

    /// `Annotated[inner, "doc"]`.
    pub fn annotated(inner: TypeExpr, doc: impl Into<String>) -> Self {
        TypeExpr::Annotated(Box::new(inner), doc.into())
    }

    /// Peels `Annotated` layers, returning the underlying type and the
    /// outermost documentation string.
    ///
    /// ```
    /// use sigparse_core::{ScalarType, TypeExpr};
    ///
    /// let ty = TypeExpr::annotated(TypeExpr::Scalar(ScalarType::Int), "how many");
    /// let (inner, doc) = ty.strip_annotations();
    /// assert_eq!(inner, &TypeExpr::Scalar(ScalarType::Int));
    /// assert_eq!(doc, Some("how many"));
    /// ```
    pub fn strip_annotations(&self) -> (&TypeExpr, Option<&str>) {
        let mut current = self;
        let mut doc = None;
        while let TypeExpr::Annotated(inner, text) = current {
            doc = doc.or(Some(text.as_str()));
            current = inner;
        }
        (current, doc)
    }

    /// Returns the inner type when this is `Optional[T]` or `T | None`.
    ///
    /// Unions with more than one non-`None` member are not optional types.
    pub fn optional_inner(&self) -> Option<&TypeExpr> {
        match self.strip_annotations().0 {
            TypeExpr::Optional(inner) => Some(inner),
            TypeExpr::Union(members) if members.len() == 2 => {
                let nones = members.iter().filter(|m| m.is_none_type()).count();
                if nones != 1 {
                    return None;
                }
                members.iter().find(|m| !m.is_none_type())
            }
            _ => None,
        }
    }

    /// `true` when this is `Optional[T]` or `T | None`.
    pub fn is_optional(&self) -> bool {
        self.optional_inner().is_some()
    }

    fn is_none_type(&self) -> bool {
        matches!(self.strip_annotations().0, TypeExpr::NoneType)
    }

    /// Short name used in synthesized help (`Mode` rather than
    /// `Mode{A, B}`).
    pub fn type_name(&self) -> String {
        match self {
            TypeExpr::Symbols(set) => set.name().to_string(),
            TypeExpr::Annotated(inner, _) => inner.type_name(),
            TypeExpr::Optional(inner) => format!("Optional[{}]", inner.type_name()),
            TypeExpr::Sequence(inner) => format!("list[{}]", inner.type_name()),
            TypeExpr::Union(members) => members
                .iter()
                .map(TypeExpr::type_name)
                .collect::<Vec<_>>()
                .join(" | "),
            TypeExpr::Mapping(key, value) => {
                format!("dict[{}, {}]", key.type_name(), value.type_name())
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Bool => f.write_str("bool"),
            TypeExpr::Scalar(scalar) => f.write_str(scalar.keyword()),
            TypeExpr::Symbols(set) => write!(f, "{}{{{}}}", set.name, set.symbols.join(", ")),
            TypeExpr::Raw => f.write_str("raw"),
            TypeExpr::NoneType => f.write_str("None"),
            TypeExpr::Any => f.write_str("any"),
            TypeExpr::Optional(inner) => write!(f, "Optional[{inner}]"),
            TypeExpr::Sequence(inner) => write!(f, "list[{inner}]"),
            TypeExpr::Union(members) => {
                for (idx, member) in members.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
            TypeExpr::Mapping(key, value) => write!(f, "dict[{key}, {value}]"),
            TypeExpr::Annotated(inner, doc) => {
                write!(f, "Annotated[{inner}, \"{}\"]", doc.replace('"', "\\\""))
            }
        }
    }
}

impl From<TypeExpr> for String {
    fn from(ty: TypeExpr) -> Self {
        ty.to_string()
    }
}
