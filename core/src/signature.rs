//! Declarative description of a callable's parameters.
//!
//! Rust has no runtime reflection over function signatures, so the embedding
//! application spells the signature out as a [`Signature`] of
//! [`ParameterSpec`]s. [`ParameterSpec::typed`] derives the declared type
//! from a Rust type through [`Annotate`], which keeps the table close to the
//! function it describes.
//!
//! # Examples
//!
//! ```
//! use sigparse_core::{ParameterSpec, Signature, Value};
//!
//! let signature = Signature::new("greet")
//!     .with_doc("Say hello.")
//!     .param(ParameterSpec::typed::<String>("your_name"))
//!     .param(ParameterSpec::typed::<i64>("your_age"))
//!     .param(ParameterSpec::typed::<Option<Vec<String>>>("pets").with_default(Value::None))
//!     .param(ParameterSpec::typed::<bool>("loves_rust").with_default(false));
//!
//! assert_eq!(signature.names(), ["your_name", "your_age", "pets", "loves_rust"]);
//! assert_eq!(signature.find("pets").unwrap().ty.to_string(), "Optional[list[str]]");
//! ```

use std::path::PathBuf;

use crate::types::{ScalarType, SymbolSet, TypeExpr};
use crate::value::Value;

/// How a parameter collects its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterKind {
    /// A single named parameter.
    #[default]
    Normal,
    /// A star parameter collecting trailing positional tokens; its declared
    /// type is the element type.
    Variadic,
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub ty: TypeExpr,
    pub kind: ParameterKind,
    /// `None` means "no default", `Some(Value::None)` a `None` default.
    pub default: Option<Value>,
    /// Explicit inline documentation.
    pub doc: Option<String>,
}

impl ParameterSpec {
    /// Creates a parameter with an explicit type expression.
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            kind: ParameterKind::Normal,
            default: None,
            doc: None,
        }
    }

    /// Creates a parameter whose type is derived from `T`.
    pub fn typed<T: Annotate>(name: impl Into<String>) -> Self {
        Self::new(name, T::type_expr())
    }

    /// Sets the default value, making the parameter optional.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Marks the parameter as variadic (star syntax).
    pub fn variadic(mut self) -> Self {
        self.kind = ParameterKind::Variadic;
        self
    }

    /// Attaches inline documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// `true` for star parameters.
    pub fn is_variadic(&self) -> bool {
        self.kind == ParameterKind::Variadic
    }

    /// Inline documentation: the explicit doc, else the one carried by an
    /// `Annotated` type.
    pub fn inline_doc(&self) -> Option<&str> {
        self.doc.as_deref().or_else(|| self.ty.strip_annotations().1)
    }

    /// The default in effect: the declared one, or `None` for optional types
    /// declared without a default.
    pub fn effective_default(&self) -> Option<Value> {
        match &self.default {
            Some(value) => Some(value.clone()),
            None if !self.is_variadic() && self.ty.is_optional() => Some(Value::None),
            None => None,
        }
    }

    /// Type a value supplied for this parameter must conform to; variadic
    /// parameters receive a list of their element type.
    pub fn value_type(&self) -> TypeExpr {
        if self.is_variadic() {
            TypeExpr::sequence(self.ty.clone())
        } else {
            self.ty.clone()
        }
    }
}

/// An ordered parameter table plus the callable's documentation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    pub name: String,
    pub doc: Option<String>,
    pub params: Vec<ParameterSpec>,
}

impl Signature {
    /// Creates an empty signature.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the docstring.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Appends a parameter.
    pub fn param(mut self, param: ParameterSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Finds a parameter by name.
    pub fn find(&self, name: &str) -> Option<&ParameterSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Parameter names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Maps a Rust type to its declared [`TypeExpr`].
pub trait Annotate {
    fn type_expr() -> TypeExpr;
}

impl Annotate for bool {
    fn type_expr() -> TypeExpr {
        TypeExpr::Bool
    }
}

macro_rules! impl_annotate_scalar {
    ($scalar:expr => $($ty:ty),*) => {
        $(
            impl Annotate for $ty {
                fn type_expr() -> TypeExpr {
                    TypeExpr::Scalar($scalar)
                }
            }
        )*
    };
}

impl_annotate_scalar!(ScalarType::Int => i8, i16, i32, i64, u8, u16, u32, u64, usize);
impl_annotate_scalar!(ScalarType::Float => f32, f64);
impl_annotate_scalar!(ScalarType::Str => String);
impl_annotate_scalar!(ScalarType::Path => PathBuf);

impl<T: Annotate> Annotate for Option<T> {
    fn type_expr() -> TypeExpr {
        TypeExpr::optional(T::type_expr())
    }
}

impl<T: Annotate> Annotate for Vec<T> {
    fn type_expr() -> TypeExpr {
        TypeExpr::sequence(T::type_expr())
    }
}

/// Capability of an enum-like type: an ordered set of named constants.
///
/// Implement it with [`symbolic_enum!`](crate::symbolic_enum) rather than by
/// hand.
pub trait Symbolic: Sized + Copy + 'static {
    /// Name of the enumeration type.
    const TYPE_NAME: &'static str;

    /// Members in declaration order.
    fn members() -> &'static [Self];

    /// Name of this member.
    fn symbol(&self) -> &'static str;

    /// The set of member names.
    fn symbol_set() -> SymbolSet {
        SymbolSet::new(Self::TYPE_NAME, Self::members().iter().map(Symbolic::symbol))
    }

    /// Exact-case lookup by member name.
    fn from_symbol(name: &str) -> Option<Self> {
        Self::members().iter().copied().find(|m| m.symbol() == name)
    }
}

/// Declares an enum usable as a parameter type.
///
/// The generated type derives `Debug, Clone, Copy, PartialEq, Eq, Hash`,
/// renders as its bare member name through `Display`, and implements
/// [`Symbolic`], [`Annotate`], [`FromValue`](crate::FromValue) and
/// `Into<Value>`.
///
/// # Examples
///
/// ```
/// use sigparse_core::{symbolic_enum, Annotate, Symbolic};
///
/// symbolic_enum! {
///     /// What to do with users.
///     pub enum Mode {
///         CreateUser,
///         ListUsers,
///     }
/// }
///
/// assert_eq!(Mode::CreateUser.to_string(), "CreateUser");
/// assert_eq!(Mode::symbol_set().symbols(), ["CreateUser", "ListUsers"]);
/// assert_eq!(Mode::type_expr().to_string(), "Mode{CreateUser, ListUsers}");
/// ```
#[macro_export]
macro_rules! symbolic_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::Symbolic for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn members() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn symbol(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::Symbolic::symbol(self))
            }
        }

        impl $crate::Annotate for $name {
            fn type_expr() -> $crate::TypeExpr {
                $crate::TypeExpr::Symbols(<$name as $crate::Symbolic>::symbol_set())
            }
        }

        impl ::std::convert::From<$name> for $crate::Value {
            fn from(value: $name) -> Self {
                $crate::Value::Symbol($crate::Symbol::new(
                    <$name as $crate::Symbolic>::TYPE_NAME,
                    $crate::Symbolic::symbol(&value),
                ))
            }
        }

        impl $crate::FromValue for $name {
            fn from_value(value: &$crate::Value) -> ::std::option::Option<Self> {
                match value {
                    $crate::Value::Symbol(sym)
                        if sym.set() == <$name as $crate::Symbolic>::TYPE_NAME =>
                    {
                        <$name as $crate::Symbolic>::from_symbol(sym.name())
                    }
                    _ => ::std::option::Option::None,
                }
            }
        }
    };
}
