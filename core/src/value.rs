//! Runtime values flowing between the parser and the wrapped callable.
//!
//! Parsed tokens, defaults and pre-bound state all become [`Value`]s. The
//! callable reads them back into Rust types through [`FromValue`].

use std::fmt;
use std::path::PathBuf;

use serde::{Serialize, Serializer};

use crate::coerce;
use crate::types::{ScalarType, TypeExpr};

/// A member of a [`SymbolSet`](crate::SymbolSet), identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    set: String,
    name: String,
}

impl Symbol {
    /// Creates a symbol belonging to the set named `set`.
    pub fn new(set: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            set: set.into(),
            name: name.into(),
        }
    }

    /// Name of the owning symbol set.
    pub fn set(&self) -> &str {
        &self.set
    }

    /// Member name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

/// A typed value.
///
/// Serializes to plain JSON-like data: symbols become their name and
/// [`Value::None`] becomes `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value (`None`).
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Path(PathBuf),
    Symbol(Symbol),
    List(Vec<Value>),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Path(_) => "path",
            Value::Symbol(_) => "symbol",
            Value::List(_) => "list",
        }
    }

    /// Checks this value against `ty`, returning it normalized to the type.
    ///
    /// Integers widen to floats and strings become paths where the type asks
    /// for it. Returns `None` when the value does not fit.
    ///
    /// # Examples
    ///
    /// ```
    /// use sigparse_core::{ScalarType, TypeExpr, Value};
    ///
    /// let float = TypeExpr::Scalar(ScalarType::Float);
    /// assert_eq!(Value::Int(3).conform(&float), Some(Value::Float(3.0)));
    ///
    /// let optional = TypeExpr::optional(TypeExpr::Bool);
    /// assert_eq!(Value::None.conform(&optional), Some(Value::None));
    /// assert_eq!(Value::Str("x".into()).conform(&optional), None);
    /// ```
    pub fn conform(&self, ty: &TypeExpr) -> Option<Value> {
        match (self, ty) {
            (_, TypeExpr::Annotated(inner, _)) => self.conform(inner),
            (_, TypeExpr::Any) => Some(self.clone()),
            (_, TypeExpr::Optional(inner)) => match self {
                Value::None => Some(Value::None),
                _ => self.conform(inner),
            },
            (_, TypeExpr::Union(members)) => members.iter().find_map(|m| self.conform(m)),
            (Value::None, TypeExpr::NoneType) => Some(Value::None),
            (Value::Bool(b), TypeExpr::Bool) => Some(Value::Bool(*b)),
            (Value::Int(i), TypeExpr::Scalar(ScalarType::Int)) => Some(Value::Int(*i)),
            (Value::Int(i), TypeExpr::Scalar(ScalarType::Float)) => Some(Value::Float(*i as f64)),
            (Value::Float(x), TypeExpr::Scalar(ScalarType::Float)) => Some(Value::Float(*x)),
            (Value::Str(s), TypeExpr::Scalar(ScalarType::Str)) => Some(Value::Str(s.clone())),
            (Value::Str(s), TypeExpr::Scalar(ScalarType::Path)) => Some(Value::Path(s.into())),
            (Value::Path(p), TypeExpr::Scalar(ScalarType::Path)) => Some(Value::Path(p.clone())),
            (Value::Symbol(sym), TypeExpr::Symbols(set)) => {
                (sym.set() == set.name() && set.contains(sym.name())).then(|| self.clone())
            }
            (Value::List(items), TypeExpr::Sequence(element)) => items
                .iter()
                .map(|item| item.conform(element))
                .collect::<Option<Vec<_>>>()
                .map(Value::List),
            (Value::List(items), TypeExpr::Raw) => items
                .iter()
                .all(|item| matches!(item, Value::Str(_)))
                .then(|| self.clone()),
            _ => None,
        }
    }

    /// Builds a value of type `ty` from JSON data (as loaded from a
    /// configuration file).
    ///
    /// Strings are accepted for symbol sets (matched like command-line
    /// tokens) and paths. Returns `None` when the data does not fit.
    ///
    /// # Examples
    ///
    /// ```
    /// use sigparse_core::{parse_type_expr, Symbol, Value};
    ///
    /// let ty = parse_type_expr("list[Mode{CREATE, LIST}] | None").unwrap();
    /// let json = serde_json::json!(["create", "LIST"]);
    /// assert_eq!(
    ///     Value::from_json(&ty, &json),
    ///     Some(Value::List(vec![
    ///         Value::Symbol(Symbol::new("Mode", "CREATE")),
    ///         Value::Symbol(Symbol::new("Mode", "LIST")),
    ///     ]))
    /// );
    /// assert_eq!(Value::from_json(&ty, &serde_json::Value::Null), Some(Value::None));
    /// ```
    pub fn from_json(ty: &TypeExpr, json: &serde_json::Value) -> Option<Value> {
        use serde_json::Value as Json;

        match (ty, json) {
            (TypeExpr::Annotated(inner, _), _) => Value::from_json(inner, json),
            (TypeExpr::Optional(_), Json::Null) | (TypeExpr::NoneType, Json::Null) => {
                Some(Value::None)
            }
            (TypeExpr::Optional(inner), _) => Value::from_json(inner, json),
            (TypeExpr::Union(members), _) => {
                members.iter().find_map(|m| Value::from_json(m, json))
            }
            (TypeExpr::Bool, Json::Bool(b)) => Some(Value::Bool(*b)),
            (TypeExpr::Scalar(ScalarType::Int), Json::Number(n)) => n.as_i64().map(Value::Int),
            (TypeExpr::Scalar(ScalarType::Float), Json::Number(n)) => n.as_f64().map(Value::Float),
            (TypeExpr::Scalar(ScalarType::Str), Json::String(s)) => Some(Value::Str(s.clone())),
            (TypeExpr::Scalar(ScalarType::Path), Json::String(s)) => Some(Value::Path(s.into())),
            (TypeExpr::Symbols(set), Json::String(s)) => {
                coerce::symbol_from_str(set, s).ok().map(Value::Symbol)
            }
            (TypeExpr::Sequence(element), Json::Array(items)) => items
                .iter()
                .map(|item| Value::from_json(element, item))
                .collect::<Option<Vec<_>>>()
                .map(Value::List),
            (TypeExpr::Raw, Json::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(|s| Value::Str(s.to_string())))
                .collect::<Option<Vec<_>>>()
                .map(Value::List),
            (TypeExpr::Any, _) => Some(Value::from_untyped_json(json)),
            _ => None,
        }
    }

    fn from_untyped_json(json: &serde_json::Value) -> Value {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::None,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .unwrap_or_else(|| Value::Float(n.as_f64().unwrap_or(f64::NAN))),
            Json::String(s) => Value::Str(s.clone()),
            Json::Array(items) => Value::List(items.iter().map(Value::from_untyped_json).collect()),
            Json::Object(_) => Value::Str(json.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Path(p) => write!(f, "{}", p.display()),
            Value::Symbol(sym) => write!(f, "{sym}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<PathBuf> for Value {
    fn from(value: PathBuf) -> Self {
        Value::Path(value)
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Value::Symbol(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

/// Extraction of Rust values from [`Value`]s.
///
/// Returns `None` when the value has the wrong shape.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

macro_rules! impl_from_value_int {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Int(i) => <$ty>::try_from(*i).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.clone()),
            Value::Symbol(sym) => Some(sym.name().to_string()),
            _ => None,
        }
    }
}

impl FromValue for PathBuf {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Path(p) => Some(p.clone()),
            Value::Str(s) => Some(PathBuf::from(s)),
            _ => None,
        }
    }
}

impl FromValue for Symbol {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Symbol(sym) => Some(sym.clone()),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::None => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SymbolSet;

    #[test]
    fn test_conform_sequence_normalizes_elements() {
        let ty = TypeExpr::sequence(TypeExpr::Scalar(ScalarType::Path));
        let value = Value::from(vec!["a", "b"]);
        assert_eq!(
            value.conform(&ty),
            Some(Value::List(vec![
                Value::Path("a".into()),
                Value::Path("b".into())
            ]))
        );
    }

    #[test]
    fn test_conform_rejects_foreign_symbol() {
        let ty = TypeExpr::Symbols(SymbolSet::new("Mode", ["CREATE"]));
        assert!(Value::Symbol(Symbol::new("Mode", "CREATE")).conform(&ty).is_some());
        assert!(Value::Symbol(Symbol::new("Other", "CREATE")).conform(&ty).is_none());
        assert!(Value::Symbol(Symbol::new("Mode", "DELETE")).conform(&ty).is_none());
    }

    #[test]
    fn test_serialize_untagged() {
        let value = Value::List(vec![
            Value::Int(1),
            Value::None,
            Value::Symbol(Symbol::new("Mode", "LIST")),
        ]);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            serde_json::json!([1, null, "LIST"])
        );
    }

    #[test]
    fn test_from_value_extraction() {
        assert_eq!(i32::from_value(&Value::Int(33)), Some(33));
        assert_eq!(u8::from_value(&Value::Int(-1)), None);
        assert_eq!(f64::from_value(&Value::Int(2)), Some(2.0));
        assert_eq!(
            Option::<Vec<String>>::from_value(&Value::None),
            Some(None)
        );
        assert_eq!(
            Vec::<String>::from_value(&Value::from(vec!["Goofy", "Larry"])),
            Some(vec!["Goofy".to_string(), "Larry".to_string()])
        );
        assert_eq!(bool::from_value(&Value::Str("true".into())), None);
    }

    #[test]
    fn test_display_list() {
        let value = Value::from(vec![1, 2, 3]);
        assert_eq!(value.to_string(), "[1, 2, 3]");
        assert_eq!(Value::None.to_string(), "None");
    }

    #[test]
    fn test_display_whole_float_keeps_fraction() {
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::Float(-3.0).to_string(), "-3.0");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::List(vec![Value::Float(2.0)]).to_string(), "[2.0]");
    }
}
