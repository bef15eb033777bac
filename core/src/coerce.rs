//! Token-to-value coercers.
//!
//! A [`Coercer`] is attached to every declaration that consumes tokens; the
//! parsing library calls it once per token.

use std::path::PathBuf;

use serde::Serialize;
use tracing::trace;

use crate::error::CoercionError;
use crate::types::{ScalarType, SymbolSet};
use crate::value::{Symbol, Value};

const TRUTHY: [&str; 4] = ["y", "yes", "true", "1"];
const FALSY: [&str; 4] = ["n", "no", "false", "0"];

/// Parses a boolean token, case-insensitively.
///
/// # Examples
///
/// ```
/// use sigparse_core::bool_from_str;
///
/// assert_eq!(bool_from_str("YES"), Ok(true));
/// assert_eq!(bool_from_str("0"), Ok(false));
/// assert!(bool_from_str("maybe").is_err());
/// ```
pub fn bool_from_str(word: &str) -> Result<bool, CoercionError> {
    let lowered = word.to_lowercase();
    if TRUTHY.contains(&lowered.as_str()) {
        Ok(true)
    } else if FALSY.contains(&lowered.as_str()) {
        Ok(false)
    } else {
        Err(CoercionError::InvalidBool(word.to_string()))
    }
}

/// Looks up a symbol by name, case-insensitively.
///
/// An exact-case match wins over a case-folded one, so sets whose members
/// differ only by case still resolve deterministically.
///
/// # Examples
///
/// ```
/// use sigparse_core::{symbol_from_str, SymbolSet};
///
/// let modes = SymbolSet::new("Mode", ["CREATE", "LIST", "DELETE"]);
/// assert_eq!(symbol_from_str(&modes, "CrEaTe").unwrap().name(), "CREATE");
/// assert!(symbol_from_str(&modes, "NOPE").is_err());
/// ```
pub fn symbol_from_str(set: &SymbolSet, word: &str) -> Result<Symbol, CoercionError> {
    let found = set
        .symbols()
        .iter()
        .find(|s| s.as_str() == word)
        .or_else(|| set.symbols().iter().find(|s| s.eq_ignore_ascii_case(word)));

    match found {
        Some(name) => Ok(Symbol::new(set.name(), name.clone())),
        None => Err(CoercionError::UnknownSymbol {
            value: word.to_string(),
            set: set.name().to_string(),
            choices: set.symbols().to_vec(),
        }),
    }
}

/// Applies a scalar type to a raw token.
pub fn scalar_from_str(scalar: ScalarType, word: &str) -> Result<Value, CoercionError> {
    match scalar {
        ScalarType::Int => word
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|source| CoercionError::InvalidInt {
                value: word.to_string(),
                source,
            }),
        ScalarType::Float => word
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|source| CoercionError::InvalidFloat {
                value: word.to_string(),
                source,
            }),
        ScalarType::Str => Ok(Value::Str(word.to_string())),
        ScalarType::Path => Ok(Value::Path(PathBuf::from(word))),
    }
}

/// Per-token converter attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Coercer {
    /// Truthy/falsy word sets.
    Bool,
    /// Case-insensitive symbol lookup.
    Symbol(SymbolSet),
    /// Scalar conversion.
    Scalar(ScalarType),
    /// Token passed through as a string, uninterpreted.
    Raw,
}

impl Coercer {
    /// Converts one raw token.
    ///
    /// # Examples
    ///
    /// ```
    /// use sigparse_core::{Coercer, ScalarType, Value};
    ///
    /// let int = Coercer::Scalar(ScalarType::Int);
    /// assert_eq!(int.coerce("33"), Ok(Value::Int(33)));
    /// assert!(int.coerce("thirty").is_err());
    /// ```
    pub fn coerce(&self, word: &str) -> Result<Value, CoercionError> {
        let value = match self {
            Coercer::Bool => bool_from_str(word).map(Value::Bool),
            Coercer::Symbol(set) => symbol_from_str(set, word).map(Value::Symbol),
            Coercer::Scalar(scalar) => scalar_from_str(*scalar, word),
            Coercer::Raw => Ok(Value::Str(word.to_string())),
        };
        trace!(token = word, coercer = ?self, ok = value.is_ok(), "coerced token");
        value
    }

    /// Member names for symbol coercers, used to render choices.
    pub fn choices(&self) -> Option<&[String]> {
        match self {
            Coercer::Symbol(set) => Some(set.symbols()),
            _ => None,
        }
    }

    /// `true` when tokens may legitimately start with `-`.
    pub fn accepts_negative_numbers(&self) -> bool {
        matches!(
            self,
            Coercer::Scalar(ScalarType::Int) | Coercer::Scalar(ScalarType::Float)
        )
    }
}
