//! The keyword mapping handed to the wrapped callable.

use std::any::type_name;

use indexmap::IndexMap;
use serde::Serialize;
use sigparse_core::{FromValue, Value};

use crate::error::ArgumentError;

/// Ordered `name → value` mapping, one entry per signature parameter.
///
/// Entries follow the signature's declaration order, whether the value came
/// from the command line, from state or from a keyword.
///
/// # Examples
///
/// ```
/// use sigparse::Arguments;
/// use sigparse_core::Value;
///
/// let args: Arguments = [("name", Value::from("Johnny")), ("age", Value::from(33))]
///     .into_iter()
///     .collect();
///
/// assert_eq!(args.get::<String>("name").unwrap(), "Johnny");
/// assert_eq!(args.get::<u8>("age").unwrap(), 33);
/// assert!(args.get::<bool>("age").is_err());
/// assert!(args.get::<i64>("missing").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Arguments {
    values: IndexMap<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `name` as a `T`.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T, ArgumentError> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| ArgumentError::Missing(name.to_string()))?;
        T::from_value(value).ok_or_else(|| ArgumentError::TypeMismatch {
            name: name.to_string(),
            expected: type_name::<T>(),
            found: value.kind_name(),
        })
    }

    /// The raw value for `name`.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.values
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

impl IntoIterator for Arguments {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_get_optional_and_lists() {
        let args: Arguments = [
            ("pets", Value::None),
            ("files", Value::from(vec![PathBuf::from("a"), PathBuf::from("b")])),
        ]
        .into_iter()
        .collect();

        assert_eq!(args.get::<Option<Vec<String>>>("pets").unwrap(), None);
        assert_eq!(
            args.get::<Vec<PathBuf>>("files").unwrap(),
            vec![PathBuf::from("a"), PathBuf::from("b")]
        );
    }

    #[test]
    fn test_type_mismatch_names_both_types() {
        let args: Arguments = [("age", Value::Int(3))].into_iter().collect();
        let err = args.get::<String>("age").unwrap_err();
        assert!(matches!(
            err,
            ArgumentError::TypeMismatch { ref name, found: "int", .. } if name == "age"
        ));
        assert!(err.to_string().contains("String"), "{err}");
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let args: Arguments = [("b", Value::Int(1)), ("a", Value::Bool(true))]
            .into_iter()
            .collect();
        assert_eq!(
            serde_json::to_string(&args).unwrap(),
            r#"{"b":1,"a":true}"#
        );
        assert_eq!(args.names().collect::<Vec<_>>(), ["b", "a"]);
    }
}
