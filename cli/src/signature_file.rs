//! Signatures declared in YAML or JSON files.
//!
//! ```yaml
//! name: greet
//! doc: |
//!   Greet someone.
//!
//!   Args:
//!     name: Who to greet.
//! docstring_style: google
//! ignore: [connection]
//! state:
//!   connection: "db://local"
//! params:
//!   - name: connection
//!     type: str
//!   - name: name
//!     type: str
//!   - name: pets
//!     type: list[str] | None
//!     default: null
//! ```
//!
//! A missing `default` key means "no default"; `default: null` is a `None`
//! default.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use sigparse::{
    Arguments, BoundParser, ConfigurationError, DocstringStyle, ParameterSpec, ParserOptions,
    RaisingParser, Signature, TypeExpr, Value, as_arg_parser,
};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or compiling a signature file.
#[derive(Debug, Error)]
pub enum SignatureFileError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in '{path}': {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported signature file extension: '{0}' (expected .yaml, .yml or .json)")]
    UnsupportedExtension(PathBuf),

    #[error("{what} for parameter `{parameter}` does not match type `{ty}`: {value}")]
    InvalidValue {
        what: &'static str,
        parameter: String,
        ty: String,
        value: String,
    },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// One parameter entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default, deserialize_with = "present")]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub variadic: bool,
}

/// Keeps `default: null` distinct from an absent `default` key.
fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// A whole signature file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignatureFile {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub docstring_style: Option<DocstringStyle>,
    #[serde(default)]
    pub ignore: Vec<String>,
    #[serde(default)]
    pub state: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub params: Vec<ParamEntry>,
}

impl SignatureFile {
    /// Reads a signature file; the format follows the extension.
    pub fn load(path: &Path) -> Result<Self, SignatureFileError> {
        let raw = fs::read_to_string(path).map_err(|source| SignatureFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let file = match extension.as_deref() {
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&raw).map_err(|source| SignatureFileError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            Some("json") => serde_json::from_str(&raw).map_err(|source| SignatureFileError::Json {
                path: path.to_path_buf(),
                source,
            })?,
            _ => return Err(SignatureFileError::UnsupportedExtension(path.to_path_buf())),
        };

        debug!(path = %path.display(), "loaded signature file");
        Ok(file)
    }

    /// Builds the declared signature, converting defaults by type.
    pub fn signature(&self) -> Result<Signature, SignatureFileError> {
        let mut signature = Signature::new(self.name.clone());
        if let Some(doc) = &self.doc {
            signature = signature.with_doc(doc.clone());
        }

        for entry in &self.params {
            let mut param = ParameterSpec::new(entry.name.clone(), entry.ty.clone());
            if entry.variadic {
                param = param.variadic();
            }
            if let Some(doc) = &entry.doc {
                param = param.with_doc(doc.clone());
            }
            if let Some(json) = &entry.default {
                let ty = param.value_type();
                let value = Value::from_json(&ty, json).ok_or_else(|| SignatureFileError::InvalidValue {
                    what: "default",
                    parameter: entry.name.clone(),
                    ty: ty.to_string(),
                    value: json.to_string(),
                })?;
                param = param.with_default(value);
            }
            signature = signature.param(param);
        }

        Ok(signature)
    }

    /// Compiles the file into a raising parser that echoes its arguments,
    /// with the file's state bound.
    pub fn compile(&self) -> Result<BoundParser<Arguments>, SignatureFileError> {
        let signature = self.signature()?;
        let state = self.state_values(&signature)?;

        let mut options = ParserOptions::default()
            .with_ignore(self.ignore.iter().cloned())
            .with_parser_type(RaisingParser);
        if let Some(style) = self.docstring_style {
            options = options.with_docstring_style(style);
        }

        let parser = as_arg_parser(signature, |args| args, options)?;
        if state.is_empty() {
            return Ok(parser);
        }
        Ok(parser.with_state(state)?)
    }

    fn state_values(&self, signature: &Signature) -> Result<Vec<(String, Value)>, SignatureFileError> {
        self.state
            .iter()
            .map(|(key, json)| {
                let param = signature
                    .find(key)
                    .ok_or_else(|| ConfigurationError::UnknownStateKey(key.clone()))?;
                let ty = param.value_type();
                let value = Value::from_json(&ty, json).ok_or_else(|| SignatureFileError::InvalidValue {
                    what: "state value",
                    parameter: key.clone(),
                    ty: ty.to_string(),
                    value: json.to_string(),
                })?;
                Ok((key.clone(), value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_yaml(raw: &str) -> SignatureFile {
        serde_yaml::from_str(raw).unwrap()
    }

    #[test]
    fn test_missing_default_differs_from_null_default() {
        let file = from_yaml(
            "name: pets\nparams:\n  - name: owner\n    type: str\n  - name: names\n    type: list[str] | None\n    default: null\n",
        );
        assert_eq!(file.params[0].default, None);
        assert_eq!(file.params[1].default, Some(serde_json::Value::Null));

        let signature = file.signature().unwrap();
        assert_eq!(signature.params[0].default, None);
        assert_eq!(signature.params[1].default, Some(Value::None));
    }

    #[test]
    fn test_invalid_type_expression_is_rejected() {
        let err = serde_yaml::from_str::<SignatureFile>("name: x\nparams:\n  - name: a\n    type: frob\n")
            .unwrap_err();
        assert!(err.to_string().contains("unknown type `frob`"), "{err}");
    }

    #[test]
    fn test_default_must_match_type() {
        let file = from_yaml("name: x\nparams:\n  - name: count\n    type: int\n    default: lots\n");
        assert!(matches!(
            file.signature().unwrap_err(),
            SignatureFileError::InvalidValue { what: "default", .. }
        ));
    }

    #[test]
    fn test_state_is_bound() {
        let file = from_yaml(
            "name: store\nignore: [connection]\nstate:\n  connection: db://local\nparams:\n  - name: connection\n    type: str\n  - name: key\n    type: str\n",
        );
        let parser = file.compile().unwrap();
        let args = parser.run(["k"]).unwrap();
        assert_eq!(args.get::<String>("connection").unwrap(), "db://local");
    }

    #[test]
    fn test_unknown_state_key() {
        let file = from_yaml("name: x\nstate:\n  ghost: 1\nparams: []\n");
        assert!(matches!(
            file.compile().unwrap_err(),
            SignatureFileError::Configuration(ConfigurationError::UnknownStateKey(_))
        ));
    }
}
