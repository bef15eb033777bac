//! Signature model, type classification and value coercion.
//!
//! This crate holds everything about turning a declared callable signature
//! into argument declarations, independent of any particular parsing
//! library:
//!
//! - [`Signature`] / [`ParameterSpec`]: the declarative parameter table.
//! - [`TypeExpr`]: the declared-type grammar, parseable from text
//!   ([`parse_type_expr`]).
//! - [`Value`] / [`FromValue`]: runtime values and typed extraction.
//! - [`classify`] / [`is_positional`]: argument shape and positional
//!   resolution.
//! - [`Coercer`]: per-token conversion (booleans, enum symbols, scalars).
//! - [`assemble_help`]: per-argument help text.
//! - [`declare`]: the compiled [`ArgumentDeclaration`] for a parameter.
//! - [`validate_signature`]: structural checks across parameters.
//!
//! Enum-like parameter types are declared with [`symbolic_enum!`].
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use sigparse_core::*;
//!
//! symbolic_enum! {
//!     pub enum Mode { Create, List, Delete }
//! }
//!
//! let signature = Signature::new("users")
//!     .param(ParameterSpec::typed::<Mode>("mode"))
//!     .param(ParameterSpec::typed::<Option<Vec<String>>>("names"));
//! assert!(validate_signature(&signature, &BTreeSet::new()).is_empty());
//!
//! let mode = declare(&signature.params[0], None).unwrap();
//! assert_eq!(mode.choices.as_deref(), Some(&["Create".to_string(), "List".into(), "Delete".into()][..]));
//! assert_eq!(mode.coercer.unwrap().coerce("delete").unwrap(), Value::from(Mode::Delete));
//!
//! let names = declare(&signature.params[1], None).unwrap();
//! assert_eq!(names.flag(), Some("--names"));
//! ```

mod classify;
mod coerce;
mod declaration;
mod error;
pub mod grammar;
mod help;
mod signature;
mod types;
mod validate;
mod value;

pub use classify::{ArgumentKind, classify, flag_name, is_positional};
pub use coerce::{Coercer, bool_from_str, scalar_from_str, symbol_from_str};
pub use declaration::{Action, ArgumentDeclaration, Arity, Slot, declare};
pub use error::{CoercionError, ConfigurationError, Result};
pub use grammar::parse_type_expr;
pub use help::assemble_help;
pub use signature::{Annotate, ParameterKind, ParameterSpec, Signature, Symbolic};
pub use types::{ScalarType, SymbolSet, TypeExpr};
pub use validate::validate_signature;
pub use value::{FromValue, Symbol, Value};
