//! Derive command-line parsers from declared function signatures.
//!
//! Describe a function's parameters once as a [`Signature`] and
//! [`as_arg_parser`] compiles it into a `clap` parser bound to the function:
//!
//! - parameters without a default become required positionals,
//! - parameters with a default become `--flags` (underscores → hyphens),
//! - `bool` parameters default `false` are store-true flags, default `true`
//!   store-false flags, and without default a positional that accepts
//!   `y/yes/true/1` and `n/no/false/0` in any case,
//! - enums declared with [`symbolic_enum!`] accept their member names in any
//!   case,
//! - `Option<Vec<T>>` parameters are repeatable flags and variadic
//!   parameters collect the trailing positionals.
//!
//! # Example
//!
//! ```
//! use sigparse::{as_arg_parser, Arguments, ParserOptions, ParameterSpec, RaisingParser, Signature, Value};
//!
//! let signature = Signature::new("greet")
//!     .param(ParameterSpec::typed::<String>("name"))
//!     .param(ParameterSpec::typed::<i64>("age"))
//!     .param(ParameterSpec::typed::<Option<Vec<String>>>("pets").with_default(Value::None))
//!     .param(ParameterSpec::typed::<bool>("loves_rust").with_default(false));
//!
//! let greet = |args: Arguments| -> String {
//!     let name: String = args.get("name").unwrap();
//!     let age: i64 = args.get("age").unwrap();
//!     let pets: Option<Vec<String>> = args.get("pets").unwrap();
//!     let loves: bool = args.get("loves_rust").unwrap();
//!     format!("{name} ({age}) pets={pets:?} loves={loves}")
//! };
//!
//! let parser = as_arg_parser(signature, greet, ParserOptions::default().with_parser_type(RaisingParser)).unwrap();
//! let out = parser
//!     .run(["Johnny", "33", "--pets", "Goofy", "--pets", "Larry", "--loves-rust"])
//!     .unwrap();
//! assert_eq!(out, r#"Johnny (33) pets=Some(["Goofy", "Larry"]) loves=true"#);
//! ```

mod arguments;
mod bound;
mod compile;
mod error;
mod options;
mod parser_type;
mod value_parser;

pub use arguments::Arguments;
pub use bound::BoundParser;
pub use error::{ArgumentError, InvocationError};
pub use options::ParserOptions;
pub use parser_type::{ErrorMode, ExitingParser, ParserType, RaisingParser};

pub use sigparse_core::{
    Annotate, ArgumentDeclaration, ConfigurationError, FromValue, ParameterSpec, Signature, Symbol,
    Symbolic, TypeExpr, Value, symbolic_enum,
};
pub use sigparse_docstring::DocstringStyle;

use std::sync::Arc;

use tracing::debug;

/// Compiles `signature` into a parser bound to `callable`.
///
/// Every configuration problem (unsupported types, unknown ignored names,
/// misplaced variadics, defaults that do not fit) is reported here, never
/// when the parser runs.
pub fn as_arg_parser<T, F>(
    signature: Signature,
    callable: F,
    options: ParserOptions,
) -> Result<BoundParser<T>, ConfigurationError>
where
    F: Fn(Arguments) -> T + Send + Sync + 'static,
{
    let compiled = compile::compile(signature, &options)?;
    debug!(
        command = %compiled.signature.name,
        declarations = compiled.declarations.len(),
        ignored = compiled.ignore.len(),
        "compiled parser"
    );
    Ok(BoundParser::new(compiled, Arc::new(callable)))
}
