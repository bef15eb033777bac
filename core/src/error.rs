//! Error types for signature compilation and token coercion.
//!
//! Two phases fail differently: [`ConfigurationError`] is a programmer error
//! detected while a signature is compiled (or while state is bound), and
//! [`CoercionError`] is a user error raised while a raw command-line token is
//! turned into a typed value.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Errors raised while compiling a signature into a parser.
///
/// These are always returned eagerly, never deferred to invocation time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The parameter has no declared type.
    #[error("untyped parameters are not supported: `{0}`")]
    UntypedParameter(String),

    /// The declared type is outside the supported grammar.
    #[error("unsupported type `{ty}` for parameter `{parameter}`: {reason}")]
    UnsupportedType {
        parameter: String,
        ty: String,
        reason: String,
    },

    /// A type expression string could not be parsed.
    #[error("invalid type expression `{input}`: {reason}")]
    InvalidTypeExpr { input: String, reason: String },

    /// A parameter name is not a valid identifier.
    #[error("invalid parameter name: `{0}`")]
    InvalidName(String),

    /// Two parameters share a name.
    #[error("duplicate parameter: `{0}`")]
    DuplicateParameter(String),

    /// The parameter would clash with a flag the parsing library owns.
    #[error("parameter `{0}` clashes with the built-in --help flag")]
    ReservedName(String),

    /// A variadic or raw-list parameter is followed by another positional.
    #[error("variadic parameter `{0}` must be the last positional parameter")]
    MisplacedVariadic(String),

    /// More than one variadic or raw-list parameter is exposed.
    #[error("only one variadic parameter is allowed, found a second one: `{0}`")]
    MultipleVariadic(String),

    /// The default value does not fit the declared type.
    #[error("default `{value}` does not match type `{ty}` of parameter `{parameter}`")]
    InvalidDefault {
        parameter: String,
        ty: String,
        value: String,
    },

    /// The ignore set references a name absent from the signature.
    #[error("ignored parameter `{0}` is not in the signature")]
    UnknownIgnored(String),

    /// A state key references a name absent from the signature.
    #[error("state key `{0}` is not a parameter of the signature")]
    UnknownStateKey(String),

    /// A state key names a parameter that the command line already exposes.
    #[error("state key `{0}` shadows a command-line argument")]
    StateShadowsArgument(String),

    /// A state value does not fit the declared type.
    #[error("state value `{value}` does not match type `{ty}` of parameter `{parameter}`")]
    InvalidStateValue {
        parameter: String,
        ty: String,
        value: String,
    },
}

/// Errors raised while coercing a raw token into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// The token is in neither the truthy nor the falsy set.
    #[error("invalid value for boolean: '{0}' (expected one of y, yes, true, 1, n, no, false, 0)")]
    InvalidBool(String),

    /// The token names no member of the symbol set.
    #[error("no name '{value}' in {set} (choose from {})", .choices.join(", "))]
    UnknownSymbol {
        value: String,
        set: String,
        choices: Vec<String>,
    },

    /// The token is not an integer.
    #[error("invalid integer '{value}': {source}")]
    InvalidInt {
        value: String,
        source: ParseIntError,
    },

    /// The token is not a floating point number.
    #[error("invalid float '{value}': {source}")]
    InvalidFloat {
        value: String,
        source: ParseFloatError,
    },
}

/// Convenience alias for results with [`ConfigurationError`].
pub type Result<T> = std::result::Result<T, ConfigurationError>;
