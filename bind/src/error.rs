//! Invocation-time errors.

use clap::parser::MatchesError;
use thiserror::Error;

/// Errors raised while running a [`BoundParser`](crate::BoundParser).
///
/// With the default [`ExitingParser`](crate::ExitingParser) a parse failure
/// terminates the process instead, so [`InvocationError::Parse`] is only
/// observed with a raising parser type.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// The tokens were rejected (unknown flag, missing value, coercion
    /// failure, or a help/usage request).
    #[error(transparent)]
    Parse(#[from] clap::Error),

    /// A parsed value could not be read back from the matches.
    #[error("failed to read parsed value for `{name}`: {source}")]
    Matches {
        name: String,
        #[source]
        source: MatchesError,
    },

    /// An ignored parameter received no value from state or keywords.
    #[error("no value supplied for ignored parameter `{0}`")]
    MissingValue(String),

    /// A keyword names no parameter of the signature.
    #[error("unknown keyword `{0}`")]
    UnknownKeyword(String),

    /// A keyword names a parameter the command line already supplies.
    #[error("keyword `{0}` shadows a command-line argument")]
    KeywordShadowsArgument(String),

    /// A keyword names a parameter already bound by state.
    #[error("keyword `{0}` is already bound by state")]
    KeywordShadowsState(String),

    /// The same keyword was supplied twice.
    #[error("keyword `{0}` supplied more than once")]
    DuplicateKeyword(String),

    /// A keyword value does not fit the declared type.
    #[error("keyword value `{value}` does not match type `{ty}` of parameter `{name}`")]
    InvalidKeywordValue {
        name: String,
        ty: String,
        value: String,
    },
}

impl InvocationError {
    /// `true` for `--help` style requests rather than real failures.
    pub fn is_help_request(&self) -> bool {
        matches!(
            self,
            InvocationError::Parse(err)
                if matches!(
                    err.kind(),
                    clap::error::ErrorKind::DisplayHelp
                        | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                )
        )
    }
}

/// Errors raised while reading a value out of [`Arguments`](crate::Arguments).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// No argument with this name.
    #[error("no argument named `{0}`")]
    Missing(String),

    /// The value cannot be converted to the requested Rust type.
    #[error("argument `{name}` holds a {found} value, not a {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}
