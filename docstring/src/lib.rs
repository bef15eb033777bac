//! Docstring dialect parsing.
//!
//! Splits a docstring into a short description, a long description and a
//! list of per-parameter entries. Four dialects are understood:
//!
//! - **reST**: `:param name: text`, `:type name: T`
//! - **Google**: `Args:` sections with `name (T): text` entries
//! - **numpydoc**: `Parameters` sections underlined with dashes
//! - **Epydoc**: `@param name: text`, `@type name: T`
//!
//! [`DocstringStyle::Auto`] tries every dialect and keeps the one that finds
//! the most parameter entries.
//!
//! # Example
//!
//! ```
//! use sigparse_docstring::{parse, DocstringStyle};
//!
//! let doc = parse(
//!     "
//!     Greet someone.
//!
//!     Args:
//!         name (str): Who to greet.
//!         times (int): How many times,
//!             at most ten.
//!     ",
//!     DocstringStyle::Auto,
//! );
//!
//! assert_eq!(doc.short_description.as_deref(), Some("Greet someone."));
//! assert_eq!(doc.param("name"), Some("Who to greet."));
//! assert_eq!(doc.param("times"), Some("How many times, at most ten."));
//! ```

mod styles;
mod text;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use text::clean;

/// Supported docstring dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DocstringStyle {
    /// Pick the dialect that yields the most parameter entries.
    #[default]
    Auto,
    Rest,
    Google,
    Numpydoc,
    Epydoc,
}

impl DocstringStyle {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            DocstringStyle::Auto => "auto",
            DocstringStyle::Rest => "rest",
            DocstringStyle::Google => "google",
            DocstringStyle::Numpydoc => "numpydoc",
            DocstringStyle::Epydoc => "epydoc",
        }
    }
}

impl fmt::Display for DocstringStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Docstring parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocstringError {
    /// The style name is not one of the known dialects.
    #[error("unknown docstring style: {0} (expected auto, rest, google, numpydoc or epydoc)")]
    UnknownStyle(String),
}

impl FromStr for DocstringStyle {
    type Err = DocstringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(DocstringStyle::Auto),
            "rest" | "rst" => Ok(DocstringStyle::Rest),
            "google" => Ok(DocstringStyle::Google),
            "numpydoc" | "numpy" => Ok(DocstringStyle::Numpydoc),
            "epydoc" => Ok(DocstringStyle::Epydoc),
            _ => Err(DocstringError::UnknownStyle(s.to_string())),
        }
    }
}

/// One documented parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocParam {
    pub arg_name: String,
    /// Type as written in the docstring, if any.
    pub type_name: Option<String>,
    /// Description; continuation lines are joined with single spaces.
    pub description: String,
}

/// A parsed docstring.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Docstring {
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub params: Vec<DocParam>,
}

impl Docstring {
    /// Description of parameter `name`, if documented.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.arg_name == name)
            .map(|p| p.description.as_str())
    }

    /// The text a parser should show as its description: the long
    /// description, or the short one when there is no long one.
    pub fn description(&self) -> Option<&str> {
        self.long_description
            .as_deref()
            .or(self.short_description.as_deref())
    }
}

/// Parses `text` in the given dialect.
///
/// The text is [`clean`]ed first, so indentation inherited from source code
/// does not matter.
pub fn parse(text: &str, style: DocstringStyle) -> Docstring {
    let cleaned = clean(text);

    match style {
        DocstringStyle::Auto => {
            let mut best: Option<(DocstringStyle, Docstring)> = None;
            for parser in styles::all() {
                let candidate = parser.parse(&cleaned);
                let better = best
                    .as_ref()
                    .is_none_or(|(_, current)| candidate.params.len() > current.params.len());
                if better {
                    best = Some((parser.style(), candidate));
                }
            }
            match best {
                Some((style, doc)) => {
                    debug!(style = %style, params = doc.params.len(), "detected docstring style");
                    doc
                }
                None => Docstring::default(),
            }
        }
        concrete => styles::for_style(concrete).map_or_else(Docstring::default, |parser| parser.parse(&cleaned)),
    }
}
