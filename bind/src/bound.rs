//! The bound-parser facade.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use clap::ArgMatches;
use clap::parser::MatchesError;
use indexmap::IndexMap;
use sigparse_core::{Action, ArgumentDeclaration, ConfigurationError, Value};
use tracing::debug;

use crate::arguments::Arguments;
use crate::compile::Compiled;
use crate::error::InvocationError;
use crate::parser_type::ErrorMode;

type Callable<T> = Arc<dyn Fn(Arguments) -> T + Send + Sync>;

/// A compiled parser bound to the callable it feeds.
///
/// Cloning is cheap: the compiled parser and the callable are shared.
/// [`with_state`](Self::with_state) returns a new instance and never mutates
/// the one it is called on.
pub struct BoundParser<T> {
    compiled: Arc<Compiled>,
    callable: Callable<T>,
    state: Arc<IndexMap<String, Value>>,
}

impl<T> Clone for BoundParser<T> {
    fn clone(&self) -> Self {
        Self {
            compiled: Arc::clone(&self.compiled),
            callable: Arc::clone(&self.callable),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> fmt::Debug for BoundParser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundParser")
            .field("command", &self.compiled.signature.name)
            .field("ignore", &self.compiled.ignore)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<T> BoundParser<T> {
    pub(crate) fn new(compiled: Compiled, callable: Callable<T>) -> Self {
        Self {
            compiled: Arc::new(compiled),
            callable,
            state: Arc::new(IndexMap::new()),
        }
    }

    /// Parses `tokens` and invokes the callable with the parsed values merged
    /// with the bound state.
    ///
    /// The callable is not invoked if parsing fails.
    pub fn run<I, S>(&self, tokens: I) -> Result<T, InvocationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        self.run_with(tokens, std::iter::empty::<(String, Value)>())
    }

    /// Like [`run`](Self::run), also supplying values for ignored parameters
    /// that are not bound by state.
    pub fn run_with<I, S, K, V>(&self, tokens: I, keywords: K) -> Result<T, InvocationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
        K: IntoIterator<Item = (String, V)>,
        V: Into<Value>,
    {
        let arguments = self.bind(tokens, keywords)?;
        debug!(command = %self.compiled.signature.name, arguments = arguments.len(), "invoking callable");
        Ok((self.callable)(arguments))
    }

    /// Parses `tokens` and merges state without invoking the callable.
    pub fn parse<I, S>(&self, tokens: I) -> Result<Arguments, InvocationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        self.bind(tokens, std::iter::empty::<(String, Value)>())
    }

    /// Runs the parser as if invoked with `--help`.
    ///
    /// An exiting parser prints the help text and exits with status 0. A
    /// raising parser returns the help request as an error, for which
    /// [`InvocationError::is_help_request`] holds.
    pub fn show_help(&self) -> Result<T, InvocationError> {
        self.run(["--help"])
    }

    /// Returns a parser with `state` pre-bound, replacing any state this one
    /// carries.
    ///
    /// Every key must name an ignored parameter and every value must fit its
    /// declared type.
    pub fn with_state<I, K, V>(&self, state: I) -> Result<BoundParser<T>, ConfigurationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut bound = IndexMap::new();
        for (key, value) in state {
            let key: String = key.into();
            let value: Value = value.into();
            let Some(param) = self.compiled.signature.find(&key) else {
                return Err(ConfigurationError::UnknownStateKey(key));
            };
            if self.compiled.is_exposed(&key) {
                return Err(ConfigurationError::StateShadowsArgument(key));
            }
            let ty = param.value_type();
            let Some(conformed) = value.conform(&ty) else {
                return Err(ConfigurationError::InvalidStateValue {
                    parameter: key,
                    ty: ty.to_string(),
                    value: value.to_string(),
                });
            };
            bound.insert(key, conformed);
        }

        debug!(command = %self.compiled.signature.name, keys = ?bound.keys().collect::<Vec<_>>(), "bound state");
        Ok(Self {
            compiled: Arc::clone(&self.compiled),
            callable: Arc::clone(&self.callable),
            state: Arc::new(bound),
        })
    }

    /// The bound state.
    pub fn state(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.state.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Compiled declarations, in signature order.
    pub fn declarations(&self) -> &[ArgumentDeclaration] {
        &self.compiled.declarations
    }

    /// Full help text.
    pub fn format_help(&self) -> String {
        self.compiled.command.clone().render_help().to_string()
    }

    /// One-line usage text.
    pub fn format_usage(&self) -> String {
        self.compiled.command.clone().render_usage().to_string()
    }

    /// Prints the help text to stdout.
    pub fn print_help(&self) -> io::Result<()> {
        self.compiled.command.clone().print_help()
    }

    /// Prints the usage text to stdout.
    pub fn print_usage(&self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", self.format_usage())
    }

    fn bind<I, S, K, V>(&self, tokens: I, keywords: K) -> Result<Arguments, InvocationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
        K: IntoIterator<Item = (String, V)>,
        V: Into<Value>,
    {
        let keywords = self.check_keywords(keywords)?;
        let matches = match self.compiled.command.clone().try_get_matches_from(tokens) {
            Ok(matches) => matches,
            Err(err) => match self.compiled.parser_type.error_mode() {
                ErrorMode::Exit => err.exit(),
                ErrorMode::Raise => return Err(InvocationError::Parse(err)),
            },
        };

        let mut arguments = Arguments::new();
        for param in &self.compiled.signature.params {
            let name = param.name.as_str();
            let value = if let Some(decl) = self.compiled.declarations.iter().find(|d| d.name == name) {
                extract(&matches, decl)?
            } else if let Some(value) = self.state.get(name) {
                value.clone()
            } else if let Some(value) = keywords.get(name) {
                value.clone()
            } else {
                return Err(InvocationError::MissingValue(name.to_string()));
            };
            arguments.insert(name, value);
        }

        Ok(arguments)
    }

    fn check_keywords<K, V>(&self, keywords: K) -> Result<IndexMap<String, Value>, InvocationError>
    where
        K: IntoIterator<Item = (String, V)>,
        V: Into<Value>,
    {
        let mut checked = IndexMap::new();
        let mut seen = HashSet::new();
        for (name, value) in keywords {
            let value: Value = value.into();
            if !seen.insert(name.clone()) {
                return Err(InvocationError::DuplicateKeyword(name));
            }
            let Some(param) = self.compiled.signature.find(&name) else {
                return Err(InvocationError::UnknownKeyword(name));
            };
            if self.compiled.is_exposed(&name) {
                return Err(InvocationError::KeywordShadowsArgument(name));
            }
            if self.state.contains_key(&name) {
                return Err(InvocationError::KeywordShadowsState(name));
            }
            let ty = param.value_type();
            let Some(conformed) = value.conform(&ty) else {
                return Err(InvocationError::InvalidKeywordValue {
                    name,
                    ty: ty.to_string(),
                    value: value.to_string(),
                });
            };
            checked.insert(name, conformed);
        }
        Ok(checked)
    }
}

/// Reads one declaration's value back out of the matches, falling back to
/// its default when the argument was absent.
fn extract(matches: &ArgMatches, decl: &ArgumentDeclaration) -> Result<Value, InvocationError> {
    let name = decl.name.as_str();
    let matches_error = |source: MatchesError| InvocationError::Matches {
        name: name.to_string(),
        source,
    };

    let found = match decl.action {
        Action::StoreTrue | Action::StoreFalse => matches
            .try_get_one::<bool>(name)
            .map_err(matches_error)?
            .map(|flag| Value::Bool(*flag)),
        Action::Store => matches
            .try_get_one::<Value>(name)
            .map_err(matches_error)?
            .cloned(),
        Action::Append => matches
            .try_get_many::<Value>(name)
            .map_err(matches_error)?
            .map(|values| Value::List(values.cloned().collect())),
    };

    found
        .or_else(|| decl.default.clone())
        .ok_or_else(|| InvocationError::MissingValue(name.to_string()))
}
