//! Options for [`as_arg_parser`](crate::as_arg_parser).

use std::collections::BTreeSet;
use std::sync::Arc;

use sigparse_docstring::DocstringStyle;

use crate::parser_type::{ExitingParser, ParserType};

/// Compilation options.
///
/// ```
/// use sigparse::{ParserOptions, RaisingParser};
/// use sigparse_docstring::DocstringStyle;
///
/// let options = ParserOptions::default()
///     .with_ignore(["connection"])
///     .with_parser_type(RaisingParser)
///     .with_docstring_style(DocstringStyle::Google);
/// assert!(options.ignore.contains("connection"));
/// ```
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Parameters kept off the command line; they must be supplied through
    /// state or keywords.
    pub ignore: BTreeSet<String>,
    pub parser_type: Arc<dyn ParserType>,
    /// Docstring dialect; `None` uses the whole docstring as the parser
    /// description and reads no per-parameter help from it.
    pub parse_docstring: Option<DocstringStyle>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            ignore: BTreeSet::new(),
            parser_type: Arc::new(ExitingParser),
            parse_docstring: None,
        }
    }
}

impl ParserOptions {
    pub fn with_ignore<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_parser_type(mut self, parser_type: impl ParserType + 'static) -> Self {
        self.parser_type = Arc::new(parser_type);
        self
    }

    pub fn with_docstring_style(mut self, style: DocstringStyle) -> Self {
        self.parse_docstring = Some(style);
        self
    }
}
