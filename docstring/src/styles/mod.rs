//! One parser per docstring dialect.

mod epydoc;
mod google;
mod numpydoc;
mod rest;

use crate::{Docstring, DocstringStyle};

/// A docstring dialect.
///
/// Parsers receive already-cleaned text and never fail: lines they do not
/// recognize are left in the description or skipped.
pub(crate) trait StyleParser {
    fn style(&self) -> DocstringStyle;
    fn parse(&self, text: &str) -> Docstring;
}

static PARSERS: [&(dyn StyleParser + Sync); 4] = [
    &rest::RestParser,
    &google::GoogleParser,
    &numpydoc::NumpydocParser,
    &epydoc::EpydocParser,
];

/// Every concrete dialect, in tie-break order.
pub(crate) fn all() -> impl Iterator<Item = &'static (dyn StyleParser + Sync)> {
    PARSERS.iter().copied()
}

/// The parser for a concrete dialect; `None` for [`DocstringStyle::Auto`].
pub(crate) fn for_style(style: DocstringStyle) -> Option<&'static (dyn StyleParser + Sync)> {
    all().find(|parser| parser.style() == style)
}
