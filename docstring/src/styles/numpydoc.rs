//! numpydoc style (titles underlined with dashes).

use std::sync::LazyLock;

use regex::Regex;

use super::StyleParser;
use crate::text::{indent_of, join_words, normalize_type, split_description};
use crate::{DocParam, Docstring, DocstringStyle};

static UNDERLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-{3,}\s*$").expect("static regex must compile"));

const PARAM_SECTIONS: [&str; 8] = [
    "Parameters",
    "Params",
    "Arguments",
    "Args",
    "Other Parameters",
    "Other Params",
    "Keyword Arguments",
    "Receives",
];

pub(crate) struct NumpydocParser;

impl StyleParser for NumpydocParser {
    fn style(&self) -> DocstringStyle {
        DocstringStyle::Numpydoc
    }

    fn parse(&self, text: &str) -> Docstring {
        let lines: Vec<&str> = text.lines().collect();
        // Title line index for every `Title` / `-----` pair.
        let titles: Vec<usize> = (0..lines.len().saturating_sub(1))
            .filter(|&idx| {
                let title = lines[idx];
                !title.trim().is_empty()
                    && !UNDERLINE_RE.is_match(title)
                    && UNDERLINE_RE.is_match(lines[idx + 1])
            })
            .collect();

        let desc_end = titles.first().copied().unwrap_or(lines.len());
        let (short_description, long_description) = split_description(&lines[..desc_end]);

        let mut params = Vec::new();
        for (pos, &start) in titles.iter().enumerate() {
            if !PARAM_SECTIONS.contains(&lines[start].trim()) {
                continue;
            }
            let end = titles.get(pos + 1).copied().unwrap_or(lines.len());
            params.extend(parse_entries(lines.get(start + 2..end).unwrap_or_default()));
        }

        Docstring {
            short_description,
            long_description,
            params,
        }
    }
}

/// `name : type` lines at the base indentation, descriptions indented below.
/// `x, y : int` documents several names at once.
fn parse_entries(body: &[&str]) -> Vec<DocParam> {
    let Some(base) = body
        .iter()
        .find(|line| !line.trim().is_empty() && !UNDERLINE_RE.is_match(line))
        .map(|line| indent_of(line))
    else {
        return Vec::new();
    };

    let mut groups: Vec<(Vec<String>, Option<String>, Vec<&str>)> = Vec::new();
    for line in body {
        if line.trim().is_empty() || UNDERLINE_RE.is_match(line) {
            continue;
        }
        if indent_of(line) <= base {
            let (names, ty) = match line.trim().split_once(':') {
                Some((names, ty)) => (names, normalize_type(ty)),
                None => (line.trim(), None),
            };
            let names = names
                .split(',')
                .map(|name| name.trim().trim_start_matches('*').to_string())
                .filter(|name| !name.is_empty())
                .collect();
            groups.push((names, ty, Vec::new()));
        } else if let Some((_, _, parts)) = groups.last_mut() {
            parts.push(line);
        }
    }

    groups
        .into_iter()
        .flat_map(|(names, ty, parts)| {
            let description = join_words(parts);
            names.into_iter().map(move |arg_name| DocParam {
                arg_name,
                type_name: ty.clone(),
                description: description.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_section() {
        let text = "Compute things.\n\nParameters\n----------\nx, y : float\n    Coordinates of\n    the point.\nlabel : str, optional\n    Text label.\nverbose\n    Talk more.\n\nReturns\n-------\nfloat\n    The result.";
        let doc = NumpydocParser.parse(text);
        assert_eq!(doc.short_description.as_deref(), Some("Compute things."));
        let names: Vec<_> = doc.params.iter().map(|p| p.arg_name.as_str()).collect();
        assert_eq!(names, ["x", "y", "label", "verbose"]);
        assert_eq!(doc.param("y"), Some("Coordinates of the point."));
        assert_eq!(doc.params[2].type_name.as_deref(), Some("str"));
        assert_eq!(doc.params[3].type_name, None);
        assert_eq!(doc.param("float"), None);
    }

    #[test]
    fn test_doubled_underline() {
        let text = "Summary.\n\nParameters\n----------\n----------\nx : int\n    the x\n";
        let doc = NumpydocParser.parse(text);
        assert_eq!(doc.short_description.as_deref(), Some("Summary."));
        let names: Vec<_> = doc.params.iter().map(|p| p.arg_name.as_str()).collect();
        assert_eq!(names, ["x"]);
        assert_eq!(doc.param("x"), Some("the x"));
    }

    #[test]
    fn test_underline_without_title() {
        let doc = NumpydocParser.parse("Summary.\n\n----------\n----------\n");
        assert!(doc.params.is_empty());
    }

    #[test]
    fn test_no_sections() {
        let doc = NumpydocParser.parse("Short.\n\nLong.");
        assert_eq!(doc.long_description.as_deref(), Some("Long."));
        assert!(doc.params.is_empty());
    }
}
