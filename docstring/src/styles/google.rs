//! Google style (`Args:` sections).

use std::sync::LazyLock;

use regex::Regex;

use super::StyleParser;
use crate::text::{indent_of, join_words, normalize_type, split_description};
use crate::{DocParam, Docstring, DocstringStyle};

static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<title>Args|Arguments|Parameters|Params|Keyword Args|Keyword Arguments|Other Parameters|Attributes|Returns|Return|Yields|Yield|Raises|Exceptions|Examples?|Notes?|Warnings?|Todo|See Also)\s*:\s*$",
    )
    .expect("static regex must compile")
});

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*{0,2}(?P<name>\w+)\s*(?:\((?P<type>[^)]*)\))?\s*:(?P<desc>.*)$")
        .expect("static regex must compile")
});

const PARAM_SECTIONS: [&str; 7] = [
    "Args",
    "Arguments",
    "Parameters",
    "Params",
    "Keyword Args",
    "Keyword Arguments",
    "Other Parameters",
];

pub(crate) struct GoogleParser;

impl StyleParser for GoogleParser {
    fn style(&self) -> DocstringStyle {
        DocstringStyle::Google
    }

    fn parse(&self, text: &str) -> Docstring {
        let lines: Vec<&str> = text.lines().collect();
        let titles: Vec<(usize, String)> = lines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| {
                SECTION_RE
                    .captures(line)
                    .map(|caps| (idx, caps["title"].to_string()))
            })
            .collect();

        let desc_end = titles.first().map_or(lines.len(), |(idx, _)| *idx);
        let (short_description, long_description) = split_description(&lines[..desc_end]);

        let mut params = Vec::new();
        for (pos, (start, title)) in titles.iter().enumerate() {
            if !PARAM_SECTIONS.contains(&title.as_str()) {
                continue;
            }
            let end = titles.get(pos + 1).map_or(lines.len(), |(idx, _)| *idx);
            params.extend(parse_entries(&lines[start + 1..end]));
        }

        Docstring {
            short_description,
            long_description,
            params,
        }
    }
}

/// Entries sit at the section's first indentation level; deeper lines
/// continue the previous entry.
fn parse_entries(body: &[&str]) -> Vec<DocParam> {
    let Some(base) = body
        .iter()
        .find(|line| !line.trim().is_empty())
        .map(|line| indent_of(line))
    else {
        return Vec::new();
    };

    let mut entries: Vec<(DocParam, Vec<String>)> = Vec::new();
    for line in body {
        if line.trim().is_empty() {
            continue;
        }
        let indent = indent_of(line);
        if indent < base {
            break;
        }
        if indent == base {
            if let Some(caps) = ENTRY_RE.captures(line.trim()) {
                let param = DocParam {
                    arg_name: caps["name"].to_string(),
                    type_name: caps.name("type").and_then(|ty| normalize_type(ty.as_str())),
                    description: String::new(),
                };
                entries.push((param, vec![caps["desc"].to_string()]));
                continue;
            }
        }
        if let Some((_, parts)) = entries.last_mut() {
            parts.push(line.trim().to_string());
        }
    }

    entries
        .into_iter()
        .map(|(mut param, parts)| {
            param.description = join_words(parts.iter().map(String::as_str));
            param
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_section_with_types_and_continuations() {
        let text = "Make a user.\n\nArgs:\n    name (str): The name.\n    age (int, optional): Age\n        in years.\n    *rest: Everything else.\n\nReturns:\n    user: not a parameter";
        let doc = GoogleParser.parse(text);
        assert_eq!(doc.short_description.as_deref(), Some("Make a user."));
        assert_eq!(doc.long_description, None);
        assert_eq!(doc.params.len(), 3);
        assert_eq!(doc.params[1].type_name.as_deref(), Some("int"));
        assert_eq!(doc.params[1].description, "Age in years.");
        assert_eq!(doc.params[2].arg_name, "rest");
        assert_eq!(doc.param("user"), None);
    }

    #[test]
    fn test_description_stops_at_first_section() {
        let text = "Short.\n\nLong one.\nLong two.\n\nRaises:\n    ValueError: bad\n\nArgs:\n    x: the x";
        let doc = GoogleParser.parse(text);
        assert_eq!(doc.long_description.as_deref(), Some("Long one.\nLong two."));
        assert_eq!(doc.param("x"), Some("the x"));
    }

    #[test]
    fn test_empty_section() {
        let doc = GoogleParser.parse("Short.\n\nArgs:\n");
        assert!(doc.params.is_empty());
    }
}
