//! reStructuredText field lists (`:param name: text`).

use std::sync::LazyLock;

use regex::Regex;

use super::StyleParser;
use crate::text::{group_items, join_words, normalize_type, split_description};
use crate::{DocParam, Docstring, DocstringStyle};

static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:(?P<key>[^:]+):(?P<desc>.*)$").expect("static regex must compile")
});

const PARAM_KEYS: [&str; 6] = ["param", "parameter", "arg", "argument", "key", "keyword"];

pub(crate) struct RestParser;

impl StyleParser for RestParser {
    fn style(&self) -> DocstringStyle {
        DocstringStyle::Rest
    }

    fn parse(&self, text: &str) -> Docstring {
        let lines: Vec<&str> = text.lines().collect();
        let meta_start = lines
            .iter()
            .position(|line| line.starts_with(':'))
            .unwrap_or(lines.len());
        let (short_description, long_description) = split_description(&lines[..meta_start]);

        let mut params: Vec<DocParam> = Vec::new();
        let mut types: Vec<(String, String)> = Vec::new();

        for item in group_items(&lines[meta_start..], |line| line.starts_with(':')) {
            let Some(caps) = FIELD_RE.captures(item[0]) else {
                continue;
            };
            let words: Vec<&str> = caps["key"].split_whitespace().collect();
            let description = join_words(
                std::iter::once(&caps["desc"]).chain(item[1..].iter().copied()),
            );

            match words.as_slice() {
                [key, name] if PARAM_KEYS.contains(key) => params.push(DocParam {
                    arg_name: (*name).to_string(),
                    type_name: None,
                    description,
                }),
                [key, ty @ .., name] if PARAM_KEYS.contains(key) && !ty.is_empty() => {
                    params.push(DocParam {
                        arg_name: (*name).to_string(),
                        type_name: normalize_type(&ty.join(" ")),
                        description,
                    })
                }
                ["type", name] => types.push(((*name).to_string(), description)),
                _ => {}
            }
        }

        for (name, ty) in types {
            if let Some(param) = params.iter_mut().find(|p| p.arg_name == name) {
                param.type_name = param.type_name.take().or_else(|| normalize_type(&ty));
            }
        }

        Docstring {
            short_description,
            long_description,
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_with_inline_and_separate_types() {
        let text = "Create users.\n\nLonger text.\n\n:param str name: the user name\n:param age: age in\n    whole years\n:type age: int\n:returns: nothing";
        let doc = RestParser.parse(text);
        assert_eq!(doc.short_description.as_deref(), Some("Create users."));
        assert_eq!(doc.long_description.as_deref(), Some("Longer text."));
        assert_eq!(
            doc.params,
            vec![
                DocParam {
                    arg_name: "name".into(),
                    type_name: Some("str".into()),
                    description: "the user name".into(),
                },
                DocParam {
                    arg_name: "age".into(),
                    type_name: Some("int".into()),
                    description: "age in whole years".into(),
                },
            ]
        );
    }

    #[test]
    fn test_no_fields() {
        let doc = RestParser.parse("Only a summary.");
        assert_eq!(doc.short_description.as_deref(), Some("Only a summary."));
        assert!(doc.params.is_empty());
    }
}
