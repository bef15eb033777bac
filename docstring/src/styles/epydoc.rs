//! Epydoc fields (`@param name: text`).

use std::sync::LazyLock;

use regex::Regex;

use super::StyleParser;
use crate::text::{group_items, join_words, normalize_type, split_description};
use crate::{DocParam, Docstring, DocstringStyle};

static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@(?P<key>\w+)(?:\s+(?P<arg>[^:]+?))?\s*:(?P<desc>.*)$")
        .expect("static regex must compile")
});

pub(crate) struct EpydocParser;

impl StyleParser for EpydocParser {
    fn style(&self) -> DocstringStyle {
        DocstringStyle::Epydoc
    }

    fn parse(&self, text: &str) -> Docstring {
        let lines: Vec<&str> = text.lines().collect();
        let meta_start = lines
            .iter()
            .position(|line| line.starts_with('@'))
            .unwrap_or(lines.len());
        let (short_description, long_description) = split_description(&lines[..meta_start]);

        let mut params: Vec<DocParam> = Vec::new();
        let mut types: Vec<(String, String)> = Vec::new();

        for item in group_items(&lines[meta_start..], |line| line.starts_with('@')) {
            let Some(caps) = FIELD_RE.captures(item[0]) else {
                continue;
            };
            let Some(arg) = caps.name("arg").map(|arg| arg.as_str().trim().to_string()) else {
                continue;
            };
            let description = join_words(
                std::iter::once(&caps["desc"]).chain(item[1..].iter().copied()),
            );

            match &caps["key"] {
                "param" | "keyword" | "kwarg" => params.push(DocParam {
                    arg_name: arg,
                    type_name: None,
                    description,
                }),
                "type" => types.push((arg, description)),
                _ => {}
            }
        }

        for (name, ty) in types {
            if let Some(param) = params.iter_mut().find(|p| p.arg_name == name) {
                param.type_name = normalize_type(&ty);
            }
        }

        Docstring {
            short_description,
            long_description,
            params,
        }
    }
}
