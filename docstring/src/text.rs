//! Text helpers shared by the dialect parsers.

/// Normalizes docstring indentation.
///
/// Tabs expand to eight columns, the first line loses its leading
/// whitespace, the common indentation of the remaining lines is removed, and
/// leading and trailing blank lines are dropped.
///
/// ```
/// use sigparse_docstring::clean;
///
/// let text = "First line.\n\n        Indented body\n          deeper\n    ";
/// assert_eq!(clean(text), "First line.\n\nIndented body\n  deeper");
/// ```
pub fn clean(text: &str) -> String {
    let expanded = text.replace('\t', "        ");
    let lines: Vec<&str> = expanded.lines().collect();
    let Some((first, rest)) = lines.split_first() else {
        return String::new();
    };

    let margin = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| indent_of(line))
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    cleaned.push(first.trim().to_string());
    for line in rest {
        if line.trim().is_empty() {
            cleaned.push(String::new());
        } else {
            cleaned.push(line[margin..].trim_end().to_string());
        }
    }

    while cleaned.first().is_some_and(|line| line.is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().is_some_and(|line| line.is_empty()) {
        cleaned.pop();
    }

    cleaned.join("\n")
}

/// Number of leading spaces.
pub(crate) fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Splits the free-text part of a docstring into short and long
/// descriptions: the first line, then everything after it.
pub(crate) fn split_description(lines: &[&str]) -> (Option<String>, Option<String>) {
    let text = lines.join("\n");
    let text = text.trim();
    if text.is_empty() {
        return (None, None);
    }

    match text.split_once('\n') {
        Some((short, long)) => {
            let long = long.trim();
            (
                Some(short.trim().to_string()),
                (!long.is_empty()).then(|| long.to_string()),
            )
        }
        None => (Some(text.to_string()), None),
    }
}

/// Joins description fragments with single spaces, skipping blanks.
pub(crate) fn join_words<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drops a trailing `, optional` (and any `, default ...`) from a type.
pub(crate) fn normalize_type(raw: &str) -> Option<String> {
    let mut ty = raw.trim();
    for marker in [", optional", ",optional", ", default", ",default"] {
        if let Some(idx) = ty.find(marker) {
            ty = ty[..idx].trim();
        }
    }
    (!ty.is_empty()).then(|| ty.to_string())
}

/// Groups meta lines into items: an item starts on a line accepted by
/// `starts_item` and continues over the following lines that do not.
pub(crate) fn group_items<'a>(lines: &[&'a str], starts_item: impl Fn(&str) -> bool) -> Vec<Vec<&'a str>> {
    let mut items: Vec<Vec<&'a str>> = Vec::new();
    for line in lines {
        if starts_item(line) {
            items.push(vec![line]);
        } else if let Some(current) = items.last_mut() {
            current.push(line);
        }
    }
    items
}
