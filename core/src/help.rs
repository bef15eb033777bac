//! Per-argument help text.
//!
//! Three sources can describe a parameter. The first one present wins:
//!
//! 1. inline documentation (explicit doc or an `Annotated` type),
//! 2. the matching docstring entry,
//! 3. a synthesized summary of the declared type.
//!
//! When the parameter has a default it is appended to the chosen text.

use crate::signature::ParameterSpec;

/// Builds the help string for one parameter.
///
/// # Examples
///
/// ```
/// use sigparse_core::{assemble_help, ParameterSpec};
///
/// let age = ParameterSpec::typed::<i64>("age").with_default(5);
/// assert_eq!(assemble_help(&age, None), "`int` (default=`5`)");
/// assert_eq!(assemble_help(&age, Some("your age")), "your age (default=5)");
///
/// let named = age.with_doc("years on earth");
/// assert_eq!(assemble_help(&named, Some("your age")), "years on earth (default=5)");
/// ```
pub fn assemble_help(param: &ParameterSpec, docstring_entry: Option<&str>) -> String {
    let default = param.effective_default();

    let described = non_blank(param.inline_doc()).or_else(|| non_blank(docstring_entry));

    match (described, default) {
        (Some(text), None) => text.to_string(),
        (Some(text), Some(default)) => format!("{text} (default={default})"),
        (None, None) => format!("`{}`", synthesized_type(param)),
        (None, Some(default)) => format!("`{}` (default=`{default}`)", synthesized_type(param)),
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|text| !text.is_empty())
}

fn synthesized_type(param: &ParameterSpec) -> String {
    let ty = param.ty.strip_annotations().0;
    match ty.optional_inner() {
        Some(inner) => inner.type_name(),
        None => ty.type_name(),
    }
}
