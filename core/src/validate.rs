//! Structural validation of signatures.
//!
//! Catches problems that no single parameter reveals on its own: bad or
//! duplicate names, names the parsing library reserves, variadic parameters
//! that are not last, and ignore sets that reference unknown parameters.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeSet;
//! use sigparse_core::*;
//!
//! let signature = Signature::new("greet")
//!     .param(ParameterSpec::typed::<String>("name"))
//!     .param(ParameterSpec::typed::<bool>("loud").with_default(false));
//! assert!(validate_signature(&signature, &BTreeSet::new()).is_empty());
//!
//! let ignore = BTreeSet::from(["missing".to_string()]);
//! let errors = validate_signature(&signature, &ignore);
//! assert!(matches!(errors[0], ConfigurationError::UnknownIgnored(_)));
//! ```

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::classify::is_positional;
use crate::declaration::conformed_default;
use crate::error::ConfigurationError;
use crate::signature::{ParameterSpec, Signature};
use crate::types::TypeExpr;

static IDENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex must compile")
});

/// Names the parsing library claims for itself.
const RESERVED: [&str; 1] = ["help"];

/// Validates a signature against an ignore set.
///
/// Returns every problem found in the first failing phase; an empty vector
/// means the signature can be compiled (type support is checked separately,
/// parameter by parameter).
pub fn validate_signature(signature: &Signature, ignore: &BTreeSet<String>) -> Vec<ConfigurationError> {
    let mut errors = Vec::new();

    let mut seen: HashSet<&str> = HashSet::new();
    for param in &signature.params {
        if !IDENT_RE.is_match(&param.name) {
            errors.push(ConfigurationError::InvalidName(param.name.clone()));
        } else if !seen.insert(param.name.as_str()) {
            errors.push(ConfigurationError::DuplicateParameter(param.name.clone()));
        }
    }
    if !errors.is_empty() {
        return errors;
    }

    for name in ignore {
        if !seen.contains(name.as_str()) {
            errors.push(ConfigurationError::UnknownIgnored(name.clone()));
        }
    }
    if !errors.is_empty() {
        return errors;
    }

    let exposed: Vec<&ParameterSpec> = signature
        .params
        .iter()
        .filter(|p| !ignore.contains(&p.name))
        .collect();

    for param in &exposed {
        if RESERVED.contains(&param.name.as_str()) {
            errors.push(ConfigurationError::ReservedName(param.name.clone()));
        }
    }
    if !errors.is_empty() {
        return errors;
    }

    errors.extend(validate_variadics(&exposed));
    if !errors.is_empty() {
        return errors;
    }

    for param in &signature.params {
        if let Err(err) = conformed_default(param) {
            errors.push(err);
        }
    }

    errors
}

fn collects_rest(param: &ParameterSpec) -> bool {
    param.is_variadic() || matches!(param.ty.strip_annotations().0, TypeExpr::Raw)
}

fn validate_variadics(exposed: &[&ParameterSpec]) -> Vec<ConfigurationError> {
    let positionals: Vec<&ParameterSpec> = exposed
        .iter()
        .copied()
        .filter(|p| is_positional(p))
        .collect();
    let collectors: Vec<(usize, &ParameterSpec)> = positionals
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, p)| collects_rest(p))
        .collect();

    match collectors.as_slice() {
        [] => Vec::new(),
        [(idx, param)] if idx + 1 != positionals.len() => {
            vec![ConfigurationError::MisplacedVariadic(param.name.clone())]
        }
        [_] => Vec::new(),
        [_, (_, second), ..] => vec![ConfigurationError::MultipleVariadic(second.name.clone())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn names(params: &[&str]) -> Signature {
        params.iter().fold(Signature::new("cmd"), |sig, name| {
            sig.param(ParameterSpec::typed::<String>(*name))
        })
    }

    #[test]
    fn test_invalid_and_duplicate_names() {
        let errors = validate_signature(&names(&["ok", "not-ok", "ok", "1st"]), &BTreeSet::new());
        assert_eq!(
            errors,
            vec![
                ConfigurationError::InvalidName("not-ok".into()),
                ConfigurationError::DuplicateParameter("ok".into()),
                ConfigurationError::InvalidName("1st".into()),
            ]
        );
    }

    #[test]
    fn test_help_is_reserved_unless_ignored() {
        let sig = names(&["help"]);
        assert_eq!(
            validate_signature(&sig, &BTreeSet::new()),
            vec![ConfigurationError::ReservedName("help".into())]
        );
        let ignore = BTreeSet::from(["help".to_string()]);
        assert!(validate_signature(&sig, &ignore).is_empty());
    }

    #[test]
    fn test_variadic_must_be_last_positional() {
        let sig = Signature::new("cmd")
            .param(ParameterSpec::typed::<String>("files").variadic())
            .param(ParameterSpec::typed::<String>("target"));
        assert_eq!(
            validate_signature(&sig, &BTreeSet::new()),
            vec![ConfigurationError::MisplacedVariadic("files".into())]
        );

        // Flags after the variadic are fine.
        let sig = Signature::new("cmd")
            .param(ParameterSpec::typed::<String>("files").variadic())
            .param(ParameterSpec::typed::<bool>("force").with_default(false));
        assert!(validate_signature(&sig, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_only_one_variadic() {
        let sig = Signature::new("cmd")
            .param(ParameterSpec::typed::<String>("files").variadic())
            .param(ParameterSpec::new("rest", TypeExpr::Raw));
        assert_eq!(
            validate_signature(&sig, &BTreeSet::new()),
            vec![ConfigurationError::MultipleVariadic("rest".into())]
        );
    }

    #[test]
    fn test_ignored_variadic_does_not_count() {
        let sig = Signature::new("cmd")
            .param(ParameterSpec::typed::<String>("files").variadic())
            .param(ParameterSpec::typed::<String>("target"));
        let ignore = BTreeSet::from(["files".to_string()]);
        assert!(validate_signature(&sig, &ignore).is_empty());
    }

    #[test]
    fn test_default_must_conform() {
        let sig = Signature::new("cmd")
            .param(ParameterSpec::typed::<i64>("count").with_default(Value::Str("many".into())));
        assert!(matches!(
            validate_signature(&sig, &BTreeSet::new())[..],
            [ConfigurationError::InvalidDefault { .. }]
        ));
    }
}
