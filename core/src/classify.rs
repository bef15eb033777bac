//! Type classification and positional/optional resolution.
//!
//! [`classify`] maps a parameter to one of a small set of argument shapes,
//! checking rules in a fixed precedence (first match wins):
//!
//! 1. variadic parameter → [`ArgumentKind::VariadicPositional`]
//! 2. `bool` → [`ArgumentKind::Boolean`]
//! 3. symbol set → [`ArgumentKind::EnumChoice`]
//! 4. `list[T]` with a default → [`ArgumentKind::OptionalSequence`]
//! 5. `raw` → [`ArgumentKind::RawList`]
//! 6. scalar → [`ArgumentKind::Scalar`]
//!
//! Everything else is a [`ConfigurationError`].

use serde::Serialize;

use crate::coerce::Coercer;
use crate::error::{ConfigurationError, Result};
use crate::signature::ParameterSpec;
use crate::types::{ScalarType, SymbolSet, TypeExpr};
use crate::value::Value;

/// Argument shape a parameter compiles to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentKind {
    Boolean,
    EnumChoice(SymbolSet),
    Scalar(ScalarType),
    /// Repeatable option; carries the per-element coercer.
    OptionalSequence(Coercer),
    /// Star parameter; carries the per-element coercer.
    VariadicPositional(Coercer),
    RawList,
}

impl ArgumentKind {
    /// Stable label for summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ArgumentKind::Boolean => "boolean",
            ArgumentKind::EnumChoice(_) => "enum",
            ArgumentKind::Scalar(_) => "scalar",
            ArgumentKind::OptionalSequence(_) => "sequence",
            ArgumentKind::VariadicPositional(_) => "variadic",
            ArgumentKind::RawList => "raw",
        }
    }
}

fn unsupported(param: &ParameterSpec, reason: impl Into<String>) -> ConfigurationError {
    ConfigurationError::UnsupportedType {
        parameter: param.name.clone(),
        ty: param.ty.to_string(),
        reason: reason.into(),
    }
}

/// Coercer for one element of a sequence or variadic parameter.
fn element_coercer(param: &ParameterSpec, element: &TypeExpr) -> Result<Coercer> {
    match element.strip_annotations().0 {
        TypeExpr::Bool => Ok(Coercer::Bool),
        TypeExpr::Symbols(set) => Ok(Coercer::Symbol(set.clone())),
        TypeExpr::Scalar(scalar) => Ok(Coercer::Scalar(*scalar)),
        TypeExpr::Any => Err(ConfigurationError::UntypedParameter(param.name.clone())),
        TypeExpr::Sequence(_) | TypeExpr::Raw => {
            Err(unsupported(param, "sequences of sequences are not supported"))
        }
        other => Err(unsupported(
            param,
            format!("`{other}` is not a supported element type"),
        )),
    }
}

/// Classifies a parameter into its argument shape.
///
/// `Annotated` wrappers are ignored here; their documentation is picked up by
/// the help assembler.
///
/// # Examples
///
/// ```
/// use sigparse_core::{classify, ArgumentKind, ParameterSpec, ScalarType, Value};
///
/// let age = ParameterSpec::typed::<i64>("age");
/// assert_eq!(classify(&age).unwrap(), ArgumentKind::Scalar(ScalarType::Int));
///
/// let pets = ParameterSpec::typed::<Option<Vec<String>>>("pets").with_default(Value::None);
/// assert!(matches!(classify(&pets).unwrap(), ArgumentKind::OptionalSequence(_)));
///
/// let table = ParameterSpec::new("table", "dict[str, int]".parse().unwrap());
/// assert!(classify(&table).is_err());
/// ```
pub fn classify(param: &ParameterSpec) -> Result<ArgumentKind> {
    let declared = param.ty.strip_annotations().0;

    if param.is_variadic() {
        return element_coercer(param, declared).map(ArgumentKind::VariadicPositional);
    }

    let ty = match declared {
        TypeExpr::Optional(_) | TypeExpr::Union(_) => match declared.optional_inner() {
            Some(inner) => inner.strip_annotations().0,
            None => {
                return Err(unsupported(
                    param,
                    "only unions of a single type with None are supported",
                ));
            }
        },
        other => other,
    };
    let default = param.effective_default();

    match ty {
        TypeExpr::Bool => match default {
            None | Some(Value::Bool(_)) => Ok(ArgumentKind::Boolean),
            Some(other) => Err(ConfigurationError::InvalidDefault {
                parameter: param.name.clone(),
                ty: param.ty.to_string(),
                value: other.to_string(),
            }),
        },
        TypeExpr::Symbols(set) => Ok(ArgumentKind::EnumChoice(set.clone())),
        TypeExpr::Sequence(element) => {
            if default.is_none() {
                return Err(unsupported(
                    param,
                    "sequence parameters need a default; use a variadic parameter for required lists",
                ));
            }
            element_coercer(param, element).map(ArgumentKind::OptionalSequence)
        }
        TypeExpr::Raw => Ok(ArgumentKind::RawList),
        TypeExpr::Scalar(scalar) => Ok(ArgumentKind::Scalar(*scalar)),
        TypeExpr::Any => Err(ConfigurationError::UntypedParameter(param.name.clone())),
        TypeExpr::NoneType => Err(unsupported(param, "`None` alone carries no value")),
        TypeExpr::Mapping(_, _) => Err(unsupported(param, "mappings are not supported")),
        TypeExpr::Optional(_) | TypeExpr::Union(_) => {
            Err(unsupported(param, "nested optional types are not supported"))
        }
        TypeExpr::Annotated(_, _) => Err(unsupported(param, "unexpected annotation")),
    }
}

/// Decides whether a parameter is exposed positionally.
///
/// Parameters without a default are positional (and required); parameters
/// with one become flags. Variadic and raw-list parameters are always
/// positional.
///
/// ```
/// use sigparse_core::{is_positional, ParameterSpec};
///
/// assert!(is_positional(&ParameterSpec::typed::<String>("name")));
/// assert!(!is_positional(&ParameterSpec::typed::<String>("name").with_default("x")));
/// assert!(is_positional(&ParameterSpec::typed::<String>("rest").variadic().with_default(Vec::<String>::new())));
/// ```
pub fn is_positional(param: &ParameterSpec) -> bool {
    if param.is_variadic() || matches!(param.ty.strip_annotations().0, TypeExpr::Raw) {
        return true;
    }
    param.effective_default().is_none()
}

/// Long flag for an optional parameter: `--` plus the name with underscores
/// replaced by hyphens.
///
/// ```
/// assert_eq!(sigparse_core::flag_name("loves_python"), "--loves-python");
/// ```
pub fn flag_name(name: &str) -> String {
    format!("--{}", name.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_type_expr;

    fn param(name: &str, ty: &str) -> ParameterSpec {
        ParameterSpec::new(name, parse_type_expr(ty).unwrap())
    }

    #[test]
    fn test_variadic_takes_precedence_over_bool() {
        let flags = param("flags", "bool").variadic();
        assert_eq!(
            classify(&flags).unwrap(),
            ArgumentKind::VariadicPositional(Coercer::Bool)
        );
    }

    #[test]
    fn test_annotated_types_are_unwrapped() {
        let count = param("count", r#"Annotated[int, "how many"]"#);
        assert_eq!(
            classify(&count).unwrap(),
            ArgumentKind::Scalar(ScalarType::Int)
        );

        let optional = param("level", r#"Optional[Annotated[Level{LOW, HIGH}, "lvl"]]"#);
        assert!(matches!(
            classify(&optional).unwrap(),
            ArgumentKind::EnumChoice(_)
        ));
    }

    #[test]
    fn test_optional_scalar_is_a_flag() {
        let limit = param("limit", "int | None");
        assert_eq!(
            classify(&limit).unwrap(),
            ArgumentKind::Scalar(ScalarType::Int)
        );
        assert!(!is_positional(&limit));
    }

    #[test]
    fn test_sequence_with_list_default() {
        let tags = param("tags", "list[str]").with_default(Vec::<String>::new());
        assert_eq!(
            classify(&tags).unwrap(),
            ArgumentKind::OptionalSequence(Coercer::Scalar(ScalarType::Str))
        );
    }

    #[test]
    fn test_unsupported_types_fail() {
        let cases = [
            param("table", "dict[str, int]"),
            param("either", "int | str"),
            param("nothing", "None"),
            param("nested", "list[list[int]]").with_default(Value::None),
            param("required_list", "list[str]"),
            param("maybe_maybe", "Optional[Optional[int]]"),
        ];
        for case in &cases {
            let err = classify(case).unwrap_err();
            assert!(
                matches!(err, ConfigurationError::UnsupportedType { .. }),
                "{}: {err:?}",
                case.name
            );
        }
    }

    #[test]
    fn test_untyped_parameter_fails() {
        assert_eq!(
            classify(&param("thing", "any")).unwrap_err(),
            ConfigurationError::UntypedParameter("thing".into())
        );
    }

    #[test]
    fn test_bool_with_none_default_fails() {
        let flag = param("flag", "Optional[bool]");
        assert!(matches!(
            classify(&flag).unwrap_err(),
            ConfigurationError::InvalidDefault { .. }
        ));
    }

    #[test]
    fn test_raw_list_is_positional_even_with_default() {
        let rest = param("rest", "raw").with_default(Vec::<String>::new());
        assert_eq!(classify(&rest).unwrap(), ArgumentKind::RawList);
        assert!(is_positional(&rest));
    }
}
