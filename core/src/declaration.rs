//! Library-facing argument declarations.
//!
//! An [`ArgumentDeclaration`] is everything the parsing library needs to
//! register one parameter: where it sits, how many tokens it takes, how to
//! coerce them, its default and its help text. [`declare`] produces one from
//! a [`ParameterSpec`] by running the classifier, the resolver and the help
//! assembler.

use serde::Serialize;

use crate::classify::{ArgumentKind, classify, flag_name, is_positional};
use crate::coerce::Coercer;
use crate::error::{ConfigurationError, Result};
use crate::help::assemble_help;
use crate::signature::ParameterSpec;
use crate::value::Value;

/// What the parser does when it meets the argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Store one coerced value.
    Store,
    /// Flag present → `true`.
    StoreTrue,
    /// Flag present → `false`.
    StoreFalse,
    /// Collect coerced values into a list.
    Append,
}

/// Tokens consumed per occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    Zero,
    One,
    OneOrMore,
    ZeroOrMore,
}

impl Arity {
    /// Usage-style marker (`+`, `*`, ...).
    pub fn marker(self) -> &'static str {
        match self {
            Arity::Zero => "0",
            Arity::One => "1",
            Arity::OneOrMore => "+",
            Arity::ZeroOrMore => "*",
        }
    }
}

/// Positional slot or named flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Positional,
    Flag(String),
}

/// Compiled form of one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentDeclaration {
    /// Parameter name; also the key in the parsed namespace.
    pub name: String,
    pub kind: ArgumentKind,
    pub slot: Slot,
    pub action: Action,
    pub arity: Arity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coercer: Option<Coercer>,
    /// Value used when the argument is absent.
    pub default: Option<Value>,
    pub required: bool,
    /// Member names, for enum-valued arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    pub help: String,
}

impl ArgumentDeclaration {
    /// `true` when the argument is exposed by position.
    pub fn is_positional(&self) -> bool {
        self.slot == Slot::Positional
    }

    /// Long flag, for optional arguments.
    pub fn flag(&self) -> Option<&str> {
        match &self.slot {
            Slot::Flag(flag) => Some(flag),
            Slot::Positional => None,
        }
    }

    /// Name shown in usage: the flag, or the parameter name with hyphens.
    pub fn display_name(&self) -> String {
        match &self.slot {
            Slot::Flag(flag) => flag.clone(),
            Slot::Positional => self.name.replace('_', "-"),
        }
    }
}

/// Compiles a parameter into its declaration.
///
/// The default is checked against the declared type and stored normalized
/// (an `int` default for a `float` parameter becomes a float).
///
/// # Examples
///
/// ```
/// use sigparse_core::{declare, Action, ParameterSpec, Slot, Value};
///
/// let loud = declare(&ParameterSpec::typed::<bool>("be_loud").with_default(true), None).unwrap();
/// assert_eq!(loud.slot, Slot::Flag("--be-loud".into()));
/// assert_eq!(loud.action, Action::StoreFalse);
/// assert_eq!(loud.default, Some(Value::Bool(true)));
///
/// let name = declare(&ParameterSpec::typed::<String>("name"), Some("who to greet")).unwrap();
/// assert!(name.is_positional() && name.required);
/// assert_eq!(name.help, "who to greet");
/// ```
pub fn declare(param: &ParameterSpec, docstring_entry: Option<&str>) -> Result<ArgumentDeclaration> {
    let kind = classify(param)?;
    let default = conformed_default(param)?;
    let positional = is_positional(param);
    let slot = if positional {
        Slot::Positional
    } else {
        Slot::Flag(flag_name(&param.name))
    };

    let (action, arity, coercer) = match &kind {
        ArgumentKind::Boolean => match default {
            Some(Value::Bool(true)) => (Action::StoreFalse, Arity::Zero, None),
            Some(_) => (Action::StoreTrue, Arity::Zero, None),
            None => (Action::Store, Arity::One, Some(Coercer::Bool)),
        },
        ArgumentKind::EnumChoice(set) => (Action::Store, Arity::One, Some(Coercer::Symbol(set.clone()))),
        ArgumentKind::Scalar(scalar) => (Action::Store, Arity::One, Some(Coercer::Scalar(*scalar))),
        ArgumentKind::OptionalSequence(element) => (Action::Append, Arity::One, Some(element.clone())),
        ArgumentKind::VariadicPositional(element) => {
            let arity = if default.is_some() {
                Arity::ZeroOrMore
            } else {
                Arity::OneOrMore
            };
            (Action::Append, arity, Some(element.clone()))
        }
        ArgumentKind::RawList => (Action::Append, Arity::ZeroOrMore, Some(Coercer::Raw)),
    };

    // A raw list with nothing left over is an empty list, not a missing value.
    let default = match (&kind, default) {
        (ArgumentKind::RawList, None) => Some(Value::List(Vec::new())),
        (_, default) => default,
    };
    let required = default.is_none();
    let choices = coercer
        .as_ref()
        .and_then(Coercer::choices)
        .map(<[String]>::to_vec);

    Ok(ArgumentDeclaration {
        name: param.name.clone(),
        help: assemble_help(param, docstring_entry),
        kind,
        slot,
        action,
        arity,
        coercer,
        default,
        required,
        choices,
    })
}

/// The effective default, normalized to the parameter's value type.
pub(crate) fn conformed_default(param: &ParameterSpec) -> Result<Option<Value>> {
    let Some(default) = param.effective_default() else {
        return Ok(None);
    };
    default
        .conform(&param.value_type())
        .map(Some)
        .ok_or_else(|| ConfigurationError::InvalidDefault {
            parameter: param.name.clone(),
            ty: param.value_type().to_string(),
            value: default.to_string(),
        })
}
