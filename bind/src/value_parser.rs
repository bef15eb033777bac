//! Bridge from [`Coercer`] to clap's value parsing.

use std::ffi::OsStr;

use clap::builder::{PossibleValue, TypedValueParser};
use clap::error::ErrorKind;
use clap::{Arg, Command};
use sigparse_core::{Coercer, Value};

/// Runs a [`Coercer`] on each raw token clap hands over.
#[derive(Debug, Clone)]
pub(crate) struct CoercingParser {
    coercer: Coercer,
}

impl CoercingParser {
    pub(crate) fn new(coercer: Coercer) -> Self {
        Self { coercer }
    }
}

impl TypedValueParser for CoercingParser {
    type Value = Value;

    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let Some(word) = value.to_str() else {
            return Err(clap::Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd));
        };

        self.coercer.coerce(word).map_err(|err| {
            let target = arg.map_or_else(|| "...".to_string(), ToString::to_string);
            clap::Error::raw(
                ErrorKind::ValueValidation,
                format!("invalid value '{word}' for '{target}': {err}\n"),
            )
            .with_cmd(cmd)
        })
    }

    fn possible_values(&self) -> Option<Box<dyn Iterator<Item = PossibleValue> + '_>> {
        let choices = self.coercer.choices()?;
        Some(Box::new(
            choices.iter().map(|choice| PossibleValue::new(choice.clone())),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigparse_core::{ScalarType, SymbolSet};

    #[test]
    fn test_parse_ref_coerces() {
        let cmd = Command::new("test");
        let parser = CoercingParser::new(Coercer::Scalar(ScalarType::Int));
        assert_eq!(
            parser.parse_ref(&cmd, None, OsStr::new("-4")).unwrap(),
            Value::Int(-4)
        );
    }

    #[test]
    fn test_parse_ref_reports_coercion_error() {
        let cmd = Command::new("test");
        let parser = CoercingParser::new(Coercer::Bool);
        let err = parser.parse_ref(&cmd, None, OsStr::new("maybe")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("invalid value for boolean"));
    }

    #[test]
    fn test_possible_values_for_symbols() {
        let parser = CoercingParser::new(Coercer::Symbol(SymbolSet::new("Mode", ["A", "B"])));
        let names: Vec<String> = parser
            .possible_values()
            .unwrap()
            .map(|pv| pv.get_name().to_string())
            .collect();
        assert_eq!(names, ["A", "B"]);
        assert!(CoercingParser::new(Coercer::Raw).possible_values().is_none());
    }
}
