//! Signature-to-parser compiler.
//!
//! Walks the signature in declaration order, compiles each exposed parameter
//! into an [`ArgumentDeclaration`] and registers the matching [`Arg`] on a
//! `clap::Command`. All configuration problems surface here, before any
//! token is parsed.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use clap::{Arg, ArgAction, Command};
use sigparse_core::{
    Action, ArgumentDeclaration, ArgumentKind, Arity, ConfigurationError, Signature, Slot, declare,
    validate_signature,
};
use sigparse_docstring::DocstringStyle;
use tracing::{debug, warn};

use crate::options::ParserOptions;
use crate::parser_type::ParserType;
use crate::value_parser::CoercingParser;

/// A compiled parser, shared by every BoundParser derived from it.
#[derive(Debug)]
pub(crate) struct Compiled {
    pub(crate) signature: Signature,
    pub(crate) command: Command,
    pub(crate) declarations: Vec<ArgumentDeclaration>,
    pub(crate) ignore: BTreeSet<String>,
    pub(crate) parser_type: Arc<dyn ParserType>,
}

impl Compiled {
    /// `true` when `name` is a parameter exposed on the command line.
    pub(crate) fn is_exposed(&self, name: &str) -> bool {
        self.declarations.iter().any(|decl| decl.name == name)
    }
}

pub(crate) fn compile(signature: Signature, options: &ParserOptions) -> Result<Compiled, ConfigurationError> {
    if let Some(err) = validate_signature(&signature, &options.ignore).into_iter().next() {
        return Err(err);
    }

    let (description, entries) = describe(&signature, options.parse_docstring);

    // Repeated single-value flags keep the last occurrence.
    let mut command = Command::new(signature.name.clone())
        .no_binary_name(true)
        .args_override_self(true);
    if let Some(description) = description {
        command = command.about(description);
    }
    command = options.parser_type.configure(command);

    let mut declarations = Vec::new();
    let mut position = 0;
    for param in &signature.params {
        if options.ignore.contains(&param.name) {
            debug!(parameter = %param.name, "skipping ignored parameter");
            continue;
        }

        let decl = declare(param, entries.get(&param.name).map(String::as_str))?;
        debug!(
            parameter = %decl.name,
            kind = decl.kind.label(),
            slot = %decl.display_name(),
            action = ?decl.action,
            arity = decl.arity.marker(),
            required = decl.required,
            "declared argument"
        );

        if decl.is_positional() {
            position += 1;
        }
        command = command.arg(to_arg(&decl, position));
        declarations.push(decl);
    }

    Ok(Compiled {
        signature,
        command,
        declarations,
        ignore: options.ignore.clone(),
        parser_type: Arc::clone(&options.parser_type),
    })
}

/// Parser description and per-parameter docstring entries.
fn describe(
    signature: &Signature,
    style: Option<DocstringStyle>,
) -> (Option<String>, HashMap<String, String>) {
    let Some(doc) = signature.doc.as_deref() else {
        return (None, HashMap::new());
    };

    let Some(style) = style else {
        let cleaned = sigparse_docstring::clean(doc);
        return ((!cleaned.is_empty()).then_some(cleaned), HashMap::new());
    };

    let parsed = sigparse_docstring::parse(doc, style);
    let description = parsed.description().map(str::to_string);

    let mut entries = HashMap::new();
    for param in parsed.params {
        if signature.find(&param.arg_name).is_none() {
            warn!(
                command = %signature.name,
                parameter = %param.arg_name,
                "docstring documents a parameter that is not in the signature"
            );
            continue;
        }
        entries.insert(param.arg_name, param.description);
    }

    (description, entries)
}

/// Builds the clap argument for a declaration. `position` is the 1-based
/// index among positionals (ignored for flags).
fn to_arg(decl: &ArgumentDeclaration, position: usize) -> Arg {
    let mut arg = Arg::new(decl.name.clone()).help(decl.help.clone());

    arg = match &decl.slot {
        Slot::Positional => arg
            .index(position)
            .value_name(decl.display_name())
            .required(decl.required),
        Slot::Flag(flag) => arg.long(flag.trim_start_matches('-').to_string()),
    };

    arg = match decl.action {
        Action::StoreTrue => arg.action(ArgAction::SetTrue),
        Action::StoreFalse => arg.action(ArgAction::SetFalse),
        Action::Store => arg.action(ArgAction::Set),
        Action::Append => arg.action(ArgAction::Append),
    };

    arg = match decl.arity {
        Arity::Zero => arg,
        Arity::One => arg.num_args(1),
        Arity::OneOrMore => arg.num_args(1..),
        Arity::ZeroOrMore => arg.num_args(0..),
    };

    if let (Slot::Flag(_), Some(_)) = (&decl.slot, &decl.coercer) {
        arg = arg.value_name(decl.name.to_uppercase());
    }

    if let Some(coercer) = &decl.coercer {
        if coercer.accepts_negative_numbers() {
            arg = arg.allow_negative_numbers(true);
        }
        arg = arg.value_parser(CoercingParser::new(coercer.clone()));
    }

    if decl.kind == ArgumentKind::RawList {
        arg = arg.trailing_var_arg(true).allow_hyphen_values(true);
    }

    arg
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigparse_core::{ParameterSpec, Value};

    fn signature() -> Signature {
        Signature::new("pets")
            .with_doc("Register pets.\n\nArgs:\n    owner: Who owns them.\n    ghost: Not a parameter.")
            .param(ParameterSpec::typed::<String>("owner"))
            .param(ParameterSpec::typed::<Option<Vec<String>>>("names").with_default(Value::None))
            .param(ParameterSpec::typed::<String>("db"))
    }

    #[test]
    fn test_compile_skips_ignored_parameters() {
        let options = ParserOptions::default().with_ignore(["db"]);
        let compiled = compile(signature(), &options).unwrap();
        let names: Vec<_> = compiled.declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["owner", "names"]);
        assert!(compiled.command.get_arguments().all(|arg| arg.get_id() != "db"));
        assert!(!compiled.is_exposed("db"));
    }

    #[test]
    fn test_compile_rejects_unknown_ignore() {
        let options = ParserOptions::default().with_ignore(["nope"]);
        assert_eq!(
            compile(signature(), &options).unwrap_err(),
            ConfigurationError::UnknownIgnored("nope".into())
        );
    }

    #[test]
    fn test_docstring_entries_feed_help() {
        let options = ParserOptions::default().with_docstring_style(DocstringStyle::Google);
        let compiled = compile(signature(), &options).unwrap();
        assert_eq!(compiled.declarations[0].help, "Who owns them.");
        assert_eq!(
            compiled.command.get_about().map(ToString::to_string).as_deref(),
            Some("Register pets.")
        );
    }

    #[test]
    fn test_without_docstring_parsing_whole_doc_is_description() {
        let compiled = compile(signature(), &ParserOptions::default()).unwrap();
        let about = compiled.command.get_about().map(ToString::to_string).unwrap();
        assert!(about.starts_with("Register pets.\n\nArgs:"), "{about}");
        assert_eq!(compiled.declarations[0].help, "`str`");
    }

    #[test]
    fn test_positionals_are_indexed_in_order() {
        let compiled = compile(signature(), &ParserOptions::default()).unwrap();
        let positionals: Vec<_> = compiled
            .command
            .get_positionals()
            .map(|arg| arg.get_id().to_string())
            .collect();
        assert_eq!(positionals, ["owner", "db"]);
    }
}
