use std::sync::{Arc, Mutex};

use sigparse::{
    Arguments, BoundParser, ConfigurationError, InvocationError, ParameterSpec, ParserOptions,
    RaisingParser, Signature, Value, as_arg_parser, symbolic_enum,
};

symbolic_enum! {
    enum Mode {
        CREATE,
        LIST,
        DELETE,
    }
}

fn raising() -> ParserOptions {
    ParserOptions::default().with_parser_type(RaisingParser)
}

/// Compiles a parser whose callable just hands its arguments back.
fn echo(signature: Signature, options: ParserOptions) -> BoundParser<Arguments> {
    as_arg_parser(signature, |args| args, options).unwrap()
}

fn pets_signature() -> Signature {
    Signature::new("pets")
        .param(ParameterSpec::typed::<String>("name"))
        .param(ParameterSpec::typed::<i64>("age"))
        .param(ParameterSpec::typed::<Option<Vec<String>>>("pets").with_default(Value::None))
        .param(ParameterSpec::typed::<bool>("loves").with_default(false))
}

#[test]
fn test_pets_example() {
    let parser = echo(pets_signature(), raising());
    let args = parser
        .run(["Johnny", "33", "--pets", "Goofy", "--pets", "Larry", "--loves"])
        .unwrap();

    assert_eq!(args.get::<String>("name").unwrap(), "Johnny");
    assert_eq!(args.get::<i64>("age").unwrap(), 33);
    assert_eq!(
        args.get::<Option<Vec<String>>>("pets").unwrap(),
        Some(vec!["Goofy".to_string(), "Larry".to_string()])
    );
    assert!(args.get::<bool>("loves").unwrap());
    assert_eq!(args.names().collect::<Vec<_>>(), ["name", "age", "pets", "loves"]);
}

#[test]
fn test_defaults_apply_when_flags_are_absent() {
    let parser = echo(pets_signature(), raising());
    let args = parser.run(["Johnny", "33"]).unwrap();
    assert_eq!(args.value("pets"), Some(&Value::None));
    assert_eq!(args.value("loves"), Some(&Value::Bool(false)));
}

#[test]
fn test_required_positionals() {
    let parser = echo(pets_signature(), raising());
    for decl in parser.declarations() {
        let has_default = matches!(decl.name.as_str(), "pets" | "loves");
        assert_eq!(decl.is_positional(), !has_default, "{}", decl.name);
        assert_eq!(decl.required, !has_default, "{}", decl.name);
    }

    let err = parser.run(["Johnny"]).unwrap_err();
    match err {
        InvocationError::Parse(err) => {
            assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument)
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

fn booleans() -> BoundParser<(bool, bool, bool)> {
    let signature = Signature::new("booleans")
        .param(ParameterSpec::typed::<bool>("aaa"))
        .param(ParameterSpec::typed::<bool>("bbb").with_default(true))
        .param(ParameterSpec::typed::<bool>("ccc").with_default(false));
    as_arg_parser(
        signature,
        |args: Arguments| {
            (
                args.get("aaa").unwrap(),
                args.get("bbb").unwrap(),
                args.get("ccc").unwrap(),
            )
        },
        raising(),
    )
    .unwrap()
}

#[test]
fn test_boolean_polarity() {
    let parser = booleans();
    assert_eq!(parser.run(["yes", "--bbb"]).unwrap(), (true, false, false));
    assert_eq!(parser.run(["false"]).unwrap(), (false, true, false));
    assert_eq!(parser.run(["1", "--ccc"]).unwrap(), (true, true, true));
}

#[test]
fn test_repeated_flags_keep_last_value() {
    let parser = echo(with_connection(), raising().with_ignore(["connection"]));
    let bound = parser.with_state([("connection", "db://local")]).unwrap();
    let args = bound.run(["k", "--retries", "1", "--retries", "2"]).unwrap();
    assert_eq!(args.get::<i64>("retries").unwrap(), 2);

    let args = echo(pets_signature(), raising())
        .run(["Johnny", "33", "--loves", "--loves"])
        .unwrap();
    assert!(args.get::<bool>("loves").unwrap());

    assert_eq!(booleans().run(["1", "--bbb", "--bbb"]).unwrap(), (true, false, false));

    // Repeatable flags still accumulate.
    let args = echo(pets_signature(), raising())
        .run(["Johnny", "33", "--pets", "a", "--pets", "b"])
        .unwrap();
    assert_eq!(
        args.get::<Vec<String>>("pets").unwrap(),
        ["a", "b"]
    );
}

#[test]
fn test_boolean_tokens_any_case() {
    let parser = booleans();
    for token in ["y", "YES", "True", "1"] {
        assert!(parser.run([token]).unwrap().0, "{token}");
    }
    for token in ["N", "no", "FALSE", "0"] {
        assert!(!parser.run([token]).unwrap().0, "{token}");
    }
    for token in ["maybe", "2", "on"] {
        assert!(
            matches!(parser.run([token]), Err(InvocationError::Parse(_))),
            "{token}"
        );
    }
}

#[test]
fn test_enum_any_case() {
    let signature = Signature::new("users").param(ParameterSpec::typed::<Mode>("mode"));
    let parser = as_arg_parser(
        signature,
        |args: Arguments| args.get::<Mode>("mode").unwrap(),
        raising(),
    )
    .unwrap();

    for token in ["create", "CREATE", "CrEaTe"] {
        assert_eq!(parser.run([token]).unwrap(), Mode::CREATE);
    }

    let err = parser.run(["NOPE"]).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("CREATE, LIST, DELETE"), "{message}");
}

#[test]
fn test_callable_not_invoked_on_failure() {
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let parser = as_arg_parser(
        pets_signature(),
        move |_args: Arguments| {
            if let Ok(mut calls) = counter.lock() {
                *calls += 1;
            }
        },
        raising(),
    )
    .unwrap();

    assert!(parser.run(["Johnny", "thirty-three"]).is_err());
    assert!(parser.run(["Johnny", "33", "--unknown"]).is_err());
    assert_eq!(*calls.lock().unwrap(), 0);

    parser.run(["Johnny", "33"]).unwrap();
    assert_eq!(*calls.lock().unwrap(), 1);
}

fn with_connection() -> Signature {
    Signature::new("store")
        .param(ParameterSpec::typed::<String>("connection"))
        .param(ParameterSpec::typed::<String>("key"))
        .param(ParameterSpec::typed::<i64>("retries").with_default(3))
}

#[test]
fn test_ignored_parameters_are_not_exposed() {
    let parser = echo(with_connection(), raising().with_ignore(["connection"]));
    assert!(parser.declarations().iter().all(|d| d.name != "connection"));
    assert!(!parser.format_help().contains("connection"));

    match parser.run(["some-key"]).unwrap_err() {
        InvocationError::MissingValue(name) => assert_eq!(name, "connection"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_state_merges_with_parsed_values() {
    let parser = echo(with_connection(), raising().with_ignore(["connection"]));
    let bound = parser.with_state([("connection", "db://local")]).unwrap();
    let args = bound.run(["some-key", "--retries", "5"]).unwrap();

    let expected: Arguments = [
        ("connection", Value::from("db://local")),
        ("key", Value::from("some-key")),
        ("retries", Value::Int(5)),
    ]
    .into_iter()
    .collect();
    assert_eq!(args, expected);

    // The original parser is untouched.
    assert_eq!(parser.state().count(), 0);
    assert!(parser.run(["some-key"]).is_err());
}

#[test]
fn test_with_state_replaces_previous_state() {
    let signature = with_connection().param(ParameterSpec::typed::<String>("user"));
    let parser = echo(signature, raising().with_ignore(["connection", "user"]));

    let first = parser
        .with_state([("connection", "a"), ("user", "root")])
        .unwrap();
    let second = first.with_state([("connection", "b")]).unwrap();

    assert_eq!(second.state().collect::<Vec<_>>(), [("connection", &Value::from("b"))]);
    match second.run(["k"]).unwrap_err() {
        InvocationError::MissingValue(name) => assert_eq!(name, "user"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_state_errors() {
    let parser = echo(with_connection(), raising().with_ignore(["connection"]));
    assert_eq!(
        parser.with_state([("key", "x")]).unwrap_err(),
        ConfigurationError::StateShadowsArgument("key".into())
    );
    assert_eq!(
        parser.with_state([("nope", "x")]).unwrap_err(),
        ConfigurationError::UnknownStateKey("nope".into())
    );
    assert!(matches!(
        parser.with_state([("connection", 5)]).unwrap_err(),
        ConfigurationError::InvalidStateValue { .. }
    ));
}

#[test]
fn test_keywords_supply_ignored_values() {
    let parser = echo(with_connection(), raising().with_ignore(["connection"]));
    let args = parser
        .run_with(["k"], [("connection".to_string(), "db://remote")])
        .unwrap();
    assert_eq!(args.get::<String>("connection").unwrap(), "db://remote");

    assert!(matches!(
        parser.run_with(["k"], [("key".to_string(), "x")]),
        Err(InvocationError::KeywordShadowsArgument(_))
    ));

    let bound = parser.with_state([("connection", "a")]).unwrap();
    assert!(matches!(
        bound.run_with(["k"], [("connection".to_string(), "b")]),
        Err(InvocationError::KeywordShadowsState(_))
    ));
}

#[test]
fn test_variadic_positional_collects_rest() {
    let signature = Signature::new("cat")
        .param(ParameterSpec::typed::<String>("files").variadic())
        .param(ParameterSpec::typed::<bool>("number").with_default(false));
    let parser = echo(signature, raising());

    let args = parser.run(["a.txt", "b.txt", "--number"]).unwrap();
    assert_eq!(
        args.get::<Vec<String>>("files").unwrap(),
        ["a.txt", "b.txt"]
    );
    assert!(args.get::<bool>("number").unwrap());

    assert!(parser.run(["--number"]).is_err());
}

#[test]
fn test_raw_list_passes_tokens_through() {
    let signature = Signature::new("exec")
        .param(ParameterSpec::typed::<String>("program"))
        .param(ParameterSpec::new("rest", "raw".parse().unwrap()));
    let parser = echo(signature, raising());

    let args = parser.run(["ls", "-la", "--color", "auto"]).unwrap();
    assert_eq!(
        args.get::<Vec<String>>("rest").unwrap(),
        ["-la", "--color", "auto"]
    );

    let args = parser.run(["ls"]).unwrap();
    assert_eq!(args.get::<Vec<String>>("rest").unwrap(), Vec::<String>::new());
}

#[test]
fn test_negative_numbers_are_values() {
    let signature = Signature::new("shift")
        .param(ParameterSpec::typed::<i64>("offset"))
        .param(ParameterSpec::typed::<f64>("scale").with_default(1.0));
    let parser = echo(signature, raising());
    let args = parser.run(["-3", "--scale", "-0.5"]).unwrap();
    assert_eq!(args.get::<i64>("offset").unwrap(), -3);
    assert_eq!(args.get::<f64>("scale").unwrap(), -0.5);
}

#[test]
fn test_configuration_errors_are_eager() {
    let untyped = Signature::new("f").param(ParameterSpec::new("x", "any".parse().unwrap()));
    assert!(matches!(
        as_arg_parser(untyped, |_| (), ParserOptions::default()).unwrap_err(),
        ConfigurationError::UntypedParameter(_)
    ));

    let mapping = Signature::new("f").param(ParameterSpec::new("x", "dict[str, int]".parse().unwrap()));
    assert!(matches!(
        as_arg_parser(mapping, |_| (), ParserOptions::default()).unwrap_err(),
        ConfigurationError::UnsupportedType { .. }
    ));

    let sig = Signature::new("f").param(ParameterSpec::typed::<i64>("x"));
    assert_eq!(
        as_arg_parser(sig, |_| (), ParserOptions::default().with_ignore(["y"])).unwrap_err(),
        ConfigurationError::UnknownIgnored("y".into())
    );
}

#[test]
fn test_help_and_usage_render() {
    let signature = pets_signature().with_doc("Describe a person.");
    let parser = echo(signature, raising());

    let help = parser.format_help();
    assert!(help.contains("Describe a person."), "{help}");
    assert!(help.contains("--pets <PETS>"), "{help}");
    assert!(help.contains("`list[str]` (default=`None`)"), "{help}");
    assert!(help.contains("--loves"), "{help}");

    let usage = parser.format_usage();
    assert!(usage.contains("<name>") && usage.contains("<age>"), "{usage}");

    assert!(parser.run(["--help"]).unwrap_err().is_help_request());
}

#[test]
fn test_show_help_skips_the_callable() {
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let parser = as_arg_parser(
        pets_signature(),
        move |_args: Arguments| {
            if let Ok(mut calls) = counter.lock() {
                *calls += 1;
            }
        },
        raising(),
    )
    .unwrap();

    let err = parser.show_help().unwrap_err();
    assert!(err.is_help_request());
    assert!(err.to_string().contains("--pets"), "{err}");
    assert_eq!(*calls.lock().unwrap(), 0);
}
