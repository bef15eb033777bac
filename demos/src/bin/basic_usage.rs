//! Positionals, repeatable flags and boolean switches.
//!
//! `cargo run -p sigparse-demos --bin basic_usage -- Ann 41 --pets Rex`

use std::error::Error;

use sigparse::{Arguments, ParameterSpec, ParserOptions, Signature, Value, as_arg_parser};

fn greet(args: Arguments) {
    let name: String = args.get("your_name").unwrap_or_default();
    println!("Hi {name}");

    if let Ok(Some(pets)) = args.get::<Option<Vec<String>>>("pets") {
        for pet in pets {
            println!("send greetings to {pet} for me");
        }
    }

    if args.get::<bool>("loves_rust").unwrap_or(false) {
        println!("Cool! I love Rust too!");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let signature = Signature::new("some_parser_name")
        .param(ParameterSpec::typed::<String>("your_name"))
        .param(ParameterSpec::typed::<i64>("your_age"))
        .param(ParameterSpec::typed::<Option<Vec<String>>>("pets").with_default(Value::None))
        .param(ParameterSpec::typed::<bool>("loves_rust").with_default(false));
    let parser = as_arg_parser(signature, greet, ParserOptions::default())?;

    parser.run([
        "Johnny",
        "33",
        "--pets",
        "Goofy",
        "--pets",
        "Larry",
        "--loves-rust",
    ])?;

    // Tokens from the shell, if any were given.
    let tokens: Vec<_> = std::env::args_os().skip(1).collect();
    if !tokens.is_empty() {
        parser.run(tokens)?;
    }
    Ok(())
}
