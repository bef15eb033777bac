//! Ignored parameters filled from pre-bound state.

use std::error::Error;

use sigparse::{Arguments, ParameterSpec, ParserOptions, Signature, Value, as_arg_parser};

fn welcome(args: Arguments) {
    let count: i64 = args.get("user_count").unwrap_or_default();
    let name: String = args.get("user_name").unwrap_or_default();
    let address: String = args.get("user_address").unwrap_or_default();
    println!("you're the {count}th user today! welcome, {name}");
    println!("They say {address} is lovely this time of the year...");
    if args.get::<bool>("is_foreigner").unwrap_or(false) {
        println!("Nice to have you here");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let signature = Signature::new("some_parser")
        .param(ParameterSpec::typed::<i64>("user_count"))
        .param(ParameterSpec::typed::<String>("user_name"))
        .param(ParameterSpec::typed::<String>("user_address"))
        .param(ParameterSpec::typed::<bool>("is_foreigner").with_default(false));
    let options = ParserOptions::default().with_ignore(["user_count", "user_name"]);
    let parser = as_arg_parser(signature, welcome, options)?;

    let state = [("user_count", Value::Int(33)), ("user_name", Value::from("Josh"))];
    parser.with_state(state.clone())?.run(["some address..."])?;

    // Bound parsers can be kept around and reused.
    let saved = parser.with_state(state)?;
    saved.run(["some address...", "--is-foreigner"])?;
    Ok(())
}
