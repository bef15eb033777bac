//! A variadic parameter collects the remaining positionals.

use std::error::Error;

use sigparse::{Arguments, ParameterSpec, ParserOptions, Signature, as_arg_parser};

fn main() -> Result<(), Box<dyn Error>> {
    let signature = Signature::new("some_parser_name")
        .param(ParameterSpec::typed::<String>("pet_names").variadic())
        .param(ParameterSpec::typed::<String>("your_name").with_default("John"));
    let parser = as_arg_parser(
        signature,
        |args: Arguments| {
            let name: String = args.get("your_name").unwrap_or_default();
            println!("Hi {name}");
            for pet in args.get::<Vec<String>>("pet_names").unwrap_or_default() {
                println!("send greetings to {pet} for me");
            }
        },
        ParserOptions::default(),
    )?;

    parser.run(["Goofy", "Larry", "Yes", "--your-name", "Johnny"])?;
    Ok(())
}
