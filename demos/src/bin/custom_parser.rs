//! A parser type that tweaks the generated command.

use std::error::Error;

use clap::Command;
use sigparse::{
    Arguments, ErrorMode, ParameterSpec, ParserOptions, ParserType, Signature, as_arg_parser,
};

/// Like the default, with an epilogue and without colors.
#[derive(Debug)]
struct MyParser;

impl ParserType for MyParser {
    fn configure(&self, command: Command) -> Command {
        command
            .color(clap::ColorChoice::Never)
            .after_help("Just like the default, but better!")
    }

    fn error_mode(&self) -> ErrorMode {
        ErrorMode::Exit
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let signature = Signature::new("some_parser")
        .param(ParameterSpec::typed::<String>("user_name"))
        .param(ParameterSpec::typed::<bool>("is_foreigner").with_default(false));
    let parser = as_arg_parser(
        signature,
        |args: Arguments| {
            let name: String = args.get("user_name").unwrap_or_default();
            println!("Welcome {name}");
            if args.get::<bool>("is_foreigner").unwrap_or(false) {
                println!("Nice to have you here");
            }
        },
        ParserOptions::default().with_parser_type(MyParser),
    )?;

    parser.run(["johnny", "--is-foreigner"])?;
    parser.print_help()?;
    Ok(())
}
