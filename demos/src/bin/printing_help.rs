//! Help and usage, printed or formatted into strings.

use std::error::Error;

use sigparse::{Arguments, ParameterSpec, ParserOptions, Signature, as_arg_parser};

fn main() -> Result<(), Box<dyn Error>> {
    let signature = Signature::new("some_parser_name")
        .param(ParameterSpec::typed::<String>("your_name"))
        .param(ParameterSpec::typed::<i64>("your_age"));
    let parser = as_arg_parser(signature, |_: Arguments| (), ParserOptions::default())?;

    parser.print_usage()?;
    parser.print_help()?;

    let usage = parser.format_usage();
    let help = parser.format_help();
    println!("\n{} bytes of usage, {} bytes of help", usage.len(), help.len());
    Ok(())
}
