//! The three boolean shapes.

use std::error::Error;

use sigparse::{Arguments, ParameterSpec, ParserOptions, Signature, as_arg_parser};

fn main() -> Result<(), Box<dyn Error>> {
    let signature = Signature::new("booler")
        // positional: y/yes/true/1 or n/no/false/0, any case
        .param(ParameterSpec::typed::<bool>("aaa"))
        // --bbb sets it to false
        .param(ParameterSpec::typed::<bool>("bbb").with_default(true))
        // --ccc sets it to true
        .param(ParameterSpec::typed::<bool>("ccc").with_default(false));

    let parser = as_arg_parser(
        signature,
        |args: Arguments| {
            let flags: Vec<bool> = ["aaa", "bbb", "ccc"]
                .iter()
                .map(|name| args.get(name).unwrap_or_default())
                .collect();
            println!("{flags:?}");
        },
        ParserOptions::default(),
    )?;

    parser.run(["yes", "--bbb"])?; // [true, false, false]
    parser.run(["false"])?; // [false, true, false]
    Ok(())
}
