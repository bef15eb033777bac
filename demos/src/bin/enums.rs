//! Enum members are matched in any case.

use std::error::Error;

use sigparse::{
    Arguments, ParameterSpec, ParserOptions, RaisingParser, Signature, as_arg_parser,
    symbolic_enum,
};

symbolic_enum! {
    #[allow(non_camel_case_types)]
    enum CommandModes {
        CREATE_USER,
        LIST_USERS,
        DELETE_USER,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let signature = Signature::new("some_parser").param(ParameterSpec::typed::<CommandModes>("mode"));
    let parser = as_arg_parser(
        signature,
        |args: Arguments| {
            if let Ok(mode) = args.get::<CommandModes>("mode") {
                println!("you picked {mode} mode!");
            }
        },
        ParserOptions::default().with_parser_type(RaisingParser),
    )?;

    parser.run(["CREATE_USER"])?;
    parser.run(["create_user"])?;
    parser.run(["crEatE_usEr"])?;

    if let Err(err) = parser.run(["NON EXISTING FUNCTIONALITY EXAMPLE"]) {
        eprintln!("{err}");
    }
    Ok(())
}
