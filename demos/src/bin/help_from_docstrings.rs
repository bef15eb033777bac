//! Parser description and argument help taken from a Google-style docstring.

use std::error::Error;

use sigparse::{Arguments, DocstringStyle, ParameterSpec, ParserOptions, Signature, as_arg_parser};

const DOC: &str = "My awesome command.

    Long description... Aut reiciendis voluptatem aperiam rerum voluptatem non.
    Aut sit temporibus in ex ut mollitia.

    Args:
        name: some help information about this arg
        is_foreigner: some other help information
    ";

fn main() -> Result<(), Box<dyn Error>> {
    let signature = Signature::new("some_parser")
        .with_doc(DOC)
        .param(ParameterSpec::typed::<String>("name"))
        .param(ParameterSpec::typed::<bool>("is_foreigner").with_default(false));
    let options = ParserOptions::default().with_docstring_style(DocstringStyle::Google);
    let parser = as_arg_parser(signature, |_: Arguments| (), options)?;

    parser.print_help()?;
    Ok(())
}
