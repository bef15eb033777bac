//! Inline documentation attached to the type wins over docstring entries.

use std::error::Error;

use sigparse::{
    Annotate, Arguments, DocstringStyle, ParameterSpec, ParserOptions, Signature, TypeExpr,
    as_arg_parser,
};

const DOC: &str = "Some short description

    Some long description Dolorem ut illum in dolorum eaque maxime dignissimos.

    Args:
        param_2: this is only documented in the docstring
        param_4: this is documented both in the docstring and as an annotation
    ";

fn documented(name: &str, doc: &str) -> ParameterSpec {
    ParameterSpec::new(name, TypeExpr::annotated(i64::type_expr(), doc))
}

fn main() -> Result<(), Box<dyn Error>> {
    let signature = Signature::new("some_parser_name")
        .with_doc(DOC)
        .param(ParameterSpec::typed::<i64>("param_1"))
        .param(ParameterSpec::typed::<i64>("param_2"))
        .param(documented("param_3", "this is only documented here"))
        .param(documented("param_4", "this is documented here and in the docstring"));
    let options = ParserOptions::default().with_docstring_style(DocstringStyle::Google);
    let parser = as_arg_parser(signature, |_: Arguments| (), options)?;

    parser.print_help()?;
    Ok(())
}
